//! Code execution seam for coding exercises.
//!
//! Real evaluation needs a sandboxed interpreter and lives behind the
//! [`CodeExecutor`] trait. [`SimulatedExecutor`] is the stand-in: it performs
//! a shallow well-formedness check and then decides pass/fail with a seedable
//! PRNG, so runs are reproducible when a seed is configured.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ExecutionError;
use crate::simulate::{simulate, Pending};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    Python,
    Java,
}

impl FromStr for Language {
    type Err = ExecutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Ok(Language::JavaScript),
            "python" | "py" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            other => Err(ExecutionError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Java => "java",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected: String,
}

/// Outcome of one test case. Ids are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    pub id: usize,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
    pub error: Option<String>,
}

pub trait CodeExecutor {
    /// Run `source` against every test case.
    ///
    /// Problems with the submission itself are reported per test case through
    /// [`TestOutcome::error`]; an `Err` means the run could not happen at all.
    fn execute(
        &mut self,
        source: &str,
        language: Language,
        test_cases: &[TestCase],
    ) -> Result<Vec<TestOutcome>, ExecutionError>;
}

/// Pass/fail decided by a PRNG after a delimiter balance check.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    rng: Pcg64,
    pass_probability: f64,
}

impl SimulatedExecutor {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Pcg64::seed_from_u64(seed),
            None => Pcg64::from_entropy(),
        };
        Self {
            rng,
            pass_probability: 0.5,
        }
    }

    /// Override the per-test pass probability (clamped to 0.0..=1.0).
    pub fn with_pass_probability(mut self, p: f64) -> Self {
        self.pass_probability = p.clamp(0.0, 1.0);
        self
    }
}

impl CodeExecutor for SimulatedExecutor {
    fn execute(
        &mut self,
        source: &str,
        language: Language,
        test_cases: &[TestCase],
    ) -> Result<Vec<TestOutcome>, ExecutionError> {
        if test_cases.is_empty() {
            return Err(ExecutionError::Malformed("no test cases to run".into()));
        }

        let problem = check_source(source).err();
        if let Some(ref reason) = problem {
            tracing::debug!(%language, reason = %reason, "submission rejected before running");
        }

        let outcomes = test_cases
            .iter()
            .enumerate()
            .map(|(i, case)| match problem {
                Some(ref reason) => TestOutcome {
                    id: i + 1,
                    input: case.input.clone(),
                    expected: case.expected.clone(),
                    actual: "Error".into(),
                    passed: false,
                    error: Some(reason.clone()),
                },
                None => TestOutcome {
                    id: i + 1,
                    input: case.input.clone(),
                    expected: case.expected.clone(),
                    actual: format!("{language} execution simulated"),
                    passed: self.rng.gen_bool(self.pass_probability),
                    error: None,
                },
            })
            .collect();
        Ok(outcomes)
    }
}

/// Reject empty sources and unbalanced brackets.
fn check_source(source: &str) -> Result<(), String> {
    if source.trim().is_empty() {
        return Err("no source code submitted".into());
    }
    let mut stack = Vec::new();
    for c in source.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let open = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if stack.pop() != Some(open) {
                    return Err(format!("unexpected '{c}'"));
                }
            }
            _ => {}
        }
    }
    match stack.last() {
        Some(open) => Err(format!("unclosed '{open}'")),
        None => Ok(()),
    }
}

/// Summary of one coding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingRun {
    pub outcomes: Vec<TestOutcome>,
    pub passed: usize,
    pub total: usize,
}

impl CodingRun {
    pub fn from_outcomes(outcomes: Vec<TestOutcome>) -> Self {
        let passed = outcomes.iter().filter(|o| o.passed).count();
        let total = outcomes.len();
        Self {
            outcomes,
            passed,
            total,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.total > 0 && self.passed == self.total
    }

    /// Plain-text report of the run.
    pub fn report(&self) -> String {
        let mut out = format!(
            "Executed {} test cases\nPassed: {}/{}\n",
            self.total, self.passed, self.total
        );
        for o in &self.outcomes {
            out.push_str(&format!(
                "\nTest {}: {}\nInput: {}\nExpected: {}\nActual: {}\n",
                o.id,
                if o.passed { "PASS" } else { "FAIL" },
                o.input,
                o.expected,
                o.actual
            ));
            if let Some(ref error) = o.error {
                out.push_str(&format!("Error: {error}\n"));
            }
        }
        out
    }
}

/// Run `executor` behind the simulated execution latency.
pub fn execute_delayed<E>(
    mut executor: E,
    source: String,
    language: Language,
    test_cases: Vec<TestCase>,
    delay: Duration,
) -> Pending<Result<CodingRun, ExecutionError>>
where
    E: CodeExecutor + Send + 'static,
{
    simulate(delay, move || {
        executor
            .execute(&source, language, &test_cases)
            .map(CodingRun::from_outcomes)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cases() -> Vec<TestCase> {
        vec![
            TestCase {
                input: "\"racecar\"".into(),
                expected: "true".into(),
            },
            TestCase {
                input: "\"hello\"".into(),
                expected: "false".into(),
            },
        ]
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("JS".parse::<Language>().unwrap(), Language::JavaScript);
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert!(matches!(
            "cobol".parse::<Language>(),
            Err(ExecutionError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let src = "function f(s) { return s === s.split('').reverse().join(''); }";
        let a = SimulatedExecutor::new(Some(7))
            .execute(src, Language::JavaScript, &cases())
            .unwrap();
        let b = SimulatedExecutor::new(Some(7))
            .execute(src, Language::JavaScript, &cases())
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].id, 1);
        assert_eq!(a[1].id, 2);
    }

    #[test]
    fn test_empty_source_reports_error_per_case() {
        let outcomes = SimulatedExecutor::new(Some(1))
            .execute("   ", Language::Python, &cases())
            .unwrap();
        assert!(outcomes.iter().all(|o| !o.passed && o.actual == "Error"));
        assert_eq!(outcomes[0].error.as_deref(), Some("no source code submitted"));
    }

    #[test]
    fn test_unbalanced_source_is_caught() {
        let outcomes = SimulatedExecutor::new(Some(1))
            .execute("function f( {", Language::JavaScript, &cases())
            .unwrap();
        assert!(outcomes.iter().all(|o| o.error.is_some()));
    }

    #[test]
    fn test_pass_probability_bounds() {
        let src = "def f(s): return s == s[::-1]";
        let all = SimulatedExecutor::new(Some(3))
            .with_pass_probability(1.0)
            .execute(src, Language::Python, &cases())
            .unwrap();
        assert!(CodingRun::from_outcomes(all).all_passed());

        let none = SimulatedExecutor::new(Some(3))
            .with_pass_probability(0.0)
            .execute(src, Language::Python, &cases())
            .unwrap();
        assert_eq!(CodingRun::from_outcomes(none).passed, 0);
    }

    #[test]
    fn test_no_test_cases_is_malformed() {
        let err = SimulatedExecutor::new(None)
            .execute("x", Language::Java, &[])
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Malformed(_)));
    }

    #[test]
    fn test_report_lists_every_case() {
        let outcomes = SimulatedExecutor::new(Some(1))
            .execute("", Language::Java, &cases())
            .unwrap();
        let report = CodingRun::from_outcomes(outcomes).report();
        assert!(report.starts_with("Executed 2 test cases\nPassed: 0/2\n"));
        assert!(report.contains("Test 2: FAIL"));
        assert!(report.contains("Error: no source code submitted"));
    }

    #[tokio::test]
    async fn test_execute_delayed() {
        let run = execute_delayed(
            SimulatedExecutor::new(Some(9)).with_pass_probability(1.0),
            "return true;".into(),
            Language::JavaScript,
            cases(),
            Duration::ZERO,
        )
        .wait()
        .await
        .unwrap()
        .unwrap();
        assert!(run.all_passed());
    }
}
