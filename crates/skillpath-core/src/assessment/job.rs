//! Job-readiness assessment scoring.
//!
//! Multiple-choice questions earn one point when correct and only count toward
//! the total once answered. Code and scenario questions always count and earn
//! partial credit when the answer is long enough. The length check is a
//! heuristic: nothing here validates that submitted code is correct.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::path::base_curriculum;
use super::quiz::percent;
use crate::config::AssessmentConfig;
use crate::module::{DifficultyTier, JobRole, Module};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum JobQuestionKind {
    MultipleChoice { options: Vec<String>, correct: usize },
    Code,
    Scenario,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQuestion {
    pub id: u32,
    pub prompt: String,
    #[serde(flatten)]
    pub kind: JobQuestionKind,
    #[serde(default)]
    pub difficulty: DifficultyTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobAnswer {
    Choice(usize),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobScore {
    pub points: f64,
    pub total: usize,
    /// 0-100
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAssessmentOutcome {
    pub role: JobRole,
    pub score: JobScore,
    pub tier: DifficultyTier,
    pub recommended: Vec<Module>,
}

pub fn score_job(
    questions: &[JobQuestion],
    answers: &HashMap<u32, JobAnswer>,
    config: &AssessmentConfig,
) -> JobScore {
    let mut points = 0.0;
    let mut total = 0;

    for question in questions {
        let answer = answers.get(&question.id);
        match &question.kind {
            JobQuestionKind::MultipleChoice { correct, .. } => {
                if let Some(answer) = answer {
                    total += 1;
                    if *answer == JobAnswer::Choice(*correct) {
                        points += 1.0;
                    }
                }
            }
            JobQuestionKind::Code | JobQuestionKind::Scenario => {
                total += 1;
                if let Some(JobAnswer::Text(text)) = answer {
                    if text.trim().chars().count() > config.free_text_min_len {
                        points += config.partial_credit;
                    }
                }
            }
        }
    }

    JobScore {
        points,
        total,
        score: percent(points, total),
    }
}

/// `score >= advanced` advanced, `>= intermediate` intermediate, else beginner.
pub fn tier_for_score(score: u32, config: &AssessmentConfig) -> DifficultyTier {
    if score >= config.job_advanced_threshold {
        DifficultyTier::Advanced
    } else if score >= config.job_intermediate_threshold {
        DifficultyTier::Intermediate
    } else {
        DifficultyTier::Beginner
    }
}

/// Score a submission and recommend the curriculum slice for its tier.
pub fn evaluate_job(
    role: JobRole,
    questions: &[JobQuestion],
    answers: &HashMap<u32, JobAnswer>,
    config: &AssessmentConfig,
) -> JobAssessmentOutcome {
    let score = score_job(questions, answers, config);
    let tier = tier_for_score(score.score, config);
    let recommended = base_curriculum(&role.title)
        .into_iter()
        .skip(super::path::tier_offset(tier))
        .map(Module::from)
        .collect();
    tracing::debug!(role = %role.role, score = score.score, %tier, "job assessment scored");
    JobAssessmentOutcome {
        role,
        score,
        tier,
        recommended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(id: u32, correct: usize) -> JobQuestion {
        JobQuestion {
            id,
            prompt: format!("Question {id}"),
            kind: JobQuestionKind::MultipleChoice {
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct,
            },
            difficulty: DifficultyTier::Beginner,
        }
    }

    fn free(id: u32, kind: JobQuestionKind) -> JobQuestion {
        JobQuestion {
            id,
            prompt: format!("Question {id}"),
            kind,
            difficulty: DifficultyTier::Intermediate,
        }
    }

    #[test]
    fn test_partial_credit_example() {
        let questions = vec![mc(1, 0), mc(2, 3), free(3, JobQuestionKind::Code)];
        let answers: HashMap<u32, JobAnswer> = [
            (1, JobAnswer::Choice(0)),
            (2, JobAnswer::Choice(1)),
            (3, JobAnswer::Text("return a + b".into())),
        ]
        .into_iter()
        .collect();

        let score = score_job(&questions, &answers, &AssessmentConfig::default());
        assert_eq!(score.total, 3);
        assert!((score.points - 1.7).abs() < 1e-9);
        assert_eq!(score.score, 57);
    }

    #[test]
    fn test_short_text_earns_nothing() {
        let questions = vec![free(1, JobQuestionKind::Scenario)];
        let answers: HashMap<u32, JobAnswer> =
            [(1, JobAnswer::Text("  React   ".into()))].into_iter().collect();
        let score = score_job(&questions, &answers, &AssessmentConfig::default());
        assert_eq!(score.total, 1);
        assert_eq!(score.score, 0);
    }

    #[test]
    fn test_exactly_min_len_is_not_enough() {
        let questions = vec![free(1, JobQuestionKind::Code)];
        let answers: HashMap<u32, JobAnswer> =
            [(1, JobAnswer::Text("0123456789".into()))].into_iter().collect();
        assert_eq!(
            score_job(&questions, &answers, &AssessmentConfig::default()).points,
            0.0
        );
    }

    #[test]
    fn test_unanswered_multiple_choice_is_left_out_of_total() {
        let questions = vec![mc(1, 0), mc(2, 0), free(3, JobQuestionKind::Code)];
        let answers: HashMap<u32, JobAnswer> =
            [(1, JobAnswer::Choice(0))].into_iter().collect();
        let score = score_job(&questions, &answers, &AssessmentConfig::default());
        assert_eq!(score.total, 2);
        assert_eq!(score.score, 50);
    }

    #[test]
    fn test_nothing_counted_scores_zero() {
        let questions = vec![mc(1, 0)];
        let score = score_job(&questions, &HashMap::new(), &AssessmentConfig::default());
        assert_eq!(score.total, 0);
        assert_eq!(score.score, 0);
    }

    #[test]
    fn test_tiers() {
        let cfg = AssessmentConfig::default();
        assert_eq!(tier_for_score(80, &cfg), DifficultyTier::Advanced);
        assert_eq!(tier_for_score(79, &cfg), DifficultyTier::Intermediate);
        assert_eq!(tier_for_score(60, &cfg), DifficultyTier::Intermediate);
        assert_eq!(tier_for_score(59, &cfg), DifficultyTier::Beginner);
    }

    #[test]
    fn test_evaluate_recommends_tier_slice() {
        let role = JobRole {
            id: 1,
            role: "frontend".into(),
            title: "Frontend Developer".into(),
        };
        let questions = vec![mc(1, 1)];
        let answers: HashMap<u32, JobAnswer> =
            [(1, JobAnswer::Choice(1))].into_iter().collect();
        let outcome = evaluate_job(role, &questions, &answers, &AssessmentConfig::default());

        assert_eq!(outcome.tier, DifficultyTier::Advanced);
        let ids: Vec<_> = outcome.recommended.iter().map(Module::id).collect();
        assert_eq!(ids, vec![5, 6]);
    }

    #[test]
    fn test_question_json_shape() {
        let json = r#"{"id":4,"prompt":"Pick one","type":"multiple-choice","options":["x","y"],"correct":1}"#;
        let question: JobQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(question.kind, JobQuestionKind::MultipleChoice {
            options: vec!["x".into(), "y".into()],
            correct: 1,
        });
        assert_eq!(question.difficulty, DifficultyTier::Beginner);

        let answer: JobAnswer = serde_json::from_str("\"fn add(a, b) { a + b }\"").unwrap();
        assert!(matches!(answer, JobAnswer::Text(_)));
    }
}
