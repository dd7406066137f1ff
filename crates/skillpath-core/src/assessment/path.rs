//! Learning path generation from profiling answers.
//!
//! ```text
//! experience bucket  <2 beginner   <4 intermediate   else advanced
//! time bucket        <2 8-12 weeks <4 4-6 weeks      else 2-4 weeks
//! ```
//!
//! The tier picks a slice of a fixed six-module curriculum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use super::profiling::{AnswerType, ProfilingAnswer};
use crate::module::{DifficultyTier, LearningModule, Module};
use crate::simulate::{simulate, Pending};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationEstimate {
    EightToTwelveWeeks,
    FourToSixWeeks,
    TwoToFourWeeks,
}

impl DurationEstimate {
    pub fn from_time_commitment(bucket: usize) -> Self {
        match bucket {
            0 | 1 => DurationEstimate::EightToTwelveWeeks,
            2 | 3 => DurationEstimate::FourToSixWeeks,
            _ => DurationEstimate::TwoToFourWeeks,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DurationEstimate::EightToTwelveWeeks => "8-12 weeks",
            DurationEstimate::FourToSixWeeks => "4-6 weeks",
            DurationEstimate::TwoToFourWeeks => "2-4 weeks",
        }
    }
}

impl fmt::Display for DurationEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub topic: String,
    pub difficulty: DifficultyTier,
    pub duration: DurationEstimate,
    pub modules: Vec<Module>,
    #[serde(default)]
    pub answers: Vec<ProfilingAnswer>,
}

impl LearningPath {
    pub fn module(&self, id: u32) -> Option<&Module> {
        self.modules.iter().find(|m| m.id() == id)
    }
}

/// The full six-module curriculum for a topic, in study order.
pub fn base_curriculum(topic: &str) -> Vec<LearningModule> {
    [
        (1, format!("{topic} Fundamentals"), 1, "1-2 weeks"),
        (2, "Core Concepts".to_string(), 1, "1-2 weeks"),
        (3, "Practical Applications".to_string(), 2, "2-3 weeks"),
        (4, "Best Practices".to_string(), 2, "1-2 weeks"),
        (5, "Advanced Techniques".to_string(), 3, "2-3 weeks"),
        (6, "Real-world Projects".to_string(), 3, "2-4 weeks"),
    ]
    .into_iter()
    .map(|(id, name, level, estimate)| LearningModule {
        id,
        name,
        level,
        estimate: estimate.to_string(),
    })
    .collect()
}

/// How many leading curriculum modules a tier skips.
pub(crate) fn tier_offset(tier: DifficultyTier) -> usize {
    match tier {
        DifficultyTier::Beginner => 0,
        DifficultyTier::Intermediate => 2,
        DifficultyTier::Advanced => 4,
    }
}

/// Choice index recorded for `answer_type`.
///
/// A missing answer falls back to bucket 0. This keeps incomplete submissions
/// working but silently steers them to the beginner tier, so it is logged.
pub fn bucket_for(answers: &[ProfilingAnswer], answer_type: AnswerType) -> usize {
    match answers.iter().find(|a| a.answer_type == answer_type) {
        Some(answer) => answer.choice,
        None => {
            tracing::warn!(?answer_type, "profiling answer missing, defaulting bucket to 0");
            0
        }
    }
}

pub fn generate_path(topic: &str, answers: &[ProfilingAnswer]) -> LearningPath {
    let experience = bucket_for(answers, AnswerType::Experience);
    let time = bucket_for(answers, AnswerType::Time);
    let difficulty = DifficultyTier::from_experience(experience);

    let modules = base_curriculum(topic)
        .into_iter()
        .skip(tier_offset(difficulty))
        .map(Module::from)
        .collect();

    LearningPath {
        topic: topic.to_string(),
        difficulty,
        duration: DurationEstimate::from_time_commitment(time),
        modules,
        answers: answers.to_vec(),
    }
}

/// [`generate_path`] behind the simulated generation latency.
pub fn spawn_path_generation(
    topic: String,
    answers: Vec<ProfilingAnswer>,
    delay: Duration,
) -> Pending<LearningPath> {
    simulate(delay, move || generate_path(&topic, &answers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(answer_type: AnswerType, choice: usize) -> ProfilingAnswer {
        ProfilingAnswer {
            question_id: 0,
            answer_type,
            choice,
        }
    }

    fn ids(path: &LearningPath) -> Vec<u32> {
        path.modules.iter().map(Module::id).collect()
    }

    #[test]
    fn test_beginner_gets_full_curriculum() {
        let path = generate_path(
            "Rust",
            &[answer(AnswerType::Experience, 1), answer(AnswerType::Time, 0)],
        );
        assert_eq!(path.difficulty, DifficultyTier::Beginner);
        assert_eq!(path.duration.label(), "8-12 weeks");
        assert_eq!(ids(&path), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(path.modules[0].name(), "Rust Fundamentals");
    }

    #[test]
    fn test_intermediate_skips_basics() {
        let path = generate_path(
            "Rust",
            &[answer(AnswerType::Experience, 3), answer(AnswerType::Time, 2)],
        );
        assert_eq!(path.difficulty, DifficultyTier::Intermediate);
        assert_eq!(path.duration, DurationEstimate::FourToSixWeeks);
        assert_eq!(ids(&path), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_advanced_keeps_last_two() {
        let path = generate_path(
            "Rust",
            &[answer(AnswerType::Experience, 4), answer(AnswerType::Time, 4)],
        );
        assert_eq!(path.difficulty, DifficultyTier::Advanced);
        assert_eq!(path.duration, DurationEstimate::TwoToFourWeeks);
        assert_eq!(ids(&path), vec![5, 6]);
    }

    #[test]
    fn test_missing_answers_default_to_bucket_zero() {
        let path = generate_path("Rust", &[answer(AnswerType::Style, 3)]);
        assert_eq!(path.difficulty, DifficultyTier::Beginner);
        assert_eq!(path.duration, DurationEstimate::EightToTwelveWeeks);
        assert_eq!(path.modules.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_generation_completes_after_delay() {
        let pending = spawn_path_generation(
            "Go".into(),
            vec![answer(AnswerType::Experience, 2)],
            Duration::from_millis(3000),
        );
        let path = pending.wait().await.unwrap();
        assert_eq!(path.topic, "Go");
        assert_eq!(path.difficulty, DifficultyTier::Intermediate);
        assert_eq!(path.answers.len(), 1);
    }
}
