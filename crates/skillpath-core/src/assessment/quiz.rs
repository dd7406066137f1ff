//! Topic quiz scoring.
//!
//! `score = round(100 * correct / total)`, passing at the configured threshold.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    /// 0-100
    pub score: u32,
    pub passed: bool,
}

impl QuizResult {
    /// Score `correct` out of `total`. An empty quiz scores 0 and fails.
    pub fn from_counts(correct: usize, total: usize, pass_threshold: u32) -> Self {
        let score = percent(correct as f64, total);
        Self {
            correct,
            total,
            score,
            passed: total > 0 && score >= pass_threshold,
        }
    }
}

/// `round(100 * points / total)`, 0 when `total` is 0.
pub(crate) fn percent(points: f64, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * points / total as f64).round() as u32
}

/// Score answers keyed by question id. Unanswered questions count as wrong.
pub fn score_quiz(
    questions: &[QuizQuestion],
    answers: &HashMap<u32, usize>,
    pass_threshold: u32,
) -> QuizResult {
    let correct = questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_index))
        .count();
    QuizResult::from_counts(correct, questions.len(), pass_threshold)
}

/// Score positional answers against positional correct indices.
pub fn score_positional(
    correct_indices: &[usize],
    answers: &[usize],
    pass_threshold: u32,
) -> QuizResult {
    let correct = correct_indices
        .iter()
        .zip(answers)
        .filter(|(expected, given)| expected == given)
        .count();
    QuizResult::from_counts(correct, correct_indices.len(), pass_threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_questions() -> Vec<QuizQuestion> {
        (1..=3)
            .map(|id| QuizQuestion {
                id,
                prompt: format!("Question {id}"),
                options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                correct_index: (id as usize) % 2,
            })
            .collect()
    }

    #[test]
    fn test_two_of_three_fails() {
        let questions = three_questions();
        let answers: HashMap<u32, usize> = [(1, 1), (2, 0), (3, 0)].into_iter().collect();
        let result = score_quiz(&questions, &answers, 70);
        assert_eq!(result.correct, 2);
        assert_eq!(result.score, 67);
        assert!(!result.passed);
    }

    #[test]
    fn test_three_of_three_passes() {
        let questions = three_questions();
        let answers: HashMap<u32, usize> = [(1, 1), (2, 0), (3, 1)].into_iter().collect();
        let result = score_quiz(&questions, &answers, 70);
        assert_eq!(result.score, 100);
        assert!(result.passed);
    }

    #[test]
    fn test_unanswered_counts_as_wrong() {
        let questions = three_questions();
        let answers: HashMap<u32, usize> = [(1, 1)].into_iter().collect();
        assert_eq!(score_quiz(&questions, &answers, 70).score, 33);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let result = QuizResult::from_counts(7, 10, 70);
        assert_eq!(result.score, 70);
        assert!(result.passed);
    }

    #[test]
    fn test_empty_quiz() {
        let result = QuizResult::from_counts(0, 0, 0);
        assert_eq!(result.score, 0);
        assert!(!result.passed);
    }

    #[test]
    fn test_positional_ignores_extra_answers() {
        let result = score_positional(&[0, 1, 0], &[0, 1, 0, 3], 70);
        assert_eq!(result.correct, 3);
        assert_eq!(result.total, 3);
    }
}
