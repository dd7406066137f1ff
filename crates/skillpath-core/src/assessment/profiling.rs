//! Profiling questionnaire shown before a learning path is generated.
//!
//! A [`ProfilingAssessment`] is created when the assessment view is entered
//! and dropped on completion or when the user navigates away.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AssessmentError;

/// What a profiling question measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerType {
    Experience,
    Goal,
    Time,
    Style,
    Interest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilingQuestion {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub answer_type: AnswerType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilingAnswer {
    pub question_id: u32,
    pub answer_type: AnswerType,
    /// 0-based option index; doubles as the bucket for path generation.
    pub choice: usize,
}

/// Progress information for the assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilingProgress {
    pub current_index: usize,
    pub total_questions: usize,
    pub answered: usize,
    pub is_complete: bool,
    /// 0-100, counting the question on screen as reached.
    pub percent: u32,
}

/// Default five-question profile for a topic.
pub fn default_questionnaire(topic: &str) -> Vec<ProfilingQuestion> {
    let q = |id, prompt: String, options: [&str; 5], answer_type| ProfilingQuestion {
        id,
        prompt,
        options: options.iter().map(|o| o.to_string()).collect(),
        answer_type,
    };
    vec![
        q(
            1,
            format!("What is your current experience level with {topic}?"),
            [
                "Complete beginner",
                "Basic understanding",
                "Some experience",
                "Intermediate",
                "Advanced",
            ],
            AnswerType::Experience,
        ),
        q(
            2,
            format!("What is your primary goal for learning {topic}?"),
            [
                "Career advancement",
                "Personal projects",
                "Academic requirements",
                "Staying current",
                "Building a specific application",
            ],
            AnswerType::Goal,
        ),
        q(
            3,
            format!("How much time can you dedicate to {topic} per week?"),
            [
                "1-2 hours",
                "3-5 hours",
                "6-10 hours",
                "11-15 hours",
                "More than 15 hours",
            ],
            AnswerType::Time,
        ),
        q(
            4,
            "What is your preferred learning style?".to_string(),
            [
                "Hands-on exercises",
                "Video tutorials",
                "Reading documentation",
                "Guided projects",
                "A mix of all",
            ],
            AnswerType::Style,
        ),
        q(
            5,
            format!("Which aspect of {topic} interests you most?"),
            [
                "Fundamentals and theory",
                "Practical implementation",
                "Real-world applications",
                "Advanced techniques",
                "Integration with other tools",
            ],
            AnswerType::Interest,
        ),
    ]
}

/// One run through the questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilingAssessment {
    pub topic: String,
    pub started_at: DateTime<Utc>,
    questions: Vec<ProfilingQuestion>,
    answers: Vec<ProfilingAnswer>,
}

impl ProfilingAssessment {
    pub fn new(topic: impl Into<String>) -> Self {
        let topic = topic.into();
        let questions = default_questionnaire(&topic);
        Self::with_questions(topic, questions)
    }

    pub fn with_questions(topic: impl Into<String>, questions: Vec<ProfilingQuestion>) -> Self {
        Self {
            topic: topic.into(),
            started_at: Utc::now(),
            questions,
            answers: Vec::new(),
        }
    }

    pub fn questions(&self) -> &[ProfilingQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[ProfilingAnswer] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&ProfilingQuestion> {
        self.questions.get(self.answers.len())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Answer the current question and move to the next one.
    ///
    /// # Errors
    ///
    /// Fails if every question is answered or `choice` is not an option.
    pub fn answer(&mut self, choice: usize) -> Result<&ProfilingAnswer, AssessmentError> {
        let question = self.current_question().ok_or(AssessmentError::NoQuestion)?;
        if choice >= question.options.len() {
            return Err(AssessmentError::InvalidChoice {
                question_id: question.id,
                choice,
                options: question.options.len(),
            });
        }
        let answer = ProfilingAnswer {
            question_id: question.id,
            answer_type: question.answer_type,
            choice,
        };
        self.answers.push(answer);
        Ok(&self.answers[self.answers.len() - 1])
    }

    pub fn progress(&self) -> ProfilingProgress {
        let total = self.questions.len();
        let answered = self.answers.len();
        let is_complete = self.is_complete();
        let reached = if is_complete { total } else { answered + 1 };
        let percent = if total == 0 {
            100
        } else {
            (100.0 * reached as f64 / total as f64).round() as u32
        };
        ProfilingProgress {
            current_index: answered.min(total),
            total_questions: total,
            answered,
            is_complete,
            percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_questionnaire_covers_each_type_once() {
        let questions = default_questionnaire("Rust");
        let types: Vec<_> = questions.iter().map(|q| q.answer_type).collect();
        assert_eq!(
            types,
            vec![
                AnswerType::Experience,
                AnswerType::Goal,
                AnswerType::Time,
                AnswerType::Style,
                AnswerType::Interest
            ]
        );
        assert!(questions[0].prompt.contains("Rust"));
    }

    #[test]
    fn test_answer_advances_and_tags_type() {
        let mut assessment = ProfilingAssessment::new("Rust");
        assert_eq!(assessment.progress().percent, 20);

        let answer = assessment.answer(3).unwrap().clone();
        assert_eq!(answer.question_id, 1);
        assert_eq!(answer.answer_type, AnswerType::Experience);
        assert_eq!(assessment.current_question().unwrap().id, 2);

        let progress = assessment.progress();
        assert_eq!(progress.current_index, 1);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.percent, 40);
    }

    #[test]
    fn test_invalid_choice_leaves_state_alone() {
        let mut assessment = ProfilingAssessment::new("Rust");
        let err = assessment.answer(5).unwrap_err();
        assert_eq!(
            err,
            AssessmentError::InvalidChoice {
                question_id: 1,
                choice: 5,
                options: 5
            }
        );
        assert!(assessment.answers().is_empty());
    }

    #[test]
    fn test_cannot_answer_past_the_end() {
        let mut assessment = ProfilingAssessment::new("Rust");
        for _ in 0..5 {
            assessment.answer(0).unwrap();
        }
        assert!(assessment.is_complete());
        assert_eq!(assessment.progress().percent, 100);
        assert_eq!(assessment.answer(0).unwrap_err(), AssessmentError::NoQuestion);
    }
}
