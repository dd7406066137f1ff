//! Assessment engine: quiz and job scoring, profiling, learning path generation.

mod job;
mod path;
mod profiling;
mod quiz;

pub use job::{
    evaluate_job, score_job, tier_for_score, JobAnswer, JobAssessmentOutcome, JobQuestion,
    JobQuestionKind, JobScore,
};
pub use path::{
    base_curriculum, bucket_for, generate_path, spawn_path_generation, DurationEstimate,
    LearningPath,
};
pub use profiling::{
    default_questionnaire, AnswerType, ProfilingAnswer, ProfilingAssessment, ProfilingProgress,
    ProfilingQuestion,
};
pub use quiz::{score_positional, score_quiz, QuizQuestion, QuizResult};
