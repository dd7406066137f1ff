//! # SkillPath Core Library
//!
//! This library provides the core logic for the SkillPath learning-roadmap
//! application. Every operation is available through the standalone
//! `skillpath` CLI; any graphical front-end is a thin layer over the same
//! core library.
//!
//! ## Architecture
//!
//! - **Navigation**: A reducer-style state machine over the application's
//!   views. Actions go in, events come out, nothing else has side effects
//! - **Assessment**: Quiz and job-readiness scoring, the profiling
//!   questionnaire and learning path generation
//! - **Roadmap**: Skill graphs with prerequisite-based locking and progress
//! - **Simulation**: Single-shot tokio tasks that stand in for remote calls
//!
//! ## Key Components
//!
//! - [`Navigator`]: Owns the current view and session context
//! - [`RoadmapBook`]: Skill roadmaps keyed by career goal
//! - [`CodeExecutor`]: Seam for running code against test cases
//! - [`Config`]: Application configuration management

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod executor;
pub mod module;
pub mod navigation;
pub mod roadmap;
pub mod session;
pub mod simulate;

pub use assessment::{
    evaluate_job, generate_path, score_job, score_quiz, JobAssessmentOutcome, LearningPath,
    ProfilingAssessment, QuizResult,
};
pub use catalog::{Course, CourseCatalog, Goal, Topic, TopicCatalog};
pub use config::Config;
pub use error::{
    AssessmentError, ConfigError, CoreError, ExecutionError, NavigationError, ValidationError,
};
pub use events::Event;
pub use executor::{CodeExecutor, CodingRun, Language, SimulatedExecutor, TestCase, TestOutcome};
pub use module::{DifficultyTier, Module, ModuleKind};
pub use navigation::{Action, Navigator, View};
pub use roadmap::{CompletedSet, Roadmap, RoadmapBook, SkillNode, SkillStatus};
pub use session::{Profile, SessionContext, User};
pub use simulate::Pending;
