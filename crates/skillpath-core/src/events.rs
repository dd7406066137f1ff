use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::DurationEstimate;
use crate::module::{DifficultyTier, ModuleKind};
use crate::navigation::View;

/// Every state change in the session produces an Event.
/// The CLI prints them; front-ends render from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    ViewChanged {
        from: View,
        to: View,
        at: DateTime<Utc>,
    },
    SignedIn {
        user_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    /// Session state was cleared.
    SignedOut {
        at: DateTime<Utc>,
    },
    ProfileCreated {
        goal_id: String,
        streak: u32,
        completed_skills: usize,
        at: DateTime<Utc>,
    },
    ProfileUpdated {
        user_id: String,
        at: DateTime<Utc>,
    },
    TopicSelected {
        topic_id: u32,
        title: String,
        at: DateTime<Utc>,
    },
    AssessmentStarted {
        topic: String,
        questions: usize,
        at: DateTime<Utc>,
    },
    AssessmentAnswered {
        question_id: u32,
        answered: usize,
        total: usize,
        at: DateTime<Utc>,
    },
    LearningPathReady {
        topic: String,
        difficulty: DifficultyTier,
        duration: DurationEstimate,
        modules: usize,
        at: DateTime<Utc>,
    },
    ModuleOpened {
        module_id: u32,
        at: DateTime<Utc>,
    },
    ModuleStarted {
        module_id: u32,
        kind: ModuleKind,
        at: DateTime<Utc>,
    },
    ModuleCompleted {
        module_id: u32,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
    SkillCompleted {
        skill_id: u32,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
    CourseEnrolled {
        course_id: u32,
        title: String,
        at: DateTime<Utc>,
    },
    QuizFinished {
        skill_id: u32,
        score: u32,
        passed: bool,
        at: DateTime<Utc>,
    },
    CodingFinished {
        module_id: Option<u32>,
        passed: bool,
        at: DateTime<Utc>,
    },
    JobAssessmentFinished {
        role: String,
        score: u32,
        tier: DifficultyTier,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        view: View,
        user: Option<String>,
        goal: Option<String>,
        selected_topic: Option<String>,
        learning_path: Option<String>,
        path_progress_pct: Option<f64>,
        roadmap_progress_pct: Option<f64>,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short machine name, matching the serde tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::ViewChanged { .. } => "ViewChanged",
            Event::SignedIn { .. } => "SignedIn",
            Event::SignedOut { .. } => "SignedOut",
            Event::ProfileCreated { .. } => "ProfileCreated",
            Event::ProfileUpdated { .. } => "ProfileUpdated",
            Event::TopicSelected { .. } => "TopicSelected",
            Event::AssessmentStarted { .. } => "AssessmentStarted",
            Event::AssessmentAnswered { .. } => "AssessmentAnswered",
            Event::LearningPathReady { .. } => "LearningPathReady",
            Event::ModuleOpened { .. } => "ModuleOpened",
            Event::ModuleStarted { .. } => "ModuleStarted",
            Event::ModuleCompleted { .. } => "ModuleCompleted",
            Event::SkillCompleted { .. } => "SkillCompleted",
            Event::CourseEnrolled { .. } => "CourseEnrolled",
            Event::QuizFinished { .. } => "QuizFinished",
            Event::CodingFinished { .. } => "CodingFinished",
            Event::JobAssessmentFinished { .. } => "JobAssessmentFinished",
            Event::StateSnapshot { .. } => "StateSnapshot",
        }
    }
}
