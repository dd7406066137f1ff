use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assessment::{JobAssessmentOutcome, LearningPath, QuizResult};
use crate::catalog::Topic;
use crate::module::Module;
use crate::session::{LoginForm, ProfilePatch, SignupForm};

/// User actions and completion callbacks that drive the navigator.
///
/// Serialized as `{"action": "<snake_case name>", ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Login,
    Signup,
    Back,
    SubmitLogin {
        form: LoginForm,
    },
    SubmitSignup {
        form: SignupForm,
    },
    CompleteOnboarding {
        goal_id: String,
        #[serde(default)]
        skill_ratings: BTreeMap<String, u8>,
    },
    BrowseTopics,
    OpenDashboard,
    SelectTopic {
        topic: Topic,
    },
    StartAssessment,
    AnswerProfiling {
        choice: usize,
    },
    AssessmentCompleted {
        path: LearningPath,
    },
    StartModule {
        module: Module,
    },
    OpenModule {
        module_id: u32,
    },
    MarkModuleComplete {
        module_id: u32,
    },
    MarkSkillComplete {
        skill_id: u32,
    },
    SkillQuizFinished {
        skill_id: u32,
        result: QuizResult,
    },
    EnrollCourse {
        course_id: u32,
    },
    CodingFinished {
        passed: bool,
    },
    JobAssessmentFinished {
        outcome: JobAssessmentOutcome,
    },
    UpdateProfile {
        patch: ProfilePatch,
    },
    Logout,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Login => "login",
            Action::Signup => "signup",
            Action::Back => "back",
            Action::SubmitLogin { .. } => "submit_login",
            Action::SubmitSignup { .. } => "submit_signup",
            Action::CompleteOnboarding { .. } => "complete_onboarding",
            Action::BrowseTopics => "browse_topics",
            Action::OpenDashboard => "open_dashboard",
            Action::SelectTopic { .. } => "select_topic",
            Action::StartAssessment => "start_assessment",
            Action::AnswerProfiling { .. } => "answer_profiling",
            Action::AssessmentCompleted { .. } => "assessment_completed",
            Action::StartModule { .. } => "start_module",
            Action::OpenModule { .. } => "open_module",
            Action::MarkModuleComplete { .. } => "mark_module_complete",
            Action::MarkSkillComplete { .. } => "mark_skill_complete",
            Action::SkillQuizFinished { .. } => "skill_quiz_finished",
            Action::EnrollCourse { .. } => "enroll_course",
            Action::CodingFinished { .. } => "coding_finished",
            Action::JobAssessmentFinished { .. } => "job_assessment_finished",
            Action::UpdateProfile { .. } => "update_profile",
            Action::Logout => "logout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_and_struct_actions() {
        let login: Action = serde_json::from_str(r#"{"action":"login"}"#).unwrap();
        assert_eq!(login, Action::Login);

        let answer: Action =
            serde_json::from_str(r#"{"action":"answer_profiling","choice":3}"#).unwrap();
        assert_eq!(answer, Action::AnswerProfiling { choice: 3 });

        let onboarding: Action =
            serde_json::from_str(r#"{"action":"complete_onboarding","goal_id":"backend"}"#)
                .unwrap();
        assert_eq!(onboarding.name(), "complete_onboarding");
    }

    #[test]
    fn test_name_matches_serde_tag() {
        let action = Action::MarkSkillComplete { skill_id: 3 };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["action"], action.name());
    }
}
