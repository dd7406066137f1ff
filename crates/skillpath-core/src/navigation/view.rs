use serde::{Deserialize, Serialize};
use std::fmt;

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Landing,
    SignupFlow,
    Onboarding,
    Dashboard,
    TopicSearch,
    TopicOverview,
    AiAssessment,
    CustomRoadmap,
    CodingAssessment,
    JobAssessment,
}

impl View {
    pub const ALL: [View; 10] = [
        View::Landing,
        View::SignupFlow,
        View::Onboarding,
        View::Dashboard,
        View::TopicSearch,
        View::TopicOverview,
        View::AiAssessment,
        View::CustomRoadmap,
        View::CodingAssessment,
        View::JobAssessment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::SignupFlow => "signup-flow",
            View::Onboarding => "onboarding",
            View::Dashboard => "dashboard",
            View::TopicSearch => "topic-search",
            View::TopicOverview => "topic-overview",
            View::AiAssessment => "ai-assessment",
            View::CustomRoadmap => "custom-roadmap",
            View::CodingAssessment => "coding-assessment",
            View::JobAssessment => "job-assessment",
        }
    }

    /// Views that need a signed-in user.
    pub fn requires_auth(&self) -> bool {
        !matches!(self, View::Landing | View::SignupFlow)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_name() {
        for view in View::ALL {
            let json = serde_json::to_string(&view).unwrap();
            assert_eq!(json, format!("\"{view}\""));
        }
    }
}
