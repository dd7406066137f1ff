//! Session and profile store.
//!
//! Everything here lives for one session only. Logging out replaces the whole
//! [`SessionContext`] with an empty one.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::assessment::{JobAssessmentOutcome, LearningPath, ProfilingAssessment};
use crate::catalog::{Goal, Topic};
use crate::error::ValidationError;
use crate::module::Module;
use crate::roadmap::CompletedSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Apply a profile edit. Absent fields are left alone.
    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(ref name) = patch.name {
            self.name = name.clone();
        }
        if let Some(ref email) = patch.email {
            self.email = email.clone();
        }
        if let Some(ref avatar) = patch.avatar {
            self.avatar = Some(avatar.clone());
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub goal: Goal,
    pub streak: u32,
    pub completed_skills: CompletedSet,
    /// Self-assessed 1-5 ratings collected during onboarding.
    #[serde(default)]
    pub skill_ratings: BTreeMap<String, u8>,
}

/// Fields a user may edit on their profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl ProfilePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = BTreeMap::new();
        if matches!(self.name.as_deref(), Some(n) if n.trim().is_empty()) {
            errors.insert("name".to_string(), "Name is required".to_string());
        }
        if matches!(self.email.as_deref(), Some(e) if e.trim().is_empty()) {
            errors.insert("email".to_string(), "Email is required".to_string());
        }
        into_result(errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    Login,
    Signup,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errors.insert("email".to_string(), "Email is required".to_string());
        }
        into_result(errors)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub field_of_interest: String,
    #[serde(default)]
    pub current_status: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub learning_style: String,
}

impl SignupForm {
    /// Check required fields, reporting every problem at once keyed by field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errors.insert("email".to_string(), "Email is required".to_string());
        }
        if self.password.is_empty() {
            errors.insert("password".to_string(), "Password is required".to_string());
        }
        if self.password != self.confirm_password {
            errors.insert(
                "confirm_password".to_string(),
                "Passwords do not match".to_string(),
            );
        }
        into_result(errors)
    }
}

fn into_result(errors: BTreeMap<String, String>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Fields(errors))
    }
}

/// Header statistics shown next to the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub streak: u32,
    pub completed: usize,
    pub in_progress: usize,
}

/// All per-session state, owned by the navigator.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user: Option<User>,
    pub profile: Option<Profile>,
    pub auth_mode: Option<AuthMode>,
    pub selected_topic: Option<Topic>,
    pub learning_path: Option<LearningPath>,
    /// Modules of the current learning path that are done.
    pub path_progress: CompletedSet,
    pub current_module: Option<Module>,
    pub assessment: Option<ProfilingAssessment>,
    pub last_job_outcome: Option<JobAssessmentOutcome>,
    /// Dashboard courses the user enrolled in.
    pub enrolled_courses: BTreeSet<u32>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Replace the learning path; progress on the old one is dropped.
    pub fn set_learning_path(&mut self, path: LearningPath) {
        self.learning_path = Some(path);
        self.path_progress = CompletedSet::new();
    }

    pub fn stats(&self) -> UserStats {
        let (streak, completed) = self
            .profile
            .as_ref()
            .map(|p| (p.streak, p.completed_skills.len()))
            .unwrap_or((0, 0));
        UserStats {
            streak,
            completed,
            in_progress: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_reports_every_missing_field() {
        let form = SignupForm {
            password: "secret".into(),
            confirm_password: "other".into(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.field("name"), Some("Name is required"));
        assert_eq!(err.field("email"), Some("Email is required"));
        assert_eq!(err.field("password"), None);
        assert_eq!(err.field("confirm_password"), Some("Passwords do not match"));
    }

    #[test]
    fn test_signup_accepts_complete_form() {
        let form = SignupForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
            ..Default::default()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let form = LoginForm {
            name: "   ".into(),
            email: "ada@example.com".into(),
        };
        assert_eq!(
            form.validate().unwrap_err().field("name"),
            Some("Name is required")
        );
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut user = User::new("Ada", "ada@example.com");
        let id = user.id.clone();
        user.apply(&ProfilePatch {
            avatar: Some("https://img.example/ada.png".into()),
            ..Default::default()
        });
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.avatar.as_deref(), Some("https://img.example/ada.png"));
    }

    #[test]
    fn test_stats_without_profile() {
        let ctx = SessionContext::default();
        assert_eq!(
            ctx.stats(),
            UserStats {
                streak: 0,
                completed: 0,
                in_progress: 1
            }
        );
    }
}
