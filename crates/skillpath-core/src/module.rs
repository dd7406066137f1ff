//! Curriculum modules.
//!
//! Dashboard, roadmap and practice views all talk about "modules". They are
//! modelled as one tagged union so the navigator can route on the `kind`
//! discriminant instead of guessing from field shapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::executor::TestCase;
use crate::navigation::View;

/// Difficulty tier shared by topics, learning paths and job assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    /// Bucket a 0-based experience answer: `<2` beginner, `<4` intermediate, else advanced.
    pub fn from_experience(bucket: usize) -> Self {
        match bucket {
            0 | 1 => DifficultyTier::Beginner,
            2 | 3 => DifficultyTier::Intermediate,
            _ => DifficultyTier::Advanced,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyTier::Beginner => "Beginner",
            DifficultyTier::Intermediate => "Intermediate",
            DifficultyTier::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(DifficultyTier::Beginner),
            "intermediate" => Ok(DifficultyTier::Intermediate),
            "advanced" => Ok(DifficultyTier::Advanced),
            other => Err(ValidationError::InvalidValue {
                field: "difficulty".into(),
                message: format!("unknown difficulty '{other}'"),
            }),
        }
    }
}

/// A unit of study inside a learning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningModule {
    pub id: u32,
    pub name: String,
    pub level: u8,
    /// Human-readable effort estimate, e.g. "1-2 weeks".
    pub estimate: String,
}

/// A coding exercise run through a [`crate::executor::CodeExecutor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingProblem {
    pub id: u32,
    pub title: String,
    pub difficulty: DifficultyTier,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

/// A job role whose assessment gauges readiness for that role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRole {
    pub id: u32,
    /// Role key such as "frontend" or "fullstack".
    pub role: String,
    pub title: String,
}

/// Discriminant of [`Module`], used in events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    LearningModule,
    CodingProblem,
    JobAssessmentRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Module {
    LearningModule(LearningModule),
    CodingProblem(CodingProblem),
    JobAssessmentRole(JobRole),
}

impl Module {
    pub fn id(&self) -> u32 {
        match self {
            Module::LearningModule(m) => m.id,
            Module::CodingProblem(p) => p.id,
            Module::JobAssessmentRole(r) => r.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Module::LearningModule(m) => &m.name,
            Module::CodingProblem(p) => &p.title,
            Module::JobAssessmentRole(r) => &r.title,
        }
    }

    pub fn kind(&self) -> ModuleKind {
        match self {
            Module::LearningModule(_) => ModuleKind::LearningModule,
            Module::CodingProblem(_) => ModuleKind::CodingProblem,
            Module::JobAssessmentRole(_) => ModuleKind::JobAssessmentRole,
        }
    }

    /// View that starting this module leads to.
    ///
    /// Learning modules are practised through the coding runner.
    pub fn practice_view(&self) -> View {
        match self {
            Module::LearningModule(_) | Module::CodingProblem(_) => View::CodingAssessment,
            Module::JobAssessmentRole(_) => View::JobAssessment,
        }
    }

    /// Test cases to run for this module, if it carries any.
    pub fn test_cases(&self) -> &[TestCase] {
        match self {
            Module::CodingProblem(p) => &p.test_cases,
            _ => &[],
        }
    }
}

impl From<LearningModule> for Module {
    fn from(m: LearningModule) -> Self {
        Module::LearningModule(m)
    }
}

impl From<CodingProblem> for Module {
    fn from(p: CodingProblem) -> Self {
        Module::CodingProblem(p)
    }
}

impl From<JobRole> for Module {
    fn from(r: JobRole) -> Self {
        Module::JobAssessmentRole(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_buckets() {
        assert_eq!(DifficultyTier::from_experience(0), DifficultyTier::Beginner);
        assert_eq!(DifficultyTier::from_experience(1), DifficultyTier::Beginner);
        assert_eq!(DifficultyTier::from_experience(2), DifficultyTier::Intermediate);
        assert_eq!(DifficultyTier::from_experience(3), DifficultyTier::Intermediate);
        assert_eq!(DifficultyTier::from_experience(4), DifficultyTier::Advanced);
        assert_eq!(DifficultyTier::from_experience(9), DifficultyTier::Advanced);
    }

    #[test]
    fn test_parse_difficulty_ignores_case() {
        assert_eq!("Advanced".parse::<DifficultyTier>().unwrap(), DifficultyTier::Advanced);
        assert_eq!(" beginner ".parse::<DifficultyTier>().unwrap(), DifficultyTier::Beginner);
        assert!("expert".parse::<DifficultyTier>().is_err());
    }

    #[test]
    fn test_module_serializes_with_kind_tag() {
        let module = Module::JobAssessmentRole(JobRole {
            id: 7,
            role: "backend".into(),
            title: "Backend Developer".into(),
        });
        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["kind"], "job_assessment_role");
        assert_eq!(json["role"], "backend");

        let back: Module = serde_json::from_value(json).unwrap();
        assert_eq!(back, module);
    }

    #[test]
    fn test_practice_view_routes_on_kind() {
        let learning: Module = LearningModule {
            id: 1,
            name: "Core Concepts".into(),
            level: 1,
            estimate: "1-2 weeks".into(),
        }
        .into();
        let problem: Module = CodingProblem {
            id: 2,
            title: "Two Sum".into(),
            difficulty: DifficultyTier::Beginner,
            test_cases: vec![],
        }
        .into();
        let role: Module = JobRole {
            id: 3,
            role: "frontend".into(),
            title: "Frontend Developer".into(),
        }
        .into();

        assert_eq!(learning.practice_view(), View::CodingAssessment);
        assert_eq!(problem.practice_view(), View::CodingAssessment);
        assert_eq!(role.practice_view(), View::JobAssessment);
        assert_eq!(role.kind(), ModuleKind::JobAssessmentRole);
    }
}
