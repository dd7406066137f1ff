//! Roadmaps keyed by career goal.

use serde::Deserialize;
use std::path::Path;

use super::tracker::{Roadmap, SkillNode};
use crate::error::{CoreError, ValidationError};
use crate::module::DifficultyTier::{self, Advanced, Beginner, Intermediate};

/// Goal id used when a profile's goal has no roadmap of its own.
pub const FALLBACK_GOAL: &str = "frontend";

/// The set of roadmaps the dashboard can show.
#[derive(Debug, Clone)]
pub struct RoadmapBook {
    roadmaps: Vec<Roadmap>,
    fallback: usize,
}

#[derive(Deserialize)]
struct RoadmapFile {
    #[serde(default = "default_fallback")]
    fallback: String,
    #[serde(rename = "roadmap")]
    roadmaps: Vec<Roadmap>,
}

fn default_fallback() -> String {
    FALLBACK_GOAL.into()
}

impl RoadmapBook {
    /// # Errors
    ///
    /// Fails if any roadmap is malformed or `fallback` names no roadmap.
    pub fn new(roadmaps: Vec<Roadmap>, fallback: &str) -> Result<Self, ValidationError> {
        for roadmap in &roadmaps {
            roadmap.validate()?;
        }
        let fallback = roadmaps
            .iter()
            .position(|r| r.id == fallback)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "fallback".into(),
                message: format!("no roadmap with id '{fallback}'"),
            })?;
        Ok(Self { roadmaps, fallback })
    }

    /// Built-in frontend and backend roadmaps.
    pub fn builtin() -> Self {
        Self {
            roadmaps: vec![frontend(), backend()],
            fallback: 0,
        }
    }

    /// Parse a TOML document of `[[roadmap]]` tables.
    ///
    /// ```toml
    /// fallback = "frontend"
    ///
    /// [[roadmap]]
    /// id = "frontend"
    /// title = "Frontend Developer"
    ///
    /// [[roadmap.skills]]
    /// id = 1
    /// name = "HTML Basics"
    /// level = 1
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        let file: RoadmapFile = toml::from_str(content)?;
        Ok(Self::new(file.roadmaps, &file.fallback)?)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Roadmap for a goal id, falling back to the default roadmap.
    pub fn for_goal(&self, goal_id: &str) -> &Roadmap {
        self.roadmaps
            .iter()
            .find(|r| r.id == goal_id)
            .unwrap_or(&self.roadmaps[self.fallback])
    }

    pub fn roadmaps(&self) -> &[Roadmap] {
        &self.roadmaps
    }
}

impl Default for RoadmapBook {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Roadmap node with display metadata: `(difficulty, estimated hours, category)`.
fn skill(
    id: u32,
    name: &str,
    level: u8,
    prerequisite: Option<u32>,
    resources: u32,
    (difficulty, hours, category): (DifficultyTier, u32, &str),
) -> SkillNode {
    SkillNode {
        id,
        name: name.to_string(),
        level,
        prerequisite,
        resources,
        estimated_hours: Some(hours),
        difficulty: Some(difficulty),
        category: Some(category.to_string()),
    }
}

fn frontend() -> Roadmap {
    Roadmap {
        id: "frontend".into(),
        title: "Frontend Developer".into(),
        skills: vec![
            skill(1, "HTML Basics", 1, None, 5, (Beginner, 8, "Markup")),
            skill(2, "CSS Fundamentals", 1, Some(1), 7, (Beginner, 12, "Styling")),
            skill(3, "JavaScript Basics", 2, Some(2), 10, (Intermediate, 20, "Programming")),
            skill(4, "DOM Manipulation", 2, Some(3), 6, (Intermediate, 15, "Programming")),
            skill(5, "React Fundamentals", 3, Some(4), 12, (Intermediate, 25, "Framework")),
            skill(6, "State Management", 3, Some(5), 8, (Advanced, 18, "Framework")),
            skill(7, "React Router", 4, Some(6), 5, (Advanced, 10, "Framework")),
            skill(8, "API Integration", 4, Some(7), 9, (Advanced, 16, "Integration")),
        ],
    }
}

// Web Frameworks and Database Design both hang off Data Structures.
fn backend() -> Roadmap {
    Roadmap {
        id: "backend".into(),
        title: "Backend Developer".into(),
        skills: vec![
            skill(1, "Python Basics", 1, None, 8, (Beginner, 10, "Programming")),
            skill(2, "Data Structures", 2, Some(1), 10, (Intermediate, 20, "Computer Science")),
            skill(3, "Web Frameworks", 3, Some(2), 12, (Intermediate, 25, "Framework")),
            skill(4, "Database Design", 3, Some(2), 9, (Intermediate, 18, "Databases")),
            skill(5, "API Development", 4, Some(3), 11, (Advanced, 22, "Integration")),
            skill(6, "Authentication", 4, Some(5), 7, (Advanced, 12, "Security")),
        ],
    }
}
