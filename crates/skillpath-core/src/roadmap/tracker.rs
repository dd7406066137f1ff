//! Skill status classification and progress.
//!
//! ## Status rule
//!
//! ```text
//! completed  if id is in the completed set
//! current    else if prerequisite is none or completed
//! locked     otherwise
//! ```
//!
//! On a linear chain this marks exactly one frontier skill as `current`. On a
//! branching graph several siblings can be `current` at once; that is the
//! documented behaviour, not a bug.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::module::{DifficultyTier, Module};

/// A node of a roadmap. Static once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillNode {
    pub id: u32,
    pub name: String,
    pub level: u8,
    #[serde(default)]
    pub prerequisite: Option<u32>,
    /// Number of curated resources.
    #[serde(default)]
    pub resources: u32,
    #[serde(default)]
    pub estimated_hours: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<DifficultyTier>,
    /// Subject area, e.g. "Styling" or "Framework".
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillStatus {
    Completed,
    Current,
    Locked,
}

/// Completed skill or module ids.
///
/// Backed by a list to keep completion order, with set semantics on insert.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedSet(Vec<u32>);

impl CompletedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an id. Returns `false` if it was already present.
    pub fn insert(&mut self, id: u32) -> bool {
        if self.0.contains(&id) {
            return false;
        }
        self.0.push(id);
        true
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in completion order.
    pub fn ids(&self) -> &[u32] {
        &self.0
    }
}

impl FromIterator<u32> for CompletedSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = CompletedSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Status of a single node relative to a completed set.
pub fn skill_status(skill: &SkillNode, completed: &CompletedSet) -> SkillStatus {
    if completed.contains(skill.id) {
        return SkillStatus::Completed;
    }
    match skill.prerequisite {
        None => SkillStatus::Current,
        Some(p) if completed.contains(p) => SkillStatus::Current,
        Some(_) => SkillStatus::Locked,
    }
}

/// A node paired with its computed status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillProgress {
    #[serde(flatten)]
    pub skill: SkillNode,
    pub status: SkillStatus,
}

/// Full classification of a roadmap, as rendered by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapReport {
    pub roadmap_id: String,
    pub title: String,
    pub skills: Vec<SkillProgress>,
    pub completed: usize,
    pub total: usize,
    pub progress_pct: f64,
}

/// An ordered set of skill nodes with prerequisite links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: String,
    pub title: String,
    pub skills: Vec<SkillNode>,
}

impl Roadmap {
    /// Build a roadmap, rejecting duplicate ids and dangling prerequisites.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        skills: Vec<SkillNode>,
    ) -> Result<Self, ValidationError> {
        let roadmap = Self {
            id: id.into(),
            title: title.into(),
            skills,
        };
        roadmap.validate()?;
        Ok(roadmap)
    }

    /// Linear chain over a learning path's modules: the first module has no
    /// prerequisite and each later one requires its predecessor.
    pub fn chain(id: impl Into<String>, title: impl Into<String>, modules: &[Module]) -> Self {
        let skills = modules
            .iter()
            .enumerate()
            .map(|(i, module)| SkillNode {
                id: module.id(),
                name: module.name().to_string(),
                level: match module {
                    Module::LearningModule(m) => m.level,
                    _ => 1,
                },
                prerequisite: i.checked_sub(1).map(|prev| modules[prev].id()),
                resources: 0,
                estimated_hours: None,
                difficulty: match module {
                    Module::CodingProblem(p) => Some(p.difficulty),
                    _ => None,
                },
                category: None,
            })
            .collect();
        Self {
            id: id.into(),
            title: title.into(),
            skills,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for skill in &self.skills {
            if !seen.insert(skill.id) {
                return Err(ValidationError::InvalidValue {
                    field: format!("{}.skills", self.id),
                    message: format!("duplicate skill id {}", skill.id),
                });
            }
        }
        for skill in &self.skills {
            if let Some(p) = skill.prerequisite {
                if !seen.contains(&p) {
                    return Err(ValidationError::InvalidValue {
                        field: format!("{}.skills", self.id),
                        message: format!("skill {} requires unknown skill {}", skill.id, p),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&SkillNode> {
        self.skills.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills whose name contains `query` (case-insensitive) and whose
    /// difficulty equals `difficulty`. `None` matches every difficulty; a
    /// skill without a difficulty only passes that case.
    pub fn filter(&self, query: &str, difficulty: Option<DifficultyTier>) -> Vec<&SkillNode> {
        let query = query.trim().to_lowercase();
        self.skills
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&query))
            .filter(|s| difficulty.is_none() || s.difficulty == difficulty)
            .collect()
    }

    /// Status of the node with `id`, or `None` if it is not on this roadmap.
    pub fn status_of(&self, id: u32, completed: &CompletedSet) -> Option<SkillStatus> {
        self.get(id).map(|s| skill_status(s, completed))
    }

    /// Number of this roadmap's skills present in `completed`.
    ///
    /// Ids from other roadmaps are ignored so progress never exceeds 100%.
    pub fn completed_count(&self, completed: &CompletedSet) -> usize {
        self.skills.iter().filter(|s| completed.contains(s.id)).count()
    }

    /// 0.0 .. 100.0 share of completed skills.
    pub fn progress_pct(&self, completed: &CompletedSet) -> f64 {
        if self.skills.is_empty() {
            return 0.0;
        }
        100.0 * self.completed_count(completed) as f64 / self.skills.len() as f64
    }

    pub fn report(&self, completed: &CompletedSet) -> RoadmapReport {
        RoadmapReport {
            roadmap_id: self.id.clone(),
            title: self.title.clone(),
            skills: self
                .skills
                .iter()
                .map(|s| SkillProgress {
                    skill: s.clone(),
                    status: skill_status(s, completed),
                })
                .collect(),
            completed: self.completed_count(completed),
            total: self.skills.len(),
            progress_pct: self.progress_pct(completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::LearningModule;

    fn node(id: u32, prerequisite: Option<u32>) -> SkillNode {
        SkillNode {
            id,
            name: format!("Skill {id}"),
            level: 1,
            prerequisite,
            resources: 0,
            estimated_hours: None,
            difficulty: None,
            category: None,
        }
    }

    fn chain_of(n: u32) -> Roadmap {
        let skills = (1..=n)
            .map(|id| node(id, if id == 1 { None } else { Some(id - 1) }))
            .collect();
        Roadmap::new("chain", "Chain", skills).unwrap()
    }

    #[test]
    fn test_linear_chain_has_single_frontier() {
        let roadmap = chain_of(4);
        let completed: CompletedSet = [1, 2].into_iter().collect();
        let report = roadmap.report(&completed);

        let statuses: Vec<_> = report.skills.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                SkillStatus::Completed,
                SkillStatus::Completed,
                SkillStatus::Current,
                SkillStatus::Locked
            ]
        );
        assert_eq!(report.progress_pct, 50.0);
    }

    #[test]
    fn test_branching_graph_marks_every_unlocked_sibling_current() {
        let roadmap = Roadmap::new(
            "branch",
            "Branch",
            vec![node(1, None), node(2, Some(1)), node(3, Some(2)), node(4, Some(2))],
        )
        .unwrap();
        let completed: CompletedSet = [1, 2].into_iter().collect();

        assert_eq!(roadmap.status_of(3, &completed), Some(SkillStatus::Current));
        assert_eq!(roadmap.status_of(4, &completed), Some(SkillStatus::Current));
    }

    #[test]
    fn test_filter_by_name_and_difficulty() {
        let mut skills = vec![node(1, None), node(2, Some(1)), node(3, Some(2))];
        skills[0].name = "HTML Basics".into();
        skills[0].difficulty = Some(DifficultyTier::Beginner);
        skills[1].name = "JavaScript Basics".into();
        skills[1].difficulty = Some(DifficultyTier::Intermediate);
        skills[2].name = "React Router".into();
        let roadmap = Roadmap::new("web", "Web", skills).unwrap();

        let ids = |found: Vec<&SkillNode>| found.iter().map(|s| s.id).collect::<Vec<_>>();
        assert_eq!(ids(roadmap.filter("BASICS", None)), vec![1, 2]);
        assert_eq!(ids(roadmap.filter("basics", Some(DifficultyTier::Intermediate))), vec![2]);
        assert_eq!(ids(roadmap.filter("", None)), vec![1, 2, 3]);
        assert!(roadmap.filter("", Some(DifficultyTier::Advanced)).is_empty());
    }

    #[test]
    fn test_completed_set_dedupes() {
        let mut set = CompletedSet::new();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert_eq!(set.ids(), &[3]);
    }

    #[test]
    fn test_progress_ignores_foreign_ids() {
        let roadmap = chain_of(2);
        let completed: CompletedSet = [1, 99].into_iter().collect();
        assert_eq!(roadmap.completed_count(&completed), 1);
        assert_eq!(roadmap.progress_pct(&completed), 50.0);
    }

    #[test]
    fn test_empty_roadmap_progress_is_zero() {
        let roadmap = Roadmap::new("empty", "Empty", vec![]).unwrap();
        assert_eq!(roadmap.progress_pct(&CompletedSet::new()), 0.0);
    }

    #[test]
    fn test_validate_rejects_dangling_prerequisite() {
        let err = Roadmap::new("bad", "Bad", vec![node(1, None), node(2, Some(7))]).unwrap_err();
        assert!(err.to_string().contains("unknown skill 7"));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let err = Roadmap::new("bad", "Bad", vec![node(1, None), node(1, None)]).unwrap_err();
        assert!(err.to_string().contains("duplicate skill id 1"));
    }

    #[test]
    fn test_chain_follows_module_order_not_ids() {
        let modules: Vec<Module> = [5u32, 6]
            .iter()
            .map(|&id| {
                LearningModule {
                    id,
                    name: format!("Module {id}"),
                    level: 3,
                    estimate: "2-3 weeks".into(),
                }
                .into()
            })
            .collect();
        let roadmap = Roadmap::chain("path", "Path", &modules);
        let none = CompletedSet::new();

        assert_eq!(roadmap.status_of(5, &none), Some(SkillStatus::Current));
        assert_eq!(roadmap.status_of(6, &none), Some(SkillStatus::Locked));
        assert!(roadmap.validate().is_ok());
    }
}
