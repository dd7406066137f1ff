mod book;
mod tracker;

pub use book::{RoadmapBook, FALLBACK_GOAL};
pub use tracker::{
    skill_status, CompletedSet, Roadmap, RoadmapReport, SkillNode, SkillProgress, SkillStatus,
};
