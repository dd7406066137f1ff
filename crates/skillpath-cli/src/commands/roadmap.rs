use clap::Subcommand;
use std::path::PathBuf;

use skillpath_core::roadmap::{CompletedSet, RoadmapBook, SkillStatus};
use skillpath_core::DifficultyTier;

#[derive(Subcommand)]
pub enum RoadmapAction {
    /// Show skill statuses for a goal's roadmap
    Show {
        /// Career goal id (unknown ids fall back to the default roadmap)
        #[arg(long, default_value = "frontend")]
        goal: String,
        /// Completed skill ids, comma separated
        #[arg(long, value_delimiter = ',')]
        completed: Vec<u32>,
        /// Load roadmaps from a TOML file instead of the built-in ones
        #[arg(long)]
        file: Option<PathBuf>,
        /// Only skills whose name contains this text
        #[arg(long, default_value = "")]
        search: String,
        /// Only skills of this difficulty (beginner, intermediate, advanced)
        #[arg(long)]
        difficulty: Option<DifficultyTier>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List roadmap ids
    List {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn load_book(file: Option<PathBuf>) -> Result<RoadmapBook, Box<dyn std::error::Error>> {
    Ok(match file {
        Some(path) => RoadmapBook::load(&path)?,
        None => RoadmapBook::builtin(),
    })
}

pub fn run(action: RoadmapAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        RoadmapAction::Show {
            goal,
            completed,
            file,
            search,
            difficulty,
            json,
        } => {
            let book = load_book(file)?;
            let completed: CompletedSet = completed.into_iter().collect();
            let roadmap = book.for_goal(&goal);
            let mut report = roadmap.report(&completed);
            // Progress stays over the whole roadmap; only the listing is filtered.
            let shown: Vec<u32> = roadmap.filter(&search, difficulty).iter().map(|s| s.id).collect();
            report.skills.retain(|entry| shown.contains(&entry.skill.id));

            if json {
                super::print_json(&report)?;
                return Ok(());
            }

            println!("{} ({:.0}%)", report.title, report.progress_pct);
            for entry in &report.skills {
                let mark = match entry.status {
                    SkillStatus::Completed => "x",
                    SkillStatus::Current => ">",
                    SkillStatus::Locked => " ",
                };
                let difficulty = entry.skill.difficulty.map(|d| d.label()).unwrap_or("-");
                println!(
                    "[{mark}] {:>3}  {:<24} level {}  {:<12}",
                    entry.skill.id, entry.skill.name, entry.skill.level, difficulty
                );
            }
        }
        RoadmapAction::List { file } => {
            let book = load_book(file)?;
            for roadmap in book.roadmaps() {
                println!("{}\t{}\t{} skills", roadmap.id, roadmap.title, roadmap.len());
            }
        }
    }
    Ok(())
}
