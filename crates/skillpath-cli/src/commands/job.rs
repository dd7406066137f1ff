use clap::Subcommand;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

use skillpath_core::assessment::{evaluate_job, JobAnswer, JobQuestion};
use skillpath_core::module::JobRole;
use skillpath_core::Config;

#[derive(Subcommand)]
pub enum JobAction {
    /// Score a submission file
    ///
    /// The file is JSON: `{"role": {...}, "questions": [...], "answers": {"1": 0, "3": "text"}}`.
    Score {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Deserialize)]
struct Submission {
    role: JobRole,
    questions: Vec<JobQuestion>,
    #[serde(default)]
    answers: HashMap<u32, JobAnswer>,
}

pub fn run(action: JobAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        JobAction::Score { file } => {
            let content = std::fs::read_to_string(&file)?;
            let submission: Submission = serde_json::from_str(&content)?;
            let config = Config::load()?;
            let outcome = evaluate_job(
                submission.role,
                &submission.questions,
                &submission.answers,
                &config.assessment,
            );
            super::print_json(&outcome)?;
        }
    }
    Ok(())
}
