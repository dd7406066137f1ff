use clap::Subcommand;
use std::time::Duration;

use skillpath_core::assessment::{spawn_path_generation, AnswerType, ProfilingAnswer};
use skillpath_core::Config;

#[derive(Subcommand)]
pub enum PathAction {
    /// Generate a learning path from profiling answers
    Generate {
        /// Topic to build the path for
        #[arg(long)]
        topic: String,
        /// Experience answer (0-based option index)
        #[arg(long)]
        experience: Option<usize>,
        /// Weekly time commitment answer (0-based option index)
        #[arg(long)]
        time: Option<usize>,
        /// Skip the simulated generation latency
        #[arg(long)]
        no_delay: bool,
    },
}

pub fn run(action: PathAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PathAction::Generate {
            topic,
            experience,
            time,
            no_delay,
        } => {
            let answers: Vec<ProfilingAnswer> = [
                (1, AnswerType::Experience, experience),
                (3, AnswerType::Time, time),
            ]
            .into_iter()
            .filter_map(|(question_id, answer_type, choice)| {
                choice.map(|choice| ProfilingAnswer {
                    question_id,
                    answer_type,
                    choice,
                })
            })
            .collect();

            let delay = if no_delay {
                Duration::ZERO
            } else {
                Config::load()?.simulation.path_generation_delay()
            };

            let rt = super::runtime()?;
            let path = rt.block_on(async move {
                eprintln!("Generating learning path for {topic}...");
                spawn_path_generation(topic, answers, delay).wait().await
            })?;
            super::print_json(&path)?;
        }
    }
    Ok(())
}
