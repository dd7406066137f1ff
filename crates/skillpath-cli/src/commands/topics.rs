use clap::Subcommand;
use std::time::Duration;

use skillpath_core::{Config, TopicCatalog};

#[derive(Subcommand)]
pub enum TopicsAction {
    /// Search topics by title or category
    Search {
        query: String,
        /// Skip the simulated search latency
        #[arg(long)]
        no_delay: bool,
    },
    /// List every topic
    List,
}

pub fn run(action: TopicsAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = TopicCatalog::builtin();
    match action {
        TopicsAction::Search { query, no_delay } => {
            let delay = if no_delay {
                Duration::ZERO
            } else {
                Config::load()?.simulation.search_delay()
            };
            let rt = super::runtime()?;
            let topics = rt.block_on(async { catalog.search_delayed(&query, delay).wait().await })?;
            super::print_json(&topics)?;
        }
        TopicsAction::List => super::print_json(&catalog.topics())?,
    }
    Ok(())
}
