use clap::Subcommand;
use skillpath_core::assessment::score_positional;
use skillpath_core::Config;

#[derive(Subcommand)]
pub enum QuizAction {
    /// Score answers against the correct option indices
    Score {
        /// Correct option index per question, comma separated (e.g. "0,2,1")
        #[arg(long, value_delimiter = ',', required = true)]
        correct: Vec<usize>,
        /// Chosen option index per question, comma separated; missing ones count as wrong
        #[arg(long, value_delimiter = ',')]
        answers: Vec<usize>,
        /// Pass threshold; defaults to assessment.pass_threshold
        #[arg(long)]
        threshold: Option<u32>,
    },
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuizAction::Score {
            correct,
            answers,
            threshold,
        } => {
            let threshold = match threshold {
                Some(t) => t,
                None => Config::load()?.assessment.pass_threshold,
            };
            let result = score_positional(&correct, &answers, threshold);
            super::print_json(&result)?;
        }
    }
    Ok(())
}
