//! Scripted navigation session.
//!
//! Each stdin line is either an action as JSON
//! (`{"action":"select_topic","topic":{...}}`) or a colon command:
//!
//! ```text
//! :status                 print a state snapshot
//! :roadmap                print dashboard and learning path reports
//! :search <query>         search the topic catalog
//! :finish-assessment      generate the learning path and complete the assessment
//! :run <language> <code>  run code for the current coding module and finish it
//! ```
//!
//! Events are printed to stdout one JSON object per line.

use clap::Args;
use std::io::BufRead;
use tokio::runtime::Runtime;

use skillpath_core::config::SimulationConfig;
use skillpath_core::executor::{execute_delayed, Language, SimulatedExecutor, TestCase};
use skillpath_core::{Action, Config, Event, Navigator, TopicCatalog, View};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Args)]
pub struct SessionArgs {
    /// Skip the simulated latencies
    #[arg(long)]
    no_delay: bool,
    /// Stop at the first rejected line instead of reporting and continuing
    #[arg(long)]
    strict: bool,
    /// Seed for the simulated code executor
    #[arg(long)]
    seed: Option<u64>,
}

struct Session {
    rt: Runtime,
    nav: Navigator,
    catalog: TopicCatalog,
    runs: u64,
}

pub fn run(args: SessionArgs) -> CmdResult {
    let mut config = Config::load()?;
    if args.no_delay {
        config.simulation = SimulationConfig {
            seed: config.simulation.seed,
            ..SimulationConfig::instant()
        };
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }

    let mut session = Session {
        rt: super::runtime()?,
        nav: Navigator::new(config),
        catalog: TopicCatalog::builtin(),
        runs: 0,
    };

    for (index, line) in std::io::stdin().lock().lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(e) = session.step(line) {
            if args.strict {
                return Err(format!("line {}: {e}", index + 1).into());
            }
            eprintln!("error: line {}: {e}", index + 1);
        }
    }
    Ok(())
}

fn emit(events: &[Event]) -> CmdResult {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

impl Session {
    fn step(&mut self, line: &str) -> CmdResult {
        let Some(command) = line.strip_prefix(':') else {
            let action: Action = serde_json::from_str(line)?;
            let events = self.nav.dispatch(action)?;
            return emit(&events);
        };

        let (name, rest) = command
            .split_once(char::is_whitespace)
            .unwrap_or((command, ""));
        let rest = rest.trim();
        match name {
            "status" => emit(&[self.nav.snapshot()]),
            "roadmap" => {
                let reports = serde_json::json!({
                    "dashboard": self.nav.dashboard_report(),
                    "learning_path": self.nav.path_report(),
                });
                println!("{}", serde_json::to_string(&reports)?);
                Ok(())
            }
            "search" => {
                let delay = self.nav.config().simulation.search_delay();
                let catalog = &self.catalog;
                let topics = self
                    .rt
                    .block_on(async { catalog.search_delayed(rest, delay).wait().await })?;
                println!("{}", serde_json::to_string(&topics)?);
                Ok(())
            }
            "finish-assessment" => {
                let events = self.rt.block_on(self.nav.complete_assessment())?;
                emit(&events)
            }
            "run" => self.run_code(rest),
            other => Err(format!("unknown command ':{other}'").into()),
        }
    }

    fn run_code(&mut self, rest: &str) -> CmdResult {
        let (language, source) = rest
            .split_once(char::is_whitespace)
            .ok_or("usage: :run <language> <code>")?;
        let language: Language = language.parse()?;
        if self.nav.view() != View::CodingAssessment {
            return Err(format!("no coding exercise open (view is {})", self.nav.view()).into());
        }
        let module = self
            .nav
            .context()
            .current_module
            .clone()
            .ok_or("no coding exercise open")?;

        // Learning modules carry no cases of their own; run one smoke case.
        let mut cases = module.test_cases().to_vec();
        if cases.is_empty() {
            cases.push(TestCase {
                input: module.name().to_string(),
                expected: "ok".into(),
            });
        }

        let simulation = &self.nav.config().simulation;
        let executor = SimulatedExecutor::new(simulation.seed.map(|s| s.wrapping_add(self.runs)));
        let delay = simulation.execution_delay();
        self.runs += 1;

        let source = source.trim().to_string();
        let run = self.rt.block_on(async move {
            execute_delayed(executor, source, language, cases, delay)
                .wait()
                .await
        })??;
        eprint!("{}", run.report());

        let events = self.nav.dispatch(Action::CodingFinished {
            passed: run.all_passed(),
        })?;
        emit(&events)
    }
}
