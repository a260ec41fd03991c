use clap::Parser;
use colored::Colorize;
use std::{error::Error, fs};

mod error;
mod option;
mod simulation;
mod utils;

use error::SimulationError;
use option::SimulationOption;
use simulation::{ObjectState, Report, Simulation};

/// broadcaster runs a scripted signal bus simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// simulation config file
    #[arg(short, long)]
    pub config: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let fscontent = fs::read_to_string(&args.config).map_err(|e| SimulationError::ReadConfig(args.config.clone(), e))?;
    let opts: SimulationOption = serde_json::from_str(&fscontent).map_err(SimulationError::from)?;
    utils::logger::init(&opts.log_level)?;
    log::debug!("opts:\n{}", serde_json::to_string_pretty(&opts)?);

    let report = Simulation::new(opts)?.run()?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    println!("{} {}", "dispatched:".bold(), report.dispatched);
    for (name, state) in &report.objects {
        match state {
            ObjectState::Counter(counter) => {
                println!("{} count={} total={}", name.yellow(), counter.count, counter.total)
            }
            ObjectState::Recorder(recorder) => {
                let entries: Vec<String> = recorder.entries.iter().map(|(event, value)| format!("{}:{}", event, value)).collect();
                println!("{} [{}]", name.yellow(), entries.join(", "))
            }
        }
    }
}
