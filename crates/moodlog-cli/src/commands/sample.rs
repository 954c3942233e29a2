use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;
use moodlog_core::journal::parse_date;
use moodlog_core::{generate_journal, SimulationConfig};

#[derive(Args)]
pub struct SampleArgs {
    /// Days of history to generate, ending today
    #[arg(long, default_value_t = 60)]
    days: u32,
    /// Upper bound of entries per day
    #[arg(long, default_value_t = 2)]
    max_per_day: u32,
    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
    /// Last day of the journal (YYYY-MM-DD, default: today)
    #[arg(long)]
    today: Option<String>,
    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn today(value: Option<&str>) -> moodlog_core::error::Result<NaiveDate> {
    match value {
        Some(value) => Ok(parse_date(value)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn run(args: SampleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let today = today(args.today.as_deref())?;
    let config = SimulationConfig {
        days: args.days,
        max_entries_per_day: args.max_per_day,
        seed: args.seed,
        ..SimulationConfig::default()
    };

    let snapshot = generate_journal(&config, today)?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!(
                "wrote {} entries to {}",
                snapshot.items.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
