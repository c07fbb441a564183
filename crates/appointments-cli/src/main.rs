//! Command-line runner for fixed-interval appointment schedules.
//!
//! Builds a schedule from flags and prints one answer per invocation:
//! the first, last, or next occurrence (RFC 3339, in the schedule
//! timezone), the due-status, or the configuration record as JSON.
//!
//! `--now` pins the evaluation instant, which makes output reproducible
//! in scripts and tests; without it the system clock is read once at
//! startup.

use anyhow::{Context, Result};
use appointments::{Daily, FixedClock};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "appointments", version, about = "Evaluate fixed-interval appointment schedules")]
struct Cli {
    /// Days between occurrences
    #[arg(short, long)]
    interval: u32,

    /// Anchor datetime, parsed with --start-format; defaults to now
    #[arg(short, long)]
    start: Option<String>,

    /// chrono format string for --start
    #[arg(long, default_value = "%Y-%m-%d %H:%M:%S")]
    start_format: String,

    /// IANA timezone occurrences are reported in
    #[arg(short, long, default_value = "UTC")]
    timezone: String,

    /// Evaluate at this RFC 3339 instant instead of the system clock
    #[arg(long)]
    now: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the first occurrence
    First,
    /// Print the most recent occurrence at or before now
    Last,
    /// Print the next occurrence strictly after now
    Next {
        /// Skip this many occurrences past the next one
        #[arg(long, default_value_t = 0)]
        iterations: u32,
    },
    /// Print whether an occurrence lies within the window around now
    Due {
        /// Tolerance window in seconds, either side of an occurrence
        #[arg(long, default_value_t = 0)]
        within: u32,
    },
    /// Print the schedule configuration as JSON
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let now = match &cli.now {
        Some(s) => DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("cannot parse --now '{s}' as RFC 3339"))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let mut builder = Daily::builder(cli.interval)
        .timezone(&cli.timezone)?
        .clock(FixedClock::new(now));
    if let Some(start) = &cli.start {
        builder = builder.start_since_format(&cli.start_format, start)?;
    }
    let schedule = builder.build()?;

    match cli.command {
        Command::First => println!("{}", schedule.first_appointment().to_rfc3339()),
        Command::Last => println!("{}", schedule.last_appointment(0).to_rfc3339()),
        Command::Next { iterations } => {
            println!("{}", schedule.next_appointment(iterations).to_rfc3339());
        }
        Command::Due { within } => println!("{}", schedule.is_due_now(within)),
        Command::Show => println!("{}", serde_json::to_string_pretty(&schedule.to_record())?),
    }

    Ok(())
}
