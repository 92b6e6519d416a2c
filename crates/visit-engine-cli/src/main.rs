//! `visit-slots` — command-line access to visit-time availability.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use visit_engine::{
    availability_range, compute_availability_with, is_slot_available, next_open_date,
    parse_civil_date, BusinessHours, DayAvailability, TimeSlot,
};

#[derive(Parser)]
#[command(name = "visit-slots", version, about = "Bookable visit times for a date")]
struct Cli {
    /// Business-hours table (TOML). Defaults to the standard visiting hours.
    #[arg(long, global = true, value_name = "FILE")]
    hours: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List the bookable slots for a date (YYYY-MM-DD)
    Slots {
        /// Date to list; omit when no date has been chosen yet
        date: Option<String>,
    },
    /// Show day-by-day availability starting at a date
    Range {
        from: String,
        /// Number of consecutive days
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Find the first open date on or after a date
    Next {
        from: String,
        /// Number of days to search
        #[arg(long, default_value_t = 14)]
        horizon: u32,
    },
    /// Check whether a time (HH:MM) is bookable on a date
    Check { date: String, time: String },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let hours = load_hours(cli.hours.as_deref())?;
    tracing::debug!(step_minutes = hours.step_minutes(), "business hours ready");

    match cli.command {
        Command::Slots { date } => cmd_slots(date.as_deref(), &hours, cli.format),
        Command::Range { from, days } => cmd_range(&from, days, &hours, cli.format),
        Command::Next { from, horizon } => cmd_next(&from, horizon, &hours, cli.format),
        Command::Check { date, time } => cmd_check(&date, &time, &hours, cli.format),
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "visit_slots=debug,visit_engine=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn load_hours(path: Option<&Path>) -> Result<BusinessHours> {
    let Some(path) = path else {
        return Ok(BusinessHours::standard());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read hours file {}", path.display()))?;
    let hours = BusinessHours::from_toml_str(&text)
        .with_context(|| format!("invalid hours file {}", path.display()))?;
    tracing::info!(path = %path.display(), "loaded business hours");
    Ok(hours)
}

fn cmd_slots(date: Option<&str>, hours: &BusinessHours, format: Format) -> Result<ExitCode> {
    let parsed = date.map(parse_civil_date).transpose()?;
    let slots = compute_availability_with(parsed, hours);

    match format {
        Format::Text => {
            if parsed.is_none() {
                eprintln!("no date selected; pass a date as YYYY-MM-DD");
            } else if slots.is_empty() {
                eprintln!("no slots available");
            }
            for slot in &slots {
                println!("{slot}");
            }
        }
        Format::Json => print_json(&json!({ "date": parsed, "slots": slots }))?,
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_range(from: &str, days: u32, hours: &BusinessHours, format: Format) -> Result<ExitCode> {
    let from = parse_civil_date(from)?;
    let range = availability_range(from, days, hours);

    match format {
        Format::Text => {
            for day in &range {
                println!("{}", format_day(day));
            }
        }
        Format::Json => print_json(&range)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_next(from: &str, horizon: u32, hours: &BusinessHours, format: Format) -> Result<ExitCode> {
    let from = parse_civil_date(from)?;
    let next = next_open_date(from, hours, horizon);

    match format {
        Format::Text => match next {
            Some(date) => println!("{date}"),
            None => eprintln!("no open date within {horizon} days of {from}"),
        },
        Format::Json => print_json(&json!({ "from": from, "next_open": next }))?,
    }
    Ok(if next.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_check(date: &str, time: &str, hours: &BusinessHours, format: Format) -> Result<ExitCode> {
    let date = parse_civil_date(date)?;
    let slot: TimeSlot = time.parse()?;
    let available = is_slot_available(date, slot, hours);
    tracing::debug!(%date, %slot, available, "checked slot");

    match format {
        Format::Text => println!("{}", if available { "available" } else { "unavailable" }),
        Format::Json => print_json(&json!({
            "date": date,
            "time": slot,
            "available": available,
        }))?,
    }
    Ok(if available {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn format_day(day: &DayAvailability) -> String {
    if !day.open {
        return format!("{} {} closed", day.date, day.weekday);
    }
    let slots: Vec<String> = day.slots.iter().map(ToString::to_string).collect();
    format!("{} {} {}", day.date, day.weekday, slots.join(" "))
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
