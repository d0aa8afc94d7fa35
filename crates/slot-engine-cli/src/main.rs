//! `slots` CLI — compute free intervals, bookable slots, and recurring bookings
//! from a provider's availability schedule.
//!
//! ## Usage
//!
//! ```sh
//! # Free intervals for one date (schedule from stdin → JSON on stdout)
//! cat schedule.json | slots available --date 2026-03-16
//!
//! # Free intervals for a week, minus existing bookings, as UTC instants
//! slots available -s schedule.json -b bookings.json \
//!   --date 2026-03-16 --end-date 2026-03-22 --utc
//!
//! # Is 10:00-11:00 bookable?
//! slots check -s schedule.json -b bookings.json --date 2026-03-16 --start 10:00 --end 11:00
//!
//! # 45-minute slots every 15 minutes with a 10-minute buffer
//! slots bookable -s schedule.json --date 2026-03-16 --duration 45 --step 15 --buffer 10
//!
//! # Expand a bi-weekly booking and check each occurrence
//! slots recur --start 2026-03-02T10:00:00 --duration 60 --recurrence biweekly \
//!   --occurrences 4 -s schedule.json
//!
//! # Double-booking report
//! slots conflicts --existing bookings.json --proposed new.json
//! ```
//!
//! Logging goes to stderr. `-v` enables debug output; `RUST_LOG` overrides.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use slot_engine::availability::to_utc;
use slot_engine::recurrence::check_occurrences;
use slot_engine::{AvailabilitySchedule, Booking, DstPolicy, RecurrenceType, SlotOptions, TimeSlot};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Provider availability and bookable slot calculator"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(clap::Args)]
struct ScheduleArgs {
    /// Schedule JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    schedule: Option<String>,
    /// Bookings JSON file (array of bookings)
    #[arg(short, long)]
    bookings: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List free intervals per date
    Available {
        #[command(flatten)]
        input: ScheduleArgs,
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Last date, inclusive (defaults to --date)
        #[arg(long)]
        end_date: Option<String>,
        /// Report intervals as UTC instants in the schedule's timezone
        #[arg(long)]
        utc: bool,
        /// How wall-clock times inside a DST gap are mapped (with --utc)
        #[arg(long, value_enum, default_value_t = DstArg::WallClock)]
        dst_policy: DstArg,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Check whether a time range on a date can be booked
    Check {
        #[command(flatten)]
        input: ScheduleArgs,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM)
        #[arg(long)]
        end: String,
    },
    /// List fixed-length bookable slots
    Bookable {
        #[command(flatten)]
        input: ScheduleArgs,
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
        /// Last date, inclusive (defaults to --date)
        #[arg(long)]
        end_date: Option<String>,
        /// Appointment length in minutes
        #[arg(long, default_value_t = SlotOptions::default().duration_minutes)]
        duration: i64,
        /// Minutes between candidate start times
        #[arg(long, default_value_t = SlotOptions::default().step_minutes)]
        step: i64,
        /// Minutes kept free around existing bookings
        #[arg(long, default_value_t = SlotOptions::default().buffer_minutes)]
        buffer: i64,
        /// Only print the earliest slot in the range
        #[arg(long)]
        first: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Expand a recurring booking into its occurrences
    Recur {
        /// Start of the first occurrence (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        start: String,
        /// Length of each occurrence in minutes
        #[arg(long)]
        duration: u32,
        /// weekly, biweekly or monthly
        #[arg(long)]
        recurrence: String,
        /// Number of occurrences, the first included
        #[arg(long, default_value_t = 4)]
        occurrences: u32,
        /// IANA timezone (defaults to the schedule's, or UTC)
        #[arg(long)]
        timezone: Option<String>,
        /// Schedule JSON file; when given, each occurrence is checked
        #[arg(short, long)]
        schedule: Option<String>,
        /// Bookings JSON file used for the availability check
        #[arg(short, long)]
        bookings: Option<String>,
    },
    /// Report overlaps between existing and proposed bookings
    Conflicts {
        /// Existing bookings JSON file
        #[arg(long)]
        existing: String,
        /// Proposed bookings JSON file
        #[arg(long)]
        proposed: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DstArg {
    Skip,
    ShiftForward,
    WallClock,
}

impl From<DstArg> for DstPolicy {
    fn from(arg: DstArg) -> Self {
        match arg {
            DstArg::Skip => DstPolicy::Skip,
            DstArg::ShiftForward => DstPolicy::ShiftForward,
            DstArg::WallClock => DstPolicy::WallClock,
        }
    }
}

#[derive(Serialize)]
struct CheckReport {
    date: NaiveDate,
    slot: TimeSlot,
    available: bool,
}

#[derive(Serialize)]
struct OccurrenceReport {
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    available: Option<bool>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Available {
            input,
            date,
            end_date,
            utc,
            dst_policy,
            output,
        } => {
            let (schedule, bookings) = load_inputs(&input)?;
            let (start, end) = parse_range(&date, end_date.as_deref())?;
            let days = slot_engine::available_range(&schedule, start, end, &bookings)
                .context("Failed to compute availability")?;

            let json = if utc {
                let mut free = Vec::new();
                for day in &days {
                    free.extend(to_utc(&schedule, &day.free, dst_policy.into())?);
                }
                serde_json::to_string_pretty(&free)?
            } else {
                serde_json::to_string_pretty(&days)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Check {
            input,
            date,
            start,
            end,
        } => {
            let (schedule, bookings) = load_inputs(&input)?;
            let date = parse_date(&date)?;
            let slot = TimeSlot::parse(&start, &end).context("Invalid time range")?;
            let available = slot_engine::check_availability(&schedule, date, slot, &bookings);
            info!(%date, available, "checked availability");

            let report = CheckReport {
                date,
                slot,
                available,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Bookable {
            input,
            date,
            end_date,
            duration,
            step,
            buffer,
            first,
            output,
        } => {
            let (schedule, bookings) = load_inputs(&input)?;
            let (start, end) = parse_range(&date, end_date.as_deref())?;
            let options = SlotOptions {
                duration_minutes: duration,
                step_minutes: step,
                buffer_minutes: buffer,
            };

            let json = if first {
                let slot = slot_engine::first_bookable_slot(&schedule, start, end, &bookings, &options)
                    .context("Failed to compute bookable slots")?;
                serde_json::to_string_pretty(&slot)?
            } else {
                let mut slots = Vec::new();
                for day in start.iter_days().take_while(|d| *d <= end) {
                    slots.extend(
                        slot_engine::bookable_slots(&schedule, day, &bookings, &options)
                            .context("Failed to compute bookable slots")?,
                    );
                }
                serde_json::to_string_pretty(&slots)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Recur {
            start,
            duration,
            recurrence,
            occurrences,
            timezone,
            schedule,
            bookings,
        } => {
            let start = NaiveDateTime::parse_from_str(&start, "%Y-%m-%dT%H:%M:%S")
                .with_context(|| format!("Invalid start datetime: {}", start))?;
            let recurrence: RecurrenceType = recurrence.parse()?;

            let schedule = match schedule.as_deref() {
                Some(path) => Some(parse_schedule(&read_input(Some(path))?)?),
                None => None,
            };
            let bookings = load_bookings(bookings.as_deref())?;

            let timezone = timezone
                .or_else(|| schedule.as_ref().map(|s| s.timezone.clone()))
                .unwrap_or_else(|| "UTC".to_string());
            let expanded =
                slot_engine::expand_recurring(start, duration, recurrence, occurrences, &timezone)
                    .context("Failed to expand recurring booking")?;

            let report: Vec<OccurrenceReport> = match &schedule {
                Some(schedule) => check_occurrences(schedule, &expanded, &bookings)
                    .into_iter()
                    .map(|(o, free)| OccurrenceReport {
                        start: o.start,
                        end: o.end,
                        available: Some(free),
                    })
                    .collect(),
                None => expanded
                    .into_iter()
                    .map(|o| OccurrenceReport {
                        start: o.start,
                        end: o.end,
                        available: None,
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Conflicts { existing, proposed } => {
            let existing = load_bookings(Some(existing.as_str()))?;
            let proposed = load_bookings(Some(proposed.as_str()))?;
            let conflicts = slot_engine::find_conflicts(&existing, &proposed);
            info!(count = conflicts.len(), "conflict check complete");
            println!("{}", serde_json::to_string_pretty(&conflicts)?);
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .try_init();
}

fn load_inputs(args: &ScheduleArgs) -> Result<(AvailabilitySchedule, Vec<Booking>)> {
    let schedule = parse_schedule(&read_input(args.schedule.as_deref())?)?;
    let bookings = load_bookings(args.bookings.as_deref())?;
    debug!(
        timezone = %schedule.timezone,
        bookings = bookings.len(),
        "loaded schedule"
    );
    Ok((schedule, bookings))
}

fn parse_schedule(json: &str) -> Result<AvailabilitySchedule> {
    AvailabilitySchedule::from_json(json).context("Failed to parse schedule")
}

fn load_bookings(path: Option<&str>) -> Result<Vec<Booking>> {
    match path {
        Some(path) => {
            let json = read_input(Some(path))?;
            serde_json::from_str(&json).with_context(|| format!("Failed to parse bookings: {}", path))
        }
        None => Ok(Vec::new()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    slot_engine::interval::parse_date(s).with_context(|| format!("Invalid date: {}", s))
}

fn parse_range(start: &str, end: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
    let start = parse_date(start)?;
    let end = match end {
        Some(end) => parse_date(end)?,
        None => start,
    };
    if start > end {
        anyhow::bail!("--end-date {} is before --date {}", end, start);
    }
    Ok((start, end))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
