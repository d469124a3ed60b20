use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use walk_scheduler::{
    resolve, AvailabilityResponse, CandidateSlot, DayAvailability, EndTime, SchedulerConfig,
    ServiceDuration, ServiceKind, SittingAvailabilityResponse, SittingDates, SlotPlanner,
    TimeOfDay, NO_AVAILABILITY_MESSAGE,
};

#[derive(Parser)]
#[command(name = "walksched", version, about = "Compute bookable walk and sitting slots")]
struct Cli {
    /// TOML config (timezone and step sizes)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List bookable start times for a service on a day
    Slots {
        #[arg(long)]
        date: NaiveDate,
        /// meet-and-greet, quick-walk, solo-walk or dog-sitting
        #[arg(long)]
        service: ServiceKind,
        /// Availability JSON ({"availableRanges": [...]}); '-' or omitted reads stdin
        #[arg(long)]
        ranges: Option<PathBuf>,
        /// Override the current time (RFC 3339), for the today cutoff
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
    /// List end times for a single-day sitting starting at a given time
    Ends {
        #[arg(long)]
        start: TimeOfDay,
        #[arg(long)]
        ranges: Option<PathBuf>,
    },
    /// Build the booking payload for a chosen start and end
    Window {
        #[arg(long)]
        service: ServiceKind,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        start: TimeOfDay,
        /// Required for dog-sitting; walks end after their fixed duration
        #[arg(long)]
        end: Option<TimeOfDay>,
        /// Last day of the sitting; omit to roll an overnight end to the next day
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
    /// Check a multi-day sitting against a sittingAvailability report
    Sitting {
        #[arg(long)]
        start_date: NaiveDate,
        #[arg(long)]
        end_date: NaiveDate,
        /// Report JSON; '-' or omitted reads stdin
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotsOutput {
    date: NaiveDate,
    service: ServiceKind,
    slots: Vec<CandidateSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EndsOutput {
    start: TimeOfDay,
    ends: Vec<EndTime>,
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default = if verbose {
        "walk_scheduler=debug,walksched=debug"
    } else {
        "walk_scheduler=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => SchedulerConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    let planner = SlotPlanner::new(&config).context("invalid scheduler config")?;

    match cli.command {
        Command::Slots {
            date,
            service,
            ranges,
            now,
        } => {
            let day = read_day(ranges.as_ref())?;
            let now = now.unwrap_or_else(Utc::now);
            let slots = planner.slots(service, date, day.ranges(), now)?;
            let message = if slots.is_empty() {
                day.empty_message().or(Some(NO_AVAILABILITY_MESSAGE))
            } else {
                None
            };
            print_json(&SlotsOutput {
                date,
                service,
                slots,
                message,
            })
        }
        Command::Ends { start, ranges } => {
            let day = read_day(ranges.as_ref())?;
            let ends = planner.end_times(day.ranges(), start)?;
            print_json(&EndsOutput { start, ends })
        }
        Command::Window {
            service,
            date,
            start,
            end,
            end_date,
        } => {
            let window = match service.duration() {
                ServiceDuration::Fixed(minutes) => {
                    let end = TimeOfDay::from_minutes(start.minutes() + minutes)
                        .context("walk would run past midnight")?;
                    planner.walk_window(date, &CandidateSlot::with_end(start, end))?
                }
                ServiceDuration::Minimum(_) => {
                    let end = end.context("--end is required for dog-sitting")?;
                    match end_date {
                        Some(end_date) if end_date != date => {
                            planner.multi_day_window(date, start, end_date, end)?
                        }
                        Some(_) if end <= start => {
                            bail!("--end {end} is not after --start {start} on {date}")
                        }
                        Some(_) => planner.sitting_window(date, start, EndTime::same_day(end))?,
                        None => {
                            // An end at or before the start runs past midnight.
                            let end = EndTime {
                                time: end,
                                next_day: end <= start,
                            };
                            planner.sitting_window(date, start, end)?
                        }
                    }
                }
            };
            print_json(&window.to_request(service))
        }
        Command::Sitting {
            start_date,
            end_date,
            report,
        } => {
            if let SittingDates::Single(day) = SittingDates::route(start_date, end_date)? {
                bail!("{day} is a single day; use `walksched slots --service dog-sitting`");
            }
            let body = read_input(report.as_ref())?;
            let report: SittingAvailabilityResponse =
                serde_json::from_str(&body).context("invalid sitting availability JSON")?;
            print_json(&resolve(start_date, end_date, &report)?)
        }
    }
}

/// Read an availability response from a file or stdin.
fn read_day(path: Option<&PathBuf>) -> Result<DayAvailability> {
    let body = read_input(path)?;
    let response: AvailabilityResponse =
        serde_json::from_str(&body).context("invalid availability JSON")?;
    Ok(DayAvailability::Open(response.ranges()))
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            fs::read_to_string(p).with_context(|| format!("failed to read {}", p.display()))
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{out}");
    Ok(())
}
