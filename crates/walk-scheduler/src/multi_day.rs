//! Multi-day dog sitting.
//!
//! Multi-day sitting does not enumerate slots. The customer picks a start and
//! an end time freely from a 24-hour dropdown; the only placement rule is that
//! the combined end instant follows the start instant. What this module does
//! is decide whether the requested days are feasible, from the availability
//! API's day-by-day conflict report, and list the blocked days for display.
//!
//! Equal start and end dates are not multi-day: they are routed to the
//! single-day variable-duration generator instead.

use chrono::NaiveDate;
use serde::Serialize;

use crate::availability::{SittingAvailabilityResponse, LOAD_FAILED_MESSAGE};
use crate::error::{Result, SchedulerError};
use crate::request::{RequestSequencer, RequestToken};
use crate::service::validate_positive;
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// The requested sitting days, after routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SittingDates {
    /// Same start and end date: single-day sitting.
    Single(NaiveDate),
    /// End date strictly after start date.
    Multi { start: NaiveDate, end: NaiveDate },
}

impl SittingDates {
    /// Route a date pair to single- or multi-day handling.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::Validation`] when the end date precedes the start date.
    pub fn route(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(SchedulerError::Validation(format!(
                "end date {end} is before start date {start}"
            )));
        }
        if start == end {
            Ok(SittingDates::Single(start))
        } else {
            Ok(SittingDates::Multi { start, end })
        }
    }

    pub fn is_multi_day(&self) -> bool {
        matches!(self, SittingDates::Multi { .. })
    }
}

/// A blocked day, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateLabel {
    /// The date, when the API reported one we could parse.
    pub date: Option<NaiveDate>,
    /// e.g. "Tue 20 Oct".
    pub label: String,
    /// The API's explanation for this conflict, if it gave one.
    pub detail: Option<String>,
}

impl DateLabel {
    fn from_report(raw: &str, detail: Option<&String>) -> Self {
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Self {
                date: Some(date),
                label: date.format("%a %-d %b").to_string(),
                detail: detail.cloned(),
            },
            Err(_) => {
                tracing::debug!(conflict = raw, "conflict is not a date, showing verbatim");
                Self {
                    date: None,
                    label: raw.to_string(),
                    detail: detail.cloned(),
                }
            }
        }
    }
}

/// Outcome of a multi-day feasibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiDayResolution {
    pub feasible: bool,
    pub conflicts: Vec<DateLabel>,
}

/// Turn the API's conflict report for `start_date..=end_date` into a
/// feasibility flag and a list of blocked days.
///
/// # Errors
///
/// [`SchedulerError::Validation`] unless `end_date` is strictly after
/// `start_date`; a same-day request belongs to the single-day generator.
pub fn resolve(
    start_date: NaiveDate,
    end_date: NaiveDate,
    report: &SittingAvailabilityResponse,
) -> Result<MultiDayResolution> {
    if !SittingDates::route(start_date, end_date)?.is_multi_day() {
        return Err(SchedulerError::Validation(format!(
            "{start_date} to {end_date} is a single day; use single-day sitting"
        )));
    }

    let details = report.conflict_details.as_deref().unwrap_or_default();
    let conflicts: Vec<DateLabel> = report
        .conflicts
        .as_deref()
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, raw)| DateLabel::from_report(raw, details.get(i)))
        .collect();

    Ok(MultiDayResolution {
        feasible: report.available && conflicts.is_empty(),
        conflicts,
    })
}

/// The free-form 24-hour dropdown offered for multi-day start and end times.
pub fn day_picker_times(step_minutes: u32) -> Result<impl Iterator<Item = TimeOfDay> + Clone> {
    validate_positive("step", step_minutes)?;
    Ok((0..MINUTES_PER_DAY)
        .step_by(step_minutes as usize)
        .map(TimeOfDay::wrapping))
}

/// Where a multi-day feasibility check stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckState {
    Idle,
    Checking,
    Available(MultiDayResolution),
    Unavailable(MultiDayResolution),
    /// The check itself could not be completed.
    Failed(String),
}

/// `Idle -> Checking -> {Available | Unavailable}` per date-range query.
///
/// Each date change re-enters `Checking` and forgets the previous result;
/// responses from superseded requests are ignored.
#[derive(Debug)]
pub struct SittingCheck {
    state: CheckState,
    dates: Option<(NaiveDate, NaiveDate)>,
    sequencer: RequestSequencer,
}

impl Default for SittingCheck {
    fn default() -> Self {
        Self {
            state: CheckState::Idle,
            dates: None,
            sequencer: RequestSequencer::new(),
        }
    }
}

impl SittingCheck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    /// Start checking a new date range.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::Validation`] if the range is not multi-day. Any
    /// in-flight check is still superseded and the state returns to `Idle`.
    pub fn begin(&mut self, start_date: NaiveDate, end_date: NaiveDate) -> Result<RequestToken> {
        let token = self.sequencer.issue();
        self.dates = None;
        self.state = CheckState::Idle;

        match SittingDates::route(start_date, end_date)? {
            SittingDates::Multi { start, end } => {
                self.dates = Some((start, end));
                self.state = CheckState::Checking;
                Ok(token)
            }
            SittingDates::Single(day) => Err(SchedulerError::Validation(format!(
                "{day} is a single day, not a multi-day range"
            ))),
        }
    }

    /// Apply a finished fetch. Returns `false` if `token` is stale.
    pub fn complete(
        &mut self,
        token: RequestToken,
        result: Result<SittingAvailabilityResponse>,
    ) -> bool {
        if !self.sequencer.is_current(token) {
            tracing::debug!(
                token = token.sequence(),
                "dropping stale sitting availability response"
            );
            return false;
        }
        let Some((start, end)) = self.dates else {
            return false;
        };

        self.state = match result.and_then(|report| resolve(start, end, &report)) {
            Ok(resolution) if resolution.feasible => CheckState::Available(resolution),
            Ok(resolution) => CheckState::Unavailable(resolution),
            Err(err) => {
                tracing::warn!(error = %err, %start, %end, "sitting availability check failed");
                CheckState::Failed(LOAD_FAILED_MESSAGE.to_string())
            }
        };
        true
    }
}
