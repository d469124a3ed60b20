//! Booking windows: a chosen slot pinned to calendar day(s) in the business timezone.
//!
//! This is the only place minute-space times become absolute instants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::service::ServiceKind;
use crate::slot::{CandidateSlot, EndTime};
use crate::time::TimeOfDay;

/// The resolved `(start, end)` instant pair for one booking attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Outbound payload for the booking-creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub service: ServiceKind,
    /// RFC 3339 with the local offset.
    pub start_time: String,
    /// RFC 3339 with the local offset.
    pub end_time: String,
}

impl BookingWindow {
    /// Pin a fixed-duration slot to `day`.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::Validation`] if the slot has no end yet, otherwise as
    /// for [`BookingWindow::single_day`].
    pub fn fixed(day: NaiveDate, slot: &CandidateSlot, tz: Tz) -> Result<Self> {
        let end = slot.end.ok_or_else(|| {
            SchedulerError::Validation(format!("slot at {} has no end time", slot.start))
        })?;
        Self::single_day(day, slot.start, EndTime::same_day(end), tz)
    }

    /// Pin a single-day booking to `day`, rolling the end onto the next day
    /// when it was produced past midnight.
    pub fn single_day(day: NaiveDate, start: TimeOfDay, end: EndTime, tz: Tz) -> Result<Self> {
        let end_day = if end.next_day {
            day.succ_opt()
                .ok_or_else(|| SchedulerError::InvalidDatetime(format!("no day after {day}")))?
        } else {
            day
        };
        Self::between(day, start, end_day, end.time, tz)
    }

    /// Multi-day sitting with free-form times on each end.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::Validation`] unless the end instant is strictly after
    /// the start instant.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use walk_scheduler::{BookingWindow, TimeOfDay};
    ///
    /// let tz = chrono_tz::Europe::London;
    /// let start = NaiveDate::from_ymd_opt(2026, 7, 10).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2026, 7, 12).unwrap();
    /// let at = |s| TimeOfDay::parse(s).unwrap();
    ///
    /// let window = BookingWindow::multi_day(start, at("18:00"), end, at("09:00"), tz).unwrap();
    /// assert_eq!(window.duration_minutes(), 39 * 60);
    /// ```
    pub fn multi_day(
        start_date: NaiveDate,
        start_time: TimeOfDay,
        end_date: NaiveDate,
        end_time: TimeOfDay,
        tz: Tz,
    ) -> Result<Self> {
        Self::between(start_date, start_time, end_date, end_time, tz)
    }

    fn between(
        start_date: NaiveDate,
        start_time: TimeOfDay,
        end_date: NaiveDate,
        end_time: TimeOfDay,
        tz: Tz,
    ) -> Result<Self> {
        let start = localize(start_date.and_time(start_time.to_naive_time()), tz)?;
        let end = localize(end_date.and_time(end_time.to_naive_time()), tz)?;

        if end <= start {
            return Err(SchedulerError::Validation(format!(
                "end {} must be after start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }

        Ok(Self { start, end })
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn to_request(&self, service: ServiceKind) -> BookingRequest {
        BookingRequest {
            service,
            start_time: self.start.to_rfc3339(),
            end_time: self.end.to_rfc3339(),
        }
    }
}

/// Resolve a local wall-clock time in `tz`.
///
/// Ambiguous times (DST fall-back) take the earlier instant; nonexistent
/// times (spring-forward gap) are an error.
pub(crate) fn localize(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        SchedulerError::InvalidDatetime(format!("{naive} does not exist in {}", tz.name()))
    })
}
