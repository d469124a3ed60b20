//! The contract with the external availability API.
//!
//! The API owns the calendar and the existing bookings. This module shapes the
//! queries sent to it, decodes its responses, and turns fetch failures into a
//! state the UI can tell apart from "nothing free".
//!
//! When a booking is being rescheduled, its id travels with every query as an
//! exclusion so the API does not report the booking's current slot as a
//! conflict against itself. The generators never see the id; they only get the
//! already-adjusted ranges, and they never block the booking's slot again.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::multi_day::SittingDates;
use crate::range::{parse_ranges, AvailabilityRange, RawAvailabilityRange};
use crate::request::{RequestSequencer, RequestToken};
use crate::service::ServiceKind;

/// Shown when the day loaded fine but has no free ranges.
pub const NO_AVAILABILITY_MESSAGE: &str = "No availability for this day";

/// Shown when availability could not be fetched at all.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load availability, please try again";

/// Identifier of an existing booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(pub String);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookingId {
    fn from(s: &str) -> Self {
        BookingId(s.to_string())
    }
}

// ── Queries ─────────────────────────────────────────────────────────────────

/// `GET availability(date, serviceType, excludeBookingId?)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub service: ServiceKind,
    pub exclude_booking_id: Option<BookingId>,
}

impl AvailabilityQuery {
    pub fn new(date: NaiveDate, service: ServiceKind) -> Self {
        Self {
            date,
            service,
            exclude_booking_id: None,
        }
    }

    /// Do not count `booking` as a conflict.
    pub fn excluding(mut self, booking: BookingId) -> Self {
        self.exclude_booking_id = Some(booking);
        self
    }

    /// Wire query parameters, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("serviceType", self.service.id().to_string()),
        ];
        if let Some(id) = &self.exclude_booking_id {
            pairs.push(("excludeBookingId", id.to_string()));
        }
        pairs
    }
}

/// `GET sittingAvailability(type, date | {start_date, end_date})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SittingQuery {
    pub dates: SittingDates,
    pub exclude_booking_id: Option<BookingId>,
}

impl SittingQuery {
    pub fn new(dates: SittingDates) -> Self {
        Self {
            dates,
            exclude_booking_id: None,
        }
    }

    pub fn excluding(mut self, booking: BookingId) -> Self {
        self.exclude_booking_id = Some(booking);
        self
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let ymd = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        let mut pairs = match self.dates {
            SittingDates::Single(date) => vec![("type", "single".to_string()), ("date", ymd(date))],
            SittingDates::Multi { start, end } => vec![
                ("type", "multi".to_string()),
                ("start_date", ymd(start)),
                ("end_date", ymd(end)),
            ],
        };
        if let Some(id) = &self.exclude_booking_id {
            pairs.push(("excludeBookingId", id.to_string()));
        }
        pairs
    }
}

/// An existing booking being moved to a new time.
///
/// Every query built here carries the booking's id as an exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reschedule {
    pub booking_id: BookingId,
}

impl Reschedule {
    pub fn new(booking_id: impl Into<BookingId>) -> Self {
        Self {
            booking_id: booking_id.into(),
        }
    }

    pub fn availability_query(&self, date: NaiveDate, service: ServiceKind) -> AvailabilityQuery {
        AvailabilityQuery::new(date, service).excluding(self.booking_id.clone())
    }

    pub fn sitting_query(&self, dates: SittingDates) -> SittingQuery {
        SittingQuery::new(dates).excluding(self.booking_id.clone())
    }
}

// ── Responses ───────────────────────────────────────────────────────────────

/// Response body of `availability`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub available_ranges: Vec<RawAvailabilityRange>,
}

impl AvailabilityResponse {
    /// Parsed ranges, with malformed entries skipped and logged.
    pub fn ranges(&self) -> Vec<AvailabilityRange> {
        parse_ranges(&self.available_ranges)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SittingKind {
    Single,
    Multi,
}

/// Response body of `sittingAvailability`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SittingAvailabilityResponse {
    pub available: bool,
    #[serde(rename = "type")]
    pub kind: SittingKind,
    #[serde(default)]
    pub available_ranges: Option<Vec<RawAvailabilityRange>>,
    #[serde(default)]
    pub conflicts: Option<Vec<String>>,
    #[serde(default)]
    pub conflict_details: Option<Vec<String>>,
}

impl SittingAvailabilityResponse {
    pub fn ranges(&self) -> Vec<AvailabilityRange> {
        self.available_ranges
            .as_deref()
            .map(parse_ranges)
            .unwrap_or_default()
    }
}

// ── Source and load outcome ─────────────────────────────────────────────────

/// Anything that can answer availability queries (HTTP client, test double).
pub trait AvailabilitySource {
    fn availability(&self, query: &AvailabilityQuery) -> Result<AvailabilityResponse>;

    fn sitting_availability(&self, query: &SittingQuery) -> Result<SittingAvailabilityResponse>;
}

/// What the UI learned about one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayAvailability {
    /// Loaded. May be empty, which means the day is fully booked.
    Open(Vec<AvailabilityRange>),
    /// The fetch failed; nothing is known about the day.
    Unavailable(String),
}

impl DayAvailability {
    /// Ranges to feed the generators; empty when the load failed.
    pub fn ranges(&self) -> &[AvailabilityRange] {
        match self {
            DayAvailability::Open(ranges) => ranges,
            DayAvailability::Unavailable(_) => &[],
        }
    }

    pub fn load_failed(&self) -> bool {
        matches!(self, DayAvailability::Unavailable(_))
    }

    /// User-facing message for an empty result, if any.
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            DayAvailability::Open(ranges) if ranges.is_empty() => Some(NO_AVAILABILITY_MESSAGE),
            DayAvailability::Open(_) => None,
            DayAvailability::Unavailable(_) => Some(LOAD_FAILED_MESSAGE),
        }
    }

    fn from_result(result: Result<AvailabilityResponse>) -> Self {
        match result {
            Ok(response) => DayAvailability::Open(response.ranges()),
            Err(err) => {
                tracing::warn!(error = %err, "availability fetch failed");
                DayAvailability::Unavailable(err.to_string())
            }
        }
    }
}

/// Fetch one day and translate failures into [`DayAvailability::Unavailable`].
pub fn load_day<S: AvailabilitySource + ?Sized>(
    source: &S,
    query: &AvailabilityQuery,
) -> DayAvailability {
    tracing::debug!(
        date = %query.date,
        service = %query.service,
        exclude = ?query.exclude_booking_id,
        "loading availability"
    );
    DayAvailability::from_result(source.availability(query))
}

/// Day availability with last-request-wins ordering.
///
/// Call [`begin`](Self::begin) when the date or service changes, run the fetch
/// however the caller likes, then hand the result to
/// [`accept`](Self::accept) with the token it was started under.
#[derive(Debug, Default)]
pub struct DayAvailabilityLoader {
    sequencer: RequestSequencer,
    current: Option<DayAvailability>,
}

impl DayAvailabilityLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request and discard the previous result.
    pub fn begin(&mut self) -> RequestToken {
        self.current = None;
        self.sequencer.issue()
    }

    /// Record a finished fetch. Returns `None` and changes nothing when the
    /// token has been superseded.
    pub fn accept(
        &mut self,
        token: RequestToken,
        result: Result<AvailabilityResponse>,
    ) -> Option<&DayAvailability> {
        if !self.sequencer.is_current(token) {
            tracing::debug!(token = token.sequence(), "dropping stale availability response");
            return None;
        }
        self.current = Some(DayAvailability::from_result(result));
        self.current.as_ref()
    }

    /// Fetch synchronously through `source` under a fresh token.
    pub fn load<S: AvailabilitySource + ?Sized>(
        &mut self,
        source: &S,
        query: &AvailabilityQuery,
    ) -> Option<&DayAvailability> {
        let token = self.begin();
        let result = source.availability(query);
        self.accept(token, result)
    }

    /// The latest accepted result, if the current request has finished.
    pub fn current(&self) -> Option<&DayAvailability> {
        self.current.as_ref()
    }
}

/// Convenience for sources that report failure as a plain message.
pub fn source_error(message: impl Into<String>) -> SchedulerError {
    SchedulerError::Source(message.into())
}
