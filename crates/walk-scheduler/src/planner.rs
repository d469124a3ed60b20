//! One entry point for a booking screen: slots for a service on a day, end
//! times for sitting, and the final booking window.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::fixed::generate;
use crate::multi_day::day_picker_times;
use crate::past::filter_past;
use crate::range::AvailabilityRange;
use crate::service::{ServiceDuration, ServiceKind, ServiceRequest};
use crate::slot::{CandidateSlot, EndTime};
use crate::time::TimeOfDay;
use crate::variable::{end_times, start_times};
use crate::window::{BookingRequest, BookingWindow};

#[derive(Debug, Clone)]
pub struct SlotPlanner {
    tz: Tz,
    walk_step: u32,
    sitting_step: u32,
    day_picker_step: u32,
}

impl SlotPlanner {
    pub fn new(config: &SchedulerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tz: config.tz()?,
            walk_step: config.walk_step_minutes,
            sitting_step: config.sitting_step_minutes,
            day_picker_step: config.day_picker_step_minutes,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Scheduling parameters for `service` at the configured steps.
    pub fn request_for(&self, service: ServiceKind) -> ServiceRequest {
        let step = match service.duration() {
            ServiceDuration::Fixed(_) => self.walk_step,
            ServiceDuration::Minimum(_) => self.sitting_step,
        };
        service.request().with_step(step)
    }

    /// Bookable slots for `service` on `day`, with elapsed ones removed when
    /// `day` is today.
    ///
    /// Walks come back with their end filled in; sitting slots come back open
    /// and need [`end_times`](Self::end_times) once a start is picked.
    pub fn slots(
        &self,
        service: ServiceKind,
        day: NaiveDate,
        ranges: &[AvailabilityRange],
        now: DateTime<Utc>,
    ) -> Result<Vec<CandidateSlot>> {
        let request = self.request_for(service);
        let slots = match request.duration {
            ServiceDuration::Fixed(minutes) => generate(ranges, minutes, request.step_minutes)?,
            ServiceDuration::Minimum(minutes) => start_times(ranges, minutes, request.step_minutes)?
                .into_iter()
                .map(CandidateSlot::open)
                .collect(),
        };
        let kept = filter_past(&slots, day, now, self.tz);
        tracing::debug!(
            %service,
            %day,
            ranges = ranges.len(),
            generated = slots.len(),
            kept = kept.len(),
            "computed slots"
        );
        Ok(kept)
    }

    /// End times for a single-day sitting that starts at `start`.
    pub fn end_times(
        &self,
        ranges: &[AvailabilityRange],
        start: TimeOfDay,
    ) -> Result<Vec<EndTime>> {
        let request = self.request_for(ServiceKind::DogSitting);
        let min = request.min_duration_minutes().unwrap_or_default();
        end_times(ranges, start, min, request.step_minutes)
    }

    /// Start/end choices for multi-day sitting.
    pub fn day_picker_times(&self) -> Result<Vec<TimeOfDay>> {
        Ok(day_picker_times(self.day_picker_step)?.collect())
    }

    pub fn walk_window(&self, day: NaiveDate, slot: &CandidateSlot) -> Result<BookingWindow> {
        BookingWindow::fixed(day, slot, self.tz)
    }

    pub fn sitting_window(
        &self,
        day: NaiveDate,
        start: TimeOfDay,
        end: EndTime,
    ) -> Result<BookingWindow> {
        BookingWindow::single_day(day, start, end, self.tz)
    }

    pub fn multi_day_window(
        &self,
        start_date: NaiveDate,
        start_time: TimeOfDay,
        end_date: NaiveDate,
        end_time: TimeOfDay,
    ) -> Result<BookingWindow> {
        BookingWindow::multi_day(start_date, start_time, end_date, end_time, self.tz)
    }

    /// Booking payload for a chosen walk slot.
    pub fn walk_request(
        &self,
        service: ServiceKind,
        day: NaiveDate,
        slot: &CandidateSlot,
    ) -> Result<BookingRequest> {
        Ok(self.walk_window(day, slot)?.to_request(service))
    }
}

impl Default for SlotPlanner {
    fn default() -> Self {
        let config = SchedulerConfig::default();
        Self {
            tz: chrono_tz::Europe::London,
            walk_step: config.walk_step_minutes,
            sitting_step: config.sitting_step_minutes,
            day_picker_step: config.day_picker_step_minutes,
        }
    }
}
