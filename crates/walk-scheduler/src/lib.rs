//! # walk-scheduler
//!
//! Availability-to-slot scheduling for a dog-walking business.
//!
//! The booking screens fetch open time ranges for a day from an external
//! availability API. This crate turns those ranges into bookable slots for a
//! service, trims the ones already elapsed today, and pins the customer's
//! choice to absolute instants for the booking-creation call. It never touches
//! a database or the network itself.
//!
//! ## Modules
//!
//! - [`time`] — "HH:mm" ↔ minute-of-day
//! - [`range`] — Availability ranges, including ones that wrap past midnight
//! - [`service`] — Service catalog and duration rules
//! - [`fixed`] — Fixed-duration walk slots
//! - [`variable`] — Single-day sitting start and end times
//! - [`multi_day`] — Multi-day sitting feasibility and free-form pickers
//! - [`past`] — Drop slots that have already started today
//! - [`window`] — Booking windows in the business timezone
//! - [`availability`] — Availability API contract, reschedule exclusion, load outcomes
//! - [`request`] — Last-request-wins sequencing
//! - [`planner`] — Facade wiring the above together
//! - [`config`] — TOML configuration
//! - [`error`] — Error types

pub mod availability;
pub mod config;
pub mod error;
pub mod fixed;
pub mod multi_day;
pub mod past;
pub mod planner;
pub mod range;
pub mod request;
pub mod service;
pub mod slot;
pub mod time;
pub mod variable;
pub mod window;

pub use availability::{
    load_day, AvailabilityQuery, AvailabilityResponse, AvailabilitySource, BookingId,
    DayAvailability, DayAvailabilityLoader, Reschedule, SittingAvailabilityResponse, SittingKind,
    SittingQuery, LOAD_FAILED_MESSAGE, NO_AVAILABILITY_MESSAGE,
};
pub use config::SchedulerConfig;
pub use error::{Result, SchedulerError};
pub use fixed::{fixed_slots, generate, FixedSlots};
pub use multi_day::{
    day_picker_times, resolve, CheckState, DateLabel, MultiDayResolution, SittingCheck,
    SittingDates,
};
pub use past::{filter_past, filter_past_times, is_today};
pub use planner::SlotPlanner;
pub use range::{parse_ranges, AvailabilityRange, RawAvailabilityRange};
pub use request::{RequestSequencer, RequestToken};
pub use service::{
    ServiceDuration, ServiceKind, ServiceRequest, SITTING_MIN_DURATION_MINUTES,
    SITTING_STEP_MINUTES, WALK_STEP_MINUTES,
};
pub use slot::{CandidateSlot, EndTime};
pub use time::{TimeOfDay, MINUTES_PER_DAY};
pub use variable::{end_times, end_times_iter, start_times, start_times_iter, EndTimes, StartTimes};
pub use window::{BookingRequest, BookingWindow};
