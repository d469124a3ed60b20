//! The service catalog and the duration rules each service schedules under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Slot granularity for fixed-duration walk services.
pub const WALK_STEP_MINUTES: u32 = 15;

/// Start/end granularity for single-day dog sitting.
pub const SITTING_STEP_MINUTES: u32 = 30;

/// Shortest single-day sitting a customer may book.
pub const SITTING_MIN_DURATION_MINUTES: u32 = 60;

/// A bookable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceKind {
    MeetAndGreet,
    QuickWalk,
    SoloWalk,
    DogSitting,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 4] = [
        ServiceKind::MeetAndGreet,
        ServiceKind::QuickWalk,
        ServiceKind::SoloWalk,
        ServiceKind::DogSitting,
    ];

    /// Wire identifier, as sent to the availability and booking endpoints.
    pub fn id(self) -> &'static str {
        match self {
            ServiceKind::MeetAndGreet => "meet-and-greet",
            ServiceKind::QuickWalk => "quick-walk",
            ServiceKind::SoloWalk => "solo-walk",
            ServiceKind::DogSitting => "dog-sitting",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ServiceKind::MeetAndGreet => "Meet & Greet",
            ServiceKind::QuickWalk => "Quick Walk",
            ServiceKind::SoloWalk => "Solo Walk",
            ServiceKind::DogSitting => "Dog Sitting",
        }
    }

    pub fn duration(self) -> ServiceDuration {
        match self {
            ServiceKind::MeetAndGreet => ServiceDuration::Fixed(30),
            ServiceKind::QuickWalk => ServiceDuration::Fixed(30),
            ServiceKind::SoloWalk => ServiceDuration::Fixed(60),
            ServiceKind::DogSitting => ServiceDuration::Minimum(SITTING_MIN_DURATION_MINUTES),
        }
    }

    /// Scheduling parameters at the default step for this service.
    pub fn request(self) -> ServiceRequest {
        let step = match self.duration() {
            ServiceDuration::Fixed(_) => WALK_STEP_MINUTES,
            ServiceDuration::Minimum(_) => SITTING_STEP_MINUTES,
        };
        ServiceRequest {
            duration: self.duration(),
            step_minutes: step,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ServiceKind {
    type Err = SchedulerError;

    fn from_str(s: &str) -> Result<Self> {
        ServiceKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| SchedulerError::Validation(format!("unknown service '{s}'")))
    }
}

/// How long a service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceDuration {
    /// A business-defined constant length (walks).
    Fixed(u32),
    /// Customer picks the end, subject to this minimum (sitting).
    Minimum(u32),
}

/// Scheduling parameters handed to a slot generator.
///
/// Exactly one of the fixed or minimum duration is present; the enum makes
/// the other state unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub duration: ServiceDuration,
    pub step_minutes: u32,
}

impl ServiceRequest {
    pub fn fixed(duration_minutes: u32, step_minutes: u32) -> Self {
        Self {
            duration: ServiceDuration::Fixed(duration_minutes),
            step_minutes,
        }
    }

    pub fn variable(min_duration_minutes: u32, step_minutes: u32) -> Self {
        Self {
            duration: ServiceDuration::Minimum(min_duration_minutes),
            step_minutes,
        }
    }

    pub fn fixed_duration_minutes(&self) -> Option<u32> {
        match self.duration {
            ServiceDuration::Fixed(m) => Some(m),
            ServiceDuration::Minimum(_) => None,
        }
    }

    pub fn min_duration_minutes(&self) -> Option<u32> {
        match self.duration {
            ServiceDuration::Minimum(m) => Some(m),
            ServiceDuration::Fixed(_) => None,
        }
    }

    pub fn with_step(mut self, step_minutes: u32) -> Self {
        self.step_minutes = step_minutes;
        self
    }
}

/// Reject zero durations and steps before they reach a generator.
pub(crate) fn validate_positive(what: &str, minutes: u32) -> Result<()> {
    if minutes == 0 {
        return Err(SchedulerError::Validation(format!(
            "{what} must be positive, got {minutes}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walks_are_fixed_at_fifteen_minute_steps() {
        let req = ServiceKind::SoloWalk.request();
        assert_eq!(req.fixed_duration_minutes(), Some(60));
        assert_eq!(req.min_duration_minutes(), None);
        assert_eq!(req.step_minutes, 15);

        assert_eq!(ServiceKind::QuickWalk.request().fixed_duration_minutes(), Some(30));
        assert_eq!(ServiceKind::MeetAndGreet.request().fixed_duration_minutes(), Some(30));
    }

    #[test]
    fn test_sitting_is_variable() {
        let req = ServiceKind::DogSitting.request();
        assert_eq!(req.fixed_duration_minutes(), None);
        assert_eq!(req.min_duration_minutes(), Some(60));
        assert_eq!(req.step_minutes, 30);
    }

    #[test]
    fn test_service_ids_round_trip() {
        for kind in ServiceKind::ALL {
            assert_eq!(kind.id().parse::<ServiceKind>().unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn test_unknown_service() {
        let err = "group-walk".parse::<ServiceKind>().unwrap_err();
        assert!(err.to_string().contains("unknown service"), "got: {err}");
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("duration", 1).is_ok());
        assert!(matches!(
            validate_positive("duration", 0),
            Err(SchedulerError::Validation(_))
        ));
    }
}
