//! Scheduler configuration, loaded from TOML.
//!
//! ```toml
//! timezone = "Europe/London"
//! walk_step_minutes = 15
//! sitting_step_minutes = 30
//! day_picker_step_minutes = 30
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use std::path::Path;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};
use crate::service::{SITTING_STEP_MINUTES, WALK_STEP_MINUTES};

pub const DEFAULT_TIMEZONE: &str = "Europe/London";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// IANA name of the single local timezone bookings are made in.
    pub timezone: String,
    pub walk_step_minutes: u32,
    pub sitting_step_minutes: u32,
    /// Granularity of the free-form multi-day time dropdown.
    pub day_picker_step_minutes: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            walk_step_minutes: WALK_STEP_MINUTES,
            sitting_step_minutes: SITTING_STEP_MINUTES,
            day_picker_step_minutes: SITTING_STEP_MINUTES,
        }
    }
}

impl SchedulerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchedulerError::Config(format!("cannot read '{}': {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            timezone = %config.timezone,
            "loaded scheduler config"
        );
        Ok(config)
    }

    /// Parse and validate.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SchedulerError::Config(format!("TOML parsing error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tz()?;
        for (name, value) in [
            ("walk_step_minutes", self.walk_step_minutes),
            ("sitting_step_minutes", self.sitting_step_minutes),
            ("day_picker_step_minutes", self.day_picker_step_minutes),
        ] {
            if value == 0 || value > 720 {
                return Err(SchedulerError::Config(format!(
                    "{name} must be between 1 and 720, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SchedulerError::InvalidTimezone(format!("'{}'", self.timezone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SchedulerConfig::default();
        assert_eq!(config.walk_step_minutes, 15);
        assert_eq!(config.sitting_step_minutes, 30);
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::London);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = SchedulerConfig::from_toml_str(r#"timezone = "America/New_York""#).unwrap();
        assert_eq!(config.tz().unwrap(), chrono_tz::America::New_York);
        assert_eq!(config.walk_step_minutes, 15);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(
            SchedulerConfig::from_toml_str("").unwrap(),
            SchedulerConfig::default()
        );
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let err = SchedulerConfig::from_toml_str(r#"timezone = "Mars/Olympus""#).unwrap_err();
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_zero_step_rejected() {
        let err = SchedulerConfig::from_toml_str("walk_step_minutes = 0").unwrap_err();
        assert!(matches!(err, SchedulerError::Config(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SchedulerConfig::from_toml_str("walk_steps = 10").unwrap_err();
        assert!(err.to_string().contains("TOML parsing error"), "got: {err}");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timezone = \"Europe/Dublin\"\nsitting_step_minutes = 15").unwrap();
        let config = SchedulerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.sitting_step_minutes, 15);
        assert_eq!(config.tz().unwrap(), chrono_tz::Europe::Dublin);
    }

    #[test]
    fn test_missing_file() {
        let err = SchedulerConfig::from_file("/nonexistent/walk-scheduler.toml").unwrap_err();
        assert!(matches!(err, SchedulerError::Config(_)));
    }
}
