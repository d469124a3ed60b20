//! Drop slots that have already started when the target day is today.
//!
//! "Today" is decided by local calendar date in the configured timezone, not by
//! a 24-hour distance from `now`. `now` is always injected by the caller.
//!
//! A slot's start is compared as an absolute instant, resolved the same way a
//! booking window resolves it, so DST fall-back days drop the first pass
//! through a repeated hour once it has elapsed.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::slot::CandidateSlot;
use crate::time::TimeOfDay;
use crate::window::localize;

/// Whether `day` is the local calendar date of `now` in `tz`.
pub fn is_today(day: NaiveDate, now: DateTime<Utc>, tz: Tz) -> bool {
    now.with_timezone(&tz).date_naive() == day
}

/// Keep only the slots whose start is strictly after `now`.
///
/// A no-op unless `day` is today in `tz`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use walk_scheduler::{filter_past, CandidateSlot, TimeOfDay};
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let slot = CandidateSlot::open(TimeOfDay::parse("09:00").unwrap());
/// let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 5, 0).unwrap();
///
/// assert!(filter_past(&[slot], day, now, chrono_tz::UTC).is_empty());
/// ```
pub fn filter_past(
    slots: &[CandidateSlot],
    day: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<CandidateSlot> {
    if !is_today(day, now, tz) {
        return slots.to_vec();
    }
    slots
        .iter()
        .filter(|slot| starts_after(day, slot.start, now, tz))
        .copied()
        .collect()
}

/// Same as [`filter_past`], for bare start times.
pub fn filter_past_times(
    times: &[TimeOfDay],
    day: NaiveDate,
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<TimeOfDay> {
    if !is_today(day, now, tz) {
        return times.to_vec();
    }
    times
        .iter()
        .filter(|t| starts_after(day, **t, now, tz))
        .copied()
        .collect()
}

/// Whether `start` on `day` falls strictly after `now`.
fn starts_after(day: NaiveDate, start: TimeOfDay, now: DateTime<Utc>, tz: Tz) -> bool {
    match localize(day.and_time(start.to_naive_time()), tz) {
        Ok(instant) => instant.with_timezone(&Utc) > now,
        // Skipped by a spring-forward gap: fall back to wall-clock order.
        Err(_) => start.to_naive_time() > now.with_timezone(&tz).time(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn slot(s: &str) -> CandidateSlot {
        CandidateSlot::open(TimeOfDay::parse(s).unwrap())
    }

    #[test]
    fn test_elapsed_slot_removed_today() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 5, 0).unwrap();
        let kept = filter_past(&[slot("09:00"), slot("09:15")], day(), now, chrono_tz::UTC);
        assert_eq!(kept, vec![slot("09:15")]);
    }

    #[test]
    fn test_kept_when_now_is_yesterday() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 0).unwrap();
        let kept = filter_past(&[slot("09:00")], day(), now, chrono_tz::UTC);
        assert_eq!(kept, vec![slot("09:00")]);
    }

    #[test]
    fn test_slot_starting_exactly_now_is_removed() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        assert!(filter_past(&[slot("09:00")], day(), now, chrono_tz::UTC).is_empty());
    }

    #[test]
    fn test_seconds_past_the_minute_count() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 8, 59, 30).unwrap();
        assert_eq!(
            filter_past(&[slot("09:00")], day(), now, chrono_tz::UTC),
            vec![slot("09:00")]
        );
    }

    #[test]
    fn test_today_is_local_calendar_date() {
        // 23:30 UTC on Mar 1 is already 10:30 on Mar 2 in Sydney.
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap();
        let tz = chrono_tz::Australia::Sydney;
        assert!(is_today(day(), now, tz));
        let kept = filter_past(&[slot("10:00"), slot("11:00")], day(), now, tz);
        assert_eq!(kept, vec![slot("11:00")]);
    }

    #[test]
    fn test_future_day_untouched() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 23, 0, 0).unwrap();
        let tomorrow = day().succ_opt().unwrap();
        let slots = vec![slot("00:00"), slot("06:00")];
        assert_eq!(filter_past(&slots, tomorrow, now, chrono_tz::UTC), slots);
    }

    #[test]
    fn test_repeated_hour_uses_first_occurrence() {
        // London falls back at 02:00 BST on 25 Oct 2026. 01:00 UTC is the
        // second 01:00 local, so the first 01:30 (00:30 UTC) has passed.
        let tz = chrono_tz::Europe::London;
        let fall_back = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 25, 1, 0, 0).unwrap();
        assert_eq!(now.with_timezone(&tz).time().to_string(), "01:00:00");

        let kept = filter_past(
            &[slot("00:45"), slot("01:30"), slot("02:00")],
            fall_back,
            now,
            tz,
        );
        assert_eq!(kept, vec![slot("02:00")]);
    }

    #[test]
    fn test_spring_forward_gap_uses_wall_clock() {
        // 01:00 to 02:00 does not exist in London on 29 Mar 2026.
        let tz = chrono_tz::Europe::London;
        let spring = NaiveDate::from_ymd_opt(2026, 3, 29).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 3, 29, 0, 15, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 3, 29, 3, 0, 0).unwrap();

        assert_eq!(filter_past(&[slot("01:30")], spring, early, tz), vec![slot("01:30")]);
        assert!(filter_past(&[slot("01:30")], spring, late, tz).is_empty());
    }

    #[test]
    fn test_filter_past_times() {
        let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
        let times: Vec<_> = ["11:30", "12:00", "12:30"]
            .iter()
            .map(|s| TimeOfDay::parse(s).unwrap())
            .collect();
        let kept = filter_past_times(&times, day(), now, chrono_tz::UTC);
        assert_eq!(kept, vec![TimeOfDay::parse("12:30").unwrap()]);
    }
}
