//! Upsell Schedule Filter
//!
//! Date-window, weekday and time-of-day gating for upsell campaigns.
//! Evaluated against a caller-supplied local timestamp so matching stays
//! reproducible.

use chrono::{Datelike, NaiveDateTime, NaiveTime, Timelike, Weekday};
use shared::models::{TimeSlot, Upsell};

/// Check if a campaign's schedule is active at the given local time
pub fn is_schedule_active(upsell: &Upsell, now: NaiveDateTime) -> bool {
    let today = now.date();
    if let Some(start) = upsell.start_date
        && today < start
    {
        return false;
    }
    if let Some(end) = upsell.end_date
        && today > end
    {
        return false;
    }

    // Empty = every day
    if !upsell.active_days.is_empty()
        && !upsell.active_days.contains(&weekday_index(now.weekday()))
    {
        return false;
    }

    // Empty = all day
    if !upsell.active_time_slots.is_empty() {
        let current = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0)
            .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        if !upsell
            .active_time_slots
            .iter()
            .any(|slot| in_time_slot(slot, current))
        {
            return false;
        }
    }

    true
}

/// Day-of-week index (0=Sunday..6=Saturday)
fn weekday_index(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

/// HH:MM window check. end < start wraps past midnight (e.g. 22:00-02:00).
/// Unparseable bounds never match.
fn in_time_slot(slot: &TimeSlot, current: NaiveTime) -> bool {
    let (Ok(start), Ok(end)) = (
        NaiveTime::parse_from_str(&slot.start, "%H:%M"),
        NaiveTime::parse_from_str(&slot.end, "%H:%M"),
    ) else {
        return false;
    };

    if start <= end {
        current >= start && current <= end
    } else {
        // Overnight
        current >= start || current <= end
    }
}
