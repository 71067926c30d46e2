//! Appointment slot suggestion.
//!
//! A shared six-slot day template is split by priority: critical and high
//! risk get the morning slots, medium and low get the afternoon. Critical
//! appointments are pulled forward to tomorrow at the latest.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::models::{RiskLevel, ScheduleSuggestion};

/// Daily slot template, in order of preference.
pub const DAY_SLOTS: [&str; 6] = ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"];

/// Wire format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Priority indices at or below this get the morning half of the template.
const MORNING_PRIORITY_CUTOFF: u8 = 1;

#[derive(Error, Debug, PartialEq)]
pub enum ScheduleError {
    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    #[error("Date out of range")]
    DateOutOfRange,
}

/// Priority index: 0 is most urgent.
pub fn priority_index(level: RiskLevel) -> u8 {
    match level {
        RiskLevel::Critical => 0,
        RiskLevel::High => 1,
        RiskLevel::Medium => 2,
        RiskLevel::Low => 3,
    }
}

/// Parse a caller-supplied risk label; unknown labels are treated as medium.
pub fn parse_priority(label: &str) -> RiskLevel {
    label.parse().unwrap_or(RiskLevel::Medium)
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ScheduleError::InvalidDate(raw.to_string()))
}

/// Candidate slots for a risk level.
pub fn slots_for(level: RiskLevel) -> &'static [&'static str] {
    if priority_index(level) <= MORNING_PRIORITY_CUTOFF {
        &DAY_SLOTS[..3]
    } else {
        &DAY_SLOTS[3..]
    }
}

/// Suggest an appointment for `level` given the caller's preferred date.
///
/// `today` is explicit so the date rule does not depend on the wall clock.
pub fn schedule(
    level: RiskLevel,
    preferred: NaiveDate,
    today: NaiveDate,
) -> Result<ScheduleSuggestion, ScheduleError> {
    let date = if priority_index(level) == 0 {
        let tomorrow = today
            .checked_add_days(Days::new(1))
            .ok_or(ScheduleError::DateOutOfRange)?;
        preferred.min(tomorrow)
    } else {
        preferred
    };

    let slots: Vec<String> = slots_for(level).iter().map(|s| s.to_string()).collect();

    Ok(ScheduleSuggestion {
        priority: level,
        suggested_date: date.format(DATE_FORMAT).to_string(),
        suggested_time: slots[0].clone(),
        available_slots: slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_critical_is_pulled_forward() {
        let today = date("2024-03-10");
        let result = schedule(RiskLevel::Critical, date("2024-04-09"), today).unwrap();

        assert_eq!(result.suggested_date, "2024-03-11");
        assert_eq!(result.available_slots, vec!["09:00", "10:00", "11:00"]);
        assert_eq!(result.suggested_time, "09:00");
    }

    #[test]
    fn test_critical_keeps_earlier_preference() {
        let today = date("2024-03-10");
        assert_eq!(
            schedule(RiskLevel::Critical, today, today).unwrap().suggested_date,
            "2024-03-10"
        );
        assert_eq!(
            schedule(RiskLevel::Critical, date("2024-03-01"), today)
                .unwrap()
                .suggested_date,
            "2024-03-01"
        );
    }

    #[test]
    fn test_high_keeps_date_with_morning_slots() {
        let today = date("2024-03-10");
        let result = schedule(RiskLevel::High, date("2024-04-09"), today).unwrap();

        assert_eq!(result.suggested_date, "2024-04-09");
        assert_eq!(result.suggested_time, "09:00");
        assert_eq!(result.priority, RiskLevel::High);
    }

    #[test]
    fn test_lower_tiers_get_afternoon() {
        let today = date("2024-03-10");
        for level in [RiskLevel::Medium, RiskLevel::Low] {
            let result = schedule(level, date("2024-03-15"), today).unwrap();
            assert_eq!(result.available_slots, vec!["14:00", "15:00", "16:00"]);
            assert_eq!(result.suggested_time, "14:00");
            assert_eq!(result.suggested_date, "2024-03-15");
        }
    }

    #[test]
    fn test_unknown_label_is_medium() {
        assert_eq!(parse_priority("urgent-ish"), RiskLevel::Medium);
        assert_eq!(parse_priority("HIGH"), RiskLevel::High);
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("03/10/2024").is_err());
        assert_eq!(parse_date(" 2024-03-10 ").unwrap(), date("2024-03-10"));
    }

    #[test]
    fn test_end_of_calendar() {
        let today = NaiveDate::MAX;
        assert_eq!(
            schedule(RiskLevel::Critical, today, today),
            Err(ScheduleError::DateOutOfRange)
        );
    }
}
