//! Month and day helpers for the roster views
//!
//! Months are zero-based (0 = January) throughout, matching the date keys the
//! backend stores.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{RosterError, ValidationError};

const DAY_NAMES: [&str; 7] = ["Min", "Sen", "Sel", "Rab", "Kam", "Jum", "Sab"];

/// `YYYY-MM-DD` key for a (year, zero-based month, day) triple
pub fn generate_date_key(year: i32, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", year, month + 1, day)
}

pub fn date_of(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month + 1, day)
}

/// Number of days in a zero-based month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let first = match date_of(year, month, 1) {
        Some(d) => d,
        None => return 0,
    };
    let next = if month == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 2, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(0)
}

/// Day numbers `1..=days_in_month`
pub fn days_array(year: i32, month: u32) -> Vec<u32> {
    (1..=days_in_month(year, month)).collect()
}

pub fn is_weekend(year: i32, month: u32, day: u32) -> bool {
    date_of(year, month, day)
        .map(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .unwrap_or(false)
}

/// Mondays start a new week column group in the grid
pub fn is_monday(year: i32, month: u32, day: u32) -> bool {
    date_of(year, month, day)
        .map(|d| d.weekday() == Weekday::Mon)
        .unwrap_or(false)
}

/// Short Indonesian day name, Sunday first
pub fn day_name(year: i32, month: u32, day: u32) -> &'static str {
    date_of(year, month, day)
        .map(|d| DAY_NAMES[d.weekday().num_days_from_sunday() as usize])
        .unwrap_or("")
}

/// Parse a `YYYY-MM-DD` key
pub fn parse_date_key(key: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDateFormat(key.to_string()))
}

/// Convert a 1-based month from user input to the zero-based form
pub fn month_index(month: u32) -> Result<u32, ValidationError> {
    if (1..=12).contains(&month) {
        Ok(month - 1)
    } else {
        Err(ValidationError::InvalidMonth(month))
    }
}

/// Source of public holiday names
pub trait HolidayCalendar {
    fn holiday_name(&self, year: i32, month: u32, day: u32) -> Option<String>;
}

/// Calendar without holidays
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn holiday_name(&self, _year: i32, _month: u32, _day: u32) -> Option<String> {
        None
    }
}

/// Holidays keyed by date key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct HolidayTable {
    names: HashMap<String, String>,
}

impl HolidayTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date_key: &str, name: &str) {
        self.names.insert(date_key.to_string(), name.to_string());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Load a JSON object of `"YYYY-MM-DD": "name"` pairs
    pub fn load_from(path: &Path) -> Result<Self, RosterError> {
        let data = fs::read_to_string(path)?;
        let table: HolidayTable = serde_json::from_str(&data)?;
        Ok(table)
    }

    /// Load the table if the file exists, otherwise an empty table
    pub fn load_optional(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.exists() => match Self::load_from(path) {
                Ok(table) => {
                    tracing::debug!(count = table.len(), "holidays loaded");
                    table
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable holiday file");
                    Self::new()
                }
            },
            _ => Self::new(),
        }
    }
}

impl HolidayCalendar for HolidayTable {
    fn holiday_name(&self, year: i32, month: u32, day: u32) -> Option<String> {
        self.names.get(&generate_date_key(year, month, day)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_date_key() {
        assert_eq!(generate_date_key(2024, 0, 5), "2024-01-05");
        assert_eq!(generate_date_key(2024, 11, 31), "2024-12-31");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 12), 0);
        assert_eq!(days_array(2024, 5).len(), 30);
    }

    #[test]
    fn test_weekday_helpers() {
        // June 2024: the 1st is a Saturday, the 3rd a Monday
        assert!(is_weekend(2024, 5, 1));
        assert!(is_weekend(2024, 5, 2));
        assert!(!is_weekend(2024, 5, 3));
        assert!(is_monday(2024, 5, 3));
        assert_eq!(day_name(2024, 5, 1), "Sab");
        assert_eq!(day_name(2024, 5, 2), "Min");
        assert_eq!(day_name(2024, 5, 3), "Sen");
    }

    #[test]
    fn test_month_index() {
        assert_eq!(month_index(1).unwrap(), 0);
        assert_eq!(month_index(12).unwrap(), 11);
        assert!(month_index(0).is_err());
        assert!(month_index(13).is_err());
    }

    #[test]
    fn test_holiday_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("holidays.json");
        fs::write(&path, r#"{"2024-06-17": "Idul Adha"}"#).unwrap();

        let table = HolidayTable::load_optional(Some(&path));
        assert_eq!(table.holiday_name(2024, 5, 17).as_deref(), Some("Idul Adha"));
        assert_eq!(table.holiday_name(2024, 5, 18), None);

        let missing = HolidayTable::load_optional(Some(&dir.path().join("nope.json")));
        assert!(missing.is_empty());
        assert_eq!(NoHolidays.holiday_name(2024, 5, 17), None);
    }
}
