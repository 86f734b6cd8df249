//! Single-day list of every employee's assignment

use chrono::{Datelike, NaiveDate};

use crate::calendar;
use crate::schedule::lookup::{LookupChain, LookupKey, Source};
use crate::schedule::{
    calculate_shift_hours, resolve_cell, Background, MasterData, MasterRef, MasterShift,
    ResolvedCell, ScheduleRecord,
};

use super::book::{Employee, RosterBook};
use super::grid::Viewer;

pub const NO_EMPLOYEES_MESSAGE: &str = "Tidak ada data pegawai.";
pub const TODAY_BADGE: &str = "HARI INI";

/// Day selection within one month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCursor {
    pub year: i32,
    /// Zero-based month
    pub month: u32,
    pub day: u32,
    today: NaiveDate,
}

impl DayCursor {
    /// Start on today when viewing the current month, otherwise on the 1st
    pub fn new(year: i32, month: u32, today: NaiveDate) -> Self {
        let day = if today.year() == year && today.month0() == month {
            today.day()
        } else {
            1
        };
        Self {
            year,
            month,
            day,
            today,
        }
    }

    pub fn days_in_month(&self) -> u32 {
        calendar::days_in_month(self.year, self.month)
    }

    pub fn has_prev(&self) -> bool {
        self.day > 1
    }

    pub fn has_next(&self) -> bool {
        self.day < self.days_in_month()
    }

    pub fn prev(&mut self) {
        if self.has_prev() {
            self.day -= 1;
        }
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.day += 1;
        }
    }

    /// Jump to a day; out-of-range days are ignored
    pub fn select(&mut self, day: u32) -> bool {
        if (1..=self.days_in_month()).contains(&day) {
            self.day = day;
            true
        } else {
            false
        }
    }

    pub fn is_today(&self, day: u32) -> bool {
        self.today.year() == self.year && self.today.month0() == self.month && self.today.day() == day
    }

    pub fn date_key(&self) -> String {
        calendar::generate_date_key(self.year, self.month, self.day)
    }

    pub fn day_name(&self) -> &'static str {
        calendar::day_name(self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayEntry {
    pub employee: Employee,
    /// Display code, `-` when there is nothing to show
    pub code: String,
    /// Only set when the employee has a record for the day
    pub label: Option<String>,
    pub background: Background,
    pub text_color: String,
    pub is_me: bool,
    pub clickable: bool,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayList {
    pub date_key: String,
    pub day: u32,
    pub day_name: &'static str,
    pub is_today: bool,
    pub entries: Vec<DayEntry>,
}

impl DayList {
    pub fn build(
        cursor: &DayCursor,
        employees: &[Employee],
        book: &RosterBook,
        master: &MasterData,
        viewer: &Viewer,
    ) -> Self {
        let date_key = cursor.date_key();
        let entries = employees
            .iter()
            .map(|employee| {
                let record = book.record_for_cell(&employee.employee_id, &date_key);
                let cell = resolve_cell(record, &master.shifts, &master.units);
                day_entry(employee, record, cell, &date_key, &master.shifts, viewer)
            })
            .collect();

        Self {
            day: cursor.day,
            day_name: cursor.day_name(),
            is_today: cursor.is_today(cursor.day),
            date_key,
            entries,
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        if self.entries.is_empty() {
            Some(NO_EMPLOYEES_MESSAGE)
        } else {
            None
        }
    }

    pub fn total_hours(&self) -> f64 {
        self.entries.iter().map(|e| e.hours).sum()
    }
}

fn day_entry(
    employee: &Employee,
    record: Option<&ScheduleRecord>,
    cell: ResolvedCell,
    date_key: &str,
    shifts: &[MasterShift],
    viewer: &Viewer,
) -> DayEntry {
    let hours = record
        .and_then(|r| r.shift_code.as_deref())
        .map(|code| shift_hours(code, date_key, shifts))
        .unwrap_or(0.0);

    let code = if cell.display_code.is_empty() {
        "-".to_string()
    } else {
        cell.display_code
    };

    DayEntry {
        employee: employee.clone(),
        code,
        label: record.map(|_| cell.display_label),
        background: cell.background,
        text_color: cell.text_color,
        is_me: viewer.is_me(&employee.employee_id),
        clickable: viewer.can_open(&employee.employee_id, record.is_some()),
        hours,
    }
}

/// Hours for a shift code, using the start and end stored on its master record.
///
/// The master shift is found the same way the cell resolver finds its color.
pub fn shift_hours(code: &str, date_key: &str, shifts: &[MasterShift]) -> f64 {
    let shift = LookupChain::new()
        .then(Source::Shifts(shifts), LookupKey::shift(code))
        .first_match()
        .and_then(|found| found.as_master())
        .and_then(|master| match master {
            MasterRef::Shift(shift) => Some(shift),
            MasterRef::Unit(_) => None,
        });
    match shift {
        Some(shift) => calculate_shift_hours(
            shift.start_time.as_deref(),
            shift.end_time.as_deref(),
            Some(code),
            Some(date_key),
        ),
        None => 0.0,
    }
}
