//! Month grid view model: one row per employee, one column per day

use crate::calendar::{self, HolidayCalendar};
use crate::schedule::{resolve_cell, MasterData, ResolvedCell};

use super::book::{Employee, RosterBook};

pub const NO_EMPLOYEES_MESSAGE: &str = "Tidak ada data pegawai ditemukan.";

/// Who is looking at the roster
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Viewer {
    pub can_edit: bool,
    /// NIP of the viewer, if known
    pub nip: Option<String>,
}

impl Viewer {
    pub fn new(can_edit: bool, nip: Option<&str>) -> Self {
        Self {
            can_edit,
            nip: nip.map(|n| n.trim().to_string()),
        }
    }

    pub fn is_me(&self, employee_id: &str) -> bool {
        self.nip.as_deref() == Some(employee_id.trim())
    }

    /// Editors may open any cell; others only their own scheduled days
    pub fn can_open(&self, employee_id: &str, has_record: bool) -> bool {
        self.can_edit || (self.is_me(employee_id) && has_record)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayHeader {
    pub day: u32,
    pub day_name: &'static str,
    pub is_weekend: bool,
    pub holiday: Option<String>,
    /// Drawn with a separator before it
    pub is_monday: bool,
}

impl DayHeader {
    /// Weekends and holidays are highlighted in red
    pub fn is_red(&self) -> bool {
        self.is_weekend || self.holiday.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub day: u32,
    pub date_key: String,
    /// `None` when there is no record for the day
    pub resolved: Option<ResolvedCell>,
    pub clickable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    /// 1-based row number
    pub index: usize,
    pub employee: Employee,
    pub is_me: bool,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    /// Zero-based month
    pub month: u32,
    pub headers: Vec<DayHeader>,
    pub rows: Vec<GridRow>,
}

impl MonthGrid {
    pub fn build(
        year: i32,
        month: u32,
        employees: &[Employee],
        book: &RosterBook,
        master: &MasterData,
        holidays: &dyn HolidayCalendar,
        viewer: &Viewer,
    ) -> Self {
        let days = calendar::days_array(year, month);

        let headers = days
            .iter()
            .map(|&day| DayHeader {
                day,
                day_name: calendar::day_name(year, month, day),
                is_weekend: calendar::is_weekend(year, month, day),
                holiday: holidays.holiday_name(year, month, day),
                is_monday: calendar::is_monday(year, month, day),
            })
            .collect();

        let rows = employees
            .iter()
            .enumerate()
            .map(|(i, employee)| {
                let cells = days
                    .iter()
                    .map(|&day| {
                        let date_key = calendar::generate_date_key(year, month, day);
                        let record = book.record_for_cell(&employee.employee_id, &date_key);
                        GridCell {
                            day,
                            resolved: record
                                .map(|r| resolve_cell(Some(r), &master.shifts, &master.units)),
                            clickable: viewer.can_open(&employee.employee_id, record.is_some()),
                            date_key,
                        }
                    })
                    .collect();
                GridRow {
                    index: i + 1,
                    is_me: viewer.is_me(&employee.employee_id),
                    employee: employee.clone(),
                    cells,
                }
            })
            .collect();

        Self {
            year,
            month,
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Message to show instead of an empty table
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.is_empty() {
            Some(NO_EMPLOYEES_MESSAGE)
        } else {
            None
        }
    }

    pub fn cell(&self, row: usize, day: u32) -> Option<&GridCell> {
        self.rows
            .get(row)
            .and_then(|r| r.cells.get(day.checked_sub(1)? as usize))
    }
}
