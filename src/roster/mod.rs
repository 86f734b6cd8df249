//! Roster views built from employees, schedules and the master lists

pub mod book;
pub mod day_list;
pub mod grid;

pub use book::{Employee, RosterBook};
pub use day_list::{shift_hours, DayCursor, DayEntry, DayList};
pub use grid::{DayHeader, GridCell, GridRow, MonthGrid, Viewer};
