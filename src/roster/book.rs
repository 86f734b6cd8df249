//! Employees and their fetched schedules for one month

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::schedule::master::deserialize_string_id;
use crate::schedule::{ScheduleEntry, ScheduleRecord};

/// A staff member shown as one roster row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(deserialize_with = "deserialize_string_id")]
    pub id: String,
    pub name: String,
    /// Employee number (NIP); schedules are keyed by it
    #[serde(alias = "employee_id", alias = "nip")]
    pub employee_id: String,
}

impl Employee {
    pub fn new(id: &str, name: &str, employee_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            employee_id: employee_id.to_string(),
        }
    }
}

/// Schedule records indexed by (employee id, date key)
#[derive(Debug, Clone, Default)]
pub struct RosterBook {
    records: HashMap<(String, String), ScheduleRecord>,
}

impl RosterBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index fetched entries; a later entry for the same cell replaces an earlier one
    pub fn from_entries(entries: impl IntoIterator<Item = ScheduleEntry>) -> Self {
        let mut book = Self::new();
        for entry in entries {
            book.insert(&entry.employee_id, &entry.date, entry.record);
        }
        book
    }

    pub fn insert(&mut self, employee_id: &str, date_key: &str, record: ScheduleRecord) {
        self.records.insert(
            (employee_id.trim().to_string(), date_key.trim().to_string()),
            record,
        );
    }

    pub fn remove(&mut self, employee_id: &str, date_key: &str) -> Option<ScheduleRecord> {
        self.records
            .remove(&(employee_id.trim().to_string(), date_key.trim().to_string()))
    }

    /// The record for one cell, `None` when the employee has nothing that day
    pub fn record_for_cell(&self, employee_id: &str, date_key: &str) -> Option<&ScheduleRecord> {
        self.records
            .get(&(employee_id.trim().to_string(), date_key.trim().to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
