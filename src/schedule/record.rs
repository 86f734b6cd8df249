//! Per-day schedule assignments

use serde::{Deserialize, Serialize};

use super::codes::normalize_code;

/// One employee's assignment for one calendar day.
///
/// Whether a day has a record at all is expressed with `Option<&ScheduleRecord>`;
/// a present record may still carry no codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    #[serde(default, alias = "shift_code")]
    pub shift_code: Option<String>,
    #[serde(default, alias = "task_code")]
    pub task_code: Option<String>,
}

impl ScheduleRecord {
    pub fn new(shift_code: Option<&str>, task_code: Option<&str>) -> Self {
        Self {
            shift_code: shift_code.map(str::to_string),
            task_code: task_code.map(str::to_string),
        }
    }

    /// Normalized shift code, empty when missing
    pub fn normalized_shift(&self) -> String {
        normalize_code(self.shift_code.as_deref().unwrap_or_default())
    }

    /// Normalized task code, empty when missing
    pub fn normalized_task(&self) -> String {
        normalize_code(self.task_code.as_deref().unwrap_or_default())
    }
}

/// A schedule row as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(alias = "employee_id", alias = "nip")]
    pub employee_id: String,
    /// `YYYY-MM-DD`
    #[serde(alias = "date_key")]
    pub date: String,
    #[serde(flatten)]
    pub record: ScheduleRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_codes() {
        let record = ScheduleRecord::new(Some(" p"), None);
        assert_eq!(record.normalized_shift(), "P");
        assert_eq!(record.normalized_task(), "");
    }

    #[test]
    fn test_entry_deserialize() {
        let json = r#"{"employeeId": "198001", "date": "2024-06-01", "shiftCode": "P", "taskCode": "ST"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.employee_id, "198001");
        assert_eq!(entry.record.task_code.as_deref(), Some("ST"));

        let json = r#"{"employee_id": "198001", "date": "2024-06-02"}"#;
        let entry: ScheduleEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.record, ScheduleRecord::default());
    }
}
