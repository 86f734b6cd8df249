//! Resolution of a single roster day-cell into colors and labels
//!
//! The same resolution feeds the month grid, the day list and the legend so a
//! code always looks the same wherever it appears.

use serde::Serialize;

use super::contrast::{contrast_text_color, DARK_TEXT};
use super::lookup::{LookupChain, LookupKey, Source};
use super::master::{MasterShift, MasterUnit};
use super::record::ScheduleRecord;

/// Label used when a record exists but carries no code at all
pub const NO_SCHEDULE_LABEL: &str = "Tidak ada jadwal";

/// Cell background
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    /// Default, uncolored cell
    None,
    Solid { color: String },
    /// Diagonal split: shift color in one half, task color in the other
    Split { shift: String, task: String },
}

impl Background {
    pub fn is_none(&self) -> bool {
        matches!(self, Background::None)
    }

    /// CSS declaration equivalent, for exporting or debugging
    pub fn to_css(&self) -> Option<String> {
        match self {
            Background::None => None,
            Background::Solid { color } => Some(format!("background-color: {}", color)),
            Background::Split { shift, task } => Some(format!(
                "background: linear-gradient(135deg, {} 50%, {} 50%)",
                shift, task
            )),
        }
    }
}

/// Presentation of one (employee, date) cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCell {
    pub display_code: String,
    pub display_label: String,
    pub background: Background,
    pub text_color: String,
}

impl ResolvedCell {
    /// The cell shown when an employee has no record for the day
    pub fn empty() -> Self {
        Self {
            display_code: String::new(),
            display_label: String::new(),
            background: Background::None,
            text_color: DARK_TEXT.to_string(),
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self.background, Background::Split { .. })
    }
}

/// Resolve the presentation of one cell.
///
/// Pure: depends only on its arguments. An absent record always yields
/// [`ResolvedCell::empty`], whatever the master lists contain.
pub fn resolve_cell(
    record: Option<&ScheduleRecord>,
    shifts: &[MasterShift],
    units: &[MasterUnit],
) -> ResolvedCell {
    let record = match record {
        Some(record) => record,
        None => return ResolvedCell::empty(),
    };

    let shift_code = record.normalized_shift();
    let task_code = record.normalized_task();

    let shift_color = LookupChain::new()
        .then(Source::Shifts(shifts), LookupKey::shift(&shift_code))
        .then(Source::Static, LookupKey::shift(&shift_code))
        .first_with(|found| found.color().map(str::to_string));

    let task_color = LookupChain::new()
        .then(Source::Units(units), LookupKey::code(&task_code))
        .first_with(|found| found.color().map(str::to_string));

    let display_code = if !task_code.is_empty() {
        task_code.clone()
    } else {
        shift_code.clone()
    };

    let label_key = if task_code.is_empty() {
        &shift_code
    } else {
        &task_code
    };
    let display_label = LookupChain::new()
        .then(Source::Units(units), LookupKey::code(&task_code))
        .then(Source::Shifts(shifts), LookupKey::shift(&shift_code))
        .then(Source::Static, LookupKey::code(label_key))
        .first_match()
        .map(|found| found.label().to_string())
        .unwrap_or_else(|| {
            if display_code.is_empty() {
                NO_SCHEDULE_LABEL.to_string()
            } else {
                display_code.clone()
            }
        });

    let both_codes = !task_code.is_empty() && !shift_code.is_empty();
    let (background, text_color) = match (shift_color, task_color) {
        (Some(shift), Some(task)) if both_codes => {
            let text = contrast_text_color(&task);
            (Background::Split { shift, task }, text)
        }
        (_, Some(task)) => {
            let text = contrast_text_color(&task);
            (Background::Solid { color: task }, text)
        }
        (Some(shift), None) => {
            let text = contrast_text_color(&shift);
            (Background::Solid { color: shift }, text)
        }
        (None, None) => (Background::None, DARK_TEXT),
    };

    ResolvedCell {
        display_code,
        display_label,
        background,
        text_color: text_color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::contrast::LIGHT_TEXT;

    fn shift(code: &str, name: &str, color: &str) -> MasterShift {
        MasterShift {
            id: format!("s-{}", code.to_lowercase()),
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            start_time: None,
            end_time: None,
            is_active: true,
            category: None,
        }
    }

    fn unit(code: &str, name: &str, color: &str) -> MasterUnit {
        MasterUnit {
            id: format!("u-{}", code.to_lowercase()),
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    fn seeded() -> (Vec<MasterShift>, Vec<MasterUnit>) {
        (
            vec![
                shift("PAGI", "Dinas Pagi", "#ffffff"),
                shift("SIANG", "Dinas Sore", "#3b82f6"),
                shift("MALAM", "Dinas Malam", "#111827"),
                shift("OFF", "Libur", "#ef4444"),
            ],
            vec![
                unit("ST", "Ruang Penyimpanan Steril", "#10b981"),
                unit("DS", "Distribusi", "#a855f7"),
            ],
        )
    }

    #[test]
    fn test_absent_record_is_empty() {
        let (shifts, units) = seeded();
        let cell = resolve_cell(None, &shifts, &units);
        assert_eq!(cell, ResolvedCell::empty());
        assert!(cell.background.is_none());
        assert_eq!(cell.display_code, "");
    }

    #[test]
    fn test_combined_shift_and_task_is_split() {
        let (shifts, units) = seeded();
        let record = ScheduleRecord::new(Some("P"), Some("ST"));
        let cell = resolve_cell(Some(&record), &shifts, &units);

        assert_eq!(cell.display_code, "ST");
        assert_eq!(cell.display_label, "Ruang Penyimpanan Steril");
        assert_eq!(
            cell.background,
            Background::Split {
                shift: "#ffffff".to_string(),
                task: "#10b981".to_string()
            }
        );
        assert_eq!(cell.text_color, contrast_text_color("#10b981"));
        assert!(cell.is_combined());
    }

    #[test]
    fn test_shift_only_uses_master_color() {
        let (shifts, units) = seeded();
        let record = ScheduleRecord::new(Some(" s "), None);
        let cell = resolve_cell(Some(&record), &shifts, &units);

        assert_eq!(cell.display_code, "S");
        assert_eq!(cell.display_label, "Dinas Sore");
        assert_eq!(
            cell.background,
            Background::Solid {
                color: "#3b82f6".to_string()
            }
        );
        assert_eq!(cell.text_color, LIGHT_TEXT);
    }

    #[test]
    fn test_shift_falls_back_to_static_table() {
        let record = ScheduleRecord::new(Some("M"), None);
        let cell = resolve_cell(Some(&record), &[], &[]);
        assert_eq!(cell.display_label, "Dinas Malam");
        assert_eq!(
            cell.background,
            Background::Solid {
                color: "#4f46e5".to_string()
            }
        );
        assert_eq!(cell.text_color, LIGHT_TEXT);
    }

    #[test]
    fn test_backend_code_record_uses_static_table() {
        let record = ScheduleRecord::new(Some("cuti"), None);
        let cell = resolve_cell(Some(&record), &[], &[]);
        assert_eq!(cell.display_code, "CUTI");
        assert_eq!(cell.display_label, "Cuti");
        assert_eq!(
            cell.background,
            Background::Solid {
                color: "#fde047".to_string()
            }
        );
    }

    #[test]
    fn test_legacy_off_alias_uses_static_table() {
        for code in ["L", "OFF", "LB"] {
            let cell = resolve_cell(Some(&ScheduleRecord::new(Some(code), None)), &[], &[]);
            assert_eq!(cell.display_label, "Libur", "code {}", code);
            assert_eq!(
                cell.background,
                Background::Solid {
                    color: "#dc2626".to_string()
                }
            );
        }
    }

    #[test]
    fn test_blank_master_color_falls_back_to_static() {
        let shifts = vec![shift("SIANG", "Sore Panjang", "")];
        let record = ScheduleRecord::new(Some("S"), None);
        let cell = resolve_cell(Some(&record), &shifts, &[]);
        assert_eq!(cell.display_label, "Sore Panjang");
        assert_eq!(
            cell.background,
            Background::Solid {
                color: "#dbeafe".to_string()
            }
        );
    }

    #[test]
    fn test_task_only() {
        let (shifts, units) = seeded();
        let record = ScheduleRecord::new(None, Some("ds"));
        let cell = resolve_cell(Some(&record), &shifts, &units);
        assert_eq!(cell.display_code, "DS");
        assert_eq!(cell.display_label, "Distribusi");
        assert_eq!(
            cell.background,
            Background::Solid {
                color: "#a855f7".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_task_with_shift_keeps_shift_color() {
        let (shifts, units) = seeded();
        let record = ScheduleRecord::new(Some("P"), Some("XYZ"));
        let cell = resolve_cell(Some(&record), &shifts, &units);
        assert_eq!(cell.display_code, "XYZ");
        // Matched shift name beats the raw code
        assert_eq!(cell.display_label, "Dinas Pagi");
        assert_eq!(
            cell.background,
            Background::Solid {
                color: "#ffffff".to_string()
            }
        );
        assert_eq!(cell.text_color, DARK_TEXT);
    }

    #[test]
    fn test_unknown_codes_degrade_to_neutral() {
        let record = ScheduleRecord::new(Some("Q"), None);
        let cell = resolve_cell(Some(&record), &[], &[]);
        assert_eq!(cell.display_code, "Q");
        assert_eq!(cell.display_label, "Q");
        assert!(cell.background.is_none());
        assert_eq!(cell.text_color, DARK_TEXT);
    }

    #[test]
    fn test_present_record_without_codes() {
        let (shifts, units) = seeded();
        let record = ScheduleRecord::default();
        let cell = resolve_cell(Some(&record), &shifts, &units);
        assert_eq!(cell.display_code, "");
        assert_eq!(cell.display_label, NO_SCHEDULE_LABEL);
        assert!(cell.background.is_none());
    }

    #[test]
    fn test_css_export() {
        let bg = Background::Split {
            shift: "#fff".to_string(),
            task: "#000".to_string(),
        };
        assert_eq!(
            bg.to_css().as_deref(),
            Some("background: linear-gradient(135deg, #fff 50%, #000 50%)")
        );
        assert_eq!(Background::None.to_css(), None);
    }
}
