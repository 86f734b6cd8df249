//! Built-in shift definitions used when no master record matches

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::codes::normalize_code;
use crate::error::ValidationError;

/// Fallback background when a symbolic class is not recognized
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Legend category of a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Operational shifts (morning, evening, night)
    Primary,
    /// Work station / duty assignments
    Task,
    /// Days off and leave
    Leave,
}

impl Category {
    pub fn all() -> [Category; 3] {
        [Category::Primary, Category::Task, Category::Leave]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Primary => "primary",
            Category::Task => "task",
            Category::Leave => "leave",
        }
    }

    /// Section title shown in the legend
    pub fn title(&self) -> &'static str {
        match self {
            Category::Primary => "Shift Operasional Utama",
            Category::Task => "Tugas Khusus & Penugasan Ruang",
            Category::Leave => "Status Absensi & Izin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(Category::Primary),
            "task" => Ok(Category::Task),
            "leave" => Ok(Category::Leave),
            other => Err(ValidationError::InvalidCategory(other.to_string())),
        }
    }
}

/// A compiled-in shift definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftDefinition {
    pub code: &'static str,
    pub label: &'static str,
    /// Symbolic background class
    pub color: &'static str,
    /// Symbolic text color class
    pub text_color: &'static str,
    pub category: Category,
}

impl ShiftDefinition {
    const fn new(
        code: &'static str,
        label: &'static str,
        color: &'static str,
        text_color: &'static str,
        category: Category,
    ) -> Self {
        Self {
            code,
            label,
            color,
            text_color,
            category,
        }
    }

    /// Concrete hex background for this definition
    pub fn background_hex(&self) -> &'static str {
        symbolic_to_hex(self.color)
    }
}

static SHIFT_DEFINITIONS: [ShiftDefinition; 5] = [
    ShiftDefinition::new("P", "Dinas Pagi", "bg-white", "text-gray-900", Category::Primary),
    ShiftDefinition::new("S", "Dinas Sore", "bg-blue-100", "text-blue-900", Category::Primary),
    ShiftDefinition::new("M", "Dinas Malam", "bg-indigo-600", "text-white", Category::Primary),
    ShiftDefinition::new("L", "Libur", "bg-red-600", "text-white", Category::Leave),
    ShiftDefinition::new("C", "Cuti", "bg-yellow-300", "text-gray-900", Category::Leave),
];

/// All built-in definitions in table order
pub fn all_definitions() -> &'static [ShiftDefinition] {
    &SHIFT_DEFINITIONS
}

/// Built-in definitions for one category, in table order
pub fn definitions_in(category: Category) -> impl Iterator<Item = &'static ShiftDefinition> {
    SHIFT_DEFINITIONS
        .iter()
        .filter(move |def| def.category == category)
}

/// Find the built-in definition for a code (case and whitespace insensitive)
pub fn lookup_definition(code: &str) -> Option<&'static ShiftDefinition> {
    let normalized = normalize_code(code);
    if normalized.is_empty() {
        return None;
    }
    SHIFT_DEFINITIONS.iter().find(|def| def.code == normalized)
}

/// Translate a symbolic background class into a concrete hex color
pub fn symbolic_to_hex(class: &str) -> &'static str {
    match class {
        "bg-white" => "#ffffff",
        "bg-blue-100" => "#dbeafe",
        "bg-indigo-600" => "#4f46e5",
        "bg-red-600" => "#dc2626",
        "bg-yellow-300" => "#fde047",
        _ => DEFAULT_BACKGROUND,
    }
}
