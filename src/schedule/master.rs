//! Backend-owned master lists of shifts and units

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::codes::normalize_code;
use super::definitions::Category;

/// A shift definition stored on the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterShift {
    #[serde(deserialize_with = "deserialize_string_id")]
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, alias = "start_time")]
    pub start_time: Option<String>,
    #[serde(default, alias = "end_time")]
    pub end_time: Option<String>,
    #[serde(default = "default_active", alias = "is_active")]
    pub is_active: bool,
    /// Explicit legend category, when the backend stores one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// A work unit / task definition stored on the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterUnit {
    #[serde(deserialize_with = "deserialize_string_id")]
    pub id: String,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
}

fn default_active() -> bool {
    true
}

// Backends hand out numeric or string ids depending on the table
pub(crate) fn deserialize_string_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    match value {
        Value::Number(num) => Ok(num.to_string()),
        Value::String(s) => Ok(s),
        _ => Err(serde::de::Error::custom("ID must be a string or number")),
    }
}

/// Which master list a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasterKind {
    Shift,
    Unit,
}

impl MasterKind {
    /// Collection path on the backend
    pub fn endpoint(&self) -> &'static str {
        match self {
            MasterKind::Shift => "shifts",
            MasterKind::Unit => "units",
        }
    }

    /// Master list that stores definitions of the given legend category
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Task => MasterKind::Unit,
            Category::Primary | Category::Leave => MasterKind::Shift,
        }
    }
}

impl std::str::FromStr for MasterKind {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shift" | "shifts" => Ok(MasterKind::Shift),
            "unit" | "units" => Ok(MasterKind::Unit),
            other => Err(crate::error::ValidationError::InvalidFieldValue {
                field: "kind".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Borrowed view over either kind of master record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MasterRef<'a> {
    Shift(&'a MasterShift),
    Unit(&'a MasterUnit),
}

impl<'a> MasterRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            MasterRef::Shift(s) => &s.id,
            MasterRef::Unit(u) => &u.id,
        }
    }

    pub fn code(&self) -> &'a str {
        match self {
            MasterRef::Shift(s) => &s.code,
            MasterRef::Unit(u) => &u.code,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            MasterRef::Shift(s) => &s.name,
            MasterRef::Unit(u) => &u.name,
        }
    }

    /// The record's color, or `None` when the backend left it blank
    pub fn color(&self) -> Option<&'a str> {
        let color = match self {
            MasterRef::Shift(s) => s.color.as_str(),
            MasterRef::Unit(u) => u.color.as_str(),
        };
        if color.trim().is_empty() {
            None
        } else {
            Some(color)
        }
    }

    pub fn kind(&self) -> MasterKind {
        match self {
            MasterRef::Shift(_) => MasterKind::Shift,
            MasterRef::Unit(_) => MasterKind::Unit,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            MasterRef::Shift(s) => s.category(),
            MasterRef::Unit(_) => Category::Task,
        }
    }
}

impl MasterShift {
    /// Legend category, falling back to [`classify_shift`] when none is stored
    pub fn category(&self) -> Category {
        match self.category {
            Some(Category::Task) | None => classify_shift(&self.code, &self.name),
            Some(category) => category,
        }
    }

    pub fn color(&self) -> Option<&str> {
        MasterRef::Shift(self).color()
    }
}

impl MasterUnit {
    pub fn color(&self) -> Option<&str> {
        MasterRef::Unit(self).color()
    }
}

/// Codes that always denote leave
const LEAVE_CODES: &[&str] = &["OFF", "CUTI"];
/// Name fragments that denote leave
const LEAVE_NAME_MARKERS: &[&str] = &["LIBUR", "CUTI"];

/// Classify an uncategorized shift as leave or primary.
///
/// | rule                                   | result  |
/// |----------------------------------------|---------|
/// | normalized code is `OFF` or `CUTI`     | leave   |
/// | normalized name contains `LIBUR`       | leave   |
/// | normalized name contains `CUTI`        | leave   |
/// | anything else                          | primary |
pub fn classify_shift(code: &str, name: &str) -> Category {
    let code = normalize_code(code);
    let name = normalize_code(name);
    let is_leave = LEAVE_CODES.contains(&code.as_str())
        || LEAVE_NAME_MARKERS.iter().any(|marker| name.contains(marker));
    if is_leave {
        Category::Leave
    } else {
        Category::Primary
    }
}

/// One fetch generation of both master lists.
///
/// Both lists must come from the same refresh so a cell never pairs a stale
/// shift color with a fresh task color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterData {
    pub shifts: Vec<MasterShift>,
    pub units: Vec<MasterUnit>,
}

impl MasterData {
    pub fn new(shifts: Vec<MasterShift>, units: Vec<MasterUnit>) -> Self {
        Self { shifts, units }
    }

    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty() && self.units.is_empty()
    }
}
