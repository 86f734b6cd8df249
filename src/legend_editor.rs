//! Create, update and delete legend entries on the backend

use crate::api::{MasterPayload, RosterBackend};
use crate::error::{LegendError, Result, ValidationError};
use crate::schedule::contrast::parse_hex_rgb;
use crate::schedule::{Category, LegendEntry, MasterKind};

pub const PRESET_COLORS: [&str; 17] = [
    "#ffffff", "#000000", "#f87171", "#fb923c", "#facc15", "#a3e635", "#4ade80", "#2dd4bf",
    "#22d3ee", "#38bdf8", "#60a5fa", "#818cf8", "#a78bfa", "#c084fc", "#e879f9", "#f472b6",
    "#fb7185",
];

/// Color preselected for a new symbol
pub const NEW_SYMBOL_COLOR: &str = "#6366f1";
/// Color preselected when the edited entry has no concrete color
pub const EDIT_FALLBACK_COLOR: &str = "#3B82F6";

pub const MAX_CODE_LEN: usize = 4;

/// Form fields for adding or editing a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendForm {
    pub code: String,
    pub name: String,
    pub color: String,
}

impl Default for LegendForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            color: NEW_SYMBOL_COLOR.to_string(),
        }
    }
}

impl LegendForm {
    pub fn new(code: &str, name: &str, color: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Prefill from an existing entry
    pub fn from_entry(entry: &LegendEntry) -> Self {
        Self {
            code: entry.code.clone(),
            name: entry.label.clone(),
            color: entry
                .color
                .clone()
                .unwrap_or_else(|| EDIT_FALLBACK_COLOR.to_string()),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let code_len = self.code.trim().chars().count();
        if code_len == 0 || code_len > MAX_CODE_LEN {
            return Err(ValidationError::InvalidCode(self.code.clone()));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()));
        }
        let color = self.color.trim();
        if !color.starts_with('#') || parse_hex_rgb(color).is_none() {
            return Err(ValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

/// Validated request body for a category's master list
pub fn build_payload(
    category: Category,
    form: &LegendForm,
) -> std::result::Result<MasterPayload, ValidationError> {
    form.validate()?;
    Ok(MasterPayload::new(category, &form.code, &form.name, &form.color))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Created => "Berhasil ditambahkan",
            SaveOutcome::Updated => "Berhasil diperbarui",
        }
    }
}

pub const DELETED_MESSAGE: &str = "Berhasil dihapus";

/// Confirmation question before deleting an entry
pub fn delete_prompt(entry: &LegendEntry) -> String {
    format!("Hapus {}?", entry.label)
}

/// Legend writes, gated on the user's edit permission
pub struct LegendEditor<'a> {
    backend: &'a dyn RosterBackend,
    can_edit: bool,
}

impl<'a> LegendEditor<'a> {
    pub fn new(backend: &'a dyn RosterBackend, can_edit: bool) -> Self {
        Self { backend, can_edit }
    }

    /// Update `editing` when it has a backend id, otherwise create a new record.
    ///
    /// The target list follows the category: units for tasks, shifts otherwise.
    pub async fn save(
        &self,
        category: Category,
        editing: Option<&LegendEntry>,
        form: &LegendForm,
    ) -> Result<SaveOutcome> {
        if !self.can_edit {
            return Err(LegendError::NotAllowed.into());
        }
        let payload = build_payload(category, form)?;
        let kind = MasterKind::for_category(category);

        let editing_id = editing
            .and_then(|entry| entry.id.as_deref())
            .filter(|id| !id.is_empty());
        let outcome = match editing_id {
            Some(id) => {
                tracing::info!(
                    kind = kind.endpoint(),
                    id,
                    code = %payload.code,
                    "updating legend entry"
                );
                self.backend
                    .update_master(kind, id, &payload)
                    .await
                    .map_err(|e| LegendError::SaveFailed(e.to_string()))?;
                SaveOutcome::Updated
            }
            None => {
                tracing::info!(
                    kind = kind.endpoint(),
                    code = %payload.code,
                    "creating legend entry"
                );
                self.backend
                    .create_master(kind, &payload)
                    .await
                    .map_err(|e| LegendError::SaveFailed(e.to_string()))?;
                SaveOutcome::Created
            }
        };
        Ok(outcome)
    }

    /// Delete a backend-owned entry. System entries have no id and are refused
    /// before any request is made.
    pub async fn delete(&self, entry: &LegendEntry) -> Result<()> {
        if !self.can_edit {
            return Err(LegendError::NotAllowed.into());
        }
        let id = match entry.id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => return Err(LegendError::SystemEntry.into()),
        };
        let kind = match entry.master_kind() {
            Some(MasterKind::Unit) => MasterKind::Unit,
            _ => MasterKind::Shift,
        };

        tracing::info!(kind = kind.endpoint(), id, "deleting legend entry");
        self.backend
            .delete_master(kind, id)
            .await
            .map_err(|e| LegendError::DeleteFailed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_validation() {
        assert!(LegendForm::new("ST", "Ruang Steril", "#10b981").validate().is_ok());
        assert!(matches!(
            LegendForm::new("", "x", "#ffffff").validate(),
            Err(ValidationError::InvalidCode(_))
        ));
        assert!(matches!(
            LegendForm::new("ABCDE", "x", "#ffffff").validate(),
            Err(ValidationError::InvalidCode(_))
        ));
        assert!(matches!(
            LegendForm::new("AB", "  ", "#ffffff").validate(),
            Err(ValidationError::MissingField(_))
        ));
        assert!(matches!(
            LegendForm::new("AB", "x", "ffffff").validate(),
            Err(ValidationError::InvalidColor(_))
        ));
        assert!(matches!(
            LegendForm::new("AB", "x", "#fff").validate(),
            Err(ValidationError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_default_form_color() {
        assert_eq!(LegendForm::default().color, NEW_SYMBOL_COLOR);
        assert!(PRESET_COLORS.iter().all(|c| parse_hex_rgb(c).is_some()));
    }

    #[test]
    fn test_build_payload_uppercases_code() {
        let form = LegendForm::new("pk", "Packing Steril", "#a3e635");
        let payload = build_payload(Category::Task, &form).unwrap();
        assert_eq!(payload.code, "PK");
        assert_eq!(payload.start_time, None);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(SaveOutcome::Created.message(), "Berhasil ditambahkan");
        assert_eq!(SaveOutcome::Updated.message(), "Berhasil diperbarui");
    }
}
