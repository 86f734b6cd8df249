use anyhow::{anyhow, Result};

use crate::api::RosterBackend;
use crate::config::Config;
use crate::legend_editor::{build_payload, LegendEditor, LegendForm};
use crate::schedule::{enrich_legend, Category, LegendEntry};
use crate::utils::confirm;

/// Fields given on the command line; missing ones keep the edited entry's values
#[derive(Debug, Clone, Default)]
pub struct SymbolArgs {
    pub code: Option<String>,
    pub name: Option<String>,
    pub color: Option<String>,
}

impl SymbolArgs {
    fn merge_into(self, mut form: LegendForm) -> LegendForm {
        if let Some(code) = self.code {
            form.code = code;
        }
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(color) = self.color {
            form.color = color;
        }
        form
    }
}

pub async fn handle_add_symbol_command(
    backend: &dyn RosterBackend,
    config: &Config,
    category: Category,
    args: SymbolArgs,
    yes: bool,
) -> Result<()> {
    let form = args.merge_into(LegendForm::default());
    save_symbol(backend, config, category, None, form, yes).await
}

pub async fn handle_edit_symbol_command(
    backend: &dyn RosterBackend,
    config: &Config,
    category: Category,
    id: &str,
    args: SymbolArgs,
    yes: bool,
) -> Result<()> {
    let master = backend.fetch_master_data().await?;
    let entries = enrich_legend(category, &master.shifts, &master.units);
    let editing = find_by_id(&entries, id)
        .ok_or_else(|| anyhow!("No {} symbol with id '{}'", category, id))?
        .clone();

    let form = args.merge_into(LegendForm::from_entry(&editing));
    save_symbol(backend, config, category, Some(&editing), form, yes).await
}

async fn save_symbol(
    backend: &dyn RosterBackend,
    config: &Config,
    category: Category,
    editing: Option<&LegendEntry>,
    form: LegendForm,
    yes: bool,
) -> Result<()> {
    let payload = build_payload(category, &form)?;

    let title = if editing.is_some() {
        "Edit Simbol"
    } else {
        "Tambah Simbol Baru"
    };
    println!("\n=== {} ===", title);
    println!("Kategori: {}", category.title());
    println!("Kode:     {}", payload.code);
    println!("Nama:     {}", payload.name);
    println!("Warna:    {}", payload.color);
    if let Some(entry) = editing {
        println!("ID:       {}", entry.id.as_deref().unwrap_or("-"));
    }

    if !yes && !confirm("\nSimpan perubahan ini?")? {
        println!("Dibatalkan.");
        return Ok(());
    }

    let editor = LegendEditor::new(backend, config.can_edit);
    let outcome = editor.save(category, editing, &form).await?;
    println!("{}", outcome.message());
    Ok(())
}

pub(crate) fn find_by_id<'a>(entries: &'a [LegendEntry], id: &str) -> Option<&'a LegendEntry> {
    entries
        .iter()
        .find(|entry| entry.id.as_deref().map(str::trim) == Some(id.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::MasterUnit;

    #[test]
    fn test_merge_keeps_missing_fields() {
        let args = SymbolArgs {
            name: Some("Packing".to_string()),
            ..Default::default()
        };
        let form = args.merge_into(LegendForm::new("PK", "Pack", "#a3e635"));
        assert_eq!(form, LegendForm::new("PK", "Packing", "#a3e635"));
    }

    #[test]
    fn test_find_by_id() {
        let units = vec![MasterUnit {
            id: "9".to_string(),
            code: "PK".to_string(),
            name: "Packing".to_string(),
            color: "#a3e635".to_string(),
        }];
        let entries = enrich_legend(Category::Task, &[], &units);
        assert_eq!(find_by_id(&entries, "9").unwrap().code, "PK");
        assert!(find_by_id(&entries, "10").is_none());
    }
}
