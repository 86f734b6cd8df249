use anyhow::{anyhow, Result};

use crate::add::find_by_id;
use crate::api::RosterBackend;
use crate::config::Config;
use crate::error::LegendError;
use crate::legend_editor::{delete_prompt, LegendEditor, DELETED_MESSAGE};
use crate::schedule::{codes_match, enrich_all, LegendEntry, MasterKind};
use crate::utils::confirm;

/// Delete a symbol by backend id, or by code to find out that it is a system symbol
pub async fn handle_delete_symbol_command(
    backend: &dyn RosterBackend,
    config: &Config,
    kind: MasterKind,
    id: Option<String>,
    code: Option<String>,
    yes: bool,
) -> Result<()> {
    let master = backend.fetch_master_data().await?;
    let entries: Vec<LegendEntry> = enrich_all(&master.shifts, &master.units)
        .into_iter()
        .flat_map(|(_, entries)| entries)
        .collect();

    let entry = match (id.as_deref(), code.as_deref()) {
        (Some(id), _) => find_by_id(&entries, id)
            .filter(|entry| entry.master_kind() == Some(kind))
            .ok_or_else(|| anyhow!("No {} with id '{}'", kind.endpoint(), id))?,
        (None, Some(code)) => entries
            .iter()
            .find(|entry| codes_match(&entry.code, code))
            .ok_or_else(|| anyhow!("No symbol with code '{}'", code))?,
        (None, None) => return Err(LegendError::SystemEntry.into()),
    };

    println!("\n=== Hapus Simbol ===");
    println!("Kode: {}", entry.code);
    println!("Nama: {}", entry.label);
    println!("ID:   {}", entry.id.as_deref().unwrap_or("-"));

    // System symbols are refused before asking anything
    if entry.id.is_none() {
        return Err(LegendError::SystemEntry.into());
    }

    if !yes && !confirm(&delete_prompt(entry))? {
        println!("Dibatalkan.");
        return Ok(());
    }

    let editor = LegendEditor::new(backend, config.can_edit);
    editor.delete(entry).await?;
    println!("{}", DELETED_MESSAGE);
    Ok(())
}
