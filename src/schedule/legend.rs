//! Legend enrichment: static definitions merged with the master lists

use serde::Serialize;

use super::codes::normalize_code;
use super::contrast::{contrast_text_color, DARK_TEXT};
use super::definitions::{definitions_in, Category, ShiftDefinition};
use super::lookup::{LookupChain, LookupKey, Source};
use super::master::{MasterKind, MasterRef, MasterShift, MasterUnit};

/// Where a legend entry's presentation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "kind", rename_all = "lowercase")]
pub enum LegendSource {
    /// Built-in definition with no master override
    Static,
    /// Backed by a master record (overriding a static entry or master-only)
    Master(MasterKind),
}

/// One row of the legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Master record id; `None` for system entries
    pub id: Option<String>,
    pub code: String,
    pub label: String,
    pub category: Category,
    /// Concrete background color; `None` keeps the static symbolic styling
    pub color: Option<String>,
    /// Symbolic class for static entries
    pub static_color: Option<&'static str>,
    pub text_color: String,
    pub source: LegendSource,
}

impl LegendEntry {
    fn from_static(def: &ShiftDefinition) -> Self {
        let background = def.background_hex();
        Self {
            id: None,
            code: def.code.to_string(),
            label: def.label.to_string(),
            category: def.category,
            color: None,
            static_color: Some(def.color),
            text_color: contrast_text_color(background).to_string(),
            source: LegendSource::Static,
        }
    }

    fn overridden(def: &ShiftDefinition, master: MasterRef<'_>) -> Self {
        let mut entry = Self::from_static(def);
        let color = master.color().map(str::to_string);
        let label = master.name();
        if !label.trim().is_empty() {
            entry.label = label.to_string();
        }
        if let Some(color) = color.as_deref() {
            entry.text_color = contrast_text_color(color).to_string();
        }
        entry.id = Some(master.id().to_string());
        entry.color = color;
        entry.source = LegendSource::Master(master.kind());
        entry
    }

    fn from_master(master: MasterRef<'_>, category: Category) -> Self {
        let color = master.color().map(str::to_string);
        Self {
            id: Some(master.id().to_string()),
            code: master.code().to_string(),
            label: master.name().to_string(),
            category,
            text_color: color
                .as_deref()
                .map(contrast_text_color)
                .unwrap_or(DARK_TEXT)
                .to_string(),
            color,
            static_color: None,
            source: LegendSource::Master(master.kind()),
        }
    }

    /// Whether this entry came from the backend (editable and deletable)
    pub fn is_from_db(&self) -> bool {
        matches!(self.source, LegendSource::Master(_))
    }

    pub fn master_kind(&self) -> Option<MasterKind> {
        match self.source {
            LegendSource::Master(kind) => Some(kind),
            LegendSource::Static => None,
        }
    }

    /// Background to draw the badge with
    pub fn background_hex(&self) -> String {
        match (&self.color, self.static_color) {
            (Some(color), _) => color.clone(),
            (None, Some(class)) => super::definitions::symbolic_to_hex(class).to_string(),
            (None, None) => super::definitions::DEFAULT_BACKGROUND.to_string(),
        }
    }

    fn represents(&self, code: &str, label: &str) -> bool {
        normalize_code(&self.code) == normalize_code(code)
            || normalize_code(&self.label) == normalize_code(label)
    }
}

/// Build the legend for one category.
///
/// Static entries come first (overridden by the first unit, then shift, that
/// matches by code, backend code or label), followed by master-only records
/// in list order. A master record already represented by code or label is
/// skipped, so no two entries share a normalized (code, label) pair.
pub fn enrich_legend(
    category: Category,
    shifts: &[MasterShift],
    units: &[MasterUnit],
) -> Vec<LegendEntry> {
    let mut enriched: Vec<LegendEntry> = definitions_in(category)
        .map(|def| {
            let key = LookupKey::definition(def);
            let found = LookupChain::new()
                .then(Source::Units(units), key.clone())
                .then(Source::Shifts(shifts), key)
                .first_match()
                .and_then(|found| found.as_master());
            match found {
                Some(master) => LegendEntry::overridden(def, master),
                None => LegendEntry::from_static(def),
            }
        })
        .collect();

    let candidates: Vec<MasterRef<'_>> = match category {
        Category::Task => units.iter().map(MasterRef::Unit).collect(),
        Category::Primary | Category::Leave => shifts
            .iter()
            .filter(|s| s.category() == category)
            .map(MasterRef::Shift)
            .collect(),
    };

    for master in candidates {
        let already_in = enriched
            .iter()
            .any(|entry| entry.represents(master.code(), master.name()));
        if !already_in {
            enriched.push(LegendEntry::from_master(master, category));
        }
    }

    tracing::trace!(
        category = %category,
        entries = enriched.len(),
        "legend enriched"
    );

    enriched
}

/// Legend sections in display order
pub fn enrich_all(
    shifts: &[MasterShift],
    units: &[MasterUnit],
) -> Vec<(Category, Vec<LegendEntry>)> {
    Category::all()
        .into_iter()
        .map(|category| (category, enrich_legend(category, shifts, units)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn shift(id: &str, code: &str, name: &str, color: &str) -> MasterShift {
        MasterShift {
            id: id.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            start_time: Some("00:00".to_string()),
            end_time: Some("00:00".to_string()),
            is_active: true,
            category: None,
        }
    }

    fn unit(id: &str, code: &str, name: &str, color: &str) -> MasterUnit {
        MasterUnit {
            id: id.to_string(),
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    fn assert_unique(entries: &[LegendEntry]) {
        let mut seen = HashSet::new();
        for e in entries {
            let key = (normalize_code(&e.code), normalize_code(&e.label));
            assert!(seen.insert(key.clone()), "duplicate entry {:?}", key);
        }
    }

    #[test]
    fn test_static_only_primary() {
        let entries = enrich_legend(Category::Primary, &[], &[]);
        let codes: Vec<_> = entries.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["P", "S", "M"]);
        assert!(entries.iter().all(|e| !e.is_from_db() && e.id.is_none()));
        assert_eq!(entries[2].background_hex(), "#4f46e5");
    }

    #[test]
    fn test_task_with_single_unit() {
        let units = vec![unit("9", "QCSP", "QC Pengemasan Single Use", "#facc15")];
        let entries = enrich_legend(Category::Task, &[], &units);
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.id.as_deref(), Some("9"));
        assert_eq!(e.code, "QCSP");
        assert_eq!(e.label, "QC Pengemasan Single Use");
        assert_eq!(e.color.as_deref(), Some("#facc15"));
        assert_eq!(e.text_color, contrast_text_color("#facc15"));
        assert_eq!(e.source, LegendSource::Master(MasterKind::Unit));
    }

    #[test]
    fn test_backend_code_overrides_static() {
        let shifts = vec![
            shift("1", "PAGI", "Dinas Pagi", "#ffffff"),
            shift("2", "SIANG", "Dinas Sore Baru", "#3b82f6"),
        ];
        let entries = enrich_legend(Category::Primary, &shifts, &[]);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].code, "P");
        assert_eq!(entries[0].id.as_deref(), Some("1"));
        assert_eq!(entries[1].label, "Dinas Sore Baru");
        assert_eq!(entries[1].color.as_deref(), Some("#3b82f6"));
        assert_eq!(entries[1].source, LegendSource::Master(MasterKind::Shift));
        assert_eq!(entries[2].source, LegendSource::Static);
    }

    #[test]
    fn test_units_checked_before_shifts() {
        let shifts = vec![shift("1", "PAGI", "Dinas Pagi", "#ffffff")];
        let units = vec![unit("u1", "P", "Pencucian Pagi", "#22d3ee")];
        let entries = enrich_legend(Category::Primary, &shifts, &units);
        assert_eq!(entries[0].source, LegendSource::Master(MasterKind::Unit));
        assert_eq!(entries[0].label, "Pencucian Pagi");
        // PAGI is not represented by code or label any more, so it is appended
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3].code, "PAGI");
        assert_unique(&entries);
    }

    #[test]
    fn test_leave_classification_and_appending() {
        let shifts = vec![
            shift("1", "PAGI", "Dinas Pagi", "#ffffff"),
            shift("2", "OFF", "Libur", "#ef4444"),
            shift("3", "CUTI", "Cuti", "#fde047"),
            shift("4", "SKT", "Cuti Sakit", "#fb923c"),
            shift("5", "SM", "Sore Malam", "#4c1d95"),
        ];
        let leave = enrich_legend(Category::Leave, &shifts, &[]);
        let codes: Vec<_> = leave.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["L", "C", "SKT"]);
        assert_eq!(leave[0].id.as_deref(), Some("2"));

        let primary = enrich_legend(Category::Primary, &shifts, &[]);
        let codes: Vec<_> = primary.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["P", "S", "M", "SM"]);
    }

    #[test]
    fn test_aliasing_lists_never_duplicate() {
        let shifts = vec![
            shift("1", "P", "Dinas Pagi", "#ffffff"),
            shift("2", "pagi", "dinas pagi", "#eeeeee"),
            shift("3", " PAGI ", "Pagi Lain", "#dddddd"),
            shift("4", "X", "Dinas Pagi", "#cccccc"),
            shift("5", "LB", "Libur", "#ef4444"),
            shift("6", "OFF", "Off", "#ef4444"),
        ];
        let units = vec![
            unit("a", "ST", "Steril", "#10b981"),
            unit("b", "st", "Steril", "#10b981"),
            unit("c", "DS", "steril", "#a855f7"),
        ];
        for category in Category::all() {
            assert_unique(&enrich_legend(category, &shifts, &units));
        }
        assert_eq!(enrich_legend(Category::Task, &shifts, &units).len(), 1);
    }

    #[test]
    fn test_enrich_all_sections() {
        let sections = enrich_all(&[], &[]);
        let cats: Vec<_> = sections.iter().map(|(c, _)| *c).collect();
        assert_eq!(cats, vec![Category::Primary, Category::Task, Category::Leave]);
        assert!(sections[1].1.is_empty());
    }
}
