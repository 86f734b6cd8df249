//! Ordered lookup over the unit list, the shift list and the static table
//!
//! A [`LookupChain`] is a list of steps, each pairing a source with the key
//! to search it by. Steps are tried left to right and the first step that
//! finds something wins.

use super::codes::{backend_code_for, normalize_code, to_backend_code, to_short_code};
use super::definitions::{lookup_definition, ShiftDefinition};
use super::master::{MasterRef, MasterShift, MasterUnit};

/// What a lookup step searches for. All fields are normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupKey {
    code: String,
    alt_code: Option<String>,
    label: Option<String>,
}

impl LookupKey {
    /// Match on the code only
    pub fn code(code: &str) -> Self {
        Self {
            code: normalize_code(code),
            alt_code: None,
            label: None,
        }
    }

    /// Match on the code or its backend-canonical form
    pub fn shift(code: &str) -> Self {
        Self {
            code: normalize_code(code),
            alt_code: backend_code_for(code).map(str::to_string),
            label: None,
        }
    }

    /// Match on the code, its backend form, or the definition's label
    pub fn definition(def: &ShiftDefinition) -> Self {
        Self {
            code: normalize_code(def.code),
            alt_code: backend_code_for(def.code).map(str::to_string),
            label: Some(normalize_code(def.label)).filter(|l| !l.is_empty()),
        }
    }

    pub fn normalized_code(&self) -> &str {
        &self.code
    }

    fn matches(&self, code: &str, name: &str) -> bool {
        let code = normalize_code(code);
        if !code.is_empty() {
            if code == self.code {
                return true;
            }
            if self.alt_code.as_deref() == Some(code.as_str()) {
                return true;
            }
        }
        match &self.label {
            Some(label) => normalize_code(name) == *label,
            None => false,
        }
    }
}

/// Result of a successful lookup step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Found<'a> {
    Master(MasterRef<'a>),
    Static(&'static ShiftDefinition),
}

impl<'a> Found<'a> {
    /// Display name (master name or static label)
    pub fn label(&self) -> &'a str {
        match self {
            Found::Master(m) => m.name(),
            Found::Static(def) => def.label,
        }
    }

    /// Concrete background color, if the source has one
    pub fn color(&self) -> Option<&'a str> {
        match self {
            Found::Master(m) => m.color(),
            Found::Static(def) => Some(def.background_hex()),
        }
    }

    pub fn as_master(&self) -> Option<MasterRef<'a>> {
        match self {
            Found::Master(m) => Some(*m),
            Found::Static(_) => None,
        }
    }
}

/// Where a lookup step searches
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Units(&'a [MasterUnit]),
    Shifts(&'a [MasterShift]),
    Static,
}

impl<'a> Source<'a> {
    fn find(&self, key: &LookupKey) -> Option<Found<'a>> {
        match self {
            Source::Units(units) => units
                .iter()
                .find(|u| key.matches(&u.code, &u.name))
                .map(|u| Found::Master(MasterRef::Unit(u))),
            Source::Shifts(shifts) => shifts
                .iter()
                .find(|s| key.matches(&s.code, &s.name))
                .map(|s| Found::Master(MasterRef::Shift(s))),
            // The static table is keyed by short codes. Aliases such as LB
            // go through their canonical form first.
            Source::Static => {
                if key.code.is_empty() {
                    None
                } else {
                    let short = to_short_code(&to_backend_code(&key.code));
                    lookup_definition(&key.code)
                        .or_else(|| lookup_definition(&short))
                        .map(Found::Static)
                }
            }
        }
    }
}

/// Left-to-right, first-match-wins composition of lookup steps
#[derive(Debug, Clone, Default)]
pub struct LookupChain<'a> {
    steps: Vec<(Source<'a>, LookupKey)>,
}

impl<'a> LookupChain<'a> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step
    pub fn then(mut self, source: Source<'a>, key: LookupKey) -> Self {
        self.steps.push((source, key));
        self
    }

    /// First hit across all steps
    pub fn first_match(&self) -> Option<Found<'a>> {
        self.steps.iter().find_map(|(source, key)| source.find(key))
    }

    /// First hit for which `select` yields a value.
    ///
    /// A step that finds a record but yields nothing falls through to the
    /// next step.
    pub fn first_with<T>(&self, select: impl Fn(&Found<'a>) -> Option<T>) -> Option<T> {
        self.steps
            .iter()
            .filter_map(|(source, key)| source.find(key))
            .find_map(|found| select(&found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(code: &str, name: &str, color: &str) -> MasterUnit {
        MasterUnit {
            id: code.to_lowercase(),
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    fn shift(code: &str, name: &str, color: &str) -> MasterShift {
        MasterShift {
            id: code.to_lowercase(),
            code: code.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            start_time: None,
            end_time: None,
            is_active: true,
            category: None,
        }
    }

    #[test]
    fn test_shift_key_matches_backend_form() {
        let shifts = vec![shift("PAGI", "Dinas Pagi", "#ffffff")];
        let found = LookupChain::new()
            .then(Source::Shifts(&shifts), LookupKey::shift("p"))
            .first_match();
        assert_eq!(found.map(|f| f.label()), Some("Dinas Pagi"));
    }

    #[test]
    fn test_code_key_ignores_backend_form() {
        let shifts = vec![shift("PAGI", "Dinas Pagi", "#ffffff")];
        let found = LookupChain::new()
            .then(Source::Shifts(&shifts), LookupKey::code("P"))
            .first_match();
        assert!(found.is_none());
    }

    #[test]
    fn test_static_source_resolves_aliases() {
        for code in ["L", "OFF", "lb"] {
            let found = LookupChain::new()
                .then(Source::Static, LookupKey::shift(code))
                .first_match();
            assert_eq!(found.map(|f| f.label()), Some("Libur"), "code {}", code);
        }
    }

    #[test]
    fn test_empty_code_never_matches_blank_record() {
        let units = vec![unit("", "Tanpa Kode", "#000000")];
        let found = LookupChain::new()
            .then(Source::Units(&units), LookupKey::code(""))
            .then(Source::Static, LookupKey::code(""))
            .first_match();
        assert!(found.is_none());
    }

    #[test]
    fn test_first_step_wins() {
        let units = vec![unit("P", "Unit P", "#10b981")];
        let shifts = vec![shift("PAGI", "Dinas Pagi", "#ffffff")];
        let found = LookupChain::new()
            .then(Source::Units(&units), LookupKey::shift("P"))
            .then(Source::Shifts(&shifts), LookupKey::shift("P"))
            .first_match();
        assert_eq!(found.map(|f| f.label()), Some("Unit P"));
    }

    #[test]
    fn test_definition_key_matches_label() {
        let shifts = vec![shift("DP", " dinas pagi ", "#abcdef")];
        let def = lookup_definition("P").unwrap();
        let found = LookupChain::new()
            .then(Source::Shifts(&shifts), LookupKey::definition(def))
            .first_match();
        assert_eq!(found.and_then(|f| f.color()), Some("#abcdef"));
    }

    #[test]
    fn test_first_with_falls_through_blank_color() {
        let shifts = vec![shift("SIANG", "Dinas Sore", "")];
        let color = LookupChain::new()
            .then(Source::Shifts(&shifts), LookupKey::shift("S"))
            .then(Source::Static, LookupKey::shift("S"))
            .first_with(|f| f.color());
        assert_eq!(color, Some("#dbeafe"));
    }
}
