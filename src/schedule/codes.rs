//! Shift and task code normalization
//!
//! Grid cells use terse single-letter codes while the backend stores full
//! words. Every comparison between a record code and a master or static code
//! goes through [`normalize_code`] and, for shifts, [`to_backend_code`].

/// Short code to backend-canonical code. Keys are already normalized.
static BACKEND_CODE_MAP: &[(&str, &str)] = &[
    ("P", "PAGI"),
    ("S", "SIANG"),
    ("M", "MALAM"),
    ("L", "OFF"),
    ("OFF", "OFF"),
    ("C", "CUTI"),
    ("CUTI", "CUTI"),
    ("LB", "OFF"),
];

/// Backend-canonical code to the short code shown in the grid
static SHORT_CODE_MAP: &[(&str, &str)] = &[
    ("PAGI", "P"),
    ("SIANG", "S"),
    ("MALAM", "M"),
    ("OFF", "L"),
    ("CUTI", "C"),
];

/// Canonicalize a code for comparison: trim surrounding whitespace and uppercase.
///
/// Empty input yields an empty string.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Like [`normalize_code`] but passes a missing code through as missing
pub fn normalize_optional(code: Option<&str>) -> Option<String> {
    code.map(normalize_code)
}

/// Look up the backend-canonical form of a code without falling back
pub fn backend_code_for(code: &str) -> Option<&'static str> {
    let normalized = normalize_code(code);
    BACKEND_CODE_MAP
        .iter()
        .find(|(short, _)| *short == normalized)
        .map(|(_, canonical)| *canonical)
}

/// Translate a short display code into its backend-canonical form.
///
/// Unmapped codes are treated as already canonical and returned normalized.
pub fn to_backend_code(code: &str) -> String {
    match backend_code_for(code) {
        Some(canonical) => canonical.to_string(),
        None => normalize_code(code),
    }
}

/// Translate a backend-canonical code into the short grid code.
///
/// Codes with no short form are returned normalized.
pub fn to_short_code(code: &str) -> String {
    let normalized = normalize_code(code);
    SHORT_CODE_MAP
        .iter()
        .find(|(canonical, _)| *canonical == normalized)
        .map(|(_, short)| short.to_string())
        .unwrap_or(normalized)
}

/// True when two shift codes refer to the same shift, in either notation
pub fn codes_match(a: &str, b: &str) -> bool {
    let a = normalize_code(a);
    let b = normalize_code(b);
    if a.is_empty() || b.is_empty() {
        return a == b;
    }
    a == b || to_backend_code(&a) == to_backend_code(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code("  p "), "P");
        assert_eq!(normalize_code("pagi"), "PAGI");
        assert_eq!(normalize_code(""), "");
        assert_eq!(normalize_code("   "), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["", " st ", "Ps/s", "\tcuti\n", "dsk", "ÄbC"] {
            let once = normalize_code(input);
            assert_eq!(normalize_code(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_normalize_optional_passes_none() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some(" m ")), Some("M".to_string()));
    }

    #[test]
    fn test_to_backend_code() {
        assert_eq!(to_backend_code("P"), "PAGI");
        assert_eq!(to_backend_code(" s"), "SIANG");
        assert_eq!(to_backend_code("m"), "MALAM");
        assert_eq!(to_backend_code("L"), "OFF");
        assert_eq!(to_backend_code("LB"), "OFF");
        assert_eq!(to_backend_code("C"), "CUTI");
        assert_eq!(to_backend_code("ST"), "ST");
    }

    #[test]
    fn test_to_backend_code_is_stable() {
        for code in ["P", "S", "M", "L", "LB", "C", "OFF", "CUTI", "PAGI", "ST", "", "ps/s"] {
            let once = to_backend_code(code);
            assert_eq!(to_backend_code(&once), once, "code {:?}", code);
        }
    }

    #[test]
    fn test_to_short_code() {
        assert_eq!(to_short_code("pagi"), "P");
        assert_eq!(to_short_code("OFF"), "L");
        assert_eq!(to_short_code("ST"), "ST");
    }

    #[test]
    fn test_codes_match_both_directions() {
        assert!(codes_match("P", "PAGI"));
        assert!(codes_match("pagi", "p"));
        assert!(codes_match("LB", "L"));
        assert!(!codes_match("P", "SIANG"));
        assert!(!codes_match("", "P"));
        assert!(codes_match("", ""));
    }
}
