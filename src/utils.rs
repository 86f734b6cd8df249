use anyhow::{anyhow, Result};
use chrono::prelude::*;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Utility functions for the roster application

// ===== STRING UTILITIES =====

/// Masks an access token for safe display (shows first 4 characters, masks the rest)
pub fn mask_token(token: &str) -> String {
    let visible: String = token.chars().take(4).collect();
    let hidden = token.chars().count().saturating_sub(4);
    if hidden == 0 {
        "*".repeat(visible.chars().count())
    } else {
        format!("{}{}", visible, "*".repeat(hidden))
    }
}

/// Truncates a string to a display width, adding "..." if truncated
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    format!("{}...", out)
}

/// Pads a string with spaces to a display width
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = s.width();
    if current >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - current))
    }
}

// ===== DATE/TIME UTILITIES =====

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve optional 1-based month and year arguments into (year, zero-based month),
/// defaulting to the current month
pub fn resolve_month(month: Option<u32>, year: Option<i32>) -> Result<(i32, u32)> {
    let now = today();
    let month = match month {
        Some(m) => crate::calendar::month_index(m)?,
        None => now.month0(),
    };
    Ok((year.unwrap_or_else(|| now.year()), month))
}

/// Parse a `YYYY-MM-DD` argument, defaulting to today
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => Ok(crate::calendar::parse_date_key(d)?),
        None => Ok(today()),
    }
}

/// Indonesian month names, January first
pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
        "Oktober", "November", "Desember",
    ];
    NAMES.get(month as usize).copied().unwrap_or("")
}

// ===== FORMATTING UTILITIES =====

/// Formats a number of hours as `7.5 jam`
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:.0} jam", hours)
    } else {
        format!("{:.1} jam", hours)
    }
}

// ===== PROMPT UTILITIES =====

/// Ask a y/N question on stdin. Anything but `y` or `yes` declines.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} (y/N) ", question);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|e| anyhow!("Failed to read confirmation: {}", e))?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
