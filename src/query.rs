use anyhow::Result;
use chrono::{Datelike, NaiveDate};

use crate::api::RosterBackend;
use crate::calendar::HolidayCalendar;
use crate::config::Config;
use crate::roster::{DayCursor, DayList, MonthGrid, RosterBook, Viewer};
use crate::schedule::{calculate_shift_hours, enrich_all, enrich_legend, Background, Category};
use crate::utils::{format_hours, month_name, pad_to_width, today, truncate_string};

const NAME_WIDTH: usize = 24;
const NIP_WIDTH: usize = 20;
const DAY_WIDTH: usize = 4;

/// Print the month grid
pub async fn handle_grid_command(
    backend: &dyn RosterBackend,
    config: &Config,
    holidays: &dyn HolidayCalendar,
    year: i32,
    month: u32,
) -> Result<()> {
    let (master, employees, entries) = tokio::try_join!(
        backend.fetch_master_data(),
        backend.fetch_employees(),
        backend.fetch_schedules(year, month),
    )?;
    let book = RosterBook::from_entries(entries);
    let viewer = Viewer::new(config.can_edit, config.user_nip.as_deref());
    let grid = MonthGrid::build(year, month, &employees, &book, &master, holidays, &viewer);

    println!("\n=== Jadwal Dinas {} {} ===", month_name(month), year);
    if let Some(message) = grid.empty_message() {
        println!("{}", message);
        return Ok(());
    }

    print!(
        "{:>3} {} {}",
        "No",
        pad_to_width("Nama Pegawai", NAME_WIDTH),
        pad_to_width("NIP", NIP_WIDTH)
    );
    for header in &grid.headers {
        let sep = if header.is_monday { "|" } else { " " };
        let mark = if header.is_red() { "*" } else { "" };
        let label = format!("{}{}", mark, header.day);
        print!("{}{:>width$}", sep, label, width = DAY_WIDTH - 1);
    }
    println!();

    for row in &grid.rows {
        let me = if row.is_me { ">" } else { " " };
        print!(
            "{:>2}{} {} {}",
            row.index,
            me,
            pad_to_width(&truncate_string(&row.employee.name, NAME_WIDTH), NAME_WIDTH),
            pad_to_width(&row.employee.employee_id, NIP_WIDTH)
        );
        for (cell, header) in row.cells.iter().zip(&grid.headers) {
            let sep = if header.is_monday { "|" } else { " " };
            let code = cell
                .resolved
                .as_ref()
                .map(|r| r.display_code.as_str())
                .unwrap_or("");
            let code = truncate_string(code, DAY_WIDTH - 1);
            print!("{}{:>width$}", sep, code, width = DAY_WIDTH - 1);
        }
        println!();
    }

    let holiday_lines: Vec<String> = grid
        .headers
        .iter()
        .filter_map(|h| h.holiday.as_ref().map(|name| format!("  {:>2}: {}", h.day, name)))
        .collect();
    println!("\n* akhir pekan atau hari libur, | awal minggu");
    if !holiday_lines.is_empty() {
        println!("Hari libur:");
        for line in holiday_lines {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Print every employee's assignment for one day
pub async fn handle_day_command(
    backend: &dyn RosterBackend,
    config: &Config,
    date: NaiveDate,
) -> Result<()> {
    let (year, month) = (date.year(), date.month0());
    let (master, employees, entries) = tokio::try_join!(
        backend.fetch_master_data(),
        backend.fetch_employees(),
        backend.fetch_schedules(year, month),
    )?;
    let book = RosterBook::from_entries(entries);
    let viewer = Viewer::new(config.can_edit, config.user_nip.as_deref());

    let mut cursor = DayCursor::new(year, month, today());
    cursor.select(date.day());
    let list = DayList::build(&cursor, &employees, &book, &master, &viewer);

    let badge = if list.is_today {
        format!(" [{}]", crate::roster::day_list::TODAY_BADGE)
    } else {
        String::new()
    };
    println!(
        "\n=== {} {} {} {}{} ===",
        list.day_name,
        list.day,
        month_name(month),
        year,
        badge
    );

    if let Some(message) = list.empty_message() {
        println!("{}", message);
        return Ok(());
    }

    for entry in &list.entries {
        let me = if entry.is_me { ">" } else { " " };
        let split = if matches!(entry.background, Background::Split { .. }) {
            "+"
        } else {
            " "
        };
        let hours = if entry.hours > 0.0 {
            format_hours(entry.hours)
        } else {
            String::new()
        };
        println!(
            "{} {} {} {:<4}{} {} {}",
            me,
            pad_to_width(&truncate_string(&entry.employee.name, NAME_WIDTH), NAME_WIDTH),
            pad_to_width(&entry.employee.employee_id, NIP_WIDTH),
            entry.code,
            split,
            pad_to_width(&truncate_string(entry.label.as_deref().unwrap_or(""), 28), 28),
            hours
        );
    }

    Ok(())
}

/// Print the enriched legend, one section per category
pub async fn handle_legend_command(
    backend: &dyn RosterBackend,
    category: Option<Category>,
    verbose: bool,
) -> Result<()> {
    let master = backend.fetch_master_data().await?;
    let sections = match category {
        Some(category) => vec![(
            category,
            enrich_legend(category, &master.shifts, &master.units),
        )],
        None => enrich_all(&master.shifts, &master.units),
    };

    println!("\n=== Panduan Simbol ===");
    for (category, entries) in sections {
        println!("\n{}", category.title());
        for entry in entries {
            let source = if entry.is_from_db() { "" } else { " (sistem)" };
            print!(
                "  {:<5} {} {}",
                entry.code,
                pad_to_width(&entry.label, 32),
                entry.background_hex()
            );
            if verbose {
                print!(
                    "  teks {}  id {}",
                    entry.text_color,
                    entry.id.as_deref().unwrap_or("-")
                );
            }
            println!("{}", source);
        }
    }

    Ok(())
}

/// Print the working hours of one shift
pub fn handle_hours_command(
    start: &str,
    end: &str,
    shift: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let hours = calculate_shift_hours(Some(start), Some(end), shift, date);
    println!("{}", format_hours(hours));
    Ok(())
}
