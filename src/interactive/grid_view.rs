//! Month grid: one row per employee, one column per day

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::App;
use super::utils::{cell_spans, truncate_str};
use crate::roster::{DayHeader, GridRow};
use crate::utils::month_name;

const DAY_WIDTH: u16 = 4;
const NO_WIDTH: u16 = 3;
const NAME_WIDTH: u16 = 18;
const NIP_WIDTH: u16 = 12;

pub fn render_grid(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        " Jadwal {} {} ({} pegawai) ",
        month_name(app.month),
        app.year,
        app.grid.rows.len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if let Some(message) = app.grid.empty_message() {
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let fixed = NO_WIDTH + NAME_WIDTH + NIP_WIDTH + 3;
    let available = area.width.saturating_sub(fixed + 2);
    let visible_days = (available / (DAY_WIDTH + 1)).max(1) as u32;
    let first_day = first_visible_day(app.cursor.day, visible_days, app.grid.headers.len() as u32);
    let days: Vec<&DayHeader> = app
        .grid
        .headers
        .iter()
        .skip((first_day - 1) as usize)
        .take(visible_days as usize)
        .collect();

    let mut header_cells = vec![
        Cell::from("No"),
        Cell::from("Nama"),
        Cell::from("NIP"),
    ];
    header_cells.extend(days.iter().map(|h| header_cell(h, h.day == app.cursor.day)));
    let header = Row::new(header_cells)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .height(2);

    let rows: Vec<Row> = app
        .grid
        .rows
        .iter()
        .map(|row| grid_row(row, &days, app.cursor.day))
        .collect();

    let mut widths = vec![
        Constraint::Length(NO_WIDTH),
        Constraint::Length(NAME_WIDTH),
        Constraint::Length(NIP_WIDTH),
    ];
    widths.extend(days.iter().map(|_| Constraint::Length(DAY_WIDTH)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("▶");

    let mut state = TableState::default();
    state.select(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}

/// First day column shown so that `selected` stays on screen
fn first_visible_day(selected: u32, visible: u32, total: u32) -> u32 {
    if total <= visible || selected <= visible / 2 {
        return 1;
    }
    let first = selected - visible / 2;
    first.min(total - visible + 1)
}

fn header_cell(header: &DayHeader, selected: bool) -> Cell<'static> {
    let separator = if header.is_monday { "│" } else { " " };
    let lines = vec![
        Line::from(format!("{}{}", separator, header.day_name)),
        Line::from(format!("{}{:>2}", separator, header.day)),
    ];
    let mut style = Style::default();
    if header.is_red() {
        style = style.fg(Color::Red);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Cell::from(lines).style(style)
}

fn grid_row(row: &GridRow, days: &[&DayHeader], selected_day: u32) -> Row<'static> {
    let name_style = if row.is_me {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut cells = vec![
        Cell::from(row.index.to_string()),
        Cell::from(truncate_str(&row.employee.name, NAME_WIDTH as usize)).style(name_style),
        Cell::from(truncate_str(&row.employee.employee_id, NIP_WIDTH as usize)),
    ];

    for header in days {
        let cell = match row.cells.get((header.day - 1) as usize) {
            Some(cell) => cell,
            None => continue,
        };
        let line = match &cell.resolved {
            Some(resolved) => Line::from(cell_spans(
                &resolved.display_code,
                &resolved.background,
                &resolved.text_color,
                DAY_WIDTH as usize,
            )),
            None => Line::from(" ".repeat(DAY_WIDTH as usize)),
        };
        let mut style = Style::default();
        if header.is_red() && cell.resolved.is_none() {
            style = style.bg(Color::Rgb(254, 226, 226));
        }
        if header.day == selected_day {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if !cell.clickable {
            style = style.add_modifier(Modifier::DIM);
        }
        cells.push(Cell::from(line).style(style));
    }

    Row::new(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_day() {
        assert_eq!(first_visible_day(5, 40, 30), 1);
        assert_eq!(first_visible_day(3, 10, 31), 1);
        assert_eq!(first_visible_day(15, 10, 31), 10);
        assert_eq!(first_visible_day(31, 10, 31), 22);
    }
}
