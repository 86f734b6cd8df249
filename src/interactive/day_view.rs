//! Single-day list with a day strip for moving through the month

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::App;
use super::utils::{cell_spans, truncate_str};
use crate::calendar;
use crate::roster::day_list::TODAY_BADGE;
use crate::utils::{format_hours, month_name};

pub fn render_day(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(5)])
        .split(area);

    render_day_header(f, app, chunks[0]);
    render_day_list(f, app, chunks[1]);
}

fn render_day_header(f: &mut Frame, app: &App, area: Rect) {
    let list = &app.day_list;
    let prev = if app.cursor.has_prev() { "◀ " } else { "  " };
    let next = if app.cursor.has_next() { " ▶" } else { "  " };

    let mut title = vec![
        Span::raw(prev),
        Span::styled(
            format!(
                "{}, {} {} {}",
                list.day_name,
                list.day,
                month_name(app.month),
                app.year
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(next),
    ];
    if list.is_today {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!(" {} ", TODAY_BADGE),
            Style::default().bg(Color::Blue).fg(Color::White),
        ));
    }
    if let Some(holiday) = app.grid.headers.get((list.day - 1) as usize).and_then(|h| h.holiday.as_ref()) {
        title.push(Span::styled(format!("  {}", holiday), Style::default().fg(Color::Red)));
    }

    let strip: Vec<Span> = (1..=app.cursor.days_in_month())
        .map(|day| {
            let mut style = Style::default();
            if calendar::is_weekend(app.year, app.month, day) {
                style = style.fg(Color::Red);
            }
            if app.cursor.is_today(day) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if day == app.cursor.day {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            Span::styled(format!("{:>3}", day), style)
        })
        .collect();

    let header = Paragraph::new(vec![Line::from(title), Line::from(strip)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_day_list(f: &mut Frame, app: &App, area: Rect) {
    let list = &app.day_list;
    let block = Block::default().borders(Borders::ALL).title(format!(
        " {} pegawai · total {} ",
        list.entries.len(),
        format_hours(list.total_hours())
    ));

    if let Some(message) = list.empty_message() {
        let empty = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Nama", "NIP", "Kode", "Keterangan", "Jam"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = list
        .entries
        .iter()
        .map(|entry| {
            let name_style = if entry.is_me {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let hours = if entry.hours > 0.0 {
                format_hours(entry.hours)
            } else {
                "-".to_string()
            };
            let row = Row::new(vec![
                Cell::from(truncate_str(&entry.employee.name, 24)).style(name_style),
                Cell::from(entry.employee.employee_id.clone()),
                Cell::from(Line::from(cell_spans(
                    &entry.code,
                    &entry.background,
                    &entry.text_color,
                    6,
                ))),
                Cell::from(entry.label.clone().unwrap_or_default()),
                Cell::from(hours),
            ]);
            if entry.clickable {
                row
            } else {
                row.style(Style::default().add_modifier(Modifier::DIM))
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(25),
            Constraint::Length(20),
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(10),
        ],
    )
    .header(header)
    .block(block)
    .highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_row));
    f.render_stateful_widget(table, area, &mut state);
}
