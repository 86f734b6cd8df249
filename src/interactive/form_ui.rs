//! Popup rendering for the legend form, delete confirmation and cell dialog

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::App;
use super::form::{AssignField, LegendField, TextInput};
use super::utils::{badge_style, centered_rect, hex_color};
use crate::legend_editor::delete_prompt;
use crate::schedule::{contrast_text_color, resolve_cell};

fn field_styles(is_current: bool) -> (Style, Style) {
    if is_current {
        (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(Color::White), Style::default().fg(Color::Gray))
    }
}

fn input_line(label: &str, input: &TextInput, is_current: bool) -> Line<'static> {
    let (label_style, value_style) = field_styles(is_current);
    let value = if is_current {
        input.display_with_cursor()
    } else if input.value.is_empty() {
        "<kosong>".to_string()
    } else {
        input.value.clone()
    };
    Line::from(vec![
        Span::styled(format!("{:20}", label), label_style),
        Span::raw(": "),
        Span::styled(value, value_style),
    ])
}

pub fn render_legend_form(f: &mut Frame, app: &App, area: Rect) {
    let form = match &app.legend_form {
        Some(form) => form,
        None => return,
    };
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(Span::styled(
            form.category.title(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for field in LegendField::all() {
        let is_current = form.current_field == field;
        match field {
            LegendField::Code => lines.push(input_line(field.label(), &form.code, is_current)),
            LegendField::Name => lines.push(input_line(field.label(), &form.name, is_current)),
            LegendField::Color => {
                let (label_style, _) = field_styles(is_current);
                lines.push(Line::from(Span::styled(field.label(), label_style)));
                lines.push(palette_line(&form.palette, form.color_index, is_current));
            }
        }
    }

    let color = form.color();
    let code = if form.code.value.trim().is_empty() {
        "?".to_string()
    } else {
        form.code.value.trim().to_uppercase()
    };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("Pratinjau: "),
        Span::styled(format!(" {} ", code), badge_style(color, contrast_text_color(color))),
        Span::raw(format!(" {}", color)),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab: Berikutnya | ←→: Warna | Enter: Simpan | Esc: Batal",
        Style::default().fg(Color::Gray),
    )));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(form.title())
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, popup);
}

fn palette_line(palette: &[String], selected: usize, is_current: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (i, color) in palette.iter().enumerate() {
        let swatch = if i == selected { "[■]" } else { " ■ " };
        let mut style = Style::default().fg(hex_color(color, Color::White));
        if i == selected && is_current {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        spans.push(Span::styled(swatch, style));
    }
    Line::from(spans)
}

pub fn render_confirm_delete(f: &mut Frame, app: &App, area: Rect) {
    let entry = match &app.pending_delete {
        Some(entry) => entry,
        None => return,
    };
    let popup = centered_rect(50, 25, area);
    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            delete_prompt(entry),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[y] Ya  [n/Esc] Batal",
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Hapus Simbol ")
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(paragraph, popup);
}

pub fn render_assign_form(f: &mut Frame, app: &App, area: Rect) {
    let form = match &app.assign_form {
        Some(form) => form,
        None => return,
    };
    let popup = centered_rect(50, 45, area);
    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Pegawai: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{} ({})", form.employee.name, form.employee.employee_id)),
        ]),
        Line::from(vec![
            Span::styled("Tanggal: ", Style::default().fg(Color::Gray)),
            Span::raw(form.date_key.clone()),
        ]),
        Line::from(""),
    ];

    if form.read_only {
        lines.push(Line::from(format!(
            "{:20}: {}",
            AssignField::Shift.label(),
            or_dash(&form.shift.value)
        )));
        lines.push(Line::from(format!(
            "{:20}: {}",
            AssignField::Task.label(),
            or_dash(&form.task.value)
        )));
    } else {
        for field in [AssignField::Shift, AssignField::Task] {
            let input = match field {
                AssignField::Shift => &form.shift,
                AssignField::Task => &form.task,
            };
            lines.push(input_line(field.label(), input, form.current_field == field));
        }
    }

    let entry = form.to_entry();
    let preview = resolve_cell(Some(&entry.record), &app.master.shifts, &app.master.units);
    lines.push(Line::from(""));
    let mut preview_line = vec![Span::raw("Pratinjau: ")];
    preview_line.extend(super::utils::cell_spans(
        &preview.display_code,
        &preview.background,
        &preview.text_color,
        6,
    ));
    preview_line.push(Span::raw(format!(" {}", preview.display_label)));
    lines.push(Line::from(preview_line));
    lines.push(Line::from(""));

    let hint = if form.read_only {
        "Tekan sembarang tombol untuk kembali"
    } else {
        "Tab: Pindah | Enter: Simpan | Esc: Batal"
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Gray))));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Jadwal ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, popup);
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
