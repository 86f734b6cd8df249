//! Main UI rendering logic

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{SystemTime, UNIX_EPOCH};

use super::app::{App, AppMode, View};
use super::utils::{centered_rect, get_message_style};
use super::{day_view, form_ui, grid_view, legend_view};
use crate::utils::month_name;

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(5), // Messages
            Constraint::Length(3), // Footer
        ])
        .split(size);

    render_header(f, app, chunks[0]);

    if app.mode == AppMode::Help {
        render_help(f, chunks[1]);
    } else {
        match app.view {
            View::Grid => grid_view::render_grid(f, app, chunks[1]),
            View::Day => day_view::render_day(f, app, chunks[1]),
            View::Legend => legend_view::render_legend(f, app, chunks[1]),
        }
    }

    match app.mode {
        AppMode::LegendForm => form_ui::render_legend_form(f, app, chunks[1]),
        AppMode::ConfirmDelete => form_ui::render_confirm_delete(f, app, chunks[1]),
        AppMode::Assign => form_ui::render_assign_form(f, app, chunks[1]),
        _ => {}
    }

    render_messages(f, app, chunks[2]);
    render_footer(f, app, chunks[3]);

    if app.loading {
        render_loading_overlay(f, app, size);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let tabs: Vec<Span> = [View::Grid, View::Day, View::Legend]
        .iter()
        .flat_map(|view| {
            let style = if *view == app.view {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            [Span::styled(format!(" {} ", view.title()), style), Span::raw(" ")]
        })
        .collect();

    let user = match &app.config.user_nip {
        Some(nip) => format!("NIP {}", nip),
        None => "tamu".to_string(),
    };
    let access = if app.viewer.can_edit { "editor" } else { "lihat saja" };

    let mut spans = vec![Span::styled(
        format!(" Jadwal CSSD · {} {} ", month_name(app.month), app.year),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    spans.extend(tabs);
    spans.push(Span::styled(
        format!(" {} ({})", user, access),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn render_help(f: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from(Span::styled(
            "Pintasan Keyboard",
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
        )),
        Line::from(""),
        section("Navigasi:"),
        Line::from("  Tab / Shift+Tab   Ganti tampilan (bulanan, harian, keterangan)"),
        Line::from("  ↑/↓ atau j/k      Pilih pegawai atau simbol"),
        Line::from("  ←/→ atau h/l      Pilih hari atau bagian keterangan"),
        Line::from("  Home/End          Hari pertama / terakhir"),
        Line::from("  PgUp/PgDn, [ ]    Bulan sebelumnya / berikutnya"),
        Line::from("  t                 Bulan ini"),
        Line::from(""),
        section("Aksi:"),
        Line::from("  Enter             Buka jadwal pada sel terpilih"),
        Line::from("  a                 Tambah simbol (keterangan)"),
        Line::from("  e                 Edit simbol terpilih"),
        Line::from("  d                 Hapus simbol terpilih"),
        Line::from("  r                 Muat ulang data"),
        Line::from(""),
        section("Umum:"),
        Line::from("  q / Esc           Keluar"),
        Line::from("  ?                 Tampilkan bantuan"),
        Line::from(""),
        Line::from(Span::styled(
            "Tekan sembarang tombol untuk kembali...",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Bantuan ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = app
        .messages
        .recent(3)
        .iter()
        .map(|msg| {
            let style = get_message_style(msg.message_type);
            Line::from(vec![
                Span::styled(format!("{} ", msg.icon()), style),
                Span::styled(msg.text.clone(), style),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled("Siap", Style::default().fg(Color::Gray))));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Pesan ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.mode {
        AppMode::Grid | AppMode::Day => {
            "[Tab] Tampilan  [↑↓] Pegawai  [←→] Hari  [PgUp/PgDn] Bulan  [Enter] Buka  [r] Muat ulang  [?] Bantuan  [q] Keluar"
        }
        AppMode::Legend => {
            "[Tab] Tampilan  [←→] Bagian  [↑↓] Simbol  [a] Tambah  [e] Edit  [d] Hapus  [?] Bantuan  [q] Keluar"
        }
        AppMode::LegendForm => "[Tab] Berikutnya  [←→] Warna  [Enter] Simpan  [Esc] Batal",
        AppMode::ConfirmDelete => "[y] Hapus  [n/Esc] Batal",
        AppMode::Assign => "[Tab] Pindah  [Enter] Simpan  [Esc] Batal",
        AppMode::Help => "Tekan sembarang tombol untuk kembali",
    };

    let footer = Paragraph::new(shortcuts)
        .style(Style::default().fg(Color::Gray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(footer, area);
}

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn render_loading_overlay(f: &mut Frame, app: &App, area: Rect) {
    let popup = centered_rect(40, 20, area);
    f.render_widget(Clear, popup);

    let frame = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_millis() / 100) as usize % SPINNER.len())
        .unwrap_or(0);
    let text = format!("{} {}", SPINNER[frame], app.loading_message);

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(text)])
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Memuat ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(paragraph, popup);
}
