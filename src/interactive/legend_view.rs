//! Legend screen: the three category sections side by side

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use super::app::App;
use super::utils::{badge_style, center};
use crate::schedule::{Category, LegendEntry};

pub fn render_legend(f: &mut Frame, app: &App, area: Rect) {
    let sections = app.legend.len().max(1) as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            (0..sections)
                .map(|_| Constraint::Ratio(1, sections))
                .collect::<Vec<_>>(),
        )
        .split(area);

    for (i, (category, entries)) in app.legend.iter().enumerate() {
        let focused = i == app.legend_section;
        render_section(f, app, *category, entries, focused, chunks[i]);
    }
}

fn render_section(
    f: &mut Frame,
    app: &App,
    category: Category,
    entries: &[LegendEntry],
    focused: bool,
    area: Rect,
) {
    let mut title = format!(" {} ", category.title());
    if app.viewer.can_edit && focused {
        title.push_str("[a] TAMBAH ");
    }
    let border = if focused { Color::Cyan } else { Color::DarkGray };

    let items: Vec<ListItem> = entries.iter().map(legend_item).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(border)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if focused && !entries.is_empty() {
        state.select(Some(app.legend_index));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn legend_item(entry: &LegendEntry) -> ListItem<'static> {
    let badge = Span::styled(
        center(&entry.code, 6),
        badge_style(&entry.background_hex(), &entry.text_color),
    );
    let origin = if entry.is_from_db() {
        Span::styled(" ●", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○", Style::default().fg(Color::DarkGray))
    };
    ListItem::new(vec![
        Line::from(vec![badge, Span::raw(" "), Span::raw(entry.label.clone()), origin]),
        Line::from(Span::styled(
            format!("       ID: {}", entry.code),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}
