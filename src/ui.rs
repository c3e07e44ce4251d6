//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, Focus};
use crate::config::UiSettings;
use crate::library::format_mss;

const CONTROLS: [(&str, &str); 6] = [
    ("j/k", "up/down"),
    ("tab", "switch list"),
    ("enter", "open folder / play track"),
    ("backspace/h", "parent folder"),
    ("s", "stop"),
    ("q", "quit"),
];

/// Render the controls help text.
fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

/// Text for the first player line: error, now-playing, or idle.
fn now_playing_text(app: &App) -> String {
    if let Some(status) = &app.status {
        return status.clone();
    }
    match &app.now_playing {
        Some(name) if app.finished => format!("Finished: {}", name),
        Some(name) => format!("Now Playing: {}", name),
        None => " ".to_string(),
    }
}

fn draw_lists(frame: &mut Frame, app: &App, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let dir_items: Vec<ListItem> = app
        .dirs
        .iter()
        .map(|d| {
            let name = d
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| d.display().to_string());
            ListItem::new(format!("{}/", name))
        })
        .collect();
    let dirs = List::new(dir_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", app.current_dir.display())),
        )
        .highlight_style(highlight(app.focus == Focus::Dirs))
        .highlight_symbol("> ");
    let mut dir_state = ListState::default();
    if !app.dirs.is_empty() {
        dir_state.select(Some(app.selected_dir));
    }
    frame.render_stateful_widget(dirs, panes[0], &mut dir_state);

    // Leave room for the highlight symbol, the borders and the duration column.
    let name_width = (panes[1].width as usize).saturating_sub(2 + 2 + 7);
    let track_items: Vec<ListItem> = app
        .tracks
        .iter()
        .map(|t| {
            ListItem::new(format!(
                "{:<width$} {:>6}",
                t.display_name,
                format_mss(t.duration),
                width = name_width
            ))
        })
        .collect();
    let tracks = List::new(track_items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(highlight(app.focus == Focus::Tracks))
        .highlight_symbol("> ");
    let mut track_state = ListState::default();
    if !app.tracks.is_empty() {
        track_state.select(Some(app.selected_track));
    }
    frame.render_stateful_widget(tracks, panes[1], &mut track_state);
}

fn draw_player(frame: &mut Frame, app: &App, area: Rect, ui_settings: &UiSettings) {
    let block = Block::bordered()
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
        .title(ui_settings.header_text.as_str())
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    frame.render_widget(Paragraph::new(now_playing_text(app)), rows[0]);

    let progress = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(rows[1]);
    frame.render_widget(Paragraph::new(app.elapsed_label.as_str()), progress[0]);

    let label = if ui_settings.show_percentage {
        format!("{:.0}%", app.percent)
    } else {
        String::new()
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio((app.percent / 100.0).clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, progress[1]);

    frame.render_widget(
        Paragraph::new(app.total_label.as_str()).alignment(Alignment::Right),
        progress[2],
    );
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(4),
            Constraint::Length(3),
        ])
        .split(frame.area());

    draw_lists(frame, app, chunks[0]);
    draw_player(frame, app, chunks[1], ui_settings);

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}
