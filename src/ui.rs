//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Sparkline, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock, time::Duration};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("enter".to_string(), "play selected".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("x".to_string(), "stop".to_string());
    map.insert("h/l".to_string(), "prev/next".to_string());
    // H/L is filled dynamically from config.
    map.insert("up/down".to_string(), "volume".to_string());
    map.insert("a".to_string(), "add file/dir".to_string());
    map.insert("d".to_string(), "remove".to_string());
    map.insert("v".to_string(), "spectrum".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "enter", "space/p", "x", "h/l", "H/L", "up/down", "a", "d", "v", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Average `bins` down to at most `cols` bars for the sparkline.
fn group_bins(bins: &[u8], cols: usize) -> Vec<u64> {
    if cols == 0 || bins.is_empty() {
        return Vec::new();
    }
    if bins.len() <= cols {
        return bins.iter().map(|&b| u64::from(b)).collect();
    }

    let mut grouped = Vec::with_capacity(cols);
    for col in 0..cols {
        let start = col * bins.len() / cols;
        let end = ((col + 1) * bins.len() / cols).max(start + 1);
        let sum: u64 = bins[start..end].iter().map(|&b| u64::from(b)).sum();
        grouped.push(sum / (end - start) as u64);
    }
    grouped
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    spectrum: &[u8],
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tremolo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        if app.input_mode {
            parts.push(format!("ADD PATH: {}_", app.input_buffer));
        }

        // playback info
        if let Some(ref h) = app.playback_handle {
            if let Ok(info) = h.lock() {
                if let Some(idx) = info.index {
                    if let Some(track) = app.tracks.get(idx) {
                        let state = if info.playing { "Playing" } else { "Paused" };
                        let time = match info.duration {
                            Some(total) => {
                                format!("{} / {}", format_mmss(info.elapsed), format_mmss(total))
                            }
                            None => format_mmss(info.elapsed),
                        };
                        parts.push(format!("{state}: {} [{time}]", track.display));
                    }
                } else {
                    parts.push("Stopped".to_string());
                }
            }
        }

        parts.push(format!("Volume: {:3.0}%", app.volume * 100.0));
        parts.push(format!("Tracks: {}", app.tracks.len()));

        if let Some(msg) = &app.status {
            parts.push(msg.clone());
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main area: spectrum pane above the playlist when enabled.
    let (spectrum_area, list_area) = if app.show_visualizer {
        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(1)])
            .split(chunks[2]);
        (Some(main[0]), main[1])
    } else {
        (None, chunks[2])
    };

    if let Some(area) = spectrum_area {
        let block = Block::default().borders(Borders::ALL).title(" spectrum ");
        let inner_width = block.inner(area).width as usize;
        let grouped = group_bins(spectrum, inner_width);
        let sparkline = Sparkline::default()
            .block(block)
            .data(grouped.iter().copied())
            .max(255);
        frame.render_widget(sparkline, area);
    }

    // Playlist
    {
        let playing = app.playing_index();

        // Center the selected item when possible by creating a visible window.
        // Important: only build ListItems for the visible window (avoid allocating the entire list).
        let total = app.tracks.len();
        let list_height = list_area.height as usize;
        let sel_pos = app.selected.min(total.saturating_sub(1));
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = (start..end)
            .map(|i| {
                let title = &app.tracks[i].display;
                if playing == Some(i) {
                    ListItem::new(format!("♪ {title}"))
                        .style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    ListItem::new(format!("  {title}"))
                }
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" playlist "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    let footer_text = controls_text(controls_settings.scrub_seconds);
    let footer = Paragraph::new(footer_text)
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

    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::ZERO), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(61)), "01:01");
        assert_eq!(format_mmss(Duration::from_secs(600)), "10:00");
        assert_eq!(format_mmss(Duration::from_secs(3599)), "59:59");
    }

    #[test]
    fn group_bins_averages_down_to_the_requested_width() {
        let bins = [0u8, 2, 4, 6, 8, 10, 12, 14];
        assert_eq!(group_bins(&bins, 4), vec![1, 5, 9, 13]);
        assert_eq!(group_bins(&bins, 8), vec![0, 2, 4, 6, 8, 10, 12, 14]);
        // Wider than the data: bins pass through untouched.
        assert_eq!(group_bins(&bins, 16).len(), 8);
        assert!(group_bins(&bins, 0).is_empty());
        assert!(group_bins(&[], 10).is_empty());
    }

    #[test]
    fn controls_text_injects_scrub_seconds() {
        let text = controls_text(7);
        assert!(text.contains("scrub -/+7s"));
        assert!(text.contains("[q] quit"));
    }
}
