use super::*;
use crate::library::{Track, new_track_id};

fn t(title: &str) -> Track {
    Track {
        id: new_track_id(),
        title: title.into(),
        artist: None,
        album: None,
        path: std::path::PathBuf::new(),
        size_bytes: 0,
        duration: None,
        display: title.into(),
    }
}

#[test]
fn cursor_wraps_both_ways() {
    let mut app = App::new(vec![t("A"), t("B"), t("C")]);
    assert_eq!(app.selected, 0);

    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.next();
    assert_eq!(app.selected, 1);
}

#[test]
fn cursor_is_inert_on_empty_playlist() {
    let mut app = App::new(Vec::new());
    app.next();
    app.prev();
    app.set_selected(5);
    assert_eq!(app.selected, 0);
    assert!(!app.has_tracks());
}

#[test]
fn set_selected_clamps_to_bounds() {
    let mut app = App::new(vec![t("A"), t("B")]);
    app.set_selected(99);
    assert_eq!(app.selected, 1);
}

#[test]
fn add_tracks_appends_and_marks_dirty() {
    let mut app = App::new(vec![t("A")]);
    assert!(!app.playlist_dirty);

    app.add_tracks(vec![t("B"), t("C")]);
    assert_eq!(app.tracks.len(), 3);
    assert!(app.playlist_dirty);

    app.clear_playlist_dirty();
    app.add_tracks(Vec::new());
    assert!(!app.playlist_dirty, "empty import is not a mutation");
}

#[test]
fn remove_selected_keeps_cursor_in_bounds() {
    let mut app = App::new(vec![t("A"), t("B"), t("C")]);
    app.set_selected(2);

    let removed = app.remove_selected().unwrap();
    assert_eq!(removed.title, "C");
    assert_eq!(app.selected, 1);
    assert!(app.playlist_dirty);

    app.set_selected(0);
    let removed = app.remove_selected().unwrap();
    assert_eq!(removed.title, "A");
    assert_eq!(app.selected, 0);
    assert_eq!(app.tracks.len(), 1);

    app.remove_selected();
    assert!(app.remove_selected().is_none());
    assert_eq!(app.selected, 0);
}

#[test]
fn volume_adjustment_clamps() {
    let mut app = App::new(vec![t("A")]);
    app.volume = 0.95;
    assert_eq!(app.adjust_volume(0.1), 1.0);
    assert_eq!(app.adjust_volume(-0.3), 0.7);
    app.volume = 0.02;
    assert_eq!(app.adjust_volume(-0.05), 0.0);
}

#[test]
fn input_mode_collects_and_hands_back_the_path() {
    let mut app = App::new(Vec::new());
    app.set_status("old message");

    app.enter_input_mode();
    assert!(app.input_mode);
    assert!(app.status.is_none(), "entering input clears the status line");

    for c in "/tmp/a.mp3".chars() {
        app.push_input_char(c);
    }
    app.pop_input_char();
    app.push_input_char('3');

    let typed = app.take_input();
    assert_eq!(typed, "/tmp/a.mp3");
    assert!(!app.input_mode);
    assert!(app.input_buffer.is_empty());
}

#[test]
fn cancel_input_mode_discards_the_buffer() {
    let mut app = App::new(Vec::new());
    app.enter_input_mode();
    app.push_input_char('x');
    app.cancel_input_mode();
    assert!(!app.input_mode);
    assert!(app.input_buffer.is_empty());
}

#[test]
fn visualizer_toggle_flips() {
    let mut app = App::new(Vec::new());
    assert!(app.show_visualizer);
    app.toggle_visualizer();
    assert!(!app.show_visualizer);
}
