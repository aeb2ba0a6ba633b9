use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::tempdir;

use crate::config::PlaylistSettings;
use crate::library::{Track, new_track_id};

use super::*;

fn track_at(path: &Path, title: &str) -> Track {
    Track {
        id: new_track_id(),
        title: title.to_string(),
        artist: Some("Artist".to_string()),
        album: None,
        path: path.to_path_buf(),
        size_bytes: 4,
        duration: Some(Duration::from_secs(181)),
        display: format!("Artist - {title}"),
    }
}

#[test]
fn save_and_load_round_trips_verbatim() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mp3");
    let b = dir.path().join("b.mp3");
    fs::write(&a, b"ID3\x04").unwrap();
    fs::write(&b, b"ID3\x04").unwrap();

    let store = PlaylistStore::at(&dir.path().join("playlist.json"));
    let tracks = vec![track_at(&b, "Second"), track_at(&a, "First")];
    store.save(&tracks).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.len(), 2);
    // Order is preserved exactly as saved.
    assert_eq!(loaded[0].title, "Second");
    assert_eq!(loaded[1].title, "First");
    assert_eq!(loaded[0].id, tracks[0].id);
    assert_eq!(loaded[0].artist.as_deref(), Some("Artist"));
    assert_eq!(loaded[0].duration, Some(Duration::from_secs(181)));
    assert_eq!(loaded[0].display, "Artist - Second");
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("state").join("deep").join("playlist.json");

    let store = PlaylistStore::at(&nested);
    store.save(&[]).unwrap();
    assert!(nested.is_file());
}

#[test]
fn load_missing_file_yields_empty_playlist() {
    let dir = tempdir().unwrap();
    let store = PlaylistStore::at(&dir.path().join("nope.json"));
    assert!(store.load().is_empty());
}

#[test]
fn load_corrupt_file_yields_empty_playlist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("playlist.json");
    fs::write(&path, b"{ definitely not json").unwrap();

    let store = PlaylistStore::at(&path);
    assert!(store.load().is_empty());
}

#[test]
fn load_drops_entries_whose_files_vanished() {
    let dir = tempdir().unwrap();
    let kept = dir.path().join("kept.mp3");
    let gone = dir.path().join("gone.mp3");
    fs::write(&kept, b"ID3\x04").unwrap();
    fs::write(&gone, b"ID3\x04").unwrap();

    let store = PlaylistStore::at(&dir.path().join("playlist.json"));
    store
        .save(&[track_at(&gone, "Gone"), track_at(&kept, "Kept")])
        .unwrap();

    fs::remove_file(&gone).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].title, "Kept");
}

#[test]
fn resolve_playlist_path_prefers_config_override() {
    let settings = PlaylistSettings {
        autosave: true,
        path: Some(PathBuf::from("/tmp/custom-playlist.json")),
    };
    assert_eq!(
        resolve_playlist_path(&settings).unwrap(),
        PathBuf::from("/tmp/custom-playlist.json")
    );
}
