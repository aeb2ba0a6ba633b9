use std::fs;
use std::path::Path;

use tempfile::tempdir;

use super::model::make_display;
use super::validate::looks_like_mpeg;
use super::*;

#[test]
fn make_display_prefers_artist_dash_title() {
    assert_eq!(make_display("Song", Some("Artist")), "Artist - Song");
    assert_eq!(make_display("Song", Some("  Artist  ")), "Artist - Song");
    assert_eq!(make_display("Song", None), "Song");
    assert_eq!(make_display("Song", Some("")), "Song");
    assert_eq!(make_display("Song", Some("   ")), "Song");
}

#[test]
fn track_ids_are_unique_and_timestamp_prefixed() {
    let a = new_track_id();
    let b = new_track_id();
    assert_ne!(a, b);

    let (millis, suffix) = a.split_once('-').expect("id has a dash");
    assert!(millis.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn looks_like_mpeg_accepts_id3_and_frame_sync() {
    assert!(looks_like_mpeg(b"ID3\x04\x00"));
    assert!(looks_like_mpeg(&[0xFF, 0xFB, 0x90, 0x00]));
    assert!(looks_like_mpeg(&[0xFF, 0xE0]));
    assert!(!looks_like_mpeg(&[0xFF, 0x10]));
    assert!(!looks_like_mpeg(b"OggS"));
    assert!(!looks_like_mpeg(b""));
}

#[test]
fn validate_rejects_wrong_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.flac");
    fs::write(&path, b"ID3\x04\x00").unwrap();

    assert!(matches!(
        validate_mp3(&path),
        Err(ValidateError::UnsupportedType(_))
    ));
    // Extension matching is case-insensitive.
    let upper = dir.path().join("SONG.MP3");
    fs::write(&upper, b"ID3\x04\x00").unwrap();
    assert!(validate_mp3(&upper).is_ok());
}

#[test]
fn validate_rejects_non_mpeg_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fake.mp3");
    fs::write(&path, b"this is not music").unwrap();

    assert!(matches!(validate_mp3(&path), Err(ValidateError::NotMpeg(_))));
}

#[test]
fn validate_rejects_missing_file() {
    assert!(matches!(
        validate_mp3(Path::new("/definitely/not/here.mp3")),
        Err(ValidateError::Io(_))
    ));
}

#[test]
fn validate_enforces_size_cap() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("huge.mp3");
    let f = fs::File::create(&path).unwrap();
    // Sparse file: the size check reads metadata, not content.
    f.set_len(MAX_FILE_BYTES + 1).unwrap();

    match validate_mp3(&path) {
        Err(ValidateError::TooLarge { size, limit }) => {
            assert_eq!(size, MAX_FILE_BYTES + 1);
            assert_eq!(limit, MAX_FILE_BYTES);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn validate_reports_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tiny.mp3");
    fs::write(&path, b"ID3\x04\x00\x00\x00\x00\x00\x00").unwrap();

    assert_eq!(validate_mp3(&path).unwrap(), 10);
}

#[test]
fn import_directory_validates_each_candidate() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.mp3"), b"ID3\x04\x00").unwrap();
    fs::write(dir.path().join("a.MP3"), &[0xFF, 0xFB, 0x90, 0x00]).unwrap();
    fs::write(dir.path().join("broken.mp3"), b"plain text").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignore me").unwrap();

    let outcome = import_path(dir.path());

    // Sorted by path: a.MP3 before b.mp3. Non-mp3 files are ignored silently,
    // mp3-named files with bogus content are reported.
    assert_eq!(outcome.added.len(), 2);
    assert_eq!(outcome.added[0].title, "a");
    assert_eq!(outcome.added[1].title, "b");
    assert_eq!(outcome.skipped.len(), 1);
    assert!(outcome.skipped[0].0.ends_with("broken.mp3"));

    // Every imported track got a distinct id and its size recorded.
    assert_ne!(outcome.added[0].id, outcome.added[1].id);
    assert_eq!(outcome.added[0].size_bytes, 4);
}

#[test]
fn import_single_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("solo.mp3");
    fs::write(&path, b"ID3\x04\x00").unwrap();

    let outcome = import_path(&path);
    assert_eq!(outcome.added.len(), 1);
    assert_eq!(outcome.added[0].title, "solo");
    assert_eq!(outcome.added[0].display, "solo");

    let outcome = import_path(&dir.path().join("gone.mp3"));
    assert!(outcome.added.is_empty());
    assert_eq!(outcome.skipped.len(), 1);
}
