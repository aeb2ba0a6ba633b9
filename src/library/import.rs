//! Path import: turn files or directories into validated `Track`s.

use std::path::{Path, PathBuf};

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use walkdir::WalkDir;

use super::model::{Track, make_display, new_track_id};
use super::validate::{ValidateError, validate_mp3};

/// Result of importing one path: the tracks that passed validation and the
/// files that were skipped, with the reason.
#[derive(Default)]
pub struct ImportOutcome {
    pub added: Vec<Track>,
    pub skipped: Vec<(PathBuf, ValidateError)>,
}

/// Import `path`. A file is validated directly; a directory is walked and
/// every `.mp3` candidate inside is validated individually.
pub fn import_path(path: &Path) -> ImportOutcome {
    let mut outcome = ImportOutcome::default();

    if path.is_dir() {
        let mut candidates: Vec<PathBuf> = WalkDir::new(path)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().is_file())
            .map(|e| e.path().to_path_buf())
            .collect();
        // Deterministic playlist order for directory imports.
        candidates.sort();

        for candidate in candidates {
            // Non-mp3 files inside a directory are ignored silently, same as
            // a file picker with an accept filter would hide them.
            if !candidate
                .extension()
                .and_then(|s| s.to_str())
                .map(|e| e.eq_ignore_ascii_case("mp3"))
                .unwrap_or(false)
            {
                continue;
            }
            import_one(&candidate, &mut outcome);
        }
    } else {
        import_one(path, &mut outcome);
    }

    outcome
}

fn import_one(path: &Path, outcome: &mut ImportOutcome) {
    match validate_mp3(path) {
        Ok(size) => outcome.added.push(read_track(path, size)),
        Err(e) => {
            log::warn!("rejected {}: {e}", path.display());
            outcome.skipped.push((path.to_path_buf(), e));
        }
    }
}

/// Build a `Track` from a validated file, pulling tags when available and
/// falling back to the file stem as the title.
fn read_track(path: &Path, size_bytes: u64) -> Track {
    let default_title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    let mut title = default_title;
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    album = Some(v.to_string());
                }
            }
        }
    }

    let display = make_display(&title, artist.as_deref());

    Track {
        id: new_track_id(),
        title,
        artist,
        album,
        path: path.to_path_buf(),
        size_bytes,
        duration,
        display,
    }
}
