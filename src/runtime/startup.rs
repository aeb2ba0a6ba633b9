use std::path::Path;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::library::{Track, import_path};
use crate::playlist::default_data_dir;

/// Start the file logger under the data directory. Logging is optional;
/// a failure here must not keep the player from starting.
pub fn init_logging() -> Option<LoggerHandle> {
    let dir = default_data_dir()?.join("logs");

    let logger = Logger::try_with_env_or_str("info")
        .ok()?
        .log_to_file(FileSpec::default().directory(&dir))
        .rotate(
            Criterion::Size(1_000_000),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(3),
        )
        // stderr belongs to the TUI once the alternate screen is up.
        .duplicate_to_stderr(Duplicate::None);

    match logger.start() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("tremolo: logging disabled: {e}");
            None
        }
    }
}

/// Import every path given on the command line. Returns the validated
/// tracks and the number of rejected files.
pub fn import_args(paths: &[String]) -> (Vec<Track>, usize) {
    let mut added = Vec::new();
    let mut skipped = 0;

    for raw in paths {
        let outcome = import_path(Path::new(raw));
        skipped += outcome.skipped.len();
        added.extend(outcome.added);
    }

    (added, skipped)
}

pub fn apply_playback_defaults(
    app: &mut App,
    audio_player: &AudioPlayer,
    settings: &config::Settings,
) {
    app.volume = settings.audio.default_volume.clamp(0.0, 1.0);
    app.show_visualizer = settings.ui.show_visualizer;

    let _ = audio_player.send(AudioCmd::SetVolume(app.volume));
}
