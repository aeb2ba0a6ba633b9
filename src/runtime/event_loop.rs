use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PlaybackState};
use crate::audio::{AudioCmd, AudioPlayer, TAP_CAPACITY, snapshot_tap};
use crate::config;
use crate::library::import_path;
use crate::mpris::ControlCmd;
use crate::mpris::MprisHandle;
use crate::playlist::PlaylistStore;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;
use crate::viz::{BIN_COUNT, SpectrumAnalyser};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Lazily built analyser; only exists once the visualizer has run.
    analyser: Option<SpectrumAnalyser>,
    /// The byte-frequency frame currently on screen.
    spectrum: Vec<u8>,
    scratch: Vec<f32>,
    /// Last-known playing index as emitted to MPRIS.
    last_mpris_index: Option<usize>,
    /// Last-known playback state as emitted to MPRIS.
    last_mpris_playback: PlaybackState,
    last_mpris_volume: f32,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            analyser: None,
            spectrum: vec![0; BIN_COUNT],
            scratch: Vec::with_capacity(TAP_CAPACITY),
            last_mpris_index: None,
            last_mpris_playback: app.playback,
            last_mpris_volume: app.volume,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread, playlist persistence and MPRIS. Returns `Ok(())` on shutdown.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    store: &PlaylistStore,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Persist playlist mutations and resync the audio thread's copy.
        if app.playlist_dirty {
            let _ = audio_player.send(AudioCmd::SetPlaylist(app.tracks.clone()));
            if settings.playlist.autosave {
                if let Err(e) = store.save(&app.tracks) {
                    log::warn!("playlist save failed: {e}");
                    app.set_status(format!("playlist save failed: {e}"));
                }
            }
            app.clear_playlist_dirty();
        }

        // Sync playback state from the audio thread.
        let mut playback_index_snapshot: Option<usize> = None;
        if let Some(handle) = app.playback_handle.as_ref().cloned() {
            if let Ok(info) = handle.lock() {
                playback_index_snapshot = info.index;
                app.playback = match (info.index, info.playing) {
                    (None, _) => PlaybackState::Stopped,
                    (Some(_), true) => PlaybackState::Playing,
                    (Some(_), false) => PlaybackState::Paused,
                };
                app.volume = info.volume;
            }
        }

        // One analysis frame per draw tick. A paused player keeps the last
        // frame on screen; a stopped one decays to silence immediately.
        match app.playback {
            PlaybackState::Playing if app.show_visualizer => {
                let analyser = state
                    .analyser
                    .get_or_insert_with(|| SpectrumAnalyser::new(settings.viz.smoothing));
                snapshot_tap(&audio_player.tap_handle(), &mut state.scratch);
                let bins = analyser.process(&state.scratch);
                state.spectrum.clear();
                state.spectrum.extend_from_slice(bins);
            }
            PlaybackState::Stopped => {
                if let Some(analyser) = state.analyser.as_mut() {
                    analyser.reset();
                }
                state.spectrum.fill(0);
            }
            _ => {}
        }

        // Keep MPRIS in sync even when playback changes come from media keys
        // or auto-advance.
        if playback_index_snapshot != state.last_mpris_index
            || app.playback != state.last_mpris_playback
            || (app.volume - state.last_mpris_volume).abs() > f32::EPSILON
        {
            update_mpris(mpris, app);
            state.last_mpris_index = playback_index_snapshot;
            state.last_mpris_playback = app.playback;
            state.last_mpris_volume = app.volume;
        }

        terminal.draw(|f| ui::draw(f, app, &state.spectrum, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, audio_player, mpris)? {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player, control_tx)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
) -> Result<bool, Box<dyn std::error::Error>> {
    match cmd {
        ControlCmd::Quit => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        ControlCmd::Play => match app.playback {
            PlaybackState::Paused => {
                let _ = audio_player.send(AudioCmd::TogglePause);
                app.playback = PlaybackState::Playing;
                update_mpris(mpris, app);
            }
            PlaybackState::Stopped | PlaybackState::Playing => {
                if app.has_tracks() {
                    let _ = audio_player.send(AudioCmd::Play(app.selected));
                    app.playback = PlaybackState::Playing;
                    update_mpris(mpris, app);
                }
            }
        },
        ControlCmd::Pause => {
            if app.playback == PlaybackState::Playing {
                let _ = audio_player.send(AudioCmd::TogglePause);
                app.playback = PlaybackState::Paused;
                update_mpris(mpris, app);
            }
        }
        ControlCmd::PlayPause => {
            match app.playback {
                PlaybackState::Stopped => {
                    if app.has_tracks() {
                        let _ = audio_player.send(AudioCmd::Play(app.selected));
                        app.playback = PlaybackState::Playing;
                    }
                }
                PlaybackState::Playing => {
                    let _ = audio_player.send(AudioCmd::TogglePause);
                    app.playback = PlaybackState::Paused;
                }
                PlaybackState::Paused => {
                    let _ = audio_player.send(AudioCmd::TogglePause);
                    app.playback = PlaybackState::Playing;
                }
            }
            update_mpris(mpris, app);
        }
        ControlCmd::Stop => {
            let _ = audio_player.send(AudioCmd::Stop);
            app.playback = PlaybackState::Stopped;
            update_mpris(mpris, app);
        }
        ControlCmd::Next => {
            if app.has_tracks() {
                let _ = audio_player.send(AudioCmd::Next);
                app.playback = PlaybackState::Playing;
                update_mpris(mpris, app);
            }
        }
        ControlCmd::Prev => {
            if app.has_tracks() {
                let _ = audio_player.send(AudioCmd::Prev);
                app.playback = PlaybackState::Playing;
                update_mpris(mpris, app);
            }
        }
        ControlCmd::SetVolume(v) => {
            app.volume = (v as f32).clamp(0.0, 1.0);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume));
            update_mpris(mpris, app);
        }
    }

    Ok(false)
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    control_tx: &mpsc::Sender<ControlCmd>,
) -> Result<bool, Box<dyn std::error::Error>> {
    if app.input_mode {
        match key.code {
            KeyCode::Esc => {
                app.cancel_input_mode();
            }
            KeyCode::Backspace => {
                app.pop_input_char();
            }
            KeyCode::Enter => {
                let raw = app.take_input();
                let raw = raw.trim();
                if !raw.is_empty() {
                    import_typed_path(app, raw);
                }
            }
            KeyCode::Char(c) => {
                if !c.is_control() {
                    app.push_input_char(c);
                }
            }
            _ => {}
        }

        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return Ok(true);
        }
        KeyCode::Char('j') => {
            app.next();
        }
        KeyCode::Char('k') => {
            app.prev();
        }
        KeyCode::Enter => {
            if app.has_tracks() {
                let is_playing_selected = app.playback == PlaybackState::Playing
                    && app.playing_index() == Some(app.selected);
                if !is_playing_selected {
                    let _ = audio_player.send(AudioCmd::Play(app.selected));
                    app.playback = PlaybackState::Playing;
                }
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('x') => {
            let _ = control_tx.send(ControlCmd::Stop);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i32;
            let _ = audio_player.send(AudioCmd::SeekBy(secs));
        }
        KeyCode::Char('H') => {
            let secs = settings.controls.scrub_seconds.min(i32::MAX as u64) as i32;
            let _ = audio_player.send(AudioCmd::SeekBy(-secs));
        }
        KeyCode::Up => {
            app.adjust_volume(settings.audio.volume_step);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume));
        }
        KeyCode::Down => {
            app.adjust_volume(-settings.audio.volume_step);
            let _ = audio_player.send(AudioCmd::SetVolume(app.volume));
        }
        KeyCode::Char('a') => {
            app.enter_input_mode();
        }
        KeyCode::Char('d') => {
            if let Some(removed) = app.remove_selected() {
                app.set_status(format!("removed {}", removed.display));
            }
        }
        KeyCode::Char('v') => {
            app.toggle_visualizer();
        }
        _ => {}
    }

    Ok(false)
}

/// Import the path typed in the add-path prompt and report the outcome in
/// the status line.
fn import_typed_path(app: &mut App, raw: &str) {
    let path = Path::new(raw);
    if !path.exists() {
        app.set_status(format!("no such path: {raw}"));
        return;
    }

    let outcome = import_path(path);
    let added = outcome.added.len();
    let skipped = outcome.skipped.len();

    if added == 0 && skipped == 0 {
        app.set_status(format!("no mp3 files found at {raw}"));
        return;
    }

    let mut message = format!("added {added} track(s)");
    if skipped > 0 {
        if let Some((_, reason)) = outcome.skipped.first() {
            message.push_str(&format!(", skipped {skipped} ({reason})"));
        } else {
            message.push_str(&format!(", skipped {skipped}"));
        }
    }
    app.set_status(message);
    app.add_tracks(outcome.added);
}
