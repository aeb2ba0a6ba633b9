use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::mpris::ControlCmd;
use crate::playlist::PlaylistStore;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    // Keep the handle alive for the lifetime of the process; dropping it
    // would shut the logger down.
    let _logger = startup::init_logging();

    let store = PlaylistStore::open(&settings.playlist);
    let mut tracks = store.load();

    let args: Vec<String> = env::args().skip(1).collect();
    let (imported, skipped) = startup::import_args(&args);
    let imported_any = !imported.is_empty();
    tracks.extend(imported);

    let audio_player = AudioPlayer::new(tracks.clone(), settings.audio.clone());
    let mut app = App::new(tracks);
    app.set_playback_handle(audio_player.playback_handle());
    if imported_any {
        app.mark_playlist_dirty();
    }
    if skipped > 0 {
        app.set_status(format!("import skipped {skipped} file(s), see log"));
    }

    startup::apply_playback_defaults(&mut app, &audio_player, &settings);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());

    mpris_sync::update_mpris(&mpris, &app);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &audio_player,
            &store,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
