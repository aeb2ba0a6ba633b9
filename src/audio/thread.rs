use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::config::AudioSettings;
use crate::library::Track;

use super::sink::create_sink_at;
use super::tap::TapHandle;
use super::types::{AudioCmd, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    tracks: Vec<Track>,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    tap: TapHandle,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut tracks = tracks;
        let mut index: Option<usize> = None;
        let mut paused = true;
        let mut sink: Option<Sink> = None;
        let mut volume: f32 = audio_settings.default_volume.clamp(0.0, 1.0);

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        if let Ok(mut info) = playback_info.lock() {
            info.volume = volume;
        }

        // Spawn a ticker thread to update playback_info.elapsed periodically.
        let info_for_ticker_clone = playback_info.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_millis(500));
            let mut info = info_for_ticker_clone.lock().unwrap();
            if info.playing {
                info.elapsed = info.elapsed + Duration::from_millis(500);
            }
        });

        fn do_play(
            i: usize,
            stream: &rodio::OutputStream,
            tracks: &[Track],
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            volume: f32,
            tap: &TapHandle,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }

            let Some(track) = tracks.get(i) else {
                return;
            };

            // Old samples must not bleed into the new track's spectrum.
            if let Ok(mut buf) = tap.lock() {
                buf.clear();
            }

            match create_sink_at(stream, track, Duration::ZERO, tap) {
                Ok(new_sink) => {
                    new_sink.set_volume(volume);
                    new_sink.play();
                    *sink = Some(new_sink);
                    *index = Some(i);
                    *paused = false;
                    *started_at = Some(Instant::now());
                    *accumulated = Duration::ZERO;

                    if let Ok(mut info) = playback_info.lock() {
                        info.index = Some(i);
                        info.track_id = Some(track.id.clone());
                        info.elapsed = Duration::ZERO;
                        info.duration = track.duration;
                        info.playing = true;
                    }
                }
                Err(e) => {
                    // Not fatal: log it and fall back to a stopped state.
                    log::warn!("{e}");
                    do_stop(sink, index, paused, started_at, accumulated, playback_info);
                }
            }
        }

        fn do_stop(
            sink: &mut Option<Sink>,
            index: &mut Option<usize>,
            paused: &mut bool,
            started_at: &mut Option<Instant>,
            accumulated: &mut Duration,
            playback_info: &PlaybackHandle,
        ) {
            if let Some(s) = sink.as_ref() {
                s.stop();
            }
            *sink = None;
            *index = None;
            *paused = true;
            *started_at = None;
            *accumulated = Duration::ZERO;
            if let Ok(mut info) = playback_info.lock() {
                info.index = None;
                info.track_id = None;
                info.elapsed = Duration::ZERO;
                info.duration = None;
                info.playing = false;
            }
        }

        fn fade_out_sink(sink: &Sink, from_volume: f32, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            sink.set_volume(from_volume);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(from_volume * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    AudioCmd::Play(i) => {
                        do_play(
                            i,
                            &stream,
                            &tracks,
                            &mut sink,
                            &mut index,
                            &mut paused,
                            &mut started_at,
                            &mut accumulated,
                            volume,
                            &tap,
                            &playback_info,
                        );
                    }

                    AudioCmd::Stop => {
                        do_stop(
                            &mut sink,
                            &mut index,
                            &mut paused,
                            &mut started_at,
                            &mut accumulated,
                            &playback_info,
                        );
                    }

                    AudioCmd::TogglePause => {
                        if let Some(ref s) = sink {
                            if paused {
                                s.play();
                            } else {
                                s.pause();
                            }
                            if paused {
                                // unpausing
                                started_at = Some(Instant::now());
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = true;
                                }
                            } else {
                                // pausing
                                if let Some(st) = started_at {
                                    accumulated += Instant::now() - st;
                                }
                                started_at = None;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.playing = false;
                                }
                            }
                            paused = !paused;
                        }
                    }

                    AudioCmd::SeekBy(secs) => {
                        // Scrubbing: rebuild the current sink and skip into the file.
                        // This uses `Source::skip_duration` (works for common formats).
                        let Some(i) = index else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }

                        let elapsed =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        let cur = elapsed.as_secs() as i64;
                        let new = (cur + secs as i64).max(0) as u64;
                        let new_elapsed = Duration::from_secs(new);

                        // Stop old sink and replace with a fresh one.
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        let Some(track) = tracks.get(i) else {
                            continue;
                        };
                        match create_sink_at(&stream, track, new_elapsed, &tap) {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                if paused {
                                    new_sink.pause();
                                    started_at = None;
                                } else {
                                    new_sink.play();
                                    started_at = Some(Instant::now());
                                }

                                sink = Some(new_sink);
                                accumulated = new_elapsed;
                                if let Ok(mut info) = playback_info.lock() {
                                    info.elapsed = new_elapsed;
                                }
                            }
                            Err(e) => {
                                log::warn!("seek failed: {e}");
                                do_stop(
                                    &mut sink,
                                    &mut index,
                                    &mut paused,
                                    &mut started_at,
                                    &mut accumulated,
                                    &playback_info,
                                );
                            }
                        }
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(ref s) = sink {
                            s.set_volume(volume);
                        }
                        if let Ok(mut info) = playback_info.lock() {
                            info.volume = volume;
                        }
                    }

                    AudioCmd::SetPlaylist(new_tracks) => {
                        tracks = new_tracks;

                        if index.is_some() {
                            // Re-resolve the playing entry by id; stop if it
                            // was removed from the playlist.
                            let playing_id = playback_info
                                .lock()
                                .ok()
                                .and_then(|info| info.track_id.clone());
                            let new_pos = playing_id
                                .and_then(|id| tracks.iter().position(|t| t.id == id));

                            match new_pos {
                                Some(pos) => {
                                    index = Some(pos);
                                    if let Ok(mut info) = playback_info.lock() {
                                        info.index = Some(pos);
                                    }
                                }
                                None => {
                                    do_stop(
                                        &mut sink,
                                        &mut index,
                                        &mut paused,
                                        &mut started_at,
                                        &mut accumulated,
                                        &playback_info,
                                    );
                                }
                            }
                        }
                    }

                    AudioCmd::Next => {
                        if tracks.is_empty() {
                            continue;
                        }

                        // Next past the last entry does nothing; from a
                        // stopped state it starts at the top.
                        let target = match index {
                            Some(i) if i + 1 < tracks.len() => Some(i + 1),
                            Some(_) => None,
                            None => Some(0),
                        };
                        if let Some(t) = target {
                            do_play(
                                t,
                                &stream,
                                &tracks,
                                &mut sink,
                                &mut index,
                                &mut paused,
                                &mut started_at,
                                &mut accumulated,
                                volume,
                                &tap,
                                &playback_info,
                            );
                        }
                    }

                    AudioCmd::Prev => {
                        if tracks.is_empty() {
                            continue;
                        }

                        let target = match index {
                            Some(i) if i > 0 => Some(i - 1),
                            Some(_) => None,
                            None => Some(0),
                        };
                        if let Some(t) = target {
                            do_play(
                                t,
                                &stream,
                                &tracks,
                                &mut sink,
                                &mut index,
                                &mut paused,
                                &mut started_at,
                                &mut accumulated,
                                volume,
                                &tap,
                                &playback_info,
                            );
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            // Fade out gently before stopping.
                            fade_out_sink(s, volume, fade_out_ms);
                            s.stop();
                        }
                        // Update shared state so UI/MPRIS don't keep showing Playing.
                        if let Ok(mut info) = playback_info.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic check for auto-advance
                    if let Some(ref s) = sink {
                        if !paused && s.empty() {
                            match index {
                                Some(i) if i + 1 < tracks.len() => {
                                    do_play(
                                        i + 1,
                                        &stream,
                                        &tracks,
                                        &mut sink,
                                        &mut index,
                                        &mut paused,
                                        &mut started_at,
                                        &mut accumulated,
                                        volume,
                                        &tap,
                                        &playback_info,
                                    );
                                }
                                _ => {
                                    // End of the playlist.
                                    do_stop(
                                        &mut sink,
                                        &mut index,
                                        &mut paused,
                                        &mut started_at,
                                        &mut accumulated,
                                        &playback_info,
                                    );
                                }
                            }
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
