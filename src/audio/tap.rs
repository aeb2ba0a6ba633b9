//! Sample tap between the decoder and the sink.
//!
//! `Monitored` wraps any playing source, forwards its samples untouched and
//! mirrors a mono downmix of them into a bounded ring buffer. The analyser
//! reads the newest window from that buffer on every draw tick.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rodio::Source;

/// Samples retained for analysis. Enough for several FFT windows at any
/// common sample rate without holding on to stale audio.
pub const TAP_CAPACITY: usize = 4096;

pub type TapHandle = Arc<Mutex<VecDeque<f32>>>;

pub fn new_tap() -> TapHandle {
    Arc::new(Mutex::new(VecDeque::with_capacity(TAP_CAPACITY)))
}

/// Copy the tap contents into `out`, oldest first.
pub fn snapshot_tap(tap: &TapHandle, out: &mut Vec<f32>) {
    out.clear();
    if let Ok(buf) = tap.lock() {
        out.extend(buf.iter().copied());
    }
}

pub struct Monitored<S> {
    inner: S,
    tap: TapHandle,
    // Downmix state: accumulate one frame across channels.
    channel: u16,
    frame_sum: f32,
}

impl<S> Monitored<S>
where
    S: Source<Item = f32>,
{
    pub fn new(inner: S, tap: TapHandle) -> Self {
        Self {
            inner,
            tap,
            channel: 0,
            frame_sum: 0.0,
        }
    }

    fn push_mono(&mut self, value: f32) {
        // try_lock: the audio callback must never wait on the UI thread.
        if let Ok(mut buf) = self.tap.try_lock() {
            if buf.len() >= TAP_CAPACITY {
                buf.pop_front();
            }
            buf.push_back(value);
        }
    }
}

impl<S> Iterator for Monitored<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.inner.next()?;

        let channels = self.inner.channels().max(1);
        self.frame_sum += sample;
        self.channel += 1;
        if self.channel >= channels {
            let mono = self.frame_sum / channels as f32;
            self.push_mono(mono);
            self.channel = 0;
            self.frame_sum = 0.0;
        }

        Some(sample)
    }
}

impl<S> Source for Monitored<S>
where
    S: Source<Item = f32>,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.inner.try_seek(pos)
    }
}
