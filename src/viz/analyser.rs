//! Byte-frequency spectrum analyser.
//!
//! This reproduces the analyser-node pipeline the visualizer is built on:
//! a fixed 256-point FFT over the most recent mono samples, a Blackman
//! window, exponential smoothing over time (time constant 0.8) and the
//! standard dB-to-byte mapping (-100 dB..-30 dB onto 0..=255). The output
//! is one `u8` per frequency bin, ready to be drawn as bars.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Window length of the analysis FFT.
pub const FFT_SIZE: usize = 256;
/// Number of usable frequency bins (positive frequencies only).
pub const BIN_COUNT: usize = FFT_SIZE / 2;

const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;

/// Default smoothing time constant.
pub const DEFAULT_SMOOTHING: f32 = 0.8;

pub struct SpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    smoothing: f32,
    smoothed: Vec<f32>,
    scratch: Vec<Complex<f32>>,
    bins: Vec<u8>,
}

impl SpectrumAnalyser {
    pub fn new(smoothing: f32) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(FFT_SIZE);

        // Periodic Blackman window, evaluated once.
        let window = (0..FFT_SIZE)
            .map(|n| {
                let t = 2.0 * PI * n as f32 / FFT_SIZE as f32;
                0.42 - 0.5 * t.cos() + 0.08 * (2.0 * t).cos()
            })
            .collect();

        Self {
            fft,
            window,
            smoothing: smoothing.clamp(0.0, 0.99),
            smoothed: vec![0.0; BIN_COUNT],
            scratch: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            bins: vec![0; BIN_COUNT],
        }
    }

    pub fn frequency_bin_count(&self) -> usize {
        BIN_COUNT
    }

    /// The last computed byte-frequency data. Valid until the next
    /// `process` or `reset` call.
    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    /// Run one analysis frame over the newest samples.
    ///
    /// Takes the trailing `FFT_SIZE` samples of `samples` (zero-padding on
    /// the left when fewer are available), updates the smoothed magnitudes
    /// and recomputes the byte bins.
    pub fn process(&mut self, samples: &[f32]) -> &[u8] {
        let take = samples.len().min(FFT_SIZE);
        let pad = FFT_SIZE - take;
        let newest = &samples[samples.len() - take..];

        for slot in self.scratch.iter_mut().take(pad) {
            *slot = Complex::new(0.0, 0.0);
        }
        for (i, &s) in newest.iter().enumerate() {
            self.scratch[pad + i] = Complex::new(s * self.window[pad + i], 0.0);
        }

        self.fft.process(&mut self.scratch);

        let tau = self.smoothing;
        for k in 0..BIN_COUNT {
            let magnitude = self.scratch[k].norm() / FFT_SIZE as f32;
            self.smoothed[k] = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            self.bins[k] = to_byte(self.smoothed[k]);
        }

        &self.bins
    }

    /// Drop all smoothing history and zero the bins.
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.bins.fill(0);
    }
}

/// Map a smoothed linear magnitude onto the 0..=255 byte range through the
/// -100 dB..-30 dB window.
fn to_byte(magnitude: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS);
    if !scaled.is_finite() || scaled <= 0.0 {
        0
    } else if scaled >= 255.0 {
        255
    } else {
        scaled as u8
    }
}
