use std::f32::consts::PI;

use super::*;

fn sine_at_bin(bin: usize) -> Vec<f32> {
    (0..FFT_SIZE)
        .map(|n| (2.0 * PI * bin as f32 * n as f32 / FFT_SIZE as f32).sin())
        .collect()
}

#[test]
fn bin_count_is_half_the_fft_size() {
    let analyser = SpectrumAnalyser::new(DEFAULT_SMOOTHING);
    assert_eq!(analyser.frequency_bin_count(), 128);
    assert_eq!(analyser.bins().len(), 128);
}

#[test]
fn silence_produces_all_zero_bins() {
    let mut analyser = SpectrumAnalyser::new(DEFAULT_SMOOTHING);
    let bins = analyser.process(&vec![0.0; FFT_SIZE]);
    assert!(bins.iter().all(|&b| b == 0));
}

#[test]
fn empty_input_is_treated_as_silence() {
    let mut analyser = SpectrumAnalyser::new(DEFAULT_SMOOTHING);
    let bins = analyser.process(&[]);
    assert!(bins.iter().all(|&b| b == 0));
}

#[test]
fn short_input_is_left_padded() {
    let mut analyser = SpectrumAnalyser::new(DEFAULT_SMOOTHING);
    // Fewer samples than the window: must not panic, and a loud burst must
    // still register somewhere.
    let bins = analyser.process(&[1.0; 32]);
    assert!(bins.iter().any(|&b| b > 0));
}

#[test]
fn full_scale_sine_peaks_at_its_own_bin() {
    let mut analyser = SpectrumAnalyser::new(DEFAULT_SMOOTHING);
    let bins = analyser.process(&sine_at_bin(16)).to_vec();

    let peak = bins
        .iter()
        .enumerate()
        .max_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak, 16);
    // A full-scale tone saturates the -30 dB ceiling even on the first
    // frame (smoothing scales the magnitude by 0.2).
    assert_eq!(bins[16], 255);
    // Far away from the tone the window leakage is below the -100 dB floor.
    assert_eq!(bins[80], 0);
}

#[test]
fn smoothing_decays_after_the_signal_stops() {
    let mut analyser = SpectrumAnalyser::new(DEFAULT_SMOOTHING);
    analyser.process(&sine_at_bin(16));

    let silence = vec![0.0; FFT_SIZE];
    let mut previous = 255u8;
    let mut decayed = false;
    for _ in 0..64 {
        let value = analyser.process(&silence)[16];
        assert!(value <= previous, "bins must decay monotonically");
        if value < previous {
            decayed = true;
        }
        previous = value;
    }
    assert!(decayed);
    // 0.8^64 puts the residue far below the -100 dB floor.
    assert_eq!(previous, 0);
}

#[test]
fn zero_smoothing_reacts_instantly() {
    let mut analyser = SpectrumAnalyser::new(0.0);
    analyser.process(&sine_at_bin(16));
    let bins = analyser.process(&vec![0.0; FFT_SIZE]);
    assert!(bins.iter().all(|&b| b == 0));
}

#[test]
fn reset_clears_history() {
    let mut analyser = SpectrumAnalyser::new(DEFAULT_SMOOTHING);
    analyser.process(&sine_at_bin(16));
    assert!(analyser.bins().iter().any(|&b| b > 0));

    analyser.reset();
    assert!(analyser.bins().iter().all(|&b| b == 0));

    // History is gone: silence right after reset stays silent.
    let bins = analyser.process(&vec![0.0; FFT_SIZE]);
    assert!(bins.iter().all(|&b| b == 0));
}

#[test]
fn out_of_range_smoothing_is_clamped() {
    // A smoothing constant of 1.0 would never update; the constructor
    // clamps it so the analyser keeps responding.
    let mut analyser = SpectrumAnalyser::new(1.5);
    let bins = analyser.process(&sine_at_bin(16));
    assert!(bins[16] > 0);
}
