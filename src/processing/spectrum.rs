//! Passband-restricted dominant frequency extraction.

use rustfft::{num_complex::Complex, FftPlanner};

/// Find the dominant frequency of `signal` inside `[min_hz, max_hz]`.
///
/// Returns `(frequency_hz, magnitude)` for the passband bin of maximal
/// spectral magnitude, or `None` when the passband maps to no usable bin or
/// no bin has positive magnitude. Ties resolve to the lowest-frequency bin.
pub fn dominant_frequency(
    signal: &[f64],
    sample_rate_hz: f64,
    min_hz: f64,
    max_hz: f64,
) -> Option<(f64, f64)> {
    if signal.len() < 2 {
        return None;
    }

    let spectrum = magnitude_spectrum(signal);
    let n = spectrum.len() * 2;
    let freq_resolution = sample_rate_hz / n as f64;

    let min_bin = ((min_hz / freq_resolution).ceil() as usize).max(1);
    let max_bin = (max_hz / freq_resolution).floor() as usize;

    if min_bin >= spectrum.len() || min_bin > max_bin {
        return None;
    }

    let mut peak_magnitude = 0.0;
    let mut peak_bin = None;

    for bin in min_bin..=max_bin.min(spectrum.len() - 1) {
        if spectrum[bin] > peak_magnitude {
            peak_magnitude = spectrum[bin];
            peak_bin = Some(bin);
        }
    }

    peak_bin.map(|bin| (bin as f64 * freq_resolution, peak_magnitude))
}

/// Magnitude spectrum over positive frequencies, Hann-windowed and
/// zero-padded to the next power of two.
fn magnitude_spectrum(signal: &[f64]) -> Vec<f64> {
    let n = signal.len().next_power_of_two();
    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);

    let len = signal.len() as f64;
    let mut buffer: Vec<Complex<f64>> = signal
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let window = 0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / len).cos());
            Complex::new(x * window, 0.0)
        })
        .collect();
    buffer.resize(n, Complex::new(0.0, 0.0));

    fft.process(&mut buffer);

    buffer.iter().take(n / 2).map(|c| c.norm()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq_hz: f64, sample_rate: f64, num_samples: usize) -> Vec<f64> {
        (0..num_samples)
            .map(|i| {
                let t = i as f64 / sample_rate;
                (2.0 * std::f64::consts::PI * freq_hz * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_finds_pulse_frequency() {
        let signal = sine(1.2, 30.0, 300);
        let (freq, magnitude) = dominant_frequency(&signal, 30.0, 0.7, 4.0).unwrap();

        assert!((freq - 1.2).abs() < 0.1, "got {freq}");
        assert!(magnitude > 0.0);
    }

    #[test]
    fn test_rejects_out_of_band_peak() {
        // 0.2 Hz is well below the passband; inside it there is only a weak
        // 2.0 Hz component which should win the passband scan
        let slow = sine(0.2, 30.0, 300);
        let fast = sine(2.0, 30.0, 300);
        let signal: Vec<f64> = slow
            .iter()
            .zip(&fast)
            .map(|(s, f)| 10.0 * s + 0.5 * f)
            .collect();

        let (freq, _) = dominant_frequency(&signal, 30.0, 0.7, 4.0).unwrap();
        assert!((freq - 2.0).abs() < 0.2, "got {freq}");
    }

    #[test]
    fn test_too_short_signal() {
        assert!(dominant_frequency(&[1.0], 30.0, 0.7, 4.0).is_none());
    }

    #[test]
    fn test_flat_signal_has_no_positive_peak() {
        let signal = vec![0.0; 300];
        assert!(dominant_frequency(&signal, 30.0, 0.7, 4.0).is_none());
    }
}
