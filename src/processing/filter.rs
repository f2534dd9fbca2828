//! Band-limiting and basic statistics for the optical pulse signal.

/// Arithmetic mean; 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0.0 for an empty slice
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Centered moving average with shrinking windows at the edges.
///
/// Output has the same length as the input so downstream frequency
/// resolution is preserved.
pub fn moving_average(signal: &[f64], window: usize) -> Vec<f64> {
    if signal.is_empty() || window <= 1 {
        return signal.to_vec();
    }

    let half = window / 2;
    (0..signal.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(signal.len());
            mean(&signal[lo..hi])
        })
        .collect()
}

/// Approximate a bandpass filter with a pair of moving averages.
///
/// Subtracting a long moving average sized to the low cutoff removes the DC
/// offset and sub-passband drift; a short moving average sized to the high
/// cutoff then smooths out-of-band noise. Downstream peak selection is
/// itself passband-restricted, which makes this cheap approximation
/// acceptable in place of a true IIR/FIR design.
pub fn band_limit(signal: &[f64], sample_rate_hz: f64, low_hz: f64, high_hz: f64) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let low_window = ((sample_rate_hz / low_hz).round() as usize).max(2);
    let high_window = ((sample_rate_hz / high_hz).round() as usize).max(1);

    let trend = moving_average(signal, low_window);
    let detrended: Vec<f64> = signal.iter().zip(&trend).map(|(s, t)| s - t).collect();

    moving_average(&detrended, high_window)
}
