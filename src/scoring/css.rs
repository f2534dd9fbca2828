//! Composite Cardiovascular Stress Score over a reading history.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Baseline, DailyReading};
use crate::{CardioError, Result};

/// Weight of the HRV-deviation component
pub const WEIGHT_HRV: f64 = 0.35;
/// Weight of the sedentary-hours component
pub const WEIGHT_SEDENTARY: f64 = 0.25;
/// Weight of the sleep-quality component
pub const WEIGHT_SLEEP: f64 = 0.20;
/// Weight of the dietary-impact component
pub const WEIGHT_FOOD: f64 = 0.12;
/// Weight of the screen-stress component
pub const WEIGHT_SCREEN: f64 = 0.08;

/// Score above which a sustained decline triggers an alert
pub const ALERT_SCORE_THRESHOLD: u8 = 65;
/// Consecutive worsening transitions required to trigger an alert
pub const ALERT_WORSENING_DAYS: u32 = 5;

/// Readings per trend window (recent vs preceding)
const TREND_WINDOW: usize = 3;
/// Relative HRV change beyond which the trend leaves "stable" (percent)
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Practical daily ceiling for sedentary hours
const SEDENTARY_CEILING_HOURS: f64 = 12.0;

/// Direction the recent HRV history is moving in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Recent HRV meaningfully above the preceding window
    Improving,
    /// No meaningful change between windows
    Stable,
    /// Recent HRV meaningfully below the preceding window
    Worsening,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Worsening => write!(f, "worsening"),
        }
    }
}

/// Result of one stress-score evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CssResult {
    /// Composite score, 0-100
    pub score: u8,
    /// Trend of recent HRV relative to the preceding window
    pub trend: Trend,
    /// Consecutive day-over-day HRV declines ending at the latest reading
    pub worsening_days: u32,
    /// Whether the score and decline streak together warrant an alert
    pub should_alert: bool,
    /// Latest HRV deviation from baseline, percent
    pub hrv_delta_percent: f64,
}

impl CssResult {
    /// Neutral result returned for an empty reading history
    fn empty_history() -> Self {
        Self {
            score: 0,
            trend: Trend::Stable,
            worsening_days: 0,
            should_alert: false,
            hrv_delta_percent: 0.0,
        }
    }
}

/// Compute the composite stress score over a chronological reading history.
///
/// `readings` must be ordered oldest first. An empty history yields the
/// neutral result rather than an error; a baseline with zero HRV fails with
/// [`CardioError::InvalidBaseline`] instead of producing an infinite delta.
/// Recomputation from the same inputs always yields the same output.
pub fn calculate_css(readings: &[DailyReading], baseline: &Baseline) -> Result<CssResult> {
    let Some(latest) = readings.last() else {
        return Ok(CssResult::empty_history());
    };

    if !baseline.is_valid() {
        return Err(CardioError::InvalidBaseline);
    }

    let hrv_delta_percent = (latest.hrv - baseline.hrv) / baseline.hrv * 100.0;

    // HRV below baseline raises perceived stress; 50 is the neutral pivot
    let hrv_score = (50.0 - hrv_delta_percent).clamp(0.0, 100.0);
    let sedentary_score =
        (latest.sedentary_hours / SEDENTARY_CEILING_HOURS * 100.0).clamp(0.0, 100.0);
    let sleep_score = ((1.0 - latest.sleep_quality / 10.0) * 100.0).clamp(0.0, 100.0);
    let food_score = (latest.food_impact.unwrap_or(0.0) * 10.0).clamp(0.0, 100.0);
    let screen_score = (latest.screen_stress_index.unwrap_or(0.0) * 10.0).clamp(0.0, 100.0);

    let weighted = WEIGHT_HRV * hrv_score
        + WEIGHT_SEDENTARY * sedentary_score
        + WEIGHT_SLEEP * sleep_score
        + WEIGHT_FOOD * food_score
        + WEIGHT_SCREEN * screen_score;
    let score = weighted.round().clamp(0.0, 100.0) as u8;

    let trend = hrv_trend(readings);
    let worsening_days = worsening_streak(readings);
    let should_alert = score > ALERT_SCORE_THRESHOLD && worsening_days >= ALERT_WORSENING_DAYS;

    debug!(
        score,
        %trend,
        worsening_days,
        hrv_delta_percent,
        "stress score computed"
    );

    Ok(CssResult {
        score,
        trend,
        worsening_days,
        should_alert,
        hrv_delta_percent,
    })
}

/// Compare mean HRV of the most recent window against the preceding one.
///
/// Requires at least one reading in each window; otherwise the trend stays
/// stable.
fn hrv_trend(readings: &[DailyReading]) -> Trend {
    if readings.len() < 2 {
        return Trend::Stable;
    }

    let recent_start = readings.len().saturating_sub(TREND_WINDOW);
    let prior_start = recent_start.saturating_sub(TREND_WINDOW);

    let recent = &readings[recent_start..];
    let prior = &readings[prior_start..recent_start];

    if recent.is_empty() || prior.is_empty() {
        return Trend::Stable;
    }

    let recent_mean = recent.iter().map(|r| r.hrv).sum::<f64>() / recent.len() as f64;
    let prior_mean = prior.iter().map(|r| r.hrv).sum::<f64>() / prior.len() as f64;

    if prior_mean == 0.0 {
        return Trend::Stable;
    }

    let change_pct = (recent_mean - prior_mean) / prior_mean * 100.0;

    if change_pct < -TREND_THRESHOLD_PCT {
        Trend::Worsening
    } else if change_pct > TREND_THRESHOLD_PCT {
        Trend::Improving
    } else {
        Trend::Stable
    }
}

/// Count consecutive day-over-day HRV declines walking back from the most
/// recent reading. This counts decreasing transitions, not readings.
fn worsening_streak(readings: &[DailyReading]) -> u32 {
    let mut streak = 0;
    for pair in readings.windows(2).rev() {
        if pair[1].hrv < pair[0].hrv {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}
