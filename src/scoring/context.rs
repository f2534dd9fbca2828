//! Flattened health context consumed by external narrative and alert
//! generation.

use serde::{Deserialize, Serialize};

use crate::domain::{Baseline, DailyReading};

use super::css::{calculate_css, Trend};

/// Sleep quality reported when no history or baseline exists
const NEUTRAL_SLEEP_QUALITY: f64 = 5.0;

/// Stable, typed snapshot of a user's current cardiovascular state.
///
/// The shape of this record is a contract: downstream narrative generation
/// reads these fields by name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthContext {
    /// Composite stress score, 0-100
    pub score: u8,
    /// Recent HRV trend
    pub trend: Trend,
    /// Latest measured HRV in milliseconds
    pub hrv_ms: f64,
    /// Latest HRV deviation from baseline, percent
    pub hrv_delta_percent: f64,
    /// Latest sedentary hours
    pub sedentary_hours: f64,
    /// Latest sleep quality, 0-10
    pub sleep_quality: f64,
    /// Latest screen-stress index, 0.0 when untracked
    pub screen_stress_index: f64,
    /// Consecutive day-over-day HRV declines
    pub worsening_days: u32,
}

impl HealthContext {
    /// Neutral context for users with no baseline or no history
    fn neutral() -> Self {
        Self {
            score: 0,
            trend: Trend::Stable,
            hrv_ms: 0.0,
            hrv_delta_percent: 0.0,
            sedentary_hours: 0.0,
            sleep_quality: NEUTRAL_SLEEP_QUALITY,
            screen_stress_index: 0.0,
            worsening_days: 0,
        }
    }
}

/// Derive the health context from a reading history and optional baseline.
///
/// Absent baseline, empty history, or a baseline unusable as a divisor all
/// yield the fixed neutral context; this path never errors because the
/// output feeds automated decision logic that must not crash a scheduling
/// loop.
pub fn get_health_context(readings: &[DailyReading], baseline: Option<&Baseline>) -> HealthContext {
    let (Some(baseline), Some(latest)) = (baseline, readings.last()) else {
        return HealthContext::neutral();
    };

    let Ok(css) = calculate_css(readings, baseline) else {
        return HealthContext::neutral();
    };

    HealthContext {
        score: css.score,
        trend: css.trend,
        hrv_ms: latest.hrv,
        hrv_delta_percent: css.hrv_delta_percent,
        sedentary_hours: latest.sedentary_hours,
        sleep_quality: latest.sleep_quality,
        screen_stress_index: latest.screen_stress_index.unwrap_or(0.0),
        worsening_days: css.worsening_days,
    }
}
