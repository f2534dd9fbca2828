//! Daily readings and the personal baseline they are measured against.
//!
//! Both types are owned and persisted by an external store; the core treats
//! them as read-only input and trusts that supplied values are range-sane.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's worth of measured and lifestyle signals.
///
/// Histories handed to the scoring engine must be ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReading {
    /// Calendar date of the reading
    pub date: NaiveDate,
    /// HRV (RMSSD-style) in milliseconds
    pub hrv: f64,
    /// Resting heart rate in bpm, when measured
    pub heart_rate: Option<f64>,
    /// Hours spent sedentary
    pub sedentary_hours: f64,
    /// Self-reported sleep quality, 0-10
    pub sleep_quality: f64,
    /// Screen-time stress index, when tracked
    pub screen_stress_index: Option<f64>,
    /// Dietary impact for the day, 0-1, when tracked
    pub food_impact: Option<f64>,
}

/// Personal reference values established during an initial reading.
///
/// Later readings are interpreted relative to these. A baseline with zero
/// HRV is an invalid configuration and is rejected by the scoring engine
/// rather than propagated as an infinite delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    /// Reference HRV in milliseconds
    pub hrv: f64,
    /// Reference sedentary hours
    pub sedentary_hours: f64,
    /// Reference sleep quality, 0-10
    pub sleep_quality: f64,
    /// Reference screen-time stress index, when tracked
    pub screen_stress_index: Option<f64>,
}

impl Baseline {
    /// Establish a baseline from a user's first reading
    pub fn from_reading(reading: &DailyReading) -> Self {
        Self {
            hrv: reading.hrv,
            sedentary_hours: reading.sedentary_hours,
            sleep_quality: reading.sleep_quality,
            screen_stress_index: reading.screen_stress_index,
        }
    }

    /// Check that the baseline can serve as a divisor for relative deltas
    pub fn is_valid(&self) -> bool {
        self.hrv > 0.0
    }
}
