//! Cardiovascular stress scoring over daily reading histories.

mod context;
mod css;

pub use context::{get_health_context, HealthContext};
pub use css::{
    calculate_css, CssResult, Trend, ALERT_SCORE_THRESHOLD, ALERT_WORSENING_DAYS, WEIGHT_FOOD,
    WEIGHT_HRV, WEIGHT_SCREEN, WEIGHT_SEDENTARY, WEIGHT_SLEEP,
};
