//! Blue vs purple blessing cost comparison.
//!
//! A blue blessing adds 8 points towards the 90 a green-on-blue upgrade needs, so a
//! guaranteed success takes 90 / 8 = 11.25 blue blessings. One purple blessing always
//! guarantees it.

use crate::error::AppError;

const POINTS_NEEDED: f64 = 90.0;
const POINTS_PER_BLUE: f64 = 8.0;

/// Partial fill levels offered as gambles.
const PARTIAL_PERCENTS: [u32; 3] = [50, 70, 80];

/// Cost of gambling at a partial fill level.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialBlessing {
    pub percent: u32,
    pub cost: f64,
    /// Purple cost minus `cost`; negative when the gamble costs more than a purple.
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlessingAnalysis {
    pub blue_total: f64,
    pub purple_total: f64,
    pub partials: Vec<PartialBlessing>,
}

impl BlessingAnalysis {
    /// Blue wins only when strictly cheaper.
    pub fn blue_is_cheaper(&self) -> bool {
        self.blue_total < self.purple_total
    }
}

/// Compares the cost of guaranteeing an upgrade with blue versus purple blessings.
///
/// # Returns
/// - `Ok(BlessingAnalysis)` - Totals and partial-fill gambles
/// - `Err(AppError::Validation)` - A cost is negative
pub fn analyze(blue_cost: i64, purple_cost: i64) -> Result<BlessingAnalysis, AppError> {
    if blue_cost < 0 || purple_cost < 0 {
        return Err(AppError::Validation(
            "Blessing costs cannot be negative.".to_string(),
        ));
    }

    let blue = blue_cost as f64;
    let purple_total = purple_cost as f64;
    let blues_needed = POINTS_NEEDED / POINTS_PER_BLUE;

    let partials = PARTIAL_PERCENTS
        .into_iter()
        .map(|percent| {
            let cost = f64::from(percent) / 100.0 * blues_needed * blue;
            PartialBlessing {
                percent,
                cost,
                savings: purple_total - cost,
            }
        })
        .collect();

    Ok(BlessingAnalysis {
        blue_total: blues_needed * blue,
        purple_total,
        partials,
    })
}

/// Twenty-block bar filled to `percent`.
pub fn percent_bar(percent: u32) -> String {
    let filled = (percent.min(100) * 20 / 100) as usize;
    format!("{}{}", "\u{2588}".repeat(filled), "\u{2591}".repeat(20 - filled))
}
