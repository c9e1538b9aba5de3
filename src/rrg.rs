//! Relative-rotation coordinates for a sector against its benchmark.
//!
//! Two chained 100-centered normalizations: the raw sector/benchmark ratio is
//! normalized against its own 60-day trailing mean (RS-Ratio), and RS-Ratio
//! is then normalized against its own 10-day trailing mean (RS-Momentum).
//! Both are pure functions of the raw ratio, so rescaling the sector series
//! by a positive constant leaves every coordinate unchanged.

use crate::market_data::PriceSeries;
use crate::moving_average::sma;
use crate::quadrant::Quadrant;
use crate::ratio::RatioSeries;
use serde::Serialize;

/// Trailing window for the relative-strength normalization.
pub const RS_WINDOW: usize = 60;
/// Trailing window for the momentum normalization of RS-Ratio.
pub const MOMENTUM_WINDOW: usize = 10;
/// Number of recent coordinate pairs kept for trajectory display.
pub const TRAIL_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RrgPoint {
    pub rs_ratio: f64,
    pub rs_momentum: f64,
}

/// Current position plus a short trailing trajectory on the rotation graph.
#[derive(Debug, Clone, Serialize)]
pub struct RrgCoordinates {
    pub current: RrgPoint,
    /// Most recent defined pairs, oldest first; the last entry is `current`.
    pub trail: Vec<RrgPoint>,
    pub quadrant: Quadrant,
}

/// Compute rotation coordinates for `sector` against `benchmark`.
///
/// Returns `None` when no coordinate pair is defined yet: RS-Ratio needs 60
/// raw ratio observations, and RS-Momentum needs 10 further RS-Ratio
/// observations on top of the first, so 70 raw observations in total.
pub fn relative_rotation(sector: &PriceSeries, benchmark: &PriceSeries) -> Option<RrgCoordinates> {
    let rs_raw = RatioSeries::compute(sector, benchmark);
    if rs_raw.is_empty() {
        return None;
    }

    let rs_ratio = normalize(&rs_raw.values, RS_WINDOW);
    let ratio_start = rs_ratio.iter().position(Option::is_some)?;

    let mut rs_momentum = normalize(&rs_ratio, MOMENTUM_WINDOW);
    // Momentum needs a full window of RS-Ratio observations beyond the first
    // one; points before that are still warming up.
    let warmup = (ratio_start + MOMENTUM_WINDOW).min(rs_momentum.len());
    for point in rs_momentum.iter_mut().take(warmup) {
        *point = None;
    }

    let pairs: Vec<RrgPoint> = rs_ratio
        .iter()
        .zip(&rs_momentum)
        .filter_map(|(ratio, momentum)| {
            Some(RrgPoint {
                rs_ratio: (*ratio)?,
                rs_momentum: (*momentum)?,
            })
        })
        .collect();

    let current = *pairs.last()?;
    let trail = pairs[pairs.len().saturating_sub(TRAIL_LEN)..].to_vec();
    Some(RrgCoordinates {
        current,
        trail,
        quadrant: Quadrant::classify(current.rs_ratio, current.rs_momentum),
    })
}

/// `100 * x / SMA_window(x)`, undefined wherever either side is.
fn normalize(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mean = sma(values, window);
    values
        .iter()
        .zip(mean)
        .map(|(value, mean)| {
            let (v, m) = ((*value)?, mean?);
            if m == 0.0 { None } else { Some(100.0 * v / m) }
        })
        .collect()
}
