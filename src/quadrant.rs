use serde::{Deserialize, Serialize};

/// Center of the rotation graph on both axes.
pub const CENTER: f64 = 100.0;

/// Rotation regime of a sector relative to the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    Leading,
    Improving,
    Lagging,
    Weakening,
}

impl Quadrant {
    /// Classify a coordinate pair against the (100, 100) center.
    ///
    /// Weakening is the fallthrough arm, so any tie on either axis lands
    /// there.
    pub fn classify(rs_ratio: f64, rs_momentum: f64) -> Quadrant {
        if rs_ratio > CENTER && rs_momentum > CENTER {
            Quadrant::Leading
        } else if rs_ratio < CENTER && rs_momentum > CENTER {
            Quadrant::Improving
        } else if rs_ratio < CENTER && rs_momentum < CENTER {
            Quadrant::Lagging
        } else {
            Quadrant::Weakening
        }
    }
}
