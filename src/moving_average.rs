//! Rolling simple and exponential moving averages over sparse daily series.
//!
//! Values are `Option<f64>`: a point is `None` until enough history exists
//! (or wherever the underlying ratio was undefined), and classifiers must
//! treat `None` as not-yet-classifiable rather than coerce it to a number.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Windows tracked for every ratio indicator.
pub const MA_WINDOWS: [usize; 3] = [20, 60, 120];

/// Trailing arithmetic mean over `window` observations.
///
/// `out[t]` is defined iff `t >= window - 1` and every input in the trailing
/// window is defined; an undefined input poisons every window that covers it.
pub fn sma(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }
    for t in (window - 1)..values.len() {
        let slice = &values[t + 1 - window..=t];
        let defined: Vec<f64> = slice.iter().flatten().copied().collect();
        if defined.len() == window {
            out[t] = Some(defined.mean());
        }
    }
    out
}

/// Exponential moving average with smoothing factor `alpha = 2 / (window + 1)`.
///
/// The first defined observation seeds the series directly; there is no
/// warm-up average. Undefined inputs stay undefined in the output and the
/// recurrence resumes from the last computed value at the next defined input.
pub fn ema(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    let alpha = 2.0 / (window as f64 + 1.0);
    let mut prev: Option<f64> = None;
    for (t, value) in values.iter().enumerate() {
        if let Some(x) = value {
            let next = match prev {
                None => *x,
                Some(p) => alpha * x + (1.0 - alpha) * p,
            };
            out[t] = Some(next);
            prev = Some(next);
        }
    }
    out
}

/// The six tracked averages of a ratio series, index-aligned with the input.
#[derive(Debug, Clone, Serialize)]
pub struct MovingAverageSet {
    pub sma20: Vec<Option<f64>>,
    pub ema20: Vec<Option<f64>>,
    pub sma60: Vec<Option<f64>>,
    pub ema60: Vec<Option<f64>>,
    pub sma120: Vec<Option<f64>>,
    pub ema120: Vec<Option<f64>>,
}

impl MovingAverageSet {
    pub fn compute(values: &[Option<f64>]) -> Self {
        Self {
            sma20: sma(values, 20),
            ema20: ema(values, 20),
            sma60: sma(values, 60),
            ema60: ema(values, 60),
            sma120: sma(values, 120),
            ema120: ema(values, 120),
        }
    }

    /// All six named averages at one index, or `None` if any is undefined.
    pub fn snapshot_at(&self, idx: usize) -> Option<[(&'static str, f64); 6]> {
        Some([
            ("SMA20", *self.sma20.get(idx)?.as_ref()?),
            ("EMA20", *self.ema20.get(idx)?.as_ref()?),
            ("SMA60", *self.sma60.get(idx)?.as_ref()?),
            ("EMA60", *self.ema60.get(idx)?.as_ref()?),
            ("SMA120", *self.sma120.get(idx)?.as_ref()?),
            ("EMA120", *self.ema120.get(idx)?.as_ref()?),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defined(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn sma_defined_exactly_from_window_minus_one() {
        let input = defined(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let out = sma(&input, 3);
        assert_eq!(out[0], None);
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(2.0));
        assert_eq!(out[3], Some(3.0));
        assert_eq!(out[4], Some(4.0));
    }

    #[test]
    fn sma_window_containing_undefined_is_undefined() {
        let input = vec![Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0)];
        let out = sma(&input, 3);
        assert_eq!(out[2], None);
        assert_eq!(out[3], None);
        assert_eq!(out[4], None);
        assert_eq!(out[5], Some(5.0));
    }

    #[test]
    fn ema_matches_hand_computed_recurrence() {
        // window 3 => alpha = 0.5
        let input = defined(&[2.0, 4.0, 4.0, 8.0, 6.0]);
        let out = ema(&input, 3);
        let expected = [2.0, 3.0, 3.5, 5.75, 5.875];
        for (got, want) in out.iter().zip(expected) {
            assert!((got.unwrap() - want).abs() < 1e-12);
        }
    }

    #[test]
    fn ema_seeds_with_first_observation_not_a_warmup_mean() {
        // window 4 => alpha = 0.4; an SMA-seeded EMA would differ from index 3 on
        let input = defined(&[1.0, 2.0, 3.0, 4.0]);
        let out = ema(&input, 4);
        assert_eq!(out[0], Some(1.0));
        assert!((out[1].unwrap() - 1.4).abs() < 1e-12);
        assert!((out[2].unwrap() - 2.04).abs() < 1e-12);
        assert!((out[3].unwrap() - 2.824).abs() < 1e-12);
    }

    #[test]
    fn ema_skips_undefined_points_and_resumes() {
        let input = vec![Some(2.0), None, Some(4.0)];
        let out = ema(&input, 3);
        assert_eq!(out[0], Some(2.0));
        assert_eq!(out[1], None);
        assert_eq!(out[2], Some(3.0));
    }

    #[test]
    fn snapshot_requires_all_six_defined() {
        let input = defined(&(1..=130).map(f64::from).collect::<Vec<_>>());
        let set = MovingAverageSet::compute(&input);
        assert!(set.snapshot_at(118).is_none()); // SMA120 not yet defined
        let snap = set.snapshot_at(119).unwrap();
        assert_eq!(snap[0].0, "SMA20");
        assert!((snap[4].1 - 60.5).abs() < 1e-12); // mean of 1..=120
    }
}
