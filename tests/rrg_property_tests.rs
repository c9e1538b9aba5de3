// Property tests for the numeric invariants the rotation pipeline promises.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use sector_radar::market_data::PriceSeries;
use sector_radar::moving_average::sma;
use sector_radar::quadrant::{CENTER, Quadrant};
use sector_radar::rrg::relative_rotation;

fn series_from(ticker: &str, values: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let closes = values
        .iter()
        .enumerate()
        .map(|(i, v)| (start + Duration::days(i as i64), *v))
        .collect();
    PriceSeries::new(ticker, closes)
}

fn close_to(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(1.0)
}

proptest! {
    // Scaling the sector series by a positive constant cancels inside the
    // ratio-of-ratios normalization, so every coordinate must be unchanged.
    #[test]
    fn rescaled_sector_produces_identical_coordinates(
        prices in prop::collection::vec(1.0f64..500.0, 70..120),
        benchmark_level in 10.0f64..1000.0,
        scale in 0.01f64..100.0,
    ) {
        let benchmark = series_from("SPY", &vec![benchmark_level; prices.len()]);
        let sector = series_from("SEC", &prices);
        let scaled: Vec<f64> = prices.iter().map(|p| p * scale).collect();
        let scaled_sector = series_from("SEC", &scaled);

        let base = relative_rotation(&sector, &benchmark).unwrap();
        let rescaled = relative_rotation(&scaled_sector, &benchmark).unwrap();

        prop_assert!(close_to(base.current.rs_ratio, rescaled.current.rs_ratio));
        prop_assert!(close_to(base.current.rs_momentum, rescaled.current.rs_momentum));
        prop_assert_eq!(base.trail.len(), rescaled.trail.len());
        for (a, b) in base.trail.iter().zip(&rescaled.trail) {
            prop_assert!(close_to(a.rs_ratio, b.rs_ratio));
            prop_assert!(close_to(a.rs_momentum, b.rs_momentum));
        }
    }

    // Exactly one regime for any coordinate pair, with ties resolving to
    // Weakening.
    #[test]
    fn quadrant_partition_is_total(x in -1e6f64..1e6, y in -1e6f64..1e6) {
        let quadrant = Quadrant::classify(x, y);
        let expected = if x > CENTER && y > CENTER {
            Quadrant::Leading
        } else if x < CENTER && y > CENTER {
            Quadrant::Improving
        } else if x < CENTER && y < CENTER {
            Quadrant::Lagging
        } else {
            Quadrant::Weakening
        };
        prop_assert_eq!(quadrant, expected);
    }

    // The rolling mean matches a directly computed window mean wherever it
    // is defined, and is undefined before the window fills.
    #[test]
    fn sma_agrees_with_direct_window_mean(
        values in prop::collection::vec(-1000.0f64..1000.0, 1..150),
        window in 1usize..40,
    ) {
        let input: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        let out = sma(&input, window);
        for (t, result) in out.iter().enumerate() {
            if t + 1 < window {
                prop_assert_eq!(*result, None);
            } else {
                let direct: f64 =
                    values[t + 1 - window..=t].iter().sum::<f64>() / window as f64;
                prop_assert!((result.unwrap() - direct).abs() < 1e-6);
            }
        }
    }
}
