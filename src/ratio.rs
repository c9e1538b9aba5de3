use crate::market_data::PriceSeries;
use chrono::NaiveDate;
use serde::Serialize;

/// A derived numerator/denominator series over the date intersection of its
/// inputs. A point is `None` where the denominator was zero; downstream
/// rolling computations keep that hole instead of inventing a value.
#[derive(Debug, Clone, Serialize)]
pub struct RatioSeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<Option<f64>>,
}

impl RatioSeries {
    pub fn compute(numerator: &PriceSeries, denominator: &PriceSeries) -> Self {
        let paired = numerator.aligned_with(denominator);
        let mut dates = Vec::with_capacity(paired.len());
        let mut values = Vec::with_capacity(paired.len());
        for (date, num, den) in paired {
            dates.push(date);
            values.push(if den == 0.0 { None } else { Some(num / den) });
        }
        Self { dates, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index and value of the most recent defined observation.
    pub fn latest_defined(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, value)| value.map(|v| (idx, v)))
    }

    /// Index of the first defined observation.
    pub fn first_defined_index(&self) -> Option<usize> {
        self.values.iter().position(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn ratio_divides_over_date_intersection() {
        let num = PriceSeries::new("A", vec![(date(1), 10.0), (date(2), 20.0), (date(4), 30.0)]);
        let den = PriceSeries::new("B", vec![(date(2), 5.0), (date(3), 4.0), (date(4), 10.0)]);
        let ratio = RatioSeries::compute(&num, &den);
        assert_eq!(ratio.dates, vec![date(2), date(4)]);
        assert_eq!(ratio.values, vec![Some(4.0), Some(3.0)]);
    }

    #[test]
    fn zero_denominator_is_undefined_not_an_error() {
        let num = PriceSeries::new("A", vec![(date(1), 10.0), (date(2), 20.0)]);
        let den = PriceSeries::new("B", vec![(date(1), 0.0), (date(2), 4.0)]);
        let ratio = RatioSeries::compute(&num, &den);
        assert_eq!(ratio.values, vec![None, Some(5.0)]);
        assert_eq!(ratio.latest_defined(), Some((1, 5.0)));
        assert_eq!(ratio.first_defined_index(), Some(1));
    }

    #[test]
    fn disjoint_dates_produce_an_empty_ratio() {
        let num = PriceSeries::new("A", vec![(date(1), 10.0)]);
        let den = PriceSeries::new("B", vec![(date(2), 4.0)]);
        let ratio = RatioSeries::compute(&num, &den);
        assert!(ratio.is_empty());
        assert_eq!(ratio.latest_defined(), None);
    }
}
