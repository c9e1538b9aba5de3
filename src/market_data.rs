use anyhow::{Context, Result};
use chrono::NaiveDate;
use mockall::automock;
use std::collections::BTreeMap;
use std::fs;

/// Daily adjusted-close history for a single ticker, sorted by date.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    pub ticker: String,
    pub closes: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
    /// Build a series from unordered observations. Duplicate dates keep the
    /// last value seen.
    pub fn new(ticker: impl Into<String>, mut closes: Vec<(NaiveDate, f64)>) -> Self {
        closes.sort_by_key(|(date, _)| *date);
        closes.dedup_by(|next, prev| {
            if next.0 == prev.0 {
                prev.1 = next.1;
                true
            } else {
                false
            }
        });
        Self {
            ticker: ticker.into(),
            closes,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.closes.last().map(|(date, _)| *date)
    }

    pub fn value_on(&self, date: NaiveDate) -> Option<f64> {
        self.closes
            .binary_search_by_key(&date, |(d, _)| *d)
            .ok()
            .map(|idx| self.closes[idx].1)
    }

    /// Elementwise pairing over the date intersection of two series.
    pub fn aligned_with(&self, other: &PriceSeries) -> Vec<(NaiveDate, f64, f64)> {
        let mut paired = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.closes.len() && j < other.closes.len() {
            let (da, va) = self.closes[i];
            let (db, vb) = other.closes[j];
            if da == db {
                paired.push((da, va, vb));
                i += 1;
                j += 1;
            } else if da < db {
                i += 1;
            } else {
                j += 1;
            }
        }
        paired
    }
}

/// One run's consolidated snapshot of price history, keyed by ticker.
/// Synthetic series are inserted alongside the raw columns.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    columns: BTreeMap<String, PriceSeries>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, series: PriceSeries) {
        self.columns.insert(series.ticker.clone(), series);
    }

    pub fn get(&self, ticker: &str) -> Option<&PriceSeries> {
        self.columns.get(ticker)
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.columns.contains_key(ticker)
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Most recent date present in any column.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.columns.values().filter_map(PriceSeries::last_date).max()
    }
}

/// Seam to the market-data collaborator. One blocking call per run; retry and
/// rate-limit policy live on the implementor's side.
#[automock]
pub trait PriceHistoryProvider {
    /// Daily adjusted closes for the requested tickers over the trailing
    /// `period_days`. Tickers with no available history are simply absent
    /// from the returned table.
    fn daily_closes(&self, tickers: &[String], period_days: u32) -> Result<PriceTable>;
}

/// Provider backed by a JSON snapshot of the form
/// `{"SPY": {"2024-01-02": 470.1, ...}, ...}`.
pub struct JsonFileProvider {
    path: String,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PriceHistoryProvider for JsonFileProvider {
    fn daily_closes(&self, tickers: &[String], period_days: u32) -> Result<PriceTable> {
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading price snapshot {}", self.path))?;
        let parsed: BTreeMap<String, BTreeMap<NaiveDate, f64>> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing price snapshot {}", self.path))?;

        let last_date = parsed
            .values()
            .flat_map(|closes| closes.keys().copied())
            .max();

        let mut table = PriceTable::new();
        for ticker in tickers {
            let Some(closes) = parsed.get(ticker) else {
                continue;
            };
            let points: Vec<(NaiveDate, f64)> = match last_date {
                Some(last) => {
                    let cutoff = last - chrono::Duration::days(i64::from(period_days));
                    closes
                        .iter()
                        .filter(|(date, _)| **date >= cutoff)
                        .map(|(date, value)| (*date, *value))
                        .collect()
                }
                None => Vec::new(),
            };
            if !points.is_empty() {
                table.insert(PriceSeries::new(ticker.clone(), points));
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn series_sorts_and_dedups_on_construction() {
        let series = PriceSeries::new(
            "SPY",
            vec![
                (date(2024, 1, 3), 2.0),
                (date(2024, 1, 2), 1.0),
                (date(2024, 1, 3), 3.0),
            ],
        );
        assert_eq!(series.len(), 2);
        assert_eq!(series.value_on(date(2024, 1, 3)), Some(3.0));
    }

    #[test]
    fn aligned_with_intersects_on_date() {
        let a = PriceSeries::new(
            "A",
            vec![
                (date(2024, 1, 2), 1.0),
                (date(2024, 1, 3), 2.0),
                (date(2024, 1, 5), 3.0),
            ],
        );
        let b = PriceSeries::new(
            "B",
            vec![
                (date(2024, 1, 3), 10.0),
                (date(2024, 1, 4), 11.0),
                (date(2024, 1, 5), 12.0),
            ],
        );
        let paired = a.aligned_with(&b);
        assert_eq!(
            paired,
            vec![(date(2024, 1, 3), 2.0, 10.0), (date(2024, 1, 5), 3.0, 12.0)]
        );
    }
}
