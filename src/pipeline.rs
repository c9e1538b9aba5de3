//! The one batch pipeline behind the radar: consolidate a price snapshot,
//! synthesize proxy indices, then classify sectors and ratio indicators.
//!
//! Per-entity failures (a missing ticker, a failed synthesis, too little
//! history) drop that entity and keep the run going; only an entirely empty
//! price table aborts the run.

use crate::config::{RadarConfig, RatioIndicatorSpec, SectorSpec};
use crate::error::RadarError;
use crate::ma_status::{self, MaStatus};
use crate::market_data::{PriceHistoryProvider, PriceTable};
use crate::moving_average::{MA_WINDOWS, MovingAverageSet};
use crate::ratio::RatioSeries;
use crate::report::{IndicatorSnapshot, LookbackMark, RadarReport, SectorSnapshot};
use crate::rrg::relative_rotation;
use crate::synthetic::build_synthetic;
use anyhow::Result;
use log::{debug, info, warn};

pub struct RadarPipeline {
    config: RadarConfig,
}

impl RadarPipeline {
    pub fn new(config: RadarConfig) -> Self {
        Self { config }
    }

    /// Fetch one snapshot of history and analyze it.
    pub fn run(&self, provider: &dyn PriceHistoryProvider) -> Result<RadarReport> {
        let tickers = self.config.required_tickers();
        info!(
            "requesting {} tickers over trailing {} days",
            tickers.len(),
            self.config.lookback_days
        );
        let table = provider.daily_closes(&tickers, self.config.lookback_days)?;
        self.analyze(table)
    }

    /// Classify every configured sector and indicator against the snapshot.
    pub fn analyze(&self, mut table: PriceTable) -> Result<RadarReport> {
        if table.is_empty() {
            return Err(RadarError::EmptyDataset.into());
        }

        for spec in &self.config.synthetic_indices {
            match build_synthetic(spec, &table) {
                Ok(series) => table.insert(series),
                // A failed synthesis drops the ticker for the whole run; the
                // sectors and indicators that referenced it skip themselves.
                Err(err) => warn!("{err}"),
            }
        }

        let run_date = table
            .last_date()
            .ok_or(RadarError::EmptyDataset)?;

        let mut sectors = Vec::new();
        for spec in &self.config.sectors {
            match self.sector_snapshot(&table, spec) {
                Ok(snapshot) => sectors.push(snapshot),
                Err(err) => warn!("skipping sector {}: {err}", spec.ticker),
            }
        }

        let mut indicators = Vec::new();
        for spec in &self.config.indicators {
            match self.indicator_snapshot(&table, spec) {
                Ok(snapshot) => indicators.push(snapshot),
                Err(err) => warn!("skipping indicator {}: {err}", spec.name),
            }
        }

        info!(
            "run {}: {} sectors classified, {} indicators evaluated",
            run_date,
            sectors.len(),
            indicators.len()
        );
        Ok(RadarReport {
            run_date,
            sectors,
            indicators,
        })
    }

    fn sector_snapshot(
        &self,
        table: &PriceTable,
        spec: &SectorSpec,
    ) -> Result<SectorSnapshot, RadarError> {
        let sector = table
            .get(&spec.ticker)
            .ok_or_else(|| RadarError::DataMissing(spec.ticker.clone()))?;
        let benchmark = table
            .get(&self.config.benchmark)
            .ok_or_else(|| RadarError::DataMissing(self.config.benchmark.clone()))?;
        let coords = relative_rotation(sector, benchmark).ok_or_else(|| {
            RadarError::DataMissing(format!(
                "{}: not enough aligned history for rotation coordinates",
                spec.ticker
            ))
        })?;
        debug!(
            "{}: rs_ratio {:.2}, rs_momentum {:.2}, {:?}",
            spec.ticker, coords.current.rs_ratio, coords.current.rs_momentum, coords.quadrant
        );
        Ok(SectorSnapshot::new(
            spec.ticker.clone(),
            spec.label.clone(),
            coords,
        ))
    }

    fn indicator_snapshot(
        &self,
        table: &PriceTable,
        spec: &RatioIndicatorSpec,
    ) -> Result<IndicatorSnapshot, RadarError> {
        let numerator = table
            .get(&spec.numerator)
            .ok_or_else(|| RadarError::DataMissing(spec.numerator.clone()))?;
        let denominator = table
            .get(&spec.denominator)
            .ok_or_else(|| RadarError::DataMissing(spec.denominator.clone()))?;

        let ratio = RatioSeries::compute(numerator, denominator);
        let (latest_idx, latest_value) = ratio.latest_defined().ok_or_else(|| {
            RadarError::DataMissing(format!(
                "{}/{}: no defined ratio values",
                spec.numerator, spec.denominator
            ))
        })?;

        let averages = MovingAverageSet::compute(&ratio.values);
        let status = match averages.snapshot_at(latest_idx) {
            Some(snapshot) => ma_status::classify(latest_value, &snapshot),
            None => MaStatus::Indeterminate {
                support_count: None,
            },
        };

        let lookback_marks = MA_WINDOWS
            .iter()
            .filter_map(|&offset| {
                let idx = latest_idx.checked_sub(offset)?;
                Some(LookbackMark {
                    offset,
                    date: ratio.dates[idx],
                    value: ratio.values[idx]?,
                })
            })
            .collect();

        Ok(IndicatorSnapshot {
            name: spec.name.clone(),
            description: spec.description.clone(),
            dates: ratio.dates,
            ratio: ratio.values,
            averages,
            latest_value,
            status,
            lookback_marks,
        })
    }
}
