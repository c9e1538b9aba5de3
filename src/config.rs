use anyhow::{Result, anyhow};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;

/// Everything one radar run needs to know, built once at startup and passed
/// by reference into the pipeline. Nothing reads ambient state after this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarConfig {
    pub benchmark: String,
    pub sectors: Vec<SectorSpec>,
    #[serde(default)]
    pub synthetic_indices: Vec<SyntheticIndexSpec>,
    #[serde(default)]
    pub indicators: Vec<RatioIndicatorSpec>,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectorSpec {
    pub ticker: String,
    pub label: String,
}

/// A proxy index assembled from weighted components. Weights are free reals
/// and need not sum to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticIndexSpec {
    pub ticker: String,
    pub label: String,
    pub components: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioIndicatorSpec {
    pub name: String,
    pub numerator: String,
    pub denominator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_lookback_days() -> u32 {
    1095 // 3 years of calendar days
}

impl RadarConfig {
    pub fn load() -> Result<Self> {
        Self::load_from_file("config.json")
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let config_str = fs::read_to_string(path).unwrap_or_else(|_| Self::default_config_json());
        let config: RadarConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    fn default_config_json() -> String {
        serde_json::to_string_pretty(&Self::default()).unwrap()
    }

    /// Real tickers to request from the data provider: the benchmark, every
    /// non-synthetic sector and indicator leg, and all synthetic components.
    /// Synthetic tickers themselves are never requested; they are built
    /// locally after the fetch.
    pub fn required_tickers(&self) -> Vec<String> {
        let synthetic: BTreeSet<&str> = self
            .synthetic_indices
            .iter()
            .map(|spec| spec.ticker.as_str())
            .collect();

        let mut tickers = BTreeSet::new();
        tickers.insert(self.benchmark.clone());
        for sector in &self.sectors {
            if !synthetic.contains(sector.ticker.as_str()) {
                tickers.insert(sector.ticker.clone());
            }
        }
        for indicator in &self.indicators {
            for leg in [&indicator.numerator, &indicator.denominator] {
                if !synthetic.contains(leg.as_str()) {
                    tickers.insert(leg.clone());
                }
            }
        }
        for spec in &self.synthetic_indices {
            tickers.extend(spec.components.keys().cloned());
        }
        tickers.into_iter().collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.benchmark.trim().is_empty() {
            return Err(anyhow!("benchmark ticker must not be empty"));
        }
        if self.sectors.is_empty() && self.indicators.is_empty() {
            return Err(anyhow!("nothing to monitor: no sectors and no indicators"));
        }
        for spec in &self.synthetic_indices {
            if spec.components.is_empty() {
                return Err(anyhow!(
                    "synthetic index {} has no components",
                    spec.ticker
                ));
            }
            for (component, weight) in &spec.components {
                if !weight.is_finite() {
                    return Err(anyhow!(
                        "synthetic index {}: weight for {} is not finite",
                        spec.ticker,
                        component
                    ));
                }
            }
        }
        info!(
            "config: benchmark {}, {} sectors, {} synthetic indices, {} indicators",
            self.benchmark,
            self.sectors.len(),
            self.synthetic_indices.len(),
            self.indicators.len()
        );
        Ok(())
    }
}

impl Default for RadarConfig {
    fn default() -> Self {
        let sector = |ticker: &str, label: &str| SectorSpec {
            ticker: ticker.to_string(),
            label: label.to_string(),
        };
        Self {
            benchmark: "SPY".to_string(),
            sectors: vec![
                sector("XLK", "Technology"),
                sector("ERH", "New Consumer Discretionary"),
                sector("XLC", "Communication Services"),
                sector("XLF", "Financials"),
                sector("XLI", "Industrials"),
                sector("XLB", "Materials"),
                sector("XLRE", "Real Estate"),
                sector("XLP", "Consumer Staples"),
                sector("XLV", "Health Care"),
                sector("XLU", "Utilities"),
                sector("XLE", "Energy"),
            ],
            synthetic_indices: vec![SyntheticIndexSpec {
                ticker: "ERH".to_string(),
                label: "New Consumer Discretionary".to_string(),
                components: BTreeMap::from([
                    ("PEJ".to_string(), 0.35),
                    ("XHB".to_string(), 0.35),
                    ("XRT".to_string(), 0.30),
                ]),
            }],
            indicators: vec![
                RatioIndicatorSpec {
                    name: "Real Consumer Cycle (ERH/XLP)".to_string(),
                    numerator: "ERH".to_string(),
                    denominator: "XLP".to_string(),
                    description: Some(
                        "Discretionary vs staples consumption with tech weight stripped out"
                            .to_string(),
                    ),
                },
                RatioIndicatorSpec {
                    name: "Expansion vs Defensive (XLI/XLU)".to_string(),
                    numerator: "XLI".to_string(),
                    denominator: "XLU".to_string(),
                    description: Some(
                        "Rising reads as expansion appetite, falling as risk-off".to_string(),
                    ),
                },
            ],
            lookback_days: default_lookback_days(),
        }
    }
}
