use crate::ma_status::MaStatus;
use crate::moving_average::MovingAverageSet;
use crate::quadrant::Quadrant;
use crate::rrg::{RrgPoint, RrgCoordinates};
use chrono::NaiveDate;
use serde::Serialize;

/// One sector's position on the rotation graph.
#[derive(Debug, Clone, Serialize)]
pub struct SectorSnapshot {
    pub ticker: String,
    pub label: String,
    pub quadrant: Quadrant,
    pub current: RrgPoint,
    pub trail: Vec<RrgPoint>,
}

impl SectorSnapshot {
    pub fn new(ticker: String, label: String, coords: RrgCoordinates) -> Self {
        Self {
            ticker,
            label,
            quadrant: coords.quadrant,
            current: coords.current,
            trail: coords.trail,
        }
    }
}

/// A ratio value some fixed number of observations back from the latest one,
/// kept so charts can mark where the ratio stood a window ago.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LookbackMark {
    pub offset: usize,
    pub date: NaiveDate,
    pub value: f64,
}

/// One ratio indicator's full series, moving averages, and classification.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub dates: Vec<NaiveDate>,
    pub ratio: Vec<Option<f64>>,
    pub averages: MovingAverageSet,
    pub latest_value: f64,
    pub status: MaStatus,
    pub lookback_marks: Vec<LookbackMark>,
}

/// Everything one run produced, handed to the rendering collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct RadarReport {
    pub run_date: NaiveDate,
    pub sectors: Vec<SectorSnapshot>,
    pub indicators: Vec<IndicatorSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DigestSector {
    pub ticker: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DigestIndicator {
    pub name: String,
    pub latest_value: f64,
    pub status: MaStatus,
}

/// The notification collaborator's view of a run: sectors worth flagging and
/// each indicator's latest reading. Text and markup are its concern.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    pub run_date: NaiveDate,
    pub leading: Vec<DigestSector>,
    pub improving: Vec<DigestSector>,
    pub indicators: Vec<DigestIndicator>,
}

impl RadarReport {
    pub fn digest(&self) -> Digest {
        let flagged = |wanted: Quadrant| {
            self.sectors
                .iter()
                .filter(move |sector| sector.quadrant == wanted)
                .map(|sector| DigestSector {
                    ticker: sector.ticker.clone(),
                    label: sector.label.clone(),
                })
                .collect()
        };
        Digest {
            run_date: self.run_date,
            leading: flagged(Quadrant::Leading),
            improving: flagged(Quadrant::Improving),
            indicators: self
                .indicators
                .iter()
                .map(|indicator| DigestIndicator {
                    name: indicator.name.clone(),
                    latest_value: indicator.latest_value,
                    status: indicator.status.clone(),
                })
                .collect(),
        }
    }
}
