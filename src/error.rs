use thiserror::Error;

/// Failures the radar run can report.
///
/// `DataMissing` and `Synthesis` are per-entity: the affected ticker is
/// dropped and the run continues. `EmptyDataset` aborts the run before any
/// classification happens. Values that are merely not-yet-defined (too little
/// history for a window) are not errors at all; they travel as `None` through
/// the series types.
#[derive(Debug, Error)]
pub enum RadarError {
    #[error("missing price history: {0}")]
    DataMissing(String),

    #[error("cannot synthesize {index}: component {component} has no price history")]
    Synthesis { index: String, component: String },

    #[error("consolidated price table is empty")]
    EmptyDataset,
}
