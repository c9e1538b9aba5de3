//! Sector rotation radar: turns daily price history into relative-rotation
//! coordinates and moving-average regime labels for a configured set of
//! sectors, synthetic proxy indices, and price-ratio indicators.

pub mod config;
pub mod error;
pub mod ma_status;
pub mod market_data;
pub mod moving_average;
pub mod pipeline;
pub mod quadrant;
pub mod ratio;
pub mod report;
pub mod rrg;
pub mod synthetic;
