use anyhow::{Context, Result};
use log::info;
use sector_radar::config::RadarConfig;
use sector_radar::market_data::JsonFileProvider;
use sector_radar::pipeline::RadarPipeline;
use std::env;
use std::fs;

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG not set
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();
    info!("Starting sector rotation radar");

    let args: Vec<String> = env::args().collect();
    let config_file = args.get(1).map(String::as_str).unwrap_or("config.json");
    let snapshot_file = args.get(2).map(String::as_str).unwrap_or("prices.json");

    info!("Loading configuration from: {}", config_file);
    let config = RadarConfig::load_from_file(config_file)?;
    config.validate()?;

    let provider = JsonFileProvider::new(snapshot_file);
    let pipeline = RadarPipeline::new(config);
    let report = pipeline.run(&provider)?;

    // Full records for the rendering collaborator; digest for notification.
    let report_path = "radar_report.json";
    fs::write(report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("writing {report_path}"))?;
    info!("wrote {report_path}");

    println!("{}", serde_json::to_string_pretty(&report.digest())?);
    Ok(())
}
