use sector_radar::config::RadarConfig;

fn main() {
    let config = RadarConfig::default();
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error serializing default config: {e}"),
    }
}
