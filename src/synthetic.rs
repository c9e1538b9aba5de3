use crate::config::SyntheticIndexSpec;
use crate::error::RadarError;
use crate::market_data::{PriceSeries, PriceTable};
use log::debug;

/// Build a proxy index series as the weighted sum of its component closes.
///
/// The series carries a value only for dates where every component trades;
/// no divisor adjustment is applied, so the level is a trend proxy rather
/// than a tradable index. A component absent from the table entirely fails
/// the synthesis for the whole ticker.
pub fn build_synthetic(
    spec: &SyntheticIndexSpec,
    table: &PriceTable,
) -> Result<PriceSeries, RadarError> {
    let mut components = Vec::with_capacity(spec.components.len());
    for (component, weight) in &spec.components {
        let series = table
            .get(component)
            .ok_or_else(|| RadarError::Synthesis {
                index: spec.ticker.clone(),
                component: component.clone(),
            })?;
        components.push((series, *weight));
    }

    let mut closes = Vec::new();
    if let Some(((first, first_weight), rest)) = components.split_first() {
        'dates: for &(date, price) in &first.closes {
            let mut value = first_weight * price;
            for (series, weight) in rest {
                match series.value_on(date) {
                    Some(price) => value += weight * price,
                    None => continue 'dates,
                }
            }
            closes.push((date, value));
        }
    }

    debug!(
        "synthesized {} from {} components over {} dates",
        spec.ticker,
        spec.components.len(),
        closes.len()
    );
    Ok(PriceSeries::new(spec.ticker.clone(), closes))
}
