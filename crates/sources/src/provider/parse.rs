//! Payload decoding, kept separate from transport so it can be exercised
//! without a network.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::{Dataset, SourceError};
use crate::models::{RateTable, RawCountry};

/// Envelope of the rates feed. `result` is only present on open.er-api.com.
#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    rates: Option<HashMap<String, serde_json::Value>>,
}

/// Decode the country directory. The payload must be a JSON array of objects.
pub fn parse_countries(body: &[u8]) -> Result<Vec<RawCountry>, SourceError> {
    serde_json::from_slice::<Vec<RawCountry>>(body).map_err(|e| {
        SourceError::unavailable(Dataset::Countries, format!("Malformed payload: {}", e))
    })
}

/// Decode the rates feed. Non-numeric rate values are dropped; a missing
/// `rates` object yields an empty table.
pub fn parse_rates(body: &[u8]) -> Result<RateTable, SourceError> {
    let response: RatesResponse = serde_json::from_slice(body).map_err(|e| {
        SourceError::unavailable(Dataset::Rates, format!("Malformed payload: {}", e))
    })?;

    if let Some(result) = response.result.as_deref() {
        if result != "success" {
            return Err(SourceError::unavailable(
                Dataset::Rates,
                format!("Feed reported result '{}'", result),
            ));
        }
    }

    Ok(response
        .rates
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(code, value)| value.as_f64().map(|rate| (code, rate)))
        .collect())
}
