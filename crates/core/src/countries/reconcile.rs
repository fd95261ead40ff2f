//! Reconciliation of one upstream country observation with the rate table.
//!
//! The derived `estimated_gdp` follows a fixed policy:
//!
//! | currency code | usable rate | exchange_rate | estimated_gdp                 |
//! |---------------|-------------|---------------|-------------------------------|
//! | absent        | -           | absent        | `0`                           |
//! | present       | yes         | rate          | `population * U / rate`       |
//! | present       | no          | absent        | absent                        |
//!
//! An estimate that overflows to a non-finite value is handled like a
//! missing rate.
//!
//! `U` is drawn uniformly from `[1000, 2000)` for every record on every
//! refresh, so the estimate is intentionally not reproducible.

use atlas_sources::{RateTable, RawCountry};
use chrono::{DateTime, Utc};
use rand::Rng;

use super::countries_model::NewCountry;
use crate::constants::{GDP_MULTIPLIER_MAX, GDP_MULTIPLIER_MIN};

/// Picks the first currency entry's code. Later entries are never consulted,
/// even when the first one is null or has an empty code.
pub fn select_currency_code(raw: &RawCountry) -> Option<String> {
    raw.currencies
        .first()
        .and_then(|entry| entry.as_ref())
        .and_then(|entry| entry.code.as_deref())
        .filter(|code| !code.is_empty())
        .map(str::to_string)
}

/// A rate is usable only if it is finite and strictly positive; anything else
/// is treated as if the code were missing from the table. The same holds when
/// the resulting estimate is not finite.
fn usable_rate(rates: &RateTable, code: &str) -> Option<f64> {
    rates
        .get(code)
        .filter(|rate| rate.is_finite() && *rate > 0.0)
}

/// Merge `raw` with `rates` into a storable record stamped with the refresh's
/// shared `refreshed_at`.
pub fn reconcile<R: Rng + ?Sized>(
    raw: &RawCountry,
    rates: &RateTable,
    refreshed_at: DateTime<Utc>,
    rng: &mut R,
) -> NewCountry {
    let population = raw.population.max(0);
    let currency_code = select_currency_code(raw);

    let (exchange_rate, estimated_gdp) = match currency_code.as_deref() {
        None => (None, Some(0.0)),
        Some(code) => usable_rate(rates, code)
            .and_then(|rate| {
                let multiplier = rng.gen_range(GDP_MULTIPLIER_MIN..GDP_MULTIPLIER_MAX);
                let gdp = population as f64 * multiplier / rate;
                // A tiny rate can overflow the estimate; treat it like a missing rate.
                gdp.is_finite().then_some((Some(rate), Some(gdp)))
            })
            .unwrap_or((None, None)),
    };

    NewCountry {
        name: raw.name.clone(),
        capital: raw.capital.clone(),
        region: raw.region.clone(),
        population,
        currency_code,
        exchange_rate,
        estimated_gdp,
        flag_url: raw.flag_url.clone(),
        last_refreshed_at: refreshed_at,
    }
}
