//! Upstream payload models
//!
//! - `country` - one entry of the country directory ([`RawCountry`])
//! - `rates` - a point-in-time USD rate table ([`RateTable`])

mod country;
mod rates;

pub use country::{CurrencyEntry, RawCountry};
pub use rates::RateTable;
