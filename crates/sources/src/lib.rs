//! Atlas Sources
//!
//! Adapters for the two upstream datasets consumed by a refresh:
//! - the country directory (name, capital, region, population, flag, currencies)
//! - the USD exchange-rate feed
//!
//! Each fetch is a single bounded GET that either yields the whole decoded
//! payload or fails with [`SourceError::Unavailable`] naming the dataset.
//! There are no retries and no local state.

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{Dataset, SourceError};
pub use models::{CurrencyEntry, RateTable, RawCountry};
pub use provider::http::{HttpReferenceSource, SourceSettings};
pub use provider::parse::{parse_countries, parse_rates};
pub use provider::ReferenceDataSource;
