//! Upstream source trait and its HTTP implementation.

pub mod http;
pub mod parse;

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{RateTable, RawCountry};

/// Source of the two datasets a refresh consumes.
///
/// The two operations are independent: either may fail without affecting the
/// other, and neither keeps state between calls.
#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// Fetch the full country directory.
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError>;

    /// Fetch the current USD rate table.
    async fn fetch_rates(&self) -> Result<RateTable, SourceError>;
}
