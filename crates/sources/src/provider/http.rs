//! HTTP implementation of [`ReferenceDataSource`].
//!
//! Countries come from restcountries.com (v2 field-filtered listing) and rates
//! from open.er-api.com with USD as the base currency.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::parse::{parse_countries, parse_rates};
use super::ReferenceDataSource;
use crate::errors::{Dataset, SourceError};
use crate::models::{RateTable, RawCountry};

pub const DEFAULT_COUNTRIES_URL: &str =
    "https://restcountries.com/v2/all?fields=name,capital,region,population,flag,currencies";
pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Endpoints and timeout used by [`HttpReferenceSource`].
#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub countries_url: String,
    pub rates_url: String,
    pub timeout: Duration,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            countries_url: DEFAULT_COUNTRIES_URL.to_string(),
            rates_url: DEFAULT_RATES_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Fetches both datasets over HTTP with a bounded per-request timeout.
pub struct HttpReferenceSource {
    client: Client,
    settings: SourceSettings,
}

impl HttpReferenceSource {
    pub fn new(settings: SourceSettings) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    /// GET `url` and return the raw body. Any transport error, timeout or
    /// non-2xx status is reported as the dataset being unavailable.
    async fn fetch(&self, dataset: Dataset, url: &str) -> Result<Vec<u8>, SourceError> {
        debug!("Fetching {} from {}", dataset, url);

        let response = self.client.get(url).send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("Request timed out after {:?}", self.settings.timeout)
            } else {
                format!("Request failed: {}", e)
            };
            warn!("{} fetch failed: {}", dataset, message);
            SourceError::unavailable(dataset, message)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} fetch returned status {}", dataset, status);
            return Err(SourceError::unavailable(
                dataset,
                format!("API returned status {}", status.as_u16()),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            SourceError::unavailable(dataset, format!("Failed to read body: {}", e))
        })?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl ReferenceDataSource for HttpReferenceSource {
    async fn fetch_countries(&self) -> Result<Vec<RawCountry>, SourceError> {
        let body = self
            .fetch(Dataset::Countries, &self.settings.countries_url)
            .await?;
        let countries = parse_countries(&body)?;
        debug!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    async fn fetch_rates(&self) -> Result<RateTable, SourceError> {
        let body = self.fetch(Dataset::Rates, &self.settings.rates_url).await?;
        let rates = parse_rates(&body)?;
        debug!("Fetched {} exchange rates", rates.len());
        Ok(rates)
    }
}
