//! Country domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Domain model representing a stored country.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: String,
    pub last_refreshed_at: DateTime<Utc>,
}

/// A reconciled country, ready to be upserted. Carries no identity: the store
/// resolves it by [`natural_key`] of `name`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCountry {
    pub name: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: String,
    pub last_refreshed_at: DateTime<Utc>,
}

/// Whether an upsert inserted a new row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpsertedCountry {
    pub country: Country,
    pub outcome: UpsertOutcome,
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountrySort {
    /// Largest estimate first, absent estimates last.
    GdpDesc,
    /// Smallest estimate first, absent estimates first.
    GdpAsc,
    PopulationDesc,
    PopulationAsc,
    #[default]
    NameAsc,
}

impl CountrySort {
    /// Parses the `sort` query value. Unknown values fall back to name order.
    pub fn parse(value: &str) -> Self {
        match value {
            "gdp_desc" => CountrySort::GdpDesc,
            "gdp_asc" => CountrySort::GdpAsc,
            "population_desc" => CountrySort::PopulationDesc,
            "population_asc" => CountrySort::PopulationAsc,
            _ => CountrySort::NameAsc,
        }
    }
}

/// Equality filters and ordering for listing countries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryQuery {
    pub region: Option<String>,
    pub currency: Option<String>,
    pub sort: CountrySort,
}

/// Store-wide counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshStatus {
    pub total_countries: i64,
    /// `None` when nothing has ever been refreshed.
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Result of one refresh operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshOutcome {
    pub last_refreshed_at: DateTime<Utc>,
    pub total_processed: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub summary_rendered: bool,
}

/// Case-insensitive natural key of a country name.
pub fn natural_key(name: &str) -> String {
    name.to_lowercase()
}
