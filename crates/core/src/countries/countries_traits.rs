use super::countries_model::{
    Country, CountryQuery, NewCountry, RefreshOutcome, RefreshStatus, UpsertedCountry,
};
use crate::errors::Result;
use async_trait::async_trait;

/// Trait for country repository operations.
///
/// Reads run on pooled connections; writes are serialized through a single
/// writer so that two upserts of the same name can never interleave.
#[async_trait]
pub trait CountryRepositoryTrait: Send + Sync {
    /// Every stored country in store (creation) order.
    fn load_countries(&self) -> Result<Vec<Country>>;
    fn list_countries(&self, query: &CountryQuery) -> Result<Vec<Country>>;
    fn get_country_by_name(&self, name: &str) -> Result<Option<Country>>;
    fn get_status(&self) -> Result<RefreshStatus>;
    /// Inserts `country`, or fully overwrites the row whose name matches it
    /// case-insensitively, preserving that row's id.
    async fn upsert_country(&self, country: NewCountry) -> Result<UpsertedCountry>;
    /// Returns the number of rows removed.
    async fn delete_country_by_name(&self, name: String) -> Result<usize>;
}

/// Trait for the read/delete surface over stored countries.
#[async_trait]
pub trait CountryServiceTrait: Send + Sync {
    fn list_countries(&self, query: &CountryQuery) -> Result<Vec<Country>>;
    fn get_country(&self, name: &str) -> Result<Country>;
    async fn delete_country(&self, name: &str) -> Result<()>;
    fn get_status(&self) -> Result<RefreshStatus>;
}

/// Trait for the refresh pipeline.
#[async_trait]
pub trait RefreshServiceTrait: Send + Sync {
    async fn refresh(&self) -> Result<RefreshOutcome>;
}
