//! In-memory collaborators shared by the service tests.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use atlas_sources::{
    CurrencyEntry, Dataset, RateTable, RawCountry, ReferenceDataSource, SourceError,
};
use chrono::{DateTime, Utc};

use super::countries_model::{
    natural_key, Country, CountryQuery, CountrySort, NewCountry, RefreshStatus, UpsertOutcome,
    UpsertedCountry,
};
use super::countries_traits::CountryRepositoryTrait;
use crate::errors::{DatabaseError, Result};
use crate::summary::{SummaryRendererTrait, SummarySnapshot};
use crate::Error;

pub fn observation(name: &str, population: i64, codes: &[Option<&str>]) -> RawCountry {
    RawCountry {
        name: name.to_string(),
        capital: String::new(),
        region: "Africa".to_string(),
        population,
        flag_url: String::new(),
        currencies: codes
            .iter()
            .map(|code| code.map(CurrencyEntry::new))
            .collect(),
    }
}

pub fn sample_country(name: &str) -> Country {
    Country {
        id: 0,
        name: name.to_string(),
        capital: String::new(),
        region: "Africa".to_string(),
        population: 1_000,
        currency_code: Some("USD".to_string()),
        exchange_rate: Some(1.0),
        estimated_gdp: Some(1_500_000.0),
        flag_url: String::new(),
        last_refreshed_at: Utc::now(),
    }
}

// ============== Mock Repository ==============

#[derive(Default)]
pub struct MockCountryRepository {
    countries: RwLock<Vec<Country>>,
    failing: RwLock<HashSet<String>>,
}

impl MockCountryRepository {
    pub fn with_countries(countries: Vec<Country>) -> Self {
        let repo = Self::default();
        {
            let mut stored = repo.countries.write().unwrap();
            for (i, mut country) in countries.into_iter().enumerate() {
                country.id = i as i32 + 1;
                stored.push(country);
            }
        }
        repo
    }

    pub fn names(&self) -> Vec<String> {
        self.countries
            .read()
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn fail_upserts_for(&self, name: &str) {
        self.failing.write().unwrap().insert(natural_key(name));
    }

    /// Store `raw` directly with the given stamp.
    pub fn seed(&self, raw: RawCountry, stamp: DateTime<Utc>) {
        let mut country = sample_country(&raw.name);
        country.last_refreshed_at = stamp;
        let mut stored = self.countries.write().unwrap();
        country.id = stored.len() as i32 + 1;
        stored.push(country);
    }

    fn apply(id: i32, new: NewCountry) -> Country {
        Country {
            id,
            name: new.name,
            capital: new.capital,
            region: new.region,
            population: new.population,
            currency_code: new.currency_code,
            exchange_rate: new.exchange_rate,
            estimated_gdp: new.estimated_gdp,
            flag_url: new.flag_url,
            last_refreshed_at: new.last_refreshed_at,
        }
    }
}

#[async_trait]
impl CountryRepositoryTrait for MockCountryRepository {
    fn load_countries(&self) -> Result<Vec<Country>> {
        Ok(self.countries.read().unwrap().clone())
    }

    fn list_countries(&self, query: &CountryQuery) -> Result<Vec<Country>> {
        let mut countries: Vec<Country> = self
            .load_countries()?
            .into_iter()
            .filter(|c| query.region.as_ref().map_or(true, |r| &c.region == r))
            .filter(|c| {
                query
                    .currency
                    .as_ref()
                    .map_or(true, |code| c.currency_code.as_ref() == Some(code))
            })
            .collect();
        if query.sort == CountrySort::NameAsc {
            countries.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(countries)
    }

    fn get_country_by_name(&self, name: &str) -> Result<Option<Country>> {
        let key = natural_key(name);
        Ok(self
            .countries
            .read()
            .unwrap()
            .iter()
            .find(|c| natural_key(&c.name) == key)
            .cloned())
    }

    fn get_status(&self) -> Result<RefreshStatus> {
        let countries = self.countries.read().unwrap();
        Ok(RefreshStatus {
            total_countries: countries.len() as i64,
            last_refreshed_at: countries.iter().map(|c| c.last_refreshed_at).max(),
        })
    }

    async fn upsert_country(&self, country: NewCountry) -> Result<UpsertedCountry> {
        let key = natural_key(&country.name);
        if self.failing.read().unwrap().contains(&key) {
            return Err(DatabaseError::QueryFailed("disk I/O error".to_string()).into());
        }

        let mut stored = self.countries.write().unwrap();
        if let Some(existing) = stored.iter_mut().find(|c| natural_key(&c.name) == key) {
            *existing = Self::apply(existing.id, country);
            return Ok(UpsertedCountry {
                country: existing.clone(),
                outcome: UpsertOutcome::Updated,
            });
        }

        let id = stored.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Self::apply(id, country);
        stored.push(created.clone());
        Ok(UpsertedCountry {
            country: created,
            outcome: UpsertOutcome::Created,
        })
    }

    async fn delete_country_by_name(&self, name: String) -> Result<usize> {
        let key = natural_key(&name);
        let mut stored = self.countries.write().unwrap();
        let before = stored.len();
        stored.retain(|c| natural_key(&c.name) != key);
        Ok(before - stored.len())
    }
}

// ============== Mock Source ==============

/// `None` for a dataset makes its fetch fail.
pub struct MockSource {
    countries: Option<Vec<RawCountry>>,
    rates: Option<RateTable>,
}

impl MockSource {
    pub fn new(countries: Option<Vec<RawCountry>>, rates: Option<RateTable>) -> Self {
        Self { countries, rates }
    }
}

#[async_trait]
impl ReferenceDataSource for MockSource {
    async fn fetch_countries(&self) -> std::result::Result<Vec<RawCountry>, SourceError> {
        self.countries
            .clone()
            .ok_or_else(|| SourceError::unavailable(Dataset::Countries, "status 503"))
    }

    async fn fetch_rates(&self) -> std::result::Result<RateTable, SourceError> {
        self.rates
            .clone()
            .ok_or_else(|| SourceError::unavailable(Dataset::Rates, "status 503"))
    }
}

// ============== Mock Renderer ==============

#[derive(Default)]
pub struct MockRenderer {
    rendered: RwLock<Vec<SummarySnapshot>>,
    fail_next: RwLock<bool>,
}

impl MockRenderer {
    pub fn rendered(&self) -> Vec<SummarySnapshot> {
        self.rendered.read().unwrap().clone()
    }

    pub fn fail_next(&self) {
        *self.fail_next.write().unwrap() = true;
    }
}

impl SummaryRendererTrait for MockRenderer {
    fn render(&self, snapshot: &SummarySnapshot) -> Result<()> {
        let mut fail = self.fail_next.write().unwrap();
        if *fail {
            *fail = false;
            return Err(Error::Render("font unavailable".to_string()));
        }
        self.rendered.write().unwrap().push(snapshot.clone());
        Ok(())
    }

    fn load_image(&self) -> Result<Option<Vec<u8>>> {
        if self.rendered.read().unwrap().is_empty() {
            Ok(None)
        } else {
            Ok(Some(vec![0x89, b'P', b'N', b'G']))
        }
    }
}
