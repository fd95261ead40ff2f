use std::sync::Arc;

use async_trait::async_trait;

use super::countries_model::{Country, CountryQuery, RefreshStatus};
use super::countries_traits::{CountryRepositoryTrait, CountryServiceTrait};
use crate::errors::{Error, Result};

/// Pass-through read/delete operations over the country store.
pub struct CountryService {
    repository: Arc<dyn CountryRepositoryTrait>,
}

impl CountryService {
    pub fn new(repository: Arc<dyn CountryRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CountryServiceTrait for CountryService {
    fn list_countries(&self, query: &CountryQuery) -> Result<Vec<Country>> {
        self.repository.list_countries(query)
    }

    fn get_country(&self, name: &str) -> Result<Country> {
        self.repository
            .get_country_by_name(name)?
            .ok_or_else(|| Error::NotFound("Country".to_string()))
    }

    async fn delete_country(&self, name: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_country_by_name(name.to_string())
            .await?;
        if deleted == 0 {
            return Err(Error::NotFound("Country".to_string()));
        }
        log::info!("Deleted country '{}'", name);
        Ok(())
    }

    fn get_status(&self) -> Result<RefreshStatus> {
        self.repository.get_status()
    }
}
