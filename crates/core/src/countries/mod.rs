//! Countries module - domain models, reconciliation, services, and traits.

mod countries_model;
mod countries_service;
mod countries_traits;
pub mod reconcile;
mod refresh_service;

pub use countries_model::{
    natural_key, Country, CountryQuery, CountrySort, NewCountry, RefreshOutcome, RefreshStatus,
    UpsertOutcome, UpsertedCountry,
};
pub use countries_service::CountryService;
pub use countries_traits::{CountryRepositoryTrait, CountryServiceTrait, RefreshServiceTrait};
pub use reconcile::{reconcile, select_currency_code};
pub use refresh_service::RefreshService;

#[cfg(test)]
pub(crate) mod test_support;
