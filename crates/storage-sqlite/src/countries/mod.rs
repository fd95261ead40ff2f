//! SQLite storage implementation for countries.

mod model;
mod repository;

pub use model::{CountryDB, NewCountryDB};
pub use repository::CountryRepository;
