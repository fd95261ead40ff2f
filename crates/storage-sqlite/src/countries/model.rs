//! Database models for countries.

use atlas_core::countries::{natural_key, Country, NewCountry};
use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;

/// Database model for a stored country row.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CountryDB {
    pub id: i32,
    pub name: String,
    pub name_key: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: String,
    pub last_refreshed_at: NaiveDateTime,
}

/// Every column but `id`. Used both to insert and to overwrite a row, so a
/// `None` must clear the column rather than leave the old value in place.
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::countries)]
#[diesel(treat_none_as_null = true)]
pub struct NewCountryDB {
    pub name: String,
    pub name_key: String,
    pub capital: String,
    pub region: String,
    pub population: i64,
    pub currency_code: Option<String>,
    pub exchange_rate: Option<f64>,
    pub estimated_gdp: Option<f64>,
    pub flag_url: String,
    pub last_refreshed_at: NaiveDateTime,
}

impl From<CountryDB> for Country {
    fn from(db: CountryDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
            capital: db.capital,
            region: db.region,
            population: db.population,
            currency_code: db.currency_code,
            exchange_rate: db.exchange_rate,
            estimated_gdp: db.estimated_gdp,
            flag_url: db.flag_url,
            last_refreshed_at: Utc.from_utc_datetime(&db.last_refreshed_at),
        }
    }
}

impl From<NewCountry> for NewCountryDB {
    fn from(domain: NewCountry) -> Self {
        Self {
            name_key: natural_key(&domain.name),
            name: domain.name,
            capital: domain.capital,
            region: domain.region,
            population: domain.population,
            currency_code: domain.currency_code,
            exchange_rate: domain.exchange_rate,
            estimated_gdp: domain.estimated_gdp,
            flag_url: domain.flag_url,
            last_refreshed_at: domain.last_refreshed_at.naive_utc(),
        }
    }
}
