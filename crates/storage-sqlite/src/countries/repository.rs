use std::sync::Arc;

use async_trait::async_trait;
use atlas_core::countries::{
    natural_key, Country, CountryQuery, CountryRepositoryTrait, CountrySort, NewCountry,
    RefreshStatus, UpsertOutcome, UpsertedCountry,
};
use atlas_core::Result;
use chrono::{TimeZone, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::model::{CountryDB, NewCountryDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::countries;
use crate::schema::countries::dsl::*;

pub struct CountryRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CountryRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CountryRepository { pool, writer }
    }
}

#[async_trait]
impl CountryRepositoryTrait for CountryRepository {
    fn load_countries(&self) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = countries
            .order(id.asc())
            .select(CountryDB::as_select())
            .load::<CountryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Country::from).collect())
    }

    fn list_countries(&self, query: &CountryQuery) -> Result<Vec<Country>> {
        let mut conn = get_connection(&self.pool)?;

        let mut statement = countries::table
            .select(CountryDB::as_select())
            .into_boxed();
        if let Some(wanted) = &query.region {
            statement = statement.filter(region.eq(wanted.clone()));
        }
        if let Some(wanted) = &query.currency {
            statement = statement.filter(currency_code.eq(wanted.clone()));
        }

        // SQLite sorts NULL lowest: first ascending, last descending.
        statement = match query.sort {
            CountrySort::GdpDesc => statement.order((estimated_gdp.desc(), id.asc())),
            CountrySort::GdpAsc => statement.order((estimated_gdp.asc(), id.asc())),
            CountrySort::PopulationDesc => statement.order((population.desc(), id.asc())),
            CountrySort::PopulationAsc => statement.order((population.asc(), id.asc())),
            CountrySort::NameAsc => statement.order((name.asc(), id.asc())),
        };

        let rows = statement
            .load::<CountryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Country::from).collect())
    }

    fn get_country_by_name(&self, country_name: &str) -> Result<Option<Country>> {
        let mut conn = get_connection(&self.pool)?;
        let row = countries
            .filter(name_key.eq(natural_key(country_name)))
            .select(CountryDB::as_select())
            .first::<CountryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Country::from))
    }

    fn get_status(&self) -> Result<RefreshStatus> {
        let mut conn = get_connection(&self.pool)?;
        let total: i64 = countries
            .count()
            .get_result(&mut conn)
            .map_err(StorageError::from)?;
        let newest = countries
            .select(max(last_refreshed_at))
            .get_result::<Option<chrono::NaiveDateTime>>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(RefreshStatus {
            total_countries: total,
            last_refreshed_at: newest.map(|stamp| Utc.from_utc_datetime(&stamp)),
        })
    }

    async fn upsert_country(&self, country: NewCountry) -> Result<UpsertedCountry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<UpsertedCountry> {
                let row: NewCountryDB = country.into();

                let existing_id = countries
                    .filter(name_key.eq(&row.name_key))
                    .select(id)
                    .first::<i32>(conn)
                    .optional()
                    .map_err(StorageError::from)?;

                let (stored, outcome) = match existing_id {
                    Some(existing_id) => {
                        let stored = diesel::update(countries.find(existing_id))
                            .set(&row)
                            .returning(CountryDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        (stored, UpsertOutcome::Updated)
                    }
                    None => {
                        let stored = diesel::insert_into(countries::table)
                            .values(&row)
                            .returning(CountryDB::as_returning())
                            .get_result(conn)
                            .map_err(StorageError::from)?;
                        (stored, UpsertOutcome::Created)
                    }
                };

                Ok(UpsertedCountry {
                    country: Country::from(stored),
                    outcome,
                })
            })
            .await
    }

    async fn delete_country_by_name(&self, country_name: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(
                    diesel::delete(countries.filter(name_key.eq(natural_key(&country_name))))
                        .execute(conn)
                        .map_err(StorageError::from)?,
                )
            })
            .await
    }
}
