use std::sync::Arc;

use atlas_core::countries::{
    CountryService, CountryServiceTrait, RefreshService, RefreshServiceTrait,
};
use atlas_core::summary::{PngSummaryRenderer, SummaryService, SummaryServiceTrait};
use atlas_sources::{HttpReferenceSource, SourceSettings};
use atlas_storage_sqlite::countries::CountryRepository;
use atlas_storage_sqlite::db::{self, write_actor};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub country_service: Arc<dyn CountryServiceTrait>,
    pub refresh_service: Arc<dyn RefreshServiceTrait>,
    pub summary_service: Arc<dyn SummaryServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("ATLAS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let country_repository = Arc::new(CountryRepository::new(pool.clone(), writer.clone()));

    let renderer = Arc::new(PngSummaryRenderer::new(&config.cache_dir));
    tracing::info!("Summary image path: {}", renderer.output_path().display());
    let summary_service = Arc::new(SummaryService::new(country_repository.clone(), renderer));

    let source = Arc::new(HttpReferenceSource::new(SourceSettings {
        countries_url: config.countries_url.clone(),
        rates_url: config.rates_url.clone(),
        timeout: config.fetch_timeout,
    })?);

    let refresh_service = Arc::new(RefreshService::new(
        source,
        country_repository.clone(),
        summary_service.clone(),
    ));
    let country_service = Arc::new(CountryService::new(country_repository));

    Ok(Arc::new(AppState {
        country_service,
        refresh_service,
        summary_service,
    }))
}
