use std::sync::Arc;

use async_trait::async_trait;
use atlas_sources::ReferenceDataSource;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::countries_model::{RefreshOutcome, UpsertOutcome};
use super::countries_traits::{CountryRepositoryTrait, RefreshServiceTrait};
use super::reconcile::reconcile;
use crate::errors::{Error, Result};
use crate::summary::SummaryServiceTrait;

/// Runs fetch -> reconcile -> upsert -> render.
///
/// Only one refresh runs at a time; a concurrent call fails with
/// [`Error::RefreshInProgress`] instead of queueing. A failed upsert is logged
/// and counted, and the remaining records are still written. A failed render
/// is logged and reported through `summary_rendered`, never as an error.
pub struct RefreshService {
    source: Arc<dyn ReferenceDataSource>,
    repository: Arc<dyn CountryRepositoryTrait>,
    summary: Arc<dyn SummaryServiceTrait>,
    running: Mutex<()>,
}

impl RefreshService {
    pub fn new(
        source: Arc<dyn ReferenceDataSource>,
        repository: Arc<dyn CountryRepositoryTrait>,
        summary: Arc<dyn SummaryServiceTrait>,
    ) -> Self {
        Self {
            source,
            repository,
            summary,
            running: Mutex::new(()),
        }
    }

    /// The timestamp shared by every record of this refresh. Never earlier
    /// than a stamp already in the store, so per-record stamps only move forward.
    fn refresh_stamp(&self) -> Result<DateTime<Utc>> {
        let now = Utc::now();
        let newest = self.repository.get_status()?.last_refreshed_at;
        Ok(newest.map_or(now, |stored| stored.max(now)))
    }
}

#[async_trait]
impl RefreshServiceTrait for RefreshService {
    async fn refresh(&self) -> Result<RefreshOutcome> {
        let _running = self
            .running
            .try_lock()
            .map_err(|_| Error::RefreshInProgress)?;

        log::info!("Refreshing countries");
        let (observations, rates) =
            tokio::try_join!(self.source.fetch_countries(), self.source.fetch_rates())
                .map_err(|e| {
                    log::warn!("Refresh aborted before any write: {}", e);
                    Error::from(e)
                })?;

        let refreshed_at = self.refresh_stamp()?;
        let mut outcome = RefreshOutcome {
            last_refreshed_at: refreshed_at,
            total_processed: observations.len(),
            created: 0,
            updated: 0,
            failed: 0,
            summary_rendered: false,
        };

        for raw in &observations {
            let record = reconcile(raw, &rates, refreshed_at, &mut rand::thread_rng());
            match self.repository.upsert_country(record).await {
                Ok(upserted) => match upserted.outcome {
                    UpsertOutcome::Created => outcome.created += 1,
                    UpsertOutcome::Updated => outcome.updated += 1,
                },
                Err(e) => {
                    log::warn!("Failed to upsert country '{}': {}", raw.name, e);
                    outcome.failed += 1;
                }
            }
        }

        outcome.summary_rendered = match self.summary.regenerate() {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to generate summary image: {}", e);
                false
            }
        };

        log::info!(
            "Refresh complete: {} processed, {} created, {} updated, {} failed",
            outcome.total_processed,
            outcome.created,
            outcome.updated,
            outcome.failed
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countries::test_support::{
        observation, MockCountryRepository, MockRenderer, MockSource,
    };
    use crate::countries::CountryRepositoryTrait;
    use crate::summary::SummaryService;
    use atlas_sources::{Dataset, RateTable};
    use std::collections::BTreeSet;

    struct Harness {
        repo: Arc<MockCountryRepository>,
        renderer: Arc<MockRenderer>,
        service: RefreshService,
    }

    fn harness(source: MockSource) -> Harness {
        let repo = Arc::new(MockCountryRepository::default());
        let renderer = Arc::new(MockRenderer::default());
        let summary = Arc::new(SummaryService::new(repo.clone(), renderer.clone()));
        let service = RefreshService::new(Arc::new(source), repo.clone(), summary);
        Harness {
            repo,
            renderer,
            service,
        }
    }

    fn standard_source() -> MockSource {
        MockSource::new(
            Some(vec![
                observation("Nigeria", 206_139_589, &[Some("NGN")]),
                observation("Antarctica", 0, &[]),
                observation("Zimbabwe", 14_862_927, &[Some("ZWL")]),
            ]),
            Some([("NGN", 1600.23), ("USD", 1.0)].into_iter().collect()),
        )
    }

    #[tokio::test]
    async fn refresh_writes_every_observation_with_one_stamp() {
        let h = harness(standard_source());
        let outcome = h.service.refresh().await.unwrap();

        assert_eq!(outcome.total_processed, 3);
        assert_eq!(outcome.created, 3);
        assert_eq!(outcome.failed, 0);
        assert!(outcome.summary_rendered);

        let stored = h.repo.load_countries().unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored
            .iter()
            .all(|c| c.last_refreshed_at == outcome.last_refreshed_at));

        let nigeria = stored.iter().find(|c| c.name == "Nigeria").unwrap();
        let gdp = nigeria.estimated_gdp.unwrap();
        assert!(gdp >= 206_139_589.0 * 1000.0 / 1600.23);
        assert!(gdp < 206_139_589.0 * 2000.0 / 1600.23);

        let antarctica = stored.iter().find(|c| c.name == "Antarctica").unwrap();
        assert_eq!(antarctica.estimated_gdp, Some(0.0));
        assert_eq!(antarctica.currency_code, None);

        let zimbabwe = stored.iter().find(|c| c.name == "Zimbabwe").unwrap();
        assert_eq!(zimbabwe.exchange_rate, None);
        assert_eq!(zimbabwe.estimated_gdp, None);
    }

    #[tokio::test]
    async fn repeated_refresh_keeps_names_and_advances_stamp() {
        let h = harness(standard_source());
        let first = h.service.refresh().await.unwrap();
        let names_before: BTreeSet<String> = h.repo.names().into_iter().collect();
        let ids_before: Vec<i32> = h.repo.load_countries().unwrap().iter().map(|c| c.id).collect();

        let second = h.service.refresh().await.unwrap();
        let names_after: BTreeSet<String> = h.repo.names().into_iter().collect();
        let ids_after: Vec<i32> = h.repo.load_countries().unwrap().iter().map(|c| c.id).collect();

        assert_eq!(names_before, names_after);
        assert_eq!(ids_before, ids_after);
        assert_eq!(second.created, 0);
        assert_eq!(second.updated, 3);
        assert!(second.last_refreshed_at >= first.last_refreshed_at);
    }

    #[tokio::test]
    async fn countries_failure_aborts_without_writes() {
        let h = harness(MockSource::new(None, Some(RateTable::default())));
        let err = h.service.refresh().await.unwrap_err();

        match err {
            Error::Upstream(e) => assert_eq!(e.dataset(), Some(Dataset::Countries)),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(h.repo.names().is_empty());
        assert!(h.renderer.rendered().is_empty());
    }

    #[tokio::test]
    async fn rates_failure_aborts_without_writes() {
        let h = harness(MockSource::new(
            Some(vec![observation("Nigeria", 1, &[Some("NGN")])]),
            None,
        ));
        let err = h.service.refresh().await.unwrap_err();

        match err {
            Error::Upstream(e) => assert_eq!(e.dataset(), Some(Dataset::Rates)),
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(h.repo.names().is_empty());
    }

    #[tokio::test]
    async fn failed_upsert_is_counted_and_others_still_written() {
        let h = harness(standard_source());
        h.repo.fail_upserts_for("Antarctica");

        let outcome = h.service.refresh().await.unwrap();
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.created, 2);
        assert_eq!(h.repo.names(), vec!["Nigeria".to_string(), "Zimbabwe".to_string()]);
    }

    #[tokio::test]
    async fn render_failure_does_not_fail_refresh() {
        let h = harness(standard_source());
        h.renderer.fail_next();

        let outcome = h.service.refresh().await.unwrap();
        assert!(!outcome.summary_rendered);
        assert_eq!(outcome.created, 3);
    }

    #[tokio::test]
    async fn stamp_never_goes_behind_stored_records() {
        let h = harness(standard_source());
        let future = Utc::now() + chrono::Duration::days(1);
        h.repo.seed(observation("Nigeria", 1, &[]), future);

        let outcome = h.service.refresh().await.unwrap();
        assert_eq!(outcome.last_refreshed_at, future);
    }

    #[tokio::test]
    async fn concurrent_refresh_is_rejected() {
        let h = harness(standard_source());
        let _held = h.service.running.lock().await;

        let err = h.service.refresh().await.unwrap_err();
        assert!(matches!(err, Error::RefreshInProgress));
    }
}
