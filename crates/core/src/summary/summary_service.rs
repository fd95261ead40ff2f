use std::sync::Arc;

use super::summary_model::SummarySnapshot;
use super::summary_traits::{SummaryRendererTrait, SummaryServiceTrait};
use crate::countries::CountryRepositoryTrait;
use crate::errors::{Error, Result};

/// Regenerates the summary artifact from the current store.
pub struct SummaryService {
    repository: Arc<dyn CountryRepositoryTrait>,
    renderer: Arc<dyn SummaryRendererTrait>,
}

impl SummaryService {
    pub fn new(
        repository: Arc<dyn CountryRepositoryTrait>,
        renderer: Arc<dyn SummaryRendererTrait>,
    ) -> Self {
        Self {
            repository,
            renderer,
        }
    }
}

impl SummaryServiceTrait for SummaryService {
    fn regenerate(&self) -> Result<SummarySnapshot> {
        let countries = self.repository.load_countries()?;
        let snapshot = SummarySnapshot::from_countries(&countries);
        self.renderer.render(&snapshot)?;
        log::info!(
            "Summary regenerated: {} countries, {} ranked",
            snapshot.total_countries,
            snapshot.top.len()
        );
        Ok(snapshot)
    }

    fn get_image(&self) -> Result<Vec<u8>> {
        self.renderer
            .load_image()?
            .ok_or_else(|| Error::NotFound("Summary image".to_string()))
    }
}
