use super::summary_model::SummarySnapshot;
use crate::errors::Result;

/// Produces and stores the summary artifact.
pub trait SummaryRendererTrait: Send + Sync {
    /// Render `snapshot`, fully replacing any previous artifact.
    fn render(&self, snapshot: &SummarySnapshot) -> Result<()>;
    /// Bytes of the last rendered artifact, `None` if nothing was ever rendered.
    fn load_image(&self) -> Result<Option<Vec<u8>>>;
}

pub trait SummaryServiceTrait: Send + Sync {
    /// Read the whole store and re-render the artifact from it.
    fn regenerate(&self) -> Result<SummarySnapshot>;
    /// The last rendered artifact; `Error::NotFound` if there is none.
    fn get_image(&self) -> Result<Vec<u8>>;
}
