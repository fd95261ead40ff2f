//! Summary module - snapshot of the store and its rendered PNG image.

mod summary_model;
mod summary_renderer;
mod summary_service;
mod summary_traits;

pub use summary_model::{format_gdp, format_refreshed_at, SummaryEntry, SummarySnapshot};
pub use summary_renderer::PngSummaryRenderer;
pub use summary_service::SummaryService;
pub use summary_traits::{SummaryRendererTrait, SummaryServiceTrait};
