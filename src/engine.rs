// src/engine.rs
//! The report engine façade: one call from dataset id to PDF bytes.

use crate::compose::{Composer, ReportOptions};
use crate::error::ReportError;
use crate::model::RecordSource;
use crate::render::render_pdf;
use crate::stats::aggregate;

/// Content type of the generated artifact.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Generates analytical reports over a record source.
///
/// The engine holds no per-request state: every [`ReportEngine::generate_report`]
/// call fetches, aggregates, composes and renders from scratch, and all
/// intermediate resources (chart buffers, the layout cursor, the document
/// graph) are dropped on every exit path.
pub struct ReportEngine<S> {
    source: S,
    options: ReportOptions,
}

impl<S: RecordSource> ReportEngine<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ReportOptions::default())
    }

    pub fn with_options(source: S, options: ReportOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Produces the finished PDF for one dataset.
    pub fn generate_report(&self, dataset_id: u64) -> Result<Vec<u8>, ReportError> {
        let records = self.source.fetch_records(dataset_id)?;
        log::info!(
            "generating report for dataset {dataset_id} ({} records)",
            records.len()
        );

        let stats = aggregate(&records);
        let document = Composer::new(&self.options).compose(dataset_id, &records, &stats)?;
        let bytes = render_pdf(&document, &self.options.geometry)?;

        log::info!(
            "report for dataset {dataset_id} finished: {} pages, {} bytes",
            document.pages.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}
