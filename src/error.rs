// src/error.rs
use crate::chart::ChartError;
use crate::render::RenderError;
use thiserror::Error;

/// A comprehensive error type for the whole report-generation pipeline.
///
/// Every variant is terminal for the call that produced it: report
/// generation is deterministic over valid input, so nothing is retried and
/// no partial document is ever returned.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The record source has no dataset with this id. An existing-but-empty
    /// dataset is not an error; it renders the no-data page.
    #[error("dataset {0} does not exist")]
    UnknownDataset(u64),

    #[error("chart rendering failed: {0}")]
    Chart(#[from] ChartError),

    #[error("document rendering failed: {0}")]
    Render(#[from] RenderError),
}
