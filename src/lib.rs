// src/lib.rs
//! Analytical PDF report engine for process-equipment measurements.
//!
//! The pipeline runs in four sequential stages, each with a data dependency
//! on the previous one:
//!
//! 1. [`stats::aggregate`] reduces the record collection to summary
//!    statistics (count, per-metric averages, type distribution).
//! 2. [`chart`] renders the derived charts (trend, grouped bar, donut,
//!    scatter) into in-memory raster images.
//! 3. [`compose`] lays out a paginated document: banner chrome, KPI cards,
//!    chart blocks and a page-break-aware styled table, driven by the
//!    [`layout::LayoutCursor`] state machine.
//! 4. [`render`] serializes the composed pages to PDF bytes with `lopdf`.
//!
//! [`ReportEngine`] wires the stages behind a single
//! `generate_report(dataset_id)` operation over a [`RecordSource`].
//!
//! ```no_run
//! use chemviz_report::{EquipmentRecord, MemorySource, ReportEngine};
//!
//! let mut source = MemorySource::new();
//! source.insert(1, vec![
//!     EquipmentRecord::new("Pump-A", "Pump", 10.0, 50.0, 90.0),
//!     EquipmentRecord::new("Valve-A", "Valve", 5.0, 40.0, 30.0),
//! ]);
//!
//! let engine = ReportEngine::new(source);
//! let pdf_bytes = engine.generate_report(1)?;
//! # Ok::<(), chemviz_report::ReportError>(())
//! ```

pub mod chart;
pub mod compose;
pub mod document;
pub mod engine;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;
pub mod stats;

pub use chart::{ChartKind, ChartSpec, ChartTheme, Metric};
pub use compose::{BannerMode, Composer, ReportOptions};
pub use document::ReportDocument;
pub use engine::{ReportEngine, PDF_CONTENT_TYPE};
pub use error::ReportError;
pub use layout::{LayoutCursor, PageGeometry};
pub use model::{EquipmentRecord, MemorySource, RecordSource};
pub use stats::{aggregate, AggregateStats};
