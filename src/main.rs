// src/main.rs
//! Demo binary: renders a sample equipment report to a PDF file.
//!
//! Usage: `chemviz-report [output.pdf]`

use chemviz_report::{EquipmentRecord, MemorySource, ReportEngine, ReportError};
use std::path::PathBuf;

fn sample_source() -> MemorySource {
    let mut source = MemorySource::new();
    source.insert(
        1,
        vec![
            EquipmentRecord::new("Feed Pump P-101", "Pump", 12.5, 48.0, 65.0),
            EquipmentRecord::new("Booster Pump P-102", "Pump", 18.3, 61.5, 72.4),
            EquipmentRecord::new("Reflux Pump P-103", "Pump", 9.8, 44.2, 58.1),
            EquipmentRecord::new("Control Valve V-201", "Valve", 7.2, 38.0, 41.0),
            EquipmentRecord::new("Relief Valve V-202", "Valve", 3.1, 55.0, 39.5),
            EquipmentRecord::new("Reboiler E-301", "Heat Exchanger", 22.0, 71.0, 141.2),
            EquipmentRecord::new("Condenser E-302", "Heat Exchanger", 20.4, 33.0, 112.8),
            EquipmentRecord::new("Stripping Column C-401", "Column", 15.6, 52.3, 96.7),
            EquipmentRecord::new("Knockout Drum D-501", "Vessel", 11.1, 29.4, 34.9),
            EquipmentRecord::new("Surge Drum D-502", "Vessel", 8.7, 31.8, 36.2),
        ],
    );
    source
}

fn run() -> Result<(), ReportError> {
    let output: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("report.pdf"));

    let engine = ReportEngine::new(sample_source());
    let bytes = engine.generate_report(1)?;
    std::fs::write(&output, &bytes).map_err(chemviz_report::render::RenderError::Io)?;

    log::info!("wrote {} bytes to {}", bytes.len(), output.display());
    println!("Report written to {}", output.display());
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(error) = run() {
        eprintln!("report generation failed: {error}");
        std::process::exit(1);
    }
}
