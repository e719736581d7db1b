// src/model.rs
//! The record data model and the seam to the record persistence layer.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One equipment measurement row.
///
/// Field types are assumed to hold by the time a record reaches the engine;
/// ingestion-side validation (CSV parsing, unit checks) lives upstream.
/// Units: flowrate L/min, pressure PSI, temperature °C.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    #[serde(rename = "equipment_name")]
    pub name: String,
    pub equipment_type: String,
    pub flowrate: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl EquipmentRecord {
    pub fn new(
        name: impl Into<String>,
        equipment_type: impl Into<String>,
        flowrate: f64,
        pressure: f64,
        temperature: f64,
    ) -> Self {
        Self {
            name: name.into(),
            equipment_type: equipment_type.into(),
            flowrate,
            pressure,
            temperature,
        }
    }
}

/// Resolves a dataset id to its ordered record sequence.
///
/// Iteration order is the persisted insertion order; it is not assumed to be
/// chronological. An existing-but-empty dataset yields an empty vector; an
/// unknown id must be signaled as [`ReportError::UnknownDataset`]; the
/// engine itself never distinguishes the two beyond that.
pub trait RecordSource {
    fn fetch_records(&self, dataset_id: u64) -> Result<Vec<EquipmentRecord>, ReportError>;
}

/// In-memory record source for tests and the demo binary.
#[derive(Debug, Default)]
pub struct MemorySource {
    datasets: HashMap<u64, Vec<EquipmentRecord>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dataset_id: u64, records: Vec<EquipmentRecord>) {
        self.datasets.insert(dataset_id, records);
    }
}

impl RecordSource for MemorySource {
    fn fetch_records(&self, dataset_id: u64) -> Result<Vec<EquipmentRecord>, ReportError> {
        self.datasets
            .get(&dataset_id)
            .cloned()
            .ok_or(ReportError::UnknownDataset(dataset_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_distinguishes_unknown_from_empty() {
        let mut source = MemorySource::new();
        source.insert(1, vec![]);

        assert!(matches!(source.fetch_records(1), Ok(records) if records.is_empty()));
        assert!(matches!(
            source.fetch_records(99),
            Err(ReportError::UnknownDataset(99))
        ));
    }

    #[test]
    fn record_wire_names_match_upstream_payload() {
        let record = EquipmentRecord::new("Pump-A", "Pump", 10.0, 50.0, 90.0);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["equipment_name"], "Pump-A");
        assert_eq!(json["equipment_type"], "Pump");
        assert_eq!(json["flowrate"], 10.0);
    }
}
