// src/stats.rs
//! Aggregation of a record collection into summary statistics.

use crate::model::EquipmentRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary statistics derived from one record collection.
///
/// Recomputed per request and never cached. Averages are `None` exactly when
/// the collection is empty; callers branch on that instead of dividing by
/// zero. The distribution is keyed by the exact (case-sensitive) type label;
/// the `BTreeMap` gives the canonical ascending-by-label group order used for
/// palette assignment and chart series downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub total_count: usize,
    pub average_flowrate: Option<f64>,
    pub average_pressure: Option<f64>,
    pub average_temperature: Option<f64>,
    pub type_distribution: BTreeMap<String, usize>,
}

impl AggregateStats {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// Computes [`AggregateStats`] over a record slice. Pure; no side effects.
pub fn aggregate(records: &[EquipmentRecord]) -> AggregateStats {
    let total_count = records.len();
    if total_count == 0 {
        return AggregateStats {
            total_count: 0,
            average_flowrate: None,
            average_pressure: None,
            average_temperature: None,
            type_distribution: BTreeMap::new(),
        };
    }

    let n = total_count as f64;
    let mut flow_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut temperature_sum = 0.0;
    let mut type_distribution: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
        flow_sum += record.flowrate;
        pressure_sum += record.pressure;
        temperature_sum += record.temperature;
        *type_distribution
            .entry(record.equipment_type.clone())
            .or_insert(0) += 1;
    }

    AggregateStats {
        total_count,
        average_flowrate: Some(flow_sum / n),
        average_pressure: Some(pressure_sum / n),
        average_temperature: Some(temperature_sum / n),
        type_distribution,
    }
}
