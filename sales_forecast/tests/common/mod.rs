#![allow(dead_code)]

use sales_forecast::data::{AggregateRecord, AggregateTable, Catalog, CatalogRecord};
use sales_forecast::encoders::LabelEncoder;
use sales_forecast::error::Result;
use sales_forecast::features::FeatureRow;
use sales_forecast::models::Predictor;
use sales_forecast::{SimulationContext, SimulationSettings};
use std::cell::{Cell, RefCell};

/// Predictor that records every call and returns price / 1000 + discount / 10
#[derive(Debug, Default)]
pub struct RecordingPredictor {
    pub calls: Cell<usize>,
    pub seen: RefCell<Vec<FeatureRow>>,
}

impl Predictor for RecordingPredictor {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>> {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().extend_from_slice(rows);
        Ok(rows
            .iter()
            .map(|r| r.unit_price / 1000.0 + r.discount / 10.0 + 0.123)
            .collect())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub fn product(name: &str, brand: &str, brand_type: &str, price: f64) -> CatalogRecord {
    CatalogRecord {
        product_name: name.to_string(),
        brand: brand.to_string(),
        brand_type: brand_type.to_string(),
        category_1: "Stationery".to_string(),
        category_2: "Writing".to_string(),
        category_id: 4,
        unit_price: price,
    }
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        product("Acme Pen", "Acme", "LOKAL", 5_000.0),
        product("Acme Notebook", "Acme", "LOKAL", 25_000.0),
        product("Acme Ruler", "Acme", "LOKAL", 12_000.0),
        product("Acme Import Pen", "Acme", "IMPOR", 90_000.0),
        product("Batik Bag", "Batik", "LOKAL", 150_000.0),
        product("Ghost Mug", "Ghost", "LOKAL", 30_000.0),
        product("Zen Lamp", "Zen", "IMPOR", 75_000.0),
    ])
}

pub fn brand_encoder() -> LabelEncoder {
    // "Ghost" is deliberately missing
    LabelEncoder::new(
        "brand",
        vec!["Acme".into(), "Batik".into(), "Zen".into()],
    )
    .unwrap()
}

pub fn channel_encoder() -> LabelEncoder {
    LabelEncoder::new("channel", vec!["Offline".into(), "Online".into()]).unwrap()
}

pub fn sample_aggregate() -> AggregateTable {
    AggregateTable::new(vec![
        AggregateRecord { month: 2, year: 2024, actual_qty: 130.0, predicted_qty: 120.0 },
        AggregateRecord { month: 1, year: 2024, actual_qty: 100.0, predicted_qty: 110.0 },
        AggregateRecord { month: 3, year: 2024, actual_qty: 90.0, predicted_qty: 95.0 },
    ])
}

pub fn sample_context() -> SimulationContext<RecordingPredictor> {
    SimulationContext::new(
        sample_aggregate(),
        sample_catalog(),
        brand_encoder(),
        channel_encoder(),
        RecordingPredictor::default(),
        SimulationSettings::default(),
    )
}
