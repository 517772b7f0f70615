//! Read-only context shared by every simulation request

use crate::data::{AggregateTable, Catalog, DataLoader};
use crate::encoders::LabelEncoder;
use crate::error::Result;
use crate::features::SalesChannel;
use crate::models::{Predictor, RegressionModel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// Locations of the five pre-built artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    /// Monthly actual vs predicted table (CSV)
    pub aggregate: PathBuf,
    /// Full-year sales file used as the product catalog (CSV)
    pub catalog: PathBuf,
    /// Regression model (JSON)
    pub model: PathBuf,
    /// Brand label encoder (JSON)
    pub brand_encoder: PathBuf,
    /// Sales channel label encoder (JSON)
    pub channel_encoder: PathBuf,
}

/// Knobs that shape which products are simulated and how
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Brand type value marking domestically sourced products
    pub local_brand_type: String,
    /// Years accepted by the brand simulation
    pub supported_years: Vec<i32>,
    /// Channel assumed for every row of a brand simulation
    pub batch_channel: SalesChannel,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            local_brand_type: "LOKAL".to_string(),
            supported_years: vec![2024, 2025],
            batch_channel: SalesChannel::Offline,
        }
    }
}

/// Everything loaded once per session: tables, encoders and the predictor.
///
/// Selectable brands and products are computed at construction and only
/// include brands the brand encoder knows.
#[derive(Debug)]
pub struct SimulationContext<P = RegressionModel> {
    aggregate: AggregateTable,
    catalog: Catalog,
    brand_encoder: LabelEncoder,
    channel_encoder: LabelEncoder,
    predictor: P,
    settings: SimulationSettings,
    brand_options: Vec<String>,
    product_options: Vec<String>,
}

impl SimulationContext<RegressionModel> {
    /// Load every artifact from disk. Any failure here is fatal.
    pub fn load(paths: &ArtifactPaths, settings: SimulationSettings) -> Result<Self> {
        let aggregate = DataLoader::aggregate_from_csv(&paths.aggregate)?;
        let catalog = DataLoader::catalog_from_csv(&paths.catalog)?;
        let brand_encoder = LabelEncoder::from_json_file("brand", &paths.brand_encoder)?;
        let channel_encoder = LabelEncoder::from_json_file("channel", &paths.channel_encoder)?;
        let model = RegressionModel::from_json_file(&paths.model)?;

        Ok(Self::new(
            aggregate,
            catalog,
            brand_encoder,
            channel_encoder,
            model,
            settings,
        ))
    }
}

impl<P: Predictor> SimulationContext<P> {
    /// Assemble a context from already loaded parts
    pub fn new(
        aggregate: AggregateTable,
        catalog: Catalog,
        brand_encoder: LabelEncoder,
        channel_encoder: LabelEncoder,
        predictor: P,
        settings: SimulationSettings,
    ) -> Self {
        let mut known = BTreeSet::new();
        let mut unknown = BTreeSet::new();
        for record in catalog.of_brand_type(&settings.local_brand_type) {
            if brand_encoder.contains(&record.brand) {
                known.insert(record.brand.clone());
            } else {
                unknown.insert(record.brand.clone());
            }
        }
        for brand in &unknown {
            warn!(brand = %brand, "local brand unknown to the brand encoder, excluded from options");
        }

        let product_options: BTreeSet<String> = catalog
            .of_brand_type(&settings.local_brand_type)
            .filter(|r| known.contains(&r.brand))
            .map(|r| r.product_name.clone())
            .collect();

        info!(
            brands = known.len(),
            products = product_options.len(),
            predictor = predictor.name(),
            "simulation context ready"
        );

        Self {
            aggregate,
            catalog,
            brand_encoder,
            channel_encoder,
            predictor,
            settings,
            brand_options: known.into_iter().collect(),
            product_options: product_options.into_iter().collect(),
        }
    }

    pub fn aggregate(&self) -> &AggregateTable {
        &self.aggregate
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn brand_encoder(&self) -> &LabelEncoder {
        &self.brand_encoder
    }

    pub fn channel_encoder(&self) -> &LabelEncoder {
        &self.channel_encoder
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    pub fn settings(&self) -> &SimulationSettings {
        &self.settings
    }

    /// Sorted local brands that can be simulated
    pub fn brand_options(&self) -> &[String] {
        &self.brand_options
    }

    /// Sorted local product names that can be simulated
    pub fn product_options(&self) -> &[String] {
        &self.product_options
    }
}
