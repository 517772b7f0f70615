//! # Sales Forecast
//!
//! Historical sales summaries and what-if quantity predictions for the
//! Artlinx store.
//!
//! ## Features
//!
//! - Monthly actual vs predicted table, sorted by period, with accuracy metrics
//! - Product catalog filtered to local brands
//! - Label encoders and a pre-trained regressor loaded from JSON artifacts
//! - Brand-level batch simulation and single-product point simulation
//! - SVG line chart and CSV spreadsheet export
//!
//! ## Quick Start
//!
//! ```no_run
//! use sales_forecast::context::{ArtifactPaths, SimulationContext, SimulationSettings};
//! use sales_forecast::simulation::{simulate_brand, BrandSimulationRequest};
//!
//! let paths = ArtifactPaths {
//!     aggregate: "data/aggregate.csv".into(),
//!     catalog: "data/catalog.csv".into(),
//!     model: "data/model.json".into(),
//!     brand_encoder: "data/brand_encoder.json".into(),
//!     channel_encoder: "data/channel_encoder.json".into(),
//! };
//! let ctx = SimulationContext::load(&paths, SimulationSettings::default())?;
//!
//! let result = simulate_brand(
//!     &ctx,
//!     &BrandSimulationRequest {
//!         brand: "Acme".to_string(),
//!         month: 7,
//!         year: 2025,
//!         discount: 10,
//!     },
//! )?;
//! for row in &result.rows {
//!     println!("{}: {:.2}", row.product_name, row.predicted_qty);
//! }
//! # Ok::<(), sales_forecast::ForecastError>(())
//! ```

pub mod chart;
pub mod context;
pub mod data;
pub mod encoders;
pub mod error;
pub mod export;
pub mod features;
pub mod metrics;
pub mod models;
pub mod simulation;

// Re-export commonly used types
pub use crate::context::{ArtifactPaths, SimulationContext, SimulationSettings};
pub use crate::data::{AggregateTable, Catalog, CatalogRecord, DataLoader};
pub use crate::encoders::LabelEncoder;
pub use crate::error::ForecastError;
pub use crate::features::{FeatureRow, SalesChannel};
pub use crate::models::{Predictor, RegressionModel};
pub use crate::simulation::{
    simulate_brand, simulate_product, BrandSimulation, BrandSimulationRequest, ProductSimulation,
    ProductSimulationRequest,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
