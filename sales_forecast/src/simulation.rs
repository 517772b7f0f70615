//! What-if simulations over the loaded context.
//!
//! Both entry points are pure: they read the context, call the predictor at
//! most once and return either a complete result or an error.

use crate::context::SimulationContext;
use crate::error::{ForecastError, Result};
use crate::features::{CalendarFeatures, FeatureRow, SalesChannel};
use crate::models::Predictor;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Inputs of the brand-level batch simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandSimulationRequest {
    pub brand: String,
    pub month: u32,
    pub year: i32,
    /// Percent, 0-100
    pub discount: u8,
}

/// One ranked product of a brand simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandPrediction {
    pub product_name: String,
    pub unit_price: f64,
    pub category: String,
    /// Rounded to 2 decimals
    pub predicted_qty: f64,
    pub features: FeatureRow,
}

/// Result of a brand simulation, ranked by predicted quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSimulation {
    pub brand: String,
    pub month: u32,
    pub year: i32,
    pub discount: u8,
    pub rows: Vec<BrandPrediction>,
}

impl BrandSimulation {
    pub fn total_predicted_qty(&self) -> f64 {
        self.rows.iter().map(|r| r.predicted_qty).sum()
    }
}

/// Inputs of the single-product point simulation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSimulationRequest {
    pub product_name: String,
    pub channel: SalesChannel,
    /// Percent, 0-100
    pub discount: u8,
    pub date: NaiveDate,
}

/// Prediction for one product on one date, with the echoed inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSimulation {
    pub product_name: String,
    pub brand: String,
    pub unit_price: f64,
    pub channel: SalesChannel,
    pub category_1: String,
    pub category_2: String,
    pub category_id: i64,
    pub date: NaiveDate,
    pub features: FeatureRow,
    pub predicted_qty: f64,
}

/// Predict next-period quantity for every local product of a brand.
///
/// Every row uses the batch channel and a Monday-like calendar (day of week
/// 0, not a weekend) in the requested month.
pub fn simulate_brand<P: Predictor>(
    ctx: &SimulationContext<P>,
    request: &BrandSimulationRequest,
) -> Result<BrandSimulation> {
    validate_month(request.month)?;
    validate_discount(request.discount)?;
    if !ctx.settings().supported_years.contains(&request.year) {
        return Err(ForecastError::InvalidParameter(format!(
            "Year {} is not one of the supported years {:?}",
            request.year,
            ctx.settings().supported_years
        )));
    }

    let local = &ctx.settings().local_brand_type;
    let products: Vec<_> = ctx.catalog().of_brand(&request.brand, local).collect();
    if products.is_empty() {
        return Err(ForecastError::NoMatchingProducts {
            brand: request.brand.clone(),
        });
    }

    let brand_code = ctx.brand_encoder().transform(&request.brand)?;
    let channel_code = ctx
        .channel_encoder()
        .transform(ctx.settings().batch_channel.label())?;
    let calendar = CalendarFeatures::for_month(request.month, request.year);

    let features: Vec<FeatureRow> = products
        .iter()
        .map(|product| FeatureRow::new(calendar, product, brand_code, channel_code, request.discount))
        .collect();

    debug!(
        brand = %request.brand,
        month = request.month,
        year = request.year,
        rows = features.len(),
        "running brand simulation"
    );
    let predictions = ctx.predictor().predict(&features)?;
    check_prediction_count(predictions.len(), features.len())?;

    let mut rows: Vec<BrandPrediction> = products
        .into_iter()
        .zip(features)
        .zip(predictions)
        .map(|((product, features), qty)| BrandPrediction {
            product_name: product.product_name.clone(),
            unit_price: product.unit_price,
            category: product.category_1.clone(),
            predicted_qty: round2(qty),
            features,
        })
        .collect();
    rows.sort_by(|a, b| b.predicted_qty.total_cmp(&a.predicted_qty));

    Ok(BrandSimulation {
        brand: request.brand.clone(),
        month: request.month,
        year: request.year,
        discount: request.discount,
        rows,
    })
}

/// Predict the quantity of a single local product sold on a given date
pub fn simulate_product<P: Predictor>(
    ctx: &SimulationContext<P>,
    request: &ProductSimulationRequest,
) -> Result<ProductSimulation> {
    validate_discount(request.discount)?;

    let product = ctx
        .catalog()
        .find_product(&request.product_name, &ctx.settings().local_brand_type)
        .ok_or_else(|| ForecastError::UnknownProduct(request.product_name.clone()))?;

    // Checked before any encoding so nothing reaches the model
    let brand_code = ctx.brand_encoder().transform(&product.brand)?;
    let channel_code = ctx.channel_encoder().transform(request.channel.label())?;

    let calendar = CalendarFeatures::from_date(request.date);
    let features = FeatureRow::new(calendar, product, brand_code, channel_code, request.discount);

    debug!(product = %product.product_name, date = %request.date, "running product simulation");
    let predictions = ctx.predictor().predict(std::slice::from_ref(&features))?;
    check_prediction_count(predictions.len(), 1)?;

    Ok(ProductSimulation {
        product_name: product.product_name.clone(),
        brand: product.brand.clone(),
        unit_price: product.unit_price,
        channel: request.channel,
        category_1: product.category_1.clone(),
        category_2: product.category_2.clone(),
        category_id: product.category_id,
        date: request.date,
        features,
        predicted_qty: predictions[0],
    })
}

fn validate_month(month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(ForecastError::InvalidParameter(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    Ok(())
}

fn validate_discount(discount: u8) -> Result<()> {
    if discount > 100 {
        return Err(ForecastError::InvalidParameter(format!(
            "Discount must be between 0 and 100, got {}",
            discount
        )));
    }
    Ok(())
}

fn check_prediction_count(got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(ForecastError::DataError(format!(
            "Predictor returned {} values for {} rows",
            got, expected
        )));
    }
    Ok(())
}

/// Round to 2 decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
