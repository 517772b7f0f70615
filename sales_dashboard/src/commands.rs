//! CLI command implementations

use crate::config::DashboardConfig;
use crate::render;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use sales_forecast::chart::render_svg;
use sales_forecast::export::write_spreadsheet;
use sales_forecast::metrics::aggregate_accuracy;
use sales_forecast::{
    BrandSimulationRequest, ForecastError, ProductSimulationRequest, SalesChannel,
    SimulationContext,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load the configuration and every artifact it names
fn load(config_path: &Path) -> Result<(DashboardConfig, SimulationContext)> {
    let config = DashboardConfig::load(config_path)?;
    let ctx = SimulationContext::load(&config.artifacts, config.simulation.clone())
        .context("failed to load dashboard artifacts")?;
    Ok((config, ctx))
}

/// Keep user conditions as the bare `ForecastError` so `failure_message`
/// can classify them
fn report(err: ForecastError) -> anyhow::Error {
    if err.is_user_condition() {
        warn!("{}", err);
        anyhow::Error::new(err)
    } else {
        anyhow::Error::new(err).context("simulation failed")
    }
}

/// Line printed on stderr for a failed command.
///
/// An empty product selection is a warning; every other failure is an error.
pub fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ForecastError>() {
        Some(cause) if matches!(cause, ForecastError::NoMatchingProducts { .. }) => {
            format!("Warning: {}", cause)
        }
        Some(cause) if cause.is_user_condition() => format!("Error: {}", cause),
        _ => format!("Error: {:#}", err),
    }
}

pub fn summary(config_path: &Path, chart: Option<PathBuf>) -> Result<()> {
    let (config, ctx) = load(config_path)?;
    let table = ctx.aggregate();

    let accuracy = match aggregate_accuracy(table) {
        Ok(accuracy) => Some(accuracy),
        Err(err) => {
            warn!("Accuracy metrics unavailable: {}", err);
            None
        }
    };
    println!("Actual vs Predicted Qty per Month");
    println!();
    print!("{}", render::summary_table(table, accuracy.as_ref()));

    let chart_path = chart.unwrap_or(config.output.chart_path);
    if let Some(parent) = chart_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    fs::write(&chart_path, render_svg(table))
        .with_context(|| format!("failed to write chart {}", chart_path.display()))?;
    info!("Chart written to {}", chart_path.display());
    println!();
    println!("Chart saved to {}", chart_path.display());

    Ok(())
}

pub fn brands(config_path: &Path) -> Result<()> {
    let (_, ctx) = load(config_path)?;
    for brand in ctx.brand_options() {
        println!("{}", brand);
    }
    Ok(())
}

pub fn products(config_path: &Path) -> Result<()> {
    let (_, ctx) = load(config_path)?;
    for product in ctx.product_options() {
        println!("{}", product);
    }
    Ok(())
}

pub fn simulate_brand(
    config_path: &Path,
    brand: Option<String>,
    month: Option<u32>,
    year: Option<i32>,
    discount: Option<u8>,
    export: Option<Option<PathBuf>>,
) -> Result<()> {
    let (config, ctx) = load(config_path)?;

    let brand = match brand {
        Some(brand) => brand,
        None => ctx
            .brand_options()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("no local brands are available for simulation"))?,
    };
    let request = BrandSimulationRequest {
        brand,
        month: month.unwrap_or(config.defaults.month),
        year: year.unwrap_or(config.defaults.year),
        discount: discount.unwrap_or(config.defaults.discount),
    };

    let result = sales_forecast::simulate_brand(&ctx, &request).map_err(report)?;
    print!("{}", render::brand_table(&result));

    if let Some(dir) = export {
        let dir = dir.unwrap_or(config.output.export_dir);
        let path = write_spreadsheet(&dir, &result)
            .with_context(|| format!("failed to export to {}", dir.display()))?;
        println!();
        println!("Spreadsheet saved to {}", path.display());
    }

    Ok(())
}

pub fn simulate_product(
    config_path: &Path,
    product: String,
    channel: Option<SalesChannel>,
    discount: Option<u8>,
    date: Option<NaiveDate>,
) -> Result<()> {
    let (config, ctx) = load(config_path)?;

    let request = ProductSimulationRequest {
        product_name: product,
        channel: channel.unwrap_or(config.defaults.channel),
        discount: discount.unwrap_or(config.defaults.discount),
        date: date.unwrap_or(config.defaults.date),
    };

    let result = sales_forecast::simulate_product(&ctx, &request).map_err(report)?;
    print!("{}", render::product_report(&result));

    Ok(())
}
