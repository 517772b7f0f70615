use sales_forecast::metrics::aggregate_accuracy;
use sales_forecast::{
    simulate_brand, ArtifactPaths, BrandSimulationRequest, SimulationContext, SimulationSettings,
};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Demo artifacts ship with the dashboard crate
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("sales_dashboard")
        .join("data");

    let paths = ArtifactPaths {
        aggregate: data_dir.join("aggregate.csv"),
        catalog: data_dir.join("catalog.csv"),
        model: data_dir.join("model.json"),
        brand_encoder: data_dir.join("brand_encoder.json"),
        channel_encoder: data_dir.join("channel_encoder.json"),
    };

    println!("Loading artifacts from: {}", data_dir.display());
    let ctx = SimulationContext::load(&paths, SimulationSettings::default())?;
    println!(
        "Loaded {} months of history and {} products",
        ctx.aggregate().len(),
        ctx.catalog().len()
    );
    println!("{}", aggregate_accuracy(ctx.aggregate())?);

    // Simulate every available brand for July 2025 with a 10% discount
    for brand in ctx.brand_options() {
        let result = simulate_brand(
            &ctx,
            &BrandSimulationRequest {
                brand: brand.clone(),
                month: 7,
                year: 2025,
                discount: 10,
            },
        )?;

        println!("{} ({} products):", brand, result.rows.len());
        for row in &result.rows {
            println!("  {:<24} {:>8.2}", row.product_name, row.predicted_qty);
        }
    }

    Ok(())
}
