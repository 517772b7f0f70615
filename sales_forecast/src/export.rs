//! Spreadsheet export of brand simulation results

use crate::error::{ForecastError, Result};
use crate::simulation::BrandSimulation;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Header row of the exported sheet
pub const EXPORT_HEADER: [&str; 4] = ["Nama Produk", "Harga Jual", "Kategori 1", "Qty Diprediksi"];

/// File name encoding brand, month and year
pub fn export_filename(brand: &str, month: u32, year: i32) -> String {
    let brand: String = brand
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("prediksi_{}_{}_{}.csv", brand, month, year)
}

/// Render the ranked rows as CSV bytes in memory
pub fn to_spreadsheet_bytes(simulation: &BrandSimulation) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADER)?;
    for row in &simulation.rows {
        writer.write_record([
            row.product_name.clone(),
            row.unit_price.to_string(),
            row.category.clone(),
            format!("{:.2}", row.predicted_qty),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| ForecastError::CsvError(e.to_string()))
}

/// Write the sheet into `dir` and return its path
pub fn write_spreadsheet<P: AsRef<Path>>(dir: P, simulation: &BrandSimulation) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(
        &simulation.brand,
        simulation.month,
        simulation.year,
    ));
    fs::write(&path, to_spreadsheet_bytes(simulation)?)?;
    info!(path = %path.display(), rows = simulation.rows.len(), "exported brand simulation");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Acme", 7, 2025), "prediksi_Acme_7_2025.csv");
        assert_eq!(export_filename("A/B", 1, 2024), "prediksi_A_B_1_2024.csv");
    }
}
