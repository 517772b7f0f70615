//! Historical aggregate table and product catalog loading

use crate::error::{ForecastError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::info;

/// Accepted header names for each aggregate column
const MONTH_COLUMNS: [&str; 2] = ["bulan", "month"];
const YEAR_COLUMNS: [&str; 2] = ["tahun", "year"];
const ACTUAL_COLUMNS: [&str; 2] = ["Qty Aktual", "actual_qty"];
const PREDICTED_COLUMNS: [&str; 2] = ["Qty Prediksi", "predicted_qty"];

/// One month of historical actual vs predicted quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRecord {
    pub month: u32,
    pub year: i32,
    pub actual_qty: f64,
    pub predicted_qty: f64,
}

impl AggregateRecord {
    /// Period label shown on the chart axis, e.g. `7-2024`
    pub fn period(&self) -> String {
        format!("{}-{}", self.month, self.year)
    }
}

/// Monthly aggregate table, always sorted by (year, month)
#[derive(Debug, Clone, Default)]
pub struct AggregateTable {
    records: Vec<AggregateRecord>,
}

impl AggregateTable {
    /// Build a table from records in any order
    pub fn new(mut records: Vec<AggregateRecord>) -> Self {
        records.sort_by_key(|r| (r.year, r.month));
        Self { records }
    }

    /// Records in (year, month) order
    pub fn records(&self) -> &[AggregateRecord] {
        &self.records
    }

    pub fn actual(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.actual_qty).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.predicted_qty).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// A product row from the full-year sales file.
///
/// Headers follow the store export (`Nama Produk`, `Merk`, ...); the English
/// snake_case names are accepted as aliases. Any other column in the file is
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "Nama Produk", alias = "product_name")]
    pub product_name: String,
    #[serde(rename = "Merk", alias = "brand")]
    pub brand: String,
    #[serde(rename = "Jenis Brand", alias = "brand_type")]
    pub brand_type: String,
    #[serde(rename = "Kategori 1", alias = "category_1")]
    pub category_1: String,
    #[serde(rename = "Kategori 2", alias = "category_2", default)]
    pub category_2: String,
    #[serde(rename = "Kategori ID", alias = "category_id")]
    pub category_id: i64,
    #[serde(rename = "Harga Jual", alias = "unit_price")]
    pub unit_price: f64,
}

/// Product catalog deduplicated by product name (first occurrence wins)
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// Build a catalog, dropping repeated product names
    pub fn new(records: Vec<CatalogRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| seen.insert(r.product_name.clone()))
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Rows of the given brand type, in catalog order
    pub fn of_brand_type<'a>(
        &'a self,
        brand_type: &'a str,
    ) -> impl Iterator<Item = &'a CatalogRecord> + 'a {
        self.records.iter().filter(move |r| r.brand_type == brand_type)
    }

    /// Rows matching both brand and brand type, in catalog order
    pub fn of_brand<'a>(
        &'a self,
        brand: &'a str,
        brand_type: &'a str,
    ) -> impl Iterator<Item = &'a CatalogRecord> + 'a {
        self.of_brand_type(brand_type).filter(move |r| r.brand == brand)
    }

    /// First row with the given product name and brand type
    pub fn find_product(&self, product_name: &str, brand_type: &str) -> Option<&CatalogRecord> {
        self.records
            .iter()
            .find(|r| r.brand_type == brand_type && r.product_name == product_name)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Data loader for the static sales tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load the monthly aggregate table from a CSV file
    pub fn aggregate_from_csv<P: AsRef<Path>>(path: P) -> Result<AggregateTable> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let table = Self::aggregate_from_dataframe(&df)?;
        info!(path = %path.display(), rows = table.len(), "loaded aggregate table");
        Ok(table)
    }

    /// Convert an already loaded DataFrame into an aggregate table
    pub fn aggregate_from_dataframe(df: &DataFrame) -> Result<AggregateTable> {
        let months = column_as_f64(df, Self::detect_column(df, &MONTH_COLUMNS)?)?;
        let years = column_as_f64(df, Self::detect_column(df, &YEAR_COLUMNS)?)?;
        let actual = column_as_f64(df, Self::detect_column(df, &ACTUAL_COLUMNS)?)?;
        let predicted = column_as_f64(df, Self::detect_column(df, &PREDICTED_COLUMNS)?)?;

        let mut records = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let month = months[i];
            if month.fract() != 0.0 || !(1.0..=12.0).contains(&month) {
                return Err(ForecastError::DataError(format!(
                    "Invalid month {} at row {}",
                    month,
                    i + 1
                )));
            }
            if years[i].fract() != 0.0 {
                return Err(ForecastError::DataError(format!(
                    "Invalid year {} at row {}",
                    years[i],
                    i + 1
                )));
            }

            records.push(AggregateRecord {
                month: month as u32,
                year: years[i] as i32,
                actual_qty: actual[i],
                predicted_qty: predicted[i],
            });
        }

        Ok(AggregateTable::new(records))
    }

    /// Load the product catalog from a CSV file
    pub fn catalog_from_csv<P: AsRef<Path>>(path: P) -> Result<Catalog> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::catalog_from_reader(file)?;
        info!(path = %path.display(), products = catalog.len(), "loaded product catalog");
        Ok(catalog)
    }

    /// Read catalog rows from any CSV source
    pub fn catalog_from_reader<R: std::io::Read>(reader: R) -> Result<Catalog> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = rdr
            .deserialize::<CatalogRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Catalog::new(records))
    }

    /// Find the first column whose name matches one of the candidates
    fn detect_column<'a>(df: &DataFrame, candidates: &[&'a str]) -> Result<&'a str> {
        let column_names = df.get_column_names();

        for candidate in candidates {
            if column_names
                .iter()
                .any(|name| name.eq_ignore_ascii_case(candidate))
            {
                return Ok(candidate);
            }
        }

        Err(ForecastError::DataError(format!(
            "No column named any of {:?} found in data",
            candidates
        )))
    }
}

/// Get a column as f64 values, failing on nulls so rows stay aligned
fn column_as_f64(df: &DataFrame, wanted: &str) -> Result<Vec<f64>> {
    let name = df
        .get_column_names()
        .into_iter()
        .find(|name| name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| ForecastError::DataError(format!("Column '{}' not found", wanted)))?;

    let col = df.column(name)?;
    if !col.dtype().is_numeric() {
        return Err(ForecastError::DataError(format!(
            "Column '{}' cannot be converted to f64",
            name
        )));
    }

    let casted = col.cast(&DataType::Float64)?;
    casted
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            value.ok_or_else(|| {
                ForecastError::DataError(format!("Missing value in '{}' at row {}", name, i + 1))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, brand: &str, brand_type: &str) -> CatalogRecord {
        CatalogRecord {
            product_name: name.to_string(),
            brand: brand.to_string(),
            brand_type: brand_type.to_string(),
            category_1: "Stationery".to_string(),
            category_2: "Pens".to_string(),
            category_id: 3,
            unit_price: 12_000.0,
        }
    }

    #[test]
    fn test_catalog_dedup_keeps_first() {
        let mut second = record("Pen A", "Acme", "IMPOR");
        second.unit_price = 1.0;
        let catalog = Catalog::new(vec![record("Pen A", "Acme", "LOKAL"), second]);

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].brand_type, "LOKAL");
    }

    #[test]
    fn test_catalog_brand_filter() {
        let catalog = Catalog::new(vec![
            record("Pen A", "Acme", "LOKAL"),
            record("Pen B", "Acme", "IMPOR"),
            record("Pen C", "Other", "LOKAL"),
        ]);

        let names: Vec<_> = catalog
            .of_brand("Acme", "LOKAL")
            .map(|r| r.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Pen A"]);
        assert!(catalog.find_product("Pen B", "LOKAL").is_none());
    }

    #[test]
    fn test_aggregate_table_sorted() {
        let table = AggregateTable::new(vec![
            AggregateRecord { month: 1, year: 2025, actual_qty: 1.0, predicted_qty: 1.0 },
            AggregateRecord { month: 12, year: 2024, actual_qty: 2.0, predicted_qty: 2.0 },
            AggregateRecord { month: 2, year: 2024, actual_qty: 3.0, predicted_qty: 3.0 },
        ]);

        let periods: Vec<_> = table.records().iter().map(|r| r.period()).collect();
        assert_eq!(periods, vec!["2-2024", "12-2024", "1-2025"]);
    }
}
