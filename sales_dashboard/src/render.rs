//! Plain-text rendering of tables and results

use sales_forecast::data::AggregateTable;
use sales_forecast::metrics::ForecastAccuracy;
use sales_forecast::{BrandSimulation, ProductSimulation};
use std::fmt::Write;

/// Format a price as Rupiah with thousands separators, e.g. `Rp12,500`
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}Rp{}", sign, grouped)
}

/// Monthly summary table followed by the accuracy block
pub fn summary_table(table: &AggregateTable, accuracy: Option<&ForecastAccuracy>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<10} {:>12} {:>14}", "Period", "Actual Qty", "Predicted Qty");
    let _ = writeln!(out, "{}", "-".repeat(38));
    for record in table.records() {
        let _ = writeln!(
            out,
            "{:<10} {:>12.2} {:>14.2}",
            record.period(),
            record.actual_qty,
            record.predicted_qty
        );
    }
    if let Some(accuracy) = accuracy {
        let _ = writeln!(out);
        let _ = write!(out, "{}", accuracy);
    }
    out
}

/// Ranked brand simulation table
pub fn brand_table(result: &BrandSimulation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Prediction for brand {} ({}/{}), discount {}%",
        result.brand, result.month, result.year, result.discount
    );
    let name_width = result
        .rows
        .iter()
        .map(|r| r.product_name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Product".len());

    let _ = writeln!(
        out,
        "{:<nw$}  {:>12}  {:<16}  {:>13}",
        "Product",
        "Unit Price",
        "Category",
        "Predicted Qty",
        nw = name_width
    );
    let _ = writeln!(out, "{}", "-".repeat(name_width + 49));
    for row in &result.rows {
        let _ = writeln!(
            out,
            "{:<nw$}  {:>12}  {:<16}  {:>13.2}",
            row.product_name,
            format_rupiah(row.unit_price),
            row.category,
            row.predicted_qty,
            nw = name_width
        );
    }
    let _ = writeln!(out, "Total predicted qty: {:.2}", result.total_predicted_qty());
    out
}

/// Echoed inputs and the single predicted quantity
pub fn product_report(result: &ProductSimulation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Prediction Result");
    let _ = writeln!(out, "Product:        {}", result.product_name);
    let _ = writeln!(out, "Brand:          {}", result.brand);
    let _ = writeln!(out, "Unit price:     {}", format_rupiah(result.unit_price));
    let _ = writeln!(out, "Sales channel:  {}", result.channel);
    let _ = writeln!(
        out,
        "Category:       {} / {}",
        result.category_1, result.category_2
    );
    let _ = writeln!(out, "Category ID:    {}", result.category_id);
    let _ = writeln!(out, "Date:           {}", result.date.format("%d-%m-%Y"));
    let _ = writeln!(out, "Predicted qty:  {:.2} units", result.predicted_qty);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sales_forecast::data::AggregateRecord;
    use sales_forecast::features::{CalendarFeatures, FeatureRow};
    use sales_forecast::simulation::BrandPrediction;
    use sales_forecast::{CatalogRecord, SalesChannel};

    fn features() -> FeatureRow {
        let product = CatalogRecord {
            product_name: "Pulpen Gel Hitam".to_string(),
            brand: "Snowman".to_string(),
            brand_type: "LOKAL".to_string(),
            category_1: "Alat Tulis".to_string(),
            category_2: "Pulpen".to_string(),
            category_id: 1,
            unit_price: 6_000.0,
        };
        FeatureRow::new(CalendarFeatures::for_month(7, 2025), &product, 4, 0, 10)
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(format_rupiah(0.0), "Rp0");
        assert_eq!(format_rupiah(950.0), "Rp950");
        assert_eq!(format_rupiah(12_500.0), "Rp12,500");
        assert_eq!(format_rupiah(1_250_000.4), "Rp1,250,000");
        assert_eq!(format_rupiah(-3_000.0), "-Rp3,000");
    }

    #[test]
    fn test_summary_table_rows() {
        let table = AggregateTable::new(vec![
            AggregateRecord { month: 7, year: 2024, actual_qty: 523.0, predicted_qty: 510.4 },
        ]);
        let text = summary_table(&table, None);
        assert!(text.contains("7-2024"));
        assert!(text.contains("523.00"));
        assert!(text.contains("510.40"));
    }

    #[test]
    fn test_brand_table() {
        let result = BrandSimulation {
            brand: "Snowman".to_string(),
            month: 7,
            year: 2025,
            discount: 10,
            rows: vec![BrandPrediction {
                product_name: "Pulpen Gel Hitam".to_string(),
                unit_price: 6_000.0,
                category: "Alat Tulis".to_string(),
                predicted_qty: 8.25,
                features: features(),
            }],
        };
        let text = brand_table(&result);
        assert!(text.starts_with("Prediction for brand Snowman (7/2025)"));
        assert!(text.contains("Rp6,000"));
        assert!(text.contains("8.25"));
        assert!(text.contains("Total predicted qty: 8.25"));
    }

    #[test]
    fn test_product_report() {
        let result = ProductSimulation {
            product_name: "Pulpen Gel Hitam".to_string(),
            brand: "Snowman".to_string(),
            unit_price: 6_000.0,
            channel: SalesChannel::Online,
            category_1: "Alat Tulis".to_string(),
            category_2: "Pulpen".to_string(),
            category_id: 1,
            date: "2025-07-05".parse().unwrap(),
            features: features(),
            predicted_qty: 7.456,
        };
        let text = product_report(&result);
        assert!(text.contains("Date:           05-07-2025"));
        assert!(text.contains("Category:       Alat Tulis / Pulpen"));
        assert!(text.contains("Predicted qty:  7.46 units"));
        assert!(text.contains("Sales channel:  Online"));
    }
}
