//! Feature rows in the exact column order the model was trained with

use crate::data::CatalogRecord;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of model inputs
pub const FEATURE_COUNT: usize = 9;

/// Model input schema, in order
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "dayofweek",
    "is_weekend",
    "bulan",
    "tahun",
    "Merk",
    "Kategori ID",
    "Metode Penjualan",
    "Harga Jual",
    "Diskon",
];

/// Sales channel as labelled in the channel encoder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SalesChannel {
    Online,
    #[default]
    Offline,
}

impl SalesChannel {
    pub fn label(&self) -> &'static str {
        match self {
            SalesChannel::Online => "Online",
            SalesChannel::Offline => "Offline",
        }
    }
}

impl fmt::Display for SalesChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SalesChannel {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "online" => Ok(SalesChannel::Online),
            "offline" => Ok(SalesChannel::Offline),
            other => Err(ForecastError::InvalidParameter(format!(
                "Unknown sales channel '{}', expected Online or Offline",
                other
            ))),
        }
    }
}

/// Calendar part of a feature row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    /// Monday = 0 ... Sunday = 6
    pub day_of_week: u32,
    pub is_weekend: bool,
    pub month: u32,
    pub year: i32,
}

impl CalendarFeatures {
    /// Derive calendar features from a sales date
    pub fn from_date(date: NaiveDate) -> Self {
        let day_of_week = date.weekday().num_days_from_monday();
        Self {
            day_of_week,
            is_weekend: day_of_week >= 5,
            month: date.month(),
            year: date.year(),
        }
    }

    /// Month-level features with the day pinned to a weekday start
    pub fn for_month(month: u32, year: i32) -> Self {
        Self {
            day_of_week: 0,
            is_weekend: false,
            month,
            year,
        }
    }
}

/// One model input row
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRow {
    pub day_of_week: u32,
    pub is_weekend: u8,
    pub month: u32,
    pub year: i32,
    pub brand_code: usize,
    pub category_id: i64,
    pub channel_code: usize,
    pub unit_price: f64,
    pub discount: f64,
}

impl FeatureRow {
    /// Assemble a row from already encoded parts. Both simulations build
    /// their rows here.
    pub fn new(
        calendar: CalendarFeatures,
        product: &CatalogRecord,
        brand_code: usize,
        channel_code: usize,
        discount: u8,
    ) -> Self {
        Self {
            day_of_week: calendar.day_of_week,
            is_weekend: u8::from(calendar.is_weekend),
            month: calendar.month,
            year: calendar.year,
            brand_code,
            category_id: product.category_id,
            channel_code,
            unit_price: product.unit_price,
            discount: f64::from(discount),
        }
    }

    /// Numeric vector aligned with [`FEATURE_COLUMNS`]
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.day_of_week),
            f64::from(self.is_weekend),
            f64::from(self.month),
            f64::from(self.year),
            self.brand_code as f64,
            self.category_id as f64,
            self.channel_code as f64,
            self.unit_price,
            self.discount,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2025-07-04", 4, false)]
    #[case("2025-07-05", 5, true)]
    #[case("2025-07-06", 6, true)]
    #[case("2025-07-07", 0, false)]
    fn test_calendar_weekend_boundary(
        #[case] date: &str,
        #[case] day_of_week: u32,
        #[case] is_weekend: bool,
    ) {
        let calendar = CalendarFeatures::from_date(date.parse().unwrap());
        assert_eq!(calendar.day_of_week, day_of_week);
        assert_eq!(calendar.is_weekend, is_weekend);
        assert_eq!(calendar.month, 7);
        assert_eq!(calendar.year, 2025);
    }

    #[test]
    fn test_channel_parsing() {
        assert_eq!("online".parse::<SalesChannel>().unwrap(), SalesChannel::Online);
        assert_eq!(" Offline ".parse::<SalesChannel>().unwrap(), SalesChannel::Offline);
        assert!("phone".parse::<SalesChannel>().is_err());
        assert_eq!(SalesChannel::Offline.to_string(), "Offline");
    }

    #[test]
    fn test_vector_order() {
        let row = FeatureRow {
            day_of_week: 5,
            is_weekend: 1,
            month: 7,
            year: 2025,
            brand_code: 2,
            category_id: 14,
            channel_code: 1,
            unit_price: 15_000.0,
            discount: 10.0,
        };
        assert_eq!(
            row.to_vector(),
            [5.0, 1.0, 7.0, 2025.0, 2.0, 14.0, 1.0, 15_000.0, 10.0]
        );
    }
}
