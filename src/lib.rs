//! # Artlinx
//!
//! Workspace facade for the Artlinx sales tools. The forecasting library
//! lives in `sales_forecast`; the `sales-dashboard` binary is built from the
//! `sales_dashboard` member.
//!
//! ## Example
//!
//! ```
//! use artlinx::sales_forecast::LabelEncoder;
//!
//! let encoder = LabelEncoder::new(
//!     "channel",
//!     vec!["Offline".to_string(), "Online".to_string()],
//! )
//! .unwrap();
//! assert_eq!(encoder.transform("Online").unwrap(), 1);
//! assert!(encoder.transform("Marketplace").is_err());
//! ```

pub use sales_forecast;

/// Name and version of the forecasting library this facade ships with.
pub fn library_version() -> String {
    format!("{} {}", sales_forecast::NAME, sales_forecast::VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(version.starts_with("sales_forecast "));
    }

    #[test]
    fn test_package_name() {
        assert_eq!(env!("CARGO_PKG_NAME"), "artlinx");
    }
}
