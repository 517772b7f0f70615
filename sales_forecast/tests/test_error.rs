use sales_forecast::error::ForecastError;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let forecast_error = ForecastError::from(io_error);
    assert!(matches!(forecast_error, ForecastError::IoError(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let forecast_error = ForecastError::from(json_error);
    assert!(matches!(forecast_error, ForecastError::JsonError(_)));
}

#[test]
fn test_error_display() {
    let error = ForecastError::NoMatchingProducts {
        brand: "Acme".to_string(),
    };
    assert_eq!(error.to_string(), "No local products found for brand 'Acme'");

    let error = ForecastError::UnknownLabel {
        encoder: "brand".to_string(),
        label: "Ghost".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Label 'Ghost' is not known to the brand encoder"
    );

    let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
    let error_string = ForecastError::from(io_error).to_string();
    assert!(error_string.contains("IO error"));
    assert!(error_string.contains("permission denied"));
}

#[test]
fn test_user_conditions() {
    assert!(ForecastError::NoMatchingProducts {
        brand: "Acme".to_string()
    }
    .is_user_condition());
    assert!(ForecastError::UnknownProduct("Pen".to_string()).is_user_condition());
    assert!(!ForecastError::ArtifactError("bad tree".to_string()).is_user_condition());
    assert!(!ForecastError::DataError("empty".to_string()).is_user_condition());
}
