//! Fixed label encoders produced by the external fitting process

use crate::error::{ForecastError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct EncoderArtifact {
    classes: Vec<String>,
}

/// String-to-code mapping where a label's code is its index in the sorted
/// class list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    name: String,
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Create an encoder from its class list.
    ///
    /// The classes must be strictly ascending, which is how the fitting
    /// process stores them.
    pub fn new(name: &str, classes: Vec<String>) -> Result<Self> {
        if classes.is_empty() {
            return Err(ForecastError::ArtifactError(format!(
                "The {} encoder has no classes",
                name
            )));
        }
        if let Some(pair) = classes.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(ForecastError::ArtifactError(format!(
                "The {} encoder classes are not sorted and unique ('{}' before '{}')",
                name, pair[0], pair[1]
            )));
        }

        Ok(Self {
            name: name.to_string(),
            classes,
        })
    }

    /// Load an encoder from a JSON artifact of the form `{"classes": [...]}`
    pub fn from_json_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let artifact: EncoderArtifact = serde_json::from_reader(reader)?;
        let encoder = Self::new(name, artifact.classes)?;
        info!(
            encoder = name,
            path = %path.display(),
            classes = encoder.classes.len(),
            "loaded label encoder"
        );
        Ok(encoder)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn contains(&self, label: &str) -> bool {
        self.lookup(label).is_some()
    }

    /// Encode a label, failing when it was not seen during fitting
    pub fn transform(&self, label: &str) -> Result<usize> {
        self.lookup(label)
            .ok_or_else(|| ForecastError::UnknownLabel {
                encoder: self.name.clone(),
                label: label.to_string(),
            })
    }

    fn lookup(&self, label: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(label))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_transform_uses_sorted_index() {
        let encoder = LabelEncoder::new("channel", classes(&["Offline", "Online"])).unwrap();
        assert_eq!(encoder.transform("Offline").unwrap(), 0);
        assert_eq!(encoder.transform("Online").unwrap(), 1);
    }

    #[test]
    fn test_unknown_label() {
        let encoder = LabelEncoder::new("brand", classes(&["Acme", "Zeta"])).unwrap();
        match encoder.transform("Nope") {
            Err(ForecastError::UnknownLabel { encoder, label }) => {
                assert_eq!(encoder, "brand");
                assert_eq!(label, "Nope");
            }
            other => panic!("Expected UnknownLabel, got {:?}", other),
        }
        assert!(!encoder.contains("acme"));
    }

    #[test]
    fn test_rejects_unsorted_or_duplicate_classes() {
        assert!(LabelEncoder::new("brand", classes(&["Zeta", "Acme"])).is_err());
        assert!(LabelEncoder::new("brand", classes(&["Acme", "Acme"])).is_err());
        assert!(LabelEncoder::new("brand", Vec::new()).is_err());
    }
}
