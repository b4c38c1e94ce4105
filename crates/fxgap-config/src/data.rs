//! Input file configuration

use fxgap_core::LoaderOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Quote history export to analyze
    pub input_path: Option<PathBuf>,

    /// Field delimiter (single ASCII character)
    pub delimiter: char,

    /// Accepted date formats (chrono strftime syntax), tried in order
    pub date_formats: Vec<String>,

    /// Accepted time formats (chrono strftime syntax), tried in order
    pub time_formats: Vec<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        let loader = LoaderOptions::default();
        Self {
            input_path: None,
            delimiter: loader.delimiter as char,
            date_formats: loader.date_formats,
            time_formats: loader.time_formats,
        }
    }
}

impl DataConfig {
    /// Build loader options, validating the delimiter
    pub fn loader_options(&self) -> Result<LoaderOptions, String> {
        if !self.delimiter.is_ascii() {
            return Err(format!(
                "Delimiter {:?} is not a single ASCII character",
                self.delimiter
            ));
        }
        if self.date_formats.is_empty() || self.time_formats.is_empty() {
            return Err("At least one date and one time format is required".to_string());
        }

        Ok(LoaderOptions {
            delimiter: self.delimiter as u8,
            date_formats: self.date_formats.clone(),
            time_formats: self.time_formats.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_tab_separated() {
        let options = DataConfig::default().loader_options().unwrap();
        assert_eq!(options.delimiter, b'\t');
        assert_eq!(options.date_formats[0], "%Y.%m.%d");
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = DataConfig {
            delimiter: '§',
            ..Default::default()
        };
        assert!(config.loader_options().is_err());
    }

    #[test]
    fn test_empty_formats_rejected() {
        let config = DataConfig {
            time_formats: Vec::new(),
            ..Default::default()
        };
        assert!(config.loader_options().is_err());
    }
}
