//! Configuration validation.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::THEMES;
use super::types::{AppConfig, DisplayConfig, ListConfig};
use crate::stores::StoreInfo;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.list.validate());
        errors.extend(self.display.validate());
        for (id, store) in &self.stores {
            errors.extend(validate_store(id, store));
        }
        errors
    }
}

impl Validatable for ListConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.page_size == 0 {
            errors.push(ConfigError::new("list.page_size", "Page size must be at least 1"));
        }
        if self.similarity_limit == 0 {
            errors.push(ConfigError::new(
                "list.similarity_limit",
                "Similarity limit must be at least 1",
            ));
        }
        if self.instance_id.trim().is_empty() {
            errors.push(ConfigError::new("list.instance_id", "Instance id must not be empty"));
        }
        errors
    }
}

impl Validatable for DisplayConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.language.len() != 2 || !self.language.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(ConfigError::new(
                "display.language",
                format!("Expected a two-letter language code, got '{}'", self.language),
            ));
        }

        if !THEMES.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "display.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    THEMES.join(", ")
                ),
            ));
        }

        errors
    }
}

fn validate_store(id: &str, store: &StoreInfo) -> Vec<ConfigError> {
    let mut errors = Vec::new();
    if !store.url_template.is_empty() && !store.url_template.contains("{id}") {
        errors.push(ConfigError::new(
            format!("stores.{id}.url_template"),
            "URL template must contain the {id} placeholder",
        ));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_list_config_validation() {
        let config = ListConfig {
            page_size: 0,
            similarity_limit: 0,
            ..ListConfig::default()
        };
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["list.page_size", "list.similarity_limit"]);
    }

    #[test]
    fn test_display_config_validation() {
        let config = DisplayConfig {
            language: "eng".to_string(),
            theme: "neon".to_string(),
        };
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_store_template_validation() {
        let config = AppConfig::builder()
            .store("billa", StoreInfo::new("Billa", "yellow", "https://billa.at/"))
            .store("spar", StoreInfo::new("Spar", "green", "https://spar.at/{id}"))
            .store("hofer", StoreInfo::new("Hofer", "blue", ""))
            .build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "stores.billa.url_template");
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::new("list.page_size", "Page size must be at least 1");
        assert_eq!(error.to_string(), "list.page_size: Page size must be at least 1");
    }
}
