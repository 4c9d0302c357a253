//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_model(config, &mut result);
        Self::validate_overlay(config, &mut result);
        Self::validate_popup(config, &mut result);

        result
    }

    fn validate_model(config: &Config, result: &mut ValidationResult) {
        let model = &config.model;

        if !model.base_url.starts_with("http://") && !model.base_url.starts_with("https://") {
            result.add_error(ValidationError::new(
                "model.base_url",
                "base_url must start with http:// or https://",
            ));
        }

        if model.model.trim().is_empty() {
            result.add_error(ValidationError::new("model.model", "Model cannot be empty"));
        }

        if model.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "model.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        } else if model.timeout_seconds > 300 {
            result.add_warning(ValidationWarning::new(
                "model.timeout_seconds",
                "timeout_seconds is very high (>300), a hung request will block its panel",
            ));
        }

        if model.connect_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "model.connect_timeout_seconds",
                "connect_timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_overlay(config: &Config, result: &mut ValidationResult) {
        let overlay = &config.overlay;

        if overlay.line_height_px == 0 {
            result.add_error(ValidationError::new(
                "overlay.line_height_px",
                "line_height_px must be greater than 0",
            ));
        }

        if overlay.chars_per_line == 0 {
            result.add_error(ValidationError::new(
                "overlay.chars_per_line",
                "chars_per_line must be greater than 0",
            ));
        }

        if overlay.collapsed_height_px == 0 {
            result.add_error(ValidationError::new(
                "overlay.collapsed_height_px",
                "collapsed_height_px must be greater than 0",
            ));
        }

        if overlay.min_selection_chars == 0 {
            result.add_warning(ValidationWarning::new(
                "overlay.min_selection_chars",
                "min_selection_chars is 0, any click may open the menu",
            ));
        }
    }

    fn validate_popup(config: &Config, result: &mut ValidationResult) {
        if config.popup.page_context_limit == 0 {
            result.add_error(ValidationError::new(
                "popup.page_context_limit",
                "page_context_limit must be greater than 0",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
