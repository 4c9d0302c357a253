use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.model.timeout_seconds = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "model.timeout_seconds"));
}

#[test]
fn test_validate_high_timeout_warning() {
    let mut config = Config::default();
    config.model.timeout_seconds = 600;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "model.timeout_seconds"));
}

#[test]
fn test_validate_invalid_base_url() {
    let mut config = Config::default();
    config.model.base_url = "ftp://example.com".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "model.base_url"));
}

#[test]
fn test_validate_empty_model() {
    let mut config = Config::default();
    config.model.model = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "model.model"));
}

#[test]
fn test_validate_zero_line_metrics() {
    let mut config = Config::default();
    config.overlay.line_height_px = 0;
    config.overlay.chars_per_line = 0;

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_zero_page_context_limit() {
    let mut config = Config::default();
    config.popup.page_context_limit = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_into_result_returns_first_error() {
    let mut config = Config::default();
    config.model.connect_timeout_seconds = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("model.connect_timeout_seconds"));
}

#[test]
fn test_into_result_passes_warnings() {
    let mut config = Config::default();
    config.overlay.min_selection_chars = 0;

    let warnings = ConfigValidator::validate(&config).into_result().unwrap();
    assert_eq!(warnings.len(), 1);
}
