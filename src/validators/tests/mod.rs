use super::{validate_request, ValidationResult};

#[test]
fn test_valid_request_passes() {
    let result = validate_request("ORDERS", Some("2024-01-01"), Some("00:00:00"));
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(!result.should_skip());
}

#[test]
fn test_blank_identifier_is_a_warning_not_an_error() {
    let result = validate_request("   ", None, None);
    assert!(result.is_valid);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.should_skip());
}

#[test]
fn test_missing_date_and_time_are_accepted() {
    // Both default to the current instant at the command layer.
    let result = validate_request("ORDERS", None, None);
    assert!(result.is_valid);
}

#[test]
fn test_malformed_date_is_an_error() {
    let result = validate_request("ORDERS", Some("01/01/2024"), None);
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("01/01/2024"));
}

#[test]
fn test_malformed_time_is_an_error() {
    let result = validate_request("ORDERS", None, Some("25:99:00"));
    assert!(!result.is_valid);
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_fractional_seconds_are_accepted() {
    let result = validate_request("ORDERS", Some("2024-01-01"), Some("12:30:45.123456"));
    assert!(result.is_valid);
}

#[test]
fn test_manual_result_construction() {
    let mut result = ValidationResult::valid();
    result.add_warning("heads up".to_string());
    assert!(result.is_valid);

    result.add_error("broken".to_string());
    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["broken".to_string()]);
}
