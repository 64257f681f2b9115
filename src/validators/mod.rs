//! Validation utilities for LineageFlow

use chrono::{NaiveDate, NaiveTime};

/// Result of validating a lineage request before any query is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    /// Whether the validation passed or failed
    pub is_valid: bool,
    /// Fatal problems; no query may be built
    pub errors: Vec<String>,
    /// Non-fatal problems; the request becomes a no-op
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a new valid result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error to the result
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Add a warning without failing the validation
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// A warned request is skipped rather than executed.
    pub fn should_skip(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validates the operator-supplied pieces of a lineage request:
/// - an empty or whitespace-only identifier is a warning (the request is
///   skipped, no query runs)
/// - an unparseable cutoff date or time is an error
pub fn validate_request(
    identifier: &str,
    date: Option<&str>,
    time: Option<&str>,
) -> ValidationResult {
    let mut result = ValidationResult::valid();

    if identifier.trim().is_empty() {
        result.add_warning("Please enter an object or column name.".to_string());
    }

    if let Some(date) = date {
        if NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").is_err() {
            result.add_error(format!("Invalid cutoff date '{}' (expected YYYY-MM-DD)", date));
        }
    }

    if let Some(time) = time {
        if NaiveTime::parse_from_str(time.trim(), "%H:%M:%S%.f").is_err() {
            result.add_error(format!(
                "Invalid cutoff time '{}' (expected HH:MM:SS[.ffffff])",
                time
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests;
