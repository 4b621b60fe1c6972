//! Input normalization shared by the catalog and tenant services.

use rust_decimal::Decimal;

use crate::constants::{MAX_CODE_LENGTH, MAX_PHASES, MIN_PHASES};
use crate::errors::{Result, ValidationError};

/// Trims and upper-cases a catalog code.
pub fn normalize_code(code: &str) -> Result<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ValidationError::MissingField("code".to_string()).into());
    }
    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::InvalidInput(format!(
            "Code '{}' is longer than {} characters",
            code, MAX_CODE_LENGTH
        ))
        .into());
    }
    Ok(code.to_uppercase())
}

/// Trims a required text field, failing when it is blank.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    Ok(value.to_string())
}

/// Trims an optional text field, collapsing blank values to `None`.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::InvalidInput(format!(
            "{} must not be negative (got {})",
            field, value
        ))
        .into());
    }
    Ok(())
}

pub fn ensure_positive(field: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "{} must be greater than zero (got {})",
            field, value
        ))
        .into());
    }
    Ok(())
}

pub fn ensure_positive_int(field: &str, value: i32) -> Result<()> {
    if value <= 0 {
        return Err(ValidationError::InvalidInput(format!(
            "{} must be greater than zero (got {})",
            field, value
        ))
        .into());
    }
    Ok(())
}

pub fn ensure_phase_count(field: &str, phases: i32) -> Result<()> {
    if !(MIN_PHASES..=MAX_PHASES).contains(&phases) {
        return Err(ValidationError::InvalidInput(format!(
            "{} must be between {} and {} (got {})",
            field, MIN_PHASES, MAX_PHASES, phases
        ))
        .into());
    }
    Ok(())
}
