//! Numeric input boundary.
//!
//! Form fields arrive as text. Everything that reaches the milling engine must
//! already be a finite, non-negative number; this module is where raw input is
//! turned into one. The lenient parsers default to `0.0` so a half-typed field
//! never blocks a recalculation.

use crate::error::{DomainError, DomainResult};

/// Parse a quantity/rate field strictly.
///
/// Rejects empty input, non-numeric text, `NaN`/infinite values and negative
/// numbers. Surrounding whitespace is ignored.
pub fn try_parse_non_negative_decimal(raw: &str) -> DomainResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("value is empty"));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| DomainError::validation(format!("'{trimmed}' is not a number")))?;

    if !value.is_finite() {
        return Err(DomainError::validation(format!("'{trimmed}' is not finite")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("'{trimmed}' is negative")));
    }

    // Normalise -0.0.
    if value == 0.0 {
        return Ok(0.0);
    }
    Ok(value)
}

/// Parse a quantity/rate field leniently: anything unusable becomes `0.0`.
pub fn parse_non_negative_decimal(raw: &str) -> f64 {
    try_parse_non_negative_decimal(raw).unwrap_or_else(|e| {
        tracing::debug!(input = raw, error = %e, "unusable numeric input, using 0");
        0.0
    })
}

/// Coerce an already-numeric value onto the engine's input domain.
pub fn non_negative_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 { value } else { 0.0 }
}
