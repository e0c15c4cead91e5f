//! # Error Types
//!
//! Validation error types for meridian-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  meridian-core errors (this file)                                      │
//! │  └── ValidationError  - Bad inputs, rejected before any aggregation    │
//! │                                                                         │
//! │  meridian-db errors (separate crate)                                   │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  meridian-analytics errors (engine crate)                              │
//! │  └── AnalyticsError   - Validation | DataAccess, what callers see      │
//! │                                                                         │
//! │  Flow: ValidationError ──┐                                             │
//! │        DbError ──────────┴──► AnalyticsError ──► caller                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (dates, field names)
//! 3. Errors are enum variants, never String
//! 4. Arithmetic never errors: every division guards its denominator
//!    and substitutes 0, so only *inputs* can be invalid

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are rejected before any ledger read or aggregation runs, so a bad
/// request never produces a half-computed statement.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Date range runs backwards.
    ///
    /// ## When This Occurs
    /// - Caller swapped start and end
    /// - UI date pickers out of sync
    #[error("date range start {start} is after end {end}")]
    RangeInverted { start: NaiveDate, end: NaiveDate },

    /// A count or quantity must be at least one.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., unparseable month label).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a MustBePositive error for a named field.
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    /// Creates a Required error for a named field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::RangeInverted {
            start: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "date range start 2026-03-10 is after end 2026-03-01"
        );

        let err = ValidationError::must_be_positive("month_count");
        assert_eq!(err.to_string(), "month_count must be positive");

        let err = ValidationError::required("owner_id");
        assert_eq!(err.to_string(), "owner_id is required");
    }
}
