//! # Engine Error Types
//!
//! The error taxonomy callers of the analytics engine see.
//!
//! ## Two Failure Classes
//! - **Validation**: bad input (inverted range, zero month count),
//!   rejected before any ledger read runs
//! - **DataAccess**: the ledger was unreachable or a query failed; only
//!   the failing analytic aborts, other analytics are unaffected
//!
//! Arithmetic is never a failure class: divisions are guarded in core and
//! empty ranges produce well-formed zero/empty results.

use thiserror::Error;

use meridian_core::error::ValidationError;
use meridian_db::DbError;

/// Errors surfaced by analytics engine operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Request rejected before any aggregation ran.
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// Ledger read or plan write failed.
    #[error("Ledger access failed: {0}")]
    DataAccess(#[from] DbError),
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

// =============================================================================
// Unit Tests
// =============================================================================
