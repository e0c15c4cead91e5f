//! # meridian-core: Pure Analytics Logic for Meridian POS
//!
//! This crate is the **heart** of the Meridian back office. It contains the
//! entire financial analytics engine as pure functions with zero I/O
//! dependencies: a ledger slice goes in, derived statements come out.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Meridian Analytics Data Flow                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                meridian-db (Ledger Access Layer)                │   │
//! │  │       sales, sale line items, expenses — scoped by owner        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain records                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ meridian-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │   │ rollup  │ │   dre   │ │   abc   │ │ cashflow │ │ trend  │ │   │
//! │  │   │ monthly │ │ income  │ │ Pareto  │ │  daily   │ │ alerts │ │   │
//! │  │   │ buckets │ │ stmt    │ │ tiers   │ │  ledger  │ │ growth │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ derived statements                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        UI / export / webhook collaborators (out of scope)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Ledger record types (SaleRecord, SaleLineItem, ExpenseRecord)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`rollup`] - Per-calendar-month revenue/cost/expense aggregation
//! - [`dre`] - Income statement (DRE) with guarded margins
//! - [`abc`] - Pareto/ABC product classification
//! - [`cashflow`] - Daily inflow/outflow ledger
//! - [`distribution`] - Fixed-ratio profit distribution planning
//! - [`trend`] - Trend metrics, benchmark, alerts, pattern detection
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every analytic is deterministic - same input = same output
//! 2. **No I/O**: Database, network, clock access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Guarded Ratios**: Every division checks its denominator; zero revenue
//!    yields margin 0, never NaN
//!
//! ## Example Usage
//!
//! ```rust
//! use meridian_core::money::Money;
//! use meridian_core::distribution::{plan_distribution, DistributionOutcome};
//! use meridian_core::types::Month;
//!
//! let month = Month::new(2026, 8).unwrap();
//! let outcome = plan_distribution(month, Money::from_cents(100_000));
//!
//! match outcome {
//!     DistributionOutcome::Available(plan) => {
//!         assert_eq!(plan.withdrawal.cents(), 50_000); // 50%
//!         assert_eq!(plan.reserve.cents(), 10_000);    // 10%
//!     }
//!     DistributionOutcome::Unavailable => unreachable!(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod abc;
pub mod cashflow;
pub mod distribution;
pub mod dre;
pub mod error;
pub mod money;
pub mod rollup;
pub mod trend;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use meridian_core::Money` instead of
// `use meridian_core::money::Money`

pub use abc::{AbcCurve, AbcTier, ProductRevenueRank};
pub use cashflow::DailyFlow;
pub use distribution::{DistributionOutcome, DistributionPlan};
pub use dre::{CategoryTotal, DreStatement};
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use rollup::MonthlyAggregate;
pub use trend::{Alert, AlertSeverity, BenchmarkStatus, TrendAnalysis, TrendLabel, TrendPattern};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of trailing months the trend & alert engine analyzes.
///
/// ## Why six?
/// Long enough for the five month-over-month deltas the pattern rules need,
/// short enough that a seasonal business is not drowned out by old history.
pub const TREND_WINDOW_MONTHS: u32 = 6;
