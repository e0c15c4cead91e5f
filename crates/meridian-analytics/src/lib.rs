//! # meridian-analytics: The Financial Analytics Engine
//!
//! The engine facade for the Meridian back office. Each analytic is an
//! independent, stateless, read-and-compute operation:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     AnalyticsEngine                                     │
//! │                                                                         │
//! │  request ──► validate ──► concurrent ledger reads ──► pure math ──►    │
//! │              (reject       (meridian-db, owner +      (meridian-core)  │
//! │               bad input     range scoped)                               │
//! │               first)                                                    │
//! │                                                                         │
//! │  Operations:                                                            │
//! │    monthly_rollup      trailing per-month aggregates                   │
//! │    dre                 income statement for a range                    │
//! │    abc_curve           Pareto A/B/C product classification            │
//! │    cash_flow           dense daily inflow/outflow ledger              │
//! │    profit_distribution 50/30/10/10 plan or Unavailable                │
//! │    save_profit_distribution  atomic (owner, month) upsert             │
//! │    trend_analysis      metrics + alerts + patterns                    │
//! │                                                                         │
//! │  No caching, no shared mutable state, no locking: every call          │
//! │  recomputes from raw records. The sole write is the plan upsert.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations that hinge on "the current month" come in two flavors: the
//! plain method resolves today from the system clock, and an `_as_of`
//! variant takes an explicit reference date (tests and backfills use the
//! latter).

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod error;

// =============================================================================
// Re-exports
// =============================================================================

pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, AnalyticsResult};
