//! # Repositories
//!
//! Repository implementations over the ledger tables.
//!
//! ## Conventions
//! - Every read is scoped by `owner_id` and a validated [`DateRange`]
//!   (`meridian_core::types::DateRange`); an unknown owner yields empty
//!   results, never an error
//! - Sale timestamps are compared with `occurred_at >= start` and
//!   `occurred_at < day-after-end`, so end-of-day sales are never dropped
//! - Writes exist for the front-of-house POS, the seed tool, and tests;
//!   the analytics engine itself only reads (the one exception being the
//!   distribution plan upsert)

pub mod distribution;
pub mod expense;
pub mod sale;
pub mod tax_config;
