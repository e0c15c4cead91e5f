//! # Profit Distribution Planner
//!
//! Splits a month's net profit into fixed allocation buckets.
//!
//! ## The 50/30/10/10 Split
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Profit Distribution                                    │
//! │                                                                         │
//! │  net profit ──┬── 50% withdrawal     (owner pay)                       │
//! │               ├── 30% reinvestment   (growth)                          │
//! │               ├── 10% taxes          (set aside)                       │
//! │               └── 10% reserve        (emergency fund)                  │
//! │                                                                         │
//! │  Ratios sum to exactly 1.00. The first three buckets round half-up     │
//! │  in cents; the reserve takes the remainder, so the four always sum     │
//! │  exactly to the net profit.                                            │
//! │                                                                         │
//! │  net profit ≤ 0  ⇒  Unavailable (a distinct state, NOT a zero plan)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Month;

// =============================================================================
// Allocation Ratios
// =============================================================================

/// Owner withdrawal share, in basis points (50%).
pub const WITHDRAWAL_BPS: u32 = 5000;

/// Reinvestment share, in basis points (30%).
pub const REINVESTMENT_BPS: u32 = 3000;

/// Tax set-aside share, in basis points (10%).
pub const TAXES_BPS: u32 = 1000;

/// Reserve share, in basis points (10%). The reserve bucket absorbs the
/// rounding remainder of the other three.
pub const RESERVE_BPS: u32 = 1000;

// =============================================================================
// Plan Types
// =============================================================================

/// A month's profit distribution plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionPlan {
    pub month: Month,
    pub net_profit: Money,
    pub withdrawal: Money,
    pub reinvestment: Money,
    pub taxes: Money,
    pub reserve: Money,
}

/// Outcome of planning: either a plan, or the explicit "nothing to
/// distribute" state for a month without positive net profit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "plan")]
pub enum DistributionOutcome {
    Available(DistributionPlan),
    Unavailable,
}

impl DistributionOutcome {
    /// Returns the plan when one is available.
    pub fn plan(&self) -> Option<&DistributionPlan> {
        match self {
            DistributionOutcome::Available(plan) => Some(plan),
            DistributionOutcome::Unavailable => None,
        }
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Plans the distribution of a month's net profit.
///
/// ## Exact-Sum Guarantee
/// `withdrawal + reinvestment + taxes + reserve == net_profit`, always:
/// the reserve is computed as the remainder after the three rounded
/// buckets, keeping it within a cent or two of its nominal 10%.
pub fn plan_distribution(month: Month, net_profit: Money) -> DistributionOutcome {
    if !net_profit.is_positive() {
        return DistributionOutcome::Unavailable;
    }

    let withdrawal = net_profit.apply_bps(WITHDRAWAL_BPS);
    let reinvestment = net_profit.apply_bps(REINVESTMENT_BPS);
    let taxes = net_profit.apply_bps(TAXES_BPS);
    let reserve = net_profit - withdrawal - reinvestment - taxes;

    DistributionOutcome::Available(DistributionPlan {
        month,
        net_profit,
        withdrawal,
        reinvestment,
        taxes,
        reserve,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
