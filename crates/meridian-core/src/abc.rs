//! # ABC Classifier (Pareto Analysis)
//!
//! Ranks products by revenue and assigns Pareto tiers A/B/C.
//!
//! ## The Boundary-Inclusive Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │             ABC Curve — cumulative revenue share                        │
//! │                                                                         │
//! │  100% ┤                                      ┌────── C                 │
//! │   95% ┤──────────────────────────┌───────────┘                         │
//! │       │                          │  B                                   │
//! │   80% ┤────────────┌─────────────┘                                     │
//! │       │            │  A                                                 │
//! │       │   ┌────────┘                                                    │
//! │       └───┴──────────────────────────────────────────► products        │
//! │           (sorted by revenue desc, ties by product id asc)             │
//! │                                                                         │
//! │  The product whose addition CROSSES a boundary belongs to the LOWER    │
//! │  tier: a shop where one product is 90% of revenue still has a          │
//! │  non-empty class A.                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Classification is deterministic: equal revenues are ordered by ascending
//! product id, so the same ledger always yields the same curve.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::money::Money;
use crate::types::SaleLineItem;

// =============================================================================
// Tier Boundaries
// =============================================================================

/// Cumulative revenue share (percent) where class A ends.
pub const CLASS_A_CUTOFF_PCT: f64 = 80.0;

/// Cumulative revenue share (percent) where class B ends.
pub const CLASS_B_CUTOFF_PCT: f64 = 95.0;

// =============================================================================
// Output Types
// =============================================================================

/// Pareto tier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbcTier {
    A,
    B,
    C,
}

/// One product's position on the ABC curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRevenueRank {
    pub product_id: String,
    /// Name frozen at sale time (snapshot), not the product's current name.
    pub name: String,
    pub revenue: Money,
    pub quantity_sold: i64,
    /// This product's share of total revenue, in percent.
    pub revenue_percentage: f64,
    /// Running share including this product, in percent.
    pub cumulative_percentage: f64,
    pub tier: AbcTier,
}

/// The full ABC curve: ordered tier lists plus the revenue base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcCurve {
    pub class_a: Vec<ProductRevenueRank>,
    pub class_b: Vec<ProductRevenueRank>,
    pub class_c: Vec<ProductRevenueRank>,
    pub total_revenue: Money,
}

impl AbcCurve {
    /// A curve with no products (zero total revenue).
    pub fn empty() -> Self {
        AbcCurve {
            class_a: Vec::new(),
            class_b: Vec::new(),
            class_c: Vec::new(),
            total_revenue: Money::zero(),
        }
    }

    /// Total number of ranked products across all tiers.
    pub fn product_count(&self) -> usize {
        self.class_a.len() + self.class_b.len() + self.class_c.len()
    }

    /// Iterates all ranks in curve order (A, then B, then C).
    pub fn iter(&self) -> impl Iterator<Item = &ProductRevenueRank> {
        self.class_a
            .iter()
            .chain(self.class_b.iter())
            .chain(self.class_c.iter())
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Builds the ABC curve from a range's line items.
///
/// ## Algorithm
/// 1. Aggregate revenue (line totals) and quantity per product
/// 2. Sort by revenue descending, ties by ascending product id
/// 3. Zero total revenue ⇒ three empty buckets
/// 4. Walk the list accumulating cumulative share
/// 5. Tier by the boundary-inclusive rule at 80% / 95%
///
/// Callers pass line items of non-canceled sales only; the ledger access
/// layer guarantees that scoping.
pub fn classify(line_items: &[SaleLineItem]) -> AbcCurve {
    // Per-product aggregation. Name comes from the first line item seen;
    // all snapshots of one product in one range carry the same name unless
    // the product was renamed mid-range, in which case first-seen wins.
    struct Tally {
        name: String,
        revenue: Money,
        quantity: i64,
    }

    let mut tallies: HashMap<&str, Tally> = HashMap::new();
    for item in line_items {
        let tally = tallies
            .entry(item.product_id.as_str())
            .or_insert_with(|| Tally {
                name: item.name_snapshot.clone(),
                revenue: Money::zero(),
                quantity: 0,
            });
        tally.revenue += item.line_total();
        tally.quantity += item.quantity;
    }

    let total_revenue: Money = tallies.values().map(|t| t.revenue).sum();
    if total_revenue.is_zero() {
        return AbcCurve::empty();
    }

    // Revenue descending, product id ascending on ties: deterministic
    let mut ranked: Vec<(&str, Tally)> = tallies.into_iter().collect();
    ranked.sort_by(|(id_a, a), (id_b, b)| b.revenue.cmp(&a.revenue).then_with(|| id_a.cmp(id_b)));

    let mut curve = AbcCurve {
        class_a: Vec::new(),
        class_b: Vec::new(),
        class_c: Vec::new(),
        total_revenue,
    };

    let mut running = Money::zero();
    for (product_id, tally) in ranked {
        let before = running.percent_of(total_revenue);
        running += tally.revenue;
        let cumulative = running.percent_of(total_revenue);

        // Boundary-inclusive: the product that crosses a cutoff still
        // belongs to the tier below it
        let tier = if before < CLASS_A_CUTOFF_PCT || cumulative <= CLASS_A_CUTOFF_PCT {
            AbcTier::A
        } else if before < CLASS_B_CUTOFF_PCT || cumulative <= CLASS_B_CUTOFF_PCT {
            AbcTier::B
        } else {
            AbcTier::C
        };

        let rank = ProductRevenueRank {
            product_id: product_id.to_string(),
            name: tally.name,
            revenue: tally.revenue,
            quantity_sold: tally.quantity,
            revenue_percentage: tally.revenue.percent_of(total_revenue),
            cumulative_percentage: cumulative,
            tier,
        };

        match tier {
            AbcTier::A => curve.class_a.push(rank),
            AbcTier::B => curve.class_b.push(rank),
            AbcTier::C => curve.class_c.push(rank),
        }
    }

    curve
}

// =============================================================================
// Unit Tests
// =============================================================================
