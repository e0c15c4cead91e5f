//! # DRE Calculator (Income Statement)
//!
//! Derives the DRE — gross, operational, and net profit with margins — for
//! an arbitrary ledger range.
//!
//! ## Statement Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       DRE (Income Statement)                            │
//! │                                                                         │
//! │   revenue                     Σ non-canceled sale totals               │
//! │   − direct cost               Σ line-item quantity × frozen unit cost  │
//! │   ─────────────────                                                     │
//! │   = gross profit              (gross margin %)                         │
//! │   − operational expenses      Σ expenses, with category breakdown      │
//! │   ─────────────────                                                     │
//! │   = operational profit        (operational margin %)                   │
//! │   − taxes & fees              per-owner TaxConfig, absent ⇒ 0          │
//! │   ─────────────────                                                     │
//! │   = net profit                (net margin %)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All subtotals are exact cents; margins are guarded f64 percentages
//! (zero revenue ⇒ margin 0, never NaN).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{ExpenseRecord, SaleLineItem, SaleRecord, TaxConfig};

// =============================================================================
// Category Total
// =============================================================================

/// A tagged per-category expense total.
///
/// Explicit records instead of a string-keyed map: a typo'd category shows
/// up as its own visible line rather than silently splitting a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub amount: Money,
}

// =============================================================================
// DRE Statement
// =============================================================================

/// The computed income statement for a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DreStatement {
    pub revenue: Money,
    pub direct_cost: Money,
    pub gross_profit: Money,
    pub gross_margin: f64,
    pub operational_expenses: Money,
    /// Expense breakdown, ordered by amount descending (name ascending on
    /// ties, for reproducible output).
    pub expenses_by_category: Vec<CategoryTotal>,
    pub operational_profit: Money,
    pub operational_margin: f64,
    pub taxes_fees: Money,
    pub net_profit: Money,
    pub net_margin: f64,
}

// =============================================================================
// Calculation
// =============================================================================

/// Computes the income statement for a ledger slice.
///
/// ## Identities (exact, in cents)
/// - `gross_profit == revenue − direct_cost`
/// - `operational_profit == gross_profit − operational_expenses`
/// - `net_profit == operational_profit − taxes_fees`
///
/// ## Arguments
/// * `sales` - Sales in the range (canceled ones are skipped here too)
/// * `line_items` - Line items of non-canceled sales in the range
/// * `expenses` - Expenses dated in the range
/// * `tax_config` - Per-owner tax/fee schedule; `None` means no taxes line
pub fn income_statement(
    sales: &[SaleRecord],
    line_items: &[SaleLineItem],
    expenses: &[ExpenseRecord],
    tax_config: Option<&TaxConfig>,
) -> DreStatement {
    let revenue: Money = sales
        .iter()
        .filter(|s| !s.canceled)
        .map(SaleRecord::gross_total)
        .sum();

    let direct_cost: Money = line_items.iter().map(SaleLineItem::direct_cost).sum();
    let gross_profit = revenue - direct_cost;

    let operational_expenses: Money = expenses.iter().map(ExpenseRecord::amount).sum();
    let expenses_by_category = categorize(expenses);
    let operational_profit = gross_profit - operational_expenses;

    let taxes_fees = tax_config
        .map(|config| config.taxes_on(revenue))
        .unwrap_or_else(Money::zero);
    let net_profit = operational_profit - taxes_fees;

    DreStatement {
        revenue,
        direct_cost,
        gross_profit,
        gross_margin: gross_profit.percent_of(revenue),
        operational_expenses,
        expenses_by_category,
        operational_profit,
        operational_margin: operational_profit.percent_of(revenue),
        taxes_fees,
        net_profit,
        net_margin: net_profit.percent_of(revenue),
    }
}

/// Folds expenses into per-category totals with a deterministic order.
fn categorize(expenses: &[ExpenseRecord]) -> Vec<CategoryTotal> {
    let mut buckets: HashMap<&str, Money> = HashMap::new();
    for expense in expenses {
        *buckets.entry(expense.category.as_str()).or_default() += expense.amount();
    }

    let mut totals: Vec<CategoryTotal> = buckets
        .into_iter()
        .map(|(name, amount)| CategoryTotal {
            name: name.to_string(),
            amount,
        })
        .collect();
    totals.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
    totals
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PaymentMethod, TaxRate};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sale(id: &str, total: i64, canceled: bool) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2026, 8, 10, 12, 0, 0).unwrap(),
            gross_total_cents: total,
            payment_method: PaymentMethod::Card,
            canceled,
        }
    }

    fn item(sale_id: &str, qty: i64, unit_cost: i64) -> SaleLineItem {
        SaleLineItem {
            id: format!("li-{sale_id}-{qty}"),
            sale_id: sale_id.to_string(),
            product_id: "prod-1".to_string(),
            name_snapshot: "Item".to_string(),
            quantity: qty,
            unit_price_cents: unit_cost * 2,
            unit_cost_cents: unit_cost,
            line_total_cents: unit_cost * 2 * qty,
        }
    }

    fn expense(category: &str, amount: i64) -> ExpenseRecord {
        ExpenseRecord {
            id: format!("e-{category}-{amount}"),
            owner_id: "owner-1".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(),
            amount_cents: amount,
            category: category.to_string(),
        }
    }

    /// revenue=10000, directCost=4000, expenses=2000, taxesFees=500 →
    /// grossProfit=6000 (60%), operationalProfit=4000 (40%),
    /// netProfit=3500 (35%).
    #[test]
    fn test_reference_statement() {
        let sales = vec![sale("s1", 1_000_000, false)];
        let items = vec![item("s1", 4, 100_000)];
        let expenses = vec![expense("rent", 200_000)];
        let tax = TaxConfig::Rate(TaxRate::from_bps(500)); // 5% of revenue

        let dre = income_statement(&sales, &items, &expenses, Some(&tax));

        assert_eq!(dre.revenue.cents(), 1_000_000);
        assert_eq!(dre.direct_cost.cents(), 400_000);
        assert_eq!(dre.gross_profit.cents(), 600_000);
        assert!((dre.gross_margin - 60.0).abs() < 1e-9);
        assert_eq!(dre.operational_profit.cents(), 400_000);
        assert!((dre.operational_margin - 40.0).abs() < 1e-9);
        assert_eq!(dre.taxes_fees.cents(), 50_000);
        assert_eq!(dre.net_profit.cents(), 350_000);
        assert!((dre.net_margin - 35.0).abs() < 1e-9);
    }

    #[test]
    fn test_identities_exact() {
        let sales = vec![sale("s1", 123_457, false), sale("s2", 76_543, false)];
        let items = vec![item("s1", 3, 9_999), item("s2", 7, 1_111)];
        let expenses = vec![expense("payroll", 55_555), expense("rent", 44_445)];
        let tax = TaxConfig::Flat(Money::from_cents(8_900));

        let dre = income_statement(&sales, &items, &expenses, Some(&tax));

        assert_eq!(dre.gross_profit, dre.revenue - dre.direct_cost);
        assert_eq!(
            dre.operational_profit,
            dre.gross_profit - dre.operational_expenses
        );
        assert_eq!(dre.net_profit, dre.operational_profit - dre.taxes_fees);
    }

    #[test]
    fn test_zero_revenue_margins_are_zero() {
        let expenses = vec![expense("rent", 10_000)];
        let dre = income_statement(&[], &[], &expenses, None);

        assert!(dre.revenue.is_zero());
        assert_eq!(dre.gross_margin, 0.0);
        assert_eq!(dre.operational_margin, 0.0);
        assert_eq!(dre.net_margin, 0.0);
        assert_eq!(dre.net_profit.cents(), -10_000);
    }

    #[test]
    fn test_canceled_sales_excluded() {
        let sales = vec![sale("s1", 10_000, false), sale("s2", 90_000, true)];
        let dre = income_statement(&sales, &[], &[], None);
        assert_eq!(dre.revenue.cents(), 10_000);
    }

    #[test]
    fn test_absent_tax_config_means_zero() {
        let sales = vec![sale("s1", 10_000, false)];
        let dre = income_statement(&sales, &[], &[], None);
        assert!(dre.taxes_fees.is_zero());
        assert_eq!(dre.net_profit, dre.operational_profit);
    }

    #[test]
    fn test_category_breakdown_ordered() {
        let expenses = vec![
            expense("rent", 50_000),
            expense("supplies", 20_000),
            expense("payroll", 50_000),
            expense("supplies", 5_000),
        ];
        let dre = income_statement(&[], &[], &expenses, None);

        assert_eq!(dre.operational_expenses.cents(), 125_000);
        // Amount descending; "payroll" before "rent" on the 50k tie
        let names: Vec<&str> = dre
            .expenses_by_category
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["payroll", "rent", "supplies"]);
        assert_eq!(dre.expenses_by_category[2].amount.cents(), 25_000);
    }
}
