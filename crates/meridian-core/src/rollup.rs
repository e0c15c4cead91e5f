//! # Monthly Rollup Aggregator
//!
//! Buckets a window of ledger records into per-calendar-month aggregates.
//!
//! ## How Bucketing Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Monthly Rollup                                       │
//! │                                                                         │
//! │  window: [2026-03 .. 2026-08]  (oldest → newest, every month present)  │
//! │                                                                         │
//! │  sales ──────────► bucket by sale date ─────────► revenue per month    │
//! │  line items ─────► bucket by PARENT SALE date ──► direct cost per month│
//! │  expenses ───────► bucket by expense date ──────► expenses per month   │
//! │                                                                         │
//! │  profit = revenue − direct_cost − expenses     (exact, in cents)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One Temporal Key
//! Revenue AND direct cost are both attributed by the parent sale's date.
//! Attributing cost by line-item insertion time would let a sale rung up at
//! 23:58 on the 31st split its revenue and cost across two months.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{ExpenseRecord, Month, SaleLineItem, SaleRecord};

// =============================================================================
// Monthly Aggregate
// =============================================================================

/// Revenue, direct cost, expenses, and profit for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub month: Month,
    /// Σ non-canceled sale totals dated in the month.
    pub revenue: Money,
    /// Σ quantity × frozen unit cost, by parent-sale date.
    pub direct_cost: Money,
    /// Σ expense amounts dated in the month.
    pub expenses: Money,
    /// revenue − direct_cost − expenses. Always holds exactly.
    pub profit: Money,
}

impl MonthlyAggregate {
    /// An all-zero aggregate for a month with no activity.
    pub fn empty(month: Month) -> Self {
        MonthlyAggregate {
            month,
            revenue: Money::zero(),
            direct_cost: Money::zero(),
            expenses: Money::zero(),
            profit: Money::zero(),
        }
    }
}

// =============================================================================
// Rollup
// =============================================================================

/// Aggregates a ledger window into one entry per requested month.
///
/// ## Guarantees
/// - Output order matches `months` (callers pass oldest → newest)
/// - Every requested month gets an entry, even if all values are zero
/// - Canceled sales contribute nothing: not to revenue, and — because cost
///   buckets resolve through the non-canceled sale index — not to cost
/// - Records dated outside `months` are ignored
///
/// ## Arguments
/// * `months` - The requested calendar months (a `Month::trailing` window)
/// * `sales` - Sales overlapping the window
/// * `line_items` - Line items whose parent sales overlap the window
/// * `expenses` - Expenses overlapping the window
pub fn monthly_rollup(
    months: &[Month],
    sales: &[SaleRecord],
    line_items: &[SaleLineItem],
    expenses: &[ExpenseRecord],
) -> Vec<MonthlyAggregate> {
    // Index the requested months so out-of-window records fall away
    let mut slots: HashMap<Month, usize> = HashMap::with_capacity(months.len());
    let mut rollup: Vec<MonthlyAggregate> = Vec::with_capacity(months.len());
    for (idx, month) in months.iter().enumerate() {
        slots.insert(*month, idx);
        rollup.push(MonthlyAggregate::empty(*month));
    }

    // Sale id → month, for non-canceled sales only. Line items attribute
    // through this index, which is what keeps canceled costs out and both
    // revenue and cost on the same temporal key.
    let mut sale_months: HashMap<&str, Month> = HashMap::with_capacity(sales.len());

    for sale in sales {
        if sale.canceled {
            continue;
        }
        let month = Month::of(sale.occurred_on());
        sale_months.insert(sale.id.as_str(), month);
        if let Some(&idx) = slots.get(&month) {
            rollup[idx].revenue += sale.gross_total();
        }
    }

    for item in line_items {
        let Some(month) = sale_months.get(item.sale_id.as_str()) else {
            // Parent canceled or outside the window
            continue;
        };
        if let Some(&idx) = slots.get(month) {
            rollup[idx].direct_cost += item.direct_cost();
        }
    }

    for expense in expenses {
        if let Some(&idx) = slots.get(&Month::of(expense.occurred_on)) {
            rollup[idx].expenses += expense.amount();
        }
    }

    for entry in &mut rollup {
        entry.profit = entry.revenue - entry.direct_cost - entry.expenses;
    }

    rollup
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn sale(id: &str, y: i32, m: u32, d: u32, total: i64, canceled: bool) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            occurred_at: Utc.with_ymd_and_hms(y, m, d, 14, 30, 0).unwrap(),
            gross_total_cents: total,
            payment_method: PaymentMethod::Cash,
            canceled,
        }
    }

    fn item(id: &str, sale_id: &str, qty: i64, unit_cost: i64) -> SaleLineItem {
        SaleLineItem {
            id: id.to_string(),
            sale_id: sale_id.to_string(),
            product_id: format!("prod-{id}"),
            name_snapshot: "Item".to_string(),
            quantity: qty,
            unit_price_cents: unit_cost * 2,
            unit_cost_cents: unit_cost,
            line_total_cents: unit_cost * 2 * qty,
        }
    }

    fn expense(id: &str, y: i32, m: u32, d: u32, amount: i64) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            occurred_on: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            amount_cents: amount,
            category: "rent".to_string(),
        }
    }

    fn window(end_y: i32, end_m: u32, count: u32) -> Vec<Month> {
        Month::new(end_y, end_m).unwrap().trailing(count)
    }

    #[test]
    fn test_no_month_skipped() {
        let months = window(2026, 8, 6);
        let rollup = monthly_rollup(&months, &[], &[], &[]);

        assert_eq!(rollup.len(), 6);
        assert_eq!(rollup[0].month, Month::new(2026, 3).unwrap());
        assert_eq!(rollup[5].month, Month::new(2026, 8).unwrap());
        for entry in &rollup {
            assert!(entry.revenue.is_zero());
            assert!(entry.profit.is_zero());
        }
    }

    #[test]
    fn test_buckets_by_sale_date() {
        let months = window(2026, 8, 3); // Jun, Jul, Aug
        let sales = vec![
            sale("s1", 2026, 6, 15, 10_000, false),
            sale("s2", 2026, 8, 1, 20_000, false),
            sale("s3", 2026, 8, 31, 5_000, false),
        ];
        let items = vec![
            item("a", "s1", 2, 1_000), // Jun cost: 2000
            item("b", "s2", 1, 4_000), // Aug cost: 4000
        ];
        let expenses = vec![expense("e1", 2026, 7, 5, 3_000)];

        let rollup = monthly_rollup(&months, &sales, &items, &expenses);

        assert_eq!(rollup[0].revenue.cents(), 10_000); // Jun
        assert_eq!(rollup[0].direct_cost.cents(), 2_000);
        assert_eq!(rollup[1].expenses.cents(), 3_000); // Jul
        assert_eq!(rollup[1].profit.cents(), -3_000);
        assert_eq!(rollup[2].revenue.cents(), 25_000); // Aug
        assert_eq!(rollup[2].direct_cost.cents(), 4_000);
        assert_eq!(rollup[2].profit.cents(), 21_000);
    }

    #[test]
    fn test_canceled_sales_contribute_nothing() {
        let months = window(2026, 8, 1);
        let sales = vec![
            sale("live", 2026, 8, 10, 10_000, false),
            sale("dead", 2026, 8, 11, 99_999, true),
        ];
        // The canceled sale's line item must not leak into direct cost
        let items = vec![item("a", "live", 1, 2_000), item("b", "dead", 5, 9_000)];

        let rollup = monthly_rollup(&months, &sales, &items, &[]);

        assert_eq!(rollup[0].revenue.cents(), 10_000);
        assert_eq!(rollup[0].direct_cost.cents(), 2_000);
    }

    #[test]
    fn test_out_of_window_records_ignored() {
        let months = window(2026, 8, 2); // Jul, Aug
        let sales = vec![
            sale("old", 2026, 1, 10, 77_000, false),
            sale("cur", 2026, 8, 10, 10_000, false),
        ];
        let items = vec![item("a", "old", 1, 50_000), item("b", "cur", 1, 1_000)];
        let expenses = vec![expense("e", 2025, 12, 31, 88_000)];

        let rollup = monthly_rollup(&months, &sales, &items, &expenses);

        let total_revenue: Money = rollup.iter().map(|m| m.revenue).sum();
        let total_cost: Money = rollup.iter().map(|m| m.direct_cost).sum();
        let total_expenses: Money = rollup.iter().map(|m| m.expenses).sum();
        assert_eq!(total_revenue.cents(), 10_000);
        assert_eq!(total_cost.cents(), 1_000);
        assert_eq!(total_expenses.cents(), 0);
    }

    #[test]
    fn test_profit_identity_holds() {
        let months = window(2026, 8, 2);
        let sales = vec![sale("s1", 2026, 7, 3, 50_000, false)];
        let items = vec![item("a", "s1", 4, 3_000)];
        let expenses = vec![expense("e1", 2026, 7, 20, 7_500)];

        let rollup = monthly_rollup(&months, &sales, &items, &expenses);

        for entry in &rollup {
            assert_eq!(
                entry.profit,
                entry.revenue - entry.direct_cost - entry.expenses
            );
        }
    }
}
