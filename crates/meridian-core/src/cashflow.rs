//! # Cash Flow Builder
//!
//! Builds the daily inflow/outflow ledger for a range.
//!
//! ## Dense Day List
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Daily Cash Flow                                       │
//! │                                                                         │
//! │  date        inflow    outflow   balance      (running — caller-side)  │
//! │  ───────     ───────   ───────   ────────     ──────────────────────   │
//! │  03-01       $500.00     $0.00    $500.00      $500.00                 │
//! │  03-02         $0.00     $0.00      $0.00      $500.00  ← no day      │
//! │  03-03       $120.00   $300.00   -$180.00      $320.00     skipped    │
//! │                                                                         │
//! │  The engine emits the ordered per-day list ONLY. The running balance   │
//! │  is a prefix sum the caller derives from 0 over that list — keeping    │
//! │  the engine output independent of any opening-balance policy.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{DateRange, ExpenseRecord, SaleRecord};

// =============================================================================
// Daily Flow
// =============================================================================

/// Inflow, outflow, and net movement for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFlow {
    pub date: NaiveDate,
    /// Σ non-canceled sale totals dated this day.
    pub inflow: Money,
    /// Σ expense amounts dated this day.
    pub outflow: Money,
    /// inflow − outflow for this day alone (NOT cumulative).
    pub balance: Money,
}

// =============================================================================
// Builder
// =============================================================================

/// Builds one `DailyFlow` per calendar day of the range, in order, with no
/// day skipped — a day with no movement is an explicit zero row, so charts
/// and exports never have to interpolate gaps.
pub fn daily_flows(
    range: DateRange,
    sales: &[SaleRecord],
    expenses: &[ExpenseRecord],
) -> Vec<DailyFlow> {
    let mut inflows: HashMap<NaiveDate, Money> = HashMap::new();
    for sale in sales {
        if sale.canceled {
            continue;
        }
        let day = sale.occurred_on();
        if range.contains(day) {
            *inflows.entry(day).or_default() += sale.gross_total();
        }
    }

    let mut outflows: HashMap<NaiveDate, Money> = HashMap::new();
    for expense in expenses {
        if range.contains(expense.occurred_on) {
            *outflows.entry(expense.occurred_on).or_default() += expense.amount();
        }
    }

    range
        .days()
        .map(|date| {
            let inflow = inflows.get(&date).copied().unwrap_or_default();
            let outflow = outflows.get(&date).copied().unwrap_or_default();
            DailyFlow {
                date,
                inflow,
                outflow,
                balance: inflow - outflow,
            }
        })
        .collect()
}

/// Derives the running cumulative balance over an ordered flow list,
/// starting from 0.
///
/// This is the caller-side prefix sum; it lives here so every collaborator
/// derives it the same way.
pub fn running_balances(flows: &[DailyFlow]) -> Vec<Money> {
    let mut running = Money::zero();
    flows
        .iter()
        .map(|flow| {
            running += flow.balance;
            running
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use chrono::{TimeZone, Utc};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn sale(id: &str, day: u32, hour: u32, total: i64, canceled: bool) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            occurred_at: Utc.with_ymd_and_hms(2026, 3, day, hour, 15, 0).unwrap(),
            gross_total_cents: total,
            payment_method: PaymentMethod::Pix,
            canceled,
        }
    }

    fn expense(id: &str, day: u32, amount: i64) -> ExpenseRecord {
        ExpenseRecord {
            id: id.to_string(),
            owner_id: "owner-1".to_string(),
            occurred_on: d(day),
            amount_cents: amount,
            category: "supplies".to_string(),
        }
    }

    #[test]
    fn test_every_day_present() {
        let range = DateRange::new(d(1), d(5)).unwrap();
        let flows = daily_flows(range, &[], &[]);

        assert_eq!(flows.len(), 5);
        for (offset, flow) in flows.iter().enumerate() {
            assert_eq!(flow.date, d(1 + offset as u32));
            assert!(flow.inflow.is_zero());
            assert!(flow.outflow.is_zero());
            assert!(flow.balance.is_zero());
        }
    }

    #[test]
    fn test_daily_aggregation() {
        let range = DateRange::new(d(1), d(3)).unwrap();
        let sales = vec![
            sale("s1", 1, 9, 50_000, false),
            sale("s2", 3, 10, 8_000, false),
            sale("s3", 3, 20, 4_000, false),
        ];
        let expenses = vec![expense("e1", 3, 30_000)];

        let flows = daily_flows(range, &sales, &expenses);

        assert_eq!(flows[0].inflow.cents(), 50_000);
        assert_eq!(flows[0].balance.cents(), 50_000);
        assert_eq!(flows[1].balance.cents(), 0);
        assert_eq!(flows[2].inflow.cents(), 12_000);
        assert_eq!(flows[2].outflow.cents(), 30_000);
        assert_eq!(flows[2].balance.cents(), -18_000);
    }

    #[test]
    fn test_canceled_sales_excluded() {
        let range = DateRange::single_day(d(1));
        let sales = vec![
            sale("live", 1, 9, 10_000, false),
            sale("dead", 1, 10, 99_000, true),
        ];

        let flows = daily_flows(range, &sales, &[]);
        assert_eq!(flows[0].inflow.cents(), 10_000);
    }

    #[test]
    fn test_out_of_range_records_ignored() {
        let range = DateRange::new(d(10), d(12)).unwrap();
        let sales = vec![sale("s1", 9, 23, 5_000, false)];
        let expenses = vec![expense("e1", 13, 7_000)];

        let flows = daily_flows(range, &sales, &expenses);
        assert!(flows.iter().all(|f| f.inflow.is_zero()));
        assert!(flows.iter().all(|f| f.outflow.is_zero()));
    }

    #[test]
    fn test_running_balance_prefix_sum() {
        let range = DateRange::new(d(1), d(4)).unwrap();
        let sales = vec![sale("s1", 1, 9, 10_000, false), sale("s2", 3, 9, 2_000, false)];
        let expenses = vec![expense("e1", 2, 4_000)];

        let flows = daily_flows(range, &sales, &expenses);
        let running = running_balances(&flows);

        assert_eq!(
            running.iter().map(Money::cents).collect::<Vec<_>>(),
            vec![10_000, 6_000, 8_000, 8_000]
        );

        // runningBalance(d) == runningBalance(d-1) + dailyBalance(d),
        // with runningBalance(start-1) = 0
        let mut previous = Money::zero();
        for (flow, balance) in flows.iter().zip(&running) {
            assert_eq!(*balance, previous + flow.balance);
            previous = *balance;
        }
    }
}
