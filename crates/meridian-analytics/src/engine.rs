//! # Analytics Engine
//!
//! The facade composing ledger reads with the pure analytics in
//! meridian-core.
//!
//! ## Read Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  One Rollup Request                                     │
//! │                                                                         │
//! │                    ┌── sales_in_range ──────┐                           │
//! │  validate ────────►├── line_items_in_range ─┤──► monthly_rollup()      │
//! │                    └── expenses_in_range ───┘    (pure, in core)       │
//! │                                                                         │
//! │  The three window reads are independent and run concurrently           │
//! │  (tokio::try_join!). Aggregation starts once all three return.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never mutates ledger records. Its sole write is the profit
//! distribution upsert, a single atomic statement keyed by (owner, month).

use chrono::{NaiveDate, Utc};
use tracing::debug;

use meridian_core::abc::{self, AbcCurve};
use meridian_core::cashflow::{self, DailyFlow};
use meridian_core::distribution::{plan_distribution, DistributionOutcome, DistributionPlan};
use meridian_core::dre::{income_statement, DreStatement};
use meridian_core::error::ValidationError;
use meridian_core::rollup::{monthly_rollup, MonthlyAggregate};
use meridian_core::trend::{self, TrendAnalysis};
use meridian_core::types::{DateRange, Month};
use meridian_core::TREND_WINDOW_MONTHS;
use meridian_db::Database;

use crate::error::AnalyticsResult;

// =============================================================================
// Analytics Engine
// =============================================================================

/// Stateless facade over the ledger. Cloning is cheap (shared pool), so
/// callers can fan requests out across tasks freely.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    db: Database,
}

impl AnalyticsEngine {
    /// Creates an engine over the given ledger database.
    pub fn new(db: Database) -> Self {
        AnalyticsEngine { db }
    }

    // =========================================================================
    // Monthly Rollup
    // =========================================================================

    /// Per-calendar-month aggregates for the trailing `month_count` months
    /// ending in the current month.
    pub async fn monthly_rollup(
        &self,
        owner_id: &str,
        month_count: u32,
    ) -> AnalyticsResult<Vec<MonthlyAggregate>> {
        self.monthly_rollup_as_of(owner_id, month_count, Utc::now().date_naive())
            .await
    }

    /// Deterministic variant: the trailing window ends in the month
    /// containing `as_of`.
    pub async fn monthly_rollup_as_of(
        &self,
        owner_id: &str,
        month_count: u32,
        as_of: NaiveDate,
    ) -> AnalyticsResult<Vec<MonthlyAggregate>> {
        if month_count == 0 {
            return Err(ValidationError::must_be_positive("month_count").into());
        }

        let months = Month::of(as_of).trailing(month_count);
        // trailing() yields oldest → newest, so the window range is valid
        let window = DateRange::new(
            months[0].first_day(),
            months[months.len() - 1].last_day(),
        )?;

        debug!(owner_id = %owner_id, window = %window, "Computing monthly rollup");

        let sales_repo = self.db.sales();
        let expense_repo = self.db.expenses();
        let (sales, line_items, expenses) = tokio::try_join!(
            sales_repo.sales_in_range(owner_id, window, false),
            sales_repo.line_items_in_range(owner_id, window),
            expense_repo.expenses_in_range(owner_id, window),
        )?;

        Ok(monthly_rollup(&months, &sales, &line_items, &expenses))
    }

    // =========================================================================
    // DRE (Income Statement)
    // =========================================================================

    /// Income statement for an arbitrary inclusive date range.
    ///
    /// Taxes/fees come from the owner's configured schedule; owners
    /// without one get a zero taxes line.
    pub async fn dre(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<DreStatement> {
        let range = DateRange::new(start, end)?;

        debug!(owner_id = %owner_id, range = %range, "Computing DRE");

        let sales_repo = self.db.sales();
        let expense_repo = self.db.expenses();
        let tax_repo = self.db.tax_config();
        let (sales, line_items, expenses, tax_config) = tokio::try_join!(
            sales_repo.sales_in_range(owner_id, range, false),
            sales_repo.line_items_in_range(owner_id, range),
            expense_repo.expenses_in_range(owner_id, range),
            tax_repo.config_for_owner(owner_id),
        )?;

        Ok(income_statement(
            &sales,
            &line_items,
            &expenses,
            tax_config.as_ref(),
        ))
    }

    // =========================================================================
    // ABC Curve
    // =========================================================================

    /// Pareto A/B/C classification of products by revenue over a range.
    pub async fn abc_curve(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<AbcCurve> {
        let range = DateRange::new(start, end)?;

        debug!(owner_id = %owner_id, range = %range, "Computing ABC curve");

        let line_items = self
            .db
            .sales()
            .line_items_in_range(owner_id, range)
            .await?;

        Ok(abc::classify(&line_items))
    }

    // =========================================================================
    // Cash Flow
    // =========================================================================

    /// Dense daily inflow/outflow ledger for a range. The running
    /// cumulative balance is the caller's prefix sum
    /// ([`meridian_core::cashflow::running_balances`]).
    pub async fn cash_flow(
        &self,
        owner_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<Vec<DailyFlow>> {
        let range = DateRange::new(start, end)?;

        debug!(owner_id = %owner_id, range = %range, "Computing cash flow");

        let sales_repo = self.db.sales();
        let expense_repo = self.db.expenses();
        let (sales, expenses) = tokio::try_join!(
            sales_repo.sales_in_range(owner_id, range, false),
            expense_repo.expenses_in_range(owner_id, range),
        )?;

        Ok(cashflow::daily_flows(range, &sales, &expenses))
    }

    // =========================================================================
    // Profit Distribution
    // =========================================================================

    /// Plans the current month's 50/30/10/10 profit distribution from the
    /// month-to-date net profit. A month without positive net profit
    /// yields the explicit `Unavailable` state.
    pub async fn profit_distribution(
        &self,
        owner_id: &str,
    ) -> AnalyticsResult<DistributionOutcome> {
        self.profit_distribution_as_of(owner_id, Utc::now().date_naive())
            .await
    }

    /// Deterministic variant: plans for the month containing `as_of`.
    pub async fn profit_distribution_as_of(
        &self,
        owner_id: &str,
        as_of: NaiveDate,
    ) -> AnalyticsResult<DistributionOutcome> {
        let month = Month::of(as_of);
        let range = month.range();

        debug!(owner_id = %owner_id, month = %month, "Planning profit distribution");

        let statement = self.dre(owner_id, range.start(), range.end()).await?;
        Ok(plan_distribution(month, statement.net_profit))
    }

    /// Saves a distribution plan. Upsert keyed by (owner, month): a later
    /// save for the same month overwrites the earlier one, never creating
    /// a duplicate. Concurrent saves resolve last-writer-wins.
    pub async fn save_profit_distribution(
        &self,
        owner_id: &str,
        plan: &DistributionPlan,
    ) -> AnalyticsResult<()> {
        self.db.distributions().upsert_plan(owner_id, plan).await?;
        Ok(())
    }

    // =========================================================================
    // Trend & Alerts
    // =========================================================================

    /// Trend metrics, alerts, and advisory patterns from the trailing
    /// six-month rollup.
    pub async fn trend_analysis(&self, owner_id: &str) -> AnalyticsResult<TrendAnalysis> {
        self.trend_analysis_as_of(owner_id, Utc::now().date_naive())
            .await
    }

    /// Deterministic variant: the window ends in the month containing
    /// `as_of`.
    pub async fn trend_analysis_as_of(
        &self,
        owner_id: &str,
        as_of: NaiveDate,
    ) -> AnalyticsResult<TrendAnalysis> {
        let window = self
            .monthly_rollup_as_of(owner_id, TREND_WINDOW_MONTHS, as_of)
            .await?;
        Ok(trend::analyze(&window))
    }
}
