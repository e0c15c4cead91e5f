//! # Distribution Repository
//!
//! Persistence for profit distribution plans.
//!
//! ## Upsert Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Plan Upsert — keyed by (owner, month)                      │
//! │                                                                         │
//! │  save(owner, 2026-08, plan A)  ──►  row created                        │
//! │  save(owner, 2026-08, plan B)  ──►  SAME row overwritten               │
//! │                                                                         │
//! │  One atomic INSERT .. ON CONFLICT DO UPDATE statement: concurrent      │
//! │  saves for the same month resolve last-writer-wins, and a duplicate    │
//! │  row can never exist.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use meridian_core::distribution::DistributionPlan;
use meridian_core::money::Money;
use meridian_core::types::Month;

/// Raw row shape; `month` is the stored `YYYY-MM` label.
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    month: String,
    net_profit_cents: i64,
    withdrawal_cents: i64,
    reinvestment_cents: i64,
    taxes_cents: i64,
    reserve_cents: i64,
}

impl PlanRow {
    fn into_plan(self) -> DbResult<DistributionPlan> {
        let month = Month::parse_label(&self.month)
            .map_err(|e| DbError::corrupt("profit_distributions", e.to_string()))?;
        Ok(DistributionPlan {
            month,
            net_profit: Money::from_cents(self.net_profit_cents),
            withdrawal: Money::from_cents(self.withdrawal_cents),
            reinvestment: Money::from_cents(self.reinvestment_cents),
            taxes: Money::from_cents(self.taxes_cents),
            reserve: Money::from_cents(self.reserve_cents),
        })
    }
}

/// Repository for distribution plan persistence.
#[derive(Debug, Clone)]
pub struct DistributionRepository {
    pool: SqlitePool,
}

impl DistributionRepository {
    /// Creates a new DistributionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DistributionRepository { pool }
    }

    /// Saves a plan, overwriting any existing plan for the same
    /// (owner, month). Never creates a duplicate.
    pub async fn upsert_plan(&self, owner_id: &str, plan: &DistributionPlan) -> DbResult<()> {
        debug!(owner_id = %owner_id, month = %plan.month, "Upserting distribution plan");

        let now: DateTime<Utc> = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO profit_distributions (
                owner_id, month, net_profit_cents,
                withdrawal_cents, reinvestment_cents, taxes_cents, reserve_cents,
                updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT (owner_id, month) DO UPDATE SET
                net_profit_cents   = excluded.net_profit_cents,
                withdrawal_cents   = excluded.withdrawal_cents,
                reinvestment_cents = excluded.reinvestment_cents,
                taxes_cents        = excluded.taxes_cents,
                reserve_cents      = excluded.reserve_cents,
                updated_at         = excluded.updated_at
            "#,
        )
        .bind(owner_id)
        .bind(plan.month.to_string())
        .bind(plan.net_profit.cents())
        .bind(plan.withdrawal.cents())
        .bind(plan.reinvestment.cents())
        .bind(plan.taxes.cents())
        .bind(plan.reserve.cents())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets the saved plan for an owner and month, if any.
    pub async fn plan_for_month(
        &self,
        owner_id: &str,
        month: Month,
    ) -> DbResult<Option<DistributionPlan>> {
        let row: Option<PlanRow> = sqlx::query_as(
            r#"
            SELECT month, net_profit_cents,
                   withdrawal_cents, reinvestment_cents, taxes_cents, reserve_cents
            FROM profit_distributions
            WHERE owner_id = ?1 AND month = ?2
            "#,
        )
        .bind(owner_id)
        .bind(month.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(PlanRow::into_plan).transpose()
    }

    /// Lists all saved plans for an owner, oldest month first.
    pub async fn plans_for_owner(&self, owner_id: &str) -> DbResult<Vec<DistributionPlan>> {
        let rows: Vec<PlanRow> = sqlx::query_as(
            r#"
            SELECT month, net_profit_cents,
                   withdrawal_cents, reinvestment_cents, taxes_cents, reserve_cents
            FROM profit_distributions
            WHERE owner_id = ?1
            ORDER BY month
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PlanRow::into_plan).collect()
    }
}
