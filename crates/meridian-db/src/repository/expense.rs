//! # Expense Repository
//!
//! Ledger operations for operational expenses.
//!
//! Expenses carry a calendar date, not a timestamp, so range scoping is a
//! plain inclusive date comparison.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use meridian_core::types::{DateRange, ExpenseRecord};

/// Repository for expense ledger operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Gets all expenses for an owner within the range (inclusive).
    pub async fn expenses_in_range(
        &self,
        owner_id: &str,
        range: DateRange,
    ) -> DbResult<Vec<ExpenseRecord>> {
        debug!(owner_id = %owner_id, range = %range, "Reading expenses");

        let expenses: Vec<ExpenseRecord> = sqlx::query_as(
            r#"
            SELECT id, owner_id, occurred_on, amount_cents, category
            FROM expenses
            WHERE owner_id = ?1
              AND occurred_on >= ?2
              AND occurred_on <= ?3
            ORDER BY occurred_on, id
            "#,
        )
        .bind(owner_id)
        .bind(range.start())
        .bind(range.end())
        .fetch_all(&self.pool)
        .await?;

        debug!(count = expenses.len(), "Expenses read");
        Ok(expenses)
    }

    /// Inserts an expense record.
    ///
    /// Written by the back-office expense screens; the analytics engine
    /// never calls this.
    pub async fn insert_expense(&self, expense: &ExpenseRecord) -> DbResult<()> {
        debug!(id = %expense.id, owner_id = %expense.owner_id, "Inserting expense");

        sqlx::query(
            r#"
            INSERT INTO expenses (id, owner_id, occurred_on, amount_cents, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.owner_id)
        .bind(expense.occurred_on)
        .bind(expense.amount_cents)
        .bind(&expense.category)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
