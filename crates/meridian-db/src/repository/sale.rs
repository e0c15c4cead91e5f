//! # Sale Repository
//!
//! Ledger operations for sales and their line items.
//!
//! ## Range Scoping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Range Query Semantics                                  │
//! │                                                                         │
//! │  Requested range: [2026-03-01 .. 2026-03-31]  (inclusive local dates)  │
//! │                                                                         │
//! │  SQL predicate:   occurred_at >= 2026-03-01T00:00:00Z                  │
//! │             AND   occurred_at <  2026-04-01T00:00:00Z                  │
//! │                                                                         │
//! │  A sale rung up 2026-03-31 23:59:59 is inside the range.               │
//! │                                                                         │
//! │  Line items attribute by their PARENT SALE's occurred_at, so revenue   │
//! │  and direct cost always share one temporal key.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use meridian_core::types::{DateRange, SaleLineItem, SaleRecord};

/// Repository for sale ledger operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets all sales for an owner within the range.
    ///
    /// ## Arguments
    /// * `owner_id` - Owning business; unknown owners yield empty results
    /// * `range` - Inclusive local-date interval
    /// * `include_canceled` - When false (the analytics default), canceled
    ///   sales are filtered out at the query
    pub async fn sales_in_range(
        &self,
        owner_id: &str,
        range: DateRange,
        include_canceled: bool,
    ) -> DbResult<Vec<SaleRecord>> {
        debug!(owner_id = %owner_id, range = %range, include_canceled, "Reading sales");

        let sales: Vec<SaleRecord> = sqlx::query_as(
            r#"
            SELECT id, owner_id, occurred_at, gross_total_cents, payment_method, canceled
            FROM sales
            WHERE owner_id = ?1
              AND occurred_at >= ?2
              AND occurred_at < ?3
              AND (?4 OR canceled = 0)
            ORDER BY occurred_at, id
            "#,
        )
        .bind(owner_id)
        .bind(range.start_datetime())
        .bind(range.end_datetime_exclusive())
        .bind(include_canceled)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = sales.len(), "Sales read");
        Ok(sales)
    }

    /// Gets line items whose parent sale falls within the range.
    ///
    /// ## Temporal Key
    /// Attribution is by the PARENT SALE's `occurred_at`, never by any
    /// line-item timestamp. Canceled parents are excluded, so their costs
    /// can never leak into an aggregate.
    pub async fn line_items_in_range(
        &self,
        owner_id: &str,
        range: DateRange,
    ) -> DbResult<Vec<SaleLineItem>> {
        debug!(owner_id = %owner_id, range = %range, "Reading sale line items");

        let items: Vec<SaleLineItem> = sqlx::query_as(
            r#"
            SELECT
                li.id,
                li.sale_id,
                li.product_id,
                li.name_snapshot,
                li.quantity,
                li.unit_price_cents,
                li.unit_cost_cents,
                li.line_total_cents
            FROM sale_line_items li
            INNER JOIN sales s ON s.id = li.sale_id
            WHERE s.owner_id = ?1
              AND s.occurred_at >= ?2
              AND s.occurred_at < ?3
              AND s.canceled = 0
            ORDER BY s.occurred_at, li.id
            "#,
        )
        .bind(owner_id)
        .bind(range.start_datetime())
        .bind(range.end_datetime_exclusive())
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Line items read");
        Ok(items)
    }

    /// Inserts a sale record.
    ///
    /// Written by the front-of-house POS at checkout; the analytics engine
    /// never calls this.
    pub async fn insert_sale(&self, sale: &SaleRecord) -> DbResult<()> {
        debug!(id = %sale.id, owner_id = %sale.owner_id, "Inserting sale");

        sqlx::query(
            r#"
            INSERT INTO sales (
                id, owner_id, occurred_at, gross_total_cents, payment_method, canceled
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.owner_id)
        .bind(sale.occurred_at)
        .bind(sale.gross_total_cents)
        .bind(sale.payment_method)
        .bind(sale.canceled)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts a sale line item.
    ///
    /// ## Snapshot Pattern
    /// Product details (name, unit price, unit cost) are frozen on the
    /// line item. Later product edits never rewrite sale history.
    pub async fn insert_line_item(&self, item: &SaleLineItem) -> DbResult<()> {
        debug!(sale_id = %item.sale_id, product_id = %item.product_id, "Inserting line item");

        sqlx::query(
            r#"
            INSERT INTO sale_line_items (
                id, sale_id, product_id, name_snapshot,
                quantity, unit_price_cents, unit_cost_cents, line_total_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.sale_id)
        .bind(&item.product_id)
        .bind(&item.name_snapshot)
        .bind(item.quantity)
        .bind(item.unit_price_cents)
        .bind(item.unit_cost_cents)
        .bind(item.line_total_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Marks a sale as canceled (soft cancellation, record retained).
    ///
    /// From that moment the sale and its line items vanish from every
    /// aggregate.
    pub async fn cancel_sale(&self, sale_id: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE sales SET canceled = 1 WHERE id = ?1")
            .bind(sale_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sale", sale_id));
        }

        Ok(())
    }
}
