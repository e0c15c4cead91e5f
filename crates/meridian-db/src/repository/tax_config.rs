//! # Tax Config Repository
//!
//! Per-owner tax/fee schedules applied to DRE revenue.
//!
//! An owner without a configured schedule simply has no taxes/fees line;
//! the engine treats `None` as zero.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use meridian_core::money::Money;
use meridian_core::types::{TaxConfig, TaxRate};

/// Raw row shape for the owner_tax_config table.
#[derive(Debug, sqlx::FromRow)]
struct TaxConfigRow {
    mode: String,
    rate_bps: Option<i64>,
    flat_cents: Option<i64>,
}

impl TaxConfigRow {
    fn into_config(self) -> DbResult<TaxConfig> {
        match self.mode.as_str() {
            "rate" => {
                let bps = self
                    .rate_bps
                    .ok_or_else(|| DbError::corrupt("owner_tax_config", "rate mode without rate_bps"))?;
                Ok(TaxConfig::Rate(TaxRate::from_bps(bps as u32)))
            }
            "flat" => {
                let cents = self
                    .flat_cents
                    .ok_or_else(|| DbError::corrupt("owner_tax_config", "flat mode without flat_cents"))?;
                Ok(TaxConfig::Flat(Money::from_cents(cents)))
            }
            other => Err(DbError::corrupt(
                "owner_tax_config",
                format!("unknown mode '{other}'"),
            )),
        }
    }
}

/// Repository for per-owner tax configuration.
#[derive(Debug, Clone)]
pub struct TaxConfigRepository {
    pool: SqlitePool,
}

impl TaxConfigRepository {
    /// Creates a new TaxConfigRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TaxConfigRepository { pool }
    }

    /// Gets the tax config for an owner. `None` means no taxes/fees.
    pub async fn config_for_owner(&self, owner_id: &str) -> DbResult<Option<TaxConfig>> {
        let row: Option<TaxConfigRow> = sqlx::query_as(
            r#"
            SELECT mode, rate_bps, flat_cents
            FROM owner_tax_config
            WHERE owner_id = ?1
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaxConfigRow::into_config).transpose()
    }

    /// Sets (or replaces) the tax config for an owner.
    pub async fn set_config(&self, owner_id: &str, config: &TaxConfig) -> DbResult<()> {
        debug!(owner_id = %owner_id, "Setting tax config");

        let (mode, rate_bps, flat_cents): (&str, Option<i64>, Option<i64>) = match config {
            TaxConfig::Rate(rate) => ("rate", Some(rate.bps() as i64), None),
            TaxConfig::Flat(amount) => ("flat", None, Some(amount.cents())),
        };

        sqlx::query(
            r#"
            INSERT INTO owner_tax_config (owner_id, mode, rate_bps, flat_cents)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (owner_id) DO UPDATE SET
                mode       = excluded.mode,
                rate_bps   = excluded.rate_bps,
                flat_cents = excluded.flat_cents
            "#,
        )
        .bind(owner_id)
        .bind(mode)
        .bind(rate_bps)
        .bind(flat_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
