//! # Domain Types
//!
//! Ledger record types and calendar keys used throughout the analytics
//! engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Ledger Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleRecord    │   │  SaleLineItem   │   │  ExpenseRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  occurred_at    │   │  sale_id (FK)   │   │  occurred_on    │       │
//! │  │  gross_total    │   │  unit_cost ❄    │   │  amount_cents   │       │
//! │  │  canceled       │   │  line_total     │   │  category       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    DateRange    │   │     Month       │   │   TaxConfig     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  start ≤ end    │   │  typed period   │   │  Rate (bps) or  │       │
//! │  │  inclusive      │   │  key, "2026-08" │   │  Flat (cents)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ❄ = snapshot, frozen at sale time                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line item freezes `unit_price_cents`, `unit_cost_cents`, and
//! `name_snapshot` at sale time. Later product edits never rewrite history:
//! last month's margins stay last month's margins.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// Tax Rate & Tax Config
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 650 bps = 6.5% (a typical simples-regime fee band)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Per-owner tax/fee configuration applied to revenue in the DRE.
///
/// Owners without a configured schedule simply have no taxes/fees line:
/// the engine treats an absent config as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum TaxConfig {
    /// Percentage of revenue, in basis points.
    Rate(TaxRate),
    /// Flat amount per period, in cents.
    Flat(Money),
}

impl TaxConfig {
    /// Computes the taxes/fees owed on the given revenue.
    pub fn taxes_on(&self, revenue: Money) -> Money {
        match self {
            TaxConfig::Rate(rate) => revenue.apply_bps(rate.bps()),
            TaxConfig::Flat(amount) => *amount,
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment (credit or debit).
    Card,
    /// Instant bank transfer (Pix).
    Pix,
    /// Regular bank transfer.
    Transfer,
}

// =============================================================================
// Sale Record
// =============================================================================

/// A finalized sale as the analytics engine sees it.
///
/// Canceled sales are kept in the ledger for audit but NEVER contribute to
/// any aggregate; the access layer excludes them unless explicitly asked.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    pub owner_id: String,
    /// When the sale happened. All temporal attribution (months, days)
    /// derives from this timestamp.
    pub occurred_at: DateTime<Utc>,
    /// Gross sale total in cents.
    pub gross_total_cents: i64,
    pub payment_method: PaymentMethod,
    /// Canceled flag (soft cancellation, record retained).
    pub canceled: bool,
}

impl SaleRecord {
    /// Returns the gross total as Money.
    #[inline]
    pub fn gross_total(&self) -> Money {
        Money::from_cents(self.gross_total_cents)
    }

    /// Calendar date the sale occurred on.
    #[inline]
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }
}

// =============================================================================
// Sale Line Item
// =============================================================================

/// A line item in a sale.
/// Uses snapshot pattern to freeze product data at time of sale.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLineItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub name_snapshot: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// Unit cost in cents at time of sale (frozen). Immutable once
    /// captured, even if the product's cost later changes.
    pub unit_cost_cents: i64,
    /// Line total (unit_price × quantity), stored to keep reads cheap.
    pub line_total_cents: i64,
}

impl SaleLineItem {
    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }

    /// Direct cost of this line: quantity × frozen unit cost.
    #[inline]
    pub fn direct_cost(&self) -> Money {
        Money::from_cents(self.unit_cost_cents).multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Expense Record
// =============================================================================

/// An operational expense.
///
/// Expenses carry a calendar date (not a timestamp): rent is "August",
/// not "August 1st, 09:32 UTC".
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: String,
    pub owner_id: String,
    /// Calendar date the expense belongs to.
    pub occurred_on: NaiveDate,
    /// Amount in cents.
    pub amount_cents: i64,
    /// Free-form category ("rent", "payroll", "supplies", ...).
    pub category: String,
}

impl ExpenseRecord {
    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Date Range
// =============================================================================

/// An inclusive local-date interval `[start 00:00:00, end 23:59:59]`.
///
/// Construction validates `start <= end`, so every function receiving a
/// `DateRange` can assume it is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a validated date range.
    ///
    /// ## Errors
    /// Returns [`ValidationError::RangeInverted`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> ValidationResult<Self> {
        if start > end {
            return Err(ValidationError::RangeInverted { start, end });
        }
        Ok(DateRange { start, end })
    }

    /// A range covering a single day.
    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            start: day,
            end: day,
        }
    }

    /// First day of the range (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range (inclusive).
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive datetime lower bound: start at 00:00:00 UTC.
    pub fn start_datetime(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Exclusive datetime upper bound: the midnight AFTER `end`.
    ///
    /// Queries use `occurred_at >= start_datetime() AND occurred_at <
    /// end_datetime_exclusive()` so 23:59:59.999 sales are never dropped.
    pub fn end_datetime_exclusive(&self) -> DateTime<Utc> {
        self.end
            .checked_add_days(Days::new(1))
            .unwrap_or(self.end)
            .and_time(NaiveTime::MIN)
            .and_utc()
    }

    /// Whether the given day falls inside the range.
    #[inline]
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Iterates every calendar day of the range, in order, no day skipped.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// =============================================================================
// Month
// =============================================================================

/// A typed calendar-month key.
///
/// ## Why not a string?
/// Aggregation buckets keyed by formatted strings fail silently on a
/// mismatched format. A typed key makes month arithmetic (trailing windows,
/// predecessors) explicit and keeps ordering correct for free.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Month {
    year: i32,
    /// 1-12.
    month: u32,
}

impl Month {
    /// Creates a month key. Returns `None` when `month` is not 1-12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Month { year, month })
        } else {
            None
        }
    }

    /// The month containing the given date.
    pub fn of(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // month is validated to 1-12 at construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("validated month")
    }

    /// Last calendar day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.succ().first_day().pred_opt().expect("valid date")
    }

    /// The previous calendar month.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Month {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Month {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The next calendar month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Month {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Month {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The full-month date range.
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.first_day(),
            end: self.last_day(),
        }
    }

    /// The trailing window of `count` months ENDING at this month,
    /// ordered oldest → newest.
    ///
    /// ## Example
    /// ```rust
    /// use meridian_core::types::Month;
    ///
    /// let aug = Month::new(2026, 8).unwrap();
    /// let window = aug.trailing(3);
    /// assert_eq!(window, vec![
    ///     Month::new(2026, 6).unwrap(),
    ///     Month::new(2026, 7).unwrap(),
    ///     Month::new(2026, 8).unwrap(),
    /// ]);
    /// ```
    pub fn trailing(&self, count: u32) -> Vec<Month> {
        let mut months = Vec::with_capacity(count as usize);
        let mut cursor = *self;
        for _ in 0..count {
            months.push(cursor);
            cursor = cursor.pred();
        }
        months.reverse();
        months
    }

    /// Parses a `YYYY-MM` label back into a month key.
    pub fn parse_label(label: &str) -> ValidationResult<Self> {
        let invalid = || ValidationError::InvalidFormat {
            field: "month".to_string(),
            reason: format!("expected YYYY-MM, got '{label}'"),
        };

        let (year, month) = label.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}

/// Formats as the canonical `YYYY-MM` label.
impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
