//! # Trend & Alert Engine
//!
//! Compares the current month against its recent history, benchmarks the
//! margin, and raises alerts and advisory patterns.
//!
//! ## Signal Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Trend & Alert Engine                                    │
//! │                                                                         │
//! │  6-month rollup ──┬──► metrics    margin, MoM growth, trend label      │
//! │                   ├──► benchmark  avg margin of revenue months ±2pp    │
//! │                   ├──► alerts     overspending / profit drop / margin  │
//! │                   └──► patterns   consistent-growth, rising-costs      │
//! │                                                                         │
//! │  Alert rules fire INDEPENDENTLY — several may fire at once.            │
//! │  Patterns are advisory only: they describe, they never warn.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::rollup::MonthlyAggregate;

// =============================================================================
// Thresholds
// =============================================================================

/// Month-over-month revenue growth (percent) above which the trend is
/// labeled positive; the negation labels it negative.
pub const GROWTH_TREND_PCT: f64 = 5.0;

/// Margin (percent) below which the low-margin warning fires.
pub const LOW_MARGIN_PCT: f64 = 10.0;

/// Relative profit drop (percent) beyond which the profit-drop warning
/// fires.
pub const PROFIT_DROP_PCT: f64 = 15.0;

/// Tolerance band (percentage points) around the benchmark margin.
pub const BENCHMARK_BAND_PP: f64 = 2.0;

/// Minimum positive month-over-month revenue deltas (out of the window's
/// five) for the consistent-growth pattern.
pub const CONSISTENT_GROWTH_MIN_DELTAS: usize = 4;

/// Consecutive months of strictly increasing direct cost for the
/// rising-costs pattern.
pub const RISING_COSTS_MONTHS: usize = 3;

// =============================================================================
// Output Types
// =============================================================================

/// Direction of the current revenue trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Positive,
    Negative,
    Neutral,
}

/// Position of the current margin relative to the benchmark band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BenchmarkStatus {
    Above,
    Below,
    OnAverage,
}

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
}

/// A decision-support alert. Derived on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub description: String,
    pub suggested_action: String,
}

impl Alert {
    fn new(
        severity: AlertSeverity,
        title: &str,
        description: String,
        suggested_action: &str,
    ) -> Self {
        Alert {
            id: Uuid::new_v4().to_string(),
            severity,
            title: title.to_string(),
            description,
            suggested_action: suggested_action.to_string(),
        }
    }
}

/// Advisory multi-month patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendPattern {
    /// Revenue rose in at least four of the window's five month-over-month
    /// steps.
    ConsistentGrowth,
    /// Direct cost rose strictly for the last three consecutive months.
    RisingCosts,
}

/// Current-month metrics against the trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendMetrics {
    /// Current-month profit margin, percent (0 when revenue is 0).
    pub margin: f64,
    /// Month-over-month revenue growth, percent (0 when prior revenue is 0).
    pub growth: f64,
    pub trend: TrendLabel,
    /// Average margin across window months with revenue > 0.
    pub benchmark_margin: f64,
    pub benchmark_status: BenchmarkStatus,
}

/// The full trend analysis payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub metrics: TrendMetrics,
    pub alerts: Vec<Alert>,
    pub patterns: Vec<TrendPattern>,
}

// =============================================================================
// Analysis
// =============================================================================

/// Analyzes a trailing rollup window (oldest → newest; the last entry is
/// the current month).
///
/// An empty window — no months at all — yields neutral zero metrics with
/// no alerts and no patterns, so a brand-new owner sees an explicit empty
/// state rather than an error.
pub fn analyze(window: &[MonthlyAggregate]) -> TrendAnalysis {
    let Some(current) = window.last() else {
        return TrendAnalysis {
            metrics: TrendMetrics {
                margin: 0.0,
                growth: 0.0,
                trend: TrendLabel::Neutral,
                benchmark_margin: 0.0,
                benchmark_status: BenchmarkStatus::OnAverage,
            },
            alerts: Vec::new(),
            patterns: Vec::new(),
        };
    };
    let prior = window.len().checked_sub(2).map(|i| &window[i]);

    let margin = current.profit.percent_of(current.revenue);
    let growth = prior.map_or(0.0, |p| growth_pct(p.revenue, current.revenue));

    let trend = if growth > GROWTH_TREND_PCT {
        TrendLabel::Positive
    } else if growth < -GROWTH_TREND_PCT {
        TrendLabel::Negative
    } else {
        TrendLabel::Neutral
    };

    let benchmark_margin = benchmark(window);
    let benchmark_status = if margin - benchmark_margin > BENCHMARK_BAND_PP {
        BenchmarkStatus::Above
    } else if benchmark_margin - margin > BENCHMARK_BAND_PP {
        BenchmarkStatus::Below
    } else {
        BenchmarkStatus::OnAverage
    };

    TrendAnalysis {
        metrics: TrendMetrics {
            margin,
            growth,
            trend,
            benchmark_margin,
            benchmark_status,
        },
        alerts: raise_alerts(current, prior, margin),
        patterns: detect_patterns(window),
    }
}

/// MoM growth in percent, 0-guarded on zero prior revenue.
fn growth_pct(prior: Money, current: Money) -> f64 {
    (current - prior).percent_of(prior)
}

/// Average margin across window months that actually had revenue.
fn benchmark(window: &[MonthlyAggregate]) -> f64 {
    let margins: Vec<f64> = window
        .iter()
        .filter(|m| m.revenue.is_positive())
        .map(|m| m.profit.percent_of(m.revenue))
        .collect();
    if margins.is_empty() {
        return 0.0;
    }
    margins.iter().sum::<f64>() / margins.len() as f64
}

/// Evaluates every alert rule independently; several may fire.
fn raise_alerts(
    current: &MonthlyAggregate,
    prior: Option<&MonthlyAggregate>,
    margin: f64,
) -> Vec<Alert> {
    let mut alerts = Vec::new();

    // CRITICAL: the month costs more than it brings in
    let outgoing = current.direct_cost + current.expenses;
    if current.revenue.is_positive() && outgoing > current.revenue {
        alerts.push(Alert::new(
            AlertSeverity::Critical,
            "Overspending",
            format!(
                "Costs and expenses of {} exceed revenue of {} for {}.",
                outgoing, current.revenue, current.month
            ),
            "Review the month's largest expense categories and supplier costs.",
        ));
    }

    // WARNING: profit fell more than the threshold vs. the prior month
    if let Some(prior) = prior {
        if prior.profit.is_positive() {
            let drop = (prior.profit - current.profit).percent_of(prior.profit);
            if drop > PROFIT_DROP_PCT {
                alerts.push(Alert::new(
                    AlertSeverity::Warning,
                    "Profit drop",
                    format!(
                        "Profit fell {:.1}% from {} ({}) to {} ({}).",
                        drop, prior.month, prior.profit, current.month, current.profit
                    ),
                    "Compare revenue and cost lines against the prior month.",
                ));
            }
        }
    }

    // WARNING: profitable, but thin
    if margin > 0.0 && margin < LOW_MARGIN_PCT {
        alerts.push(Alert::new(
            AlertSeverity::Warning,
            "Low margin",
            format!(
                "Margin of {:.1}% for {} is below the {:.0}% floor.",
                margin, current.month, LOW_MARGIN_PCT
            ),
            "Reprice low-margin products or renegotiate their costs.",
        ));
    }

    alerts
}

/// Advisory pattern detection over the whole window.
fn detect_patterns(window: &[MonthlyAggregate]) -> Vec<TrendPattern> {
    let mut patterns = Vec::new();

    if window.len() >= 2 {
        let positive_deltas = window
            .windows(2)
            .filter(|pair| pair[1].revenue > pair[0].revenue)
            .count();
        if positive_deltas >= CONSISTENT_GROWTH_MIN_DELTAS {
            patterns.push(TrendPattern::ConsistentGrowth);
        }
    }

    if window.len() >= RISING_COSTS_MONTHS {
        let tail = &window[window.len() - RISING_COSTS_MONTHS..];
        let strictly_rising = tail
            .windows(2)
            .all(|pair| pair[1].direct_cost > pair[0].direct_cost);
        if strictly_rising {
            patterns.push(TrendPattern::RisingCosts);
        }
    }

    patterns
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Month;

    /// Builds a window from (revenue, direct_cost, expenses) triples,
    /// oldest first, ending at 2026-08.
    fn window(data: &[(i64, i64, i64)]) -> Vec<MonthlyAggregate> {
        let months = Month::new(2026, 8).unwrap().trailing(data.len() as u32);
        months
            .into_iter()
            .zip(data)
            .map(|(month, &(revenue, cost, expenses))| MonthlyAggregate {
                month,
                revenue: Money::from_cents(revenue),
                direct_cost: Money::from_cents(cost),
                expenses: Money::from_cents(expenses),
                profit: Money::from_cents(revenue - cost - expenses),
            })
            .collect()
    }

    #[test]
    fn test_growth_and_trend_labels() {
        // Prior 10_000 → current 11_000: +10% growth, positive trend
        let analysis = analyze(&window(&[(10_000, 0, 0), (11_000, 0, 0)]));
        assert!((analysis.metrics.growth - 10.0).abs() < 1e-9);
        assert_eq!(analysis.metrics.trend, TrendLabel::Positive);

        // -10% growth: negative
        let analysis = analyze(&window(&[(10_000, 0, 0), (9_000, 0, 0)]));
        assert_eq!(analysis.metrics.trend, TrendLabel::Negative);

        // +3% growth: inside the ±5 band, neutral
        let analysis = analyze(&window(&[(10_000, 0, 0), (10_300, 0, 0)]));
        assert_eq!(analysis.metrics.trend, TrendLabel::Neutral);
    }

    /// priorMonth.revenue=0, currentMonth.revenue=5000 → growth=0
    /// (guarded), trend=neutral.
    #[test]
    fn test_zero_prior_revenue_guards_growth() {
        let analysis = analyze(&window(&[(0, 0, 0), (500_000, 0, 0)]));
        assert_eq!(analysis.metrics.growth, 0.0);
        assert_eq!(analysis.metrics.trend, TrendLabel::Neutral);
    }

    /// revenue=1000, directCost=600, expenses=500 (sum 1100 > revenue) →
    /// CRITICAL overspending fires.
    #[test]
    fn test_overspending_alert() {
        let analysis = analyze(&window(&[(100_000, 60_000, 50_000)]));

        let critical: Vec<&Alert> = analysis
            .alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical)
            .collect();
        assert_eq!(critical.len(), 1);
        assert_eq!(critical[0].title, "Overspending");
    }

    #[test]
    fn test_overspending_requires_revenue() {
        // Expenses with zero revenue: an empty shop, not an overspend
        let analysis = analyze(&window(&[(0, 0, 50_000)]));
        assert!(analysis
            .alerts
            .iter()
            .all(|a| a.severity != AlertSeverity::Critical));
    }

    #[test]
    fn test_profit_drop_alert() {
        // Prior profit 10_000 → current 8_000: 20% drop fires
        let analysis = analyze(&window(&[(20_000, 5_000, 5_000), (18_000, 5_000, 5_000)]));
        assert!(analysis.alerts.iter().any(|a| a.title == "Profit drop"));

        // A 10% drop stays silent
        let analysis = analyze(&window(&[(20_000, 5_000, 5_000), (19_000, 5_000, 5_000)]));
        assert!(analysis.alerts.iter().all(|a| a.title != "Profit drop"));

        // Prior month at a loss: drop rule needs positive prior profit
        let analysis = analyze(&window(&[(5_000, 5_000, 5_000), (4_000, 5_000, 5_000)]));
        assert!(analysis.alerts.iter().all(|a| a.title != "Profit drop"));
    }

    #[test]
    fn test_low_margin_alert() {
        // 5% margin: 0 < margin < 10 fires
        let analysis = analyze(&window(&[(100_000, 50_000, 45_000)]));
        assert!(analysis.alerts.iter().any(|a| a.title == "Low margin"));

        // Negative margin is a loss, not a low margin
        let analysis = analyze(&window(&[(100_000, 70_000, 45_000)]));
        assert!(analysis.alerts.iter().all(|a| a.title != "Low margin"));

        // Healthy 40% margin stays silent
        let analysis = analyze(&window(&[(100_000, 40_000, 20_000)]));
        assert!(analysis.alerts.is_empty());
    }

    #[test]
    fn test_multiple_alerts_fire_together() {
        // Overspending AND a profit drop in the same month
        let analysis = analyze(&window(&[(50_000, 20_000, 10_000), (40_000, 25_000, 20_000)]));
        assert!(analysis.alerts.iter().any(|a| a.title == "Overspending"));
        assert!(analysis.alerts.iter().any(|a| a.title == "Profit drop"));
    }

    #[test]
    fn test_benchmark_band() {
        // Five months at 20% margin, current at 30%: above the band
        let analysis = analyze(&window(&[
            (10_000, 8_000, 0),
            (10_000, 8_000, 0),
            (10_000, 8_000, 0),
            (10_000, 8_000, 0),
            (10_000, 8_000, 0),
            (10_000, 7_000, 0),
        ]));
        assert_eq!(
            analysis.metrics.benchmark_status,
            BenchmarkStatus::Above
        );

        // All months equal: on average
        let analysis = analyze(&window(&[
            (10_000, 8_000, 0),
            (10_000, 8_000, 0),
            (10_000, 8_000, 0),
        ]));
        assert_eq!(
            analysis.metrics.benchmark_status,
            BenchmarkStatus::OnAverage
        );
    }

    #[test]
    fn test_benchmark_skips_zero_revenue_months() {
        // Two dead months must not drag the benchmark to zero
        let analysis = analyze(&window(&[
            (0, 0, 0),
            (0, 0, 1_000),
            (10_000, 8_000, 0), // 20%
            (10_000, 6_000, 0), // 40%
        ]));
        assert!((analysis.metrics.benchmark_margin - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_consistent_growth_pattern() {
        // Five rising deltas out of five
        let analysis = analyze(&window(&[
            (10_000, 0, 0),
            (11_000, 0, 0),
            (12_000, 0, 0),
            (13_000, 0, 0),
            (14_000, 0, 0),
            (15_000, 0, 0),
        ]));
        assert!(analysis
            .patterns
            .contains(&TrendPattern::ConsistentGrowth));

        // One dip: four of five still qualifies
        let analysis = analyze(&window(&[
            (10_000, 0, 0),
            (11_000, 0, 0),
            (10_500, 0, 0),
            (13_000, 0, 0),
            (14_000, 0, 0),
            (15_000, 0, 0),
        ]));
        assert!(analysis
            .patterns
            .contains(&TrendPattern::ConsistentGrowth));

        // Two dips: does not qualify
        let analysis = analyze(&window(&[
            (10_000, 0, 0),
            (9_000, 0, 0),
            (10_500, 0, 0),
            (10_000, 0, 0),
            (14_000, 0, 0),
            (15_000, 0, 0),
        ]));
        assert!(!analysis
            .patterns
            .contains(&TrendPattern::ConsistentGrowth));
    }

    #[test]
    fn test_rising_costs_pattern() {
        let analysis = analyze(&window(&[
            (50_000, 10_000, 0),
            (50_000, 9_000, 0),
            (50_000, 11_000, 0),
            (50_000, 12_000, 0),
            (50_000, 13_000, 0),
        ]));
        assert!(analysis.patterns.contains(&TrendPattern::RisingCosts));

        // Plateau breaks the strict increase
        let analysis = analyze(&window(&[
            (50_000, 11_000, 0),
            (50_000, 12_000, 0),
            (50_000, 12_000, 0),
        ]));
        assert!(!analysis.patterns.contains(&TrendPattern::RisingCosts));
    }

    #[test]
    fn test_empty_window_is_explicit_empty_state() {
        let analysis = analyze(&[]);
        assert_eq!(analysis.metrics.margin, 0.0);
        assert_eq!(analysis.metrics.trend, TrendLabel::Neutral);
        assert!(analysis.alerts.is_empty());
        assert!(analysis.patterns.is_empty());
    }
}
