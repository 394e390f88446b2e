//! # Revenue Engine
//!
//! Reporting periods, time-window resolution and revenue aggregation for the
//! dashboard. Pure functions: `now` is always an argument, never read from
//! the clock, so every window computation is deterministic.
//!
//! ## Pipeline
//! ```text
//! ?period=day|week|month|weekly-revenue
//!        │
//!        ▼
//! Period::parse ──► Period::window(now)     (one range)
//!                   Period::month_buckets() (four ranges, weekly-revenue)
//!        │
//!        ▼
//! db: sale events in range + current price per product name
//!        │
//!        ▼
//! summarize() ──► total + per-weekday totals
//! ```
//!
//! ## As-of-time pricing
//! Revenue is computed against the *current* price sheet, not the price at
//! the time of sale. There is no price history in the data model, so a price
//! change retroactively moves historical revenue. Deliberate; see DESIGN.md.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::SaleLine;

// =============================================================================
// Period
// =============================================================================

/// A reporting period accepted by the revenue endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    /// Midnight of the current day up to now.
    Day,
    /// Sunday 00:00 of the current week up to now (weekday 0 = Sunday).
    Week,
    /// The 1st of the current month up to now.
    Month,
    /// The current calendar month split into four fixed day ranges:
    /// [1-7], [8-14], [15-21], [22-end].
    WeeklyRevenue,
}

impl Period {
    /// Parses a period from its query-string spelling.
    ///
    /// Rejected values fail before any data is read.
    pub fn parse(value: &str) -> Result<Period, ValidationError> {
        match value {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "weekly-revenue" => Ok(Period::WeeklyRevenue),
            other => Err(ValidationError::InvalidPeriod {
                value: other.to_string(),
            }),
        }
    }

    /// The query-string spelling of this period.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::WeeklyRevenue => "weekly-revenue",
        }
    }

    /// Resolves the single `[start, end]` window for this period.
    ///
    /// For `WeeklyRevenue` this is the whole current month (the outer bounds
    /// of the four buckets); use [`Period::month_buckets`] for the per-bucket
    /// ranges.
    pub fn window(&self, now: DateTime<Utc>) -> Window {
        let today = now.date_naive();

        let start_date = match self {
            Period::Day => today,
            Period::Week => {
                let back = today.weekday().num_days_from_sunday() as u64;
                today - Days::new(back)
            }
            Period::Month | Period::WeeklyRevenue => first_of_month(today),
        };

        Window {
            start: start_of_day(start_date),
            end: now,
        }
    }

    /// The four fixed buckets of the current calendar month: days
    /// [1-7], [8-14], [15-21] and [22-end]. Always exactly four windows,
    /// regardless of month length.
    pub fn month_buckets(now: DateTime<Utc>) -> [Window; 4] {
        let today = now.date_naive();
        let first = first_of_month(today);
        let last = last_of_month(today);

        let day = |d: u32| -> NaiveDate {
            // d is within 1..=22, valid for every month.
            first + Days::new(u64::from(d - 1))
        };

        [
            Window {
                start: start_of_day(day(1)),
                end: end_of_day(day(7)),
            },
            Window {
                start: start_of_day(day(8)),
                end: end_of_day(day(14)),
            },
            Window {
                start: start_of_day(day(15)),
                end: end_of_day(day(21)),
            },
            Window {
                start: start_of_day(day(22)),
                end: end_of_day(last),
            },
        ]
    }
}

// =============================================================================
// Window
// =============================================================================

/// An inclusive `[start, end]` timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    // Closed upper bound: the last representable millisecond of the day.
    let end = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(end).and_utc()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(next_first) => next_first - Days::new(1),
        None => date,
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Aggregates computed over one window of sale events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueSummary {
    /// Sum of line revenues over the whole window.
    pub total: Money,

    /// Per-weekday sums, indexed by weekday-of-sale with 0 = Sunday.
    /// Sales without a date are counted in `total` but excluded here.
    pub daily: [Money; 7],
}

/// Computes line revenue for each sale event and folds into totals.
///
/// `prices` maps product names to their *current* selling price. A sale for a
/// name with no catalog match prices at zero, silently; that permissive
/// behavior is part of the contract (a missing product is a data-quality gap,
/// not a request error).
pub fn summarize(sales: &[SaleLine], prices: &HashMap<String, Money>) -> RevenueSummary {
    let mut total = Money::zero();
    let mut daily = [Money::zero(); 7];

    for sale in sales {
        let price = prices
            .get(&sale.product_name)
            .copied()
            .unwrap_or(Money::zero());
        let line = price * sale.quantity;

        total += line;

        if let Some(date) = sale.sale_date {
            let weekday = date.weekday().num_days_from_sunday() as usize;
            if let Some(slot) = daily.get_mut(weekday) {
                *slot += line;
            }
        }
    }

    RevenueSummary { total, daily }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn line(product: &str, quantity: i64, date: Option<DateTime<Utc>>) -> SaleLine {
        SaleLine {
            sale_id: 0,
            buyer_name: Some("Ana".to_string()),
            product_name: product.to_string(),
            quantity,
            sale_date: date,
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(Period::parse("day").unwrap(), Period::Day);
        assert_eq!(Period::parse("week").unwrap(), Period::Week);
        assert_eq!(Period::parse("month").unwrap(), Period::Month);
        assert_eq!(
            Period::parse("weekly-revenue").unwrap(),
            Period::WeeklyRevenue
        );
        assert!(matches!(
            Period::parse("year"),
            Err(ValidationError::InvalidPeriod { .. })
        ));
        // Spellings are case-sensitive.
        assert!(Period::parse("Day").is_err());
    }

    #[test]
    fn test_day_window() {
        // Wednesday, mid-afternoon.
        let now = at(2026, 8, 12, 15, 30);
        let w = Period::Day.window(now);
        assert_eq!(w.start, at(2026, 8, 12, 0, 0));
        assert_eq!(w.end, now);
    }

    #[test]
    fn test_week_window_starts_sunday() {
        // 2026-08-12 is a Wednesday; the week began Sunday 2026-08-09.
        let now = at(2026, 8, 12, 15, 30);
        let w = Period::Week.window(now);
        assert_eq!(w.start, at(2026, 8, 9, 0, 0));
        assert_eq!(w.end, now);

        // On a Sunday the window starts that same day.
        let sunday = at(2026, 8, 9, 10, 0);
        assert_eq!(Period::Week.window(sunday).start, at(2026, 8, 9, 0, 0));
    }

    #[test]
    fn test_month_window() {
        let now = at(2026, 8, 12, 15, 30);
        let w = Period::Month.window(now);
        assert_eq!(w.start, at(2026, 8, 1, 0, 0));
        assert_eq!(w.end, now);
    }

    #[test]
    fn test_month_buckets_august() {
        let now = at(2026, 8, 12, 15, 30);
        let buckets = Period::month_buckets(now);

        assert_eq!(buckets.len(), 4);
        assert_eq!(buckets[0].start, at(2026, 8, 1, 0, 0));
        assert_eq!(buckets[1].start, at(2026, 8, 8, 0, 0));
        assert_eq!(buckets[2].start, at(2026, 8, 15, 0, 0));
        assert_eq!(buckets[3].start, at(2026, 8, 22, 0, 0));
        // Last bucket runs to the end of the 31st.
        assert_eq!(buckets[3].end.date_naive().day(), 31);
    }

    #[test]
    fn test_month_buckets_february() {
        // 2026 is not a leap year.
        let now = at(2026, 2, 10, 9, 0);
        let buckets = Period::month_buckets(now);
        assert_eq!(buckets[3].start, at(2026, 2, 22, 0, 0));
        assert_eq!(buckets[3].end.date_naive().day(), 28);
    }

    #[test]
    fn test_month_buckets_december_rollover() {
        let now = at(2026, 12, 5, 9, 0);
        let buckets = Period::month_buckets(now);
        assert_eq!(buckets[3].end.date_naive().day(), 31);
    }

    #[test]
    fn test_summarize_basic() {
        // Catalog: Pen at 10 cents. One sale of quantity 3 today.
        let today = at(2026, 8, 12, 11, 0); // Wednesday → weekday index 3
        let sales = vec![line("Pen", 3, Some(today))];
        let prices = HashMap::from([("Pen".to_string(), Money::from_cents(10))]);

        let summary = summarize(&sales, &prices);
        assert_eq!(summary.total.cents(), 30);
        assert_eq!(summary.daily[3].cents(), 30);
        assert_eq!(summary.daily.iter().map(|m| m.cents()).sum::<i64>(), 30);
    }

    #[test]
    fn test_summarize_unknown_product_prices_at_zero() {
        let today = at(2026, 8, 12, 11, 0);
        let sales = vec![
            line("Pen", 3, Some(today)),
            line("Ghost Item", 100, Some(today)),
        ];
        let prices = HashMap::from([("Pen".to_string(), Money::from_cents(10))]);

        let summary = summarize(&sales, &prices);
        // The unmatched product contributes nothing, silently.
        assert_eq!(summary.total.cents(), 30);
    }

    #[test]
    fn test_summarize_null_date_excluded_from_daily() {
        let sales = vec![line("Pen", 2, None)];
        let prices = HashMap::from([("Pen".to_string(), Money::from_cents(10))]);

        let summary = summarize(&sales, &prices);
        assert_eq!(summary.total.cents(), 20);
        assert!(summary.daily.iter().all(|m| m.cents() == 0));
    }

    #[test]
    fn test_summarize_weekday_indexing() {
        // 2026-08-09 is a Sunday → index 0; 2026-08-15 is a Saturday → index 6.
        let sunday = at(2026, 8, 9, 10, 0);
        let saturday = at(2026, 8, 15, 10, 0);
        let sales = vec![line("Pen", 1, Some(sunday)), line("Pen", 2, Some(saturday))];
        let prices = HashMap::from([("Pen".to_string(), Money::from_cents(100))]);

        let summary = summarize(&sales, &prices);
        assert_eq!(summary.daily[0].cents(), 100);
        assert_eq!(summary.daily[6].cents(), 200);
        assert_eq!(summary.total.cents(), 300);
    }
}
