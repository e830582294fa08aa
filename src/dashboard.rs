//! Back-office dashboard rollups.
//!
//! Loads the full order set and buckets it in memory: lifetime totals,
//! calendar-window revenue (week starts Sunday, local midnight), source and
//! status breakdowns, and trailing 12-month / 7-day series. Revenue always
//! excludes cancelled orders; order counts include every status.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use serde::Serialize;

use crate::error::ApiResult;
use crate::models::{Order, OrderSource, OrderStatus};
use crate::AppState;

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Default, Serialize)]
pub struct SourceCounts {
    pub orders: i64,
    pub revenue: i64,
}

#[derive(Debug, Default, Serialize)]
pub struct SourceBreakdown {
    pub website: SourceCounts,
    pub facebook: SourceCounts,
    pub manual: SourceCounts,
}

#[derive(Debug, Default, Serialize)]
pub struct StatusBreakdown {
    pub pending: i64,
    pub delivered: i64,
    pub cancelled: i64,
}

/// One trailing-month data point (oldest first in the series).
#[derive(Debug, Serialize)]
pub struct MonthPoint {
    pub month: String,
    pub revenue: i64,
    pub orders: i64,
    pub website_revenue: i64,
    pub facebook_revenue: i64,
}

/// One trailing-day data point (oldest first in the series).
#[derive(Debug, Serialize)]
pub struct DayPoint {
    pub day: String,
    pub revenue: i64,
    pub orders: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_orders: i64,
    pub total_revenue: i64,
    pub weekly_revenue: i64,
    pub monthly_revenue: i64,
    pub yearly_revenue: i64,
    pub orders_by_source: SourceBreakdown,
    pub orders_by_status: StatusBreakdown,
    pub monthly_series: Vec<MonthPoint>,
    pub daily_series: Vec<DayPoint>,
}

// =============================================================================
// Aggregation (pure)
// =============================================================================

/// Walks `k` calendar months back from (year, month).
fn month_back(year: i32, month: u32, k: i32) -> (i32, u32) {
    let idx = year * 12 + month as i32 - 1 - k;
    (idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1)
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b").to_string())
        .unwrap_or_default()
}

/// Computes the full dashboard summary over the given orders. Dates are
/// bucketed in `now`'s timezone; the handler passes local time.
pub(crate) fn summarize<Tz: TimeZone>(orders: &[Order], now: DateTime<Tz>) -> DashboardSummary {
    let tz = now.timezone();
    let today = now.date_naive();
    let week_start = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    let month_start = today.with_day(1).unwrap_or(today);
    let year_start = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);

    let months: Vec<(i32, u32)> = (0..12)
        .rev()
        .map(|k| month_back(today.year(), today.month(), k))
        .collect();
    let mut monthly_series: Vec<MonthPoint> = months
        .iter()
        .map(|&(y, m)| MonthPoint {
            month: month_label(y, m),
            revenue: 0,
            orders: 0,
            website_revenue: 0,
            facebook_revenue: 0,
        })
        .collect();

    let days: Vec<NaiveDate> = (0..7).rev().map(|k| today - Duration::days(k)).collect();
    let mut daily_series: Vec<DayPoint> = days
        .iter()
        .map(|d| DayPoint {
            day: d.format("%a").to_string(),
            revenue: 0,
            orders: 0,
        })
        .collect();

    let mut summary = DashboardSummary {
        total_orders: 0,
        total_revenue: 0,
        weekly_revenue: 0,
        monthly_revenue: 0,
        yearly_revenue: 0,
        orders_by_source: SourceBreakdown::default(),
        orders_by_status: StatusBreakdown::default(),
        monthly_series: vec![],
        daily_series: vec![],
    };

    for order in orders {
        let date = order.created_at.with_timezone(&tz).date_naive();
        let cancelled = order.status == OrderStatus::Cancelled;
        // Legacy rows without a channel are website orders.
        let source = order.source.unwrap_or(OrderSource::Website);

        summary.total_orders += 1;
        if !cancelled {
            summary.total_revenue += order.total;
            if date >= week_start {
                summary.weekly_revenue += order.total;
            }
            if date >= month_start {
                summary.monthly_revenue += order.total;
            }
            if date >= year_start {
                summary.yearly_revenue += order.total;
            }
        }

        let counts = match source {
            OrderSource::Website => &mut summary.orders_by_source.website,
            OrderSource::Facebook => &mut summary.orders_by_source.facebook,
            OrderSource::Manual => &mut summary.orders_by_source.manual,
        };
        counts.orders += 1;
        if !cancelled {
            counts.revenue += order.total;
        }

        match order.status {
            OrderStatus::Pending => summary.orders_by_status.pending += 1,
            OrderStatus::Delivered => summary.orders_by_status.delivered += 1,
            OrderStatus::Cancelled => summary.orders_by_status.cancelled += 1,
            _ => {}
        }

        if let Some(i) = months
            .iter()
            .position(|&(y, m)| y == date.year() && m == date.month())
        {
            let point = &mut monthly_series[i];
            point.orders += 1;
            if !cancelled {
                point.revenue += order.total;
                match source {
                    OrderSource::Website => point.website_revenue += order.total,
                    OrderSource::Facebook => point.facebook_revenue += order.total,
                    OrderSource::Manual => {}
                }
            }
        }

        if let Some(i) = days.iter().position(|&d| d == date) {
            let point = &mut daily_series[i];
            point.orders += 1;
            if !cancelled {
                point.revenue += order.total;
            }
        }
    }

    summary.monthly_series = monthly_series;
    summary.daily_series = daily_series;
    summary
}

// =============================================================================
// Handler
// =============================================================================

/// GET /api/v1/dashboard/stats - pure read, no pagination: cost scales with
/// the total order count.
pub async fn dashboard_stats(State(state): State<AppState>) -> ApiResult<Json<DashboardSummary>> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(summarize(&orders, Local::now())))
}

// =============================================================================
// Tests
// =============================================================================
