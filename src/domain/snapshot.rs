// Dashboard snapshot - the materialized view handed to presentation
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Reverse;

use super::customer::Customer;
use super::order::Order;
use super::raw::{RawPerformance, RawRevenue, RawStats};

/// "Recent" lists keep only this many records.
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_customers: i64,
    pub monthly_revenue: f64,
    pub today_orders: i64,
    pub total_assistants: i64,
    pub response_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub orders_completed: i64,
    pub orders_cancelled: i64,
    pub avg_fulfillment_hours: f64,
    pub response_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RevenueReport {
    pub monthly_revenue: f64,
    pub previous_month_revenue: f64,
    pub average_order_value: f64,
}

/// Always fully defaulted: presentation never null-checks a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_orders: Vec<Order>,
    pub recent_customers: Vec<Customer>,
    pub performance: PerformanceReport,
    pub revenue: RevenueReport,
    pub last_updated: DateTime<Utc>,
}

impl Default for DashboardSnapshot {
    fn default() -> Self {
        Self {
            stats: DashboardStats::default(),
            recent_orders: Vec::new(),
            recent_customers: Vec::new(),
            performance: PerformanceReport::default(),
            revenue: RevenueReport::default(),
            last_updated: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl DashboardSnapshot {
    /// Replace the stats block, substituting zero for anything the
    /// endpoint omitted. The assistant count stays owned by the
    /// assistants metric unless the stats payload carries one.
    pub fn apply_stats(&mut self, raw: RawStats) {
        self.stats.total_customers = raw.total_customers.filter(|n| *n >= 0).unwrap_or(0);
        self.stats.monthly_revenue = raw
            .monthly_revenue
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);
        self.stats.today_orders = raw.today_orders.filter(|n| *n >= 0).unwrap_or(0);
        self.stats.response_rate = raw
            .response_rate
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);
        if let Some(assistants) = raw.total_assistants {
            self.stats.total_assistants = assistants.max(0);
        }
    }

    pub fn apply_assistants(&mut self, count: i64) {
        self.stats.total_assistants = count.max(0);
    }

    pub fn apply_orders(&mut self, orders: Vec<Order>) {
        self.recent_orders = take_recent(orders, |o| o.created_at);
    }

    /// The customers endpoint returns the full list; the headline
    /// customer count is derived from its length before truncation.
    pub fn apply_customers(&mut self, customers: Vec<Customer>) {
        self.stats.total_customers = customers.len() as i64;
        self.recent_customers = take_recent(customers, |c| c.last_order);
    }

    pub fn apply_performance(&mut self, raw: RawPerformance) {
        self.performance = PerformanceReport {
            orders_completed: raw.orders_completed.filter(|n| *n >= 0).unwrap_or(0),
            orders_cancelled: raw.orders_cancelled.filter(|n| *n >= 0).unwrap_or(0),
            avg_fulfillment_hours: raw
                .avg_fulfillment_hours
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(0.0),
            response_rate: raw
                .response_rate
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(0.0),
        };
    }

    pub fn apply_revenue(&mut self, raw: RawRevenue) {
        self.revenue = RevenueReport {
            monthly_revenue: raw
                .monthly_revenue
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(0.0),
            previous_month_revenue: raw
                .previous_month_revenue
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(0.0),
            average_order_value: raw
                .average_order_value
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(0.0),
        };
    }
}

/// Keep the `RECENT_LIMIT` newest records, newest first. Upstream
/// endpoints disagree on ordering: some return timestamp-descending
/// (taken as-is), others timestamp-ascending or insertion order (sorted
/// here first). Both shapes produce the same final list.
pub fn take_recent<T>(mut records: Vec<T>, timestamp: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let already_descending = records
        .windows(2)
        .all(|pair| timestamp(&pair[0]) >= timestamp(&pair[1]));
    if !already_descending {
        records.sort_by_key(|record| Reverse(timestamp(record)));
    }
    records.truncate(RECENT_LIMIT);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(n: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, n, 12, 0, 0).unwrap()
    }

    fn order_on(n: u32) -> Order {
        Order::from_raw(
            serde_json::from_str(&format!(
                r#"{{"id": "o-{n}", "createdAt": "2026-03-{n:02}T12:00:00Z"}}"#
            ))
            .unwrap(),
        )
    }

    #[test]
    fn test_take_recent_from_ascending_input() {
        let recents = take_recent((1..=8).map(order_on).collect(), |o| o.created_at);
        let ids: Vec<&str> = recents.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["o-8", "o-7", "o-6", "o-5", "o-4"]);
    }

    #[test]
    fn test_take_recent_from_descending_input_matches() {
        let ascending = take_recent((1..=8).map(order_on).collect(), |o| o.created_at);
        let descending = take_recent((1..=8).rev().map(order_on).collect(), |o| o.created_at);
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_take_recent_keeps_short_lists_intact() {
        let recents = take_recent(vec![order_on(2), order_on(1)], |o| o.created_at);
        assert_eq!(recents.len(), 2);
        assert_eq!(recents[0].created_at, day(2));
    }

    #[test]
    fn test_apply_stats_zeroes_omitted_counters() {
        let mut snapshot = DashboardSnapshot::default();
        snapshot.apply_stats(serde_json::from_str(r#"{"totalCustomers": 12}"#).unwrap());
        assert_eq!(snapshot.stats.total_customers, 12);
        assert_eq!(snapshot.stats.monthly_revenue, 0.0);
        assert_eq!(snapshot.stats.today_orders, 0);
    }

    #[test]
    fn test_apply_stats_preserves_assistant_count() {
        let mut snapshot = DashboardSnapshot::default();
        snapshot.apply_assistants(4);
        snapshot.apply_stats(serde_json::from_str(r#"{"totalCustomers": 12}"#).unwrap());
        assert_eq!(snapshot.stats.total_assistants, 4);
    }

    #[test]
    fn test_apply_customers_derives_headline_count() {
        let customers: Vec<Customer> = (1..=7)
            .map(|n| {
                Customer::from_raw(
                    serde_json::from_str(&format!(
                        r#"{{"id": {n}, "lastOrder": "2026-03-{n:02}T08:00:00Z"}}"#
                    ))
                    .unwrap(),
                )
            })
            .collect();

        let mut snapshot = DashboardSnapshot::default();
        snapshot.apply_customers(customers);
        assert_eq!(snapshot.stats.total_customers, 7);
        assert_eq!(snapshot.recent_customers.len(), RECENT_LIMIT);
        assert_eq!(snapshot.recent_customers[0].id, "7");
    }
}
