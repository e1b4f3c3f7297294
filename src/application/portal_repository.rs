// Repository trait for portal data access
use async_trait::async_trait;

use crate::domain::raw::{RawCustomer, RawOrder, RawPerformance, RawRevenue, RawStats};

#[async_trait]
pub trait PortalRepository: Send + Sync {
    /// Aggregate counters for the dashboard header.
    async fn fetch_stats(&self) -> anyhow::Result<RawStats>;

    /// Customer list. Upstream ordering is not guaranteed.
    async fn fetch_customers(&self) -> anyhow::Result<Vec<RawCustomer>>;

    /// Order list. Upstream ordering is not guaranteed.
    async fn fetch_orders(&self) -> anyhow::Result<Vec<RawOrder>>;

    /// Number of active assistant accounts.
    async fn fetch_assistants_count(&self) -> anyhow::Result<i64>;

    /// Fulfillment performance report.
    async fn fetch_performance_report(&self) -> anyhow::Result<RawPerformance>;

    /// Revenue report.
    async fn fetch_revenue_report(&self) -> anyhow::Result<RawRevenue>;
}
