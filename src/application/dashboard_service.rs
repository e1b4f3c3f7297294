// Dashboard aggregator - fans out to the portal API, merges successes,
// and keeps per-metric failures local to their section
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::Serialize;
use tokio::sync::watch;

use crate::application::portal_repository::PortalRepository;
use crate::domain::customer::Customer;
use crate::domain::metric::{MetricKey, MetricStatus, MetricStatusEntry, RefreshOutcome};
use crate::domain::order::Order;
use crate::domain::raw::{RawPerformance, RawRevenue, RawStats};
use crate::domain::snapshot::DashboardSnapshot;

/// Result of refreshing a single metric.
#[derive(Debug, Clone, Serialize)]
pub struct MetricRefresh {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

enum MetricPayload {
    Stats(RawStats),
    Customers(Vec<Customer>),
    Orders(Vec<Order>),
    Assistants(i64),
    Performance(RawPerformance),
    Revenue(RawRevenue),
}

/// Per-metric bookkeeping. `started`/`applied` are generation counters
/// used to discard stale results when refreshes for the same key overlap
/// (the last one to complete wins).
#[derive(Default)]
struct MetricSlot {
    status: MetricStatus,
    started: u64,
    applied: u64,
}

struct AggregatorState {
    snapshot: DashboardSnapshot,
    metrics: [MetricSlot; MetricKey::ALL.len()],
    closed: bool,
}

pub struct DashboardAggregator {
    repository: Arc<dyn PortalRepository>,
    state: Mutex<AggregatorState>,
    publisher: watch::Sender<DashboardSnapshot>,
}

impl DashboardAggregator {
    pub fn new(repository: Arc<dyn PortalRepository>) -> Self {
        let snapshot = DashboardSnapshot::default();
        let (publisher, _) = watch::channel(snapshot.clone());
        Self {
            repository,
            state: Mutex::new(AggregatorState {
                snapshot,
                metrics: std::array::from_fn(|_| MetricSlot::default()),
                closed: false,
            }),
            publisher,
        }
    }

    /// Current immutable view. Never partially constructed: every record
    /// passed through normalization before it was stored.
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.lock().snapshot.clone()
    }

    /// Loading flag and error slot for one metric.
    pub fn metric_status(&self, key: MetricKey) -> MetricStatus {
        self.lock().metrics[key.index()].status.clone()
    }

    /// Full per-metric status report.
    pub fn metric_statuses(&self) -> Vec<MetricStatusEntry> {
        let state = self.lock();
        MetricKey::ALL
            .iter()
            .map(|&key| {
                let status = &state.metrics[key.index()].status;
                MetricStatusEntry {
                    metric: key,
                    loading: status.loading,
                    error: status.error.clone(),
                }
            })
            .collect()
    }

    /// Observe snapshot changes. Receivers get an immutable clone on
    /// every successful merge.
    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.publisher.subscribe()
    }

    /// Stop accepting merges. Results from requests still in flight are
    /// silently dropped; starting a new refresh afterwards is a caller
    /// bug and panics.
    pub fn close(&self) {
        self.lock().closed = true;
    }

    /// Refresh every metric concurrently with settle-all semantics: one
    /// failing source never discards the others. Always resolves.
    pub async fn fetch_all(&self) -> RefreshOutcome {
        let (stats, customers, orders, assistants, performance, revenue) = tokio::join!(
            self.run_metric(MetricKey::Stats),
            self.run_metric(MetricKey::Customers),
            self.run_metric(MetricKey::Orders),
            self.run_metric(MetricKey::Assistants),
            self.run_metric(MetricKey::Performance),
            self.run_metric(MetricKey::Revenue),
        );

        let results = [
            (MetricKey::Stats, stats),
            (MetricKey::Customers, customers),
            (MetricKey::Orders, orders),
            (MetricKey::Assistants, assistants),
            (MetricKey::Performance, performance),
            (MetricKey::Revenue, revenue),
        ];

        let mut errors = Vec::new();
        let mut succeeded = 0usize;
        for (key, refresh) in results {
            if refresh.success {
                succeeded += 1;
            } else {
                match refresh.error {
                    Some(error) => errors.push(format!("{key}: {error}")),
                    None => errors.push(format!("Failed to refresh {key} data")),
                }
            }
        }

        let total = MetricKey::ALL.len();
        RefreshOutcome {
            success: succeeded == total,
            partial_success: succeeded > 0 && succeeded < total,
            errors,
        }
    }

    /// Refresh exactly one metric. Only this key's loading flag toggles;
    /// other sections are untouched. Always resolves.
    pub async fn refresh_metric(&self, key: MetricKey) -> MetricRefresh {
        self.run_metric(key).await
    }

    async fn run_metric(&self, key: MetricKey) -> MetricRefresh {
        let generation = self.begin(key);
        let fetched = self.fetch_payload(key).await;
        self.complete(key, generation, fetched)
    }

    fn begin(&self, key: MetricKey) -> u64 {
        let mut state = self.lock();
        assert!(!state.closed, "dashboard aggregator used after close");
        let slot = &mut state.metrics[key.index()];
        slot.started += 1;
        slot.status.loading = true;
        slot.started
    }

    async fn fetch_payload(&self, key: MetricKey) -> anyhow::Result<MetricPayload> {
        match key {
            MetricKey::Stats => Ok(MetricPayload::Stats(self.repository.fetch_stats().await?)),
            MetricKey::Customers => {
                let raw = self.repository.fetch_customers().await?;
                Ok(MetricPayload::Customers(
                    raw.into_iter().map(Customer::from_raw).collect(),
                ))
            }
            MetricKey::Orders => {
                let raw = self.repository.fetch_orders().await?;
                Ok(MetricPayload::Orders(
                    raw.into_iter().map(Order::from_raw).collect(),
                ))
            }
            MetricKey::Assistants => Ok(MetricPayload::Assistants(
                self.repository.fetch_assistants_count().await?,
            )),
            MetricKey::Performance => Ok(MetricPayload::Performance(
                self.repository.fetch_performance_report().await?,
            )),
            MetricKey::Revenue => Ok(MetricPayload::Revenue(
                self.repository.fetch_revenue_report().await?,
            )),
        }
    }

    fn complete(
        &self,
        key: MetricKey,
        generation: u64,
        fetched: anyhow::Result<MetricPayload>,
    ) -> MetricRefresh {
        let mut state = self.lock();
        if state.closed {
            // The owning view is gone; drop the result on the floor.
            tracing::debug!("dropping {} result after close", key);
            return MetricRefresh {
                success: false,
                error: None,
            };
        }

        let slot = &mut state.metrics[key.index()];
        if generation == slot.started {
            slot.status.loading = false;
        }
        if generation <= slot.applied {
            // A newer refresh for this key already completed.
            tracing::debug!("discarding stale {} result", key);
            return MetricRefresh {
                success: false,
                error: None,
            };
        }
        slot.applied = generation;

        match fetched {
            Ok(payload) => {
                slot.status.error = None;
                match payload {
                    MetricPayload::Stats(raw) => state.snapshot.apply_stats(raw),
                    MetricPayload::Customers(customers) => {
                        state.snapshot.apply_customers(customers)
                    }
                    MetricPayload::Orders(orders) => state.snapshot.apply_orders(orders),
                    MetricPayload::Assistants(count) => state.snapshot.apply_assistants(count),
                    MetricPayload::Performance(raw) => state.snapshot.apply_performance(raw),
                    MetricPayload::Revenue(raw) => state.snapshot.apply_revenue(raw),
                }
                state.snapshot.last_updated = Utc::now();
                let published = state.snapshot.clone();
                drop(state);
                self.publisher.send_replace(published);
                MetricRefresh {
                    success: true,
                    error: None,
                }
            }
            Err(err) => {
                // Prior data stays in place; only the error slot changes.
                let message = {
                    let upstream = err.to_string();
                    if upstream.trim().is_empty() {
                        format!("Failed to refresh {key} data")
                    } else {
                        upstream
                    }
                };
                tracing::warn!("{} refresh failed: {}", key, message);
                slot.status.error = Some(message.clone());
                MetricRefresh {
                    success: false,
                    error: Some(message),
                }
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, AggregatorState> {
        self.state.lock().expect("aggregator state poisoned")
    }
}
