// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardAggregator;
use std::sync::Arc;

pub struct AppState {
    pub aggregator: Arc<DashboardAggregator>,
}
