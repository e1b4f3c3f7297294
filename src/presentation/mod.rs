// Presentation layer - HTTP surface over the aggregator
pub mod app_state;
pub mod handlers;
