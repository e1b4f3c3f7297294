// Domain layer - Portal value types and normalization
pub mod customer;
pub mod metric;
pub mod order;
pub mod raw;
pub mod snapshot;
