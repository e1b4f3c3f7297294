// Normalized order record
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::raw::{CustomerRef, RawId, RawOrder};

/// Closed status set. Unknown upstream strings map to `Pending`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("confirmed") => OrderStatus::Confirmed,
            Some("in_progress") => OrderStatus::InProgress,
            Some("completed") => OrderStatus::Completed,
            Some("cancelled") => OrderStatus::Cancelled,
            _ => OrderStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub item: String,
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Normalize a raw wire record. Every field gets a total default so
    /// the snapshot never carries absent values.
    pub fn from_raw(raw: RawOrder) -> Self {
        let customer_name = match raw.customer {
            Some(CustomerRef::Inline(name)) => name,
            Some(CustomerRef::Nested {
                name: Some(name), ..
            }) => name,
            Some(CustomerRef::Nested { id: Some(id), .. }) => id.into_string(),
            _ => String::from("Unknown customer"),
        };

        Self {
            id: raw.id.map(RawId::into_string).unwrap_or_default(),
            customer_name,
            item: raw.item.unwrap_or_default(),
            amount: raw
                .amount
                .filter(|a| a.is_finite() && *a >= 0.0)
                .unwrap_or(0.0),
            status: OrderStatus::parse(raw.status.as_deref()),
            created_at: raw.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(json: &str) -> RawOrder {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_fields_get_documented_defaults() {
        let order = Order::from_raw(raw(r#"{"id": "o-1"}"#));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.amount, 0.0);
        assert_eq!(order.item, "");
        assert_eq!(order.customer_name, "Unknown customer");
        assert_eq!(order.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_unknown_status_maps_to_pending() {
        let order = Order::from_raw(raw(r#"{"status": "shipped"}"#));
        assert_eq!(order.status, OrderStatus::Pending);

        let order = Order::from_raw(raw(r#"{"status": " Completed "}"#));
        assert_eq!(order.status, OrderStatus::Completed);
    }

    #[test]
    fn test_negative_amount_defaults_to_zero() {
        let order = Order::from_raw(raw(r#"{"amount": -4.5}"#));
        assert_eq!(order.amount, 0.0);
    }

    #[test]
    fn test_customer_reference_shapes() {
        let inline = Order::from_raw(raw(r#"{"customer": "Ada Bello"}"#));
        assert_eq!(inline.customer_name, "Ada Bello");

        let nested = Order::from_raw(raw(r#"{"customer": {"id": 4, "name": "Ada Bello"}}"#));
        assert_eq!(nested.customer_name, "Ada Bello");

        let id_only = Order::from_raw(raw(r#"{"customer": {"id": "c-4"}}"#));
        assert_eq!(id_only.customer_name, "c-4");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let created = Utc.with_ymd_and_hms(2026, 3, 9, 10, 30, 0).unwrap();
        let first = Order::from_raw(RawOrder {
            id: Some(RawId::Number(7)),
            customer: Some(CustomerRef::Inline("Ada Bello".to_string())),
            item: Some("Gift basket".to_string()),
            amount: Some(45.0),
            status: Some("confirmed".to_string()),
            created_at: Some(created),
        });

        // Re-reading a normalized record through the raw layer is a no-op.
        let round_tripped: RawOrder =
            serde_json::from_str(&serde_json::to_string(&first).unwrap()).unwrap();
        assert_eq!(Order::from_raw(round_tripped), first);
    }
}
