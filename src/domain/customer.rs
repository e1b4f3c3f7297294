// Normalized customer record
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::raw::{RawCustomer, RawId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub last_order: DateTime<Utc>,
    pub total_orders: i64,
    pub total_spent: f64,
}

impl Customer {
    pub fn from_raw(raw: RawCustomer) -> Self {
        Self {
            id: raw.id.map(RawId::into_string).unwrap_or_default(),
            name: raw
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| String::from("Unknown customer")),
            phone: raw.phone.unwrap_or_default(),
            last_order: raw.last_order.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
            total_orders: raw.total_orders.filter(|n| *n >= 0).unwrap_or(0),
            total_spent: raw
                .total_spent
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_get_documented_defaults() {
        let customer = Customer::from_raw(serde_json::from_str(r#"{"id": 9}"#).unwrap());
        assert_eq!(customer.id, "9");
        assert_eq!(customer.name, "Unknown customer");
        assert_eq!(customer.phone, "");
        assert_eq!(customer.last_order, DateTime::<Utc>::UNIX_EPOCH);
        assert_eq!(customer.total_orders, 0);
        assert_eq!(customer.total_spent, 0.0);
    }

    #[test]
    fn test_blank_name_defaults() {
        let customer =
            Customer::from_raw(serde_json::from_str(r#"{"name": "  ", "totalOrders": -2}"#).unwrap());
        assert_eq!(customer.name, "Unknown customer");
        assert_eq!(customer.total_orders, 0);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw: RawCustomer = serde_json::from_str(
            r#"{"id": "c-3", "name": "Sade Okafor", "phone": "+23480", "lastOrder": "2026-03-01T08:00:00Z", "totalOrders": 4, "totalSpent": 120.5}"#,
        )
        .unwrap();
        let first = Customer::from_raw(raw);

        let round_tripped: RawCustomer =
            serde_json::from_str(&serde_json::to_string(&first).unwrap()).unwrap();
        assert_eq!(Customer::from_raw(round_tripped), first);
    }
}
