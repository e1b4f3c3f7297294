// Raw wire-shaped records as the portal API returns them. Every field is
// optional because the backend omits fields inconsistently across
// endpoints; normalization supplies the documented defaults.
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// An identifier the backend sends either as a JSON string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(value) => value,
            RawId::Number(value) => value.to_string(),
        }
    }
}

/// A relational reference the backend sends either inline (a plain display
/// string) or as a nested object carrying id/name. Both shapes must be
/// tried before defaulting.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Inline(String),
    Nested {
        #[serde(default)]
        id: Option<RawId>,
        #[serde(default)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOrder {
    pub id: Option<RawId>,
    #[serde(alias = "customerName", alias = "customer_name")]
    pub customer: Option<CustomerRef>,
    #[serde(alias = "itemName", alias = "item_name")]
    pub item: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<String>,
    #[serde(alias = "createdAt", alias = "date")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCustomer {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub phone: Option<String>,
    #[serde(alias = "lastOrder", alias = "last_order_at")]
    pub last_order: Option<DateTime<Utc>>,
    #[serde(alias = "totalOrders")]
    pub total_orders: Option<i64>,
    #[serde(alias = "totalSpent")]
    pub total_spent: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawStats {
    #[serde(alias = "totalCustomers")]
    pub total_customers: Option<i64>,
    #[serde(alias = "monthlyRevenue")]
    pub monthly_revenue: Option<f64>,
    #[serde(alias = "todayOrders")]
    pub today_orders: Option<i64>,
    #[serde(alias = "totalAssistants")]
    pub total_assistants: Option<i64>,
    #[serde(alias = "responseRate")]
    pub response_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAssistantsCount {
    pub count: Option<i64>,
    #[serde(alias = "totalAssistants")]
    pub total: Option<i64>,
}

impl RawAssistantsCount {
    pub fn value(&self) -> i64 {
        self.count.or(self.total).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPerformance {
    #[serde(alias = "ordersCompleted")]
    pub orders_completed: Option<i64>,
    #[serde(alias = "ordersCancelled")]
    pub orders_cancelled: Option<i64>,
    #[serde(alias = "avgFulfillmentHours")]
    pub avg_fulfillment_hours: Option<f64>,
    #[serde(alias = "responseRate")]
    pub response_rate: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRevenue {
    #[serde(alias = "monthlyRevenue")]
    pub monthly_revenue: Option<f64>,
    #[serde(alias = "previousMonthRevenue")]
    pub previous_month_revenue: Option<f64>,
    #[serde(alias = "averageOrderValue")]
    pub average_order_value: Option<f64>,
}
