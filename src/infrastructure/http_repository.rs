// Portal REST API repository implementation
use crate::application::portal_repository::PortalRepository;
use crate::domain::raw::{
    RawAssistantsCount, RawCustomer, RawOrder, RawPerformance, RawRevenue, RawStats,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// The backend is inconsistent about wrapping bodies in a `data`
/// envelope, so both shapes are accepted for every endpoint. `Wrapped`
/// must stay first: untagged variants are tried in order, and an
/// envelope would otherwise parse as a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data } => data,
            Payload::Bare(value) => value,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("portal API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone)]
pub struct HttpPortalRepository {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpPortalRepository {
    pub fn new(base_url: String, token: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build portal HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to portal API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body }.into());
        }

        let payload = response
            .json::<Payload<T>>()
            .await
            .context("Failed to parse portal API response")?;

        Ok(payload.into_inner())
    }
}

#[async_trait]
impl PortalRepository for HttpPortalRepository {
    async fn fetch_stats(&self) -> Result<RawStats> {
        self.get_json("/api/dashboard/stats").await
    }

    async fn fetch_customers(&self) -> Result<Vec<RawCustomer>> {
        self.get_json("/api/customers/recent").await
    }

    async fn fetch_orders(&self) -> Result<Vec<RawOrder>> {
        self.get_json("/api/orders/recent").await
    }

    async fn fetch_assistants_count(&self) -> Result<i64> {
        let counts: RawAssistantsCount = self.get_json("/api/assistants/count").await?;
        Ok(counts.value())
    }

    async fn fetch_performance_report(&self) -> Result<RawPerformance> {
        self.get_json("/api/reports/performance").await
    }

    async fn fetch_revenue_report(&self) -> Result<RawRevenue> {
        self.get_json("/api/reports/revenue").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_unwraps_envelope() {
        let wrapped: Payload<Vec<RawCustomer>> =
            serde_json::from_str(r#"{"data": [{"id": 1}, {"id": 2}]}"#).unwrap();
        assert_eq!(wrapped.into_inner().len(), 2);
    }

    #[test]
    fn test_payload_accepts_bare_body() {
        let bare: Payload<Vec<RawCustomer>> =
            serde_json::from_str(r#"[{"id": 1}, {"id": 2}, {"id": 3}]"#).unwrap();
        assert_eq!(bare.into_inner().len(), 3);
    }

    #[test]
    fn test_payload_prefers_envelope_for_objects() {
        // A stats body ignores unknown keys, so without the variant
        // ordering the envelope itself would parse as empty stats.
        let payload: Payload<RawStats> =
            serde_json::from_str(r#"{"data": {"totalCustomers": 12}}"#).unwrap();
        assert_eq!(payload.into_inner().total_customers, Some(12));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let repo = HttpPortalRepository::new(
            "http://localhost:3000/".to_string(),
            "dev".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(repo.base_url, "http://localhost:3000");
    }
}
