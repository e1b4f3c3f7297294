// Metric identity and refresh bookkeeping
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One independently refreshable dashboard section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Stats,
    Customers,
    Orders,
    Assistants,
    Performance,
    Revenue,
}

impl MetricKey {
    pub const ALL: [MetricKey; 6] = [
        MetricKey::Stats,
        MetricKey::Customers,
        MetricKey::Orders,
        MetricKey::Assistants,
        MetricKey::Performance,
        MetricKey::Revenue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKey::Stats => "stats",
            MetricKey::Customers => "customers",
            MetricKey::Orders => "orders",
            MetricKey::Assistants => "assistants",
            MetricKey::Performance => "performance",
            MetricKey::Revenue => "revenue",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised for metric names arriving from outside the process (route
/// parameters). Inside the process unknown keys are unrepresentable.
#[derive(Debug, thiserror::Error)]
#[error("unknown metric key: {0}")]
pub struct UnknownMetric(pub String);

impl FromStr for MetricKey {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stats" => Ok(MetricKey::Stats),
            "customers" => Ok(MetricKey::Customers),
            "orders" => Ok(MetricKey::Orders),
            "assistants" => Ok(MetricKey::Assistants),
            "performance" => Ok(MetricKey::Performance),
            "revenue" => Ok(MetricKey::Revenue),
            other => Err(UnknownMetric(other.to_string())),
        }
    }
}

/// Loading flag and error slot for one metric. Metrics degrade
/// independently; there is no global loading flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// One row of the per-metric status report.
#[derive(Debug, Clone, Serialize)]
pub struct MetricStatusEntry {
    pub metric: MetricKey,
    pub loading: bool,
    pub error: Option<String>,
}

/// Result of one batch fetch-and-merge cycle. `partial_success` is true
/// when at least one but not all requested metrics succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshOutcome {
    pub success: bool,
    pub partial_success: bool,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_key_round_trip() {
        for key in MetricKey::ALL {
            assert_eq!(key.as_str().parse::<MetricKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_metric_key_is_rejected() {
        let err = "sessions".parse::<MetricKey>().unwrap_err();
        assert_eq!(err.to_string(), "unknown metric key: sessions");
    }

    #[test]
    fn test_metric_key_parse_is_case_insensitive() {
        assert_eq!(" Orders ".parse::<MetricKey>().unwrap(), MetricKey::Orders);
    }
}
