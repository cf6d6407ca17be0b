use serde::Serialize;
use utoipa::ToSchema;

/// `GET /health` 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub database: DatabaseCheck,
}

/// DB에 닿지 않으면 unhealthy
#[derive(Serialize, Debug, Clone, Copy, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// DB ping 결과
#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    pub reachable: bool,
    #[schema(example = 3)]
    pub latency_ms: u64,
    /// ping 실패 사유
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseCheck {
    pub fn reachable(latency_ms: u64) -> Self {
        Self {
            reachable: true,
            latency_ms,
            error: None,
        }
    }

    pub fn unreachable(latency_ms: u64, error: impl Into<String>) -> Self {
        Self {
            reachable: false,
            latency_ms,
            error: Some(error.into()),
        }
    }

    pub fn state(&self) -> HealthState {
        if self.reachable {
            HealthState::Healthy
        } else {
            HealthState::Unhealthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_omit_error_when_database_is_reachable() {
        // Arrange
        let check = DatabaseCheck::reachable(7);

        // Act
        let json = serde_json::to_value(&check).unwrap();

        // Assert
        assert_eq!(json, serde_json::json!({ "reachable": true, "latencyMs": 7 }));
        assert_eq!(check.state(), HealthState::Healthy);
    }

    #[test]
    fn should_be_unhealthy_with_reason_when_ping_fails() {
        let check = DatabaseCheck::unreachable(3000, "ping timed out");

        assert_eq!(check.state(), HealthState::Unhealthy);
        assert_eq!(check.error.as_deref(), Some("ping timed out"));
        assert_eq!(serde_json::to_value(HealthState::Unhealthy).unwrap(), "unhealthy");
    }
}
