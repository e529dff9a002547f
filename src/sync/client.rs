//! Fleet-management API client interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Error types for sync operations
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("sync with the fleet-management API is not implemented yet")]
    NotImplemented,

    #[error("failed to marshal pipeline {name}: {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request rejected or failed in a real API client implementation
    #[error("API error: {0}")]
    Api(String),
}

/// Pipeline in the shape the fleet-management API accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetPipeline {
    pub name: String,
    pub contents: String,
    pub matchers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Trait for submitting pipelines - allows for different implementations
#[async_trait]
pub trait FleetClient: Send + Sync {
    /// Create or update all given pipelines in one request
    async fn upsert_pipelines(&self, pipelines: &[FleetPipeline]) -> Result<(), SyncError>;
}

/// Client used until the real API integration lands; every call fails
#[derive(Debug, Clone, Default)]
pub struct PendingFleetClient;

#[async_trait]
impl FleetClient for PendingFleetClient {
    async fn upsert_pipelines(&self, pipelines: &[FleetPipeline]) -> Result<(), SyncError> {
        error!(pipeline_count = pipelines.len(), "actual sync not yet implemented");
        Err(SyncError::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pending_client_fails() {
        let client = PendingFleetClient;
        let result = client.upsert_pipelines(&[]).await;
        assert!(matches!(result, Err(SyncError::NotImplemented)));
    }

    #[test]
    fn test_api_error_message() {
        let err = SyncError::Api("409 conflict".to_string());
        assert_eq!(err.to_string(), "API error: 409 conflict");
    }

    #[test]
    fn test_fleet_pipeline_json_shape() {
        let pipeline = FleetPipeline {
            name: "p".to_string(),
            contents: "logging { }".to_string(),
            matchers: vec!["env=prod".to_string()],
            enabled: Some(true),
        };
        let value = serde_json::to_value(&pipeline).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "p",
                "contents": "logging { }",
                "matchers": ["env=prod"],
                "enabled": true
            })
        );
    }
}
