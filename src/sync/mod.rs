//! Sync of discovered pipelines with the fleet-management API

pub mod client;

pub use client::{FleetClient, FleetPipeline, PendingFleetClient, SyncError};

use crate::core::{Pipeline, SyncConfig};
use tracing::{debug, info};

/// Outcome of a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    /// Number of pipelines synced, or that would have been in a dry run
    pub pipeline_count: usize,
    pub dry_run: bool,
}

/// Sync the discovered pipelines with the fleet-management API.
///
/// With `config.dry_run` set, every pipeline is logged in its API form and
/// the client is never called. Otherwise all pipelines go to the client in
/// a single request.
pub async fn sync_pipelines<C: FleetClient + ?Sized>(
    client: &C,
    config: &SyncConfig,
    pipelines: &[Pipeline],
) -> Result<SyncSummary, SyncError> {
    info!(
        username = %config.username,
        pipeline_count = pipelines.len(),
        dry_run = config.dry_run,
        "starting pipeline sync"
    );

    let payloads: Vec<FleetPipeline> = pipelines.iter().map(Pipeline::to_fleet_pipeline).collect();

    if !config.dry_run {
        client.upsert_pipelines(&payloads).await?;
        info!(pipeline_count = payloads.len(), "pipeline sync completed");
        return Ok(SyncSummary {
            pipeline_count: payloads.len(),
            dry_run: false,
        });
    }

    for payload in &payloads {
        let data = serde_json::to_string_pretty(payload).map_err(|source| SyncError::Serialize {
            name: payload.name.clone(),
            source,
        })?;

        info!(
            name = %payload.name,
            enabled = payload.enabled.unwrap_or_default(),
            "would sync pipeline"
        );
        debug!(payload = %data, "pipeline payload");
    }

    info!("pipeline sync completed (dry run)");
    Ok(SyncSummary {
        pipeline_count: payloads.len(),
        dry_run: true,
    })
}
