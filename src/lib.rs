//! fm-sync - discovers fleet-management pipelines and syncs them

pub mod cli;
pub mod core;
pub mod discovery;
pub mod sync;

// Re-export commonly used types
pub use crate::core::{ContentSource, Pipeline, PipelineSpec, SyncConfig};
pub use discovery::{find_pipelines, CancellationToken, Discovery, DiscoveryError, DiscoveryEvent};
pub use sync::{sync_pipelines, FleetClient, FleetPipeline, PendingFleetClient, SyncError, SyncSummary};
