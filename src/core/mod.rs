//! Core domain models
//!
//! This module defines the canonical pipeline record produced by discovery
//! and the configuration that drives a sync run.

pub mod config;
pub mod pipeline;

pub use config::*;
pub use pipeline::*;
