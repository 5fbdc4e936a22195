//! Chart Metrics Pipeline Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod chart;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pipeline;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig};
pub use error::MetricsError;
pub use pipeline::{run_pipeline, PipelineOutput};
