//! Native Build Pipeline
//!
//! Orders the steps that turn C/C++ sources into per-variant library
//! artifacts: purge stale outputs, run the native build script, then hand
//! the compiled libraries to the host packaging pipeline.

pub mod artifacts;
pub mod config;
pub mod graph;
pub mod native;
pub mod packager;
pub mod variant;

pub use artifacts::{ArtifactCleaner, ArtifactLocations};
pub use config::PipelineConfig;
pub use graph::{TaskKind, VariantGraph, VariantState, TASK_CHAIN};
pub use native::{NativeBuildInvoker, NativeBuildRequest};
pub use packager::{GradlePackager, Packager};
pub use variant::Variant;

use jniforge_toolchain::ToolchainError;

/// Pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Native build failed (exit code {code:?}):\n{output}")]
    NativeBuildFailed { code: Option<i32>, output: String },
    #[error("Artifact clean failed: {0}")]
    CleanFailed(String),
    #[error("Packaging failed: {0}")]
    PackageFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Toolchain error: {0}")]
    Toolchain(#[from] ToolchainError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
