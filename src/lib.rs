//! jniforge - Native Build Orchestration for Android Packaging
//!
//! Compiles a C/C++ library once per build variant and hands the result to
//! the host Gradle packaging pipeline, purging stale outputs before every
//! rebuild so a configuration change can never ship an outdated binary.
//!
//! ## Architecture
//!
//! jniforge is organized into specialized crates:
//!
//! - `jniforge-toolchain`: NDK location and version pinning
//! - `jniforge-pipeline`: clean / native-build / package task graph

#![warn(clippy::all)]

pub mod commands;

// Re-export member crates for library usage
pub use jniforge_pipeline as pipeline;
pub use jniforge_toolchain as toolchain;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use jniforge_pipeline::{
        GradlePackager, Packager, PipelineConfig, Variant, VariantGraph, VariantState,
    };
    pub use jniforge_toolchain::{NdkLocator, NdkToolchain};
}
