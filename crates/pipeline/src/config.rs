//! Pipeline Configuration
//!
//! Settings the host build system threads into the native build: the
//! library module location, the pinned NDK revision, the minimum API
//! level, and the variants to register chains for.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{PipelineError, Variant};

/// NDK revision the native build is pinned to.
///
/// This must match the revision the downstream native dependencies were
/// built with, or conflicting copies of libc++_shared.so end up in the
/// packaged artifact.
pub const PINNED_NDK_VERSION: &str = "27.3.13750724";

/// Minimum Android API level the compiled libraries target
pub const DEFAULT_MIN_API_LEVEL: u32 = 21;

/// Default native build entry point, relative to the module directory
pub const DEFAULT_BUILD_SCRIPT: &str = "build_cpp.sh";

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Library module directory holding native sources and the build script
    pub module_dir: PathBuf,

    /// Pinned NDK revision
    pub ndk_version: String,

    /// Explicit NDK root, bypassing host lookup
    pub ndk_dir: Option<PathBuf>,

    /// Minimum target API level
    pub min_api_level: u32,

    /// Native build entry point, relative to the module directory
    pub build_script: String,

    /// Variants registered with the packaging pipeline
    pub variants: Vec<Variant>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            module_dir: PathBuf::from("."),
            ndk_version: PINNED_NDK_VERSION.to_string(),
            ndk_dir: None,
            min_api_level: DEFAULT_MIN_API_LEVEL,
            build_script: DEFAULT_BUILD_SCRIPT.to_string(),
            variants: Variant::all().to_vec(),
        }
    }
}

impl PipelineConfig {
    /// Configuration file name, looked up in the project directory
    pub const FILE_NAME: &'static str = "jniforge.toml";

    /// Load configuration from `jniforge.toml`, or fall back to defaults.
    ///
    /// A relative `module_dir` is resolved against the project directory.
    pub async fn load(project_dir: &Path) -> Result<Self, PipelineError> {
        let path = project_dir.join(Self::FILE_NAME);

        let mut config = if path.exists() {
            info!("Loading configuration from {:?}", path);
            let content = tokio::fs::read_to_string(&path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        if config.module_dir.is_relative() {
            config.module_dir = project_dir.join(&config.module_dir);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no chain can be registered for
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.variants.is_empty() {
            return Err(PipelineError::Config("no variants declared".into()));
        }
        if self.ndk_version.trim().is_empty() {
            return Err(PipelineError::Config("ndk_version must not be empty".into()));
        }
        Ok(())
    }
}
