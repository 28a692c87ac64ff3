//! NDK Locator
//!
//! Finds the Android NDK installed on the host and checks it against a
//! pinned revision before any native build is attempted.

use std::env;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use which::which;

/// Toolchain location errors
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    #[error("NDK not found")]
    NotFound,
    #[error("NDK version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: String, found: String },
    #[error("Invalid NDK: {0}")]
    Invalid(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved NDK toolchain
///
/// Read-only once resolved; one descriptor serves a whole build invocation.
#[derive(Debug, Clone, Serialize)]
pub struct NdkToolchain {
    /// NDK root directory
    pub path: PathBuf,
    /// Revision parsed from `source.properties`
    pub version: String,
    /// Minimum Android API level the native build targets
    pub api_level: u32,
}

/// NDK locator with a pinned revision requirement
pub struct NdkLocator {
    pinned_version: String,
    api_level: u32,
}

impl NdkLocator {
    /// Create a locator for the given pinned revision and API level
    pub fn new(pinned_version: impl Into<String>, api_level: u32) -> Self {
        Self {
            pinned_version: pinned_version.into(),
            api_level,
        }
    }

    /// Resolve the NDK from host environment state.
    ///
    /// Candidates are tried in order; the first directory carrying a
    /// `source.properties` wins. A version mismatch on that directory is
    /// fatal, not a reason to keep searching.
    pub async fn locate(&self) -> Result<NdkToolchain, ToolchainError> {
        for root in self.candidates() {
            if !root.join("source.properties").exists() {
                continue;
            }
            debug!("Found NDK candidate at {:?}", root);
            return self.resolve_root(&root).await;
        }

        Err(ToolchainError::NotFound)
    }

    /// Validate a specific NDK root against the pinned revision
    pub async fn resolve_root(&self, root: &Path) -> Result<NdkToolchain, ToolchainError> {
        if !root.join("source.properties").exists() {
            return Err(ToolchainError::NotFound);
        }

        let version = Self::read_version(root).await?;

        if version != self.pinned_version {
            return Err(ToolchainError::VersionMismatch {
                expected: self.pinned_version.clone(),
                found: version,
            });
        }

        info!("Using NDK {} at {:?}", version, root);

        Ok(NdkToolchain {
            path: root.to_path_buf(),
            version,
            api_level: self.api_level,
        })
    }

    /// Candidate NDK roots, most explicit first
    fn candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        for var in ["ANDROID_NDK_HOME", "NDK_HOME", "NDK_ROOT"] {
            if let Ok(root) = env::var(var) {
                candidates.push(PathBuf::from(root));
            }
        }

        // Side-by-side installs under the SDK, keyed by revision
        for var in ["ANDROID_HOME", "ANDROID_SDK_ROOT"] {
            if let Ok(sdk) = env::var(var) {
                candidates.push(PathBuf::from(sdk).join("ndk").join(&self.pinned_version));
            }
        }

        if let Some(home) = dirs::home_dir() {
            candidates.push(
                home.join("Android")
                    .join("Sdk")
                    .join("ndk")
                    .join(&self.pinned_version),
            );
            candidates.push(home.join("android-ndk"));
        }

        if cfg!(unix) {
            candidates.push(PathBuf::from("/opt/android-ndk"));
        }

        // ndk-build sits directly in the NDK root
        if let Ok(ndk_build) = which("ndk-build") {
            if let Some(root) = ndk_build.parent() {
                candidates.push(root.to_path_buf());
            }
        }

        candidates
    }

    /// Parse the revision from `source.properties`
    async fn read_version(root: &Path) -> Result<String, ToolchainError> {
        let source_props = root.join("source.properties");
        let content = tokio::fs::read_to_string(&source_props).await?;

        for line in content.lines() {
            if line.starts_with("Pkg.Revision") {
                if let Some(v) = line.split('=').nth(1) {
                    return Ok(v.trim().to_string());
                }
            }
        }

        Err(ToolchainError::Invalid(
            "Pkg.Revision not found in source.properties".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_ndk(dir: &Path, revision: &str) {
        std::fs::write(
            dir.join("source.properties"),
            format!("Pkg.Desc = Android NDK\nPkg.Revision = {}\n", revision),
        )
        .unwrap();
    }

    #[tokio::test]
    async fn resolves_matching_revision() {
        let dir = tempfile::tempdir().unwrap();
        fake_ndk(dir.path(), "27.3.13750724");

        let locator = NdkLocator::new("27.3.13750724", 21);
        let toolchain = locator.resolve_root(dir.path()).await.unwrap();

        assert_eq!(toolchain.version, "27.3.13750724");
        assert_eq!(toolchain.api_level, 21);
        assert_eq!(toolchain.path, dir.path());
    }

    #[tokio::test]
    async fn rejects_mismatched_revision() {
        let dir = tempfile::tempdir().unwrap();
        fake_ndk(dir.path(), "26.1.10909125");

        let locator = NdkLocator::new("27.3.13750724", 21);
        let err = locator.resolve_root(dir.path()).await.unwrap_err();

        match err {
            ToolchainError::VersionMismatch { expected, found } => {
                assert_eq!(expected, "27.3.13750724");
                assert_eq!(found, "26.1.10909125");
            }
            other => panic!("expected VersionMismatch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();

        let locator = NdkLocator::new("27.3.13750724", 21);
        let err = locator
            .resolve_root(&dir.path().join("no-such-ndk"))
            .await
            .unwrap_err();

        assert!(matches!(err, ToolchainError::NotFound));
    }

    #[tokio::test]
    async fn rejects_root_without_revision() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("source.properties"), "Pkg.Desc = junk\n").unwrap();

        let locator = NdkLocator::new("27.3.13750724", 21);
        let err = locator.resolve_root(dir.path()).await.unwrap_err();

        assert!(matches!(err, ToolchainError::Invalid(_)));
    }
}
