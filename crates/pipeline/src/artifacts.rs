//! Artifact Cleanup
//!
//! Removes previously compiled native libraries so a configuration change
//! can never ship a stale binary into the packaged artifact.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::PipelineError;

/// The two fixed directories the native build writes compiled libraries
/// into. The packaging step picks them up from exactly these paths.
#[derive(Debug, Clone)]
pub struct ArtifactLocations {
    /// General library output directory
    pub lib_dir: PathBuf,
    /// Platform-specific JNI libraries bundled into the artifact
    pub jni_libs_dir: PathBuf,
}

impl ArtifactLocations {
    /// The well-known output locations under a library module
    pub fn for_module(module_dir: &Path) -> Self {
        Self {
            lib_dir: module_dir.join("libs"),
            jni_libs_dir: module_dir.join("src").join("main").join("jniLibs"),
        }
    }

    /// Both directories, general library dir first
    pub fn as_array(&self) -> [&Path; 2] {
        [&self.lib_dir, &self.jni_libs_dir]
    }

    /// Whether any compiled library is present under either directory
    pub fn has_outputs(&self) -> bool {
        self.as_array().iter().any(|dir| {
            WalkDir::new(dir)
                .into_iter()
                .filter_map(|e| e.ok())
                .any(|e| e.file_type().is_file())
        })
    }
}

/// Deletes stale native-library outputs before a build.
///
/// Runs to completion before any native build of the same invocation and
/// doubles as the target of the explicit `clean` command.
pub struct ArtifactCleaner {
    locations: ArtifactLocations,
}

impl ArtifactCleaner {
    /// Create a cleaner for the given output locations
    pub fn new(locations: ArtifactLocations) -> Self {
        Self { locations }
    }

    /// Remove both output directories, recursively, if they exist.
    ///
    /// Idempotent: directories that are already absent are not an error.
    pub async fn clean(&self) -> Result<(), PipelineError> {
        for dir in self.locations.as_array() {
            if !dir.exists() {
                debug!("Already clean: {:?}", dir);
                continue;
            }

            tokio::fs::remove_dir_all(dir)
                .await
                .map_err(|e| PipelineError::CleanFailed(format!("{}: {}", dir.display(), e)))?;

            info!("Removed {:?}", dir);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clean_removes_both_directories() {
        let dir = tempfile::tempdir().unwrap();
        let locations = ArtifactLocations::for_module(dir.path());

        std::fs::create_dir_all(&locations.lib_dir).unwrap();
        std::fs::write(locations.lib_dir.join("libnative.so"), b"elf").unwrap();
        std::fs::create_dir_all(locations.jni_libs_dir.join("arm64-v8a")).unwrap();
        std::fs::write(
            locations.jni_libs_dir.join("arm64-v8a").join("libnative.so"),
            b"elf",
        )
        .unwrap();

        ArtifactCleaner::new(locations.clone()).clean().await.unwrap();

        assert!(!locations.lib_dir.exists());
        assert!(!locations.jni_libs_dir.exists());
    }

    #[tokio::test]
    async fn clean_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let locations = ArtifactLocations::for_module(dir.path());
        let cleaner = ArtifactCleaner::new(locations.clone());

        cleaner.clean().await.unwrap();
        cleaner.clean().await.unwrap();

        assert!(!locations.lib_dir.exists());
        assert!(!locations.jni_libs_dir.exists());
    }

    #[tokio::test]
    async fn has_outputs_reflects_library_files() {
        let dir = tempfile::tempdir().unwrap();
        let locations = ArtifactLocations::for_module(dir.path());

        assert!(!locations.has_outputs());

        std::fs::create_dir_all(&locations.lib_dir).unwrap();
        assert!(!locations.has_outputs());

        std::fs::write(locations.lib_dir.join("libnative.so"), b"elf").unwrap();
        assert!(locations.has_outputs());
    }
}
