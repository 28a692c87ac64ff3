//! Packaging Handoff
//!
//! The packaging pipeline is an external collaborator: once compiled
//! libraries sit in the expected output directories, it bundles them into
//! the per-variant artifact. This module is the seam to it.

use std::path::PathBuf;

use tokio::process::Command;
use tracing::info;

use crate::{PipelineError, Variant};

/// Seam to the host packaging pipeline.
///
/// Implementations consume the compiled libraries as opaque binary inputs
/// from the fixed output locations.
pub trait Packager {
    /// Package the given variant's artifact
    fn package(
        &self,
        variant: Variant,
    ) -> impl std::future::Future<Output = Result<(), PipelineError>> + Send;
}

/// Invokes the host Gradle build to assemble the variant artifact
pub struct GradlePackager {
    project_dir: PathBuf,
}

impl GradlePackager {
    /// Create a packager rooted at the host project directory
    pub fn new(project_dir: PathBuf) -> Self {
        Self { project_dir }
    }

    fn gradlew_path(&self) -> PathBuf {
        let wrapper_name = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
        self.project_dir.join(wrapper_name)
    }
}

impl Packager for GradlePackager {
    async fn package(&self, variant: Variant) -> Result<(), PipelineError> {
        let task = variant.assemble_task();

        if !self.gradlew_path().exists() {
            return Err(PipelineError::PackageFailed(
                "Gradle wrapper not found".into(),
            ));
        }

        info!("Packaging {} via {}", variant.as_str(), task);

        let output = Command::new(self.gradlew_path())
            .current_dir(&self.project_dir)
            .arg(task)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::PackageFailed(format!(
                "{} failed: {}",
                task, stderr
            )));
        }

        info!("Packaged {}", variant.as_str());
        Ok(())
    }
}
