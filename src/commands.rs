//! CLI commands for jniforge
//!
//! Each command is the host-facing surface of one pipeline operation.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use jniforge_pipeline::{
    ArtifactCleaner, ArtifactLocations, GradlePackager, PipelineConfig, Variant, VariantGraph,
};
use jniforge_toolchain::NdkLocator;

/// Build command options
#[derive(Debug)]
pub struct BuildCommand {
    /// Host project directory
    pub project_dir: PathBuf,
    /// Variant to build; `None` builds every declared variant sequentially
    pub variant: Option<Variant>,
}

impl BuildCommand {
    /// Parse build arguments
    pub fn from_args(project_dir: PathBuf, args: &[String]) -> Result<Self> {
        let variant = match args.first().map(String::as_str) {
            None => Some(Variant::Debug),
            Some("--all") => None,
            Some(name) => Some(
                Variant::from_str(name)
                    .ok_or_else(|| anyhow::anyhow!("unknown variant: {}", name))?,
            ),
        };

        Ok(Self {
            project_dir,
            variant,
        })
    }

    /// Execute the build command
    pub async fn execute(&self) -> Result<()> {
        let config = PipelineConfig::load(&self.project_dir).await?;
        let packager = GradlePackager::new(self.project_dir.clone());
        let mut graph = VariantGraph::register(config, packager);

        match self.variant {
            Some(variant) => {
                info!("Building variant: {}", variant.as_str());
                graph.build(variant).await?;
            }
            None => {
                info!("Building all declared variants");
                graph.build_all().await?;
            }
        }

        Ok(())
    }
}

/// Clean command: removes the native library output directories.
///
/// Independent of any variant build, and safe to repeat.
pub struct CleanCommand {
    /// Host project directory
    pub project_dir: PathBuf,
}

impl CleanCommand {
    /// Execute the clean command
    pub async fn execute(&self) -> Result<()> {
        let config = PipelineConfig::load(&self.project_dir).await?;
        let locations = ArtifactLocations::for_module(&config.module_dir);

        ArtifactCleaner::new(locations).clean().await?;
        Ok(())
    }
}

/// Toolchain command: resolve the NDK and print its descriptor
pub struct ToolchainCommand {
    /// Host project directory
    pub project_dir: PathBuf,
}

impl ToolchainCommand {
    /// Execute the toolchain command
    pub async fn execute(&self) -> Result<()> {
        let config = PipelineConfig::load(&self.project_dir).await?;
        let locator = NdkLocator::new(&config.ndk_version, config.min_api_level);

        let toolchain = match &config.ndk_dir {
            Some(dir) => locator.resolve_root(dir).await?,
            None => locator.locate().await?,
        };

        println!("{}", serde_json::to_string_pretty(&toolchain)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn build_defaults_to_debug() {
        let cmd = BuildCommand::from_args(PathBuf::from("."), &[]).unwrap();
        assert_eq!(cmd.variant, Some(Variant::Debug));
    }

    #[test]
    fn build_parses_variant_and_all() {
        let cmd = BuildCommand::from_args(PathBuf::from("."), &args(&["release"])).unwrap();
        assert_eq!(cmd.variant, Some(Variant::Release));

        let cmd = BuildCommand::from_args(PathBuf::from("."), &args(&["--all"])).unwrap();
        assert_eq!(cmd.variant, None);
    }

    #[test]
    fn build_rejects_unknown_variant() {
        let err = BuildCommand::from_args(PathBuf::from("."), &args(&["profile"])).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[tokio::test]
    async fn clean_command_removes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let locations = ArtifactLocations::for_module(dir.path());
        std::fs::create_dir_all(&locations.lib_dir).unwrap();
        std::fs::write(locations.lib_dir.join("libnative.so"), b"elf").unwrap();

        CleanCommand {
            project_dir: dir.path().to_path_buf(),
        }
        .execute()
        .await
        .unwrap();

        assert!(!locations.lib_dir.exists());
    }
}
