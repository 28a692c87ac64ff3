//! Variant Task Graph
//!
//! Encodes the clean -> native build -> package ordering as a static,
//! inspectable table instead of name-pattern hooks, so the host scheduler
//! can never run packaging against stale or missing libraries.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use jniforge_toolchain::{NdkLocator, NdkToolchain, ToolchainError};

use crate::{
    artifacts::{ArtifactCleaner, ArtifactLocations},
    config::PipelineConfig,
    native::{NativeBuildInvoker, NativeBuildRequest},
    packager::Packager,
    variant::Variant,
    PipelineError,
};

/// Tasks in one variant's chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Clean,
    NativeBuild,
    Package,
}

impl TaskKind {
    /// The task that must complete before this one starts
    pub fn depends_on(&self) -> Option<TaskKind> {
        match self {
            TaskKind::Clean => None,
            TaskKind::NativeBuild => Some(TaskKind::Clean),
            TaskKind::Package => Some(TaskKind::NativeBuild),
        }
    }
}

/// Fixed execution order for every variant's chain
pub const TASK_CHAIN: [TaskKind; 3] = [TaskKind::Clean, TaskKind::NativeBuild, TaskKind::Package];

/// Per-variant build progress.
///
/// Strictly linear; a state is never skipped and never branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VariantState {
    #[default]
    Unbuilt,
    Cleaned,
    NativeCompiled,
    Packaged,
}

/// One clean/build/package chain per declared variant.
///
/// Variants share the output directories, so chains must not run
/// concurrently against the same module; serializing them is the host
/// scheduler's responsibility.
pub struct VariantGraph<P: Packager> {
    config: PipelineConfig,
    locator: NdkLocator,
    locations: ArtifactLocations,
    cleaner: ArtifactCleaner,
    invoker: NativeBuildInvoker,
    packager: P,
    states: HashMap<Variant, VariantState>,
}

impl<P: Packager> VariantGraph<P> {
    /// Register exactly one task chain per declared variant
    pub fn register(config: PipelineConfig, packager: P) -> Self {
        let locations = ArtifactLocations::for_module(&config.module_dir);
        let locator = NdkLocator::new(&config.ndk_version, config.min_api_level);
        let invoker = NativeBuildInvoker::new(config.module_dir.clone(), &config.build_script);
        let states = config
            .variants
            .iter()
            .map(|v| (*v, VariantState::Unbuilt))
            .collect();

        debug!("Registered chains for {:?}", config.variants);

        Self {
            config,
            locator,
            locations: locations.clone(),
            cleaner: ArtifactCleaner::new(locations),
            invoker,
            packager,
            states,
        }
    }

    /// Current state of a variant's chain
    pub fn state(&self, variant: Variant) -> VariantState {
        self.states
            .get(&variant)
            .copied()
            .unwrap_or(VariantState::Unbuilt)
    }

    fn set_state(&mut self, variant: Variant, state: VariantState) {
        debug!("{}: {:?}", variant.as_str(), state);
        self.states.insert(variant, state);
    }

    /// Resolve the toolchain for this invocation.
    ///
    /// Happens before any task runs: a version mismatch must abort the
    /// chain before a single subprocess is spawned or a file deleted.
    async fn resolve_toolchain(&self) -> Result<NdkToolchain, ToolchainError> {
        match &self.config.ndk_dir {
            Some(dir) => self.locator.resolve_root(dir).await,
            None => self.locator.locate().await,
        }
    }

    /// Run the full chain for one variant.
    ///
    /// Every build re-cleans and recompiles from scratch; there is no
    /// cross-variant caching, so another variant's leftovers can never be
    /// packaged. Any failure aborts the chain with no partial packaging.
    pub async fn build(&mut self, variant: Variant) -> Result<(), PipelineError> {
        if !self.states.contains_key(&variant) {
            return Err(PipelineError::Config(format!(
                "variant {} is not registered",
                variant.as_str()
            )));
        }

        let toolchain = self.resolve_toolchain().await?;

        self.set_state(variant, VariantState::Unbuilt);

        self.cleaner.clean().await?;
        self.set_state(variant, VariantState::Cleaned);

        let request = NativeBuildRequest::new(&toolchain, variant);
        self.invoker.invoke(&request).await?;
        self.set_state(variant, VariantState::NativeCompiled);

        if !self.locations.has_outputs() {
            warn!("Native build exited cleanly but produced no libraries");
        }

        self.packager.package(variant).await?;
        self.set_state(variant, VariantState::Packaged);

        info!("{} chain complete", variant.as_str());
        Ok(())
    }

    /// Build every declared variant, sequentially.
    ///
    /// The last variant's artifacts are the ones left in the shared output
    /// directories.
    pub async fn build_all(&mut self) -> Result<(), PipelineError> {
        for variant in self.config.variants.clone() {
            self.build(variant).await?;
        }
        Ok(())
    }

    /// Explicit clean, independent of any variant build
    pub async fn clean(&mut self) -> Result<(), PipelineError> {
        self.cleaner.clean().await?;
        for state in self.states.values_mut() {
            *state = VariantState::Unbuilt;
        }
        Ok(())
    }
}
