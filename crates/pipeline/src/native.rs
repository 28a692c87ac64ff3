//! Native Build Invocation
//!
//! Launches the external C/C++ build script once per variant and blocks
//! until it exits. The script owns the actual compile/link graph; this
//! side only threads the parameters in and propagates failure.

use std::path::PathBuf;

use tokio::process::Command;
use tracing::{debug, info};

use jniforge_toolchain::NdkToolchain;

use crate::{PipelineError, Variant};

/// Arguments handed to the native build script.
///
/// Constructed fresh for every variant invocation; never persisted.
#[derive(Debug, Clone)]
pub struct NativeBuildRequest {
    /// NDK root directory
    pub ndk_path: PathBuf,
    /// Minimum target API level
    pub api_level: u32,
    /// Configuration label ("Debug" or "Release")
    pub config_label: &'static str,
}

impl NativeBuildRequest {
    /// Build a request from the resolved toolchain and a variant
    pub fn new(toolchain: &NdkToolchain, variant: Variant) -> Self {
        Self {
            ndk_path: toolchain.path.clone(),
            api_level: toolchain.api_level,
            config_label: variant.config_label(),
        }
    }
}

/// Runs the native build script as a subprocess.
///
/// No retries and no internal timeout: a nonzero exit is a hard stop, and
/// a hung toolchain is the host scheduler's to kill.
pub struct NativeBuildInvoker {
    module_dir: PathBuf,
    script: String,
}

impl NativeBuildInvoker {
    /// Create an invoker for a module directory and script name
    pub fn new(module_dir: PathBuf, script: impl Into<String>) -> Self {
        Self {
            module_dir,
            script: script.into(),
        }
    }

    /// Invoke the native build and wait for it to exit.
    ///
    /// The script receives three positional arguments, in order: NDK root,
    /// minimum API level, configuration label. Exit 0 is the only success.
    pub async fn invoke(&self, request: &NativeBuildRequest) -> Result<(), PipelineError> {
        info!(
            "Building native libraries ({}, API {})",
            request.config_label, request.api_level
        );
        debug!(
            "Running: bash {} {:?} {} {}",
            self.script, request.ndk_path, request.api_level, request.config_label
        );

        let output = Command::new("bash")
            .arg(&self.script)
            .arg(&request.ndk_path)
            .arg(request.api_level.to_string())
            .arg(request.config_label)
            .current_dir(&self.module_dir)
            .output()
            .await?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::NativeBuildFailed {
                code: output.status.code(),
                output: format!("{}\n{}", stdout, stderr),
            });
        }

        info!("Native build completed ({})", request.config_label);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn write_script(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), format!("#!/bin/sh\n{}\n", body)).unwrap();
    }

    fn request(ndk: &Path) -> NativeBuildRequest {
        NativeBuildRequest {
            ndk_path: ndk.to_path_buf(),
            api_level: 21,
            config_label: Variant::Release.config_label(),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn passes_three_positional_arguments_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write_script(dir.path(), "build_cpp.sh", r#"echo "$1 $2 $3" > invocation.log"#);

        let invoker = NativeBuildInvoker::new(dir.path().to_path_buf(), "build_cpp.sh");
        invoker.invoke(&request(Path::new("/opt/ndk-27.3"))).await.unwrap();

        let log = std::fs::read_to_string(dir.path().join("invocation.log")).unwrap();
        assert_eq!(log.trim(), "/opt/ndk-27.3 21 Release");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_carries_code_and_output() {
        let dir = tempfile::tempdir().unwrap();
        write_script(
            dir.path(),
            "build_cpp.sh",
            "echo 'cc: fatal error' >&2\nexit 7",
        );

        let invoker = NativeBuildInvoker::new(dir.path().to_path_buf(), "build_cpp.sh");
        let err = invoker
            .invoke(&request(Path::new("/opt/ndk-27.3")))
            .await
            .unwrap_err();

        match err {
            PipelineError::NativeBuildFailed { code, output } => {
                assert_eq!(code, Some(7));
                assert!(output.contains("cc: fatal error"));
            }
            other => panic!("expected NativeBuildFailed, got {:?}", other),
        }
    }
}
