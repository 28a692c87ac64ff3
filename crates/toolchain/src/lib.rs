//! Android NDK Toolchain Location
//!
//! Resolves the NDK installed on the host and validates that its version
//! matches the revision the native dependencies were built against.
//!
//! Resolution is read-only: the locator inspects environment variables and
//! well-known install directories, parses `source.properties`, and either
//! hands back an [`NdkToolchain`] or fails loudly. It never downloads,
//! upgrades, or substitutes a different NDK revision.

pub mod locator;

pub use locator::{NdkLocator, NdkToolchain, ToolchainError};
