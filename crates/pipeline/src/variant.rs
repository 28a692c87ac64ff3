//! Build Variants
//!
//! The fixed set of build configurations the host packaging system
//! declares. One task chain exists per variant; nothing is created at
//! run time.

use serde::{Deserialize, Serialize};

/// Build variant (debug/release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Debug,
    Release,
}

impl Variant {
    /// Variant name as the host build system spells it
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Debug => "debug",
            Variant::Release => "release",
        }
    }

    /// Configuration label passed to the native build script
    pub fn config_label(&self) -> &'static str {
        match self {
            Variant::Debug => "Debug",
            Variant::Release => "Release",
        }
    }

    /// Host packaging task that consumes this variant's libraries
    pub fn assemble_task(&self) -> &'static str {
        match self {
            Variant::Debug => "assembleDebug",
            Variant::Release => "assembleRelease",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "debug" | "Debug" => Some(Variant::Debug),
            "release" | "Release" => Some(Variant::Release),
            _ => None,
        }
    }

    /// Get all declared variants
    pub fn all() -> &'static [Variant] {
        &[Variant::Debug, Variant::Release]
    }
}
