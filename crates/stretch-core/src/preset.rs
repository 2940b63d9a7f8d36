//! YAML breakpoint presets.
//!
//! A preset names a set of breakpoints so a stretch can be reproduced
//! without retyping four numbers. Missing fields fall back to
//! [`Breakpoints::default`]. Presets are validated when loaded.
//!
//! ```yaml
//! name: punchy-midtones
//! r1: 70
//! r2: 140
//! s1: 30
//! s2: 200
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{Breakpoints, StretchError, StretchResult};

/// A named, validated set of breakpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Display name.
    pub name: String,
    /// Validated breakpoints.
    pub breakpoints: Breakpoints,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPreset {
    name: Option<String>,
    r1: Option<i32>,
    r2: Option<i32>,
    s1: Option<i32>,
    s2: Option<i32>,
}

/// Per-field replacements applied on top of a base set of breakpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replacement `r1`.
    pub r1: Option<i32>,
    /// Replacement `r2`.
    pub r2: Option<i32>,
    /// Replacement `s1`.
    pub s1: Option<i32>,
    /// Replacement `s2`.
    pub s2: Option<i32>,
}

impl Overrides {
    /// Apply to `base` and validate the result.
    pub fn apply(&self, base: Breakpoints) -> StretchResult<Breakpoints> {
        Breakpoints::new(
            self.r1.unwrap_or(base.r1),
            self.r2.unwrap_or(base.r2),
            self.s1.unwrap_or(base.s1),
            self.s2.unwrap_or(base.s2),
        )
    }
}

impl Preset {
    /// Load a preset from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> StretchResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let fallback = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "preset".to_string());
        let mut preset = Self::from_yaml_str(&content)?;
        if preset.name.is_empty() {
            preset.name = fallback;
        }
        debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Parse a preset from YAML text.
    pub fn from_yaml_str(yaml: &str) -> StretchResult<Self> {
        let raw: RawPreset =
            serde_yaml::from_str(yaml).map_err(|e| StretchError::Preset(e.to_string()))?;
        let base = Breakpoints::default();
        let breakpoints = Overrides {
            r1: raw.r1,
            r2: raw.r2,
            s1: raw.s1,
            s2: raw.s2,
        }
        .apply(base)?;
        Ok(Self {
            name: raw.name.unwrap_or_default(),
            breakpoints,
        })
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            breakpoints: Breakpoints::default(),
        }
    }
}
