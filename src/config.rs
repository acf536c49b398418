// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rungline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Editor configuration.
//!
//! Every field has a default, so a config file only needs the values it overrides.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::ElementFamily;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub layout: LayoutConfig,
    pub interaction: InteractionConfig,
    /// Width of the drawing surface; every wire spans it.
    pub surface_width: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            interaction: InteractionConfig::default(),
            surface_width: 1200.0,
        }
    }
}

/// Geometry constants used by the layout engine and the element finder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Added to every element's glyph/selector width.
    pub element_margin: f64,
    /// Added to the wider lane of a non-empty branch.
    pub branch_padding: f64,
    /// Width of a branch whose lanes are both empty.
    pub empty_branch_width: f64,
    /// Smallest distance between a branch's two rails.
    pub min_branch_extent: f64,
    /// Height a wire contributes below its deepest rail.
    pub wire_base_height: f64,
    /// Rail y of the first wire.
    pub first_rail_y: f64,
    /// Half the height of an element's hit box, centred on its rail.
    pub element_half_height: f64,
    pub selector_min_width: f64,
    pub selector_char_width: f64,
    pub selector_padding: f64,
    pub glyph: GlyphWidths,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            element_margin: 20.0,
            branch_padding: 40.0,
            empty_branch_width: 130.0,
            min_branch_extent: 125.0,
            wire_base_height: 125.0,
            first_rail_y: 60.0,
            element_half_height: 40.0,
            selector_min_width: 60.0,
            selector_char_width: 8.0,
            selector_padding: 16.0,
            glyph: GlyphWidths::default(),
        }
    }
}

/// Intrinsic glyph width per element family.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GlyphWidths {
    pub contact: f64,
    pub coil: f64,
    pub math: f64,
    pub r#move: f64,
    pub compare: f64,
    pub timer: f64,
    pub counter: f64,
    pub reset: f64,
}

impl Default for GlyphWidths {
    fn default() -> Self {
        Self {
            contact: 60.0,
            coil: 60.0,
            math: 110.0,
            r#move: 110.0,
            compare: 90.0,
            timer: 110.0,
            counter: 110.0,
            reset: 60.0,
        }
    }
}

impl GlyphWidths {
    pub fn for_family(&self, family: ElementFamily) -> f64 {
        match family {
            ElementFamily::Contact => self.contact,
            ElementFamily::Coil => self.coil,
            ElementFamily::Math => self.math,
            ElementFamily::Move => self.r#move,
            ElementFamily::Compare => self.compare,
            ElementFamily::Timer => self.timer,
            ElementFamily::Counter => self.counter,
            ElementFamily::Reset => self.reset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum distance from a rail for it to count as hit.
    pub hit_tolerance: f64,
    /// Pointer travel needed before a held selection turns into a drag.
    pub drag_threshold: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: 20.0,
            drag_threshold: 5.0,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

impl EditorConfig {
    /// Loads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!(path:? = path; "loaded editor config");
        Ok(config)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if !(self.surface_width.is_finite() && self.surface_width > 0.0) {
            return Err("surface_width must be positive".to_owned());
        }
        if self.layout.min_branch_extent <= 0.0 {
            return Err("layout.min_branch_extent must be positive".to_owned());
        }
        if self.interaction.hit_tolerance < 0.0 || self.interaction.drag_threshold < 0.0 {
            return Err("interaction thresholds must not be negative".to_owned());
        }
        Ok(())
    }
}
