// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for the interaction controller.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use understory_handle_hit::HitRadii;

/// Errors produced while loading or validating an [`InteractionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid JSON for this shape.
    #[error("failed to parse interaction config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field held a value outside its allowed range.
    #[error("interaction config `{key}` is out of range: {value}")]
    OutOfRange {
        /// Field name.
        key: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Controller configuration.
///
/// Missing fields take their default when deserialized, so a host config file
/// only needs the keys it overrides:
///
/// ```rust
/// use understory_designer::InteractionConfig;
///
/// let cfg = InteractionConfig::from_json(r#"{ "snapping": false, "hit_radii": { "pivot": 14.0 } }"#)
///     .unwrap();
/// assert!(!cfg.snapping);
/// assert_eq!(cfg.hit_radii.pivot, 14.0);
/// assert_eq!(cfg.hit_radii.handle, 12.0);
/// assert_eq!(cfg.snap_threshold, 8.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Snap moved elements to the canvas edges.
    pub snapping: bool,
    /// Edge snap distance in screen units; divided by zoom before use.
    pub snap_threshold: f64,
    /// Distance within which anchor and pivot components snap to 0, 0.5 or 1.
    pub value_snap_tolerance: f64,
    /// Screen-space gizmo radii.
    pub hit_radii: HitRadii,
    /// Zoom change per scroll unit.
    pub zoom_step: f64,
    /// Lower zoom bound.
    pub min_zoom: f64,
    /// Upper zoom bound.
    pub max_zoom: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            snapping: true,
            snap_threshold: 8.0,
            value_snap_tolerance: 0.05,
            hit_radii: HitRadii::default(),
            zoom_step: 0.1,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

fn non_negative(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value })
    }
}

fn positive(key: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { key, value })
    }
}

impl InteractionConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("snap_threshold", self.snap_threshold)?;
        non_negative("value_snap_tolerance", self.value_snap_tolerance)?;
        if self.value_snap_tolerance >= 0.5 {
            return Err(ConfigError::OutOfRange {
                key: "value_snap_tolerance",
                value: self.value_snap_tolerance,
            });
        }
        non_negative("hit_radii.handle", self.hit_radii.handle)?;
        non_negative("hit_radii.anchor", self.hit_radii.anchor)?;
        non_negative("hit_radii.pivot", self.hit_radii.pivot)?;
        positive("zoom_step", self.zoom_step)?;
        positive("min_zoom", self.min_zoom)?;
        positive("max_zoom", self.max_zoom)?;
        if self.max_zoom < self.min_zoom {
            return Err(ConfigError::OutOfRange {
                key: "max_zoom",
                value: self.max_zoom,
            });
        }
        Ok(())
    }
}
