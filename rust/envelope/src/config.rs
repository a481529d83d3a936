// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Envelope parameters. Lengths are millimetres; the host converts them to
//! its internal unit.

use serde::{Deserialize, Serialize};

use crate::memory::{default_door_type, default_roof_type, default_window_type};
use crate::types::TypeSpec;

/// Elevation of the level the gable roof is built on.
pub const ROOF_LEVEL_ELEVATION_MM: f64 = 4125.0;

/// Inputs for [`crate::pipeline::build_envelope`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Footprint extent along x
    pub width_mm: f64,
    /// Footprint extent along y
    pub depth_mm: f64,
    pub wall_thickness_mm: f64,
    /// Level the walls stand on; doors and windows reference it too
    pub base_level: String,
    /// Level that bounds the wall tops and carries the flat roof
    pub top_level: String,
    pub roof_level_elevation_mm: f64,
    /// Gable sweep length, defaults to `width_mm`
    pub gable_width_mm: Option<f64>,
    /// Gable profile span, defaults to `depth_mm`
    pub gable_depth_mm: Option<f64>,
    pub door: TypeSpec,
    pub window: TypeSpec,
    pub roof: TypeSpec,
}

impl EnvelopeConfig {
    pub fn gable_width_mm(&self) -> f64 {
        self.gable_width_mm.unwrap_or(self.width_mm)
    }

    pub fn gable_depth_mm(&self) -> f64 {
        self.gable_depth_mm.unwrap_or(self.depth_mm)
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            width_mm: 10000.0,
            depth_mm: 5000.0,
            wall_thickness_mm: 200.0,
            base_level: "Level 1".into(),
            top_level: "Level 2".into(),
            roof_level_elevation_mm: ROOF_LEVEL_ELEVATION_MM,
            gable_width_mm: None,
            gable_depth_mm: None,
            door: default_door_type(),
            window: default_window_type(),
            roof: default_roof_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentCategory;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: EnvelopeConfig =
            serde_json::from_str(r#"{ "width_mm": 12000.0, "gable_depth_mm": 6000.0 }"#).unwrap();
        assert_eq!(config.width_mm, 12000.0);
        assert_eq!(config.depth_mm, 5000.0);
        assert_eq!(config.gable_width_mm(), 12000.0);
        assert_eq!(config.gable_depth_mm(), 6000.0);
        assert_eq!(config.door.category, ComponentCategory::Doors);
    }
}
