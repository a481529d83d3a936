// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Staged envelope build.
//!
//! Each stage computes its geometry, then applies it inside one host
//! transaction. A stage that fails is rolled back and the error is returned
//! unchanged; later stages never run. Stages read wall geometry back from
//! the host rather than from earlier in-memory results.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::EnvelopeConfig;
use crate::context::BuildContext;
use crate::error::Result;
use crate::footprint::{rectangle_footprint, Footprint};
use crate::host::Document;
use crate::keys::ElementKey;
use crate::openings::{place_door, place_windows};
use crate::roof::{build_flat_roof, build_gable_roof, GableGeometry};
use crate::types::{Level, OpeningPlacement, RoofBoundaryLoop};
use crate::walls::{build_wall_loop, WallLoop};

/// What one full build produced.
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeReport {
    pub footprint: Footprint,
    pub walls: WallLoop,
    pub door: OpeningPlacement,
    pub windows: Vec<OpeningPlacement>,
    pub flat_roof: RoofBoundaryLoop,
    pub flat_roof_element: ElementKey,
    pub roof_level: Level,
    pub gable_roof: GableGeometry,
    pub gable_roof_element: ElementKey,
}

/// Runs `body` inside a transaction named `name`, committing on success and
/// rolling back on any error.
pub fn run_stage<T>(
    doc: &mut dyn Document,
    name: &str,
    body: impl FnOnce(&mut dyn Document) -> Result<T>,
) -> Result<T> {
    info!(stage = name, "starting stage");
    doc.start_transaction(name)?;

    let value = match body(&mut *doc) {
        Ok(value) => value,
        Err(err) => {
            warn!(stage = name, error = %err, "stage failed, rolling back");
            doc.rollback_transaction();
            return Err(err);
        }
    };

    if let Err(err) = doc.commit_transaction() {
        warn!(stage = name, error = %err, "commit failed");
        if doc.in_transaction() {
            doc.rollback_transaction();
        }
        return Err(err);
    }
    info!(stage = name, "committed stage");
    Ok(value)
}

/// Builds walls, openings and both roofs for `config`.
pub fn build_envelope(doc: &mut dyn Document, config: &EnvelopeConfig) -> Result<EnvelopeReport> {
    let mut ctx = BuildContext::from_registry(&*doc);
    let base_level = ctx.level_by_name(&config.base_level)?.clone();
    let top_level = ctx.level_by_name(&config.top_level)?.clone();

    let width = doc.millimetres_to_internal(config.width_mm);
    let depth = doc.millimetres_to_internal(config.depth_mm);
    let thickness = doc.millimetres_to_internal(config.wall_thickness_mm);
    let footprint = rectangle_footprint(width, depth)?;

    let walls = run_stage(doc, "Build walls", |doc| {
        build_wall_loop(doc, &footprint, &base_level, &top_level, thickness)
    })?;
    ctx.set_walls(walls)?;
    let walls = ctx.walls()?.clone();

    let door = run_stage(doc, "Place door", |doc| {
        place_door(doc, &walls, &base_level, &config.door)
    })?;

    let windows = run_stage(doc, "Place windows", |doc| {
        place_windows(doc, &walls, &base_level, &config.window)
    })?;

    let (flat_roof, flat_roof_element) = run_stage(doc, "Add flat roof", |doc| {
        build_flat_roof(doc, &walls, &top_level, &config.roof)
    })?;

    let roof_elevation = doc.millimetres_to_internal(config.roof_level_elevation_mm);
    let created = run_stage(doc, "Add roof level", |doc| doc.create_level(roof_elevation))?;
    let roof_key = created.key;
    ctx.push_level(created);
    let roof_level = ctx.level(roof_key)?.clone();

    let gable_width = doc.millimetres_to_internal(config.gable_width_mm());
    let gable_depth = doc.millimetres_to_internal(config.gable_depth_mm());
    let (gable_roof, gable_roof_element) = run_stage(doc, "Add gable roof", |doc| {
        build_gable_roof(doc, &walls, &roof_level, gable_width, gable_depth, &config.roof)
    })?;

    info!(
        windows = windows.len(),
        roof_level = %roof_level.name,
        "envelope complete"
    );

    Ok(EnvelopeReport {
        footprint,
        walls,
        door,
        windows,
        flat_roof,
        flat_roof_element,
        roof_level,
        gable_roof,
        gable_roof_element,
    })
}
