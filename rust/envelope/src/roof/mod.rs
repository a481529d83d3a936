// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Roof builders derived from the committed wall loop.
//!
//! - [`flat`]: footprint roof on an outward-offset boundary loop.
//! - [`gable`]: ridge profile extruded across the building.

pub mod flat;
pub mod gable;

pub use flat::{build_flat_roof, flat_roof_boundary};
pub use gable::{
    build_gable_roof, gable_geometry, GableGeometry, EAVE_CUT, REFERENCE_PLANE_EXTENT, RIDGE_RISE,
};

use crate::error::{Error, Result};
use crate::host::ElementFactory;
use crate::types::Wall;
use crate::walls::{WallLoop, WALL_COUNT};

/// Committed walls plus the thickness of the first one, which every roof
/// offsets by.
pub(crate) fn committed_walls<H: ElementFactory + ?Sized>(
    host: &H,
    walls: &WallLoop,
) -> Result<(Vec<Wall>, f64)> {
    let committed = walls.committed(host)?;
    if committed.len() < WALL_COUNT {
        return Err(Error::precondition(
            "walls",
            format!("roof needs {} walls, got {}", WALL_COUNT, committed.len()),
        ));
    }
    let thickness = committed[0].thickness;
    Ok((committed, thickness))
}
