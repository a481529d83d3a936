// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Flat footprint roof.
//!
//! The boundary is pushed out to the outer face of the walls with a fixed
//! per-corner offset table. That table only holds for the axis-aligned,
//! counter-clockwise rectangle built by [`crate::footprint`] with a uniform
//! wall thickness; any other footprint needs a real polygon offset instead.

use nalgebra::Vector3;
use tracing::debug;

use crate::error::{Error, ResolutionKind, Result};
use crate::host::Document;
use crate::keys::ElementKey;
use crate::openings::resolve_and_activate;
use crate::types::{ComponentCategory, Level, LineSegment, RoofBoundaryLoop, TypeSpec};
use crate::walls::{WallLoop, WALL_COUNT};

/// Corner offsets for the rectangle, in footprint point order. The fifth
/// entry repeats the first so wall `i` uses entries `i` and `i + 1`.
fn corner_offsets(half_thickness: f64) -> [Vector3<f64>; WALL_COUNT + 1] {
    let dt = half_thickness;
    [
        Vector3::new(-dt, -dt, 0.0),
        Vector3::new(dt, -dt, 0.0),
        Vector3::new(dt, dt, 0.0),
        Vector3::new(-dt, dt, 0.0),
        Vector3::new(-dt, -dt, 0.0),
    ]
}

/// Offsets each wall baseline outward by `thickness / 2`.
pub fn flat_roof_boundary(baselines: &[LineSegment], thickness: f64) -> Result<RoofBoundaryLoop> {
    if baselines.len() != WALL_COUNT {
        return Err(Error::precondition(
            "walls",
            format!("expected {} baselines, got {}", WALL_COUNT, baselines.len()),
        ));
    }
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(Error::precondition(
            "thickness",
            format!("must be a finite non-negative length, got {}", thickness),
        ));
    }

    let offsets = corner_offsets(thickness / 2.0);
    let segments = baselines
        .iter()
        .enumerate()
        .map(|(i, baseline)| baseline.offset_ends(&offsets[i], &offsets[i + 1]))
        .collect::<Result<Vec<_>>>()?;

    RoofBoundaryLoop::new(segments)
}

/// Creates a flat roof over the wall loop at `level`.
pub fn build_flat_roof(
    doc: &mut dyn Document,
    walls: &WallLoop,
    level: &Level,
    roof: &TypeSpec,
) -> Result<(RoofBoundaryLoop, ElementKey)> {
    if roof.category != ComponentCategory::Roofs {
        return Err(Error::precondition(
            "category",
            format!("`{}` is not a roof type", roof.label()),
        ));
    }
    let (committed, thickness) = super::committed_walls(&*doc, walls)?;
    let baselines: Vec<LineSegment> = committed.iter().map(|w| w.baseline).collect();
    let boundary = flat_roof_boundary(&baselines, thickness)?;

    let roof_type = resolve_and_activate(&mut *doc, roof, ResolutionKind::RoofType)?;
    let element = doc.create_footprint_roof(&boundary, level.key, roof_type)?;
    debug!(level = %level.name, segments = boundary.len(), "created footprint roof");

    Ok((boundary, element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::rectangle_footprint;
    use approx::assert_relative_eq;

    #[test]
    fn boundary_is_offset_outward_by_half_thickness() {
        let baselines = rectangle_footprint(10.0, 5.0).unwrap().edges().unwrap();
        let boundary = flat_roof_boundary(&baselines, 0.5).unwrap();

        assert_eq!(boundary.len(), 4);
        for (segment, baseline) in boundary.segments().iter().zip(&baselines) {
            assert!(segment.is_parallel_to(baseline));
            assert_relative_eq!(baseline.distance_to_line(&segment.start), 0.25, epsilon = 1e-12);
            assert_relative_eq!(baseline.distance_to_line(&segment.end), 0.25, epsilon = 1e-12);
            // Outward: further from the origin than the baseline.
            assert!(segment.midpoint().coords.norm() > baseline.midpoint().coords.norm());
        }

        let first = boundary.segments()[0];
        assert_relative_eq!(first.start.x, -5.25);
        assert_relative_eq!(first.start.y, -2.75);
        assert_relative_eq!(first.end.x, 5.25);
    }

    #[test]
    fn boundary_closes() {
        let baselines = rectangle_footprint(32.8, 16.4).unwrap().edges().unwrap();
        let boundary = flat_roof_boundary(&baselines, 0.656).unwrap();
        let segs = boundary.segments();
        assert_relative_eq!(segs[3].end, segs[0].start);
    }

    #[test]
    fn rejects_short_wall_lists() {
        let baselines = rectangle_footprint(10.0, 5.0).unwrap().edges().unwrap();
        let err = flat_roof_boundary(&baselines[..3], 0.2).unwrap_err();
        assert!(matches!(err, Error::GeometryPrecondition { parameter: "walls", .. }));
    }
}
