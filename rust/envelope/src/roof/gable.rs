// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Gabled extrusion roof.
//!
//! A two-segment ridge profile is drawn in the x = 0 plane across the depth
//! of the building and swept along x over the full width. Both spans are
//! widened by half a wall thickness on each side so the roof covers the
//! outer wall faces.

use nalgebra::{Point3, Vector3};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, ResolutionKind, Result};
use crate::host::Document;
use crate::keys::ElementKey;
use crate::openings::resolve_and_activate;
use crate::types::{
    ComponentCategory, EaveCutStyle, Level, LineSegment, ReferencePlane, RoofProfile, TypeSpec,
};
use crate::walls::WallLoop;

/// Height of the ridge apex above the roof level, in internal units.
/// Fixed; not derived from a pitch.
pub const RIDGE_RISE: f64 = 10.0;

/// Length of the reference plane's spanning vectors, in internal units.
pub const REFERENCE_PLANE_EXTENT: f64 = 20.0;

/// Eave finish applied to every gable roof.
pub const EAVE_CUT: EaveCutStyle = EaveCutStyle::TwoCutSquare;

/// Everything needed to issue one extrusion-roof creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GableGeometry {
    pub profile: RoofProfile,
    pub plane: ReferencePlane,
    pub extrusion_start: f64,
    pub extrusion_end: f64,
    pub curve_start: f64,
    pub curve_end: f64,
}

/// Computes the ridge profile, sketch plane and sweep range for a roof over
/// a `width` × `depth` building with walls of `thickness`, sitting on a
/// level at `roof_elevation`.
pub fn gable_geometry(
    width: f64,
    depth: f64,
    thickness: f64,
    roof_elevation: f64,
) -> Result<GableGeometry> {
    for (parameter, value) in [("width", width), ("depth", depth)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(Error::precondition(
                parameter,
                format!("must be a positive finite length, got {}", value),
            ));
        }
    }
    if !thickness.is_finite() || thickness < 0.0 {
        return Err(Error::precondition(
            "thickness",
            format!("must be a finite non-negative length, got {}", thickness),
        ));
    }

    let dt = thickness / 2.0;
    let extrusion_start = -width / 2.0 - dt;
    let extrusion_end = width / 2.0 + dt;
    let curve_start = -depth / 2.0 - dt;
    let curve_end = depth / 2.0 + dt;

    let eave_left = Point3::new(0.0, curve_start, roof_elevation);
    let apex = Point3::new(0.0, 0.0, roof_elevation + RIDGE_RISE);
    let eave_right = Point3::new(0.0, curve_end, roof_elevation);
    let profile = RoofProfile::new(
        LineSegment::new(eave_left, apex)?,
        LineSegment::new(apex, eave_right)?,
    )?;

    let plane = ReferencePlane {
        origin: Point3::origin(),
        axis_u: Vector3::new(0.0, 0.0, REFERENCE_PLANE_EXTENT),
        axis_v: Vector3::new(0.0, REFERENCE_PLANE_EXTENT, 0.0),
    };

    Ok(GableGeometry {
        profile,
        plane,
        extrusion_start,
        extrusion_end,
        curve_start,
        curve_end,
    })
}

/// Creates the gable roof on `level`, spanning `width` along x and `depth`
/// along y.
pub fn build_gable_roof(
    doc: &mut dyn Document,
    walls: &WallLoop,
    level: &Level,
    width: f64,
    depth: f64,
    roof: &TypeSpec,
) -> Result<(GableGeometry, ElementKey)> {
    if roof.category != ComponentCategory::Roofs {
        return Err(Error::precondition(
            "category",
            format!("`{}` is not a roof type", roof.label()),
        ));
    }
    let (_, thickness) = super::committed_walls(&*doc, walls)?;
    let geometry = gable_geometry(width, depth, thickness, level.elevation)?;

    let roof_type = resolve_and_activate(&mut *doc, roof, ResolutionKind::RoofType)?;
    let plane = doc.create_reference_plane(&geometry.plane)?;
    let element = doc.create_extrusion_roof(
        &geometry.profile,
        plane,
        level.key,
        roof_type,
        geometry.extrusion_start,
        geometry.extrusion_end,
    )?;
    doc.set_eave_cut_style(element, EAVE_CUT)?;
    debug!(
        level = %level.name,
        start = geometry.extrusion_start,
        end = geometry.extrusion_end,
        "created extrusion roof"
    );

    Ok((geometry, element))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn apex_rises_by_fixed_constant() {
        let g = gable_geometry(32.8, 16.4, 0.656, 13.53).unwrap();
        let apex = g.profile.apex();
        assert_relative_eq!(apex.z, 13.53 + RIDGE_RISE);
        assert_relative_eq!(apex.x, 0.0);
        assert_relative_eq!(apex.y, 0.0);
    }

    #[test]
    fn spans_are_symmetric() {
        let g = gable_geometry(10.0, 5.0, 0.4, 0.0).unwrap();
        assert_relative_eq!(g.extrusion_start, -g.extrusion_end);
        assert_relative_eq!(g.curve_start, -g.curve_end);
        assert_relative_eq!(g.extrusion_end, 5.2);
        assert_relative_eq!(g.curve_end, 2.7);

        let [first, second] = g.profile.segments();
        assert_relative_eq!(first.start.y, -second.end.y);
        assert_relative_eq!(first.start.z, second.end.z);
    }

    #[test]
    fn profile_lies_in_reference_plane() {
        let g = gable_geometry(10.0, 5.0, 0.4, 3.0).unwrap();
        for seg in g.profile.segments() {
            assert!(g.plane.contains(&seg.start));
            assert!(g.plane.contains(&seg.end));
        }
        assert_relative_eq!(g.plane.normal().x.abs(), 1.0);
    }

    #[test]
    fn rejects_non_positive_width() {
        let err = gable_geometry(0.0, 5.0, 0.4, 0.0).unwrap_err();
        assert!(matches!(err, Error::GeometryPrecondition { parameter: "width", .. }));
    }
}
