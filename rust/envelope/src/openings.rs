// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Door and window placement on the wall loop.
//!
//! One door goes on the first wall, at the exact midpoint of its baseline.
//! Every other wall gets one window whose insertion point is the average of
//! the baseline midpoint and the centre of the wall's bounding box, which
//! lifts the window a quarter of the wall height above the base level.

use nalgebra::Point3;
use tracing::debug;

use crate::error::{Error, ResolutionKind, Result};
use crate::host::{Document, TypeCatalog};
use crate::keys::TypeKey;
use crate::types::{
    BoundingBox, ComponentCategory, Level, LineSegment, OpeningKind, OpeningPlacement, TypeSpec,
};
use crate::walls::WallLoop;

/// Insertion point for a door: the baseline midpoint.
pub fn door_insertion_point(baseline: &LineSegment) -> Point3<f64> {
    baseline.midpoint()
}

/// Insertion point for a window: halfway between the baseline midpoint and
/// the bounding-box centre.
pub fn window_insertion_point(baseline: &LineSegment, bbox: &BoundingBox) -> Point3<f64> {
    nalgebra::center(&baseline.midpoint(), &bbox.center())
}

/// Resolves `spec` in the catalog and makes sure it can be instanced.
pub(crate) fn resolve_and_activate<C: TypeCatalog + ?Sized>(
    catalog: &mut C,
    spec: &TypeSpec,
    kind: ResolutionKind,
) -> Result<TypeKey> {
    let key = catalog
        .resolve_type(spec)
        .ok_or_else(|| Error::not_found(kind, spec.label()))?;
    catalog.ensure_active(key)?;
    Ok(key)
}

/// Places the single door on the loop's door host.
pub fn place_door(
    doc: &mut dyn Document,
    walls: &WallLoop,
    level: &Level,
    door: &TypeSpec,
) -> Result<OpeningPlacement> {
    check_category(door, ComponentCategory::Doors)?;
    let host = walls.door_host();
    let wall = doc
        .wall(host)
        .ok_or_else(|| Error::not_found(ResolutionKind::Wall, format!("{:?}", host)))?;

    let door_type = resolve_and_activate(&mut *doc, door, ResolutionKind::DoorType)?;
    let point = door_insertion_point(&wall.baseline);
    let element = doc.instantiate_component(&point, door_type, host, level.key)?;
    debug!(door = %door.label(), x = point.x, y = point.y, z = point.z, "placed door");

    Ok(OpeningPlacement {
        kind: OpeningKind::Door,
        host_wall: host,
        insertion_point: point,
        host_level: level.key,
        element,
    })
}

/// Places one window on every wall except the door host.
///
/// The window type is resolved before any wall is touched, so a missing type
/// leaves the model unchanged.
pub fn place_windows(
    doc: &mut dyn Document,
    walls: &WallLoop,
    level: &Level,
    window: &TypeSpec,
) -> Result<Vec<OpeningPlacement>> {
    check_category(window, ComponentCategory::Windows)?;
    let window_type = resolve_and_activate(&mut *doc, window, ResolutionKind::WindowType)?;

    let mut placements = Vec::with_capacity(walls.len().saturating_sub(1));
    for host in walls.window_hosts() {
        let wall = doc
            .wall(host)
            .ok_or_else(|| Error::not_found(ResolutionKind::Wall, format!("{:?}", host)))?;
        let bbox = doc
            .wall_bounding_box(host)
            .ok_or_else(|| Error::not_found(ResolutionKind::Wall, format!("{:?}", host)))?;

        let point = window_insertion_point(&wall.baseline, &bbox);
        let element = doc.instantiate_component(&point, window_type, host, level.key)?;
        debug!(window = %window.label(), x = point.x, y = point.y, z = point.z, "placed window");

        placements.push(OpeningPlacement {
            kind: OpeningKind::Window,
            host_wall: host,
            insertion_point: point,
            host_level: level.key,
            element,
        });
    }

    Ok(placements)
}

fn check_category(spec: &TypeSpec, expected: ComponentCategory) -> Result<()> {
    if spec.category != expected {
        return Err(Error::precondition(
            "category",
            format!("`{}` is a {:?} type, expected {:?}", spec.label(), spec.category, expected),
        ));
    }
    Ok(())
}
