// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Contracts with the hosting model service.
//!
//! The generator computes geometry; storing it is the host's job. Every
//! operation here is fallible and every mutation must happen inside a
//! transaction opened with [`Transactional::start_transaction`]. Stages take
//! `&mut dyn Document` so any host (the in-memory one in [`crate::memory`], or
//! a binding to a real authoring tool) can be plugged in.

use nalgebra::Point3;

use crate::error::Result;
use crate::keys::{ElementKey, LevelKey, PlaneKey, TypeKey, WallKey};
use crate::types::{
    BoundingBox, EaveCutStyle, Level, LineSegment, ReferencePlane, RoofBoundaryLoop, RoofProfile,
    TypeSpec, Wall,
};

/// Named elevation datums.
pub trait LevelRegistry {
    /// All levels currently known to the host, in creation order.
    fn levels(&self) -> Vec<Level>;

    fn level(&self, key: LevelKey) -> Option<Level>;

    /// First level whose name matches exactly.
    fn resolve_level(&self, name: &str) -> Option<Level> {
        self.levels().into_iter().find(|level| level.name == name)
    }

    /// Creates and registers a new level at `elevation` (internal units).
    fn create_level(&mut self, elevation: f64) -> Result<Level>;
}

/// Reusable component definitions (door, window and roof types).
pub trait TypeCatalog {
    /// Exact category + name + family match.
    fn resolve_type(&self, spec: &TypeSpec) -> Option<TypeKey>;

    fn is_active(&self, key: TypeKey) -> Result<bool>;

    /// Provisions the type for instancing. Calling it on an active type is a no-op.
    fn ensure_active(&mut self, key: TypeKey) -> Result<()>;
}

/// Element creation and committed-state queries.
pub trait ElementFactory {
    /// Creates a wall on `base_level` along `baseline`. The top is unbound
    /// until [`ElementFactory::set_wall_top_level`] is called.
    fn create_wall(
        &mut self,
        baseline: &LineSegment,
        base_level: LevelKey,
        thickness: f64,
    ) -> Result<WallKey>;

    fn set_wall_top_level(&mut self, wall: WallKey, top_level: LevelKey) -> Result<()>;

    fn wall(&self, key: WallKey) -> Option<Wall>;

    /// Axis-aligned extent of the wall body.
    fn wall_bounding_box(&self, key: WallKey) -> Option<BoundingBox>;

    /// Places a hosted family instance (door or window).
    fn instantiate_component(
        &mut self,
        point: &Point3<f64>,
        component_type: TypeKey,
        host_wall: WallKey,
        host_level: LevelKey,
    ) -> Result<ElementKey>;

    fn create_reference_plane(&mut self, plane: &ReferencePlane) -> Result<PlaneKey>;

    fn create_footprint_roof(
        &mut self,
        boundary: &RoofBoundaryLoop,
        level: LevelKey,
        roof_type: TypeKey,
    ) -> Result<ElementKey>;

    fn create_extrusion_roof(
        &mut self,
        profile: &RoofProfile,
        plane: PlaneKey,
        level: LevelKey,
        roof_type: TypeKey,
        extrusion_start: f64,
        extrusion_end: f64,
    ) -> Result<ElementKey>;

    fn set_eave_cut_style(&mut self, roof: ElementKey, style: EaveCutStyle) -> Result<()>;
}

/// All-or-nothing units of work.
pub trait Transactional {
    fn start_transaction(&mut self, name: &str) -> Result<()>;

    fn commit_transaction(&mut self) -> Result<()>;

    /// Discards everything done since the transaction started.
    fn rollback_transaction(&mut self);

    fn in_transaction(&self) -> bool;
}

/// Display-to-internal length conversion.
pub trait UnitConverter {
    fn millimetres_to_internal(&self, millimetres: f64) -> f64;
}

/// Everything the generator needs from a host.
pub trait Document: LevelRegistry + TypeCatalog + ElementFactory + Transactional + UnitConverter {}

impl<T> Document for T where
    T: LevelRegistry + TypeCatalog + ElementFactory + Transactional + UnitConverter
{
}
