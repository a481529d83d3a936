// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host document.
//!
//! [`MemoryDocument`] implements every host contract with plain arenas. It
//! works in feet internally, like most authoring tools, and snapshots its
//! whole state when a transaction starts so a rollback (or a failed commit)
//! restores exactly what was there before.

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::error::{Error, ResolutionKind, Result};
use crate::host::{ElementFactory, LevelRegistry, Transactional, TypeCatalog, UnitConverter};
use crate::keys::{ElementKey, LevelKey, PlaneKey, TypeKey, WallKey};
use crate::types::{
    BoundingBox, ComponentCategory, EaveCutStyle, Level, LineSegment, ReferencePlane,
    RoofBoundaryLoop, RoofProfile, TypeSpec, Wall,
};

/// Millimetres in one internal unit (the foot).
pub const MILLIMETRES_PER_FOOT: f64 = 304.8;

/// Default door type seeded by [`MemoryDocument::with_default_catalog`].
pub fn default_door_type() -> TypeSpec {
    TypeSpec::new(ComponentCategory::Doors, "0915 x 2134 mm", "Single-Flush")
}

/// Default window type seeded by [`MemoryDocument::with_default_catalog`].
pub fn default_window_type() -> TypeSpec {
    TypeSpec::new(ComponentCategory::Windows, "0610 x 1220 mm", "Fixed")
}

/// Default roof type seeded by [`MemoryDocument::with_default_catalog`].
pub fn default_roof_type() -> TypeSpec {
    TypeSpec::new(ComponentCategory::Roofs, "Generic - 125mm", "Basic Roof")
}

#[derive(Debug, Clone)]
struct LevelData {
    name: String,
    elevation: f64,
}

#[derive(Debug, Clone)]
struct WallData {
    baseline: LineSegment,
    base_level: LevelKey,
    top_level: Option<LevelKey>,
    thickness: f64,
}

#[derive(Debug, Clone)]
struct TypeEntry {
    spec: TypeSpec,
    active: bool,
}

/// A committed non-wall element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Component {
        category: ComponentCategory,
        component_type: TypeKey,
        point: Point3<f64>,
        host_wall: WallKey,
        host_level: LevelKey,
    },
    FootprintRoof {
        boundary: RoofBoundaryLoop,
        level: LevelKey,
        roof_type: TypeKey,
    },
    ExtrusionRoof {
        profile: RoofProfile,
        plane: PlaneKey,
        level: LevelKey,
        roof_type: TypeKey,
        extrusion_start: f64,
        extrusion_end: f64,
        eave_cut: Option<EaveCutStyle>,
    },
}

#[derive(Debug, Clone, Default)]
struct DocumentState {
    levels: SlotMap<LevelKey, LevelData>,
    walls: SlotMap<WallKey, WallData>,
    types: SlotMap<TypeKey, TypeEntry>,
    type_index: FxHashMap<TypeSpec, TypeKey>,
    planes: SlotMap<PlaneKey, ReferencePlane>,
    elements: SlotMap<ElementKey, Element>,
}

/// Arena-backed host document.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    state: DocumentState,
    /// Open transaction name and the state to restore on rollback.
    open: Option<(String, DocumentState)>,
    fail_next_commit: bool,
    committed: Vec<String>,
}

impl MemoryDocument {
    /// Creates an empty document with no levels or types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document with "Level 1" at 0 mm, "Level 2" at 4000 mm and
    /// the default door, window and roof types (inactive).
    pub fn with_default_catalog() -> Self {
        let mut doc = Self::new();
        doc.add_level("Level 1", 0.0);
        doc.add_level("Level 2", 4000.0 / MILLIMETRES_PER_FOOT);
        doc.add_type(default_door_type());
        doc.add_type(default_window_type());
        doc.add_type(default_roof_type());
        doc
    }

    /// Seeds a level outside of any transaction.
    pub fn add_level(&mut self, name: &str, elevation: f64) -> LevelKey {
        self.state.levels.insert(LevelData {
            name: name.to_string(),
            elevation,
        })
    }

    /// Seeds an inactive catalog type outside of any transaction.
    pub fn add_type(&mut self, spec: TypeSpec) -> TypeKey {
        if let Some(&key) = self.state.type_index.get(&spec) {
            return key;
        }
        let key = self.state.types.insert(TypeEntry {
            spec: spec.clone(),
            active: false,
        });
        self.state.type_index.insert(spec, key);
        key
    }

    /// Makes the next commit fail and roll back.
    pub fn fail_next_commit(&mut self) {
        self.fail_next_commit = true;
    }

    /// Names of successfully committed transactions, oldest first.
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed
    }

    pub fn wall_count(&self) -> usize {
        self.state.walls.len()
    }

    pub fn element(&self, key: ElementKey) -> Option<&Element> {
        self.state.elements.get(key)
    }

    pub fn elements(&self) -> impl Iterator<Item = (ElementKey, &Element)> {
        self.state.elements.iter()
    }

    /// Committed doors or windows, depending on `category`.
    pub fn components(&self, category: ComponentCategory) -> Vec<&Element> {
        self.state
            .elements
            .values()
            .filter(|e| matches!(e, Element::Component { category: c, .. } if *c == category))
            .collect()
    }

    pub fn roof_count(&self) -> usize {
        self.state
            .elements
            .values()
            .filter(|e| matches!(e, Element::FootprintRoof { .. } | Element::ExtrusionRoof { .. }))
            .count()
    }

    pub fn plane(&self, key: PlaneKey) -> Option<&ReferencePlane> {
        self.state.planes.get(key)
    }

    fn require_transaction(&self, operation: &str) -> Result<()> {
        if self.open.is_none() {
            return Err(Error::Commit(format!(
                "{} attempted outside of a transaction",
                operation
            )));
        }
        Ok(())
    }

    fn require_level(&self, key: LevelKey) -> Result<()> {
        if !self.state.levels.contains_key(key) {
            return Err(Error::not_found(ResolutionKind::Level, format!("{:?}", key)));
        }
        Ok(())
    }

    fn require_type(&self, key: TypeKey, category: ComponentCategory) -> Result<&TypeEntry> {
        let entry = self
            .state
            .types
            .get(key)
            .ok_or_else(|| Error::not_found(ResolutionKind::Element, format!("{:?}", key)))?;
        if entry.spec.category != category {
            return Err(Error::Commit(format!(
                "type `{}` is not in category {:?}",
                entry.spec.label(),
                category
            )));
        }
        if !entry.active {
            return Err(Error::Commit(format!(
                "type `{}` must be activated before instancing",
                entry.spec.label()
            )));
        }
        Ok(entry)
    }

    fn level_value(&self, key: LevelKey) -> Option<Level> {
        self.state.levels.get(key).map(|data| Level {
            key,
            name: data.name.clone(),
            elevation: data.elevation,
        })
    }
}

impl LevelRegistry for MemoryDocument {
    fn levels(&self) -> Vec<Level> {
        self.state
            .levels
            .keys()
            .filter_map(|key| self.level_value(key))
            .collect()
    }

    fn level(&self, key: LevelKey) -> Option<Level> {
        self.level_value(key)
    }

    fn create_level(&mut self, elevation: f64) -> Result<Level> {
        self.require_transaction("create_level")?;
        if !elevation.is_finite() {
            return Err(Error::precondition(
                "elevation",
                format!("must be finite, got {}", elevation),
            ));
        }
        let mut index = self.state.levels.len() + 1;
        let name = loop {
            let candidate = format!("Level {}", index);
            if !self.state.levels.values().any(|l| l.name == candidate) {
                break candidate;
            }
            index += 1;
        };
        let key = self.add_level(&name, elevation);
        debug!(name = %name, elevation, "created level");
        Ok(Level {
            key,
            name,
            elevation,
        })
    }
}

impl TypeCatalog for MemoryDocument {
    fn resolve_type(&self, spec: &TypeSpec) -> Option<TypeKey> {
        self.state.type_index.get(spec).copied()
    }

    fn is_active(&self, key: TypeKey) -> Result<bool> {
        self.state
            .types
            .get(key)
            .map(|entry| entry.active)
            .ok_or_else(|| Error::not_found(ResolutionKind::Element, format!("{:?}", key)))
    }

    fn ensure_active(&mut self, key: TypeKey) -> Result<()> {
        if self.is_active(key)? {
            return Ok(());
        }
        self.require_transaction("activate type")?;
        if let Some(entry) = self.state.types.get_mut(key) {
            entry.active = true;
            debug!(component_type = %entry.spec.label(), "activated type");
        }
        Ok(())
    }
}

impl ElementFactory for MemoryDocument {
    fn create_wall(
        &mut self,
        baseline: &LineSegment,
        base_level: LevelKey,
        thickness: f64,
    ) -> Result<WallKey> {
        self.require_transaction("create_wall")?;
        self.require_level(base_level)?;
        Ok(self.state.walls.insert(WallData {
            baseline: *baseline,
            base_level,
            top_level: None,
            thickness,
        }))
    }

    fn set_wall_top_level(&mut self, wall: WallKey, top_level: LevelKey) -> Result<()> {
        self.require_transaction("set_wall_top_level")?;
        self.require_level(top_level)?;
        let data = self
            .state
            .walls
            .get_mut(wall)
            .ok_or_else(|| Error::not_found(ResolutionKind::Wall, format!("{:?}", wall)))?;
        data.top_level = Some(top_level);
        Ok(())
    }

    fn wall(&self, key: WallKey) -> Option<Wall> {
        let data = self.state.walls.get(key)?;
        Some(Wall {
            key,
            baseline: data.baseline,
            base_level: self.level_value(data.base_level)?,
            top_level: data.top_level.and_then(|top| self.level_value(top)),
            thickness: data.thickness,
        })
    }

    fn wall_bounding_box(&self, key: WallKey) -> Option<BoundingBox> {
        let wall = self.wall(key)?;
        let direction = wall.baseline.direction();
        let half = wall.thickness / 2.0;
        let side = nalgebra::Vector3::new(-direction.y, direction.x, 0.0) * half;

        let corners = [
            wall.baseline.start + side,
            wall.baseline.start - side,
            wall.baseline.end + side,
            wall.baseline.end - side,
        ];
        let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        let base = wall.base_level.elevation;
        let top = wall.top_level.as_ref().map_or(base, |level| level.elevation);

        Some(BoundingBox::new(
            Point3::new(min_x, min_y, base),
            Point3::new(max_x, max_y, top),
        ))
    }

    fn instantiate_component(
        &mut self,
        point: &Point3<f64>,
        component_type: TypeKey,
        host_wall: WallKey,
        host_level: LevelKey,
    ) -> Result<ElementKey> {
        self.require_transaction("instantiate_component")?;
        self.require_level(host_level)?;
        if !self.state.walls.contains_key(host_wall) {
            return Err(Error::not_found(ResolutionKind::Wall, format!("{:?}", host_wall)));
        }
        let category = self
            .state
            .types
            .get(component_type)
            .map(|entry| entry.spec.category)
            .ok_or_else(|| {
                Error::not_found(ResolutionKind::Element, format!("{:?}", component_type))
            })?;
        if category == ComponentCategory::Roofs {
            return Err(Error::Commit("roof types cannot be hosted by a wall".into()));
        }
        self.require_type(component_type, category)?;

        Ok(self.state.elements.insert(Element::Component {
            category,
            component_type,
            point: *point,
            host_wall,
            host_level,
        }))
    }

    fn create_reference_plane(&mut self, plane: &ReferencePlane) -> Result<PlaneKey> {
        self.require_transaction("create_reference_plane")?;
        if plane.axis_u.cross(&plane.axis_v).norm() <= f64::EPSILON {
            return Err(Error::precondition("plane", "spanning vectors are parallel"));
        }
        Ok(self.state.planes.insert(*plane))
    }

    fn create_footprint_roof(
        &mut self,
        boundary: &RoofBoundaryLoop,
        level: LevelKey,
        roof_type: TypeKey,
    ) -> Result<ElementKey> {
        self.require_transaction("create_footprint_roof")?;
        self.require_level(level)?;
        self.require_type(roof_type, ComponentCategory::Roofs)?;
        Ok(self.state.elements.insert(Element::FootprintRoof {
            boundary: boundary.clone(),
            level,
            roof_type,
        }))
    }

    fn create_extrusion_roof(
        &mut self,
        profile: &RoofProfile,
        plane: PlaneKey,
        level: LevelKey,
        roof_type: TypeKey,
        extrusion_start: f64,
        extrusion_end: f64,
    ) -> Result<ElementKey> {
        self.require_transaction("create_extrusion_roof")?;
        self.require_level(level)?;
        self.require_type(roof_type, ComponentCategory::Roofs)?;
        if !self.state.planes.contains_key(plane) {
            return Err(Error::not_found(ResolutionKind::Element, format!("{:?}", plane)));
        }
        if extrusion_end <= extrusion_start {
            return Err(Error::precondition(
                "extrusion",
                format!("end {} is not after start {}", extrusion_end, extrusion_start),
            ));
        }
        Ok(self.state.elements.insert(Element::ExtrusionRoof {
            profile: profile.clone(),
            plane,
            level,
            roof_type,
            extrusion_start,
            extrusion_end,
            eave_cut: None,
        }))
    }

    fn set_eave_cut_style(&mut self, roof: ElementKey, style: EaveCutStyle) -> Result<()> {
        self.require_transaction("set_eave_cut_style")?;
        match self.state.elements.get_mut(roof) {
            Some(Element::ExtrusionRoof { eave_cut, .. }) => {
                *eave_cut = Some(style);
                Ok(())
            }
            Some(_) => Err(Error::Commit(format!("{:?} is not an extrusion roof", roof))),
            None => Err(Error::not_found(ResolutionKind::Element, format!("{:?}", roof))),
        }
    }
}

impl Transactional for MemoryDocument {
    fn start_transaction(&mut self, name: &str) -> Result<()> {
        if let Some((open, _)) = &self.open {
            return Err(Error::Commit(format!(
                "cannot start `{}` while `{}` is open",
                name, open
            )));
        }
        trace!(transaction = name, "start");
        self.open = Some((name.to_string(), self.state.clone()));
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        let (name, snapshot) = self
            .open
            .take()
            .ok_or_else(|| Error::Commit("no transaction is open".into()))?;
        if self.fail_next_commit {
            self.fail_next_commit = false;
            self.state = snapshot;
            return Err(Error::Commit(format!("host rejected `{}`", name)));
        }
        trace!(transaction = %name, "commit");
        self.committed.push(name);
        Ok(())
    }

    fn rollback_transaction(&mut self) {
        if let Some((name, snapshot)) = self.open.take() {
            trace!(transaction = %name, "rollback");
            self.state = snapshot;
        }
    }

    fn in_transaction(&self) -> bool {
        self.open.is_some()
    }
}

impl UnitConverter for MemoryDocument {
    fn millimetres_to_internal(&self, millimetres: f64) -> f64 {
        millimetres / MILLIMETRES_PER_FOOT
    }
}
