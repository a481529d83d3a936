// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types shared by every generation stage.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::keys::{ElementKey, LevelKey, WallKey};

/// Distances below this are treated as zero.
pub const GEOMETRY_TOLERANCE: f64 = 1e-9;

/// A bounded, non-degenerate straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl LineSegment {
    /// Creates a bounded segment. Fails when both ends coincide.
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Result<Self> {
        if (end - start).norm() <= GEOMETRY_TOLERANCE {
            return Err(Error::precondition(
                "segment",
                format!("start and end coincide at {:?}", start.coords.as_slice()),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Unit direction from start to end.
    pub fn direction(&self) -> Vector3<f64> {
        (self.end - self.start).normalize()
    }

    /// Returns a new segment with each end shifted by its own vector.
    pub fn offset_ends(
        &self,
        start_offset: &Vector3<f64>,
        end_offset: &Vector3<f64>,
    ) -> Result<Self> {
        Self::new(self.start + start_offset, self.end + end_offset)
    }

    pub fn is_parallel_to(&self, other: &LineSegment) -> bool {
        self.direction().cross(&other.direction()).norm() <= GEOMETRY_TOLERANCE
    }

    /// Perpendicular distance from `point` to the infinite line through this segment.
    pub fn distance_to_line(&self, point: &Point3<f64>) -> f64 {
        let d = self.direction();
        let v = point - self.start;
        (v - d * v.dot(&d)).norm()
    }
}

/// A named elevation datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub key: LevelKey,
    pub name: String,
    pub elevation: f64,
}

/// Committed wall state as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub key: WallKey,
    pub baseline: LineSegment,
    pub base_level: Level,
    pub top_level: Option<Level>,
    pub thickness: f64,
}

impl Wall {
    /// Height from base to top level, `None` while the top is unbound.
    pub fn height(&self) -> Option<f64> {
        self.top_level
            .as_ref()
            .map(|top| top.elevation - self.base_level.elevation)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Catalog category a component type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentCategory {
    Doors,
    Windows,
    Roofs,
}

/// Exact name + family query against the type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSpec {
    pub category: ComponentCategory,
    pub name: String,
    pub family: String,
}

impl TypeSpec {
    pub fn new(
        category: ComponentCategory,
        name: impl Into<String>,
        family: impl Into<String>,
    ) -> Self {
        Self {
            category,
            name: name.into(),
            family: family.into(),
        }
    }

    /// `family: name` label used in logs and errors.
    pub fn label(&self) -> String {
        format!("{}: {}", self.family, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpeningKind {
    Door,
    Window,
}

/// A placed door or window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpeningPlacement {
    pub kind: OpeningKind,
    pub host_wall: WallKey,
    pub insertion_point: Point3<f64>,
    pub host_level: LevelKey,
    pub element: ElementKey,
}

/// Closed chain of segments bounding a footprint roof.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoofBoundaryLoop {
    segments: Vec<LineSegment>,
}

impl RoofBoundaryLoop {
    /// Builds a loop, checking that consecutive segments chain end to start
    /// and that the last segment returns to the first.
    pub fn new(segments: Vec<LineSegment>) -> Result<Self> {
        if segments.len() < 3 {
            return Err(Error::precondition(
                "boundary",
                format!("a closed loop needs at least 3 segments, got {}", segments.len()),
            ));
        }
        let n = segments.len();
        for i in 0..n {
            let next = &segments[(i + 1) % n];
            if (segments[i].end - next.start).norm() > GEOMETRY_TOLERANCE {
                return Err(Error::precondition(
                    "boundary",
                    format!("segment {} does not connect to segment {}", i, (i + 1) % n),
                ));
            }
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Two-segment ridge polyline sharing an apex vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoofProfile {
    segments: [LineSegment; 2],
}

impl RoofProfile {
    pub fn new(first: LineSegment, second: LineSegment) -> Result<Self> {
        if (first.end - second.start).norm() > GEOMETRY_TOLERANCE {
            return Err(Error::precondition(
                "profile",
                "ridge segments do not share an apex",
            ));
        }
        Ok(Self {
            segments: [first, second],
        })
    }

    pub fn segments(&self) -> &[LineSegment; 2] {
        &self.segments
    }

    pub fn apex(&self) -> Point3<f64> {
        self.segments[0].end
    }
}

/// Sketch plane for an extrusion, spanned by `axis_u` and `axis_v`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferencePlane {
    pub origin: Point3<f64>,
    pub axis_u: Vector3<f64>,
    pub axis_v: Vector3<f64>,
}

impl ReferencePlane {
    /// Unit normal, which is also the extrusion direction.
    pub fn normal(&self) -> Vector3<f64> {
        self.axis_u.cross(&self.axis_v).normalize()
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        (point - self.origin).dot(&self.normal()).abs() <= GEOMETRY_TOLERANCE
    }
}

/// Finish applied where an extrusion roof meets the gable ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EaveCutStyle {
    Plumb,
    TwoCutPlumb,
    TwoCutSquare,
}
