// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Envelope-Lite
//!
//! Parametric envelope generation for a rectangular, single-volume building.
//!
//! From a width, depth and wall thickness this crate derives:
//! 1. a closed rectangular footprint centred on the origin,
//! 2. a loop of four walls between a base and a top level,
//! 3. one door on the first wall and a window on each of the others,
//! 4. a flat footprint roof offset to the outer wall faces,
//! 5. a gabled extrusion roof on a newly created roof level.
//!
//! The crate never owns the elements it builds. All storage, type lookup and
//! transaction handling go through the [`host::Document`] traits;
//! [`memory::MemoryDocument`] is a complete in-memory implementation.
//!
//! ```
//! use envelope_lite::{build_envelope, EnvelopeConfig, MemoryDocument};
//!
//! let mut doc = MemoryDocument::with_default_catalog();
//! let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();
//!
//! assert_eq!(report.walls.len(), 4);
//! assert_eq!(report.windows.len(), 3);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod footprint;
pub mod host;
pub mod keys;
pub mod memory;
pub mod openings;
pub mod pipeline;
pub mod roof;
pub mod types;
pub mod walls;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use config::EnvelopeConfig;
pub use context::BuildContext;
pub use error::{Error, ResolutionKind, Result};
pub use footprint::{rectangle_footprint, Footprint};
pub use host::{Document, ElementFactory, LevelRegistry, Transactional, TypeCatalog, UnitConverter};
pub use keys::{ElementKey, LevelKey, PlaneKey, TypeKey, WallKey};
pub use memory::MemoryDocument;
pub use openings::{door_insertion_point, place_door, place_windows, window_insertion_point};
pub use pipeline::{build_envelope, run_stage, EnvelopeReport};
pub use roof::{
    build_flat_roof, build_gable_roof, flat_roof_boundary, gable_geometry, GableGeometry,
    RIDGE_RISE,
};
pub use types::{
    BoundingBox, ComponentCategory, EaveCutStyle, Level, LineSegment, OpeningKind,
    OpeningPlacement, ReferencePlane, RoofBoundaryLoop, RoofProfile, TypeSpec, Wall,
};
pub use walls::{build_wall_loop, WallLoop};
