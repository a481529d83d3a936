// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed loop of four walls raised on the footprint.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, ResolutionKind, Result};
use crate::footprint::Footprint;
use crate::host::{Document, ElementFactory};
use crate::keys::WallKey;
use crate::types::{Level, Wall};

/// Number of walls in a rectangular loop.
pub const WALL_COUNT: usize = 4;

/// Ordered wall handles. Index order follows footprint point order, so the
/// first wall is the south side and hosts the door.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallLoop {
    keys: Vec<WallKey>,
}

impl WallLoop {
    /// Rebuilds a loop from handles already committed to the host.
    pub fn from_keys(keys: Vec<WallKey>) -> Result<Self> {
        if keys.len() != WALL_COUNT {
            return Err(Error::precondition(
                "walls",
                format!("expected {} walls, got {}", WALL_COUNT, keys.len()),
            ));
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[WallKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The only wall that receives a door.
    pub fn door_host(&self) -> WallKey {
        self.keys[0]
    }

    /// Every wall except the door host.
    pub fn window_hosts(&self) -> impl Iterator<Item = WallKey> + '_ {
        self.keys.iter().copied().skip(1)
    }

    /// Reads the committed state of every wall, in loop order.
    pub fn committed<H: ElementFactory + ?Sized>(&self, host: &H) -> Result<Vec<Wall>> {
        self.keys
            .iter()
            .map(|&key| {
                host.wall(key)
                    .ok_or_else(|| Error::not_found(ResolutionKind::Wall, format!("{:?}", key)))
            })
            .collect()
    }
}

/// Creates one wall per footprint side on `base_level`, each bound at the
/// top to `top_level`.
///
/// Both levels must still be registered with the host and `top_level` must
/// sit above `base_level`; otherwise nothing is created.
pub fn build_wall_loop(
    doc: &mut dyn Document,
    footprint: &Footprint,
    base_level: &Level,
    top_level: &Level,
    thickness: f64,
) -> Result<WallLoop> {
    for level in [base_level, top_level] {
        if doc.level(level.key).is_none() {
            return Err(Error::not_found(ResolutionKind::Level, level.name.clone()));
        }
    }
    if top_level.elevation <= base_level.elevation {
        return Err(Error::precondition(
            "top_level",
            format!(
                "`{}` ({}) is not above `{}` ({})",
                top_level.name, top_level.elevation, base_level.name, base_level.elevation
            ),
        ));
    }
    if !thickness.is_finite() || thickness <= 0.0 {
        return Err(Error::precondition(
            "thickness",
            format!("must be a positive finite length, got {}", thickness),
        ));
    }

    let edges = footprint.edges()?;
    if edges.len() != WALL_COUNT {
        return Err(Error::precondition(
            "footprint",
            format!("expected {} sides, got {}", WALL_COUNT, edges.len()),
        ));
    }

    let mut keys = Vec::with_capacity(WALL_COUNT);
    for (i, baseline) in edges.iter().enumerate() {
        let key = doc.create_wall(baseline, base_level.key, thickness)?;
        doc.set_wall_top_level(key, top_level.key)?;
        debug!(index = i, length = baseline.length(), "created wall");
        keys.push(key);
    }

    WallLoop::from_keys(keys)
}
