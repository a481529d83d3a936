// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State shared between generation stages.

use crate::error::{Error, ResolutionKind, Result};
use crate::host::LevelRegistry;
use crate::keys::LevelKey;
use crate::types::Level;
use crate::walls::WallLoop;

/// Levels and walls carried from one stage to the next.
///
/// Both collections only grow: levels are appended when a stage creates one,
/// and the wall loop is set exactly once by the wall stage.
#[derive(Debug, Default)]
pub struct BuildContext {
    levels: Vec<Level>,
    walls: Option<WallLoop>,
}

impl BuildContext {
    /// Seeds the level collection from the host registry.
    pub fn from_registry<R: LevelRegistry + ?Sized>(registry: &R) -> Self {
        Self {
            levels: registry.levels(),
            walls: None,
        }
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level_by_name(&self, name: &str) -> Result<&Level> {
        self.levels
            .iter()
            .find(|level| level.name == name)
            .ok_or_else(|| Error::not_found(ResolutionKind::Level, name))
    }

    pub fn level(&self, key: LevelKey) -> Result<&Level> {
        self.levels
            .iter()
            .find(|level| level.key == key)
            .ok_or_else(|| Error::not_found(ResolutionKind::Level, format!("{:?}", key)))
    }

    /// Registers a level created mid-pipeline so later stages can find it.
    pub fn push_level(&mut self, level: Level) {
        if !self.levels.iter().any(|l| l.key == level.key) {
            self.levels.push(level);
        }
    }

    pub fn set_walls(&mut self, walls: WallLoop) -> Result<()> {
        if self.walls.is_some() {
            return Err(Error::Context("wall loop already built".into()));
        }
        self.walls = Some(walls);
        Ok(())
    }

    pub fn walls(&self) -> Result<&WallLoop> {
        self.walls
            .as_ref()
            .ok_or_else(|| Error::Context("wall loop has not been built yet".into()))
    }
}
