// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handle types for elements owned by the host document.
//!
//! The generator never owns walls, roofs or levels. Creation calls hand back
//! one of these keys and every later query goes through the host with it.
//! Keys are `slotmap` generational indices, so a key taken before a rolled
//! back transaction simply stops resolving afterwards.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a level in the host's level registry.
    pub struct LevelKey;

    /// Key for a wall element.
    pub struct WallKey;

    /// Key for a catalog type (door, window or roof type).
    pub struct TypeKey;

    /// Key for any other committed element (openings, roofs).
    pub struct ElementKey;

    /// Key for a reference plane.
    pub struct PlaneKey;
}
