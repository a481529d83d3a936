// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for envelope generation.

use std::fmt;

/// Result type alias for envelope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// What kind of named reference failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    Level,
    Wall,
    DoorType,
    WindowType,
    RoofType,
    Element,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResolutionKind::Level => "level",
            ResolutionKind::Wall => "wall",
            ResolutionKind::DoorType => "door type",
            ResolutionKind::WindowType => "window type",
            ResolutionKind::RoofType => "roof type",
            ResolutionKind::Element => "element",
        };
        f.write_str(s)
    }
}

/// Errors that can occur while generating a building envelope.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A named level, type or element is missing from the host.
    #[error("{kind} not found: {name}")]
    Resolution { kind: ResolutionKind, name: String },

    /// Degenerate or invalid numeric input to a geometric routine.
    #[error("invalid geometry parameter `{parameter}`: {reason}")]
    GeometryPrecondition {
        parameter: &'static str,
        reason: String,
    },

    /// The host rejected or failed to apply a unit of work.
    #[error("commit failed: {0}")]
    Commit(String),

    /// The build context was used out of order.
    #[error("build context error: {0}")]
    Context(String),
}

impl Error {
    pub(crate) fn not_found(kind: ResolutionKind, name: impl Into<String>) -> Self {
        Error::Resolution {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn precondition(parameter: &'static str, reason: impl Into<String>) -> Self {
        Error::GeometryPrecondition {
            parameter,
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`Error::Resolution`].
    pub fn is_resolution(&self) -> bool {
        matches!(self, Error::Resolution { .. })
    }
}
