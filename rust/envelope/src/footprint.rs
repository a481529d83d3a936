// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rectangular footprint centred on the origin.

use nalgebra::Point3;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::types::LineSegment;

/// Closed ground-plan boundary at z = 0. The last point repeats the first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Footprint {
    points: Vec<Point3<f64>>,
}

impl Footprint {
    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    /// Consecutive point pairs, one per side.
    pub fn edges(&self) -> Result<Vec<LineSegment>> {
        self.points
            .windows(2)
            .map(|pair| LineSegment::new(pair[0], pair[1]))
            .collect()
    }
}

/// Builds the counter-clockwise rectangle
/// `(-w/2,-d/2) → (w/2,-d/2) → (w/2,d/2) → (-w/2,d/2) → (-w/2,-d/2)`.
pub fn rectangle_footprint(width: f64, depth: f64) -> Result<Footprint> {
    check_dimension("width", width)?;
    check_dimension("depth", depth)?;

    let dx = width / 2.0;
    let dy = depth / 2.0;

    Ok(Footprint {
        points: vec![
            Point3::new(-dx, -dy, 0.0),
            Point3::new(dx, -dy, 0.0),
            Point3::new(dx, dy, 0.0),
            Point3::new(-dx, dy, 0.0),
            Point3::new(-dx, -dy, 0.0),
        ],
    })
}

fn check_dimension(parameter: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::precondition(
            parameter,
            format!("must be a positive finite length, got {}", value),
        ));
    }
    Ok(())
}
