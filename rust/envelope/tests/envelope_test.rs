// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end envelope builds against the in-memory host.

use approx::assert_relative_eq;
use envelope_lite::memory::{default_door_type, default_roof_type, Element};
use envelope_lite::{
    build_envelope, ComponentCategory, EaveCutStyle, ElementFactory, EnvelopeConfig, Error,
    LevelRegistry, MemoryDocument, OpeningKind, ResolutionKind, TypeCatalog, TypeSpec, RIDGE_RISE,
};

fn feet(mm: f64) -> f64 {
    mm / envelope_lite::memory::MILLIMETRES_PER_FOOT
}

#[test]
fn default_build_produces_full_envelope() {
    let mut doc = MemoryDocument::with_default_catalog();
    let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();

    assert_eq!(doc.wall_count(), 4);
    assert_eq!(doc.components(ComponentCategory::Doors).len(), 1);
    assert_eq!(doc.components(ComponentCategory::Windows).len(), 3);
    assert_eq!(doc.roof_count(), 2);
    assert_eq!(doc.levels().len(), 3);
    assert_eq!(
        doc.committed_transactions(),
        &[
            "Build walls",
            "Place door",
            "Place windows",
            "Add flat roof",
            "Add roof level",
            "Add gable roof",
        ]
    );

    assert_eq!(report.footprint.points().len(), 5);
    assert_relative_eq!(report.roof_level.elevation, feet(4125.0));
}

#[test]
fn walls_span_base_to_top_level() {
    let mut doc = MemoryDocument::with_default_catalog();
    let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();

    let walls = report.walls.committed(&doc).unwrap();
    for (i, wall) in walls.iter().enumerate() {
        let next = &walls[(i + 1) % walls.len()];
        assert_relative_eq!(wall.baseline.end, next.baseline.start);
        assert_relative_eq!(wall.height().unwrap(), feet(4000.0), epsilon = 1e-9);
        assert_relative_eq!(wall.thickness, feet(200.0));
    }
}

#[test]
fn single_door_at_midpoint_of_first_wall() {
    let mut doc = MemoryDocument::with_default_catalog();
    let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();

    let first = doc.wall(report.walls.door_host()).unwrap();
    assert_eq!(report.door.kind, OpeningKind::Door);
    assert_eq!(report.door.host_wall, first.key);
    assert_relative_eq!(report.door.insertion_point, first.baseline.midpoint());
    assert_eq!(report.door.host_level, first.base_level.key);

    match doc.element(report.door.element) {
        Some(Element::Component { host_wall, .. }) => assert_eq!(*host_wall, first.key),
        other => panic!("door element missing: {:?}", other),
    }
}

#[test]
fn windows_skip_door_wall_and_sit_a_quarter_up() {
    let mut doc = MemoryDocument::with_default_catalog();
    let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();

    assert_eq!(report.windows.len(), report.walls.len() - 1);
    for window in &report.windows {
        assert_eq!(window.kind, OpeningKind::Window);
        assert_ne!(window.host_wall, report.walls.door_host());

        let wall = doc.wall(window.host_wall).unwrap();
        let mid = wall.baseline.midpoint();
        assert_relative_eq!(window.insertion_point.x, mid.x, epsilon = 1e-9);
        assert_relative_eq!(window.insertion_point.y, mid.y, epsilon = 1e-9);
        assert_relative_eq!(
            window.insertion_point.z,
            wall.height().unwrap() / 4.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn flat_roof_wraps_outer_wall_faces() {
    let mut doc = MemoryDocument::with_default_catalog();
    let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();

    let walls = report.walls.committed(&doc).unwrap();
    let dt = walls[0].thickness / 2.0;
    let segments = report.flat_roof.segments();
    assert_eq!(segments.len(), 4);
    for (segment, wall) in segments.iter().zip(&walls) {
        assert!(segment.is_parallel_to(&wall.baseline));
        assert_relative_eq!(wall.baseline.distance_to_line(&segment.start), dt, epsilon = 1e-9);
    }
    assert_relative_eq!(segments[3].end, segments[0].start);

    let top = doc.resolve_level("Level 2").unwrap();
    match doc.element(report.flat_roof_element) {
        Some(Element::FootprintRoof { level, .. }) => assert_eq!(*level, top.key),
        other => panic!("flat roof missing: {:?}", other),
    }
}

#[test]
fn gable_roof_is_symmetric_with_square_cut_eaves() {
    let mut doc = MemoryDocument::with_default_catalog();
    let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();

    let gable = &report.gable_roof;
    assert_relative_eq!(gable.profile.apex().z, report.roof_level.elevation + RIDGE_RISE);
    assert_relative_eq!(gable.extrusion_start, -gable.extrusion_end);
    assert_relative_eq!(gable.curve_start, -gable.curve_end);
    assert_relative_eq!(gable.extrusion_end, feet(5000.0) + feet(100.0), epsilon = 1e-9);

    match doc.element(report.gable_roof_element) {
        Some(Element::ExtrusionRoof {
            level, eave_cut, ..
        }) => {
            assert_eq!(*level, report.roof_level.key);
            assert_eq!(*eave_cut, Some(EaveCutStyle::TwoCutSquare));
        }
        other => panic!("gable roof missing: {:?}", other),
    }
}

#[test]
fn missing_door_type_aborts_before_later_stages() {
    let mut doc = MemoryDocument::with_default_catalog();
    let config = EnvelopeConfig {
        door: TypeSpec::new(ComponentCategory::Doors, "0000 x 0000 mm", "Nonexistent"),
        ..EnvelopeConfig::default()
    };

    let err = build_envelope(&mut doc, &config).unwrap_err();
    match err {
        Error::Resolution { kind, .. } => assert_eq!(kind, ResolutionKind::DoorType),
        other => panic!("unexpected error: {:?}", other),
    }

    // Walls were committed by their own stage; nothing after it exists.
    assert_eq!(doc.wall_count(), 4);
    assert_eq!(doc.elements().count(), 0);
    assert_eq!(doc.levels().len(), 2);
    assert_eq!(doc.committed_transactions(), &["Build walls"]);
}

#[test]
fn missing_window_type_keeps_door_and_creates_no_windows() {
    let mut doc = MemoryDocument::with_default_catalog();
    let config = EnvelopeConfig {
        window: TypeSpec::new(ComponentCategory::Windows, "0000 x 0000 mm", "Nonexistent"),
        ..EnvelopeConfig::default()
    };

    let err = build_envelope(&mut doc, &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolution {
            kind: ResolutionKind::WindowType,
            ..
        }
    ));

    assert_eq!(doc.components(ComponentCategory::Doors).len(), 1);
    assert!(doc.components(ComponentCategory::Windows).is_empty());
    assert_eq!(doc.roof_count(), 0);
    assert_eq!(doc.committed_transactions(), &["Build walls", "Place door"]);
}

#[test]
fn gable_roof_uses_newly_created_level_despite_name_clash() {
    let mut doc = MemoryDocument::with_default_catalog();
    doc.add_level("Level 4", 50.0);

    let report = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();

    assert_relative_eq!(report.roof_level.elevation, feet(4125.0));
    assert_ne!(report.roof_level.name, "Level 4");
    assert_relative_eq!(
        report.gable_roof.profile.apex().z,
        feet(4125.0) + RIDGE_RISE,
        epsilon = 1e-9
    );

    let names: Vec<String> = doc.levels().into_iter().map(|l| l.name).collect();
    let unique: std::collections::HashSet<&String> = names.iter().collect();
    assert_eq!(unique.len(), names.len());

    match doc.element(report.gable_roof_element) {
        Some(Element::ExtrusionRoof { level, .. }) => assert_eq!(*level, report.roof_level.key),
        other => panic!("expected an extrusion roof, got {:?}", other),
    }
}

#[test]
fn missing_roof_type_leaves_openings_and_rolls_back_roof() {
    let mut doc = MemoryDocument::with_default_catalog();
    let config = EnvelopeConfig {
        roof: TypeSpec::new(ComponentCategory::Roofs, "Generic - 400mm", "Basic Roof"),
        ..EnvelopeConfig::default()
    };

    let err = build_envelope(&mut doc, &config).unwrap_err();
    assert!(err.is_resolution());
    assert_eq!(doc.roof_count(), 0);
    assert_eq!(doc.components(ComponentCategory::Windows).len(), 3);

    let roof_type = doc.resolve_type(&default_roof_type()).unwrap();
    assert!(!doc.is_active(roof_type).unwrap());
}

#[test]
fn missing_base_level_fails_without_side_effects() {
    let mut doc = MemoryDocument::with_default_catalog();
    let config = EnvelopeConfig {
        base_level: "Basement".into(),
        ..EnvelopeConfig::default()
    };

    let err = build_envelope(&mut doc, &config).unwrap_err();
    assert!(matches!(
        err,
        Error::Resolution {
            kind: ResolutionKind::Level,
            ..
        }
    ));
    assert_eq!(doc.wall_count(), 0);
    assert!(doc.committed_transactions().is_empty());
}

#[test]
fn degenerate_width_is_rejected() {
    let mut doc = MemoryDocument::with_default_catalog();
    let config = EnvelopeConfig {
        width_mm: 0.0,
        ..EnvelopeConfig::default()
    };

    let err = build_envelope(&mut doc, &config).unwrap_err();
    assert!(matches!(err, Error::GeometryPrecondition { parameter: "width", .. }));
    assert_eq!(doc.wall_count(), 0);
}

#[test]
fn commit_failure_is_surfaced_and_rolled_back() {
    let mut doc = MemoryDocument::with_default_catalog();
    doc.fail_next_commit();

    let err = build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Commit(_)));
    assert_eq!(doc.wall_count(), 0);
    assert!(!envelope_lite::Transactional::in_transaction(&doc));
}

#[test]
fn activation_survives_repeated_builds() {
    let mut doc = MemoryDocument::with_default_catalog();
    build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();
    let door = doc.resolve_type(&default_door_type()).unwrap();
    assert!(doc.is_active(door).unwrap());

    // Types are already active the second time; activation is a no-op.
    build_envelope(&mut doc, &EnvelopeConfig::default()).unwrap();
    assert!(doc.is_active(door).unwrap());
    assert_eq!(doc.wall_count(), 8);
}
