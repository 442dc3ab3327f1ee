use std::fs;

use approx::assert_abs_diff_eq;
use adapter_engine::{
    design, flat_pattern_spec, resolve_spec, DesignRequest, EngineError, FlatOptions, LoftMode,
};
use adapter_types::{AdapterSpec, DuctOpening, LoftOptions, PartialAdapterSpec, PartialDuct, UnitTarget};
use curb_kernel::geometry::point::{Point2d, Point3d};
use curb_kernel::geometry::primitives::centered_rectangle;
use curb_kernel::{
    build_adapter, build_advanced_adapter, build_flat_pattern, validate_geometry, FlatPart, OperationError,
};
use fab_export::{build_bom, mesh_to_gcode, write_export_batch, BomConfig, ExportManifest, ToolpathConfig};

// ── Helper Functions ─────────────────────────────────────────────────────

fn straight() -> AdapterSpec {
    AdapterSpec::straight(90.0, 50.0, 18.0)
}

fn tapered() -> AdapterSpec {
    straight().with_top(60.0, 30.0)
}

fn target() -> UnitTarget {
    UnitTarget {
        length: Some(80.0),
        width: Some(45.0),
        supply: DuctOpening::at(25.0, 20.0),
        ret: DuctOpening::at(65.0, 30.0),
    }
}

// ── Scenarios ────────────────────────────────────────────────────────────

#[test]
fn test_scenario_straight_90x50x18() {
    let mesh = build_adapter(&straight()).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 12);

    let top = &mesh.vertices[4..];
    assert_eq!(top[0], Point3d::new(0.0, 0.0, 18.0));
    assert_eq!(top[2], Point3d::new(90.0, 50.0, 18.0));
    let cx = top.iter().map(|v| v.x).sum::<f64>() / 4.0;
    let cy = top.iter().map(|v| v.y).sum::<f64>() / 4.0;
    assert_eq!((cx, cy), (45.0, 25.0));
    for i in 0..4 {
        assert_eq!((mesh.vertices[i].x, mesh.vertices[i].y), (top[i].x, top[i].y));
    }
}

#[test]
fn test_scenario_taper_90x50_to_60x30() {
    let mesh = build_adapter(&tapered()).unwrap();
    assert_eq!(
        &mesh.vertices[4..],
        &[
            Point3d::new(15.0, 10.0, 18.0),
            Point3d::new(75.0, 10.0, 18.0),
            Point3d::new(75.0, 40.0, 18.0),
            Point3d::new(15.0, 40.0, 18.0),
        ]
    );
}

// ── Testable properties ──────────────────────────────────────────────────

#[test]
fn test_top_corners_symmetric_about_base_center() {
    let mesh = build_adapter(&tapered()).unwrap();
    let (cx, cy) = (45.0, 25.0);
    let top = &mesh.vertices[4..];
    // Opposite corners mirror through the center.
    assert_eq!(top[0].x + top[2].x, 2.0 * cx);
    assert_eq!(top[0].y + top[2].y, 2.0 * cy);
    assert_eq!(top[1].x + top[3].x, 2.0 * cx);
    assert_eq!(top[1].y + top[3].y, 2.0 * cy);
}

#[test]
fn test_wall_at_exactly_45_degrees_does_not_warn() {
    // Corner edges run sqrt(200) horizontally, so H = sqrt(200) is 45°.
    let h = 200.0f64.sqrt();
    let spec = AdapterSpec::straight(40.0, 40.0, h).with_top(20.0, 20.0);
    let report = validate_geometry(&build_adapter(&spec).unwrap());
    assert!((report.max_slope - 45.0).abs() < 1e-9, "max slope {}", report.max_slope);
    assert!(!report.exceeds_max(), "{report}");

    let steeper = AdapterSpec::straight(40.0, 40.0, 20.0).with_top(20.0, 20.0);
    let report = validate_geometry(&build_adapter(&steeper).unwrap());
    assert!(report.max_slope > 45.0);
    assert!(!report.warnings.is_empty());
    assert!(report.exceeds_max());
}

#[test]
fn test_deck_centroid_symmetric_then_shifted() {
    // Tapered deck is 71 x 41 around a 65 x 35 seat. Both ducts cross a
    // seat side, mirrored about the center line, cutting into the band.
    let mut spec = tapered();
    spec.supply = DuctOpening::sized(12.0, 25.0, 4.0, 8.0);
    spec.ret = DuctOpening::sized(78.0, 25.0, 4.0, 8.0);
    let geo = build_flat_pattern(&flat_pattern_spec(&spec, &FlatOptions::default())).unwrap();
    let cog = geo.summary.center_of_gravity;
    assert!(cog.x.abs() < 1e-9 && cog.y.abs() < 1e-9, "{cog:?}");

    // Less of the supply lies on the band, so the left side gets heavier.
    spec.supply.x += 1.0;
    let geo = build_flat_pattern(&flat_pattern_spec(&spec, &FlatOptions::default())).unwrap();
    assert!(geo.summary.center_of_gravity.x < 0.0);
}

#[test]
fn test_default_ducts_inside_seat_leave_deck_balanced() {
    let geo = build_flat_pattern(&flat_pattern_spec(&straight(), &FlatOptions::default())).unwrap();
    let cog = geo.summary.center_of_gravity;
    assert_abs_diff_eq!(cog.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cog.y, 0.0, epsilon = 1e-9);
    assert!(geo.warnings.is_empty(), "{:?}", geo.warnings);
    assert_eq!(geo.part("DECK").unwrap().holes.len(), 1);
}

#[test]
fn test_advanced_two_segment_endpoints_exact() {
    let curb = straight().base_footprint();
    let opts = LoftOptions::default().with_segments(2);
    let mesh = build_advanced_adapter(&curb, Some(&target()), 18.0, &opts).unwrap();

    assert_eq!(&mesh.vertices[0..4], &centered_rectangle(45.0, 25.0, 90.0, 50.0, 0.0)[..]);
    assert_eq!(&mesh.vertices[8..12], &centered_rectangle(45.0, 25.0, 80.0, 45.0, 18.0)[..]);
    assert_eq!(mesh.vertices[4].z, 9.0);
}

#[test]
fn test_gcode_starts_with_spindle_and_ends_with_program_end() {
    for spec in [straight(), tapered()] {
        let g = mesh_to_gcode(&build_adapter(&spec).unwrap(), &ToolpathConfig::default()).unwrap();
        let commands: Vec<&str> = g.lines().filter(|l| !l.starts_with('(')).collect();
        let modal = ["G21", "G90", "G17"];
        let first_non_modal = commands.iter().find(|c| !modal.contains(c)).unwrap();
        assert!(first_non_modal.starts_with("M3"));
        assert_eq!(*commands.last().unwrap(), "M30");
        assert_eq!(commands.iter().filter(|c| c.starts_with("G1 Z0")).count(), 1);
    }
}

#[test]
fn test_fastener_floor_on_tiny_parts() {
    let tiny = FlatPart::new(
        "TAB",
        vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(0.0, 1.0),
        ],
    );
    let bom = build_bom(&[tiny], &BomConfig::default().with_fastener_spacing(1000.0)).unwrap();
    assert_eq!(bom.fasteners, 4);
    assert_eq!(bom.sheets_required, 1);
}

// ── Resolution ───────────────────────────────────────────────────────────

#[test]
fn test_cli_overrides_then_file() {
    let file: PartialAdapterSpec = serde_json::from_str(
        r#"{
            "model": "RTU-48",
            "length": 90, "width": 50, "height": 18, "flangeHeight": 2,
            "supply": {"x": 22.5, "y": 25},
            "return": {"x": 67.5, "y": 25},
            "steelGauge": 18, "fastenerSpacing": 4, "bendLimit": 80
        }"#,
    )
    .unwrap();
    let cli = PartialAdapterSpec {
        height: Some(24.0),
        steel_gauge: Some(16.0),
        ..PartialAdapterSpec::default()
    };
    let spec = resolve_spec(&[cli, file]).unwrap();
    assert_eq!(spec.height, 24.0);
    assert_eq!(spec.steel_gauge, 16.0);
    assert_eq!(spec.length, 90.0);
    assert_eq!(spec.model.as_deref(), Some("RTU-48"));
}

#[test]
fn test_missing_opening_offset_is_not_defaulted() {
    let partial = PartialAdapterSpec {
        length: Some(90.0),
        width: Some(50.0),
        height: Some(18.0),
        flange_height: Some(2.0),
        supply: PartialDuct {
            y: Some(25.0),
            ..PartialDuct::default()
        },
        ret: PartialDuct {
            x: Some(67.5),
            ..PartialDuct::default()
        },
        steel_gauge: Some(18.0),
        fastener_spacing: Some(4.0),
        bend_limit: Some(80.0),
        ..PartialAdapterSpec::default()
    };
    match resolve_spec(&[partial]) {
        Err(EngineError::MissingFields(fields)) => assert_eq!(fields, vec!["supply.x"]),
        other => panic!("expected MissingFields, got {other:?}"),
    }
}

// ── Design pipeline ──────────────────────────────────────────────────────

#[test]
fn test_design_simple_bundle() {
    let bundle = design(&DesignRequest::new(tapered())).unwrap();
    assert_eq!(bundle.mesh.vertex_count(), 8);
    assert_eq!(bundle.validation.edges_sampled, 24);
    assert_eq!(bundle.geometry.parts.len(), 6);
    assert_eq!(bundle.part_dxfs.len(), 6);
    assert_eq!(bundle.bom.items.len(), 6);
    assert!(bundle.mesh_dxf.ends_with("0\nEOF\n"));
    assert!(bundle.gcode.ends_with("M30\n"));
    assert!(bundle.bom_csv.starts_with("Part,"));
    assert!(bundle.taper.along_length > 0.0);

    // Every stage's advisories are carried through.
    for w in bundle
        .validation
        .warnings
        .iter()
        .chain(&bundle.geometry.warnings)
        .chain(&bundle.bom.warnings)
        .chain(&bundle.airflow.warnings)
    {
        assert!(bundle.advisories.contains(w));
    }
}

#[test]
fn test_design_tapered_deck_keeps_positive_area() {
    let bundle = design(&DesignRequest::new(tapered())).unwrap();
    let deck = &bundle.bom.items[0];
    assert_eq!(deck.part, "DECK");
    // 71 x 41 deck, 65 x 35 seat; the 24 x 20 return crosses the seat's
    // right side and takes a 2 x 20 strip of the band with it.
    assert_abs_diff_eq!(deck.area_sq_in, 71.0 * 41.0 - 65.0 * 35.0 - 40.0, epsilon = 1e-9);
    assert!(bundle.bom.items.iter().all(|i| i.area_sq_in > 0.0 && i.weight_lb > 0.0));
    assert!(bundle
        .advisories
        .iter()
        .any(|a| a == "return opening crosses the seat cutout edge"));
    assert!(!bundle.advisories.iter().any(|a| a.starts_with("supply opening")));
}

#[test]
fn test_design_with_thin_flange() {
    let mut spec = straight();
    spec.flange_height = 1.0;
    let bundle = design(&DesignRequest::new(spec)).unwrap();
    // 97 x 57 deck around a 95 x 55 seat; both ducts sit inside the seat.
    assert_abs_diff_eq!(bundle.bom.items[0].area_sq_in, 97.0 * 57.0 - 95.0 * 55.0, epsilon = 1e-9);
    let cog = bundle.geometry.summary.center_of_gravity;
    assert_abs_diff_eq!(cog.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(cog.y, 0.0, epsilon = 1e-9);
    assert!(bundle.geometry.warnings.is_empty(), "{:?}", bundle.geometry.warnings);
}

#[test]
fn test_design_uses_spec_gauge_for_bom() {
    let mut spec = tapered();
    spec.steel_gauge = 9.0;
    let heavy = design(&DesignRequest::new(spec)).unwrap();
    let light = design(&DesignRequest::new(tapered())).unwrap();
    assert!((heavy.bom.total_weight_lb - 2.0 * light.bom.total_weight_lb).abs() < 1e-9);
}

#[test]
fn test_design_advanced_mode() {
    let request = DesignRequest::new(straight()).with_mode(LoftMode::Advanced {
        target: Some(target()),
        options: LoftOptions::default().with_segments(3),
    });
    let bundle = design(&request).unwrap();
    assert!(bundle.mesh.vertex_count() > 8);
    assert!(bundle.mesh.check_indices().is_ok());
    // Toolpath still traces the curb rectangle.
    assert!(bundle.gcode.contains("G1 X90.000 Y50.000 F800\n"));
}

#[test]
fn test_design_advanced_without_target_fails() {
    let request = DesignRequest::new(straight()).with_mode(LoftMode::Advanced {
        target: None,
        options: LoftOptions::default(),
    });
    assert!(matches!(
        design(&request),
        Err(EngineError::Operation(OperationError::MissingTarget))
    ));
}

#[test]
fn test_design_rejects_invalid_spec() {
    let mut spec = straight();
    spec.width = -5.0;
    assert!(matches!(
        design(&DesignRequest::new(spec)),
        Err(EngineError::InvalidField { field: "width", .. })
    ));
}

#[test]
fn test_bundle_writes_complete_batch() {
    let mut spec = tapered();
    spec.model = Some("RTU-48".to_string());
    let bundle = design(&DesignRequest::new(spec)).unwrap();
    let batch = bundle.to_export_batch().unwrap();

    let dir = std::env::temp_dir().join(format!("adapter-engine-batch-{}", std::process::id()));
    let manifest = write_export_batch(&dir, &batch).unwrap();
    assert_eq!(manifest.label.as_deref(), Some("RTU-48"));
    assert_eq!(manifest.files.len(), 1 + 6 + 1 + 1 + 1);
    assert!(dir.join("parts/DECK.dxf").exists());
    assert!(dir.join("adapter.nc").exists());

    let report: serde_json::Value = serde_json::from_str(&fs::read_to_string(dir.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["spec"]["length"], 90.0);
    assert!(report["advisories"].is_array());

    assert_eq!(ExportManifest::load(&dir).unwrap(), manifest);
    fs::remove_dir_all(&dir).unwrap();
}
