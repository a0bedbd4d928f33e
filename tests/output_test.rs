use std::collections::BTreeMap;

use tempfile::TempDir;
use transect_overlay::batch::OverlayBatch;
use transect_overlay::footprint::LatLonBox;
use transect_overlay::io::{object_from_json, output_paths, write_outputs, write_report};
use transect_overlay::kml::{document, escape};
use transect_overlay::overlay::GroundOverlayEntry;
use transect_overlay::pose::RawPose;
use transect_overlay::rig::CameraRig;

fn entry() -> GroundOverlayEntry {
    GroundOverlayEntry {
        name: "12".to_string(),
        draw_order: 99,
        href: "/data/a&b/frame000012.jpg".to_string(),
        bounds: LatLonBox {
            north: 1.5,
            south: 1.25,
            east: -3.0,
            west: -3.5,
        },
        rotation: -45.0,
    }
}

#[test]
fn test_escape() {
    assert_eq!(escape("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&apos;");
}

#[test]
fn test_kml_document() {
    let doc = document(&[entry(), entry()]);
    assert!(doc.starts_with("<?xml"));
    assert!(doc.contains("<kml xmlns=\"http://www.opengis.net/kml/2.2\">"));
    assert_eq!(doc.matches("<GroundOverlay>").count(), 2);
    assert_eq!(doc.matches("<Document>").count(), 1);
    assert!(doc.contains("<drawOrder>99</drawOrder>"));
    assert!(doc.contains("<href>/data/a&amp;b/frame000012.jpg</href>"));
    assert!(doc.contains("<north>1.5</north>"));
    assert!(doc.contains("<west>-3.5</west>"));
    assert!(doc.contains("<rotation>-45</rotation>"));
    assert!(doc.contains("<altitudeMode>clampToSeaFloor</altitudeMode>"));
    assert!(doc.trim_end().ends_with("</kml>"));
}

#[test]
fn test_empty_document() {
    let doc = document(&[]);
    assert!(!doc.contains("GroundOverlay"));
    assert!(doc.contains("</Document>"));
}

#[test]
fn test_write_outputs() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("survey");
    let base = base.to_str().unwrap();

    let mut batch = OverlayBatch::new(CameraRig::default());
    for id in [3, 1] {
        batch.ingest(Ok(RawPose::new(id, format!("/data/frame{}.jpg", id))
            .with_field("lat", "1000.00S")
            .with_field("lon", "02000.00E")
            .with_field("altitude", "4.0")
            .with_field("roll", "0")
            .with_field("pitch", "0")
            .with_field("heading", "270")));
    }
    batch.ingest(Ok(RawPose::new(9, "/data/frame9.jpg")));

    let (kml_path, json_path) = write_outputs(base, &batch).unwrap();
    assert_eq!((kml_path.clone(), json_path.clone()), output_paths(base));

    let kml = std::fs::read_to_string(&kml_path).unwrap();
    assert_eq!(kml.matches("<GroundOverlay>").count(), 2);
    assert!(kml.contains("<rotation>90</rotation>"));

    let json: BTreeMap<String, serde_json::Value> = object_from_json(&json_path).unwrap();
    assert_eq!(json.keys().collect::<Vec<_>>(), vec!["1", "3"]);
    assert!((json["1"]["latitude"].as_f64().unwrap() + 10.0).abs() < 1e-12);

    let report_path = dir.path().join("report.json");
    write_report(&report_path, &batch).unwrap();
    let report: serde_json::Value = object_from_json(&report_path).unwrap();
    assert_eq!(report["processed"], 2);
    assert_eq!(report["skipped"], 1);
    assert_eq!(report["diagnostics"][0]["id"], 9);
    assert_eq!(report["rig"]["field_of_view"], 54.0);
}

#[test]
fn test_unwritable_output_is_fatal() {
    let batch = OverlayBatch::new(CameraRig::default());
    let err = write_outputs("/nonexistent-dir/for/sure/out", &batch).unwrap_err();
    assert!(matches!(err, transect_overlay::Error::AggregateWrite { .. }));
}
