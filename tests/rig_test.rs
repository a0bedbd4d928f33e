use transect_overlay::rig::CameraRig;

#[test]
fn test_default_rig() {
    let rig = CameraRig::default();
    assert_eq!(rig.field_of_view, 54.0);
    assert_eq!((rig.image_width, rig.image_height), (800, 600));
    assert_eq!((rig.offset_x, rig.offset_y), (1.3, 0.0));
    assert!((rig.aspect_ratio() - 0.75).abs() < 1e-12);
    assert!(rig.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let rig: CameraRig = serde_json::from_str(r#"{"field_of_view": 60.0, "offset_y": -0.4}"#).unwrap();
    assert_eq!(rig.field_of_view, 60.0);
    assert_eq!(rig.offset_y, -0.4);
    assert_eq!(rig.image_width, 800);
    assert_eq!(rig.offset_x, 1.3);
}

#[test]
fn test_rig_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("rig.json");
    std::fs::write(&path, r#"{"image_width": 1920, "image_height": 1080}"#).unwrap();
    let rig = CameraRig::from_json_file(path.to_str().unwrap()).unwrap();
    assert_eq!(rig.image_width, 1920);
    assert!((rig.aspect_ratio() - 1080.0 / 1920.0).abs() < 1e-12);

    std::fs::write(&path, r#"{"field_of_view": 180.0}"#).unwrap();
    assert!(CameraRig::from_json_file(path.to_str().unwrap()).is_err());
}

#[test]
fn test_invalid_rigs() {
    let zero_width = CameraRig {
        image_width: 0,
        ..Default::default()
    };
    assert!(zero_width.validate().is_err());

    let bad_offset = CameraRig {
        offset_x: f64::NAN,
        ..Default::default()
    };
    assert!(bad_offset.validate().is_err());

    let no_fov = CameraRig {
        field_of_view: 0.0,
        ..Default::default()
    };
    assert!(no_fov.validate().is_err());
}
