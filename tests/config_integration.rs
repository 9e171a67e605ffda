use memscope::config::*;
use memscope::view::Color;
use memscope::{InspectError, PointerWidth};

#[test]
fn test_inspector_config_defaults() {
    let config = InspectorConfig::default();

    assert_eq!(config.memory.default_inner_size, DEFAULT_INNER_SIZE);
    assert_eq!(config.memory.pointer_width, PointerWidth::native());
    assert_eq!(config.layout.icon_width, 16);
    assert_eq!(config.layout.client_width, 1024);
    assert!(config.layout.show_offset);
    assert!(config.layout.show_address);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("memscope.json");

    let mut config = InspectorConfig::default();
    config.memory.pointer_width = PointerWidth::Bits32;
    config.memory.default_inner_size = 128;
    config.colors.value = Color::rgb(0x10, 0x20, 0x30);
    config.layout.show_address = false;
    config.save(&path).unwrap();

    let loaded = InspectorConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = InspectorConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, InspectError::Io(_)));
}

#[test]
fn test_invalid_font_rejected() {
    let err = InspectorConfig::from_json_str(r#"{ "layout": { "font": { "width": 0, "height": 16 } } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("font metrics must be positive"));
}
