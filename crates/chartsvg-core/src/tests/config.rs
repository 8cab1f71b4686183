use crate::*;
use serde_json::json;

#[test]
fn default_config_carries_palette_and_style() {
    let config = ChartConfig::default();
    assert_eq!(config.get_string_list("palette").map(|p| p.len()), Some(8));
    assert_eq!(config.get_str("colors.accent"), Some("#007AFF"));
    assert_eq!(config.get_f64("style.fontSize.title"), Some(14.0));
    assert_eq!(config.f64_or("style.line.fillOpacity", 0.0), 0.3);
    assert_eq!(config.f64_or("style.missing.value", 2.5), 2.5);
}

#[test]
fn deep_merge_keeps_siblings() {
    let mut config = ChartConfig::default();
    config.deep_merge(&json!({ "style": { "line": { "width": 3 } } }));
    assert_eq!(config.get_f64("style.line.width"), Some(3.0));
    assert_eq!(config.get_f64("style.line.markerSize"), Some(6.0));
}

#[test]
fn set_value_creates_intermediate_objects() {
    let mut config = ChartConfig::empty_object();
    config.set_value("style.bar.opacity", json!(0.5));
    assert_eq!(config.get_f64("style.bar.opacity"), Some(0.5));

    let mut scalar = ChartConfig::from_value(json!(3));
    scalar.set_value("a.b", json!(true));
    assert_eq!(scalar.get_bool("a.b"), Some(true));
}
