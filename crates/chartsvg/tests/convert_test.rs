use chartsvg::model::Notice;
use chartsvg::{FailureReason, Renderer, Viewport, convert_widget_to_svg};
use serde_json::json;

fn root_size(svg: &str) -> (String, String) {
    let doc = roxmltree::Document::parse(svg).expect("svg parses");
    let root = doc.root_element();
    (
        root.attribute("width").unwrap_or_default().to_string(),
        root.attribute("height").unwrap_or_default().to_string(),
    )
}

#[test]
fn every_widget_kind_converts_at_the_requested_size() {
    let kinds = [
        "line",
        "bar",
        "pie",
        "doughnut",
        "radar",
        "scatter",
        "polarArea",
    ];
    for kind in kinds {
        let widget = json!({
            "widgetType": format!("chart.js/{kind}"),
            "data": {
                "labels": ["Q1", "Q2", "Q3", "Q4"],
                "datasets": [{ "label": "Revenue", "data": [12, 19, 3, 5] }]
            }
        });
        let svg = convert_widget_to_svg(&widget, 640, 400, 100)
            .unwrap_or_else(|e| panic!("{kind}: {e}"));
        assert_eq!(root_size(&svg), ("640".to_string(), "400".to_string()));
    }
}

#[test]
fn props_type_overrides_the_widget_type() {
    let widget = json!({
        "widgetType": "chart/bar",
        "data": {
            "labels": ["a", "b"],
            "datasets": [{ "data": [1, 3] }]
        },
        "props": { "type": "pie" }
    });
    let svg = convert_widget_to_svg(&widget, 300, 300, 72).expect("convert ok");
    assert!(svg.contains(r#"aria-roledescription="pie""#));
}

#[test]
fn dual_axis_widget_renders_both_axis_titles() {
    let widget = json!({
        "widgetType": "chart.js/line",
        "data": {
            "labels": ["Jan", "Feb", "Mar"],
            "datasets": [
                { "label": "Visitors", "data": [120, 150, 90], "borderColor": "var(--color-accent)" },
                { "label": "Conversion", "data": [0.1, 0.2, 0.15], "yAxisID": "y1" }
            ]
        },
        "props": {
            "title": "Traffic",
            "options": {
                "scales": {
                    "y": { "title": { "text": "Visitors" } },
                    "y1": { "title": { "text": "Rate" } }
                }
            }
        }
    });
    let svg = convert_widget_to_svg(&widget, 800, 500, 100).expect("convert ok");
    let doc = roxmltree::Document::parse(&svg).expect("svg parses");
    let texts: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| n.text())
        .collect();
    assert!(texts.contains(&"Traffic"));
    assert!(texts.contains(&"Rate"));
    assert!(svg.contains("#007AFF"));
}

#[test]
fn empty_datasets_are_invalid() {
    let widget = json!({
        "widgetType": "chart.js/line",
        "data": { "labels": ["a"], "datasets": [] }
    });
    let err = convert_widget_to_svg(&widget, 800, 500, 100).unwrap_err();
    assert_eq!(err.reason(), FailureReason::InvalidSpec);
    assert_eq!(err.reason().as_str(), "invalid-spec");
}

#[test]
fn unknown_kinds_are_unsupported() {
    let widget = json!({
        "widgetType": "chart.js/bubble",
        "data": { "labels": ["a"], "datasets": [{ "data": [1] }] }
    });
    let err = convert_widget_to_svg(&widget, 800, 500, 100).unwrap_err();
    assert_eq!(err.reason(), FailureReason::UnsupportedKind);
}

#[test]
fn zero_sized_viewports_are_invalid() {
    let widget = json!({
        "widgetType": "chart.js/bar",
        "data": { "labels": ["a"], "datasets": [{ "data": [1] }] }
    });
    let err = convert_widget_to_svg(&widget, 0, 500, 100).unwrap_err();
    assert_eq!(err.reason(), FailureReason::InvalidSpec);
}

#[test]
fn all_zero_pie_is_a_backend_error() {
    let widget = json!({
        "widgetType": "chart/pie",
        "data": { "labels": ["a", "b"], "datasets": [{ "data": [0, 0] }] }
    });
    let err = convert_widget_to_svg(&widget, 800, 500, 100).unwrap_err();
    assert_eq!(err.reason(), FailureReason::RenderBackendError);
}

#[test]
fn site_config_overrides_the_palette() {
    let renderer = Renderer::new().with_site_config(json!({
        "palette": ["#123456"]
    }));
    let widget = json!({
        "widgetType": "chart.js/bar",
        "data": { "labels": ["a", "b"], "datasets": [{ "data": [1, 2] }] }
    });
    let svg = renderer
        .convert_widget(&widget, Viewport::default())
        .expect("convert ok");
    assert!(svg.contains(r##"fill="#123456""##));
}

#[test]
fn layout_exposes_geometry_for_inspection() {
    let widget = json!({
        "widgetType": "chart/doughnut",
        "data": { "labels": ["a", "b", "c"], "datasets": [{ "data": [1, 1, 2] }] }
    });
    let layout = Renderer::new()
        .layout_widget(&widget, Viewport::default())
        .expect("layout ok");
    let sweeps: Vec<f64> = layout.wedges.iter().map(|w| w.sweep_deg).collect();
    assert_eq!(sweeps, vec![90.0, 90.0, 180.0]);
    assert!(layout.wedges.iter().all(|w| w.inner_radius > 0.0));
}

#[test]
fn translucent_site_backgrounds_stay_opaque() {
    let widget = json!({
        "widgetType": "chart.js/bar",
        "data": { "labels": ["a", "b"], "datasets": [{ "data": [1, 2] }] }
    });
    for background in ["transparent", "var(--color-bg)", "rgba(255,255,255,0.2)"] {
        let renderer = Renderer::new().with_site_config(json!({
            "style": { "background": background }
        }));
        let svg = renderer
            .convert_widget(&widget, Viewport::default())
            .expect("convert ok");
        let doc = roxmltree::Document::parse(&svg).expect("svg parses");
        let rect = doc
            .descendants()
            .find(|n| n.attribute("class") == Some("background"))
            .expect("background rect");
        assert_eq!(rect.attribute("fill"), Some("white"), "{background}");
        assert_eq!(rect.attribute("fill-opacity"), None, "{background}");

        let layout = renderer
            .layout_widget(&widget, Viewport::default())
            .expect("layout ok");
        assert!(layout.notices.contains(&Notice::ColorFallback {
            dataset: None,
            token: background.to_string(),
        }));
    }
}

#[test]
fn themed_site_backgrounds_resolve_to_concrete_colors() {
    let renderer = Renderer::new().with_site_config(json!({
        "style": { "background": "var(--color-secondary)" }
    }));
    let widget = json!({
        "widgetType": "chart.js/bar",
        "data": { "labels": ["a", "b"], "datasets": [{ "data": [1, 2] }] }
    });
    let svg = renderer
        .convert_widget(&widget, Viewport::default())
        .expect("convert ok");
    assert!(svg.contains(r##"class="background" x="0" y="0" width="800" height="500" fill="#6C757D""##));
}

#[test]
fn non_chart_widgets_are_unsupported() {
    let data = json!({ "labels": ["a", "b"], "datasets": [{ "data": [1, 2] }] });
    let missing = json!({ "data": data });
    let table = json!({ "widgetType": "table", "data": data, "props": { "type": "line" } });
    for widget in [missing, table] {
        let err = convert_widget_to_svg(&widget, 800, 500, 100).unwrap_err();
        assert_eq!(err.reason(), FailureReason::UnsupportedKind);
    }
}
