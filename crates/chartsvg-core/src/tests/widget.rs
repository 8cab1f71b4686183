use crate::*;
use serde_json::json;

#[test]
fn widget_type_selects_kind() {
    assert_eq!(kind_from_widget(Some("chart.js/line"), None).unwrap(), ChartKind::Line);
    assert_eq!(kind_from_widget(Some("chart/radar"), None).unwrap(), ChartKind::Radar);
    assert_eq!(
        kind_from_widget(Some("chart.js/polarArea"), None).unwrap(),
        ChartKind::PolarArea
    );
    assert_eq!(kind_from_widget(Some("chart.js"), None).unwrap(), ChartKind::Bar);
    assert_eq!(kind_from_widget(Some("chart"), None).unwrap(), ChartKind::Bar);
    assert_eq!(
        kind_from_widget(Some("chart.js/bar"), Some("pie")).unwrap(),
        ChartKind::Pie
    );
}

#[test]
fn unknown_widget_kinds_are_unsupported() {
    let err = kind_from_widget(Some("chart.js/bubble"), None).unwrap_err();
    assert_eq!(
        err,
        Error::UnsupportedKind {
            kind: "bubble".to_string()
        }
    );
    let err = kind_from_widget(Some("kind:bubble"), None).unwrap_err();
    assert_eq!(err.reason(), FailureReason::UnsupportedKind);
    let err = kind_from_widget(Some("table"), None).unwrap_err();
    assert_eq!(err.reason(), FailureReason::UnsupportedKind);
}

#[test]
fn non_chart_widgets_are_unsupported_even_with_a_props_type() {
    for widget_type in [None, Some(""), Some("  "), Some("table"), Some("charts/line")] {
        let err = kind_from_widget(widget_type, None).unwrap_err();
        assert_eq!(err.reason(), FailureReason::UnsupportedKind, "{widget_type:?}");
        let err = kind_from_widget(widget_type, Some("line")).unwrap_err();
        assert_eq!(err.reason(), FailureReason::UnsupportedKind, "{widget_type:?}");
    }

    let err = parse_widget(&json!({
        "widgetType": "table",
        "data": { "labels": ["a"], "datasets": [{ "data": [1] }] },
        "props": { "type": "line" }
    }))
    .unwrap_err();
    assert_eq!(err.reason(), FailureReason::UnsupportedKind);

    let err = parse_widget(&json!({
        "data": { "labels": ["a"], "datasets": [{ "data": [1] }] }
    }))
    .unwrap_err();
    assert_eq!(err.reason(), FailureReason::UnsupportedKind);
}

#[test]
fn props_type_overrides_an_unsupported_suffix() {
    assert_eq!(
        kind_from_widget(Some("chart.js/bubble"), Some("line")).unwrap(),
        ChartKind::Line
    );
    assert_eq!(kind_from_widget(Some("chart"), Some("radar")).unwrap(), ChartKind::Radar);
}

#[test]
fn parse_line_widget_with_dual_axis() {
    let widget = json!({
        "widgetType": "chart.js/line",
        "data": {
            "labels": ["Q1", "Q2", 2024],
            "datasets": [
                { "label": "Revenue", "data": [1, 2, 3], "borderColor": "var(--color-accent)", "fill": true, "tension": 0.4 },
                { "data": ["4", null, 6.5], "yAxisID": "y1", "tension": 3 }
            ]
        },
        "props": {
            "title": "Growth",
            "options": { "scales": {
                "y": { "title": { "text": "USD" } },
                "y1": { "title": { "text": "%" } }
            } }
        }
    });
    let spec = parse_widget(&widget).unwrap();
    assert_eq!(spec.kind, ChartKind::Line);
    assert_eq!(spec.labels, vec!["Q1", "Q2", "2024"]);
    assert_eq!(spec.options.title.as_deref(), Some("Growth"));
    assert_eq!(spec.options.axis_titles.get(AxisId::Primary), Some("USD"));
    assert_eq!(spec.options.axis_titles.get(AxisId::Secondary), Some("%"));

    let revenue = &spec.datasets[0];
    assert_eq!(revenue.label, "Revenue");
    assert!(revenue.fill);
    assert_eq!(revenue.tension, 0.4);
    assert_eq!(revenue.colors.stroke(), Some("var(--color-accent)"));

    let second = &spec.datasets[1];
    assert_eq!(second.label, "Series 2");
    assert_eq!(second.axis, AxisId::Secondary);
    assert_eq!(second.tension, 1.0);
    assert_eq!(
        second.values,
        vec![
            DataPoint::Value { value: 4.0 },
            DataPoint::Missing,
            DataPoint::Value { value: 6.5 }
        ]
    );
    spec.validate().unwrap();
}

#[test]
fn parse_scatter_points() {
    let widget = json!({
        "widgetType": "chart.js/scatter",
        "data": { "datasets": [ { "data": [ { "x": 1, "y": 2 }, 7, { "x": 3, "y": null } ] } ] }
    });
    let spec = parse_widget(&widget).unwrap();
    let points = &spec.datasets[0].values;
    assert_eq!(points[0], DataPoint::Pair { x: 1.0, y: 2.0 });
    assert_eq!(points[1].scatter_xy(1), Some((1.0, 7.0)));
    assert_eq!(points[2], DataPoint::Missing);
    spec.validate().unwrap();
}

#[test]
fn missing_data_is_invalid() {
    let err = parse_widget(&json!({ "widgetType": "chart.js/bar" })).unwrap_err();
    assert_eq!(err.reason(), FailureReason::InvalidSpec);

    let err = parse_widget(&json!({
        "widgetType": "chart.js/bar",
        "data": { "labels": ["a"], "datasets": [ { "data": ["abc"] } ] }
    }))
    .unwrap_err();
    assert!(err.to_string().contains("dataset 0 point 0"));

    let err = parse_widget(&json!([1, 2])).unwrap_err();
    assert_eq!(err.reason(), FailureReason::InvalidSpec);
}

#[test]
fn empty_datasets_parse_but_fail_validation() {
    let spec = parse_widget(&json!({
        "widgetType": "chart.js/pie",
        "data": { "labels": ["a"], "datasets": [] }
    }))
    .unwrap();
    assert_eq!(spec.validate().unwrap_err().reason(), FailureReason::InvalidSpec);
}

#[test]
fn per_slice_background_colors_are_kept() {
    let spec = parse_widget(&json!({
        "widgetType": "chart.js/doughnut",
        "data": { "labels": ["a", "b"], "datasets": [ {
            "data": [1, 2],
            "backgroundColor": ["rgba(255,0,0,0.5)", "#00ff00"]
        } ] }
    }))
    .unwrap();
    let colors = &spec.datasets[0].colors;
    assert_eq!(colors.item(0), Some("rgba(255,0,0,0.5)"));
    assert_eq!(colors.item(1), Some("#00ff00"));
}

#[test]
fn plugin_title_is_used_when_props_title_is_missing() {
    let spec = parse_widget(&json!({
        "widgetType": "chart.js/bar",
        "data": { "labels": ["a"], "datasets": [ { "data": [1] } ] },
        "props": { "options": { "plugins": { "title": { "text": "From plugin" } } } }
    }))
    .unwrap();
    assert_eq!(spec.options.title.as_deref(), Some("From plugin"));
}
