//! Chart widget JSON (`{ widgetType, data: { labels, datasets }, props }`) to [`ChartSpec`].

use crate::spec::{
    AxisId, AxisTitles, ChartKind, ChartSpec, ColorSpec, ColorValue, DataPoint, Dataset,
    RenderOptions,
};
use crate::{Error, Result};
use serde_json::Value;

const WIDGET_PREFIXES: [&str; 2] = ["chart.js/", "chart/"];
const SECONDARY_AXIS_ID: &str = "y1";

const WIDGET_FAMILIES: [&str; 2] = ["chart.js", "chart"];

/// Resolves the chart kind of a widget.
///
/// The widget type must be a chart widget (`chart`, `chart.js`, or either followed by
/// `/<kind>`); anything else, including a missing widget type, is unsupported. For chart
/// widgets `props.type` wins over the widget type suffix, and a widget type without a suffix
/// defaults to a bar chart.
pub fn kind_from_widget(widget_type: Option<&str>, props_type: Option<&str>) -> Result<ChartKind> {
    let widget_type = widget_type.map(str::trim).unwrap_or_default();
    let suffix = if WIDGET_FAMILIES.contains(&widget_type) {
        None
    } else {
        match WIDGET_PREFIXES
            .iter()
            .find_map(|prefix| widget_type.strip_prefix(prefix))
        {
            Some(tag) => Some(tag),
            None => {
                return Err(Error::UnsupportedKind {
                    kind: widget_type.to_string(),
                });
            }
        }
    };

    match props_type.map(str::trim).filter(|t| !t.is_empty()).or(suffix) {
        Some(tag) => ChartKind::from_tag(tag),
        None => Ok(ChartKind::Bar),
    }
}

pub fn parse_widget(widget: &Value) -> Result<ChartSpec> {
    let Some(obj) = widget.as_object() else {
        return Err(Error::invalid("chart widget must be a JSON object"));
    };

    let props = obj.get("props").filter(|v| !v.is_null());
    if props.is_some_and(|p| !p.is_object()) {
        return Err(Error::invalid("`props` must be an object"));
    }

    let kind = kind_from_widget(
        obj.get("widgetType").and_then(Value::as_str),
        props.and_then(|p| p.get("type")).and_then(Value::as_str),
    )?;

    let Some(data) = obj.get("data").and_then(Value::as_object) else {
        return Err(Error::invalid("missing `data` object"));
    };

    let labels = match data.get("labels") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(label_text).collect(),
        Some(_) => return Err(Error::invalid("`data.labels` must be an array")),
    };

    let datasets = match data.get("datasets") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| parse_dataset(idx, item))
            .collect::<Result<Vec<_>>>()?,
        Some(_) => return Err(Error::invalid("`data.datasets` must be an array")),
    };

    let options = props.map(parse_options).unwrap_or_default();

    Ok(ChartSpec {
        kind,
        labels,
        datasets,
        options,
    })
}

fn label_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(parts) => parts
            .iter()
            .map(label_text)
            .collect::<Vec<_>>()
            .join(" "),
        other => other.to_string(),
    }
}

fn parse_dataset(idx: usize, v: &Value) -> Result<Dataset> {
    let Some(obj) = v.as_object() else {
        return Err(Error::invalid(format!("dataset {idx} must be an object")));
    };

    let label = obj
        .get("label")
        .and_then(|l| match l {
            Value::Null => None,
            other => Some(label_text(other)),
        })
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| format!("Series {}", idx + 1));

    let values = match obj.get("data") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(pos, item)| parse_point(item).map_err(|m| point_error(idx, pos, m)))
            .collect::<Result<Vec<_>>>()?,
        Some(_) => {
            return Err(Error::invalid(format!(
                "dataset {idx} `data` must be an array"
            )));
        }
    };

    let colors = ColorSpec {
        background: color_value(obj.get("backgroundColor")),
        border: color_value(obj.get("borderColor")),
        color: color_value(obj.get("color")),
    };

    let axis = match obj.get("yAxisID").and_then(Value::as_str) {
        Some(SECONDARY_AXIS_ID) => AxisId::Secondary,
        _ => AxisId::Primary,
    };

    let fill = match obj.get("fill") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty() && s != "false",
        Some(Value::Number(_)) | Some(Value::Object(_)) => true,
        Some(Value::Array(_)) => false,
    };

    let tension = obj
        .get("tension")
        .and_then(Value::as_f64)
        .filter(|t| t.is_finite())
        .map(|t| t.clamp(0.0, 1.0))
        .unwrap_or(0.0);

    Ok(Dataset {
        label,
        values,
        colors,
        axis,
        fill,
        tension,
    })
}

fn point_error(dataset: usize, pos: usize, message: String) -> Error {
    Error::invalid(format!("dataset {dataset} point {pos}: {message}"))
}

fn parse_point(v: &Value) -> std::result::Result<DataPoint, String> {
    match v {
        Value::Null => Ok(DataPoint::Missing),
        Value::Number(_) | Value::String(_) => {
            number(v).map(|value| DataPoint::Value { value })
        }
        Value::Object(obj) => {
            let x = obj.get("x").ok_or_else(|| "missing `x`".to_string())?;
            let y = obj.get("y").ok_or_else(|| "missing `y`".to_string())?;
            if y.is_null() {
                return Ok(DataPoint::Missing);
            }
            Ok(DataPoint::Pair {
                x: number(x)?,
                y: number(y)?,
            })
        }
        other => Err(format!("unsupported value {other}")),
    }
}

fn number(v: &Value) -> std::result::Result<f64, String> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
        .ok_or_else(|| format!("expected a number, got {v}"))
}

fn color_value(v: Option<&Value>) -> Option<ColorValue> {
    match v? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| ColorValue::One(s.to_string()))
        }
        Value::Array(items) => {
            let tokens: Vec<String> = items
                .iter()
                .map(|item| item.as_str().map(str::trim).unwrap_or_default().to_string())
                .collect();
            (!tokens.is_empty()).then_some(ColorValue::Many(tokens))
        }
        _ => None,
    }
}

fn parse_options(props: &Value) -> RenderOptions {
    let plugin_title = || {
        props
            .pointer("/options/plugins/title/text")
            .and_then(Value::as_str)
    };
    let title = props
        .get("title")
        .and_then(Value::as_str)
        .or_else(plugin_title)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let axis_title = |axis: &str| {
        props
            .pointer(&format!("/options/scales/{axis}/title/text"))
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    };

    RenderOptions {
        title,
        axis_titles: AxisTitles {
            primary: axis_title("y"),
            secondary: axis_title(SECONDARY_AXIS_ID),
        },
    }
}
