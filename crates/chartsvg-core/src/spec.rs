use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Doughnut,
    Radar,
    Scatter,
    PolarArea,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Doughnut,
        ChartKind::Radar,
        ChartKind::Scatter,
        ChartKind::PolarArea,
    ];

    /// Parses a kind tag (`line`, `polarArea`, ...). Tags are matched case-insensitively and
    /// `polar-area` / `polar_area` are accepted for polar area charts.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let normalized = tag.trim().to_ascii_lowercase();
        let kind = match normalized.as_str() {
            "line" => Self::Line,
            "bar" => Self::Bar,
            "pie" => Self::Pie,
            "doughnut" => Self::Doughnut,
            "radar" => Self::Radar,
            "scatter" => Self::Scatter,
            "polararea" | "polar-area" | "polar_area" => Self::PolarArea,
            _ => {
                return Err(Error::UnsupportedKind {
                    kind: tag.trim().to_string(),
                });
            }
        };
        Ok(kind)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Doughnut => "doughnut",
            Self::Radar => "radar",
            Self::Scatter => "scatter",
            Self::PolarArea => "polarArea",
        }
    }

    /// Kinds that only draw the first dataset, one wedge per label.
    pub fn is_wedge_kind(self) -> bool {
        matches!(self, Self::Pie | Self::Doughnut | Self::PolarArea)
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisId {
    #[default]
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DataPoint {
    Value { value: f64 },
    Pair { x: f64, y: f64 },
    Missing,
}

impl DataPoint {
    /// The plotted magnitude; for `{x,y}` pairs this is `y`.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Self::Value { value } => Some(value),
            Self::Pair { y, .. } => Some(y),
            Self::Missing => None,
        }
    }

    /// Scatter coordinates; bare numbers use their zero-based index as `x`.
    pub fn scatter_xy(&self, index: usize) -> Option<(f64, f64)> {
        match *self {
            Self::Value { value } => Some((index as f64, value)),
            Self::Pair { x, y } => Some((x, y)),
            Self::Missing => None,
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Self::Pair { .. })
    }
}

/// A dataset color field: a single token or one token per data item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    One(String),
    Many(Vec<String>),
}

impl ColorValue {
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s.as_str()),
            Self::Many(v) => v.first().map(String::as_str),
        }
    }

    /// Per-item token; only lists carry per-item colors.
    pub fn at(&self, index: usize) -> Option<&str> {
        match self {
            Self::One(_) => None,
            Self::Many(v) => v.get(index).map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSpec {
    pub background: Option<ColorValue>,
    pub border: Option<ColorValue>,
    pub color: Option<ColorValue>,
}

impl ColorSpec {
    /// Dataset color: `backgroundColor`, then `borderColor`, then `color`.
    pub fn primary(&self) -> Option<&str> {
        [&self.background, &self.border, &self.color]
            .into_iter()
            .flatten()
            .find_map(ColorValue::first)
    }

    /// Stroke color for lines and outlines: `borderColor`, then the dataset color.
    pub fn stroke(&self) -> Option<&str> {
        self.border
            .as_ref()
            .and_then(ColorValue::first)
            .or_else(|| self.primary())
    }

    /// Per-slice fill token from a `backgroundColor` list.
    pub fn item(&self, index: usize) -> Option<&str> {
        self.background.as_ref().and_then(|c| c.at(index))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub values: Vec<DataPoint>,
    #[serde(default)]
    pub colors: ColorSpec,
    #[serde(default)]
    pub axis: AxisId,
    #[serde(default)]
    pub fill: bool,
    #[serde(default)]
    pub tension: f64,
}

impl Dataset {
    pub fn new(label: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            label: label.into(),
            values: values
                .into_iter()
                .map(|value| DataPoint::Value { value })
                .collect(),
            colors: ColorSpec::default(),
            axis: AxisId::Primary,
            fill: false,
            tension: 0.0,
        }
    }

    /// Values with gaps and pairs collapsed to magnitudes; gaps count as 0.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|p| p.value().unwrap_or(0.0))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisTitles {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl AxisTitles {
    pub fn get(&self, axis: AxisId) -> Option<&str> {
        match axis {
            AxisId::Primary => self.primary.as_deref(),
            AxisId::Secondary => self.secondary.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub title: Option<String>,
    #[serde(default)]
    pub axis_titles: AxisTitles,
}

/// Target image size in pixels plus the density used to convert points to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            dpi: 100,
        }
    }
}

impl Viewport {
    pub fn new(width: u32, height: u32, dpi: u32) -> Self {
        Self { width, height, dpi }
    }

    /// Pixels per typographic point.
    pub fn px_per_pt(&self) -> f64 {
        f64::from(self.dpi) / 72.0
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.dpi == 0 {
            return Err(Error::invalid("dpi must be a positive integer"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    #[serde(default)]
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub options: RenderOptions,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self {
            kind,
            labels,
            datasets,
            options: RenderOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    /// Structural checks shared by every builder. Anything rejected here never reaches geometry.
    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(Error::invalid("`datasets` must not be empty"));
        }

        if self.kind == ChartKind::Scatter {
            for (idx, ds) in self.datasets.iter().enumerate() {
                if ds.values.is_empty() {
                    return Err(Error::invalid(format!(
                        "scatter dataset {idx} (`{}`) has no points",
                        ds.label
                    )));
                }
            }
        } else {
            if self.labels.is_empty() {
                return Err(Error::invalid(format!(
                    "`labels` must not be empty for {} charts",
                    self.kind
                )));
            }
            for (idx, ds) in self.datasets.iter().enumerate() {
                if ds.values.len() != self.labels.len() {
                    return Err(Error::invalid(format!(
                        "dataset {idx} (`{}`) has {} values but there are {} labels",
                        ds.label,
                        ds.values.len(),
                        self.labels.len()
                    )));
                }
                if ds.values.iter().any(DataPoint::is_pair) {
                    return Err(Error::invalid(format!(
                        "dataset {idx} (`{}`) uses {{x,y}} points, which only scatter charts accept",
                        ds.label
                    )));
                }
            }
        }

        for (idx, ds) in self.datasets.iter().enumerate() {
            if !(0.0..=1.0).contains(&ds.tension) {
                return Err(Error::invalid(format!(
                    "dataset {idx} (`{}`) has tension {} outside [0, 1]",
                    ds.label, ds.tension
                )));
            }
            let non_finite = ds.values.iter().any(|p| match *p {
                DataPoint::Value { value } => !value.is_finite(),
                DataPoint::Pair { x, y } => !x.is_finite() || !y.is_finite(),
                DataPoint::Missing => false,
            });
            if non_finite {
                return Err(Error::invalid(format!(
                    "dataset {idx} (`{}`) contains a non-finite value",
                    ds.label
                )));
            }
        }

        if self.kind == ChartKind::Line
            && self.datasets.iter().all(|ds| ds.axis == AxisId::Secondary)
        {
            return Err(Error::invalid(
                "dual-axis line chart needs at least one dataset on the primary axis",
            ));
        }

        if self.kind.is_wedge_kind() {
            let first = &self.datasets[0];
            if let Some(v) = first.magnitudes().into_iter().find(|v| *v < 0.0) {
                return Err(Error::invalid(format!(
                    "{} charts do not accept negative values (got {v})",
                    self.kind
                )));
            }
        }

        Ok(())
    }

    pub fn has_secondary_axis(&self) -> bool {
        self.kind == ChartKind::Line
            && self
                .datasets
                .iter()
                .any(|ds| ds.axis == AxisId::Secondary)
    }
}
