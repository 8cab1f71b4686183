use chartsvg_core::geom::Point;
use chartsvg_core::{AxisId, ChartKind, DrawColor, Viewport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for LayoutPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: DrawColor,
    /// Multiplied with the color's own alpha when emitted.
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: DrawColor,
    pub width: f64,
    pub opacity: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Baseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    Line {
        from: LayoutPoint,
        to: LayoutPoint,
        stroke: Stroke,
    },
    /// Open polyline.
    Polyline {
        points: Vec<LayoutPoint>,
        stroke: Stroke,
    },
    /// Closed polygon.
    Polygon {
        points: Vec<LayoutPoint>,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    /// Annular (or full) sector. Angles are in degrees, counter-clockwise from the positive x
    /// axis; a positive sweep runs counter-clockwise on screen.
    Wedge {
        center: LayoutPoint,
        outer_radius: f64,
        inner_radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        fill: Fill,
        stroke: Option<Stroke>,
    },
    Marker {
        center: LayoutPoint,
        radius: f64,
        fill: Fill,
        stroke: Option<Stroke>,
    },
    /// Unfilled circle (polar grid rings and frames).
    Circle {
        center: LayoutPoint,
        radius: f64,
        stroke: Stroke,
    },
    Text {
        at: LayoutPoint,
        text: String,
        font_size: f64,
        bold: bool,
        anchor: TextAnchor,
        baseline: Baseline,
        /// Clockwise rotation in degrees around `at`.
        rotate: f64,
        color: DrawColor,
    },
}

impl Primitive {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Rect { .. } => "rect",
            Self::Line { .. } => "line",
            Self::Polyline { .. } => "polyline",
            Self::Polygon { .. } => "polygon",
            Self::Wedge { .. } => "wedge",
            Self::Marker { .. } => "marker",
            Self::Circle { .. } => "circle",
            Self::Text { .. } => "text",
        }
    }

    /// Every coordinate and size carried by the primitive.
    pub(crate) fn numbers(&self) -> Vec<f64> {
        let pts = |points: &[LayoutPoint]| -> Vec<f64> {
            points.iter().flat_map(|p| [p.x, p.y]).collect()
        };
        match self {
            Self::Rect {
                x,
                y,
                width,
                height,
                ..
            } => vec![*x, *y, *width, *height],
            Self::Line { from, to, stroke } => vec![from.x, from.y, to.x, to.y, stroke.width],
            Self::Polyline { points, .. } | Self::Polygon { points, .. } => pts(points),
            Self::Wedge {
                center,
                outer_radius,
                inner_radius,
                start_deg,
                sweep_deg,
                ..
            } => vec![
                center.x,
                center.y,
                *outer_radius,
                *inner_radius,
                *start_deg,
                *sweep_deg,
            ],
            Self::Marker { center, radius, .. } | Self::Circle { center, radius, .. } => {
                vec![center.x, center.y, *radius]
            }
            Self::Text {
                at,
                font_size,
                rotate,
                ..
            } => vec![at.x, at.y, *font_size, *rotate],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LegendSwatch {
    Line,
    Box,
    Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub dataset: usize,
    pub axis: AxisId,
    pub color: DrawColor,
    pub swatch: LegendSwatch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesLayout {
    pub label: String,
    pub dataset: usize,
    pub axis: AxisId,
    pub smoothed: bool,
    /// Drawn vertices (spline samples when smoothed).
    pub point_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WedgeLayout {
    pub label: String,
    pub value: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub outer_radius: f64,
    pub inner_radius: f64,
    /// Share of the total in percent (pie and doughnut only).
    pub percent: Option<f64>,
}

/// Non-fatal conditions observed while building a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Notice {
    /// `dataset` is `None` for the chart background.
    ColorFallback {
        dataset: Option<usize>,
        token: String,
    },
    SmoothingUnavailable { dataset: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub kind: ChartKind,
    pub viewport: Viewport,
    pub background: String,
    pub title: Option<String>,
    /// Drawing area (cartesian plot box or the polar bounding square).
    pub plot: Bounds,
    pub primitives: Vec<Primitive>,
    pub legend: Vec<LegendEntry>,
    pub series: Vec<SeriesLayout>,
    pub wedges: Vec<WedgeLayout>,
    pub notices: Vec<Notice>,
}

impl ChartLayout {
    pub fn new(kind: ChartKind, viewport: Viewport, background: impl Into<String>) -> Self {
        let plot = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: f64::from(viewport.width),
            max_y: f64::from(viewport.height),
        };
        Self {
            kind,
            viewport,
            background: background.into(),
            title: None,
            plot,
            primitives: Vec::new(),
            legend: Vec::new(),
            series: Vec::new(),
            wedges: Vec::new(),
            notices: Vec::new(),
        }
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn count(&self, tag: &str) -> usize {
        self.primitives.iter().filter(|p| p.tag() == tag).count()
    }

    /// First non-finite number in the geometry, if any.
    pub(crate) fn first_non_finite(&self) -> Option<(usize, &'static str)> {
        self.primitives.iter().enumerate().find_map(|(idx, p)| {
            p.numbers()
                .iter()
                .any(|v| !v.is_finite())
                .then_some((idx, p.tag()))
        })
    }
}
