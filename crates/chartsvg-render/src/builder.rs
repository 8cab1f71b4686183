use crate::Result;
use crate::model::{Baseline, ChartLayout, LayoutPoint, Notice, Primitive, TextAnchor};
use crate::smooth::SmoothingCapability;
use crate::style::Style;
use crate::text::{TextMeasurer, TextStyle};
use chartsvg_core::{ChartKind, ChartSpec, ColorResolver, DrawColor, Viewport};

/// Computes the drawing primitives of one chart kind from a validated spec.
pub trait GeometryBuilder: Send + Sync {
    fn kind(&self) -> ChartKind;

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout>;
}

/// Read-only inputs shared by every builder for one render.
pub struct BuildContext<'a> {
    pub spec: &'a ChartSpec,
    pub viewport: Viewport,
    pub colors: &'a ColorResolver,
    pub style: &'a Style,
    pub measurer: &'a dyn TextMeasurer,
    pub smoothing: SmoothingCapability,
    /// Always opaque.
    pub background: DrawColor,
    /// The configured background token when it could not be used.
    pub background_fallback: Option<String>,
}

impl BuildContext<'_> {
    pub fn width(&self) -> f64 {
        f64::from(self.viewport.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.viewport.height)
    }

    pub fn new_layout(&self) -> ChartLayout {
        let mut layout = ChartLayout::new(self.spec.kind, self.viewport, self.background.paint());
        layout.title = self.spec.options.title.clone();
        if let Some(token) = &self.background_fallback {
            layout.notices.push(Notice::ColorFallback {
                dataset: None,
                token: token.clone(),
            });
        }
        layout
    }

    /// Resolves a color token, recording a notice when it falls back.
    pub fn color(
        &self,
        layout: &mut ChartLayout,
        token: Option<&str>,
        palette_index: usize,
        dataset: usize,
    ) -> DrawColor {
        let res = self.colors.resolve_detailed(token, palette_index);
        if let Some(token) = res.fallback {
            let notice = Notice::ColorFallback {
                dataset: Some(dataset),
                token,
            };
            if !layout.notices.contains(&notice) {
                layout.notices.push(notice);
            }
        }
        res.color
    }

    pub fn text_width(&self, text: &str, font_size: f64, bold: bool) -> f64 {
        let mut style = TextStyle::sized(font_size);
        style.bold = bold;
        self.measurer.measure(text, &style).width
    }

    pub fn text_height(&self, text: &str, font_size: f64) -> f64 {
        self.measurer
            .measure(text, &TextStyle::sized(font_size))
            .height
    }

    /// Draws the chart title centered at the top and returns the y where content may start.
    pub fn draw_title(&self, layout: &mut ChartLayout) -> f64 {
        let top = self.style.pad * 2.0;
        let Some(title) = self.spec.options.title.as_deref() else {
            return top;
        };
        let size = self.style.title_size;
        layout.push(Primitive::Text {
            at: LayoutPoint {
                x: self.width() / 2.0,
                y: top,
            },
            text: title.to_string(),
            font_size: size,
            bold: true,
            anchor: TextAnchor::Middle,
            baseline: Baseline::Top,
            rotate: 0.0,
            color: self.style.text_color.clone(),
        });
        top + self.text_height(title, size) + self.style.pad * 2.0
    }

    pub fn label(
        &self,
        at: LayoutPoint,
        text: impl Into<String>,
        font_size: f64,
        anchor: TextAnchor,
        baseline: Baseline,
    ) -> Primitive {
        Primitive::Text {
            at,
            text: text.into(),
            font_size,
            bold: false,
            anchor,
            baseline,
            rotate: 0.0,
            color: self.style.text_color.clone(),
        }
    }
}
