#![forbid(unsafe_code)]

//! `chartsvg` converts chart widget descriptions into standalone SVG images, headlessly.
//!
//! A widget names its chart kind (`chart.js/line`, `chart/pie`, ...) and carries `labels` and
//! `datasets`. [`convert_widget_to_svg`] parses, validates, lays out and emits it in one call;
//! [`Renderer`] keeps a configuration and options around for repeated conversions.
//!
//! # Features
//!
//! - `smoothing` (default): spline smoothing for line datasets with `tension > 0`
//! - `raster`: PNG output via pure-Rust SVG rasterization (`chartsvg::raster`)

pub use chartsvg_core::*;
pub use chartsvg_render::model;
pub use chartsvg_render::smooth::SmoothingCapability;
pub use chartsvg_render::svg::SvgRenderOptions;
pub use chartsvg_render::text::{DeterministicTextMeasurer, TextMeasurer};
pub use chartsvg_render::{LayoutOptions, layout_chart, render_svg};

#[cfg(feature = "raster")]
pub mod raster;

use crate::model::ChartLayout;
use serde_json::Value;

/// A failed conversion. Every variant maps onto one [`FailureReason`].
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    #[error(transparent)]
    Spec(#[from] chartsvg_core::Error),
    #[error(transparent)]
    Render(#[from] chartsvg_render::Error),
}

impl Failure {
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::Spec(err) => err.reason(),
            Self::Render(err) => err.reason(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Failure>;

/// Bundles a configuration with layout and SVG options for repeated conversions.
///
/// A renderer holds no per-call state; share one across threads freely.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub config: ChartConfig,
    pub layout: LayoutOptions,
    pub svg: SvgRenderOptions,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-merges `site_config` over the built-in defaults (palette, theme tokens, styling).
    ///
    /// Everything is read per render except `style.fontFamilies`, which is installed
    /// process-wide by the first render of any renderer (see
    /// [`chartsvg_render::backend::initialize`]) and is not changed by later overrides.
    pub fn with_site_config(mut self, site_config: Value) -> Self {
        self.config.deep_merge(&site_config);
        self
    }

    pub fn with_layout_options(mut self, layout: LayoutOptions) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_svg_options(mut self, svg: SvgRenderOptions) -> Self {
        self.svg = svg;
        self
    }

    pub fn layout(&self, spec: &ChartSpec, viewport: Viewport) -> Result<ChartLayout> {
        Ok(layout_chart(spec, viewport, &self.config, &self.layout)?)
    }

    /// Renders `spec` into an SVG document sized exactly to `viewport`.
    pub fn convert(&self, spec: &ChartSpec, viewport: Viewport) -> Result<String> {
        let layout = self.layout(spec, viewport)?;
        Ok(chartsvg_render::svg::render_chart_svg(&layout, &self.svg)?)
    }

    pub fn layout_widget(&self, widget: &Value, viewport: Viewport) -> Result<ChartLayout> {
        let spec = parse_widget(widget)?;
        self.layout(&spec, viewport)
    }

    pub fn convert_widget(&self, widget: &Value, viewport: Viewport) -> Result<String> {
        let spec = parse_widget(widget)?;
        self.convert(&spec, viewport)
    }
}

/// Converts one chart widget into SVG with the default configuration.
pub fn convert_widget_to_svg(widget: &Value, width: u32, height: u32, dpi: u32) -> Result<String> {
    Renderer::default().convert_widget(widget, Viewport::new(width, height, dpi))
}
