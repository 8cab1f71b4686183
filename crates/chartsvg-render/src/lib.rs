#![forbid(unsafe_code)]

pub mod backend;
pub mod bar;
pub mod builder;
pub(crate) mod cartesian;
pub(crate) mod legend;
pub mod line;
pub mod model;
pub mod pie;
pub mod polar;
pub mod polar_area;
pub mod radar;
pub mod registry;
pub mod scale;
pub mod scatter;
pub mod smooth;
pub mod style;
pub mod svg;
pub mod text;

use crate::builder::BuildContext;
use crate::model::{ChartLayout, Notice};
use crate::smooth::SmoothingCapability;
use crate::style::Style;
use crate::svg::SvgRenderOptions;
use crate::text::{DeterministicTextMeasurer, TextMeasurer};
use chartsvg_core::{ChartConfig, ChartSpec, ColorResolver, DrawColor, FailureReason, Viewport};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Spec(#[from] chartsvg_core::Error),
    #[error("render backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
            source: None,
        }
    }

    pub fn reason(&self) -> FailureReason {
        match self {
            Self::Spec(err) => err.reason(),
            Self::Backend { .. } => FailureReason::RenderBackendError,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub smoothing: SmoothingCapability,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
            smoothing: SmoothingCapability::detect(),
        }
    }
}

impl std::fmt::Debug for LayoutOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutOptions")
            .field("smoothing", &self.smoothing)
            .finish_non_exhaustive()
    }
}

const OPAQUE_BACKGROUND: &str = "white";

/// Resolves the configured background to an opaque paint.
///
/// Tokens that fail to resolve, or that resolve to a translucent color, fall back to white and
/// are returned alongside.
fn resolve_background(
    colors: &ColorResolver,
    token: Option<&str>,
) -> (DrawColor, Option<String>) {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return (DrawColor::literal(OPAQUE_BACKGROUND), None);
    };
    let res = colors.resolve_detailed(Some(token), 0);
    if res.fallback.is_none() && is_opaque(&res.color) {
        (res.color, None)
    } else {
        (DrawColor::literal(OPAQUE_BACKGROUND), Some(token.to_string()))
    }
}

fn is_opaque(color: &DrawColor) -> bool {
    match color {
        DrawColor::Rgba { a, .. } => *a >= 1.0,
        DrawColor::Literal { value } => {
            let value = value.to_ascii_lowercase();
            match value.strip_prefix('#') {
                Some(hex) if hex.len() == 4 => hex.ends_with('f'),
                Some(hex) if hex.len() == 8 => hex.ends_with("ff"),
                Some(_) => true,
                None => !matches!(value.as_str(), "transparent" | "none" | "currentcolor"),
            }
        }
    }
}

/// Validates `spec` and computes its drawing primitives with the builder registered for its
/// kind.
pub fn layout_chart(
    spec: &ChartSpec,
    viewport: Viewport,
    config: &ChartConfig,
    options: &LayoutOptions,
) -> Result<ChartLayout> {
    viewport.validate()?;
    spec.validate()?;

    backend::initialize(config);
    let style = Style::resolve(config, &viewport);
    let colors = ColorResolver::from_config(config);
    let (background, background_fallback) =
        resolve_background(&colors, config.get_str("style.background"));

    let ctx = BuildContext {
        spec,
        viewport,
        colors: &colors,
        style: &style,
        measurer: options.text_measurer.as_ref(),
        smoothing: options.smoothing,
        background,
        background_fallback,
    };
    let builder = registry::builder_for(spec.kind);
    tracing::debug!(
        kind = %builder.kind(),
        datasets = spec.datasets.len(),
        labels = spec.labels.len(),
        width = viewport.width,
        height = viewport.height,
        dpi = viewport.dpi,
        "building chart geometry"
    );

    let built = catch_unwind(AssertUnwindSafe(|| builder.build(&ctx))).unwrap_or_else(|panic| {
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "geometry builder panicked".to_string());
        Err(Error::backend(message))
    });
    let layout = match built {
        Ok(layout) => layout,
        Err(err) => {
            if matches!(err, Error::Backend { .. }) {
                tracing::error!(kind = %spec.kind, error = %err, "chart geometry failed");
            }
            return Err(err);
        }
    };

    if let Some((idx, tag)) = layout.first_non_finite() {
        let err = Error::backend(format!("primitive {idx} ({tag}) has non-finite geometry"));
        tracing::error!(kind = %spec.kind, error = %err, "chart geometry failed");
        return Err(err);
    }

    for notice in &layout.notices {
        match notice {
            Notice::ColorFallback {
                dataset: Some(dataset),
                token,
            } => {
                tracing::info!(dataset, token = %token, "color token fell back to default");
            }
            Notice::ColorFallback {
                dataset: None,
                token,
            } => {
                tracing::info!(token = %token, "background fell back to white");
            }
            Notice::SmoothingUnavailable { dataset, reason } => {
                tracing::info!(dataset, reason = %reason, "line drawn without smoothing");
            }
        }
    }

    Ok(layout)
}

/// Lays out `spec` and serializes it as a standalone SVG document.
pub fn render_svg(
    spec: &ChartSpec,
    viewport: Viewport,
    config: &ChartConfig,
    options: &LayoutOptions,
) -> Result<String> {
    let layout = layout_chart(spec, viewport, config, options)?;
    svg::render_chart_svg(&layout, &SvgRenderOptions::default()).inspect_err(|err| {
        tracing::error!(kind = %spec.kind, error = %err, "svg emission failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartsvg_core::{ChartKind, Dataset};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn options_and_errors_cross_threads() {
        assert_send_sync::<LayoutOptions>();
        assert_send_sync::<Error>();
        assert_send_sync::<ChartLayout>();
    }

    #[test]
    fn spec_errors_keep_their_reason() {
        let spec = ChartSpec::new(ChartKind::Bar, vec![], vec![]);
        let err = layout_chart(
            &spec,
            Viewport::default(),
            &ChartConfig::default(),
            &LayoutOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.reason(), FailureReason::InvalidSpec);
    }

    #[test]
    fn backend_errors_report_backend_reason() {
        let spec = ChartSpec::new(
            ChartKind::Pie,
            vec!["a".into(), "b".into()],
            vec![Dataset::new("s", [0.0, 0.0])],
        );
        let err = layout_chart(
            &spec,
            Viewport::default(),
            &ChartConfig::default(),
            &LayoutOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.reason(), FailureReason::RenderBackendError);
    }

    #[test]
    fn backgrounds_resolve_to_opaque_paints() {
        let colors = ColorResolver::default();
        let white = DrawColor::literal("white");

        assert_eq!(resolve_background(&colors, None), (white.clone(), None));
        assert_eq!(
            resolve_background(&colors, Some("#fafafa")),
            (DrawColor::literal("#fafafa"), None)
        );
        for token in ["transparent", "#ffffff00", "#fff8", "rgba(0,0,0,0.5)", "var(--mystery)"] {
            assert_eq!(
                resolve_background(&colors, Some(token)),
                (white.clone(), Some(token.to_string())),
                "{token}"
            );
        }

        let (color, fallback) = resolve_background(&colors, Some("rgb(10,20,30)"));
        assert_eq!(color.paint(), "rgb(10,20,30)");
        assert_eq!(fallback, None);
    }
}
