//! Styling constants resolved from the chart config and converted from points to pixels.

use chartsvg_core::{ChartConfig, DrawColor, Viewport};

#[derive(Debug, Clone)]
pub struct Style {
    pub px_per_pt: f64,
    pub text_color: DrawColor,
    pub axis_color: DrawColor,

    pub title_size: f64,
    pub axis_title_size: f64,
    pub tick_size: f64,
    pub legend_size: f64,
    pub slice_label_size: f64,
    pub x_tick_rotation: f64,
    /// Generic spacing unit (4pt).
    pub pad: f64,

    pub line_width: f64,
    pub line_marker_radius: f64,
    pub line_fill_opacity: f64,

    pub bar_opacity: f64,
    pub bar_edge: DrawColor,
    pub bar_edge_width: f64,

    pub scatter_marker_radius: f64,
    pub scatter_opacity: f64,
    pub scatter_edge: DrawColor,
    pub scatter_edge_width: f64,

    pub radar_line_width: f64,
    pub radar_marker_radius: f64,
    pub radar_fill_opacity: f64,

    pub polar_opacity: f64,
    pub polar_edge: DrawColor,
    pub polar_edge_width: f64,

    pub pie_cutout: f64,
    pub pie_label_distance: f64,
    pub pie_percent_distance: f64,
    pub pie_percent_color: DrawColor,
    pub pie_edge: DrawColor,

    pub grid_color: DrawColor,
    pub grid_opacity: f64,
    pub grid_width: f64,
    pub grid_dash: Vec<f64>,

    pub legend_frame_opacity: f64,
    pub legend_frame_color: DrawColor,

    pub smoothing_density: usize,
}

impl Style {
    pub fn resolve(config: &ChartConfig, viewport: &Viewport) -> Self {
        let ppt = viewport.px_per_pt();
        let pt = |path: &str, fallback: f64| config.f64_or(path, fallback) * ppt;
        let num = |path: &str, fallback: f64| config.f64_or(path, fallback);
        let color = |path: &str, fallback: &str| {
            DrawColor::literal(config.get_str(path).unwrap_or(fallback))
        };

        let line_width = pt("style.line.width", 2.0);
        let grid_width = pt("style.grid.width", 0.8);
        let grid_dash = config
            .get("style.grid.dash")
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_f64())
                    .filter(|v| v.is_finite() && *v > 0.0)
                    .map(|v| v * grid_width)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            px_per_pt: ppt,
            text_color: color("style.textColor", "#262626"),
            axis_color: color("style.axisColor", "#262626"),

            title_size: pt("style.fontSize.title", 14.0),
            axis_title_size: pt("style.fontSize.axisTitle", 11.0),
            tick_size: pt("style.fontSize.tick", 10.0),
            legend_size: pt("style.fontSize.legend", 10.0),
            slice_label_size: pt("style.fontSize.sliceLabel", 10.0),
            x_tick_rotation: num("style.xTickRotation", 45.0),
            pad: 4.0 * ppt,

            line_width,
            // Marker sizes are diameters in points.
            line_marker_radius: pt("style.line.markerSize", 6.0) / 2.0,
            line_fill_opacity: num("style.line.fillOpacity", 0.3),

            bar_opacity: num("style.bar.opacity", 0.8),
            bar_edge: color("style.bar.edgeColor", "white"),
            bar_edge_width: pt("style.bar.edgeWidth", 0.5),

            // Scatter marker size is an area in square points.
            scatter_marker_radius: num("style.scatter.markerArea", 50.0).max(0.0).sqrt() / 2.0
                * ppt,
            scatter_opacity: num("style.scatter.opacity", 0.6),
            scatter_edge: color("style.scatter.edgeColor", "white"),
            scatter_edge_width: pt("style.scatter.edgeWidth", 0.5),

            radar_line_width: pt("style.radar.lineWidth", 2.0),
            radar_marker_radius: pt("style.radar.markerSize", 6.0) / 2.0,
            radar_fill_opacity: num("style.radar.fillOpacity", 0.25),

            polar_opacity: num("style.polarArea.opacity", 0.7),
            polar_edge: color("style.polarArea.edgeColor", "white"),
            polar_edge_width: pt("style.polarArea.edgeWidth", 1.0),

            pie_cutout: num("style.pie.cutout", 0.5).clamp(0.0, 0.95),
            pie_label_distance: num("style.pie.labelDistance", 1.1),
            pie_percent_distance: num("style.pie.percentDistance", 0.6),
            pie_percent_color: color("style.pie.percentColor", "white"),
            pie_edge: color("style.pie.edgeColor", "white"),

            grid_color: color("style.grid.color", "#b0b0b0"),
            grid_opacity: num("style.grid.opacity", 0.3),
            grid_width,
            grid_dash,

            legend_frame_opacity: num("style.legend.frameOpacity", 0.9),
            legend_frame_color: color("style.legend.frameColor", "#cccccc"),

            smoothing_density: num("smoothing.density", 3.0).clamp(1.0, 64.0) as usize,
        }
    }
}
