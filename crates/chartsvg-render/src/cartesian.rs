//! Plot frame shared by line, bar and scatter charts: margins, axes, ticks, grid and titles.

use crate::builder::BuildContext;
use crate::model::{Baseline, Bounds, ChartLayout, LayoutPoint, Primitive, Stroke, TextAnchor};
use crate::scale::{LinearScale, tick_label, ticks};

const Y_TICK_COUNT: usize = 6;
const X_TICK_COUNT: usize = 8;

pub(crate) enum XAxis<'a> {
    /// One slot per label, centered on integer positions.
    Category(&'a [String]),
    Linear((f64, f64)),
}

pub(crate) struct ValueAxis<'a> {
    pub domain: (f64, f64),
    pub title: Option<&'a str>,
}

pub(crate) struct FrameRequest<'a> {
    pub x: XAxis<'a>,
    pub y: ValueAxis<'a>,
    pub y2: Option<ValueAxis<'a>>,
    /// Vertical grid lines at x ticks in addition to horizontal ones.
    pub grid_x: bool,
}

pub(crate) struct CartesianFrame {
    pub plot: Bounds,
    pub x: LinearScale,
    pub y: LinearScale,
    pub y2: Option<LinearScale>,
}

struct TickSet {
    values: Vec<f64>,
    labels: Vec<String>,
    max_width: f64,
}

impl TickSet {
    fn linear(ctx: &BuildContext<'_>, domain: (f64, f64), count: usize) -> Self {
        let values = ticks(domain.0, domain.1, count);
        let labels: Vec<String> = values.iter().map(|v| tick_label(*v)).collect();
        let max_width = labels
            .iter()
            .map(|l| ctx.text_width(l, ctx.style.tick_size, false))
            .fold(0.0, f64::max);
        Self {
            values,
            labels,
            max_width,
        }
    }

    fn categories(ctx: &BuildContext<'_>, labels: &[String]) -> Self {
        let max_width = labels
            .iter()
            .map(|l| ctx.text_width(l, ctx.style.tick_size, false))
            .fold(0.0, f64::max);
        Self {
            values: (0..labels.len()).map(|i| i as f64).collect(),
            labels: labels.to_vec(),
            max_width,
        }
    }
}

impl CartesianFrame {
    /// Lays out the frame, draws grid, spines, ticks and axis titles into `layout`, and
    /// records the plot area on it.
    pub(crate) fn draw(
        ctx: &BuildContext<'_>,
        layout: &mut ChartLayout,
        req: &FrameRequest<'_>,
    ) -> Self {
        let style = ctx.style;
        let pad = style.pad;
        let tick_len = 3.5 * style.px_per_pt;
        let tick_h = ctx.text_height("0", style.tick_size);
        let axis_title_h = ctx.text_height("Ag", style.axis_title_size);

        let top = ctx.draw_title(layout) + pad;

        let y_ticks = TickSet::linear(ctx, req.y.domain, Y_TICK_COUNT);
        let y2_ticks = req
            .y2
            .as_ref()
            .map(|axis| TickSet::linear(ctx, axis.domain, Y_TICK_COUNT));

        let (x_ticks, x_domain, rotated) = match &req.x {
            XAxis::Category(labels) => (
                TickSet::categories(ctx, labels),
                (-0.5, labels.len() as f64 - 0.5),
                true,
            ),
            XAxis::Linear(domain) => (TickSet::linear(ctx, *domain, X_TICK_COUNT), *domain, false),
        };

        let side_margin = |ticks: &TickSet, title: Option<&str>| {
            let title_w = if title.is_some() {
                axis_title_h + pad
            } else {
                0.0
            };
            pad * 2.0 + title_w + ticks.max_width + pad + tick_len
        };
        let mut left = side_margin(&y_ticks, req.y.title);
        let right = match (&y2_ticks, &req.y2) {
            (Some(t), Some(axis)) => side_margin(t, axis.title),
            _ => pad * 4.0,
        };

        let theta = style.x_tick_rotation.to_radians();
        let x_label_extent = if rotated {
            x_ticks.max_width * theta.sin().abs() + tick_h * theta.cos().abs()
        } else {
            tick_h
        };
        let bottom = pad * 2.0 + x_label_extent + pad + tick_len;

        // Rotated category labels hang to the left of their tick.
        if rotated && !x_ticks.labels.is_empty() {
            let first_w = ctx.text_width(&x_ticks.labels[0], style.tick_size, false);
            let overhang = first_w * theta.cos().abs();
            let slot = (ctx.width() - left - right) / x_ticks.labels.len() as f64 / 2.0;
            left = left.max(pad + overhang - slot);
        }

        let width = ctx.width();
        let height = ctx.height();
        let left = left.min(width * 0.4);
        let right = right.min(width * 0.4);
        let bottom = bottom.min(height * 0.45);
        let top = top.min(height * 0.35);

        let plot = Bounds {
            min_x: left,
            min_y: top,
            max_x: width - right,
            max_y: height - bottom,
        };
        layout.plot = plot;

        let x = LinearScale::new(x_domain, (plot.min_x, plot.max_x));
        let y = LinearScale::new(req.y.domain, (plot.max_y, plot.min_y));
        let y2 = req
            .y2
            .as_ref()
            .map(|axis| LinearScale::new(axis.domain, (plot.max_y, plot.min_y)));

        let grid = Stroke {
            color: style.grid_color.clone(),
            width: style.grid_width,
            opacity: style.grid_opacity,
            dash: style.grid_dash.clone(),
        };
        let spine = Stroke {
            color: style.axis_color.clone(),
            width: 0.8 * style.px_per_pt,
            opacity: 1.0,
            dash: Vec::new(),
        };

        for v in &y_ticks.values {
            let py = y.map(*v);
            layout.push(Primitive::Line {
                from: LayoutPoint { x: plot.min_x, y: py },
                to: LayoutPoint { x: plot.max_x, y: py },
                stroke: grid.clone(),
            });
        }
        if req.grid_x {
            for v in &x_ticks.values {
                let px = x.map(*v);
                layout.push(Primitive::Line {
                    from: LayoutPoint { x: px, y: plot.min_y },
                    to: LayoutPoint { x: px, y: plot.max_y },
                    stroke: grid.clone(),
                });
            }
        }

        layout.push(Primitive::Rect {
            x: plot.min_x,
            y: plot.min_y,
            width: plot.width(),
            height: plot.height(),
            fill: None,
            stroke: Some(spine.clone()),
        });

        // Y ticks (left) and Y2 ticks (right).
        let y_axes = [
            Some((&y_ticks, y, req.y.title, plot.min_x, -1.0)),
            y2_ticks
                .as_ref()
                .zip(y2)
                .map(|(t, s)| (t, s, req.y2.as_ref().and_then(|a| a.title), plot.max_x, 1.0)),
        ];
        for (ticks, scale, title, spine_x, dir) in y_axes.into_iter().flatten() {
            for (v, label) in ticks.values.iter().zip(&ticks.labels) {
                let py = scale.map(*v);
                layout.push(Primitive::Line {
                    from: LayoutPoint { x: spine_x, y: py },
                    to: LayoutPoint {
                        x: spine_x + dir * tick_len,
                        y: py,
                    },
                    stroke: spine.clone(),
                });
                let anchor = if dir < 0.0 {
                    TextAnchor::End
                } else {
                    TextAnchor::Start
                };
                layout.push(ctx.label(
                    LayoutPoint {
                        x: spine_x + dir * (tick_len + pad),
                        y: py,
                    },
                    label.clone(),
                    style.tick_size,
                    anchor,
                    Baseline::Middle,
                ));
            }
            if let Some(title) = title {
                let offset = tick_len + pad + ticks.max_width + pad + axis_title_h / 2.0;
                layout.push(Primitive::Text {
                    at: LayoutPoint {
                        x: spine_x + dir * offset,
                        y: (plot.min_y + plot.max_y) / 2.0,
                    },
                    text: title.to_string(),
                    font_size: style.axis_title_size,
                    bold: false,
                    anchor: TextAnchor::Middle,
                    baseline: Baseline::Middle,
                    rotate: -90.0,
                    color: style.text_color.clone(),
                });
            }
        }

        // X ticks.
        for (v, label) in x_ticks.values.iter().zip(&x_ticks.labels) {
            let px = x.map(*v);
            layout.push(Primitive::Line {
                from: LayoutPoint { x: px, y: plot.max_y },
                to: LayoutPoint {
                    x: px,
                    y: plot.max_y + tick_len,
                },
                stroke: spine.clone(),
            });
            let at = LayoutPoint {
                x: px,
                y: plot.max_y + tick_len + pad,
            };
            if rotated {
                layout.push(Primitive::Text {
                    at,
                    text: label.clone(),
                    font_size: style.tick_size,
                    bold: false,
                    anchor: TextAnchor::End,
                    baseline: Baseline::Top,
                    rotate: -style.x_tick_rotation,
                    color: style.text_color.clone(),
                });
            } else {
                layout.push(ctx.label(
                    at,
                    label.clone(),
                    style.tick_size,
                    TextAnchor::Middle,
                    Baseline::Top,
                ));
            }
        }

        Self { plot, x, y, y2 }
    }

    pub(crate) fn point(&self, x: f64, y: f64, secondary: bool) -> LayoutPoint {
        let scale = match (secondary, &self.y2) {
            (true, Some(s)) => s,
            _ => &self.y,
        };
        LayoutPoint {
            x: self.x.map(x),
            y: scale.map(y),
        }
    }
}
