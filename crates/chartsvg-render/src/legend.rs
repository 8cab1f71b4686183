use crate::builder::BuildContext;
use crate::model::{
    Baseline, Bounds, ChartLayout, Fill, LayoutPoint, LegendEntry, LegendSwatch, Primitive,
    Stroke, TextAnchor,
};

/// Draws a framed legend box anchored to the upper-right corner of `area`, listing
/// `layout.legend` in order.
pub(crate) fn draw_legend(ctx: &BuildContext<'_>, layout: &mut ChartLayout, area: Bounds) {
    if layout.legend.is_empty() {
        return;
    }
    let style = ctx.style;
    let size = style.legend_size;
    let pad = style.pad;
    let row_h = size * 1.4;
    let swatch_w = size * 2.0;

    let label_w = layout
        .legend
        .iter()
        .map(|e| ctx.text_width(&e.label, size, false))
        .fold(0.0, f64::max);
    let box_w = pad + swatch_w + pad + label_w + pad * 1.5;
    let box_h = pad + row_h * layout.legend.len() as f64 + pad;
    let x0 = (area.max_x - pad - box_w).max(area.min_x);
    let y0 = area.min_y + pad;

    layout.push(Primitive::Rect {
        x: x0,
        y: y0,
        width: box_w,
        height: box_h,
        fill: Some(Fill {
            color: ctx.background.clone(),
            opacity: style.legend_frame_opacity,
        }),
        stroke: Some(Stroke {
            color: style.legend_frame_color.clone(),
            width: 0.8 * style.px_per_pt,
            opacity: style.legend_frame_opacity,
            dash: Vec::new(),
        }),
    });

    let entries: Vec<LegendEntry> = layout.legend.clone();
    for (row, entry) in entries.into_iter().enumerate() {
        let cy = y0 + pad + row_h * (row as f64 + 0.5);
        let sx = x0 + pad;
        match entry.swatch {
            LegendSwatch::Line => layout.push(Primitive::Line {
                from: LayoutPoint { x: sx, y: cy },
                to: LayoutPoint {
                    x: sx + swatch_w,
                    y: cy,
                },
                stroke: Stroke {
                    color: entry.color.clone(),
                    width: style.line_width,
                    opacity: 1.0,
                    dash: Vec::new(),
                },
            }),
            LegendSwatch::Box => layout.push(Primitive::Rect {
                x: sx + swatch_w * 0.2,
                y: cy - size * 0.35,
                width: swatch_w * 0.6,
                height: size * 0.7,
                fill: Some(Fill {
                    color: entry.color.clone(),
                    opacity: style.bar_opacity,
                }),
                stroke: None,
            }),
            LegendSwatch::Marker => layout.push(Primitive::Marker {
                center: LayoutPoint {
                    x: sx + swatch_w / 2.0,
                    y: cy,
                },
                radius: style.scatter_marker_radius,
                fill: Fill {
                    color: entry.color.clone(),
                    opacity: style.scatter_opacity,
                },
                stroke: None,
            }),
        }
        layout.push(ctx.label(
            LayoutPoint {
                x: sx + swatch_w + pad,
                y: cy,
            },
            entry.label,
            size,
            TextAnchor::Start,
            Baseline::Middle,
        ));
    }
}
