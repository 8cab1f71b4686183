use crate::builder::{BuildContext, GeometryBuilder};
use crate::model::{
    Baseline, Bounds, ChartLayout, Fill, LayoutPoint, Primitive, Stroke, TextAnchor, WedgeLayout,
};
use crate::scale::percent_label;
use crate::{Error, Result};
use chartsvg_core::geom::{point, polar};
use chartsvg_core::ChartKind;

/// The first wedge starts at 12 o'clock; wedges run counter-clockwise.
pub const START_ANGLE_DEG: f64 = 90.0;

pub struct PieBuilder;
pub struct DoughnutBuilder;

impl GeometryBuilder for PieBuilder {
    fn kind(&self) -> ChartKind {
        ChartKind::Pie
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout> {
        layout_pie(ctx, false)
    }
}

impl GeometryBuilder for DoughnutBuilder {
    fn kind(&self) -> ChartKind {
        ChartKind::Doughnut
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout> {
        layout_pie(ctx, true)
    }
}

/// Wedge sweeps in degrees, `360 * v / sum(v)`. `None` when the values do not sum to a
/// positive total.
pub fn wedge_sweeps(values: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().sum();
    if !(total > 0.0) || !total.is_finite() {
        return None;
    }
    Some(values.iter().map(|v| 360.0 * v / total).collect())
}

fn layout_pie(ctx: &BuildContext<'_>, doughnut: bool) -> Result<ChartLayout> {
    let spec = ctx.spec;
    let style = ctx.style;
    let mut layout = ctx.new_layout();
    let ds = &spec.datasets[0];
    let values = ds.magnitudes();

    let Some(sweeps) = wedge_sweeps(&values) else {
        return Err(Error::backend(format!(
            "{} values sum to zero; no wedge can be drawn",
            spec.kind
        )));
    };

    let top = ctx.draw_title(&mut layout);
    let label_w = spec
        .labels
        .iter()
        .map(|l| ctx.text_width(l, style.slice_label_size, false))
        .fold(0.0, f64::max);
    let label_h = ctx.text_height("Ag", style.slice_label_size);
    let avail_w = ctx.width() - 2.0 * (label_w + style.pad * 2.0);
    let avail_h = ctx.height() - top - 2.0 * (label_h + style.pad * 2.0);
    let fallback = ctx.width().min(ctx.height() - top).max(1.0) * 0.1;
    let radius = (avail_w.min(avail_h) / 2.0 / style.pie_label_distance.max(1.0)).max(fallback);

    let center = point(ctx.width() / 2.0, top + (ctx.height() - top) / 2.0);
    let inner_radius = if doughnut {
        radius * style.pie_cutout
    } else {
        0.0
    };
    layout.plot = Bounds {
        min_x: center.x - radius,
        min_y: center.y - radius,
        max_x: center.x + radius,
        max_y: center.y + radius,
    };

    let edge = doughnut.then(|| Stroke {
        color: style.pie_edge.clone(),
        width: style.px_per_pt,
        opacity: 1.0,
        dash: Vec::new(),
    });
    let percent_radius = if doughnut {
        (radius + inner_radius) / 2.0
    } else {
        radius * style.pie_percent_distance
    };

    let mut start = START_ANGLE_DEG;
    for (idx, (value, sweep)) in values.iter().zip(&sweeps).enumerate() {
        let label = spec.labels.get(idx).cloned().unwrap_or_default();
        layout.wedges.push(WedgeLayout {
            label: label.clone(),
            value: *value,
            start_deg: start,
            sweep_deg: *sweep,
            outer_radius: radius,
            inner_radius,
            percent: Some(sweep / 360.0 * 100.0),
        });

        if *sweep > 0.0 {
            let color = ctx.color(&mut layout, ds.colors.item(idx), idx, 0);
            layout.push(Primitive::Wedge {
                center: center.into(),
                outer_radius: radius,
                inner_radius,
                start_deg: start,
                sweep_deg: *sweep,
                fill: Fill {
                    color,
                    opacity: 1.0,
                },
                stroke: edge.clone(),
            });

            let mid = (start + sweep / 2.0).to_radians();
            let label_at = polar(center, radius * style.pie_label_distance, mid);
            let cos = mid.cos();
            let anchor = if cos > 1e-6 {
                TextAnchor::Start
            } else if cos < -1e-6 {
                TextAnchor::End
            } else {
                TextAnchor::Middle
            };
            layout.push(ctx.label(
                label_at.into(),
                label,
                style.slice_label_size,
                anchor,
                Baseline::Middle,
            ));

            let pct_at = polar(center, percent_radius, mid);
            layout.push(Primitive::Text {
                at: LayoutPoint::from(pct_at),
                text: percent_label(sweep / 360.0),
                font_size: style.slice_label_size,
                bold: true,
                anchor: TextAnchor::Middle,
                baseline: Baseline::Middle,
                rotate: 0.0,
                color: style.pie_percent_color.clone(),
            });
        }
        start += sweep;
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweeps_follow_value_share() {
        assert_eq!(wedge_sweeps(&[1.0, 1.0, 2.0]), Some(vec![90.0, 90.0, 180.0]));
        assert_eq!(wedge_sweeps(&[5.0]), Some(vec![360.0]));
        assert_eq!(wedge_sweeps(&[0.0, 0.0]), None);
    }
}
