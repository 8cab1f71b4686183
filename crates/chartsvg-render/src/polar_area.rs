use crate::Result;
use crate::builder::{BuildContext, GeometryBuilder};
use crate::model::{ChartLayout, Fill, Primitive, Stroke, WedgeLayout};
use crate::polar::{PolarFrame, axis_angles};
use chartsvg_core::ChartKind;

pub struct PolarAreaBuilder;

/// Uniform wedge width in degrees for `count` categories.
pub fn wedge_width_deg(count: usize) -> f64 {
    360.0 / count.max(1) as f64
}

impl GeometryBuilder for PolarAreaBuilder {
    fn kind(&self) -> ChartKind {
        ChartKind::PolarArea
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout> {
        let spec = ctx.spec;
        let style = ctx.style;
        let mut layout = ctx.new_layout();
        let ds = &spec.datasets[0];
        let values = ds.magnitudes();

        let angles = axis_angles(spec.labels.len());
        let frame = PolarFrame::draw(ctx, &mut layout, &angles, values.iter().copied());

        let width = wedge_width_deg(spec.labels.len());
        let edge = Stroke {
            color: style.polar_edge.clone(),
            width: style.polar_edge_width,
            opacity: 1.0,
            dash: Vec::new(),
        };

        for (idx, (angle, value)) in angles.iter().zip(&values).enumerate() {
            let radius = frame.r.map(*value).max(0.0);
            // Wedges are centered on their category angle.
            let start_deg = angle.to_degrees() - width / 2.0;
            layout.wedges.push(WedgeLayout {
                label: spec.labels[idx].clone(),
                value: *value,
                start_deg,
                sweep_deg: width,
                outer_radius: radius,
                inner_radius: 0.0,
                percent: None,
            });
            if radius <= 0.0 {
                continue;
            }
            let color = ctx.color(&mut layout, ds.colors.item(idx), idx, 0);
            layout.push(Primitive::Wedge {
                center: frame.center.into(),
                outer_radius: radius,
                inner_radius: 0.0,
                start_deg,
                sweep_deg: width,
                fill: Fill {
                    color,
                    opacity: style.polar_opacity,
                },
                stroke: Some(edge.clone()),
            });
        }

        Ok(layout)
    }
}
