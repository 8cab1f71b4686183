use crate::Result;
use crate::builder::{BuildContext, GeometryBuilder};
use crate::legend::draw_legend;
use crate::model::{
    Bounds, ChartLayout, Fill, LayoutPoint, LegendEntry, LegendSwatch, Primitive, SeriesLayout,
    Stroke,
};
use crate::polar::{PolarFrame, axis_angles};
use chartsvg_core::{AxisId, ChartKind};

pub struct RadarBuilder;

/// Closes a radar ring by repeating its first vertex.
pub fn close_ring<T: Clone>(points: &[T]) -> Vec<T> {
    let mut out = points.to_vec();
    if let Some(first) = points.first() {
        out.push(first.clone());
    }
    out
}

impl GeometryBuilder for RadarBuilder {
    fn kind(&self) -> ChartKind {
        ChartKind::Radar
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout> {
        let spec = ctx.spec;
        let style = ctx.style;
        let mut layout = ctx.new_layout();

        let angles = axis_angles(spec.labels.len());
        let magnitudes: Vec<Vec<f64>> = spec.datasets.iter().map(|ds| ds.magnitudes()).collect();
        let frame = PolarFrame::draw(
            ctx,
            &mut layout,
            &angles,
            magnitudes.iter().flatten().copied(),
        );

        for (idx, (ds, values)) in spec.datasets.iter().zip(&magnitudes).enumerate() {
            let color = ctx.color(&mut layout, ds.colors.primary(), idx, idx);
            let ring: Vec<LayoutPoint> = angles
                .iter()
                .zip(values)
                .map(|(a, v)| frame.at(*a, *v).into())
                .collect();
            let closed = close_ring(&ring);

            layout.push(Primitive::Polygon {
                points: ring.clone(),
                fill: Some(Fill {
                    color: color.clone(),
                    opacity: style.radar_fill_opacity,
                }),
                stroke: None,
            });
            layout.push(Primitive::Polyline {
                points: closed.clone(),
                stroke: Stroke {
                    color: color.clone(),
                    width: style.radar_line_width,
                    opacity: 1.0,
                    dash: Vec::new(),
                },
            });
            for p in &ring {
                layout.push(Primitive::Marker {
                    center: *p,
                    radius: style.radar_marker_radius,
                    fill: Fill {
                        color: color.clone(),
                        opacity: 1.0,
                    },
                    stroke: None,
                });
            }

            layout.series.push(SeriesLayout {
                label: ds.label.clone(),
                dataset: idx,
                axis: AxisId::Primary,
                smoothed: false,
                point_count: closed.len(),
            });
            if spec.datasets.len() > 1 {
                layout.legend.push(LegendEntry {
                    label: ds.label.clone(),
                    dataset: idx,
                    axis: AxisId::Primary,
                    color,
                    swatch: LegendSwatch::Line,
                });
            }
        }

        let area = Bounds {
            min_x: 0.0,
            min_y: frame.center.y - frame.radius,
            max_x: ctx.width(),
            max_y: ctx.height(),
        };
        draw_legend(ctx, &mut layout, area);
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rings_repeat_the_first_vertex() {
        assert_eq!(close_ring(&[1, 2, 3]), vec![1, 2, 3, 1]);
        assert!(close_ring::<i32>(&[]).is_empty());
    }
}
