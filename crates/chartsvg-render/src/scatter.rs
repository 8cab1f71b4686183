use crate::Result;
use crate::builder::{BuildContext, GeometryBuilder};
use crate::cartesian::{CartesianFrame, FrameRequest, ValueAxis, XAxis};
use crate::legend::draw_legend;
use crate::model::{ChartLayout, Fill, LegendEntry, LegendSwatch, Primitive, SeriesLayout, Stroke};
use crate::scale::padded_domain;
use chartsvg_core::{AxisId, ChartKind};

pub struct ScatterBuilder;

impl GeometryBuilder for ScatterBuilder {
    fn kind(&self) -> ChartKind {
        ChartKind::Scatter
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout> {
        let spec = ctx.spec;
        let style = ctx.style;
        let mut layout = ctx.new_layout();

        let points: Vec<Vec<(f64, f64)>> = spec
            .datasets
            .iter()
            .map(|ds| {
                ds.values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, p)| p.scatter_xy(i))
                    .collect()
            })
            .collect();

        let x_domain = padded_domain(points.iter().flatten().map(|(x, _)| *x), false);
        let y_domain = padded_domain(points.iter().flatten().map(|(_, y)| *y), false);

        let frame = CartesianFrame::draw(
            ctx,
            &mut layout,
            &FrameRequest {
                x: XAxis::Linear(x_domain),
                y: ValueAxis {
                    domain: y_domain,
                    title: spec.options.axis_titles.get(AxisId::Primary),
                },
                y2: None,
                grid_x: true,
            },
        );

        let edge = Stroke {
            color: style.scatter_edge.clone(),
            width: style.scatter_edge_width,
            opacity: 1.0,
            dash: Vec::new(),
        };
        for (idx, (ds, pts)) in spec.datasets.iter().zip(&points).enumerate() {
            let color = ctx.color(&mut layout, ds.colors.primary(), idx, idx);
            for (x, y) in pts {
                layout.push(Primitive::Marker {
                    center: frame.point(*x, *y, false),
                    radius: style.scatter_marker_radius,
                    fill: Fill {
                        color: color.clone(),
                        opacity: style.scatter_opacity,
                    },
                    stroke: Some(edge.clone()),
                });
            }
            layout.series.push(SeriesLayout {
                label: ds.label.clone(),
                dataset: idx,
                axis: AxisId::Primary,
                smoothed: false,
                point_count: pts.len(),
            });
            if spec.datasets.len() > 1 {
                layout.legend.push(LegendEntry {
                    label: ds.label.clone(),
                    dataset: idx,
                    axis: AxisId::Primary,
                    color,
                    swatch: LegendSwatch::Marker,
                });
            }
        }

        draw_legend(ctx, &mut layout, frame.plot);
        Ok(layout)
    }
}
