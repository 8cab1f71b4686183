use crate::Result;
use crate::builder::{BuildContext, GeometryBuilder};
use crate::cartesian::{CartesianFrame, FrameRequest, ValueAxis, XAxis};
use crate::legend::draw_legend;
use crate::model::{ChartLayout, Fill, LegendEntry, LegendSwatch, Primitive, SeriesLayout, Stroke};
use crate::scale::padded_domain;
use chartsvg_core::{AxisId, ChartKind};

pub struct BarBuilder;

/// Bar width in category units for `dataset_count` side-by-side bars.
pub fn bar_width(dataset_count: usize) -> f64 {
    if dataset_count > 1 {
        0.8 / dataset_count as f64
    } else {
        0.6
    }
}

/// Offset of dataset `index`'s bar from its category center, in category units.
pub fn bar_offset(index: usize, dataset_count: usize) -> f64 {
    (index as f64 - dataset_count as f64 / 2.0 + 0.5) * bar_width(dataset_count)
}

impl GeometryBuilder for BarBuilder {
    fn kind(&self) -> ChartKind {
        ChartKind::Bar
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout> {
        let spec = ctx.spec;
        let style = ctx.style;
        let mut layout = ctx.new_layout();
        let n = spec.datasets.len();

        let domain = padded_domain(
            spec.datasets
                .iter()
                .flat_map(|ds| ds.values.iter().filter_map(|p| p.value())),
            true,
        );
        let frame = CartesianFrame::draw(
            ctx,
            &mut layout,
            &FrameRequest {
                x: XAxis::Category(&spec.labels),
                y: ValueAxis {
                    domain,
                    title: spec.options.axis_titles.get(AxisId::Primary),
                },
                y2: None,
                grid_x: false,
            },
        );

        let width = bar_width(n);
        let edge = Stroke {
            color: style.bar_edge.clone(),
            width: style.bar_edge_width,
            opacity: 1.0,
            dash: Vec::new(),
        };

        for (idx, ds) in spec.datasets.iter().enumerate() {
            let color = ctx.color(&mut layout, ds.colors.primary(), idx, idx);
            let offset = bar_offset(idx, n);
            let mut drawn = 0usize;
            for (pos, point) in ds.values.iter().enumerate() {
                let Some(value) = point.value() else {
                    continue;
                };
                let fill_color = match ds.colors.item(pos) {
                    Some(token) => ctx.color(&mut layout, Some(token), idx, idx),
                    None => color.clone(),
                };
                let center = pos as f64 + offset;
                let a = frame.point(center - width / 2.0, value, false);
                let b = frame.point(center + width / 2.0, 0.0, false);
                layout.push(Primitive::Rect {
                    x: a.x.min(b.x),
                    y: a.y.min(b.y),
                    width: (b.x - a.x).abs(),
                    height: (b.y - a.y).abs(),
                    fill: Some(Fill {
                        color: fill_color,
                        opacity: style.bar_opacity,
                    }),
                    stroke: Some(edge.clone()),
                });
                drawn += 1;
            }

            layout.series.push(SeriesLayout {
                label: ds.label.clone(),
                dataset: idx,
                axis: AxisId::Primary,
                smoothed: false,
                point_count: drawn,
            });
            if n > 1 {
                layout.legend.push(LegendEntry {
                    label: ds.label.clone(),
                    dataset: idx,
                    axis: AxisId::Primary,
                    color,
                    swatch: LegendSwatch::Box,
                });
            }
        }

        draw_legend(ctx, &mut layout, frame.plot);
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_dataset_bars_are_centered() {
        assert_eq!(bar_width(1), 0.6);
        assert_eq!(bar_offset(0, 1), 0.0);
    }

    #[test]
    fn grouped_bars_center_on_the_tick() {
        assert_eq!(bar_width(2), 0.4);
        assert_eq!(bar_offset(0, 2), -0.2);
        assert_eq!(bar_offset(1, 2), 0.2);
        let w = bar_width(3);
        let offsets: Vec<f64> = (0..3).map(|i| bar_offset(i, 3)).collect();
        assert!((offsets[0] + w).abs() < 1e-12);
        assert!(offsets[1].abs() < 1e-12);
        assert!((offsets[2] - w).abs() < 1e-12);
    }
}
