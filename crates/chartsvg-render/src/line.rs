use crate::Result;
use crate::builder::{BuildContext, GeometryBuilder};
use crate::cartesian::{CartesianFrame, FrameRequest, ValueAxis, XAxis};
use crate::legend::draw_legend;
use crate::model::{
    ChartLayout, Fill, LayoutPoint, LegendEntry, LegendSwatch, Notice, Primitive, SeriesLayout,
    Stroke,
};
use crate::scale::padded_domain;
use crate::smooth::{smooth, wants_smoothing};
use chartsvg_core::{AxisId, ChartKind, DrawColor};

pub struct LineBuilder;

/// One dataset reduced to drawable runs in data space (x = category index).
struct LineSeries {
    segments: Vec<Vec<(f64, f64)>>,
    markers: Vec<(f64, f64)>,
    smoothed: bool,
    secondary: bool,
    stroke: DrawColor,
    fill: Option<DrawColor>,
}

impl GeometryBuilder for LineBuilder {
    fn kind(&self) -> ChartKind {
        ChartKind::Line
    }

    fn build(&self, ctx: &BuildContext<'_>) -> Result<ChartLayout> {
        let spec = ctx.spec;
        let style = ctx.style;
        let mut layout = ctx.new_layout();
        let dual = spec.has_secondary_axis();

        let mut series = Vec::with_capacity(spec.datasets.len());
        for (idx, ds) in spec.datasets.iter().enumerate() {
            let stroke = ctx.color(&mut layout, ds.colors.stroke(), idx, idx);
            let fill = ds
                .fill
                .then(|| ctx.color(&mut layout, ds.colors.primary(), idx, idx));

            let points: Vec<Option<(f64, f64)>> = ds
                .values
                .iter()
                .enumerate()
                .map(|(i, p)| p.value().map(|v| (i as f64, v)))
                .collect();
            let has_gap = points.iter().any(Option::is_none);

            let mut smoothed = None;
            if wants_smoothing(ds.tension, points.len()) {
                if has_gap {
                    tracing::debug!(dataset = idx, "line has gaps, drawing straight segments");
                } else if !ctx.smoothing.is_available() {
                    tracing::debug!(dataset = idx, "smoothing capability off, drawing straight segments");
                    layout.notices.push(Notice::SmoothingUnavailable {
                        dataset: idx,
                        reason: "smoothing capability is not available".to_string(),
                    });
                } else {
                    let knots: Vec<(f64, f64)> = points.iter().flatten().copied().collect();
                    match smooth(&knots, style.smoothing_density) {
                        Ok(samples) => smoothed = Some(samples),
                        Err(err) => {
                            tracing::warn!(dataset = idx, error = %err, "smoothing failed, drawing straight segments");
                            layout.notices.push(Notice::SmoothingUnavailable {
                                dataset: idx,
                                reason: err.reason,
                            });
                        }
                    }
                }
            }

            let is_smoothed = smoothed.is_some();
            let segments = match smoothed {
                Some(samples) => vec![samples],
                None => split_at_gaps(&points),
            };
            let markers = if is_smoothed {
                Vec::new()
            } else {
                points.iter().flatten().copied().collect()
            };

            series.push(LineSeries {
                segments,
                markers,
                smoothed: is_smoothed,
                secondary: dual && ds.axis == AxisId::Secondary,
                stroke,
                fill,
            });
        }

        let domain_for = |secondary: bool| {
            let on_axis = || series.iter().filter(move |s| s.secondary == secondary);
            let include_zero = on_axis().any(|s| s.fill.is_some());
            padded_domain(
                on_axis().flat_map(|s| s.segments.iter().flatten().map(|(_, y)| *y)),
                include_zero,
            )
        };

        let frame = CartesianFrame::draw(
            ctx,
            &mut layout,
            &FrameRequest {
                x: XAxis::Category(&spec.labels),
                y: ValueAxis {
                    domain: domain_for(false),
                    title: spec.options.axis_titles.get(AxisId::Primary),
                },
                y2: dual.then(|| ValueAxis {
                    domain: domain_for(true),
                    title: spec.options.axis_titles.get(AxisId::Secondary),
                }),
                grid_x: true,
            },
        );

        // Fills sit underneath every line.
        for s in &series {
            let Some(fill) = &s.fill else {
                continue;
            };
            for seg in s.segments.iter().filter(|seg| seg.len() > 1) {
                let mut poly: Vec<LayoutPoint> = seg
                    .iter()
                    .map(|(x, y)| frame.point(*x, *y, s.secondary))
                    .collect();
                let (first_x, _) = seg[0];
                let (last_x, _) = seg[seg.len() - 1];
                poly.push(frame.point(last_x, 0.0, s.secondary));
                poly.push(frame.point(first_x, 0.0, s.secondary));
                layout.push(Primitive::Polygon {
                    points: poly,
                    fill: Some(Fill {
                        color: fill.clone(),
                        opacity: style.line_fill_opacity,
                    }),
                    stroke: None,
                });
            }
        }

        for s in &series {
            let stroke = Stroke {
                color: s.stroke.clone(),
                width: style.line_width,
                opacity: 1.0,
                dash: Vec::new(),
            };
            for seg in s.segments.iter().filter(|seg| seg.len() > 1) {
                layout.push(Primitive::Polyline {
                    points: seg
                        .iter()
                        .map(|(x, y)| frame.point(*x, *y, s.secondary))
                        .collect(),
                    stroke: stroke.clone(),
                });
            }
            for (x, y) in &s.markers {
                layout.push(Primitive::Marker {
                    center: frame.point(*x, *y, s.secondary),
                    radius: style.line_marker_radius,
                    fill: Fill {
                        color: s.stroke.clone(),
                        opacity: 1.0,
                    },
                    stroke: None,
                });
            }
        }

        for (idx, (ds, s)) in spec.datasets.iter().zip(&series).enumerate() {
            layout.series.push(SeriesLayout {
                label: ds.label.clone(),
                dataset: idx,
                axis: if s.secondary {
                    AxisId::Secondary
                } else {
                    AxisId::Primary
                },
                smoothed: s.smoothed,
                point_count: s.segments.iter().map(Vec::len).sum(),
            });
        }

        if dual || spec.datasets.len() > 1 {
            // Primary entries first, dataset order kept within each axis.
            for secondary in [false, true] {
                for (idx, s) in series.iter().enumerate() {
                    if s.secondary != secondary {
                        continue;
                    }
                    layout.legend.push(LegendEntry {
                        label: spec.datasets[idx].label.clone(),
                        dataset: idx,
                        axis: if secondary {
                            AxisId::Secondary
                        } else {
                            AxisId::Primary
                        },
                        color: s.stroke.clone(),
                        swatch: LegendSwatch::Line,
                    });
                }
            }
            draw_legend(ctx, &mut layout, frame.plot);
        }

        Ok(layout)
    }
}

fn split_at_gaps(points: &[Option<(f64, f64)>]) -> Vec<Vec<(f64, f64)>> {
    let mut out = Vec::new();
    let mut cur = Vec::new();
    for p in points {
        match p {
            Some(p) => cur.push(*p),
            None => {
                if !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
            }
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_runs() {
        let pts = [
            Some((0.0, 1.0)),
            Some((1.0, 2.0)),
            None,
            Some((3.0, 4.0)),
            None,
        ];
        assert_eq!(
            split_at_gaps(&pts),
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(3.0, 4.0)]]
        );
    }
}
