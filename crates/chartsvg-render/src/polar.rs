//! Polar frame shared by radar and polar area charts: rings, spokes and category labels.

use crate::builder::BuildContext;
use crate::model::{Baseline, Bounds, ChartLayout, Primitive, Stroke, TextAnchor};
use crate::scale::{LinearScale, padded_domain, tick_label, ticks};
use chartsvg_core::geom::{Point, point, polar};
use std::f64::consts::TAU;

const RING_COUNT: usize = 5;
/// Radial tick labels sit along this angle, clear of the first spoke.
const RADIAL_LABEL_ANGLE_DEG: f64 = 22.5;

/// `count` equally spaced angles (radians) starting at 0 and running counter-clockwise.
pub fn axis_angles(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| TAU * i as f64 / count.max(1) as f64)
        .collect()
}

pub(crate) struct PolarFrame {
    pub center: Point,
    pub radius: f64,
    pub r: LinearScale,
}

impl PolarFrame {
    /// Sizes the polar area below the title, then draws rings, spokes at `angles` and the
    /// category labels just outside the outer ring.
    pub(crate) fn draw(
        ctx: &BuildContext<'_>,
        layout: &mut ChartLayout,
        angles: &[f64],
        values: impl IntoIterator<Item = f64>,
    ) -> Self {
        let style = ctx.style;
        let pad = style.pad;
        let top = ctx.draw_title(layout);

        let labels = &ctx.spec.labels;
        let label_w = labels
            .iter()
            .map(|l| ctx.text_width(l, style.tick_size, false))
            .fold(0.0, f64::max);
        let label_h = ctx.text_height("Ag", style.tick_size);
        let avail_w = ctx.width() - 2.0 * (label_w + pad * 3.0);
        let avail_h = ctx.height() - top - 2.0 * (label_h + pad * 3.0);
        let fallback = ctx.width().min(ctx.height() - top).max(1.0) * 0.1;
        let radius = (avail_w.min(avail_h) / 2.0).max(fallback);
        let center = point(ctx.width() / 2.0, top + (ctx.height() - top) / 2.0);

        layout.plot = Bounds {
            min_x: center.x - radius,
            min_y: center.y - radius,
            max_x: center.x + radius,
            max_y: center.y + radius,
        };

        let (lo, hi) = padded_domain(values, true);
        let r = LinearScale::new((lo, hi), (0.0, radius));

        let grid = Stroke {
            color: style.grid_color.clone(),
            width: style.grid_width,
            opacity: 1.0,
            dash: Vec::new(),
        };

        let label_angle = RADIAL_LABEL_ANGLE_DEG.to_radians();
        for v in ticks(lo, hi, RING_COUNT).into_iter().filter(|v| *v > lo) {
            let ring = r.map(v);
            layout.push(Primitive::Circle {
                center: center.into(),
                radius: ring,
                stroke: grid.clone(),
            });
            layout.push(ctx.label(
                polar(center, ring, label_angle).into(),
                tick_label(v),
                style.tick_size * 0.9,
                TextAnchor::Start,
                Baseline::Bottom,
            ));
        }

        for (angle, label) in angles.iter().zip(labels) {
            layout.push(Primitive::Line {
                from: center.into(),
                to: polar(center, radius, *angle).into(),
                stroke: grid.clone(),
            });
            let cos = angle.cos();
            let anchor = if cos > 1e-6 {
                TextAnchor::Start
            } else if cos < -1e-6 {
                TextAnchor::End
            } else {
                TextAnchor::Middle
            };
            layout.push(ctx.label(
                polar(center, radius + pad * 2.0, *angle).into(),
                label.clone(),
                style.tick_size,
                anchor,
                Baseline::Middle,
            ));
        }

        layout.push(Primitive::Circle {
            center: center.into(),
            radius,
            stroke: Stroke {
                color: style.axis_color.clone(),
                width: 0.8 * style.px_per_pt,
                opacity: 1.0,
                dash: Vec::new(),
            },
        });

        Self { center, radius, r }
    }

    pub(crate) fn at(&self, angle: f64, value: f64) -> Point {
        polar(self.center, self.r.map(value).max(0.0), angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_start_at_zero_and_are_evenly_spaced() {
        let a = axis_angles(4);
        assert_eq!(a.len(), 4);
        assert_eq!(a[0], 0.0);
        assert!((a[1] - TAU / 4.0).abs() < 1e-12);
        assert!((a[3] - 3.0 * TAU / 4.0).abs() < 1e-12);
    }
}
