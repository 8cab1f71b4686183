//! Vector emitter: serializes a [`ChartLayout`] into a standalone SVG document sized exactly to
//! the layout's viewport.

mod util;

use crate::backend;
use crate::model::{Baseline, ChartLayout, Fill, LayoutPoint, Primitive, Stroke, TextAnchor};
use crate::{Error, Result};
use chartsvg_core::geom::{point, polar};
use std::fmt::Write as _;
use util::{escape_xml, escape_xml_into, fmt, fmt_path, fmt_path_into};

const FULL_CIRCLE_EPSILON_DEG: f64 = 1e-9;

#[derive(Debug, Clone, Default)]
pub struct SvgRenderOptions {
    /// Root element id. Defaults to `chart-<kind>`.
    pub chart_id: Option<String>,
}

pub fn render_chart_svg(layout: &ChartLayout, options: &SvgRenderOptions) -> Result<String> {
    let width = layout.viewport.width;
    let height = layout.viewport.height;
    if width == 0 || height == 0 {
        return Err(Error::backend(format!(
            "cannot emit an empty {width}x{height} image"
        )));
    }
    if let Some((idx, tag)) = layout.first_non_finite() {
        return Err(Error::backend(format!(
            "primitive {idx} ({tag}) has non-finite geometry"
        )));
    }

    let defaults = backend::defaults();
    let kind = layout.kind.tag();
    let chart_id = options
        .chart_id
        .clone()
        .unwrap_or_else(|| format!("chart-{kind}"));

    let mut out = String::with_capacity(256 + layout.primitives.len() * 96);
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" role="img" aria-roledescription="{kind}">"#,
        id = escape_xml(&chart_id),
    );
    if let Some(title) = layout.title.as_deref() {
        out.push_str("<title>");
        escape_xml_into(&mut out, title);
        out.push_str("</title>");
    }
    let _ = write!(
        &mut out,
        r#"<style>text{{font-family:{fonts};}}</style>"#,
        fonts = escape_xml(&defaults.font_family_css()),
    );
    let _ = write!(
        &mut out,
        r#"<rect class="background" x="0" y="0" width="{width}" height="{height}" fill="{bg}"/>"#,
        bg = escape_xml(&layout.background),
    );

    for primitive in &layout.primitives {
        emit_primitive(&mut out, primitive);
    }

    out.push_str("</svg>");
    Ok(out)
}

fn emit_primitive(out: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_path(*x),
                fmt_path(*y),
                fmt_path(*width),
                fmt_path(*height)
            );
            fill_attrs(out, fill.as_ref());
            stroke_attrs(out, stroke.as_ref());
            out.push_str("/>");
        }
        Primitive::Line { from, to, stroke } => {
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt_path(from.x),
                fmt_path(from.y),
                fmt_path(to.x),
                fmt_path(to.y)
            );
            stroke_attrs(out, Some(stroke));
            out.push_str("/>");
        }
        Primitive::Polyline { points, stroke } => {
            out.push_str(r#"<polyline points=""#);
            points_attr(out, points);
            out.push('"');
            fill_attrs(out, None);
            stroke_attrs(out, Some(stroke));
            out.push_str(r#" stroke-linejoin="round" stroke-linecap="round"/>"#);
        }
        Primitive::Polygon {
            points,
            fill,
            stroke,
        } => {
            out.push_str(r#"<polygon points=""#);
            points_attr(out, points);
            out.push('"');
            fill_attrs(out, fill.as_ref());
            stroke_attrs(out, stroke.as_ref());
            out.push_str("/>");
        }
        Primitive::Wedge {
            center,
            outer_radius,
            inner_radius,
            start_deg,
            sweep_deg,
            fill,
            stroke,
        } => {
            out.push_str(r#"<path d=""#);
            wedge_path(
                out,
                *center,
                *outer_radius,
                *inner_radius,
                *start_deg,
                *sweep_deg,
            );
            out.push('"');
            if *inner_radius > 0.0 && *sweep_deg >= 360.0 - FULL_CIRCLE_EPSILON_DEG {
                out.push_str(r#" fill-rule="evenodd""#);
            }
            fill_attrs(out, Some(fill));
            stroke_attrs(out, stroke.as_ref());
            out.push_str("/>");
        }
        Primitive::Marker {
            center,
            radius,
            fill,
            stroke,
        } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                fmt_path(center.x),
                fmt_path(center.y),
                fmt_path(*radius)
            );
            fill_attrs(out, Some(fill));
            stroke_attrs(out, stroke.as_ref());
            out.push_str("/>");
        }
        Primitive::Circle {
            center,
            radius,
            stroke,
        } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                fmt_path(center.x),
                fmt_path(center.y),
                fmt_path(*radius)
            );
            fill_attrs(out, None);
            stroke_attrs(out, Some(stroke));
            out.push_str("/>");
        }
        Primitive::Text {
            at,
            text,
            font_size,
            bold,
            anchor,
            baseline,
            rotate,
            color,
        } => {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" fill="{}""#,
                fmt_path(at.x),
                fmt_path(at.y),
                fmt_path(*font_size),
                escape_xml(&color.paint())
            );
            let alpha = color.alpha();
            if alpha < 1.0 {
                let _ = write!(out, r#" fill-opacity="{}""#, fmt(alpha));
            }
            match anchor {
                TextAnchor::Start => {}
                TextAnchor::Middle => out.push_str(r#" text-anchor="middle""#),
                TextAnchor::End => out.push_str(r#" text-anchor="end""#),
            }
            match baseline {
                Baseline::Bottom => {}
                Baseline::Middle => out.push_str(r#" dominant-baseline="central""#),
                Baseline::Top => out.push_str(r#" dominant-baseline="hanging""#),
            }
            if *bold {
                out.push_str(r#" font-weight="bold""#);
            }
            if *rotate != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    fmt(*rotate),
                    fmt_path(at.x),
                    fmt_path(at.y)
                );
            }
            out.push('>');
            escape_xml_into(out, text);
            out.push_str("</text>");
        }
    }
}

fn points_attr(out: &mut String, points: &[LayoutPoint]) {
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        fmt_path_into(out, p.x);
        out.push(',');
        fmt_path_into(out, p.y);
    }
}

fn fill_attrs(out: &mut String, fill: Option<&Fill>) {
    let Some(fill) = fill else {
        out.push_str(r#" fill="none""#);
        return;
    };
    let _ = write!(out, r#" fill="{}""#, escape_xml(&fill.color.paint()));
    let opacity = (fill.opacity * fill.color.alpha()).clamp(0.0, 1.0);
    if opacity < 1.0 {
        let _ = write!(out, r#" fill-opacity="{}""#, fmt(opacity));
    }
}

fn stroke_attrs(out: &mut String, stroke: Option<&Stroke>) {
    let Some(stroke) = stroke else {
        return;
    };
    let _ = write!(
        out,
        r#" stroke="{}" stroke-width="{}""#,
        escape_xml(&stroke.color.paint()),
        fmt_path(stroke.width)
    );
    let opacity = (stroke.opacity * stroke.color.alpha()).clamp(0.0, 1.0);
    if opacity < 1.0 {
        let _ = write!(out, r#" stroke-opacity="{}""#, fmt(opacity));
    }
    if !stroke.dash.is_empty() {
        out.push_str(r#" stroke-dasharray=""#);
        for (i, d) in stroke.dash.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            fmt_path_into(out, *d);
        }
        out.push('"');
    }
}

/// Path data for a sector. Angles are counter-clockwise on screen, so arcs use sweep-flag 0 on
/// the outer edge and 1 when returning along the inner edge.
fn wedge_path(
    out: &mut String,
    center: LayoutPoint,
    outer: f64,
    inner: f64,
    start_deg: f64,
    sweep_deg: f64,
) {
    let c = point(center.x, center.y);
    let at = |r: f64, deg: f64| polar(c, r, deg.to_radians());
    let pt = |out: &mut String, cmd: &str, p: chartsvg_core::geom::Point| {
        out.push_str(cmd);
        fmt_path_into(out, p.x);
        out.push(',');
        fmt_path_into(out, p.y);
    };
    let arc = |r: f64, large: bool, sweep: bool| {
        format!(
            "A{},{} 0 {} {} ",
            fmt_path(r),
            fmt_path(r),
            u8::from(large),
            u8::from(sweep)
        )
    };

    if sweep_deg >= 360.0 - FULL_CIRCLE_EPSILON_DEG {
        // Two half arcs per ring; the inner ring becomes a hole via even-odd filling.
        pt(out, "M", at(outer, start_deg));
        out.push_str(&arc(outer, true, false));
        pt(out, "", at(outer, start_deg + 180.0));
        out.push(' ');
        out.push_str(&arc(outer, true, false));
        pt(out, "", at(outer, start_deg));
        out.push('Z');
        if inner > 0.0 {
            pt(out, "M", at(inner, start_deg));
            out.push_str(&arc(inner, true, true));
            pt(out, "", at(inner, start_deg + 180.0));
            out.push(' ');
            out.push_str(&arc(inner, true, true));
            pt(out, "", at(inner, start_deg));
            out.push('Z');
        }
        return;
    }

    let end_deg = start_deg + sweep_deg;
    let large = sweep_deg > 180.0;
    if inner > 0.0 {
        pt(out, "M", at(outer, start_deg));
        out.push_str(&arc(outer, large, false));
        pt(out, "", at(outer, end_deg));
        pt(out, "L", at(inner, end_deg));
        out.push_str(&arc(inner, large, true));
        pt(out, "", at(inner, start_deg));
        out.push('Z');
    } else {
        pt(out, "M", c);
        pt(out, "L", at(outer, start_deg));
        out.push_str(&arc(outer, large, false));
        pt(out, "", at(outer, end_deg));
        out.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(outer: f64, inner: f64, start: f64, sweep: f64) -> String {
        let mut s = String::new();
        wedge_path(
            &mut s,
            LayoutPoint { x: 100.0, y: 100.0 },
            outer,
            inner,
            start,
            sweep,
        );
        s
    }

    #[test]
    fn quarter_pie_wedge_runs_counter_clockwise_from_top() {
        assert_eq!(path(10.0, 0.0, 90.0, 90.0), "M100,100L100,90A10,10 0 0 0 90,100Z");
    }

    #[test]
    fn doughnut_wedge_returns_along_inner_edge() {
        assert_eq!(
            path(10.0, 5.0, 90.0, 90.0),
            "M100,90A10,10 0 0 0 90,100L95,100A5,5 0 0 1 100,95Z"
        );
    }

    #[test]
    fn full_circle_is_split_into_half_arcs() {
        let d = path(10.0, 0.0, 90.0, 360.0);
        assert_eq!(d.matches('A').count(), 2);
        assert!(d.starts_with("M100,90"));
    }
}
