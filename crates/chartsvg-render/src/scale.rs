//! Value scales and tick generation shared by the cartesian and polar builders.

/// Maps a data domain linearly onto a pixel range. The range may be reversed (y axes).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return (r0 + r1) / 2.0;
        }
        r0 + (v - d0) / span * (r1 - r0)
    }
}

/// Extent of `values` widened to a plottable domain: a 5% margin on both sides, optionally
/// forced to include zero, and never empty.
pub fn padded_domain(values: impl IntoIterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if lo == hi {
        // Only reachable with `include_zero` when every value is zero.
        if include_zero {
            return (0.0, 1.0);
        }
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - pad, hi + pad);
    }
    let margin = (hi - lo) * 0.05;
    let lo = if include_zero && lo == 0.0 { lo } else { lo - margin };
    let hi = if include_zero && hi == 0.0 { hi } else { hi + margin };
    (lo, hi)
}

/// "Nice" tick values covering `[start, stop]` (d3-array `ticks` semantics).
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    fn tick_spec(start: f64, stop: f64, count: f64) -> Option<(i64, i64, f64)> {
        if !(count > 0.0) {
            return None;
        }

        let step = (stop - start) / count;
        if !step.is_finite() || step == 0.0 {
            return None;
        }
        let power = step.log10().floor();
        let error = step / 10f64.powf(power);
        let factor = if error >= 50f64.sqrt() {
            10.0
        } else if error >= 10f64.sqrt() {
            5.0
        } else if error >= 2f64.sqrt() {
            2.0
        } else {
            1.0
        };

        let (i1, i2, inc) = if power < 0.0 {
            let inc = 10f64.powf(-power) / factor;
            let mut i1 = (start * inc).round() as i64;
            let mut i2 = (stop * inc).round() as i64;
            if (i1 as f64) / inc < start {
                i1 += 1;
            }
            if (i2 as f64) / inc > stop {
                i2 -= 1;
            }
            (i1, i2, -inc)
        } else {
            let inc = 10f64.powf(power) * factor;
            let mut i1 = (start / inc).round() as i64;
            let mut i2 = (stop / inc).round() as i64;
            if (i1 as f64) * inc < start {
                i1 += 1;
            }
            if (i2 as f64) * inc > stop {
                i2 -= 1;
            }
            (i1, i2, inc)
        };

        if i2 < i1 && (0.5..2.0).contains(&count) {
            return tick_spec(start, stop, count * 2.0);
        }
        if !inc.is_finite() || inc == 0.0 {
            return None;
        }
        Some((i1, i2, inc))
    }

    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let (a, b) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let Some((i1, i2, inc)) = tick_spec(a, b, count as f64) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }

    let mut out: Vec<f64> = (i1..=i2)
        .map(|i| {
            if inc < 0.0 {
                i as f64 / -inc
            } else {
                i as f64 * inc
            }
        })
        .collect();
    if stop < start {
        out.reverse();
    }
    out
}

/// Tick label text: shortest round-trip decimal, without float noise or `-0`.
pub fn tick_label(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let rounded = (v * 1e9).round() / 1e9;
    if rounded.is_finite() {
        v = rounded;
    }
    if v == -0.0 {
        v = 0.0;
    }
    let mut buf = ryu_js::Buffer::new();
    buf.format_finite(v).to_string()
}

/// Percentage label in `%1.1f%%` form.
pub fn percent_label(share: f64) -> String {
    format!("{:.1}%", share * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_nice() {
        assert_eq!(ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(ticks(-3.0, 3.0, 6), vec![-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0]);
        assert_eq!(ticks(10.0, 0.0, 5), vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
        assert_eq!(ticks(2.0, 2.0, 5), vec![2.0]);
    }

    #[test]
    fn tick_labels_are_shortest_round_trip() {
        assert_eq!(tick_label(2.0), "2");
        assert_eq!(tick_label(0.30000000000000004), "0.3");
        assert_eq!(tick_label(-0.0), "0");
        assert_eq!(tick_label(1500.5), "1500.5");
    }

    #[test]
    fn padded_domain_covers_data() {
        assert_eq!(padded_domain([0.0, 10.0], false), (-0.5, 10.5));
        assert_eq!(padded_domain([2.0, 10.0], true), (0.0, 10.5));
        assert_eq!(padded_domain([5.0], false), (4.5, 5.5));
        assert_eq!(padded_domain(std::iter::empty(), false), (0.0, 1.0));
    }

    #[test]
    fn linear_scale_maps_reversed_ranges() {
        let s = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
        assert_eq!(s.map(5.0), 50.0);
    }

    #[test]
    fn percent_labels_have_one_decimal() {
        assert_eq!(percent_label(0.25), "25.0%");
        assert_eq!(percent_label(1.0 / 3.0), "33.3%");
    }
}
