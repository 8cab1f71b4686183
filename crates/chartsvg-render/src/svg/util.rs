// Number and text formatting shared by the SVG emitter.

use std::fmt::Write as _;

/// Attribute number: round-trippable decimal without `-0` or float noise near integers.
pub(super) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

pub(super) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }

    let mut v = if v.abs() < 1e-9 { 0.0 } else { v };
    let nearest = v.round();
    if (v - nearest).abs() < 1e-6 {
        v = nearest;
    }
    if v == -0.0 {
        v = 0.0;
    }

    let _ = write!(out, "{v}");
}

/// Coordinate: at most 3 fractional digits, ties rounded half-up.
pub(super) fn fmt_path(v: f64) -> String {
    let mut out = String::new();
    fmt_path_into(&mut out, v);
    out
}

pub(super) fn fmt_path_into(out: &mut String, v: f64) {
    if !v.is_finite() || v.abs() < 0.0005 {
        out.push('0');
        return;
    }

    let k = (v * 1000.0 + 0.5).floor() as i64;
    if k == 0 {
        out.push('0');
        return;
    }

    let neg = k.is_negative();
    let abs = k.unsigned_abs();
    let int_part = abs / 1000;
    let frac = abs % 1000;
    if neg {
        out.push('-');
    }
    let _ = write!(out, "{int_part}");
    if frac == 0 {
        return;
    }
    let digits = format!("{frac:03}");
    out.push('.');
    out.push_str(digits.trim_end_matches('0'));
}

pub(super) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(super) fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => Some("&amp;"),
            b'<' => Some("&lt;"),
            b'>' => Some("&gt;"),
            b'"' => Some("&quot;"),
            b'\'' => Some("&#39;"),
            _ => None,
        };
        let Some(esc) = esc else {
            continue;
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_drops_noise_and_negative_zero() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(1.0000004), "1");
        assert_eq!(fmt(800.0), "800");
        assert_eq!(fmt(0.25), "0.25");
    }

    #[test]
    fn fmt_path_keeps_three_digits() {
        assert_eq!(fmt_path(f64::INFINITY), "0");
        assert_eq!(fmt_path(0.0004), "0");
        assert_eq!(fmt_path(1.23456), "1.235");
        assert_eq!(fmt_path(1.0), "1");
        assert_eq!(fmt_path(-1.2345), "-1.234");
        assert_eq!(fmt_path(12.5), "12.5");
        assert_eq!(fmt_path(-0.05), "-0.05");
    }

    #[test]
    fn escape_xml_escapes_markup() {
        assert_eq!(escape_xml(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
        assert_eq!(escape_xml("plain"), "plain");
    }
}
