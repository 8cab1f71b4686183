//! Color token parsing and resolution.
//!
//! Resolution never fails: tokens that do not match their grammar resolve to the configured
//! fallback accent and are reported through [`Resolution::fallback`].

use crate::ChartConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

const DEFAULT_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
];
const DEFAULT_FALLBACK: &str = "#36A2EB";

fn rgba_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*([\d.]+)\s*\)$")
            .expect("valid regex")
    })
}

fn rgb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)$").expect("valid regex")
    })
}

fn var_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^var\(\s*--([A-Za-z0-9_-]+)\s*(?:,[^)]*)?\)$").expect("valid regex")
    })
}

fn hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^#(?:[0-9A-Fa-f]{3,4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").expect("valid regex")
    })
}

fn named_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]+$").expect("valid regex"))
}

/// A parsed color token. Channels of `rgb()`/`rgba()` are kept as written (0-255).
#[derive(Debug, Clone, PartialEq)]
pub enum ColorToken {
    Hex(String),
    Named(String),
    Rgb { r: u32, g: u32, b: u32 },
    Rgba { r: u32, g: u32, b: u32, a: f64 },
    /// Normalized `var(--name)` token.
    Theme(String),
    /// Anything that failed every grammar.
    Unparsed(String),
}

impl ColorToken {
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.starts_with('#') {
            return if hex_re().is_match(s) {
                Self::Hex(s.to_string())
            } else {
                Self::Unparsed(s.to_string())
            };
        }
        if let Some(caps) = rgba_re().captures(s) {
            let channels = (
                caps[1].parse::<u32>(),
                caps[2].parse::<u32>(),
                caps[3].parse::<u32>(),
                caps[4].parse::<f64>(),
            );
            if let (Ok(r), Ok(g), Ok(b), Ok(a)) = channels {
                return Self::Rgba { r, g, b, a };
            }
            return Self::Unparsed(s.to_string());
        }
        if let Some(caps) = rgb_re().captures(s) {
            let channels = (
                caps[1].parse::<u32>(),
                caps[2].parse::<u32>(),
                caps[3].parse::<u32>(),
            );
            if let (Ok(r), Ok(g), Ok(b)) = channels {
                return Self::Rgb { r, g, b };
            }
            return Self::Unparsed(s.to_string());
        }
        if let Some(caps) = var_re().captures(s) {
            return Self::Theme(format!("var(--{})", &caps[1]));
        }
        if named_re().is_match(s) {
            return Self::Named(s.to_string());
        }
        Self::Unparsed(s.to_string())
    }
}

/// A backend-ready color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DrawColor {
    /// Hex or named color, passed through unchanged.
    Literal { value: String },
    /// Fractional channels in `[0, 1]`; alpha is kept as given.
    Rgba { r: f64, g: f64, b: f64, a: f64 },
}

impl DrawColor {
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    /// SVG paint value (without alpha).
    pub fn paint(&self) -> String {
        match self {
            Self::Literal { value } => value.clone(),
            Self::Rgba { r, g, b, .. } => format!(
                "rgb({},{},{})",
                channel_byte(*r),
                channel_byte(*g),
                channel_byte(*b)
            ),
        }
    }

    /// Alpha clamped to `[0, 1]`; literals are opaque.
    pub fn alpha(&self) -> f64 {
        match self {
            Self::Literal { .. } => 1.0,
            Self::Rgba { a, .. } if a.is_finite() => a.clamp(0.0, 1.0),
            Self::Rgba { .. } => 1.0,
        }
    }
}

fn channel_byte(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub color: DrawColor,
    /// The offending token when resolution fell back to the default accent.
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorResolver {
    palette: Vec<String>,
    theme_tokens: BTreeMap<String, String>,
    accent: String,
    danger: String,
    warning: String,
    success: String,
    fallback: String,
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl ColorResolver {
    pub fn from_config(config: &ChartConfig) -> Self {
        let fallback = config
            .get_str("colors.fallback")
            .unwrap_or(DEFAULT_FALLBACK)
            .to_string();
        let color = |key: &str| {
            config
                .get_str(&format!("colors.{key}"))
                .map(str::to_string)
                .unwrap_or_else(|| fallback.clone())
        };

        let palette = config
            .get_string_list("palette")
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect());

        let theme_tokens = config
            .get("themeTokens")
            .and_then(|v| v.as_object())
            .map(|map| {
                map.iter()
                    .filter_map(|(k, v)| Some((k.trim().to_string(), v.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            palette,
            theme_tokens,
            accent: color("accent"),
            danger: color("danger"),
            warning: color("warning"),
            success: color("success"),
            fallback,
        }
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn palette_color(&self, index: usize) -> DrawColor {
        DrawColor::literal(self.palette[index % self.palette.len()].clone())
    }

    /// Resolves `token`, or the palette entry for `index` when no color is given.
    pub fn resolve(&self, token: Option<&str>, index: usize) -> DrawColor {
        self.resolve_detailed(token, index).color
    }

    pub fn resolve_detailed(&self, token: Option<&str>, index: usize) -> Resolution {
        let Some(raw) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Resolution {
                color: self.palette_color(index),
                fallback: None,
            };
        };

        match ColorToken::parse(raw) {
            ColorToken::Hex(s) | ColorToken::Named(s) => resolved(DrawColor::Literal { value: s }),
            ColorToken::Rgb { r, g, b } => resolved(fractional(r, g, b, 1.0)),
            ColorToken::Rgba { r, g, b, a } => resolved(fractional(r, g, b, a)),
            ColorToken::Theme(name) => self.resolve_theme(&name),
            ColorToken::Unparsed(s) => {
                tracing::warn!(token = %s, "unrecognized color token, using fallback accent");
                self.fallback_for(s)
            }
        }
    }

    fn resolve_theme(&self, name: &str) -> Resolution {
        if let Some(value) = self.theme_tokens.get(name) {
            return match ColorToken::parse(value) {
                ColorToken::Hex(s) | ColorToken::Named(s) => resolved(DrawColor::literal(s)),
                ColorToken::Rgb { r, g, b } => resolved(fractional(r, g, b, 1.0)),
                ColorToken::Rgba { r, g, b, a } => resolved(fractional(r, g, b, a)),
                ColorToken::Theme(_) | ColorToken::Unparsed(_) => {
                    tracing::warn!(token = %name, value = %value, "theme token maps to an unusable color");
                    self.fallback_for(name.to_string())
                }
            };
        }

        let lowered = name.to_ascii_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|n| lowered.contains(n));
        let inferred = if has(&["accent", "primary"]) {
            Some(&self.accent)
        } else if has(&["danger", "down", "error"]) {
            Some(&self.danger)
        } else if has(&["warning"]) {
            Some(&self.warning)
        } else if has(&["success", "up"]) {
            Some(&self.success)
        } else {
            None
        };

        match inferred {
            Some(color) => {
                tracing::debug!(token = %name, color = %color, "inferred theme token color");
                resolved(DrawColor::literal(color.clone()))
            }
            None => {
                tracing::debug!(token = %name, "unknown theme token, using fallback accent");
                self.fallback_for(name.to_string())
            }
        }
    }

    fn fallback_for(&self, token: String) -> Resolution {
        Resolution {
            color: DrawColor::literal(self.fallback.clone()),
            fallback: Some(token),
        }
    }
}

fn resolved(color: DrawColor) -> Resolution {
    Resolution {
        color,
        fallback: None,
    }
}

fn fractional(r: u32, g: u32, b: u32, a: f64) -> DrawColor {
    let ch = |c: u32| f64::from(c.min(255)) / 255.0;
    DrawColor::Rgba {
        r: ch(r),
        g: ch(g),
        b: ch(b),
        a,
    }
}
