//! Process-wide drawing defaults.
//!
//! The defaults are resolved once, on first use, and are read-only afterwards. Renders never
//! mutate them, so concurrent renders can share them freely. Only the font family list lives
//! here; everything else is read from the config on every render.

use chartsvg_core::ChartConfig;
use std::sync::OnceLock;

const DEFAULT_FONT_FAMILIES: [&str; 6] = [
    "DejaVu Sans",
    "Noto Sans CJK SC",
    "Microsoft YaHei",
    "PingFang SC",
    "Arial",
    "sans-serif",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendDefaults {
    pub font_families: Vec<String>,
}

impl BackendDefaults {
    fn from_config(config: &ChartConfig) -> Self {
        let font_families = config
            .get_string_list("style.fontFamilies")
            .filter(|list| !list.is_empty())
            .unwrap_or_else(|| DEFAULT_FONT_FAMILIES.iter().map(|f| f.to_string()).collect());
        Self { font_families }
    }

    /// CSS `font-family` value.
    pub fn font_family_css(&self) -> String {
        self.font_families
            .iter()
            .map(|f| {
                if f.contains(' ') {
                    format!("'{f}'")
                } else {
                    f.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

static DEFAULTS: OnceLock<BackendDefaults> = OnceLock::new();

/// Initializes the process-wide defaults from `config`.
///
/// Only the first call has an effect; later calls (with any config) return the values that were
/// installed first. A `style.fontFamilies` override therefore applies only if it is part of the
/// config that reaches this function first.
pub fn initialize(config: &ChartConfig) -> &'static BackendDefaults {
    DEFAULTS.get_or_init(|| {
        let defaults = BackendDefaults::from_config(config);
        tracing::debug!(
            fonts = %defaults.font_family_css(),
            "initialized chart backend defaults"
        );
        defaults
    })
}

/// The process-wide defaults, initializing them from the built-in config if needed.
pub fn defaults() -> &'static BackendDefaults {
    match DEFAULTS.get() {
        Some(d) => d,
        None => initialize(&ChartConfig::default()),
    }
}
