use crate::ChartConfig;
use std::sync::OnceLock;

static DEFAULT_CONFIG: OnceLock<ChartConfig> = OnceLock::new();

pub fn default_config() -> ChartConfig {
    DEFAULT_CONFIG
        .get_or_init(|| {
            let json_text = include_str!("default_config.json");
            let value: serde_json::Value =
                serde_json::from_str(json_text).expect("embedded default config JSON is valid");
            ChartConfig::from_value(value)
        })
        .clone()
}
