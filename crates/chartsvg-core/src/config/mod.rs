use serde_json::{Map, Value};

/// JSON-backed renderer configuration (palette, theme tokens, styling constants).
///
/// Lookups use dotted paths, e.g. `colors.accent` or `style.line.width`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig(Value);

impl Default for ChartConfig {
    fn default() -> Self {
        crate::generated::default_config()
    }
}

impl ChartConfig {
    pub fn empty_object() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn as_value_mut(&mut self) -> &mut Value {
        &mut self.0
    }

    pub fn get(&self, dotted_path: &str) -> Option<&Value> {
        let mut cur = &self.0;
        for segment in dotted_path.split('.') {
            cur = cur.as_object()?.get(segment)?;
        }
        Some(cur)
    }

    pub fn get_str(&self, dotted_path: &str) -> Option<&str> {
        self.get(dotted_path)?.as_str()
    }

    pub fn get_bool(&self, dotted_path: &str) -> Option<bool> {
        self.get(dotted_path)?.as_bool()
    }

    pub fn get_f64(&self, dotted_path: &str) -> Option<f64> {
        let v = self.get(dotted_path)?;
        v.as_f64()
            .or_else(|| v.as_i64().map(|n| n as f64))
            .or_else(|| v.as_u64().map(|n| n as f64))
    }

    /// Numeric lookup with a fallback for missing or non-numeric entries.
    pub fn f64_or(&self, dotted_path: &str, fallback: f64) -> f64 {
        self.get_f64(dotted_path)
            .filter(|v| v.is_finite())
            .unwrap_or(fallback)
    }

    pub fn get_string_list(&self, dotted_path: &str) -> Option<Vec<String>> {
        let arr = self.get(dotted_path)?.as_array()?;
        Some(
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    pub fn set_value(&mut self, dotted_path: &str, value: Value) {
        // Configs are objects; coerce anything else so this never panics on user input.
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }

        let Value::Object(ref mut root) = self.0 else {
            return;
        };
        let mut cur: &mut Map<String, Value> = root;
        let mut segments = dotted_path.split('.').peekable();
        while let Some(seg) = segments.next() {
            if segments.peek().is_none() {
                cur.insert(seg.to_string(), value);
                return;
            }
            let slot = cur.entry(seg).or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            let Some(next) = slot.as_object_mut() else {
                return;
            };
            cur = next;
        }
    }

    pub fn deep_merge(&mut self, other: &Value) {
        deep_merge_value(&mut self.0, other);
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
