//! Activation source implementations

use std::collections::BTreeMap;
use std::sync::Arc;

use depot_application::ActivationSource;

/// In-memory activation source
#[derive(Debug, Clone, Default)]
pub struct MapActivationSource {
    values: BTreeMap<String, String>,
}

impl MapActivationSource {
    /// Empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, String>> for MapActivationSource {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl ActivationSource for MapActivationSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn describe(&self) -> String {
        format!("map({} values)", self.values.len())
    }
}

/// Activation source reading process environment variables
///
/// A key is looked up verbatim first, then in its sanitized form: ASCII
/// uppercase with every non-alphanumeric character replaced by `_`, so
/// `depot.activation::Mailer::smtp` is also found as
/// `DEPOT_ACTIVATION__MAILER__SMTP`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvActivationSource;

impl EnvActivationSource {
    /// Environment variable name a key maps to
    pub fn sanitize(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl ActivationSource for EnvActivationSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key)
            .ok()
            .or_else(|| std::env::var(Self::sanitize(key)).ok())
    }

    fn describe(&self) -> String {
        "environment".to_string()
    }
}

/// Chain of sources, the first source holding a key wins
#[derive(Clone, Default)]
pub struct LayeredActivationSource {
    layers: Vec<Arc<dyn ActivationSource>>,
}

impl LayeredActivationSource {
    /// Chain `layers`, highest precedence first
    pub fn new(layers: Vec<Arc<dyn ActivationSource>>) -> Self {
        Self { layers }
    }

    /// Add a layer below the existing ones
    #[must_use]
    pub fn then(mut self, layer: Arc<dyn ActivationSource>) -> Self {
        self.layers.push(layer);
        self
    }
}

impl ActivationSource for LayeredActivationSource {
    fn get(&self, key: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    fn describe(&self) -> String {
        let layers: Vec<String> = self.layers.iter().map(|l| l.describe()).collect();
        format!("layered[{}]", layers.join(", "))
    }
}

/// Source holding no value at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoActivation;

impl ActivationSource for NoActivation {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn describe(&self) -> String {
        "none".to_string()
    }
}
