//! Open-ended `String` producers
//!
//! Both producers build `String` components named after a key, the value
//! being the property or environment variable of that name.

use std::collections::BTreeMap;
use std::sync::Arc;

use depot_application::{Engine, Producer};
use depot_domain::constants::PROPERTIES_PRIORITY;
use depot_domain::{Error, Identity, Result, TypeDescriptor};

use crate::engines::StdEngine;

fn string_type() -> TypeDescriptor {
    TypeDescriptor::of::<String>()
}

fn is_string_identity(identity: &Identity) -> bool {
    *identity.declared_type() == string_type()
}

fn lists_strings(target: &TypeDescriptor) -> bool {
    string_type().raw().is_assignable_to(target.raw())
}

/// Producer of `String` components backed by a key/value map
///
/// # Example
///
/// ```ignore
/// let producer = PropertiesProducer::new("settings")
///     .with("app.name", "demo");
/// // Identity::of::<String>("app.name") now resolves to "demo"
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesProducer {
    name: String,
    values: BTreeMap<String, String>,
    priority: i32,
}

impl PropertiesProducer {
    /// Empty producer
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_map(name, BTreeMap::new())
    }

    /// Producer over `values`
    pub fn from_map(name: impl Into<String>, values: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            values,
            priority: PROPERTIES_PRIORITY,
        }
    }

    /// Add a property
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Override the priority
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

impl Producer for PropertiesProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn can_build(&self, identity: &Identity) -> bool {
        is_string_identity(identity) && self.values.contains_key(identity.name())
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        let value = self
            .values
            .get(identity.name())
            .filter(|_| is_string_identity(identity))
            .ok_or_else(|| {
                Error::invalid_argument(format!("{} has no property for {identity}", self.name))
            })?;
        Ok(Arc::new(
            StdEngine::value(identity.clone(), value.clone()).with_priority(self.priority),
        ))
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        if !lists_strings(target) {
            return Vec::new();
        }
        self.values
            .keys()
            .map(|key| Identity::new(string_type(), key.clone()))
            .collect()
    }
}

/// Producer of `String` components read from environment variables
///
/// Variables are read when the component is built, so a value set after
/// the container was created is still found. An optional prefix restricts
/// which variables are served.
#[derive(Debug, Clone)]
pub struct EnvironmentProducer {
    prefix: Option<String>,
    name: String,
}

impl EnvironmentProducer {
    /// Serve every environment variable
    pub fn new() -> Self {
        Self {
            prefix: None,
            name: "environment".to_string(),
        }
    }

    /// Serve the variables whose name starts with `prefix`
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("environment({prefix}*)"),
            prefix: Some(prefix),
        }
    }

    fn serves(&self, key: &str) -> bool {
        self.prefix
            .as_deref()
            .is_none_or(|prefix| key.starts_with(prefix))
    }
}

impl Default for EnvironmentProducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Producer for EnvironmentProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        PROPERTIES_PRIORITY
    }

    fn can_build(&self, identity: &Identity) -> bool {
        is_string_identity(identity)
            && self.serves(identity.name())
            && std::env::var_os(identity.name()).is_some()
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        if !is_string_identity(identity) || !self.serves(identity.name()) {
            return Err(Error::invalid_argument(format!(
                "{} cannot build {identity}",
                self.name
            )));
        }
        let key = identity.name().to_string();
        // A variable removed since can_build resolves to an empty string
        let engine = StdEngine::no_deps(identity.clone(), move || {
            Ok(std::env::var(&key).unwrap_or_default())
        })
        .with_priority(PROPERTIES_PRIORITY);
        Ok(Arc::new(engine))
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        if !lists_strings(target) {
            return Vec::new();
        }
        let mut keys: Vec<String> = std::env::vars_os()
            .filter_map(|(key, _)| key.into_string().ok())
            .filter(|key| self.serves(key))
            .collect();
        keys.sort();
        keys.into_iter()
            .map(|key| Identity::new(string_type(), key))
            .collect()
    }
}
