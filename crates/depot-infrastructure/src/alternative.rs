//! Alternatives and conditional activation
//!
//! An [`Alternative`] is a producer that supersedes the regular producers of
//! a target identity (or of every identity of a target type) while its
//! [`Condition`] holds. Conditions are evaluated once, when the container is
//! built: flipping a flag only affects containers built afterwards.

use std::fmt;
use std::sync::Arc;

use depot_application::{Engine, Producer};
use depot_domain::{Error, Identity, Result, TypeDescriptor};

use crate::activation::ActivationSnapshot;
use crate::engines::RetargetedEngine;

/// Predicate over activation values
///
/// # Example
///
/// ```rust
/// use depot_infrastructure::alternative::Condition;
///
/// let mocked = Condition::when("mail.transport", "mock");
/// let live = Condition::unless("mail.transport", "mock");
/// assert_eq!(mocked.to_string(), "mail.transport == mock");
/// assert_eq!(live.to_string(), "mail.transport != mock");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    key: String,
    value: String,
    negated: bool,
}

impl Condition {
    /// Holds when `key` reads exactly `value`
    pub fn when(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            negated: false,
        }
    }

    /// Holds unless `key` reads exactly `value`
    pub fn unless(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            negated: true,
            ..Self::when(key, value)
        }
    }

    /// Activation key read by the condition
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Evaluate against activation values
    pub fn is_met(&self, activation: &ActivationSnapshot) -> bool {
        let matches = activation
            .get(&self.key)
            .is_some_and(|value| value == self.value);
        matches != self.negated
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.negated { "!=" } else { "==" };
        write!(f, "{} {op} {}", self.key, self.value)
    }
}

/// What an alternative supersedes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlternativeTarget {
    /// One identity
    Identity(Identity),
    /// Every identity whose declared type is assignable to the type
    Type(TypeDescriptor),
}

impl AlternativeTarget {
    fn covers(&self, identity: &Identity) -> bool {
        match self {
            Self::Identity(target) => target == identity,
            Self::Type(target) => identity.declared_type().is_assignable_to(target),
        }
    }
}

impl From<Identity> for AlternativeTarget {
    fn from(identity: Identity) -> Self {
        Self::Identity(identity)
    }
}

impl From<TypeDescriptor> for AlternativeTarget {
    fn from(target: TypeDescriptor) -> Self {
        Self::Type(target)
    }
}

/// Conditionally active producer superseding another for the same target
///
/// The wrapped producer either builds the target identity itself, or builds
/// a single component of its own which is then served under the target
/// identity.
///
/// # Example
///
/// ```ignore
/// let alternative = Alternative::new(
///     Identity::of::<String>("X"),
///     Arc::new(SingleIdentityProducer::new(StdEngine::value(Identity::of::<String>("X"), "alt"))),
/// )
/// .when("F", "on");
/// let container = ContainerBuilder::new().add_alternative(alternative).build()?;
/// ```
#[derive(Clone)]
pub struct Alternative {
    name: String,
    target: AlternativeTarget,
    producer: Arc<dyn Producer>,
    condition: Option<Condition>,
    priority: Option<i32>,
}

impl Alternative {
    /// Alternative to `target` built by `producer`, always active
    pub fn new(target: impl Into<AlternativeTarget>, producer: Arc<dyn Producer>) -> Self {
        Self {
            name: format!("alternative {}", producer.name()),
            target: target.into(),
            producer,
            condition: None,
            priority: None,
        }
    }

    /// Activate only when `key` reads `value`
    #[must_use]
    pub fn when(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_condition(Condition::when(key, value))
    }

    /// Activate only when `condition` holds
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Override the priority of the wrapped producer
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Activation condition, if any
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    /// Target superseded by the alternative
    pub fn target(&self) -> &AlternativeTarget {
        &self.target
    }

    /// Whether the alternative is active under `activation`
    pub fn is_active(&self, activation: &ActivationSnapshot) -> bool {
        self.condition
            .as_ref()
            .is_none_or(|condition| condition.is_met(activation))
    }

    /// Identity built by the wrapped producer on behalf of `identity`
    fn source_identity(&self, identity: &Identity) -> Option<Identity> {
        if self.producer.can_build(identity) {
            return Some(identity.clone());
        }
        match self.producer.enumerable_identities().as_slice() {
            [single]
                if single
                    .declared_type()
                    .raw()
                    .is_assignable_to(identity.declared_type().raw()) =>
            {
                Some(single.clone())
            }
            _ => None,
        }
    }
}

impl Producer for Alternative {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority.unwrap_or_else(|| self.producer.priority())
    }

    fn can_build(&self, identity: &Identity) -> bool {
        self.target.covers(identity) && self.source_identity(identity).is_some()
    }

    fn engine_for(&self, identity: &Identity) -> Result<Arc<dyn Engine>> {
        if !self.target.covers(identity) {
            return Err(Error::invalid_argument(format!(
                "{} does not target {identity}",
                self.name
            )));
        }
        let source = self.source_identity(identity).ok_or_else(|| {
            Error::invalid_argument(format!("{} cannot build {identity}", self.name))
        })?;
        let engine = self.producer.engine_for(&source)?;
        if source == *identity {
            Ok(engine)
        } else {
            Ok(Arc::new(RetargetedEngine::new(identity.clone(), engine)))
        }
    }

    fn buildable_identities(&self, target: &TypeDescriptor) -> Vec<Identity> {
        match &self.target {
            AlternativeTarget::Identity(identity) => {
                crate::producers::listed_if_assignable(identity, target)
            }
            AlternativeTarget::Type(covered) => self
                .producer
                .buildable_identities(target)
                .into_iter()
                .filter(|identity| identity.declared_type().is_assignable_to(covered))
                .collect(),
        }
    }
}
