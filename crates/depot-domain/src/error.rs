//! Error handling types

use thiserror::Error;

use crate::value_objects::{Identity, Query};

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error accepted as the source of a build or configuration failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for the Depot resolution engine
#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory query resolved to no component
    #[error("component satisfying {query} not found{}{}", required_by_suffix(.required_by), similar_suffix(.similar))]
    MissingMandatoryDependency {
        /// The query that could not be satisfied
        query: String,
        /// Identity whose bill of materials holds the query, if any
        required_by: Option<String>,
        /// Buildable identities of the same raw type
        similar: Vec<String>,
    },

    /// Two producers claim the same identity with equal priority
    #[error("ambiguous identity {identity}: claimed with equal priority by {}", .producers.join(", "))]
    AmbiguousIdentity {
        /// The contested identity
        identity: String,
        /// Descriptions of the competing producers
        producers: Vec<String>,
    },

    /// A bill of materials transitively depends on its own identity
    #[error("cyclic dependency: {}", .chain.join(" -> "))]
    CyclicDependency {
        /// Identities from the first occurrence back to itself
        chain: Vec<String>,
    },

    /// The build step of an engine failed
    #[error("failed to build {identity}: {message}")]
    BuildFailure {
        /// Identity being built
        identity: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// A component value is not of the requested Rust type
    #[error("component {identity} is not a {expected}")]
    TypeMismatch {
        /// Identity of the component
        identity: String,
        /// Requested Rust type
        expected: &'static str,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Releasing a component failed
    #[error("Close error: {message}")]
    Close {
        /// Description of the close failure
        message: String,
    },

    /// Internal engine error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },
}

fn required_by_suffix(required_by: &Option<String>) -> String {
    required_by
        .as_ref()
        .map(|identity| format!(" (required by {identity})"))
        .unwrap_or_default()
}

fn similar_suffix(similar: &[String]) -> String {
    if similar.is_empty() {
        String::new()
    } else {
        format!(". similar components found: {}", similar.join(", "))
    }
}

// Resolution error creation methods
impl Error {
    /// Create a missing mandatory dependency error
    pub fn missing_dependency(query: &Query, required_by: Option<&Identity>) -> Self {
        Self::MissingMandatoryDependency {
            query: query.to_string(),
            required_by: required_by.map(ToString::to_string),
            similar: Vec::new(),
        }
    }

    /// Attach similar identities to a missing dependency error
    #[must_use]
    pub fn with_similar(self, similar: &[Identity]) -> Self {
        match self {
            Self::MissingMandatoryDependency {
                query, required_by, ..
            } => Self::MissingMandatoryDependency {
                query,
                required_by,
                similar: similar.iter().map(ToString::to_string).collect(),
            },
            other => other,
        }
    }

    /// Create an ambiguous identity error
    pub fn ambiguous(identity: &Identity, producers: Vec<String>) -> Self {
        Self::AmbiguousIdentity {
            identity: identity.to_string(),
            producers,
        }
    }

    /// Create a cyclic dependency error from a resolution chain
    pub fn cyclic(chain: &[Identity], repeated: &Identity) -> Self {
        let start = chain.iter().position(|i| i == repeated).unwrap_or(0);
        let mut cycle: Vec<String> = chain[start..].iter().map(ToString::to_string).collect();
        cycle.push(repeated.to_string());
        Self::CyclicDependency { chain: cycle }
    }

    /// Create a build failure error
    pub fn build_failure<S: Into<String>>(identity: &Identity, message: S) -> Self {
        Self::BuildFailure {
            identity: identity.to_string(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a build failure error with source
    pub fn build_failure_with_source<S, E>(identity: &Identity, message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::BuildFailure {
            identity: identity.to_string(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<T: ?Sized>(identity: &Identity) -> Self {
        Self::TypeMismatch {
            identity: identity.to_string(),
            expected: std::any::type_name::<T>(),
        }
    }

    /// Whether this error is a missing mandatory dependency
    pub fn is_missing_dependency(&self) -> bool {
        matches!(self, Self::MissingMandatoryDependency { .. })
    }

    /// Whether this error is a cyclic dependency
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::CyclicDependency { .. })
    }
}

// Configuration and general error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a close error
    pub fn close<S: Into<String>>(message: S) -> Self {
        Self::Close {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }
}
