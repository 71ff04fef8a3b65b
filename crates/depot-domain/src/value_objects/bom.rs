//! Bills of Materials
//!
//! The static dependency list of an engine and the resolved values handed
//! back to it at build time.

use std::any::Any;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::component::NamedComponent;
use super::identity::Identity;
use super::query::Query;
use crate::error::{Error, Result};

/// Value Object: Bill of Materials
///
/// Ordered, duplicate-free list of the queries an engine needs resolved
/// before it can build. Must not change between calls for the same identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    queries: Vec<Query>,
}

impl BillOfMaterials {
    /// Empty bill of materials
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bill of materials holding `queries`, duplicates dropped
    pub fn of(queries: impl IntoIterator<Item = Query>) -> Self {
        queries.into_iter().fold(Self::empty(), Self::with)
    }

    /// Add a query
    #[must_use]
    pub fn with(mut self, query: Query) -> Self {
        if !self.queries.contains(&query) {
            self.queries.push(query);
        }
        self
    }

    /// Add every query of another bill of materials
    #[must_use]
    pub fn merge(self, other: &BillOfMaterials) -> Self {
        other.queries.iter().cloned().fold(self, Self::with)
    }

    /// Queries in declaration order
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    /// Iterate over the queries
    pub fn iter(&self) -> std::slice::Iter<'_, Query> {
        self.queries.iter()
    }

    /// Number of queries
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Whether there is nothing to resolve
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

impl<'a> IntoIterator for &'a BillOfMaterials {
    type Item = &'a Query;
    type IntoIter = std::slice::Iter<'a, Query>;

    fn into_iter(self) -> Self::IntoIter {
        self.queries.iter()
    }
}

/// Resolved dependencies of an engine
///
/// Holds, for every query of a bill of materials, the components found for
/// it: exactly one for a satisfied identity query, zero or more for type
/// queries, zero for an absent optional query.
#[derive(Debug, Clone, Default)]
pub struct SatisfiedBom {
    entries: Vec<(Query, Vec<NamedComponent>)>,
}

impl SatisfiedBom {
    /// Empty satisfied bill of materials
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record the components found for a query
    pub fn insert(&mut self, query: Query, components: Vec<NamedComponent>) {
        match self.entries.iter_mut().find(|(q, _)| *q == query) {
            Some((_, existing)) => *existing = components,
            None => self.entries.push((query, components)),
        }
    }

    /// Builder-style [`SatisfiedBom::insert`]
    #[must_use]
    pub fn with(mut self, query: Query, components: Vec<NamedComponent>) -> Self {
        self.insert(query, components);
        self
    }

    /// Every component found for `query`, empty when absent
    pub fn all(&self, query: &Query) -> &[NamedComponent] {
        self.entries
            .iter()
            .find(|(q, _)| q == query)
            .map(|(_, components)| components.as_slice())
            .unwrap_or_default()
    }

    /// First component found for `query`
    pub fn one(&self, query: &Query) -> Option<&NamedComponent> {
        self.all(query).first()
    }

    /// First component found for `query`, downcast to `T`
    ///
    /// `Ok(None)` for an absent optional slot, an error when the value is
    /// not a `T`.
    pub fn one_as<T: Any + Send + Sync>(&self, query: &Query) -> Result<Option<Arc<T>>> {
        self.one(query).map(NamedComponent::try_downcast::<T>).transpose()
    }

    /// First component found for `query`, which must be present
    pub fn require<T: Any + Send + Sync>(&self, query: &Query) -> Result<Arc<T>> {
        self.one_as::<T>(query)?
            .ok_or_else(|| Error::missing_dependency(query, None))
    }

    /// Every component found for `query`, downcast to `T`
    pub fn all_as<T: Any + Send + Sync>(&self, query: &Query) -> Result<Vec<Arc<T>>> {
        self.all(query)
            .iter()
            .map(NamedComponent::try_downcast::<T>)
            .collect()
    }

    /// Identities of every resolved component, in resolution order
    pub fn dependencies(&self) -> Vec<Identity> {
        let mut identities: Vec<Identity> = Vec::new();
        for component in self.entries.iter().flat_map(|(_, found)| found) {
            if !identities.contains(component.identity()) {
                identities.push(component.identity().clone());
            }
        }
        identities
    }

    /// Number of queries recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no query was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
