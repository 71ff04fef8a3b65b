//! Container introspection
//!
//! [`Container::dump`] renders a human-readable report of registrations and
//! warehouse contents; [`Container::dependency_graph`] exposes the static
//! dependency graph as data.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use depot_application::Warehouse;
use depot_domain::{Identity, Result};
use serde::Serialize;

use super::{Container, RegisteredProducer};
use crate::error_ext::ErrorContext;

const SEPARATOR: &str = "--------------------------------------";

/// Node of a dependency graph: one buildable identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyNode {
    /// Identity, as displayed
    pub identity: String,
    /// Producer building it
    pub producer: String,
    /// Priority of that producer
    pub priority: i32,
    /// Whether the component is already held by the warehouse
    pub built: bool,
    /// Why the identity cannot currently be built, if it cannot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Edge of a dependency graph: `from` lists a query `to` satisfies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    /// Dependent identity
    pub from: String,
    /// Dependency identity
    pub to: String,
    /// The query of `from` resolved by `to`
    pub query: String,
}

/// Static dependency graph of a container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    /// Buildable identities, in producer precedence order
    pub nodes: Vec<DependencyNode>,
    /// Dependencies between them
    pub edges: Vec<DependencyEdge>,
}

impl DependencyGraph {
    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize dependency graph")
    }
}

impl Container {
    /// Human-readable report of the container
    pub fn dump(&self) -> String {
        ContainerDump(self).to_string()
    }

    /// Dependency graph of every buildable identity, without building
    pub fn dependency_graph(&self) -> DependencyGraph {
        let mut graph = DependencyGraph::default();
        for identity in self.buildable_identities() {
            let registered = match self.producer_for(&identity) {
                Ok(Some(registered)) => registered,
                // Held by a provider warehouse only
                Ok(None) => continue,
                Err(err) => {
                    graph.nodes.push(DependencyNode {
                        identity: identity.to_string(),
                        producer: String::new(),
                        priority: 0,
                        built: false,
                        error: Some(err.to_string()),
                    });
                    continue;
                }
            };
            let mut node = DependencyNode {
                identity: identity.to_string(),
                producer: registered.producer.name().to_string(),
                priority: registered.producer.priority(),
                built: self.warehouse.stored_box(&identity).is_some(),
                error: self.check_satisfy(&identity.clone().into()).err().map(|e| e.to_string()),
            };
            match registered.producer.engine_for(&identity) {
                Ok(engine) => {
                    for query in engine.bill_of_materials() {
                        for dependency in self.candidate_identities(query) {
                            graph.edges.push(DependencyEdge {
                                from: identity.to_string(),
                                to: dependency.to_string(),
                                query: query.to_string(),
                            });
                        }
                    }
                }
                Err(err) => node.error = Some(err.to_string()),
            }
            graph.nodes.push(node);
        }
        graph
    }

    /// Every identity some producer enumerates, in precedence order
    fn buildable_identities(&self) -> Vec<Identity> {
        let mut seen = HashSet::new();
        self.producers
            .iter()
            .flat_map(|registered| registered.producer.enumerable_identities())
            .filter(|identity| seen.insert(identity.clone()))
            .collect()
    }
}

struct ContainerDump<'a>(&'a Container);

impl ContainerDump<'_> {
    fn producer_line(registered: &RegisteredProducer) -> String {
        format!(
            "{} (priority {}, {})",
            registered.producer.name(),
            registered.producer.priority(),
            registered.layer
        )
    }

    fn write_buildable(&self, f: &mut fmt::Formatter<'_>, identity: &Identity) -> fmt::Result {
        let container = self.0;
        writeln!(f, "  {identity}")?;
        let claimants: Vec<&RegisteredProducer> = container
            .producers
            .iter()
            .filter(|registered| registered.producer.can_build(identity))
            .collect();
        let Some((winner, overridden)) = claimants.split_first() else {
            return writeln!(f, "    ERROR: NO PRODUCER CAN BUILD IT");
        };
        writeln!(f, "    BUILT BY: {}", Self::producer_line(winner))?;
        if !overridden.is_empty() {
            writeln!(f, "    OVERRIDING:")?;
            for registered in overridden {
                writeln!(f, "        {}", Self::producer_line(registered))?;
            }
        }
        match winner.producer.engine_for(identity) {
            Ok(engine) if !engine.bill_of_materials().is_empty() => {
                writeln!(f, "    BOM:")?;
                for query in engine.bill_of_materials() {
                    writeln!(f, "        {query}")?;
                }
            }
            Ok(_) => {}
            Err(err) => writeln!(f, "    ERROR: {err}")?,
        }
        if let Err(err) = container.check_satisfy(&identity.clone().into()) {
            writeln!(f, "    ERROR: CAN'T BE SATISFIED: {err}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ContainerDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let container = self.0;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "            Depot Container")?;
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "id: {}", container.id)?;
        writeln!(f, "activation: {}", container.activation.describe())?;
        writeln!(f)?;

        writeln!(f, "Producers by precedence:")?;
        for (position, registered) in container.producers.iter().enumerate() {
            writeln!(f, "  {:>3}. {}", position + 1, Self::producer_line(registered))?;
        }
        writeln!(f)?;

        writeln!(f, "Producers by source:")?;
        let mut by_source: BTreeMap<&str, Vec<&RegisteredProducer>> = BTreeMap::new();
        for registered in &container.producers {
            by_source
                .entry(registered.source.as_str())
                .or_default()
                .push(registered);
        }
        for (source, producers) in by_source {
            writeln!(f, "  {source}:")?;
            for registered in producers {
                writeln!(f, "    - {}", registered.producer.name())?;
            }
        }
        writeln!(f)?;

        writeln!(f, "Buildable Components:")?;
        for identity in container.buildable_identities() {
            self.write_buildable(f, &identity)?;
        }
        writeln!(f)?;

        writeln!(f, "Warehouse {}:", container.warehouse.id())?;
        for identity in container.warehouse.list_names() {
            match container.warehouse.stored_box(&identity) {
                Some(stored) => {
                    let dependencies: Vec<String> =
                        stored.dependencies.iter().map(ToString::to_string).collect();
                    writeln!(
                        f,
                        "  {identity} ({}, built in {}ms) <- [{}]",
                        stored.component_box.policy(),
                        stored.build_duration.as_millis(),
                        dependencies.join(", ")
                    )?;
                }
                None => writeln!(f, "  {identity}")?,
            }
        }
        for provider in container.warehouse.providers() {
            writeln!(f, "  provider {}: {} components", provider.id(), provider.list_names().len())?;
        }
        write!(f, "{SEPARATOR}")
    }
}
