//! Container configuration

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use dashmap::DashMap;
use depot_application::{
    ActivationSource, CustomizerEngine, Producer, Warehouse, discovered_producers,
};
use depot_domain::constants::DEACTIVATED_VALUE;
use depot_domain::{Error, Identity, Result};
use tracing::{debug, info};

use super::{Container, ProducerLayer, RegisteredProducer, sort_by_precedence};
use crate::activation::{ActivationSnapshot, LayeredActivationSource, MapActivationSource};
use crate::alternative::{Alternative, Condition};
use crate::config::DepotConfig;
use crate::constants::{CONFIG_COMPONENTS_PRODUCER, CONTAINER_ID_PREFIX, WAREHOUSE_ID_SUFFIX};
use crate::local::LocalProducers;
use crate::producers::{PropertiesProducer, SingletonProducer, WarehouseProvidersProducer};
use crate::registry::ContainerHandle;
use crate::warehouse::StdWarehouse;

const SOURCE_BUILDER: &str = "builder";
const SOURCE_DISCOVERY: &str = "discovery";
const SOURCE_LOCAL: &str = "local";
const SOURCE_CONFIG: &str = "config";
const SOURCE_WAREHOUSE_PROVIDERS: &str = "warehouse providers";

#[derive(Clone)]
struct PendingProducer {
    producer: Arc<dyn Producer>,
    layer: ProducerLayer,
    condition: Option<Condition>,
    source: String,
}

/// Builder for [`Container`]
///
/// Clonable: every container keeps a copy of the builder it was built from
/// so [`Container::concat`] and [`Container::child_builder`] can extend it.
#[derive(Clone, Default)]
pub struct ContainerBuilder {
    id: Option<String>,
    discovery: bool,
    pending: Vec<PendingProducer>,
    customizers: Vec<Arc<dyn CustomizerEngine>>,
    warehouse_providers: Vec<Arc<dyn Warehouse>>,
    activation_sources: Vec<Arc<dyn ActivationSource>>,
    overrides: BTreeMap<String, String>,
}

impl ContainerBuilder {
    /// Empty builder: no producers, no discovery, no activation values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the container id, generated from the handle otherwise
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Register the producers of the discovery registry on build
    #[must_use]
    pub fn with_discovery(mut self, discovery: bool) -> Self {
        self.discovery = discovery;
        self
    }

    /// Register a producer
    #[must_use]
    pub fn add_producer(self, producer: impl Producer + 'static) -> Self {
        self.add_shared_producer(Arc::new(producer))
    }

    /// Register a shared producer
    #[must_use]
    pub fn add_shared_producer(self, producer: Arc<dyn Producer>) -> Self {
        self.push(producer, ProducerLayer::Regular, None, SOURCE_BUILDER)
    }

    /// Register a producer active only when `condition` holds
    #[must_use]
    pub fn add_conditional(self, producer: Arc<dyn Producer>, condition: Condition) -> Self {
        self.push(producer, ProducerLayer::Regular, Some(condition), SOURCE_BUILDER)
    }

    /// Register an alternative
    #[must_use]
    pub fn add_alternative(self, alternative: Alternative) -> Self {
        let condition = alternative.condition().cloned();
        self.push(
            Arc::new(alternative),
            ProducerLayer::Alternative,
            condition,
            SOURCE_BUILDER,
        )
    }

    /// Register a customizer engine
    #[must_use]
    pub fn add_customizer(mut self, customizer: impl CustomizerEngine + 'static) -> Self {
        self.customizers.push(Arc::new(customizer));
        self
    }

    /// Chain a warehouse whose components this container reuses
    ///
    /// Providers are searched in registration order. Their components are
    /// never closed by this container.
    #[must_use]
    pub fn add_warehouse_provider(mut self, provider: Arc<dyn Warehouse>) -> Self {
        self.warehouse_providers.push(provider);
        self
    }

    /// Add an activation source, taking precedence over those added before
    #[must_use]
    pub fn with_activation_source(mut self, source: Arc<dyn ActivationSource>) -> Self {
        self.activation_sources.insert(0, source);
        self
    }

    /// Override one activation value, over every activation source
    #[must_use]
    pub fn with_activation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    /// Deactivate an identity
    #[must_use]
    pub fn deactivate(self, identity: &Identity) -> Self {
        self.with_activation(identity.activation_key(), DEACTIVATED_VALUE)
    }

    /// Copy the current contents of a local overlay
    ///
    /// Overlay producers and components supersede regular producers and
    /// alternatives of equal priority; overlay activation values supersede
    /// every activation source.
    #[must_use]
    pub fn add_local_producers(mut self, overlay: &LocalProducers) -> Self {
        let snapshot = overlay.snapshot();
        for producer in snapshot.producers {
            self = self.push(producer, ProducerLayer::Local, None, SOURCE_LOCAL);
        }
        for component in snapshot.components {
            self = self.push(
                Arc::new(SingletonProducer::new(component)),
                ProducerLayer::Local,
                None,
                SOURCE_LOCAL,
            );
        }
        self.overrides.extend(snapshot.activation);
        self
    }

    /// Apply a configuration
    ///
    /// Activation values of the configuration take precedence over the
    /// activation sources added so far; its components are served as
    /// `String` components.
    ///
    /// The discovery flag of the configuration replaces the one set so far:
    /// call [`ContainerBuilder::with_discovery`] afterwards to override it.
    #[must_use]
    pub fn with_config(mut self, config: &DepotConfig) -> Self {
        self.discovery = config.discovery;
        if !config.activation.is_empty() {
            self = self.with_activation_source(Arc::new(MapActivationSource::from(
                config.activation.clone(),
            )));
        }
        if !config.components.is_empty() {
            let producer = PropertiesProducer::from_map(
                CONFIG_COMPONENTS_PRODUCER,
                config.components.clone(),
            );
            self = self.push(Arc::new(producer), ProducerLayer::Regular, None, SOURCE_CONFIG);
        }
        self
    }

    fn push(
        mut self,
        producer: Arc<dyn Producer>,
        layer: ProducerLayer,
        condition: Option<Condition>,
        source: &str,
    ) -> Self {
        self.pending.push(PendingProducer {
            producer,
            layer,
            condition,
            source: source.to_string(),
        });
        self
    }

    fn activation_source(&self) -> Arc<dyn ActivationSource> {
        let mut layers: Vec<Arc<dyn ActivationSource>> = Vec::new();
        if !self.overrides.is_empty() {
            layers.push(Arc::new(MapActivationSource::from(self.overrides.clone())));
        }
        layers.extend(self.activation_sources.iter().cloned());
        Arc::new(LayeredActivationSource::new(layers))
    }

    /// Build the container
    ///
    /// Evaluates activation conditions, orders producers by precedence and
    /// rejects identities claimed by two regular producers of equal
    /// priority.
    ///
    /// # Errors
    ///
    /// - a discovered producer fails to initialize
    /// - an identity is ambiguous
    pub fn build(self) -> Result<Container> {
        let handle = ContainerHandle::generate();
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| format!("{CONTAINER_ID_PREFIX}-{handle}"));
        let activation = ActivationSnapshot::new(self.activation_source());

        let mut candidates: Vec<(Arc<dyn Producer>, ProducerLayer, String)> = Vec::new();
        if self.discovery {
            for producer in discovered_producers()? {
                candidates.push((producer, ProducerLayer::Regular, SOURCE_DISCOVERY.to_string()));
            }
        }
        for pending in &self.pending {
            if let Some(condition) = &pending.condition
                && !condition.is_met(&activation)
            {
                debug!(
                    container = %id,
                    producer = pending.producer.name(),
                    %condition,
                    "Producer inactive"
                );
                continue;
            }
            candidates.push((
                Arc::clone(&pending.producer),
                pending.layer,
                pending.source.clone(),
            ));
        }
        if !self.warehouse_providers.is_empty() {
            candidates.push((
                Arc::new(WarehouseProvidersProducer::new(
                    self.warehouse_providers.clone(),
                )),
                ProducerLayer::Regular,
                SOURCE_WAREHOUSE_PROVIDERS.to_string(),
            ));
        }

        let mut producers: Vec<RegisteredProducer> = candidates
            .into_iter()
            .enumerate()
            .map(|(order, (producer, layer, source))| RegisteredProducer {
                producer,
                layer,
                order,
                source,
            })
            .collect();
        sort_by_precedence(&mut producers);
        check_ambiguities(&producers)?;

        let warehouse = Arc::new(StdWarehouse::with_providers(
            format!("{id}-{WAREHOUSE_ID_SUFFIX}"),
            self.warehouse_providers.clone(),
        ));
        info!(
            container = %id,
            producers = producers.len(),
            customizers = self.customizers.len(),
            warehouse_providers = self.warehouse_providers.len(),
            activation = %activation.describe(),
            "Container built"
        );

        let customizers = self.customizers.clone();
        let mut blueprint = self;
        blueprint.id = None;
        Ok(Container {
            handle,
            id,
            producers,
            customizers,
            warehouse,
            activation,
            build_locks: DashMap::new(),
            blueprint,
        })
    }
}

/// Reject enumerable identities claimed first by two tied regular producers
fn check_ambiguities(producers: &[RegisteredProducer]) -> Result<()> {
    let mut seen: HashSet<Identity> = HashSet::new();
    for registered in producers {
        for identity in registered.producer.enumerable_identities() {
            if !seen.insert(identity.clone()) {
                continue;
            }
            if let Some(tied) = tied_claimants(producers, &identity) {
                return Err(Error::ambiguous(&identity, tied));
            }
        }
    }
    Ok(())
}

/// Names of the producers tied for `identity`, when the top two claimants tie
pub(super) fn tied_claimants(
    producers: &[RegisteredProducer],
    identity: &Identity,
) -> Option<Vec<String>> {
    let claimants: Vec<&RegisteredProducer> = producers
        .iter()
        .filter(|p| p.producer.can_build(identity))
        .collect();
    match claimants.as_slice() {
        [first, second, ..] if first.ties_with(second) => Some(
            claimants
                .iter()
                .filter(|p| first.ties_with(p))
                .map(|p| p.name().to_string())
                .collect(),
        ),
        _ => None,
    }
}
