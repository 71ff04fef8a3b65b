//! Query resolution
//!
//! Resolution of an identity:
//!
//! 1. deactivated identities are absent
//! 2. the warehouse (own boxes, then providers) is checked
//! 3. the first producer in precedence order able to build the identity
//!    hands out an engine
//! 4. the bill of materials of the engine is satisfied recursively
//! 5. the engine builds, customizers run, the component is checked in
//!
//! Top-level resolutions first walk the whole bill of materials graph
//! without building, so cycles and missing mandatory dependencies are
//! reported before anything is built or locked.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use depot_application::{ComponentCustomizer, Engine, Warehouse};
use depot_domain::{
    BoxPolicy, Error, Identity, NamedComponent, Query, QueryKind, Result, SatisfiedBom,
};
use tracing::{debug, info, warn};

use super::builder::tied_claimants;
use super::{Container, RegisteredProducer};
use crate::boxes::box_component;
use crate::utils::TimedOperation;

impl Container {
    /// Resolve a query on behalf of `required_by`
    pub(super) fn resolve_query(
        &self,
        query: &Query,
        required_by: Option<&Identity>,
        chain: &mut Vec<Identity>,
    ) -> Result<Vec<NamedComponent>> {
        if let QueryKind::ByIdentity(identity) = query.kind() {
            return match self.resolve_identity(identity, chain)? {
                Some(component) => Ok(vec![component]),
                None if query.is_mandatory() => Err(Error::missing_dependency(query, required_by)
                    .with_similar(&self.similar_identities(identity))),
                None => Ok(Vec::new()),
            };
        }

        let mut found = Vec::new();
        for candidate in self.candidate_identities(query) {
            match self.resolve_identity(&candidate, chain) {
                Ok(Some(component)) => found.push(component),
                Ok(None) => {}
                // A candidate whose own bill of materials cannot be satisfied is
                // skipped; build failures and cycles fail the whole query
                Err(err @ Error::MissingMandatoryDependency { .. }) => {
                    warn!(
                        container = %self.id,
                        %query,
                        identity = %candidate,
                        error = %err,
                        "Skipping unsatisfiable candidate"
                    );
                }
                Err(err) => return Err(err),
            }
        }
        found.sort_by(|a, b| {
            Reverse(a.priority())
                .cmp(&Reverse(b.priority()))
                .then_with(|| a.name().cmp(b.name()))
        });
        if found.is_empty() && query.is_mandatory() {
            return Err(Error::missing_dependency(query, required_by));
        }
        Ok(found)
    }

    /// Resolve one identity, `Ok(None)` when nothing can provide it
    fn resolve_identity(
        &self,
        identity: &Identity,
        chain: &mut Vec<Identity>,
    ) -> Result<Option<NamedComponent>> {
        if self.activation.is_deactivated(identity) {
            debug!(container = %self.id, %identity, "Identity deactivated");
            return Ok(None);
        }
        if let Some(component) = self.warehouse.check_out(identity) {
            return Ok(Some(component));
        }
        if chain.contains(identity) {
            return Err(Error::cyclic(chain, identity));
        }
        let Some(registered) = self.producer_for(identity)? else {
            return Ok(None);
        };
        let engine = registered.producer.engine_for(identity)?;
        if chain.is_empty() {
            let mut path = Vec::new();
            let mut verified = HashSet::new();
            self.precheck_identity(identity, &mut path, &mut verified)?;
        }

        match engine.box_policy() {
            BoxPolicy::Boundless => {
                let lock = self.build_lock(identity);
                let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
                // Another thread may have built it while we waited
                if let Some(component) = self.warehouse.check_out(identity) {
                    return Ok(Some(component));
                }
                let built = self.build(identity, &engine, registered, chain)?;
                self.warehouse.check_in(
                    box_component(built.component.clone(), BoxPolicy::Boundless),
                    built.dependencies,
                    built.duration,
                )?;
                Ok(Some(built.component))
            }
            // Handed straight to the requester: a disposable checked into the
            // shared map could be picked by a concurrent resolution instead
            BoxPolicy::Disposable => self
                .build(identity, &engine, registered, chain)
                .map(|built| Some(built.component)),
        }
    }

    fn build(
        &self,
        identity: &Identity,
        engine: &Arc<dyn Engine>,
        registered: &RegisteredProducer,
        chain: &mut Vec<Identity>,
    ) -> Result<Built> {
        chain.push(identity.clone());
        let satisfied = self.satisfy(identity, engine, chain);
        chain.pop();
        let satisfied = satisfied?;

        let timer = TimedOperation::start();
        let component = engine.build(&satisfied)?;
        if component.identity() != identity {
            return Err(Error::build_failure(
                identity,
                format!("engine built {} instead", component.identity()),
            ));
        }
        let component = self.customize(component)?;
        info!(
            container = %self.id,
            %identity,
            producer = registered.producer.name(),
            policy = %engine.box_policy(),
            elapsed_ms = timer.elapsed_ms(),
            "Component built"
        );
        Ok(Built {
            component,
            dependencies: satisfied.dependencies(),
            duration: timer.elapsed(),
        })
    }

    fn satisfy(
        &self,
        identity: &Identity,
        engine: &Arc<dyn Engine>,
        chain: &mut Vec<Identity>,
    ) -> Result<SatisfiedBom> {
        let mut satisfied = SatisfiedBom::empty();
        for query in engine.bill_of_materials() {
            let components = self.resolve_query(query, Some(identity), chain)?;
            satisfied.insert(query.clone(), components);
        }
        Ok(satisfied)
    }

    fn customize(&self, component: NamedComponent) -> Result<NamedComponent> {
        let identity = component.identity().clone();
        let mut customizers: Vec<Arc<dyn ComponentCustomizer>> = self
            .customizers
            .iter()
            .filter(|engine| engine.can_customize(&identity))
            .map(|engine| engine.customizer_for(&identity))
            .collect();
        if customizers.is_empty() {
            return Ok(component);
        }
        customizers.sort_by_key(|customizer| customizer.priority());
        debug!(container = %self.id, %identity, customizers = customizers.len(), "Customizing component");
        customizers
            .iter()
            .try_fold(component, |component, customizer| customizer.customize(component))
    }

    fn build_lock(&self, identity: &Identity) -> Arc<Mutex<()>> {
        Arc::clone(
            self.build_locks
                .entry(identity.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    /// Producer with the highest precedence able to build `identity`
    pub(super) fn producer_for(&self, identity: &Identity) -> Result<Option<&RegisteredProducer>> {
        if let Some(tied) = tied_claimants(&self.producers, identity) {
            return Err(Error::ambiguous(identity, tied));
        }
        Ok(self
            .producers
            .iter()
            .find(|registered| registered.producer.can_build(identity)))
    }

    /// Identities a multi-query resolves to, in precedence order
    pub(super) fn candidate_identities(&self, query: &Query) -> Vec<Identity> {
        if let QueryKind::ByIdentity(identity) = query.kind() {
            let available = !self.activation.is_deactivated(identity)
                && (self.warehouse.stored_box(identity).is_some()
                    || self.producers.iter().any(|p| p.producer.can_build(identity)));
            return if available {
                vec![identity.clone()]
            } else {
                Vec::new()
            };
        }

        let target = query.target_type();
        let mut seen = HashSet::new();
        let listed = self
            .producers
            .iter()
            .flat_map(|registered| registered.producer.buildable_identities(target))
            .chain(self.warehouse.list_names());
        listed
            .filter(|identity| query.matches(identity))
            .filter(|identity| seen.insert(identity.clone()))
            .filter(|identity| !self.activation.is_deactivated(identity))
            .collect()
    }

    /// Other buildable identities sharing the raw type of `identity`
    fn similar_identities(&self, identity: &Identity) -> Vec<Identity> {
        let query = Query::by_raw_type(identity.declared_type().clone());
        self.candidate_identities(&query)
            .into_iter()
            .filter(|candidate| candidate != identity)
            .collect()
    }

    /// Walk the bill of materials graph of a query without building
    pub(super) fn precheck_query(
        &self,
        query: &Query,
        required_by: Option<&Identity>,
        path: &mut Vec<Identity>,
        verified: &mut HashSet<Identity>,
    ) -> Result<()> {
        if let QueryKind::ByIdentity(identity) = query.kind() {
            let available = self.precheck_identity(identity, path, verified)?;
            if !available && query.is_mandatory() {
                return Err(Error::missing_dependency(query, required_by)
                    .with_similar(&self.similar_identities(identity)));
            }
            return Ok(());
        }

        let mut available = false;
        for candidate in self.candidate_identities(query) {
            match self.precheck_identity(&candidate, path, verified) {
                Ok(found) => available |= found,
                Err(err) if err.is_cyclic() => return Err(err),
                Err(err @ Error::MissingMandatoryDependency { .. }) => {
                    debug!(container = %self.id, %query, identity = %candidate, error = %err, "Candidate unsatisfiable");
                }
                Err(err) => return Err(err),
            }
        }
        if !available && query.is_mandatory() {
            return Err(Error::missing_dependency(query, required_by));
        }
        Ok(())
    }

    /// Whether `identity` can be provided, walking its dependencies
    fn precheck_identity(
        &self,
        identity: &Identity,
        path: &mut Vec<Identity>,
        verified: &mut HashSet<Identity>,
    ) -> Result<bool> {
        if self.activation.is_deactivated(identity) {
            return Ok(false);
        }
        if verified.contains(identity) || self.warehouse.stored_box(identity).is_some() {
            return Ok(true);
        }
        if path.contains(identity) {
            return Err(Error::cyclic(path, identity));
        }
        let Some(registered) = self.producer_for(identity)? else {
            return Ok(false);
        };
        let engine = registered.producer.engine_for(identity)?;
        path.push(identity.clone());
        let walked = engine
            .bill_of_materials()
            .iter()
            .try_for_each(|query| self.precheck_query(query, Some(identity), path, verified));
        path.pop();
        walked?;
        verified.insert(identity.clone());
        Ok(true)
    }
}

struct Built {
    component: NamedComponent,
    dependencies: Vec<Identity>,
    duration: std::time::Duration,
}
