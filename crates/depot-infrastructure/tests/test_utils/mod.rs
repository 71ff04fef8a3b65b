//! Shared fixtures for the infrastructure tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use depot_domain::{
    BillOfMaterials, Closeable, Component, Error, Identity, NamedComponent, Query, Result,
    RawType, TypeDescriptor,
};
use depot_infrastructure::engines::StdEngine;
use depot_infrastructure::producers::SingleIdentityProducer;

/// `String` identity named `name`
pub fn string_id(name: &'static str) -> Identity {
    Identity::of::<String>(name)
}

/// Mandatory query for the `String` identity `name`
pub fn string_query(name: &'static str) -> Query {
    Query::by_identity(string_id(name))
}

/// Producer building `value` under the `String` identity `name`
pub fn string_producer(name: &'static str, value: &str, priority: i32) -> SingleIdentityProducer {
    SingleIdentityProducer::new(
        StdEngine::value(string_id(name), value.to_string()).with_priority(priority),
    )
}

/// Producer of the `String` identity `name` depending on `dependencies`
pub fn dependent_producer(
    name: &'static str,
    dependencies: Vec<Query>,
) -> SingleIdentityProducer {
    let bom = BillOfMaterials::of(dependencies);
    SingleIdentityProducer::new(StdEngine::of(string_id(name), bom, move |_| {
        Ok(name.to_string())
    }))
}

/// Raw type of plugins used by type-query tests
pub fn plugin_raw() -> RawType {
    RawType::named("Plugin")
}

/// Plugin implementation type extending `Plugin`
pub fn plugin_impl(name: &'static str) -> TypeDescriptor {
    TypeDescriptor::new(RawType::named(name).extends("Plugin"))
}

/// Producer of a plugin implementation
pub fn plugin_producer(type_name: &'static str, name: &'static str, priority: i32) -> SingleIdentityProducer {
    SingleIdentityProducer::new(
        StdEngine::value(
            Identity::new(plugin_impl(type_name), name),
            name.to_string(),
        )
        .with_priority(priority),
    )
}

/// Records the order in which resources are closed
#[derive(Clone, Default)]
pub struct CloseLog {
    closed: Arc<Mutex<Vec<String>>>,
}

impl CloseLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.closed.lock().unwrap().push(name.to_string());
    }

    pub fn closed(&self) -> Vec<String> {
        self.closed.lock().unwrap().clone()
    }
}

/// Closeable resource reporting to a [`CloseLog`]
pub struct Resource {
    pub name: String,
    log: CloseLog,
    fail: bool,
}

impl Resource {
    pub fn new(name: &str, log: &CloseLog) -> Self {
        Self {
            name: name.to_string(),
            log: log.clone(),
            fail: false,
        }
    }

    pub fn failing(name: &str, log: &CloseLog) -> Self {
        Self {
            fail: true,
            ..Self::new(name, log)
        }
    }
}

impl Closeable for Resource {
    fn close(&self) -> Result<()> {
        self.log.record(&self.name);
        if self.fail {
            Err(Error::close(format!("{} refused to close", self.name)))
        } else {
            Ok(())
        }
    }
}

/// Resource identity named `name`
pub fn resource_id(name: &'static str) -> Identity {
    Identity::of::<Resource>(name)
}

/// Closeable named component
pub fn resource_component(name: &'static str, log: &CloseLog) -> NamedComponent {
    NamedComponent::new(resource_id(name), 0, Component::closeable(Resource::new(name, log)))
}

/// Producer of a closeable resource depending on `dependencies`
pub fn resource_producer(
    name: &'static str,
    log: &CloseLog,
    dependencies: Vec<Query>,
) -> SingleIdentityProducer {
    let log = log.clone();
    SingleIdentityProducer::new(StdEngine::new(
        resource_id(name),
        BillOfMaterials::of(dependencies),
        move |_| Ok(Component::closeable(Resource::new(name, &log))),
    ))
}

/// Engine counting its builds
pub fn counting_engine(identity: Identity, builds: &Arc<AtomicUsize>) -> StdEngine {
    let builds = Arc::clone(builds);
    StdEngine::no_deps(identity, move || {
        let count = builds.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("build #{count}"))
    })
}
