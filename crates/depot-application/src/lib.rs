//! Application Layer - Depot
//!
//! Ports of the component resolution engine. The traits here are the seams
//! between the container algorithm and the pieces plugged into it:
//!
//! - [`ports::Producer`] and [`ports::Engine`]: what can be built, and how
//! - [`ports::ComponentBox`] and [`ports::Warehouse`]: where built components live
//! - [`ports::ActivationSource`]: external flags deciding what is active
//! - [`ports::CustomizerEngine`]: post-build decoration of components
//! - [`ports::registry`]: compile-time discovery of producers via `linkme`
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `depot-domain`: identities, queries, components and errors
//! - `linkme` for the producer discovery slice

pub mod ports;

pub use ports::*;
