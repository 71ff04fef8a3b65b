//! Container behaviour tests

mod activation_tests;
mod discovery_tests;
