//! Executor Integration Tests
//!
//! Commands dispatched against a real sandbox root, their JSON wire form,
//! error mapping, and the typed JsonDocs facade.

#[path = "../common/mod.rs"]
mod common;

mod facade;
mod wire;
