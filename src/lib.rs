//! # rollcall-rs
//!
//! Synchronized compliance checklist engine.
//!
//! Seeds a shared task store on first use, keeps every client's local view
//! consistent with the remote authoritative store under concurrent edits,
//! applies idempotent field-level mutations, and derives rollup metrics
//! from the current task set. Postgres LISTEN/NOTIFY provides the push
//! channel; an in-memory store backs tests and demos.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod model;
pub mod report;
pub mod rollup;
pub mod store;
pub mod telemetry;
