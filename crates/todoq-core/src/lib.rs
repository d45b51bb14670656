//! Core domain types and the task query & suggestion engine for todoq.

pub mod config;
pub mod query;
pub mod store;
pub mod suggest;
pub mod task;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
