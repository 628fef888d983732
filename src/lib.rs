//! recordq - in-memory record queries and a validated patient registry
//!
//! - `query`: filter, sort, group and aggregate any `Record` collection
//! - `registry`: patient store with validation and a text export
//! - `cli`: the `recordq` binary's commands

pub mod analytics;
pub mod cli;
pub mod model;
pub mod observability;
pub mod query;
pub mod registry;
