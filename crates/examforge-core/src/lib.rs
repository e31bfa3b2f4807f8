//! examforge-core — Quiz session engine, scoring, and statistics.
//!
//! This crate defines the fundamental data model, capability traits, and
//! the attempt/scoring/aggregation logic that the rest of examforge builds on.

pub mod engine;
pub mod error;
pub mod ledger;
pub mod model;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod traits;
