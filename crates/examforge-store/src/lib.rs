//! examforge-store — File-backed capability implementations.
//!
//! Implements the `examforge-core` traits over a plain data directory:
//! JSON question/answer-key files per section, a single participant
//! document, and an append-only JSON-lines attempt log. Also hosts the
//! configuration loader and in-memory test doubles.

pub mod catalog;
pub mod config;
pub mod keys;
pub mod mock;
pub mod participants;
pub mod results;
