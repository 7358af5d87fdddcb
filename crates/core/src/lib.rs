//! Storekeep Core - Shared types and the database purge engine.
//!
//! This crate backs the Storekeep maintenance tooling:
//! - `cli` - Command-line tools for database maintenance
//!
//! # Architecture
//!
//! The core crate contains types, traits, and the purge orchestration - no
//! sockets, no database driver, no process I/O beyond an injected report
//! writer. Concrete persistence lives in the binaries that depend on it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and domain models (ids, emails, accounts,
//!   entity categories)
//! - [`purge`] - The clear-database engine: store capability trait, executor,
//!   report types, and an in-memory store for tests

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod purge;
pub mod types;

pub use purge::{
    MemoryStore, PurgeError, PurgeOptions, PurgeReport, PurgeStep, PurgeStore, StoreError,
    run_purge,
};
pub use types::*;
