//! Core types for Storekeep.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod account;
pub mod email;
pub mod entity;
pub mod id;

pub use account::Account;
pub use email::{Email, EmailError};
pub use entity::EntityKind;
pub use id::AccountId;
