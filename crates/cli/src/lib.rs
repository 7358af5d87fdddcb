//! Storekeep CLI library.
//!
//! This crate provides the maintenance commands as a library, allowing them
//! to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod commands;
pub mod config;
pub mod db;
