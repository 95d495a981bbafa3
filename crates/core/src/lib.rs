//! Fretwork Core - Shared types library.
//!
//! This crate provides the domain types used by the catalog binary:
//! type-safe IDs, validated usernames, and decimal prices.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! Repositories bind the raw representations (`i64`, `String`) and convert
//! back to these types at the boundary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
