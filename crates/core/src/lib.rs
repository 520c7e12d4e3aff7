//! Optica Core - Shared types library.
//!
//! This crate provides common types used across all Optica components:
//! - `admin` - Shop, client and prescription administration (HTTP API + roster resolver)
//! - `cli` - Command-line tools for migrations, demo data and roster inspection
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, client names, roster
//!   provenance and roster scopes
//! - [`collation`] - Locale-aware, case-insensitive ordering of display names

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod collation;
pub mod types;

pub use collation::compare_names;
pub use types::*;
