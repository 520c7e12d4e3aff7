//! Core types for Optica.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod name;
pub mod provenance;
pub mod scope;

pub use id::*;
pub use name::{ClientName, ClientNameError};
pub use provenance::Provenance;
pub use scope::Scope;
