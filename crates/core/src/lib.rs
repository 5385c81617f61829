//! Keizok Core - Shared types library.
//!
//! This crate provides common types used across all Keizok components:
//! - `dashboard` - The web dashboard (content generation, EC-site settings)
//! - `cli` - Command-line tools for seeding and inspecting the store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and enumerations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
