//! Atelier Core - Shared types library.
//!
//! This crate provides common types used across all Atelier components:
//! - `server` - JSON API backing the portfolio site
//! - `cli` - Command-line tools for seeding and token minting
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no filesystem
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the session role enum

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
