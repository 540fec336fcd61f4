//! FashionZone Core - Shared types and entity schema.
//!
//! This crate provides the types used across all FashionZone components:
//! - `server` - REST API server
//! - `client` - Typed API client
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. The entity schema here is the single source of
//! truth for both the server's storage layer and the client's wire types.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and usernames
//! - [`entities`] - Entity rows and their insert shapes with validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod entities;
pub mod types;

pub use entities::*;
pub use types::*;
