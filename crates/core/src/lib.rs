//! Mercatus Core - Shared types library.
//!
//! This crate provides common value types used across the Mercatus search
//! gateway components:
//! - `search` - Aggregation gateway composing item views from upstream services
//! - `integration-tests` - End-to-end tests against mocked upstreams
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Prices and generic page envelopes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
