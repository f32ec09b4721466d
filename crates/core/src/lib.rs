//! Trailhead Core - Shared types library.
//!
//! This crate provides common types used across the Trailhead components:
//! - `storefront` - Catalog and pre-order HTTP service
//! - `cli` - Operator tools for inspecting the catalog and stored pre-orders
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no file access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for order IDs, prices, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
