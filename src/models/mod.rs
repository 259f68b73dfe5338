//! Data models for the saloon backend.
//!
//! Field names serialize in camelCase to match the existing saloon client.

mod saloon;

pub use saloon::*;
