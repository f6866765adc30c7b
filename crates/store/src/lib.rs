//! `sitelink-store`: Supabase PostgREST backend for the repair engine.
//!
//! Blocking reqwest client (no Tokio runtime required). Implements the
//! engine's `RecordStore` trait over the `weekly_plans` and
//! `construction_management` tables.

pub mod client;
pub mod config;

pub use client::RestStore;
pub use config::{ConfigError, StoreConfig};
