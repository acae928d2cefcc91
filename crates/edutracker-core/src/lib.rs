//! edutracker-core — Gradebook entities, grade analytics, and identity.
//!
//! This crate owns the raw classroom entities (users, assessments, results)
//! and every derivation the rest of edutracker renders: per-student
//! averages, subject mastery, class overview, roster queries, and login.

pub mod analytics;
pub mod config;
pub mod error;
pub mod identity;
pub mod model;
pub mod roster;
pub mod seed;
pub mod store;

pub use analytics::RISK_THRESHOLD;
pub use error::ValidationError;
pub use store::{EntityStore, MemoryStore};
