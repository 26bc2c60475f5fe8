//! Vehicle registry API library
//!
//! This library provides the `/veiculos` REST resource: domain types,
//! the repository port with its PostgreSQL and in-memory adapters, and
//! the axum router that exposes them.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
