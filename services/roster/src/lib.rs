//! Roster service library crate.
//!
//! # Purpose
//! Exposes the HTTP API, the secured store, the seeder, configuration, and
//! observability wiring for use by the binary and tests.
//!
//! # Notes
//! Access decisions live in `bastion-authz`; this crate only resolves the
//! caller and passes the principal down to the secured store.
pub mod api;
pub mod app;
pub mod config;
pub mod model;
pub mod observability;
pub mod seed;
pub mod store;
