//! RITUAL
//!
//! Personal concert tracking: shows, artists, venues, festivals,
//! expenses, memories, and yearly "Wrapped" statistics. This library
//! exposes modules for integration testing.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod services;
pub mod state;
pub mod storage;
pub mod templates;
pub mod test_utils;
pub mod validate;
