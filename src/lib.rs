//! Book Details - lookup service for book details
//!
//! Answers details requests from the Google Books catalog and keeps the
//! answers in an in-memory cache with TTL expiration.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
