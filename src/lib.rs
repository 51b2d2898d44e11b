//! Chirpy: a small social-posting backend.
//!
//! Users post short "chirps" that are length-checked and scrubbed of banned
//! words before they are stored. Static assets under `/app` are counted and
//! the count is exposed on the admin surface.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod moderation;
pub mod state;
pub mod store;
