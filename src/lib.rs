//! Back end for a movie discovery and streaming-style browser UI.
//!
//! Layers, leaves first: [`storage`] persists JSON under namespaced keys,
//! [`cache`] memoizes catalog responses, [`services`] talk to TMDB and keep
//! accounts, [`controller`] holds the per-session application state and
//! [`routes`] exposes it over HTTP.

pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use routes::create_router;
pub use state::AppState;
