//! Axum-based HTTP server implementation for the intelliscan relay.
//!
//! This module sets up the HTTP surface: the product scan endpoint, the root
//! liveness probe, and the metrics endpoint. Requests are handed to a
//! [`ProductAnalyzer`](crate::analyzer::ProductAnalyzer) and nothing else is
//! shared between them.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (scan, root, metrics).
//! - `middleware`: CORS policy and request ID tracking.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::ROOT_MESSAGE;
pub use routes::{create_router, AppState};
