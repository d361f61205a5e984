//! Utility functions and helpers for the intelliscan relay.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and API key scrubbing.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
