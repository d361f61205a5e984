//! Data models for the scanner relay.
//!
//! - `scan`: the request-scoped values exchanged with HTTP clients.
//! - `gemini`: the wire format of the Gemini `generateContent` API.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod gemini;
pub mod scan;

pub use scan::{AnalysisResult, RootStatus, ScanRequest};
