// intelliscan - Product image and barcode analysis relay backed by Gemini
// Author: kelexine (https://github.com/kelexine)

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod metrics;
pub mod models;
pub mod server;
pub mod utils;
pub mod vision;
