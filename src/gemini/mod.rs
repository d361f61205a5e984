// Gemini API client module
// Author: kelexine (https://github.com/kelexine)

mod client;
pub mod prompt;

pub use client::GeminiClient;
pub use prompt::build_prompt;
