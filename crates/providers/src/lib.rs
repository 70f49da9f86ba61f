//! Model provider implementations for AquaData.
//!
//! One provider covers every backend we need: any endpoint exposing
//! the OpenAI-compatible `/chat/completions` contract (Groq by
//! default).

pub mod openai_compat;

pub use openai_compat::{GROQ_BASE_URL, OpenAiCompatProvider};
