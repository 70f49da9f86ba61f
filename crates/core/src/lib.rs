//! # AquaData Core
//!
//! Domain types, traits, and error definitions for the AquaData
//! water-quality assistant. This crate has **zero framework dependencies**
//! — it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The one external seam (the language model) is a trait here.
//! Implementations live in their respective crates. This enables:
//! - Swapping backends via configuration
//! - Easy testing with mock/stub providers
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod message;
pub mod provider;
pub mod record;

// Re-export key types at crate root for ergonomics
pub use error::{DatasetError, Error, ProviderError, Result};
pub use message::{Message, Role};
pub use provider::{ChatRequest, ChatResponse, Provider, Usage};
pub use record::{Record, RecordSet};
