//! # AquaData Engine
//!
//! The answer pipeline and its three stages:
//!
//! 1. **Classifier** — lexical domain gate deciding whether a question
//!    is about water at all.
//! 2. **Context** — bounded-size textual rendering of the filtered
//!    record set that grounds the model.
//! 3. **Prompt** — the fixed two-message sequence sent to the model.
//!
//! [`pipeline::AnswerPipeline`] orchestrates the stages around a single
//! provider call and maps the result to exactly one outcome.

pub mod classifier;
pub mod context;
pub mod pipeline;
pub mod prompt;

pub use classifier::{DomainClassifier, Lexicon};
pub use context::{DEFAULT_MAX_CONTEXT_CHARS, build_context};
pub use pipeline::{AnswerPipeline, Outcome, PipelineSettings, REFUSAL};
pub use prompt::{WATER_SYSTEM_PROMPT, build_messages};
