//! Answer pipeline — orchestration of gate, context, prompt, and the
//! single model call.
//!
//! # Flow
//!
//! 1. Classify the question; out-of-domain → [`Outcome::Refused`],
//!    model never called
//! 2. Build the bounded context from the already-filtered record set
//! 3. Build the two-message prompt
//! 4. One provider call — no retry, no cache
//! 5. Success → [`Outcome::Answered`] with the text unmodified;
//!    provider failure → `Err`, propagated verbatim
//!
//! Every entity involved is created and dropped within one `ask`
//! invocation; the pipeline holds no mutable cross-run state, so one
//! instance behind an `Arc` serves concurrent callers without
//! synchronization.

use crate::classifier::DomainClassifier;
use crate::context::{DEFAULT_MAX_CONTEXT_CHARS, build_context};
use crate::prompt::{WATER_SYSTEM_PROMPT, build_messages};
use aquadata_core::provider::{ChatRequest, Provider};
use aquadata_core::record::RecordSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Fixed user-facing copy for out-of-domain questions.
pub const REFUSAL: &str = "Lo siento, solo puedo responder preguntas relacionadas con la calidad del agua, cuerpos de agua y sus usos prácticos. Por favor, reformula tu pregunta para que se relacione con estos temas.";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama-3.2-3b-preview";

/// The terminal outcome of one question/answer cycle.
///
/// Failures are `Err`, never an `Outcome` — a failed call yields
/// exactly one error, not a truncated or guessed answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The question was out of domain; the model was never called.
    Refused,
    /// The model's generated text, unmodified.
    Answered(String),
}

impl Outcome {
    /// The user-facing text for this outcome.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Refused => REFUSAL,
            Outcome::Answered(answer) => answer,
        }
    }
}

/// Fixed per-run call configuration. Constants from config, never
/// tunable per request.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub max_context_chars: usize,
    pub system_prompt: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: 0.7,
            max_tokens: 250,
            max_context_chars: DEFAULT_MAX_CONTEXT_CHARS,
            system_prompt: WATER_SYSTEM_PROMPT.into(),
        }
    }
}

/// Orchestrates classifier → context → prompt → provider call.
pub struct AnswerPipeline {
    provider: Arc<dyn Provider>,
    classifier: DomainClassifier,
    settings: PipelineSettings,
}

impl AnswerPipeline {
    pub fn new(
        provider: Arc<dyn Provider>,
        classifier: DomainClassifier,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            provider,
            classifier,
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Answer one question against the given (already filtered) record
    /// set.
    ///
    /// Callers must reject empty questions before invoking this; the
    /// pipeline assumes a non-empty question (an empty one would simply
    /// be refused by the gate).
    pub async fn ask(
        &self,
        question: &str,
        records: &RecordSet,
    ) -> Result<Outcome, aquadata_core::Error> {
        if !self.classifier.is_in_domain(question) {
            info!("question out of domain, refusing");
            return Ok(Outcome::Refused);
        }

        let context = build_context(records, self.settings.max_context_chars);
        debug!(
            rows = records.len(),
            context_chars = context.chars().count(),
            "context assembled"
        );

        let messages = build_messages(&self.settings.system_prompt, &context, question);
        let request = ChatRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: self.settings.temperature,
            max_tokens: Some(self.settings.max_tokens),
        };

        let started = Instant::now();
        let response = self.provider.complete(request).await?;

        info!(
            model = %response.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            answer_len = response.content.len(),
            "answer generated"
        );

        Ok(Outcome::Answered(response.content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquadata_core::error::ProviderError;
    use aquadata_core::provider::{ChatResponse, Usage};
    use aquadata_core::record::Record;
    use std::sync::Mutex;

    /// Returns a fixed answer and records every request it sees.
    struct RecordingProvider {
        answer: String,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl RecordingProvider {
        fn new(answer: &str) -> Self {
            Self {
                answer: answer.into(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn last_request(&self) -> ChatRequest {
            self.requests.lock().unwrap().last().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Provider for RecordingProvider {
        fn name(&self) -> &str {
            "recording_mock"
        }

        async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
            self.requests.lock().unwrap().push(request);
            Ok(ChatResponse {
                content: self.answer.clone(),
                usage: Some(Usage {
                    prompt_tokens: 100,
                    completion_tokens: 20,
                    total_tokens: 120,
                }),
                model: "llama-3.2-3b-preview".into(),
            })
        }
    }

    /// Fails every call, counting attempts.
    struct FailingProvider {
        error: ProviderError,
        calls: Mutex<usize>,
    }

    impl FailingProvider {
        fn new(error: ProviderError) -> Self {
            Self {
                error,
                calls: Mutex::new(0),
            }
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait::async_trait]
    impl Provider for FailingProvider {
        fn name(&self) -> &str {
            "failing_mock"
        }

        async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, ProviderError> {
            *self.calls.lock().unwrap() += 1;
            Err(self.error.clone())
        }
    }

    fn records() -> RecordSet {
        RecordSet::new(
            vec!["ESTADO".into(), "CUERPO".into(), "PH".into()],
            0,
            vec![
                Record::new(vec!["Jalisco".into(), "Lago de Chapala".into(), "7.8".into()]),
                Record::new(vec!["Jalisco".into(), "Río Lerma".into(), "6.9".into()]),
            ],
        )
    }

    fn pipeline(provider: Arc<dyn Provider>) -> AnswerPipeline {
        AnswerPipeline::new(
            provider,
            DomainClassifier::default(),
            PipelineSettings::default(),
        )
    }

    #[tokio::test]
    async fn in_domain_question_reaches_the_model() {
        let provider = Arc::new(RecordingProvider::new("El pH es adecuado para riego."));
        let pipeline = pipeline(provider.clone());

        let outcome = pipeline
            .ask("¿Cuál es el pH recomendado para riego?", &records())
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Answered("El pH es adecuado para riego.".into())
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn out_of_domain_question_refused_without_model_call() {
        let provider = Arc::new(RecordingProvider::new("unused"));
        let pipeline = pipeline(provider.clone());

        let outcome = pipeline
            .ask("¿Cuál es la capital de Francia?", &records())
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Refused);
        assert_eq!(outcome.text(), REFUSAL);
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn request_carries_fixed_call_configuration() {
        let provider = Arc::new(RecordingProvider::new("ok"));
        let pipeline = pipeline(provider.clone());

        pipeline.ask("calidad del agua", &records()).await.unwrap();

        let request = provider.last_request();
        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.max_tokens, Some(250));
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.messages.len(), 2);
    }

    #[tokio::test]
    async fn context_in_prompt_is_the_table_rendering() {
        let provider = Arc::new(RecordingProvider::new("ok"));
        let pipeline = pipeline(provider.clone());
        let set = records();

        pipeline.ask("calidad del agua", &set).await.unwrap();

        let user = provider.last_request().messages[1].content.clone();
        assert!(user.contains(&set.to_table_string()));
        assert!(user.contains("Question: calidad del agua"));
    }

    #[tokio::test]
    async fn provider_error_propagates_after_one_attempt() {
        let provider = Arc::new(FailingProvider::new(ProviderError::Network(
            "connection refused".into(),
        )));
        let pipeline = pipeline(provider.clone());

        let err = pipeline
            .ask("calidad del agua", &records())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            aquadata_core::Error::Provider(ProviderError::Network(_))
        ));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn empty_record_set_still_answers() {
        let provider = Arc::new(RecordingProvider::new("Sin datos disponibles."));
        let pipeline = pipeline(provider.clone());
        let empty = records().filter_by_region("nowhere");

        let outcome = pipeline.ask("calidad del agua", &empty).await.unwrap();

        assert!(matches!(outcome, Outcome::Answered(_)));
        let user = provider.last_request().messages[1].content.clone();
        assert!(user.starts_with("Context: \n\nQuestion: "));
    }
}
