//! End-to-end integration tests for the AquaData answer pipeline.
//!
//! These tests wire the CSV store, the domain gate, the context
//! assembler, and the prompt builder to mock providers and pin the
//! four load-bearing behaviors: in-domain questions reach the model,
//! out-of-domain questions are refused without a call, oversized
//! context is hard-truncated before it crosses the provider boundary,
//! and upstream failures propagate after exactly one attempt.

use std::io::Write;
use std::sync::{Arc, Mutex};

use aquadata_core::error::ProviderError;
use aquadata_core::provider::{ChatRequest, ChatResponse, Provider, Usage};
use aquadata_core::record::{Record, RecordSet};
use aquadata_dataset::CsvStore;
use aquadata_engine::{
    AnswerPipeline, DomainClassifier, Outcome, PipelineSettings, REFUSAL,
};

// ── Mock Providers ───────────────────────────────────────────────────────

/// Returns scripted responses in sequence; panics when exhausted.
struct ScriptedProvider {
    responses: Mutex<Vec<ChatResponse>>,
    call_count: Mutex<usize>,
}

impl ScriptedProvider {
    fn new(responses: Vec<ChatResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            call_count: Mutex::new(0),
        }
    }

    fn text(response: &str) -> Self {
        Self::new(vec![text_response(response)])
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "e2e_mock"
    }

    async fn complete(&self, _request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let mut count = self.call_count.lock().unwrap();
        let responses = self.responses.lock().unwrap();
        if *count >= responses.len() {
            panic!(
                "ScriptedProvider exhausted: call #{}, have {}",
                *count,
                responses.len()
            );
        }
        let resp = responses[*count].clone();
        *count += 1;
        Ok(resp)
    }
}

/// Captures every request it sees and answers with fixed text.
struct RecordingProvider {
    requests: Mutex<Vec<ChatRequest>>,
}

impl RecordingProvider {
    fn new() -> Self {
        Self {
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
        Ok(text_response("grounded answer"))
    }
}

/// Fails every call, counting attempts.
struct FailingProvider {
    calls: Mutex<usize>,
}

impl FailingProvider {
    fn new() -> Self {
        Self {
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
        Err(ProviderError::Network("connection reset by peer".into()))
    }
}

fn text_response(text: &str) -> ChatResponse {
    ChatResponse {
        content: text.into(),
        usage: Some(Usage {
            prompt_tokens: 100,
            completion_tokens: 20,
            total_tokens: 120,
        }),
        model: "mock".into(),
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────

fn small_record_set() -> RecordSet {
    RecordSet::new(
        vec!["ESTADO".into(), "CUERPO DE AGUA".into(), "PH".into()],
        0,
        vec![
            Record::new(vec!["Jalisco".into(), "Lago de Chapala".into(), "7.8".into()]),
            Record::new(vec!["Sonora".into(), "Río Yaqui".into(), "8.1".into()]),
            Record::new(vec!["Jalisco".into(), "Río Lerma".into(), "6.9".into()]),
        ],
    )
}

/// A record set whose table rendering exceeds 50 000 characters.
fn oversized_record_set() -> RecordSet {
    let records = (0..1_200)
        .map(|i| {
            Record::new(vec![
                "Jalisco".into(),
                format!("Estación de monitoreo número {i} en el Lago de Chapala"),
                format!("{}.{}", 6 + i % 3, i % 10),
            ])
        })
        .collect();
    RecordSet::new(
        vec!["ESTADO".into(), "CUERPO DE AGUA".into(), "PH".into()],
        0,
        records,
    )
}

fn pipeline(provider: Arc<dyn Provider>) -> AnswerPipeline {
    AnswerPipeline::new(
        provider,
        DomainClassifier::default(),
        PipelineSettings::default(),
    )
}

// ── Scenario A: in-domain question reaches the model ─────────────────────

#[tokio::test]
async fn e2e_in_domain_question_is_answered() {
    let provider = Arc::new(ScriptedProvider::text(
        "El pH recomendado para riego está entre 6.5 y 8.4.",
    ));
    let pipeline = pipeline(provider.clone());
    let records = small_record_set().filter_by_region("Jalisco");

    let outcome = pipeline
        .ask("¿Cuál es el pH recomendado para riego?", &records)
        .await
        .expect("pipeline should succeed");

    assert_eq!(
        outcome,
        Outcome::Answered("El pH recomendado para riego está entre 6.5 y 8.4.".into())
    );
    assert_eq!(provider.calls(), 1);
}

// ── Scenario B: out-of-domain question refused, model never called ───────

#[tokio::test]
async fn e2e_out_of_domain_question_is_refused_without_model_call() {
    let provider = Arc::new(RecordingProvider::new());
    let pipeline = pipeline(provider.clone());

    let outcome = pipeline
        .ask("¿Cuál es la capital de Francia?", &small_record_set())
        .await
        .expect("refusal is a designed outcome, not an error");

    assert_eq!(outcome, Outcome::Refused);
    assert_eq!(outcome.text(), REFUSAL);
    assert_eq!(provider.calls(), 0);
}

// ── Scenario C: oversized context hard-truncated to the budget ───────────

#[tokio::test]
async fn e2e_oversized_context_is_truncated_at_the_provider_boundary() {
    let provider = Arc::new(RecordingProvider::new());
    let pipeline = pipeline(provider.clone());
    let records = oversized_record_set();

    let full = records.to_table_string();
    assert!(full.chars().count() > 50_000);

    pipeline
        .ask("¿Cómo está la calidad del agua?", &records)
        .await
        .unwrap();

    let user = provider.last_request().messages[1].content.clone();
    let ctx_start = user.find("Context: ").unwrap() + "Context: ".len();
    let ctx_end = user.find("\n\nQuestion: ").unwrap();
    let context = &user[ctx_start..ctx_end];

    assert_eq!(context.chars().count(), 12_000);
    let prefix: String = full.chars().take(12_000).collect();
    assert_eq!(context, prefix);
}

// ── Scenario D: upstream failure propagates, exactly one attempt ─────────

#[tokio::test]
async fn e2e_provider_failure_propagates_without_retry() {
    let provider = Arc::new(FailingProvider::new());
    let pipeline = pipeline(provider.clone());

    let err = pipeline
        .ask("calidad del agua en la presa", &small_record_set())
        .await
        .expect_err("upstream failure must surface as an error");

    assert!(matches!(
        err,
        aquadata_core::Error::Provider(ProviderError::Network(_))
    ));
    assert_eq!(provider.calls(), 1);
}

// ── Full wiring: CSV on disk → filter → pipeline ─────────────────────────

#[tokio::test]
async fn e2e_csv_to_answer() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(
        b"ESTADO,CUERPO DE AGUA,PH\n\
          Jalisco,Lago de Chapala,7.8\n\
          Sonora,R\xc3\xado Yaqui,8.1\n",
    )
    .unwrap();

    let records = CsvStore::load(file.path(), "ESTADO").unwrap();
    let filtered = records.filter_by_region("Sonora");
    assert_eq!(filtered.len(), 1);

    let provider = Arc::new(RecordingProvider::new());
    let pipeline = pipeline(provider.clone());

    let outcome = pipeline
        .ask("Is the river water drinkable?", &filtered)
        .await
        .unwrap();

    assert!(matches!(outcome, Outcome::Answered(_)));
    let user = provider.last_request().messages[1].content.clone();
    assert!(user.contains("Río Yaqui"));
    assert!(!user.contains("Chapala"));
}
