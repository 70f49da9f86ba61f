//! CLI subcommands and the shared wiring they use.

pub mod ask;
pub mod chat;
pub mod data;
pub mod doctor;
pub mod onboard;
pub mod serve;

use anyhow::{Context, Result, bail};
use aquadata_config::AppConfig;
use aquadata_core::record::RecordSet;
use aquadata_dataset::CsvStore;
use aquadata_engine::{AnswerPipeline, DomainClassifier, PipelineSettings, WATER_SYSTEM_PROMPT};
use aquadata_providers::OpenAiCompatProvider;
use std::sync::Arc;
use std::time::Duration;

/// Load the dataset named in the config.
pub(crate) fn load_records(config: &AppConfig) -> Result<Arc<RecordSet>> {
    let records = CsvStore::load(&config.dataset.path, &config.dataset.region_column)
        .with_context(|| format!("Failed to load dataset '{}'", config.dataset.path))?;
    Ok(Arc::new(records))
}

/// Restrict the record set to one region, failing on unknown labels so
/// typos don't silently ground the model in zero rows.
pub(crate) fn filter_region(records: &RecordSet, region: Option<&str>) -> Result<RecordSet> {
    match region {
        Some(region) => {
            let filtered = records.filter_by_region(region);
            if filtered.is_empty() {
                bail!(
                    "No records for region '{}'. Run `aquadata data regions` to list valid regions.",
                    region
                );
            }
            Ok(filtered)
        }
        None => Ok(records.clone()),
    }
}

/// Build the answer pipeline from config. Fails with setup guidance
/// when no API key is available.
pub(crate) fn build_pipeline(config: &AppConfig) -> Result<AnswerPipeline> {
    let Some(api_key) = config.provider.api_key.clone() else {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export GROQ_API_KEY='gsk_...'       (recommended)");
        eprintln!("    export AQUADATA_API_KEY='gsk_...'   (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!(
            "    {}",
            AppConfig::config_dir().join("config.toml").display()
        );
        eprintln!();
        eprintln!("  Get a Groq key at: https://console.groq.com/keys");
        eprintln!();
        bail!("No API key found. See above for setup instructions.");
    };

    let provider = Arc::new(OpenAiCompatProvider::new(
        "groq",
        &config.provider.base_url,
        api_key,
        Duration::from_secs(config.provider.request_timeout_secs),
    ));

    let settings = PipelineSettings {
        model: config.provider.model.clone(),
        temperature: config.provider.temperature,
        max_tokens: config.provider.max_tokens,
        max_context_chars: config.chat.max_context_chars,
        system_prompt: config
            .chat
            .system_prompt_override
            .clone()
            .unwrap_or_else(|| WATER_SYSTEM_PROMPT.into()),
    };

    tracing::debug!(
        model = %config.provider.model,
        max_context_chars = config.chat.max_context_chars,
        "pipeline configured"
    );

    Ok(AnswerPipeline::new(
        provider,
        DomainClassifier::default(),
        settings,
    ))
}
