//! `aquadata ask` — One-shot question mode.

use anyhow::{Result, bail};
use aquadata_config::AppConfig;
use aquadata_engine::Outcome;

pub async fn run(question: &str, region: Option<&str>) -> Result<()> {
    // Caller-boundary precondition: the pipeline never sees an empty question
    if question.trim().is_empty() {
        bail!("Question must not be empty.");
    }

    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    let records = super::load_records(&config)?;
    let filtered = super::filter_region(&records, region)?;
    let pipeline = super::build_pipeline(&config)?;

    eprint!("  Thinking...");
    let outcome = pipeline.ask(question, &filtered).await?;
    eprint!("\r              \r");

    match outcome {
        Outcome::Answered(answer) => println!("{answer}"),
        Outcome::Refused => println!("{}", aquadata_engine::REFUSAL),
    }

    Ok(())
}
