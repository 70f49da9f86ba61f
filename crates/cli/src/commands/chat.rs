//! `aquadata chat` — Interactive question loop.
//!
//! Every question runs one full pass through the pipeline; there is no
//! conversation history — the scrollback on screen never feeds back
//! into prompts.

use anyhow::Result;
use aquadata_config::AppConfig;
use aquadata_engine::Outcome;
use aquadata_gateway::DATA_SOURCES;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(region: Option<&str>) -> Result<()> {
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    let records = super::load_records(&config)?;
    let filtered = super::filter_region(&records, region)?;
    let pipeline = super::build_pipeline(&config)?;

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        AquaData 🌊 — Interactive Mode        ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:    {}", config.provider.model);
    println!("  Region:   {}", region.unwrap_or("all"));
    println!("  Rows:     {}", filtered.len());
    println!("  Fuentes:  {DATA_SOURCES}");
    println!();
    println!("  Pregunta sobre calidad del agua, limpieza de cuerpos");
    println!("  de agua o usos prácticos. Type 'exit' or Ctrl+D to quit.");
    println!();

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let question = line.trim();

        if matches!(question, "exit" | "quit" | "/exit" | "/quit" | ":q") {
            break;
        }

        // Empty input re-prompts without invoking the pipeline
        if question.is_empty() {
            print!("  You > ");
            std::io::stdout().flush()?;
            continue;
        }

        eprint!("  ...");
        match pipeline.ask(question, &filtered).await {
            Ok(outcome) => {
                eprint!("\r     \r");
                println!();
                let text = match &outcome {
                    Outcome::Answered(answer) => answer.as_str(),
                    Outcome::Refused => aquadata_engine::REFUSAL,
                };
                for line in text.lines() {
                    println!("  AquaData > {line}");
                }
                println!();
            }
            Err(e) => {
                eprint!("\r     \r");
                eprintln!("  [Error] {e}");
                println!();
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  ¡Hasta luego! 🌊");
    println!();

    Ok(())
}
