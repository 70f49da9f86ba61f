//! `aquadata doctor` — Diagnose system health.

use anyhow::Result;
use aquadata_config::AppConfig;
use aquadata_core::provider::Provider;
use aquadata_dataset::CsvStore;
use aquadata_providers::OpenAiCompatProvider;
use std::time::Duration;

pub async fn run() -> Result<()> {
    println!("🩺 AquaData Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = match AppConfig::load() {
        Ok(config) => {
            if config_path.exists() {
                println!("  ✅ Config file valid");
            } else {
                println!("  ⚠️  No config file — using defaults (run `aquadata onboard`)");
            }
            config
        }
        Err(e) => {
            println!("  ❌ Config file invalid: {e}");
            println!("\n  ⚠️  1 issue found. See above for details.");
            return Ok(());
        }
    };

    // Check API key
    if config.has_api_key() {
        println!("  ✅ API key configured");
    } else {
        println!("  ⚠️  No API key — set GROQ_API_KEY or add api_key to config.toml");
        issues += 1;
    }

    // Check dataset
    match CsvStore::load(&config.dataset.path, &config.dataset.region_column) {
        Ok(records) => {
            println!(
                "  ✅ Dataset loaded: {} rows, {} regions",
                records.len(),
                records.regions().len()
            );
        }
        Err(e) => {
            println!("  ❌ Dataset unavailable: {e}");
            issues += 1;
        }
    }

    // Check provider reachability
    if let Some(api_key) = config.provider.api_key.clone() {
        let provider = OpenAiCompatProvider::new(
            "groq",
            &config.provider.base_url,
            api_key,
            Duration::from_secs(10),
        );
        match provider.list_models().await {
            Ok(models) if models.iter().any(|m| m == &config.provider.model) => {
                println!("  ✅ Provider reachable, model '{}' available", config.provider.model);
            }
            Ok(_) => {
                println!(
                    "  ⚠️  Provider reachable but model '{}' not listed",
                    config.provider.model
                );
                issues += 1;
            }
            Err(e) => {
                println!("  ❌ Provider unreachable: {e}");
                issues += 1;
            }
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
