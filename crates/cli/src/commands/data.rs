//! `aquadata data` — Inspect the loaded dataset.

use anyhow::Result;
use aquadata_config::AppConfig;

pub async fn regions() -> Result<()> {
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    let records = super::load_records(&config)?;

    let regions = records.regions();
    println!("🌊 {} regions in {}", regions.len(), config.dataset.path);
    for region in regions {
        let count = records.filter_by_region(&region).len();
        println!("  {region}  ({count} rows)");
    }

    Ok(())
}

pub async fn preview(limit: usize, region: Option<&str>, json: bool) -> Result<()> {
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;
    let records = super::load_records(&config)?;
    let filtered = super::filter_region(&records, region)?;
    let head = filtered.head(limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&head)?);
    } else {
        println!(
            "🌊 {} of {} rows from {}",
            head.len(),
            filtered.len(),
            config.dataset.path
        );
        println!();
        print!("{}", head.to_table_string());
    }

    Ok(())
}
