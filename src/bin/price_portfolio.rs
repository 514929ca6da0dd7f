//! Price every project in a portfolio CSV
//!
//! Reads `project_id,hectares,capex_usd,client_type,jurisdiction` rows, prices
//! them in parallel and writes one output row per project. Rows that fail
//! validation are written with an error message instead of figures.

use anyhow::{Context, Result};
use clap::Parser;
use esw_pricing::project::load_projects;
use esw_pricing::QuoteRunner;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "price_portfolio", about = "Batch-price a project portfolio")]
struct Args {
    /// Input portfolio CSV
    input: PathBuf,

    /// Output CSV path
    #[arg(long, short, default_value = "portfolio_quotes.csv")]
    output: PathBuf,

    /// JSON pricing schedule overriding the published rate card
    #[arg(long)]
    schedule: Option<PathBuf>,
}

/// One output row; figures are rounded display values
#[derive(Debug, Serialize, Default)]
struct QuoteRow {
    project_id: String,
    complexity_tier: Option<u8>,
    impact_score: Option<f64>,
    upfront_fee_usd: Option<f64>,
    success_fee_percent: Option<f64>,
    success_fee_estimate_usd: Option<f64>,
    traditional_cost_usd: Option<f64>,
    savings_usd: Option<f64>,
    savings_percent: Option<f64>,
    economic_value_usd: Option<f64>,
    subscription_tier: Option<String>,
    annual_tier_fee_usd: Option<f64>,
    net_present_value_usd: Option<f64>,
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading projects from {}...", args.input.display());

    let projects = load_projects(&args.input)
        .with_context(|| format!("loading portfolio {}", args.input.display()))?;
    println!("Loaded {} projects in {:?}", projects.len(), start.elapsed());

    let runner = match &args.schedule {
        Some(path) => QuoteRunner::from_json_path(path)
            .with_context(|| format!("loading pricing schedule {}", path.display()))?,
        None => QuoteRunner::new(),
    };

    let price_start = Instant::now();
    let outcomes = runner.run_portfolio(&projects);
    println!("Priced portfolio in {:?}", price_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut total_upfront = 0.0;
    let mut total_npv = 0.0;
    let mut rejected = 0usize;

    for (project_id, outcome) in outcomes {
        let row = match outcome {
            Ok(result) => {
                total_upfront += result.upfront_fee_usd;
                total_npv += result.net_present_value_usd;
                let s = result.summary();
                QuoteRow {
                    project_id,
                    complexity_tier: Some(s.complexity_tier),
                    impact_score: Some(s.impact_score),
                    upfront_fee_usd: Some(s.upfront_fee_usd),
                    success_fee_percent: Some(s.success_fee_percent),
                    success_fee_estimate_usd: Some(s.success_fee_estimate_usd),
                    traditional_cost_usd: Some(s.traditional_cost_usd),
                    savings_usd: Some(s.savings_usd),
                    savings_percent: Some(s.savings_percent),
                    economic_value_usd: Some(s.economic_value_usd),
                    subscription_tier: Some(s.subscription_tier.to_string()),
                    annual_tier_fee_usd: Some(s.annual_tier_fee_usd),
                    net_present_value_usd: Some(s.net_present_value_usd),
                    error: None,
                }
            }
            Err(e) => {
                rejected += 1;
                QuoteRow {
                    project_id,
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!("\nPortfolio Summary:");
    println!("  Projects:        {}", projects.len());
    println!("  Rejected:        {}", rejected);
    println!("  Total Upfront:   ${:.2}", total_upfront);
    println!("  Total NPV:       ${:.2}", total_npv);
    println!("\nResults written to: {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
