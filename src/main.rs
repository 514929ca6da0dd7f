//! ESW Pricing CLI
//!
//! Command-line interface for pricing a single project

use anyhow::{Context, Result};
use clap::Parser;
use esw_pricing::{
    format::{format_percent, format_usd, format_usd_full},
    ClientType, Jurisdiction, PricingEngine, PricingSchedule, ProjectInput, QuoteSummary, ValueReport,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "esw_pricing", version, about = "Nature asset ROI estimator")]
struct Args {
    /// Site area in hectares
    #[arg(long, allow_hyphen_values = true)]
    hectares: f64,

    /// Total project capex in USD
    #[arg(long, allow_hyphen_values = true)]
    capex: f64,

    /// government, ngo or developer (other values price at the full rate)
    #[arg(long, default_value = "developer")]
    client_type: String,

    /// Site jurisdiction, e.g. "Mexico" or "EU (CSRD Region)"
    #[arg(long)]
    jurisdiction: Option<String>,

    /// JSON pricing schedule overriding the published rate card (or ESW_SCHEDULE_PATH)
    #[arg(long)]
    schedule: Option<PathBuf>,

    /// Print the quote as JSON
    #[arg(long)]
    json: bool,

    /// Also print the value proposition slide
    #[arg(long)]
    slide: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteOutput<'a> {
    input: &'a ProjectInput,
    summary: QuoteSummary,
    result: &'a esw_pricing::PricingResult,
    value_report: ValueReport,
}

/// Upfront fee against the multi-vendor benchmark; no saving is claimed when ESW costs more
fn comparison_line(summary: &QuoteSummary) -> String {
    if summary.savings_usd > 0.0 {
        format!(
            "save {} ({})",
            format_usd(summary.savings_usd),
            format_percent(summary.savings_percent, 1)
        )
    } else {
        format!(
            "integrated delivery for {} upfront, success fee tied to financial close",
            format_usd(summary.upfront_fee_usd)
        )
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let schedule_path = args
        .schedule
        .clone()
        .or_else(|| std::env::var_os("ESW_SCHEDULE_PATH").map(PathBuf::from));
    let schedule = match &schedule_path {
        Some(path) => PricingSchedule::from_json_path(path)
            .with_context(|| format!("loading pricing schedule {}", path.display()))?,
        None => PricingSchedule::default(),
    };
    let engine = PricingEngine::new(schedule).context("invalid pricing schedule")?;

    let mut input = ProjectInput::new(args.hectares, args.capex, ClientType::parse(&args.client_type));
    if let Some(label) = &args.jurisdiction {
        input = input.with_jurisdiction(Jurisdiction::from_label(label));
    }

    let result = engine.price(&input).context("invalid project parameters")?;
    let summary = result.summary();
    let report = ValueReport::from_result(&result);

    if args.json {
        let output = QuoteOutput {
            input: &input,
            summary,
            result: &result,
            value_report: report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("ESW Pricing v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Project:");
    println!("  Site Area:     {} ha", args.hectares);
    println!("  CAPEX:         {}", format_usd_full(args.capex));
    println!("  Client Type:   {}", input.client_type);
    if let Some(j) = input.jurisdiction {
        println!("  Jurisdiction:  {}", j);
    }
    println!();

    println!("Estimated Net Present Value: {}", format_usd(summary.net_present_value_usd));
    println!("Impact Score:                {:.1} / 10.0 (complexity tier {})", summary.impact_score, summary.complexity_tier);
    println!();

    println!("ESW Fee Structure:");
    println!("  Upfront Advisory Fee:  {}", format_usd(summary.upfront_fee_usd));
    println!(
        "  Success Fee ({} at close): {}",
        format_percent(summary.success_fee_percent, 1),
        format_usd(summary.success_fee_estimate_usd)
    );
    println!(
        "  Subscription Tier:     {} ({}/yr)",
        summary.subscription_tier,
        format_usd(summary.annual_tier_fee_usd)
    );
    println!("  vs. Traditional Consulting: {}", comparison_line(&summary));
    println!("  {}", result.fee_rationale.description(engine.schedule().high_impact_multiplier));
    println!();

    println!("Value Metrics:");
    println!("  Projected Economic Return: {}", format_usd(summary.economic_value_usd));
    println!("  Time Saved:                {} months", summary.time_saved_months);

    if args.slide {
        println!();
        println!("{}", report.render_slide(Some(chrono::Local::now().date_naive())));
    }

    Ok(())
}
