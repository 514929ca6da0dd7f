//! Client-facing value proposition built from a quote

use super::benchmarks::{
    cff_esw_acceptance, cff_uplift_points, CFF_BASELINE_ACCEPTANCE, IDB_NBS_RETURN_RATIO, MONTHS_ESW,
    MONTHS_TRADITIONAL,
};
use crate::format::{format_percent, format_usd_full};
use crate::pricing::PricingResult;
use chrono::NaiveDate;
use serde::Serialize;

const SLIDE_WIDTH: usize = 64;

/// Comparison of an ESW engagement against traditional alternatives
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueReport {
    pub traditional_cost_usd: f64,
    pub upfront_fee_usd: f64,
    pub savings_usd: f64,
    pub savings_percent: f64,
    pub success_fee_estimate_usd: f64,
    pub time_saved_months: u32,
    pub cff_baseline_acceptance: f64,
    pub cff_esw_acceptance: f64,
    /// Percentage points
    pub cff_uplift: f64,
    pub economic_return_ratio: f64,
    pub economic_value_usd: f64,
    pub propositions: Vec<String>,
}

impl ValueReport {
    pub fn from_result(result: &PricingResult) -> Self {
        let uplift = cff_uplift_points();
        let esw_acceptance = cff_esw_acceptance();

        let mut propositions = Vec::with_capacity(4);
        if result.savings_usd > 0.0 {
            propositions.push(format!(
                "ESW saves {} in upfront consulting fees compared with buying equivalent services \
                 from separate providers.",
                format_usd_full(result.savings_usd)
            ));
        } else {
            propositions.push(format!(
                "ESW delivers integrated, bankable-grade output for {} upfront, with a success fee \
                 tied to financial close.",
                format_usd_full(result.upfront_fee_usd)
            ));
        }
        propositions.push(format!(
            "ESW-structured applications raise C40 CFF acceptance probability by {:.0} points \
             ({} baseline to {}).",
            uplift,
            format_percent(CFF_BASELINE_ACCEPTANCE * 100.0, 0),
            format_percent(esw_acceptance * 100.0, 0)
        ));
        propositions.push(format!(
            "The project unlocks {} in projected economic value ({:.0}:1 return ratio, IDB NbS benchmark).",
            format_usd_full(result.economic_value_usd),
            IDB_NBS_RETURN_RATIO
        ));
        propositions.push(format!(
            "Bankable feasibility arrives {} months sooner than multi-vendor procurement \
             ({} months vs. {} months).",
            result.time_saved_months, MONTHS_ESW, MONTHS_TRADITIONAL
        ));

        Self {
            traditional_cost_usd: result.traditional_cost_usd,
            upfront_fee_usd: result.upfront_fee_usd,
            savings_usd: result.savings_usd,
            savings_percent: result.savings_percent,
            success_fee_estimate_usd: result.success_fee_estimate_usd,
            time_saved_months: result.time_saved_months,
            cff_baseline_acceptance: CFF_BASELINE_ACCEPTANCE,
            cff_esw_acceptance: esw_acceptance,
            cff_uplift: uplift,
            economic_return_ratio: IDB_NBS_RETURN_RATIO,
            economic_value_usd: result.economic_value_usd,
            propositions,
        }
    }

    /// Fixed-width text block for a presentation slide
    pub fn render_slide(&self, prepared_on: Option<NaiveDate>) -> String {
        let heavy = "=".repeat(SLIDE_WIDTH);
        let light = "-".repeat(SLIDE_WIDTH);

        let mut lines = vec![
            heavy.clone(),
            "  ESW VALUE PROPOSITION".to_string(),
            "  Ecosystem Services World".to_string(),
        ];
        if let Some(date) = prepared_on {
            lines.push(format!("  Prepared {}", date.format("%Y-%m-%d")));
        }
        lines.push(heavy.clone());
        lines.push(String::new());

        for (i, prop) in self.propositions.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, prop));
        }

        lines.push(String::new());
        lines.push(light.clone());
        lines.push(format!("  Traditional consulting cost:  {:>14}", format_usd_full(self.traditional_cost_usd)));
        lines.push(format!("  ESW upfront advisory fee:     {:>14}", format_usd_full(self.upfront_fee_usd)));
        lines.push(format!(
            "  Savings:                      {:>14}  ({})",
            format_usd_full(self.savings_usd),
            format_percent(self.savings_percent, 0)
        ));
        lines.push(light);
        lines.push(format!(
            "  Success fee (at close only):  {:>14}  (contingent)",
            format_usd_full(self.success_fee_estimate_usd)
        ));
        lines.push(format!("  Timeline acceleration:        {} months faster", self.time_saved_months));
        lines.push(format!(
            "  C40 acceptance probability:   {} -> {} (+{:.0} pts)",
            format_percent(self.cff_baseline_acceptance * 100.0, 0),
            format_percent(self.cff_esw_acceptance * 100.0, 0),
            self.cff_uplift
        ));
        lines.push(format!(
            "  Projected economic return:    {} ({:.0}:1)",
            format_usd_full(self.economic_value_usd),
            self.economic_return_ratio
        ));
        lines.push(heavy);

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{compute_pricing, PricingEngine, PricingSchedule};
    use crate::project::{ClientType, ProjectInput};

    #[test]
    fn test_report_from_culiacan_quote() {
        let result = compute_pricing(&ProjectInput::new(10.0, 40_000_000.0, ClientType::Government)).unwrap();
        let report = ValueReport::from_result(&result);

        assert_eq!(report.propositions.len(), 4);
        assert!(report.propositions[0].contains("$373,750"));
        assert!(report.propositions[1].contains("22 points"));
        assert!(report.propositions[2].contains("$160,000,000"));
        assert!(report.propositions[3].contains("6 months sooner"));
    }

    #[test]
    fn test_report_without_savings() {
        let mut schedule = PricingSchedule::default();
        schedule.base_rate_usd = 500_000.0;
        let result = PricingEngine::new(schedule)
            .unwrap()
            .price(&ProjectInput::new(10.0, 1_000_000.0, ClientType::Developer))
            .unwrap();
        let report = ValueReport::from_result(&result);

        assert!(report.savings_usd < 0.0);
        assert!(report.propositions[0].contains("$500,000 upfront"));
    }

    #[test]
    fn test_render_slide() {
        let result = compute_pricing(&ProjectInput::new(10.0, 40_000_000.0, ClientType::Government)).unwrap();
        let slide = ValueReport::from_result(&result).render_slide(NaiveDate::from_ymd_opt(2025, 3, 14));

        assert!(slide.starts_with(&"=".repeat(SLIDE_WIDTH)));
        assert!(slide.contains("Prepared 2025-03-14"));
        assert!(slide.contains("$395,000"));
        assert!(slide.contains("$21,250"));
        assert!(slide.contains("(95%)"));
        assert!(slide.contains("18% -> 40%"));
        assert!(slide.contains("(4:1)"));

        let undated = ValueReport::from_result(&result).render_slide(None);
        assert!(!undated.contains("Prepared"));
    }
}
