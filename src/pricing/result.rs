//! Quote result structures

use super::SubscriptionTier;
use crate::project::{ClientType, Jurisdiction};
use crate::roi::ServiceScope;
use serde::{Deserialize, Serialize};

/// Fee structure emphasis chosen from the impact score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeRationale {
    /// Upfront fee discounted; compensation shifts to the success fee
    HighImpact,
    /// Upfront covers advisory cost, success fee rewards completion
    Balanced,
    /// Upfront fee carries the full advisory cost
    EarlyStage,
}

impl FeeRationale {
    /// Client-facing explanation of the fee structure
    ///
    /// `high_impact_multiplier` is the schedule's upfront multiplier above the
    /// high-impact threshold; the quoted discount is derived from it.
    pub fn description(&self, high_impact_multiplier: f64) -> String {
        match self {
            FeeRationale::HighImpact => format!(
                "High-impact project: upfront fee discounted {:.0}%, with ESW compensated mainly \
                 through the success fee at financial close.",
                (1.0 - high_impact_multiplier) * 100.0
            ),
            FeeRationale::Balanced => "Medium-impact project: the upfront fee covers advisory costs and the \
                 success fee rewards deal completion."
                .to_string(),
            FeeRationale::EarlyStage => "Early-stage project: the upfront fee covers the full advisory cost and \
                 the success fee stays at the low end of the schedule."
                .to_string(),
        }
    }
}

/// Full-precision quote for one project
///
/// `savings_usd` and `net_present_value_usd` may be negative and are reported as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub complexity_tier: u8,
    pub impact_score: f64,
    pub upfront_fee_usd: f64,
    pub high_impact_discount_applied: bool,
    /// Fraction of capex charged at close (0.015 = 1.5%)
    pub success_fee_percent: f64,
    pub success_fee_estimate_usd: f64,
    pub traditional_cost_usd: f64,
    pub service_scope: ServiceScope,
    pub savings_usd: f64,
    pub savings_percent: f64,
    pub economic_value_usd: f64,
    pub time_saved_months: u32,
    pub subscription_tier: SubscriptionTier,
    pub annual_tier_fee_usd: f64,
    pub tier_includes: Vec<String>,
    pub net_present_value_usd: f64,
    pub fee_rationale: FeeRationale,
    pub client_type: ClientType,
    pub jurisdiction: Option<Jurisdiction>,
}

impl PricingResult {
    /// Display values, rounded once from full precision
    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            complexity_tier: self.complexity_tier,
            impact_score: round_to(self.impact_score, 1),
            upfront_fee_usd: self.upfront_fee_usd.round(),
            success_fee_percent: round_to(self.success_fee_percent * 100.0, 1),
            success_fee_estimate_usd: self.success_fee_estimate_usd.round(),
            traditional_cost_usd: self.traditional_cost_usd.round(),
            savings_usd: self.savings_usd.round(),
            savings_percent: round_to(self.savings_percent, 1),
            economic_value_usd: self.economic_value_usd.round(),
            time_saved_months: self.time_saved_months,
            subscription_tier: self.subscription_tier,
            annual_tier_fee_usd: self.annual_tier_fee_usd.round(),
            net_present_value_usd: self.net_present_value_usd.round(),
        }
    }
}

/// Rounded view of a quote for display
///
/// Every field is rounded independently from the unrounded result, so no
/// rounded value is ever fed back into another calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub complexity_tier: u8,
    /// One decimal place
    pub impact_score: f64,
    pub upfront_fee_usd: f64,
    /// Percent with one decimal place (1.5 = 1.5%)
    pub success_fee_percent: f64,
    pub success_fee_estimate_usd: f64,
    pub traditional_cost_usd: f64,
    pub savings_usd: f64,
    /// Percent with one decimal place
    pub savings_percent: f64,
    pub economic_value_usd: f64,
    pub time_saved_months: u32,
    pub subscription_tier: SubscriptionTier,
    pub annual_tier_fee_usd: f64,
    pub net_present_value_usd: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(3.54, 1), 3.5);
        assert_eq!(round_to(94.6202, 1), 94.6);
        assert_eq!(round_to(-2.25, 0), -2.0);
    }

    #[test]
    fn test_rationale_descriptions_distinct() {
        let texts = [
            FeeRationale::HighImpact.description(0.6),
            FeeRationale::Balanced.description(0.6),
            FeeRationale::EarlyStage.description(0.6),
        ];
        assert_ne!(texts[0], texts[1]);
        assert_ne!(texts[1], texts[2]);
        assert!(texts[0].contains("discounted 40%"));
    }

    #[test]
    fn test_high_impact_description_follows_multiplier() {
        let text = FeeRationale::HighImpact.description(0.75);
        assert!(text.contains("discounted 25%"), "{}", text);
        assert!(!text.contains("40%"));

        assert_eq!(FeeRationale::Balanced.description(0.75), FeeRationale::Balanced.description(0.6));
    }
}
