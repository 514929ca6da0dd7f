//! Quote computation
//!
//! Pure and deterministic: no I/O, no randomness, no shared mutable state.
//! The engine can be shared by reference across threads.

use super::{FeeRationale, PricingResult, PricingSchedule, ScheduleError};
use crate::error::{require_positive, InputField, ValidationError};
use crate::project::ProjectInput;
use crate::roi::{benchmarks, ServiceScope};

/// Impact score from which the fee structure is described as balanced
const BALANCED_RATIONALE_IMPACT: f64 = 4.0;

/// Quote engine over a fixed, validated pricing schedule
///
/// `Default` uses the published rate card.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    schedule: PricingSchedule,
}

impl PricingEngine {
    /// Create an engine, rejecting schedules that break the rate card rules
    pub fn new(schedule: PricingSchedule) -> Result<Self, ScheduleError> {
        schedule.validate()?;
        Ok(Self { schedule })
    }

    pub fn schedule(&self) -> &PricingSchedule {
        &self.schedule
    }

    /// Price a single project
    ///
    /// Fails when `hectares` or `capex_usd` is missing, non-finite or not
    /// positive (hectares is checked first), or when the capex is so large that
    /// the projected return overflows.
    pub fn price(&self, input: &ProjectInput) -> Result<PricingResult, ValidationError> {
        let hectares = require_positive(InputField::Hectares, input.hectares)?;
        let capex = require_positive(InputField::CapexUsd, input.capex_usd)?;
        let s = &self.schedule;

        if !input.client_type.is_recognized() {
            log::warn!(
                "Unrecognized client type '{}', pricing at the full rate",
                input.client_type
            );
        }

        // Scores
        let tier = s.complexity_tier(hectares);
        let capex_score = s.capex_score(capex);
        let impact_score = s.capex_weight * capex_score + s.complexity_weight * f64::from(tier);

        // Upfront fee; the high-impact discount applies after the client discount
        let mut upfront = s.base_rate_usd * s.complexity_multiplier(tier) * s.client_discount(&input.client_type);
        let high_impact = impact_score >= s.high_impact_threshold;
        if high_impact {
            upfront *= s.high_impact_multiplier;
        }

        let success_fee_percent = s.success_fee_percent(impact_score);
        let success_fee_estimate = capex * success_fee_percent;

        // Benchmark comparison on upfront fees only; the success fee is contingent
        let service_scope = ServiceScope::for_capex(capex);
        let traditional_cost = service_scope.traditional_cost();
        let savings = traditional_cost - upfront;
        let savings_percent = if traditional_cost > 0.0 {
            savings / traditional_cost * 100.0
        } else {
            0.0
        };

        let economic_value = capex * benchmarks::IDB_NBS_RETURN_RATIO;

        let net_present_value = economic_value - upfront - success_fee_estimate;
        if !economic_value.is_finite() || !net_present_value.is_finite() {
            return Err(ValidationError::OutOfRange { field: InputField::CapexUsd, value: capex });
        }

        let offer = s.subscription_for(impact_score);

        let fee_rationale = if high_impact {
            FeeRationale::HighImpact
        } else if impact_score >= BALANCED_RATIONALE_IMPACT {
            FeeRationale::Balanced
        } else {
            FeeRationale::EarlyStage
        };

        log::debug!(
            "Priced project: tier={} impact={:.3} upfront={:.2} success_pct={} npv={:.2}",
            tier,
            impact_score,
            upfront,
            success_fee_percent,
            net_present_value
        );

        Ok(PricingResult {
            complexity_tier: tier,
            impact_score,
            upfront_fee_usd: upfront,
            high_impact_discount_applied: high_impact,
            success_fee_percent,
            success_fee_estimate_usd: success_fee_estimate,
            traditional_cost_usd: traditional_cost,
            service_scope,
            savings_usd: savings,
            savings_percent,
            economic_value_usd: economic_value,
            time_saved_months: benchmarks::time_saved_months(),
            subscription_tier: offer.tier,
            annual_tier_fee_usd: offer.annual_price_usd,
            tier_includes: offer.includes.clone(),
            net_present_value_usd: net_present_value,
            fee_rationale,
            client_type: input.client_type.clone(),
            jurisdiction: input.jurisdiction,
        })
    }
}

/// Price a project with the published rate card
pub fn compute_pricing(input: &ProjectInput) -> Result<PricingResult, ValidationError> {
    PricingEngine::default().price(input)
}
