//! ESW fee tables: complexity bands, client discounts, success fees and subscription tiers

use crate::project::ClientType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading or checking a fee schedule
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("failed to read schedule file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse schedule JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid schedule: {0}")]
    Invalid(String),
}

/// Recurring service tier assigned from the impact score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubscriptionTier {
    Essentials,
    Professional,
    Enterprise,
}

impl SubscriptionTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Essentials => "Essentials",
            SubscriptionTier::Professional => "Professional",
            SubscriptionTier::Enterprise => "Enterprise",
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upfront fee multiplier for an inclusive range of complexity tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityBand {
    pub min_tier: u8,
    pub max_tier: u8,
    pub multiplier: f64,
}

impl ComplexityBand {
    pub fn contains(&self, tier: u8) -> bool {
        tier >= self.min_tier && tier <= self.max_tier
    }
}

/// Success fee percentage for impact scores strictly below `below_impact`
///
/// `below_impact: None` is the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuccessFeeBand {
    pub below_impact: Option<f64>,
    /// Fraction of capex charged at financial close (0.015 = 1.5%)
    pub percent: f64,
}

/// A list with at least one entry
///
/// Serialized as a plain JSON array; an empty array fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<T>", into = "Vec<T>")]
pub struct NonEmpty<T: Clone> {
    first: T,
    rest: Vec<T>,
}

impl<T: Clone> NonEmpty<T> {
    pub fn new(first: T, rest: Vec<T>) -> Self {
        Self { first, rest }
    }

    pub fn first(&self) -> &T {
        &self.first
    }

    pub fn last(&self) -> &T {
        self.rest.last().unwrap_or(&self.first)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}

impl<T: Clone> TryFrom<Vec<T>> for NonEmpty<T> {
    type Error = String;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        let mut items = items.into_iter();
        match items.next() {
            Some(first) => Ok(Self::new(first, items.collect())),
            None => Err("list must have at least one entry".to_string()),
        }
    }
}

impl<T: Clone> From<NonEmpty<T>> for Vec<T> {
    fn from(list: NonEmpty<T>) -> Self {
        let mut items = Vec::with_capacity(list.rest.len() + 1);
        items.push(list.first);
        items.extend(list.rest);
        items
    }
}

/// Upfront fee multipliers by client category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientDiscounts {
    pub government: f64,
    pub ngo: f64,
    pub developer: f64,
}

impl Default for ClientDiscounts {
    fn default() -> Self {
        Self {
            government: 0.85, // 15% public-sector discount
            ngo: 0.75,        // 25% NGO discount
            developer: 1.0,
        }
    }
}

/// One subscription tier offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierOffer {
    pub tier: SubscriptionTier,
    /// Lowest impact score that qualifies for this tier
    pub min_impact: f64,
    pub annual_price_usd: f64,
    pub includes: Vec<String>,
}

/// Complete ESW pricing model
///
/// `Default` reproduces the published rate card. Any field omitted from a JSON
/// schedule falls back to that default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSchedule {
    /// Upfront fee before multipliers (USD)
    pub base_rate_usd: f64,

    /// Site area per complexity step (hectares)
    pub hectares_per_tier: f64,

    /// Complexity tier of a site with negligible area
    pub base_tier: f64,

    /// Capex that scores one impact point (USD)
    pub capex_per_impact_point: f64,

    /// Cap on the capex component of the impact score
    pub max_capex_score: f64,

    pub capex_weight: f64,
    pub complexity_weight: f64,

    /// Contiguous tier ranges in ascending order, together covering tiers 1-10
    pub complexity_bands: NonEmpty<ComplexityBand>,
    pub client_discounts: ClientDiscounts,

    /// Impact score at which the upfront fee is discounted
    pub high_impact_threshold: f64,

    /// Multiplier applied to the upfront fee above the threshold
    pub high_impact_multiplier: f64,

    /// Ascending thresholds; only the last band is open-ended
    pub success_fee_bands: NonEmpty<SuccessFeeBand>,

    /// Ascending minimum impact; the first tier starts at 0
    pub subscription_tiers: NonEmpty<TierOffer>,
}

impl Default for PricingSchedule {
    fn default() -> Self {
        Self {
            base_rate_usd: 25_000.0,
            hectares_per_tier: 5_000.0,
            base_tier: 3.0,
            capex_per_impact_point: 10_000_000.0,
            max_capex_score: 10.0,
            capex_weight: 0.5,
            complexity_weight: 0.5,
            complexity_bands: NonEmpty::new(
                ComplexityBand { min_tier: 1, max_tier: 3, multiplier: 1.0 },
                vec![
                    ComplexityBand { min_tier: 4, max_tier: 6, multiplier: 1.8 },
                    ComplexityBand { min_tier: 7, max_tier: 8, multiplier: 2.8 },
                    // Multi-jurisdiction, blended finance
                    ComplexityBand { min_tier: 9, max_tier: 10, multiplier: 4.0 },
                ],
            ),
            client_discounts: ClientDiscounts::default(),
            high_impact_threshold: 7.0,
            high_impact_multiplier: 0.6,
            success_fee_bands: NonEmpty::new(
                SuccessFeeBand { below_impact: Some(2.5), percent: 0.005 },
                vec![
                    SuccessFeeBand { below_impact: Some(5.0), percent: 0.015 },
                    SuccessFeeBand { below_impact: Some(7.5), percent: 0.025 },
                    SuccessFeeBand { below_impact: None, percent: 0.035 },
                ],
            ),
            subscription_tiers: default_tier_offers(),
        }
    }
}

fn default_tier_offers() -> NonEmpty<TierOffer> {
    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    let essentials = TierOffer {
        tier: SubscriptionTier::Essentials,
        min_impact: 0.0,
        annual_price_usd: 12_000.0,
        includes: list(&[
            "Regulatory scan (single jurisdiction)",
            "Baseline ecological report",
            "Satellite GIS screening",
        ]),
    };
    let professional = TierOffer {
        tier: SubscriptionTier::Professional,
        min_impact: 3.0,
        annual_price_usd: 36_000.0,
        includes: list(&[
            "All Essentials services",
            "CSRD, TNFD and ISSB compliance across jurisdictions",
            "Nature-based solutions feasibility study",
            "Financial model and bankability memo",
            "Carbon and biodiversity credit scoping",
        ]),
    };
    let enterprise = TierOffer {
        tier: SubscriptionTier::Enterprise,
        min_impact: 6.0,
        annual_price_usd: 96_000.0,
        includes: list(&[
            "All Professional services",
            "Full EIA/ESIA",
            "Blended finance structuring",
            "DFI application support",
            "Green bond framework",
            "Dedicated project controller",
            "Annual monitoring and MRV",
        ]),
    };

    NonEmpty::new(essentials, vec![professional, enterprise])
}

impl PricingSchedule {
    /// Load a schedule from a JSON file and check it
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let schedule = Self::from_json_str(&text)?;
        log::info!("Loaded pricing schedule from {}", path.as_ref().display());
        Ok(schedule)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ScheduleError> {
        let schedule: Self = serde_json::from_str(text)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check the structural rules the engine relies on
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let rates = [
            ("base_rate_usd", self.base_rate_usd),
            ("capex_weight", self.capex_weight),
            ("complexity_weight", self.complexity_weight),
            ("max_capex_score", self.max_capex_score),
            ("high_impact_threshold", self.high_impact_threshold),
            ("high_impact_multiplier", self.high_impact_multiplier),
            ("client_discounts.government", self.client_discounts.government),
            ("client_discounts.ngo", self.client_discounts.ngo),
            ("client_discounts.developer", self.client_discounts.developer),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(ScheduleError::Invalid(format!("{} must be finite and non-negative", name)));
            }
        }
        if self.high_impact_multiplier > 1.0 {
            return Err(ScheduleError::Invalid(
                "high_impact_multiplier is a discount and must not exceed 1".to_string(),
            ));
        }
        if !(self.hectares_per_tier > 0.0) || !(self.capex_per_impact_point > 0.0) {
            return Err(ScheduleError::Invalid(
                "hectares_per_tier and capex_per_impact_point must be positive".to_string(),
            ));
        }

        let bands: Vec<&ComplexityBand> = self.complexity_bands.iter().collect();
        if bands.iter().any(|b| b.min_tier > b.max_tier) || bands.windows(2).any(|w| w[0].max_tier >= w[1].min_tier) {
            return Err(ScheduleError::Invalid(
                "complexity bands must be ascending, non-overlapping tier ranges".to_string(),
            ));
        }
        for tier in 1..=10u8 {
            if !bands.iter().any(|b| b.contains(tier)) {
                return Err(ScheduleError::Invalid(format!("complexity tier {} is not covered by any band", tier)));
            }
        }

        let fee_bands: Vec<&SuccessFeeBand> = self.success_fee_bands.iter().collect();
        let (bounded, last) = fee_bands.split_at(fee_bands.len() - 1);
        if last.iter().any(|b| b.below_impact.is_some()) || bounded.iter().any(|b| b.below_impact.is_none()) {
            return Err(ScheduleError::Invalid(
                "only the last success fee band may be open-ended, and it must be".to_string(),
            ));
        }
        let thresholds: Vec<f64> = bounded.iter().filter_map(|b| b.below_impact).collect();
        if thresholds.iter().any(|t| !t.is_finite()) || thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ScheduleError::Invalid("success fee thresholds must be finite and ascending".to_string()));
        }
        let percents: Vec<f64> = fee_bands.iter().map(|b| b.percent).collect();
        if percents.iter().any(|p| !p.is_finite() || *p < 0.0) || percents.windows(2).any(|w| w[0] > w[1]) {
            return Err(ScheduleError::Invalid(
                "success fee percentages must be non-negative and must not decrease".to_string(),
            ));
        }

        if !(self.subscription_tiers.first().min_impact <= 0.0) {
            return Err(ScheduleError::Invalid(
                "the first subscription tier must start at impact 0".to_string(),
            ));
        }
        let offers: Vec<&TierOffer> = self.subscription_tiers.iter().collect();
        if offers.windows(2).any(|w| !(w[0].min_impact < w[1].min_impact)) {
            return Err(ScheduleError::Invalid("subscription tiers must be in ascending order".to_string()));
        }
        if offers.iter().any(|o| !o.annual_price_usd.is_finite() || o.annual_price_usd < 0.0) {
            return Err(ScheduleError::Invalid(
                "subscription prices must be finite and non-negative".to_string(),
            ));
        }

        Ok(())
    }

    /// Complexity tier (1-10) for a site area
    pub fn complexity_tier(&self, hectares: f64) -> u8 {
        (hectares / self.hectares_per_tier + self.base_tier).round().clamp(1.0, 10.0) as u8
    }

    /// Capex component of the impact score, capped
    pub fn capex_score(&self, capex_usd: f64) -> f64 {
        (capex_usd / self.capex_per_impact_point).min(self.max_capex_score)
    }

    /// Upfront fee multiplier for a complexity tier
    ///
    /// Bands are read as contiguous ranges: a tier takes the multiplier of the
    /// last band starting at or below it.
    pub fn complexity_multiplier(&self, tier: u8) -> f64 {
        let bands = &self.complexity_bands;
        bands.iter().rev().find(|b| b.min_tier <= tier).unwrap_or(bands.first()).multiplier
    }

    /// Upfront fee multiplier for a client category
    pub fn client_discount(&self, client: &ClientType) -> f64 {
        match client {
            ClientType::Government => self.client_discounts.government,
            ClientType::Ngo => self.client_discounts.ngo,
            ClientType::Developer | ClientType::Unrecognized(_) => self.client_discounts.developer,
        }
    }

    /// Success fee fraction from the first band whose threshold exceeds the impact score
    pub fn success_fee_percent(&self, impact_score: f64) -> f64 {
        let bands = &self.success_fee_bands;
        bands
            .iter()
            .find(|b| b.below_impact.map_or(true, |limit| impact_score < limit))
            .unwrap_or(bands.last())
            .percent
    }

    /// Highest subscription tier whose minimum impact is met
    pub fn subscription_for(&self, impact_score: f64) -> &TierOffer {
        let tiers = &self.subscription_tiers;
        tiers.iter().rev().find(|offer| impact_score >= offer.min_impact).unwrap_or(tiers.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_is_valid() {
        PricingSchedule::default().validate().expect("default schedule should validate");
    }

    #[test]
    fn test_complexity_tier() {
        let s = PricingSchedule::default();

        assert_eq!(s.complexity_tier(10.0), 3);
        assert_eq!(s.complexity_tier(2_499.0), 3);
        assert_eq!(s.complexity_tier(2_500.0), 4);
        assert_eq!(s.complexity_tier(17_500.0), 7);
        assert_eq!(s.complexity_tier(1e-12), 3);
        assert_eq!(s.complexity_tier(1e12), 10);
        assert_eq!(s.complexity_tier(f64::MAX), 10);
    }

    #[test]
    fn test_complexity_multiplier() {
        let s = PricingSchedule::default();

        assert_eq!(s.complexity_multiplier(1), 1.0);
        assert_eq!(s.complexity_multiplier(3), 1.0);
        assert_eq!(s.complexity_multiplier(4), 1.8);
        assert_eq!(s.complexity_multiplier(6), 1.8);
        assert_eq!(s.complexity_multiplier(7), 2.8);
        assert_eq!(s.complexity_multiplier(8), 2.8);
        assert_eq!(s.complexity_multiplier(9), 4.0);
        assert_eq!(s.complexity_multiplier(10), 4.0);
    }

    #[test]
    fn test_client_discount() {
        let s = PricingSchedule::default();

        assert_eq!(s.client_discount(&ClientType::Government), 0.85);
        assert_eq!(s.client_discount(&ClientType::Ngo), 0.75);
        assert_eq!(s.client_discount(&ClientType::Developer), 1.0);
        assert_eq!(s.client_discount(&ClientType::parse("utility")), 1.0);
    }

    #[test]
    fn test_success_fee_bands() {
        let s = PricingSchedule::default();

        assert_eq!(s.success_fee_percent(0.0), 0.005);
        assert_eq!(s.success_fee_percent(2.49), 0.005);
        assert_eq!(s.success_fee_percent(2.5), 0.015);
        assert_eq!(s.success_fee_percent(4.99), 0.015);
        assert_eq!(s.success_fee_percent(5.0), 0.025);
        assert_eq!(s.success_fee_percent(7.49), 0.025);
        assert_eq!(s.success_fee_percent(7.5), 0.035);
        assert_eq!(s.success_fee_percent(10.0), 0.035);
    }

    #[test]
    fn test_subscription_tiers() {
        let s = PricingSchedule::default();

        let tier = |impact: f64| s.subscription_for(impact).tier;
        assert_eq!(tier(0.0), SubscriptionTier::Essentials);
        assert_eq!(tier(2.99), SubscriptionTier::Essentials);
        assert_eq!(tier(3.0), SubscriptionTier::Professional);
        assert_eq!(tier(5.99), SubscriptionTier::Professional);
        assert_eq!(tier(6.0), SubscriptionTier::Enterprise);

        let enterprise = s.subscription_for(9.0);
        assert_eq!(enterprise.annual_price_usd, 96_000.0);
        assert_eq!(enterprise.includes.len(), 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = PricingSchedule::from_json_str(r#"{"base_rate_usd": 30000, "client_discounts": {"ngo": 0.5}}"#)
            .expect("partial schedule should load");

        assert_eq!(s.base_rate_usd, 30_000.0);
        assert_eq!(s.client_discounts.ngo, 0.5);
        assert_eq!(s.client_discounts.government, 0.85);
        assert_eq!(s.complexity_bands, PricingSchedule::default().complexity_bands);
    }

    #[test]
    fn test_schedule_json_round_trip() {
        let s = PricingSchedule::default();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(PricingSchedule::from_json_str(&json).unwrap(), s);
    }

    #[test]
    fn test_invalid_schedules_rejected() {
        let gap = r#"{"complexity_bands": [{"min_tier": 1, "max_tier": 5, "multiplier": 1.0}]}"#;
        assert!(matches!(PricingSchedule::from_json_str(gap), Err(ScheduleError::Invalid(_))));

        let closed = r#"{"success_fee_bands": [{"below_impact": 5.0, "percent": 0.01}]}"#;
        assert!(matches!(PricingSchedule::from_json_str(closed), Err(ScheduleError::Invalid(_))));

        let descending = r#"{"success_fee_bands": [
            {"below_impact": 5.0, "percent": 0.01},
            {"below_impact": 2.0, "percent": 0.02},
            {"below_impact": null, "percent": 0.03}
        ]}"#;
        assert!(matches!(PricingSchedule::from_json_str(descending), Err(ScheduleError::Invalid(_))));

        let overlap = r#"{"complexity_bands": [
            {"min_tier": 1, "max_tier": 6, "multiplier": 1.0},
            {"min_tier": 5, "max_tier": 10, "multiplier": 2.0}
        ]}"#;
        assert!(matches!(PricingSchedule::from_json_str(overlap), Err(ScheduleError::Invalid(_))));

        let surcharge = r#"{"high_impact_multiplier": 1.2}"#;
        assert!(matches!(PricingSchedule::from_json_str(surcharge), Err(ScheduleError::Invalid(_))));

        let late_start = r#"{"subscription_tiers": [
            {"tier": "Professional", "min_impact": 3.0, "annual_price_usd": 36000, "includes": []}
        ]}"#;
        assert!(matches!(PricingSchedule::from_json_str(late_start), Err(ScheduleError::Invalid(_))));

        assert!(matches!(PricingSchedule::from_json_str("{not json"), Err(ScheduleError::Json(_))));
    }

    #[test]
    fn test_empty_tables_rejected() {
        for json in [
            r#"{"subscription_tiers": []}"#,
            r#"{"success_fee_bands": []}"#,
            r#"{"complexity_bands": []}"#,
        ] {
            assert!(matches!(PricingSchedule::from_json_str(json), Err(ScheduleError::Json(_))), "{}", json);
        }
        assert!(NonEmpty::<TierOffer>::try_from(Vec::new()).is_err());
    }

    #[test]
    fn test_non_empty_list() {
        let list = NonEmpty::try_from(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(*list.first(), 1.0);
        assert_eq!(*list.last(), 3.0);
        assert_eq!(list.iter().count(), 3);
        assert_eq!(Vec::from(list), vec![1.0, 2.0, 3.0]);

        let single = NonEmpty::new(7u8, Vec::new());
        assert_eq!(single.first(), single.last());
        assert_eq!(serde_json::to_string(&single).unwrap(), "[7]");
    }
}
