//! Engagement pricing: fee schedules, the quote engine and quote results

mod engine;
mod result;
mod schedule;

pub use engine::{compute_pricing, PricingEngine};
pub use result::{FeeRationale, PricingResult, QuoteSummary};
pub use schedule::{
    ClientDiscounts, ComplexityBand, NonEmpty, PricingSchedule, ScheduleError, SubscriptionTier, SuccessFeeBand,
    TierOffer,
};
