//! ESW Pricing - Engagement pricing and ROI estimation for nature-based solution projects
//!
//! This library provides:
//! - Deterministic quote computation from site area, capex and client type
//! - Configurable fee schedules (complexity bands, client discounts, success fees)
//! - Traditional-consulting benchmarks and value-proposition reports
//! - Batch pricing of project portfolios loaded from CSV

pub mod error;
pub mod format;
pub mod pricing;
pub mod project;
pub mod roi;
pub mod scenario;

// Re-export commonly used types
pub use error::{InputField, ValidationError};
pub use pricing::{compute_pricing, PricingEngine, PricingResult, PricingSchedule, QuoteSummary, SubscriptionTier};
pub use project::{ClientType, Jurisdiction, ProjectInput};
pub use roi::{ServiceScope, ValueReport};
pub use scenario::QuoteRunner;
