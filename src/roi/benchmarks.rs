//! Market benchmarks used to position an ESW quote
//!
//! Sources: industry consulting fee benchmarks (EIA, NbS design, DFI
//! applications), C40 Cities Finance Facility acceptance data, and IDB
//! nature-based solutions return data (USD 813M across 28 projects, 2015-2020).

use serde::{Deserialize, Serialize};

/// Projected economic return per USD invested (IDB NbS benchmark)
pub const IDB_NBS_RETURN_RATIO: f64 = 4.0;

/// Pre-feasibility to bankable feasibility, multi-vendor procurement
pub const MONTHS_TRADITIONAL: u32 = 18;

/// Pre-feasibility to bankable feasibility, integrated ESW delivery
pub const MONTHS_ESW: u32 = 12;

/// Share of C40 CFF applications accepted
pub const CFF_BASELINE_ACCEPTANCE: f64 = 0.18;

/// Estimated acceptance uplift for ESW-structured applications
pub const CFF_ESW_UPLIFT_MULTIPLIER: f64 = 2.2;

pub const CFF_MAX_ACCEPTANCE: f64 = 0.95;

/// Capex at which the full service scope applies (USD)
pub const LARGE_PROJECT_CAPEX: f64 = 20_000_000.0;

/// Capex at which the mid-size scope applies (USD)
pub const MEDIUM_PROJECT_CAPEX: f64 = 5_000_000.0;

/// Months saved by integrated delivery
pub fn time_saved_months() -> u32 {
    MONTHS_TRADITIONAL - MONTHS_ESW
}

/// Acceptance probability of an ESW-structured CFF application
pub fn cff_esw_acceptance() -> f64 {
    (CFF_BASELINE_ACCEPTANCE * CFF_ESW_UPLIFT_MULTIPLIER).min(CFF_MAX_ACCEPTANCE)
}

/// Acceptance uplift in percentage points
pub fn cff_uplift_points() -> f64 {
    (cff_esw_acceptance() - CFF_BASELINE_ACCEPTANCE) * 100.0
}

/// A service a client would otherwise buy from a separate consultant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultingService {
    EiaEsia,
    NbsFeasibility,
    FinancialModelling,
    GisRemoteSensing,
    DfiApplication,
    GreenBondFramework,
    LegalRegulatory,
    MonitoringMrv,
}

impl ConsultingService {
    pub const ALL: [ConsultingService; 8] = [
        ConsultingService::EiaEsia,
        ConsultingService::NbsFeasibility,
        ConsultingService::FinancialModelling,
        ConsultingService::GisRemoteSensing,
        ConsultingService::DfiApplication,
        ConsultingService::GreenBondFramework,
        ConsultingService::LegalRegulatory,
        ConsultingService::MonitoringMrv,
    ];

    /// Typical market price for an equivalent scope (USD)
    pub fn benchmark_cost(&self) -> f64 {
        match self {
            ConsultingService::EiaEsia => 80_000.0,
            ConsultingService::NbsFeasibility => 60_000.0,
            ConsultingService::FinancialModelling => 45_000.0,
            ConsultingService::GisRemoteSensing => 35_000.0,
            ConsultingService::DfiApplication => 50_000.0,
            ConsultingService::GreenBondFramework => 55_000.0,
            ConsultingService::LegalRegulatory => 40_000.0,
            ConsultingService::MonitoringMrv => 30_000.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsultingService::EiaEsia => "Environmental impact assessment (EIA/ESIA)",
            ConsultingService::NbsFeasibility => "Nature-based solutions feasibility study",
            ConsultingService::FinancialModelling => "Financial model and bankability assessment",
            ConsultingService::GisRemoteSensing => "GIS and remote sensing analysis",
            ConsultingService::DfiApplication => "DFI loan application support",
            ConsultingService::GreenBondFramework => "Green bond framework and second-party opinion",
            ConsultingService::LegalRegulatory => "Multi-jurisdiction regulatory scan",
            ConsultingService::MonitoringMrv => "Monitoring and MRV setup",
        }
    }
}

/// Services a project of a given size would need from traditional consultants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceScope {
    pub services: Vec<ConsultingService>,
}

impl ServiceScope {
    pub fn new(services: Vec<ConsultingService>) -> Self {
        Self { services }
    }

    /// Scope selected from the capex bracket
    pub fn for_capex(capex_usd: f64) -> Self {
        use ConsultingService::*;

        let services = if capex_usd >= LARGE_PROJECT_CAPEX {
            ConsultingService::ALL.to_vec()
        } else if capex_usd >= MEDIUM_PROJECT_CAPEX {
            vec![EiaEsia, NbsFeasibility, FinancialModelling, GisRemoteSensing, LegalRegulatory]
        } else {
            vec![NbsFeasibility, GisRemoteSensing, LegalRegulatory]
        };
        Self { services }
    }

    /// Total benchmark cost of the scope (USD)
    pub fn traditional_cost(&self) -> f64 {
        self.services.iter().map(|s| s.benchmark_cost()).sum()
    }
}
