//! Quote runner for efficient batch pricing
//!
//! Holds one engine and prices many projects against it, in parallel where the
//! batch is large enough to benefit.

use crate::pricing::{PricingEngine, PricingResult, PricingSchedule, ScheduleError};
use crate::project::{ProjectInput, ProjectRecord};
use crate::ValidationError;
use rayon::prelude::*;

/// Outcome for one project in a portfolio run
pub type QuoteOutcome = Result<PricingResult, ValidationError>;

/// Pre-built quote runner for batch pricing
///
/// # Example
/// ```ignore
/// let runner = QuoteRunner::from_json_path("schedule.json")?;
///
/// for capex in [5e6, 20e6, 80e6] {
///     let input = ProjectInput::new(1_200.0, capex, ClientType::Ngo);
///     let result = runner.run(&input)?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuoteRunner {
    engine: PricingEngine,
}

impl QuoteRunner {
    /// Create runner with the published rate card
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with a custom schedule
    pub fn with_schedule(schedule: PricingSchedule) -> Result<Self, ScheduleError> {
        Ok(Self {
            engine: PricingEngine::new(schedule)?,
        })
    }

    /// Create runner by loading a schedule from a JSON file
    pub fn from_json_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ScheduleError> {
        Self::with_schedule(PricingSchedule::from_json_path(path)?)
    }

    pub fn run(&self, input: &ProjectInput) -> QuoteOutcome {
        self.engine.price(input)
    }

    /// Price a batch in parallel; results keep the input order
    pub fn run_batch(&self, inputs: &[ProjectInput]) -> Vec<QuoteOutcome> {
        inputs.par_iter().map(|input| self.engine.price(input)).collect()
    }

    /// Price a loaded portfolio, logging rows that fail validation
    pub fn run_portfolio(&self, projects: &[ProjectRecord]) -> Vec<(String, QuoteOutcome)> {
        let outcomes: Vec<(String, QuoteOutcome)> = projects
            .par_iter()
            .map(|record| (record.project_id.clone(), self.engine.price(&record.input)))
            .collect();

        let rejected = outcomes.iter().filter(|(_, outcome)| outcome.is_err()).count();
        for (id, outcome) in &outcomes {
            if let Err(e) = outcome {
                log::warn!("Project {} rejected: {}", id, e);
            }
        }
        log::info!("Priced {} projects ({} rejected)", outcomes.len() - rejected, rejected);

        outcomes
    }

    /// Price one project under several schedules, e.g. to compare rate cards
    ///
    /// Every schedule is checked before anything is priced.
    pub fn run_schedules(
        input: &ProjectInput,
        schedules: &[PricingSchedule],
    ) -> Result<Vec<QuoteOutcome>, ScheduleError> {
        let engines = schedules
            .iter()
            .map(|schedule| PricingEngine::new(schedule.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(engines.iter().map(|engine| engine.price(input)).collect())
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{NonEmpty, SuccessFeeBand};
    use crate::project::{load_projects_from_reader, ClientType};
    use crate::InputField;

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = QuoteRunner::new();
        let inputs: Vec<ProjectInput> = (1..=200)
            .map(|i| ProjectInput::new(100.0 * i as f64, 1_000_000.0 * i as f64, ClientType::Developer))
            .collect();

        let results = runner.run_batch(&inputs);
        assert_eq!(results.len(), inputs.len());

        for (input, outcome) in inputs.iter().zip(&results) {
            let expected = runner.run(input).unwrap();
            assert_eq!(outcome.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn test_run_portfolio_keeps_going_past_bad_rows() {
        let csv = "\
project_id,hectares,capex_usd,client_type,jurisdiction
a,10,40000000,government,Mexico
b,0,1000000,ngo,Kenya
c,500,,developer,Brazil
d,20000,90000000,ngo,India
";
        let projects = load_projects_from_reader(csv.as_bytes()).unwrap();
        let outcomes = QuoteRunner::new().run_portfolio(&projects);

        let ids: Vec<&str> = outcomes.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);

        assert!(outcomes[0].1.is_ok());
        assert_eq!(outcomes[1].1.as_ref().unwrap_err().field(), InputField::Hectares);
        assert_eq!(outcomes[2].1.as_ref().unwrap_err().field(), InputField::CapexUsd);
        assert!(outcomes[3].1.is_ok());
    }

    #[test]
    fn test_run_schedules() {
        let input = ProjectInput::new(10.0, 1_000_000.0, ClientType::Developer);

        let mut premium = PricingSchedule::default();
        premium.base_rate_usd = 40_000.0;

        let results = QuoteRunner::run_schedules(&input, &[PricingSchedule::default(), premium]).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[1].as_ref().unwrap().upfront_fee_usd > results[0].as_ref().unwrap().upfront_fee_usd);
    }

    #[test]
    fn test_invalid_schedule_rejected_before_pricing() {
        let input = ProjectInput::new(10.0, 40_000_000.0, ClientType::Government);

        let mut broken = PricingSchedule::default();
        broken.success_fee_bands = NonEmpty::new(SuccessFeeBand { below_impact: Some(9.0), percent: 0.01 }, Vec::new());

        let err = QuoteRunner::run_schedules(&input, &[PricingSchedule::default(), broken.clone()]).unwrap_err();
        assert!(matches!(err, ScheduleError::Invalid(_)));
        assert!(matches!(QuoteRunner::with_schedule(broken), Err(ScheduleError::Invalid(_))));
    }
}
