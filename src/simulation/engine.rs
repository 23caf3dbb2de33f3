//! Simulation entry point
//!
//! Pre-loads the ceiling tables once, then enumerates, solves and ranks scenarios for
//! any number of households without re-reading table files.

use std::path::Path;

use rayon::prelude::*;

use super::fees::NotaryRates;
use super::result::{rank_results, SimulationResult};
use super::scenario::enumerate_scenarios;
use super::solver::{PriceSolver, SolverConfig};
use crate::eligibility::EligibilityTables;
use crate::error::Result;
use crate::household::{AcquisitionProfile, Household};
use crate::subsidy::{SubsidyCalculator, SubsidyRules};

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Price search parameters
    pub solver: SolverConfig,

    /// Notary fee rates by acquisition category
    pub notary: NotaryRates,

    /// Subsidy amount rules
    pub subsidies: SubsidyRules,

    /// Solve scenarios on the rayon thread pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            notary: NotaryRates::default(),
            subsidies: SubsidyRules::default(),
            parallel: true,
        }
    }
}

/// Pre-loaded simulator
///
/// # Example
/// ```ignore
/// let simulator = Simulator::from_csv(SimulationConfig::default())?;
/// let results = simulator.simulate(&household, &profile);
/// for r in &results {
///     println!("{}: {:.0}", r.label, r.borrowing_capacity);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    tables: EligibilityTables,
    config: SimulationConfig,
}

impl Simulator {
    /// Create simulator with the compiled-in ceiling tables
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_tables(EligibilityTables::default_2024(), config)
    }

    /// Create simulator with pre-built tables
    pub fn with_tables(tables: EligibilityTables, config: SimulationConfig) -> Self {
        Self { tables, config }
    }

    /// Create simulator by loading tables from the default CSV directory
    pub fn from_csv(config: SimulationConfig) -> Result<Self> {
        Ok(Self::with_tables(EligibilityTables::from_csv()?, config))
    }

    /// Create simulator from a specific tables directory
    pub fn from_csv_path(path: &Path, config: SimulationConfig) -> Result<Self> {
        Ok(Self::with_tables(EligibilityTables::from_csv_path(path)?, config))
    }

    pub fn tables(&self) -> &EligibilityTables {
        &self.tables
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    pub fn calculator(&self) -> SubsidyCalculator<'_> {
        SubsidyCalculator::new(&self.tables, &self.config.subsidies)
    }

    /// Solve every feasible scenario, ranked by borrowing capacity
    pub fn simulate(&self, household: &Household, profile: &AcquisitionProfile) -> Vec<SimulationResult> {
        let calculator = self.calculator();
        let scenarios = enumerate_scenarios(household, profile, &calculator);
        let solver = PriceSolver::new(calculator, &self.config.notary, &self.config.solver);

        let mut results: Vec<SimulationResult> = if self.config.parallel {
            scenarios
                .par_iter()
                .filter_map(|scenario| solver.solve(household, profile, scenario))
                .collect()
        } else {
            scenarios
                .iter()
                .filter_map(|scenario| solver.solve(household, profile, scenario))
                .collect()
        };

        log::info!(
            "{} acquisition in zone {}: {} of {} scenarios funded",
            profile.acquisition.label(),
            household.zone,
            results.len(),
            scenarios.len()
        );

        rank_results(&mut results);
        results
    }

    /// Simulate several households, one result list per input
    pub fn simulate_batch(&self, inputs: &[(Household, AcquisitionProfile)]) -> Vec<Vec<SimulationResult>> {
        inputs
            .par_iter()
            .map(|(household, profile)| self.simulate(household, profile))
            .collect()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

/// Simulate with compiled-in tables and default configuration
pub fn simulate(household: &Household, profile: &AcquisitionProfile) -> Vec<SimulationResult> {
    Simulator::default().simulate(household, profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::{Acquisition, DwellingType, LoanTerms, NotaryRegime, Zone};
    use crate::simulation::scenario::SubsidyMix;

    fn reference_household() -> Household {
        Household::new(5000.0, 20_000.0, 1, Zone::C).with_debt_ratio(35.0)
    }

    fn reference_profile() -> AcquisitionProfile {
        AcquisitionProfile::new_build_apartment(LoanTerms {
            annual_rate_pct: 3.5,
            insurance_rate_pct: 0.3,
            duration_years: 25,
        })
    }

    fn credit_only(results: &[SimulationResult]) -> Vec<&SimulationResult> {
        results.iter().filter(|r| r.scenario.mix == SubsidyMix::CreditOnly).collect()
    }

    #[test]
    fn test_reference_household_has_credit_only_result() {
        let results = simulate(&reference_household(), &reference_profile());

        let base = credit_only(&results);
        assert_eq!(base.len(), 1);
        assert!(base[0].borrowing_capacity > 0.0);
        assert_eq!(base[0].zero_interest_amount, 0.0);
        assert_eq!(base[0].employer_amount, 0.0);
        assert!(results
            .iter()
            .all(|r| !r.scenario.count_existing_charges && !r.scenario.apply_contribution));
    }

    #[test]
    fn test_high_income_only_credit_only() {
        for zone in Zone::ALL {
            for size in [1, 4, 9] {
                let household = Household::new(8000.0, 10_000_000.0, size, zone);
                let results = simulate(&household, &reference_profile());
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].scenario.mix, SubsidyMix::CreditOnly);
            }
        }
    }

    #[test]
    fn test_results_ranked_descending() {
        let household = Household::new(3500.0, 20_000.0, 2, Zone::B2)
            .with_charges(150.0)
            .with_liquidity(15_000.0);
        let results = simulate(&household, &reference_profile());
        assert!(results.len() > 4);
        for pair in results.windows(2) {
            assert!(pair[0].borrowing_capacity >= pair[1].borrowing_capacity);
        }
    }

    #[test]
    fn test_invariants_hold_for_every_result() {
        let household = Household::new(4200.0, 30_000.0, 3, Zone::B1)
            .with_charges(250.0)
            .with_liquidity(12_000.0);
        let profile = AcquisitionProfile::new(
            Acquisition::NewBuild {
                dwelling: DwellingType::House,
                notary: NotaryRegime::Reduced,
                test_reduced_vat: true,
            },
            LoanTerms::default(),
        );

        let results = simulate(&household, &profile);
        assert!(!results.is_empty());
        for r in &results {
            if r.converged {
                assert!(r.funding_gap.abs() < 1.0, "{}: gap {}", r.label, r.funding_gap);
            } else {
                assert!(r.funding_gap <= 0.0, "{}: unfunded gap {}", r.label, r.funding_gap);
            }
            assert!(r.contribution <= household.liquidity.min(r.property_price * 0.10) + 1e-9);
            assert!(r.zero_interest_amount <= r.property_price * 0.30 + 1e-9);
            assert!(r.zero_interest_amount <= 135_000.0);
            assert_eq!(r.vat_rate_pct, 5.5);
            assert!(r.borrowing_capacity > 0.0);
        }
    }

    #[test]
    fn test_capacity_monotone_in_debt_ratio() {
        let profile = reference_profile();
        let mut previous = 0.0;
        for ratio in [20.0, 25.0, 30.0, 35.0, 40.0] {
            let household = Household::new(4000.0, 80_000.0, 2, Zone::A).with_debt_ratio(ratio);
            let results = simulate(&household, &profile);
            let capacity = credit_only(&results)[0].borrowing_capacity;
            assert!(capacity >= previous, "capacity fell at {}%", ratio);
            previous = capacity;
        }
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let household = Household::new(3800.0, 25_000.0, 2, Zone::C)
            .with_charges(100.0)
            .with_liquidity(8_000.0);
        let profile = reference_profile();

        let parallel = Simulator::default().simulate(&household, &profile);
        let sequential = Simulator::new(SimulationConfig {
            parallel: false,
            ..SimulationConfig::default()
        })
        .simulate(&household, &profile);
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_existing_with_renovation_in_low_zone() {
        let household = Household::new(3000.0, 20_000.0, 2, Zone::C);
        let profile = AcquisitionProfile::new(
            Acquisition::Existing { renovation_cost: Some(80_000.0) },
            LoanTerms::default(),
        );
        let results = simulate(&household, &profile);
        let with_zero_interest: Vec<_> = results
            .iter()
            .filter(|r| r.scenario.mix.uses_zero_interest())
            .collect();
        assert!(!with_zero_interest.is_empty());
        for r in with_zero_interest {
            assert!(80_000.0 / r.property_price > 0.25);
            assert!(r.notary_fee > 0.0);
        }
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let simulator = Simulator::default();
        let inputs = vec![
            (reference_household(), reference_profile()),
            (Household::new(2500.0, 15_000.0, 1, Zone::B1), reference_profile()),
        ];
        let batch = simulator.simulate_batch(&inputs);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1], simulator.simulate(&inputs[1].0, &inputs[1].1));
    }
}
