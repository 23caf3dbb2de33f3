//! Bisection solver for the property price of one scenario
//!
//! For a candidate price the funding sources are:
//! - the amortizing loan repaid by whatever the debt ceiling leaves after insurance
//! - the zero-interest loan (price dependent)
//! - the employer loan (fixed)
//! - the personal contribution, capped at a share of the price
//!
//! The solver searches the price where these exactly cover price plus notary fees.

use super::amortization::{capital_to_monthly, max_monthly_payment, monthly_insurance, monthly_to_capital};
use super::fees::NotaryRates;
use super::result::SimulationResult;
use super::scenario::Scenario;
use crate::household::{AcquisitionProfile, Household};
use crate::subsidy::SubsidyCalculator;

/// Configuration of the price search
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Lowest property price considered
    pub search_min: f64,

    /// Highest property price considered
    pub search_max: f64,

    /// Bisection steps before settling for the best candidate
    pub max_iterations: u32,

    /// Funding gap accepted as an exact solution
    pub tolerance: f64,

    /// Contribution cap as a share of the price
    pub contribution_share: f64,

    /// Notional annual rate used to express the zero-interest loan as a monthly
    /// amount; `None` keeps it at zero
    pub zero_interest_notional_rate_pct: Option<f64>,

    /// Notional annual rate used to express the employer loan as a monthly amount
    pub employer_notional_rate_pct: Option<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            search_min: 50_000.0,
            search_max: 2_000_000.0,
            max_iterations: 100,
            tolerance: 1.0,
            contribution_share: 0.10,
            zero_interest_notional_rate_pct: None,
            employer_notional_rate_pct: Some(1.0),
        }
    }
}

/// Funding of one candidate price
#[derive(Debug, Clone, Copy)]
struct Candidate {
    price: f64,
    notary_fee: f64,
    insurance_monthly: f64,
    loan_monthly: f64,
    loan_principal: f64,
    zero_interest: f64,
    employer: f64,
    contribution: f64,
    gap: f64,
}

/// Solves scenarios for one household and acquisition
pub struct PriceSolver<'a> {
    calculator: SubsidyCalculator<'a>,
    notary: &'a NotaryRates,
    config: &'a SolverConfig,
}

impl<'a> PriceSolver<'a> {
    pub fn new(calculator: SubsidyCalculator<'a>, notary: &'a NotaryRates, config: &'a SolverConfig) -> Self {
        Self {
            calculator,
            notary,
            config,
        }
    }

    /// Solve one scenario; `None` when it cannot yield a funded, positive capacity
    pub fn solve(
        &self,
        household: &Household,
        profile: &AcquisitionProfile,
        scenario: &Scenario,
    ) -> Option<SimulationResult> {
        let label = scenario.label();
        let max_monthly = max_monthly_payment(
            household.monthly_income,
            household.monthly_charges,
            household.debt_ratio_pct,
            scenario.count_existing_charges,
        );
        if max_monthly <= 0.0 {
            log::debug!("{}: no room under the debt ceiling", label);
            return None;
        }

        let employer = if scenario.mix.uses_employer() {
            self.calculator.employer_for(household)
        } else {
            0.0
        };

        let mut low = self.config.search_min;
        let mut high = self.config.search_max;
        let mut best: Option<Candidate> = None;
        let mut converged = false;

        for _ in 0..self.config.max_iterations {
            let price = (low + high) / 2.0;

            let Some(candidate) = self.evaluate(household, profile, scenario, max_monthly, employer, price) else {
                // Insurance alone exhausts the ceiling at this price
                high = price;
                continue;
            };

            if candidate.gap.abs() < self.config.tolerance {
                best = Some(candidate);
                converged = true;
                break;
            }

            if candidate.gap > 0.0 {
                high = price;
            } else {
                low = price;
                let closer = best.map_or(true, |b| candidate.gap.abs() < b.gap.abs());
                if closer {
                    best = Some(candidate);
                }
            }
        }

        let Some(best) = best else {
            log::debug!("{}: no funded price in [{}, {}]", label, self.config.search_min, self.config.search_max);
            return None;
        };

        if scenario.mix.uses_zero_interest() && best.zero_interest <= 0.0 {
            log::debug!("{}: zero-interest loan unavailable at {:.0}", label, best.price);
            return None;
        }

        let capacity = best.loan_principal + best.zero_interest + best.employer;
        if capacity <= 0.0 {
            log::debug!("{}: no borrowing capacity", label);
            return None;
        }

        if !converged {
            log::warn!("{}: settled at {:.0} with gap {:.2}", label, best.price, best.gap);
        }

        let years = profile.loan.duration_years;
        let zero_interest_monthly = match self.config.zero_interest_notional_rate_pct {
            Some(rate) if best.zero_interest > 0.0 => capital_to_monthly(best.zero_interest, rate, years),
            _ => 0.0,
        };
        let employer_monthly = match self.config.employer_notional_rate_pct {
            Some(rate) if best.employer > 0.0 => capital_to_monthly(best.employer, rate, years),
            _ => 0.0,
        };

        Some(SimulationResult {
            label,
            scenario: *scenario,
            total_monthly_payment: best.loan_monthly + best.insurance_monthly,
            zero_interest_amount: best.zero_interest,
            zero_interest_monthly,
            employer_amount: best.employer,
            employer_monthly,
            insurance_monthly: best.insurance_monthly,
            vat_rate_pct: scenario.vat_rate_pct,
            property_price: best.price,
            loan_principal: best.loan_principal,
            loan_monthly: best.loan_monthly,
            notary_fee: best.notary_fee,
            borrowing_capacity: capacity,
            contribution: best.contribution,
            funding_gap: best.gap,
            converged,
        })
    }

    /// Configured contribution share, held within 0..=1
    fn contribution_share(&self) -> f64 {
        self.config.contribution_share.max(0.0).min(1.0)
    }

    /// Funding at a candidate price, `None` if insurance exceeds the ceiling
    fn evaluate(
        &self,
        household: &Household,
        profile: &AcquisitionProfile,
        scenario: &Scenario,
        max_monthly: f64,
        employer: f64,
        price: f64,
    ) -> Option<Candidate> {
        let insurance_monthly = monthly_insurance(price, profile.loan.insurance_rate_pct);
        let loan_monthly = max_monthly - insurance_monthly;
        if loan_monthly < 0.0 {
            return None;
        }

        let notary_fee = self.notary.fee(&profile.acquisition, price);
        let zero_interest = if scenario.mix.uses_zero_interest() {
            self.calculator.zero_interest_for(household, &profile.acquisition, price)
        } else {
            0.0
        };
        let contribution = if scenario.apply_contribution {
            household.liquidity.min(price * self.contribution_share())
        } else {
            0.0
        };
        let loan_principal = monthly_to_capital(loan_monthly, profile.loan.annual_rate_pct, profile.loan.duration_years);

        let funded = loan_principal + zero_interest + employer + contribution;
        let gap = price + notary_fee - funded;

        Some(Candidate {
            price,
            notary_fee,
            insurance_monthly,
            loan_monthly,
            loan_principal,
            zero_interest,
            employer,
            contribution,
            gap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::EligibilityTables;
    use crate::household::{Acquisition, LoanTerms, Zone};
    use crate::simulation::scenario::SubsidyMix;
    use crate::subsidy::SubsidyRules;
    use approx::assert_abs_diff_eq;

    fn scenario(mix: SubsidyMix) -> Scenario {
        Scenario {
            mix,
            vat_rate_pct: 20.0,
            count_existing_charges: false,
            apply_contribution: false,
        }
    }

    fn solve(household: &Household, profile: &AcquisitionProfile, scenario: &Scenario) -> Option<SimulationResult> {
        solve_with(&SolverConfig::default(), household, profile, scenario)
    }

    fn solve_with(
        config: &SolverConfig,
        household: &Household,
        profile: &AcquisitionProfile,
        scenario: &Scenario,
    ) -> Option<SimulationResult> {
        let tables = EligibilityTables::default_2024();
        let rules = SubsidyRules::default();
        let notary = NotaryRates::default();
        let solver = PriceSolver::new(SubsidyCalculator::new(&tables, &rules), &notary, &config);
        solver.solve(household, profile, scenario)
    }

    #[test]
    fn test_credit_only_matches_closed_form() {
        let household = Household::new(5000.0, 20_000.0, 1, Zone::C);
        let profile = AcquisitionProfile::new_build_apartment(LoanTerms::default());
        let result = solve(&household, &profile, &scenario(SubsidyMix::CreditOnly)).expect("solvable");

        // No notary fees: price = (1750 - price * 0.003 / 12) * annuity factor
        let factor = monthly_to_capital(1.0, 3.5, 25);
        let expected = 1750.0 * factor / (1.0 + 0.003 / 12.0 * factor);
        assert!(result.converged);
        assert_abs_diff_eq!(result.property_price, expected, epsilon = 1.0);
        assert_abs_diff_eq!(result.borrowing_capacity, result.loan_principal, epsilon = 1e-9);
        assert_abs_diff_eq!(result.total_monthly_payment, 1750.0, epsilon = 1e-6);
        assert!(result.funding_gap.abs() < 1.0);
    }

    #[test]
    fn test_zero_income_dropped() {
        let household = Household::new(0.0, 20_000.0, 1, Zone::C);
        let profile = AcquisitionProfile::new_build_apartment(LoanTerms::default());
        assert!(solve(&household, &profile, &scenario(SubsidyMix::CreditOnly)).is_none());
    }

    #[test]
    fn test_charges_exhausting_ceiling_dropped() {
        let household = Household::new(2000.0, 20_000.0, 1, Zone::C).with_charges(800.0);
        let profile = AcquisitionProfile::new_build_apartment(LoanTerms::default());
        let mut counted = scenario(SubsidyMix::CreditOnly);
        counted.count_existing_charges = true;
        assert!(solve(&household, &profile, &counted).is_none());
    }

    #[test]
    fn test_zero_duration_terminates() {
        let household = Household::new(5000.0, 200_000.0, 1, Zone::C);
        let loan = LoanTerms {
            duration_years: 0,
            ..LoanTerms::default()
        };
        let profile = AcquisitionProfile::new_build_apartment(loan);
        // No loan can be raised and no subsidy applies
        assert!(solve(&household, &profile, &scenario(SubsidyMix::CreditOnly)).is_none());
    }

    #[test]
    fn test_contribution_capped() {
        let household = Household::new(3000.0, 200_000.0, 1, Zone::C).with_liquidity(500_000.0);
        let profile = AcquisitionProfile::new(Acquisition::Recent, LoanTerms::default());
        let mut with_savings = scenario(SubsidyMix::CreditOnly);
        with_savings.apply_contribution = true;

        let result = solve(&household, &profile, &with_savings).expect("solvable");
        assert!(result.contribution <= household.liquidity.min(result.property_price * 0.10) + 1e-9);
        assert_abs_diff_eq!(result.contribution, result.property_price * 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_interest_scenario_dropped_when_ineligible() {
        let household = Household::new(5000.0, 500_000.0, 1, Zone::C);
        let profile = AcquisitionProfile::new_build_apartment(LoanTerms::default());
        assert!(solve(&household, &profile, &scenario(SubsidyMix::ZeroInterest)).is_none());
    }

    #[test]
    fn test_subsidies_raise_price() {
        let household = Household::new(3000.0, 20_000.0, 1, Zone::C);
        let profile = AcquisitionProfile::new_build_apartment(LoanTerms::default());

        let base = solve(&household, &profile, &scenario(SubsidyMix::CreditOnly)).unwrap();
        let both = solve(&household, &profile, &scenario(SubsidyMix::ZeroInterestAndEmployer)).unwrap();
        assert!(both.property_price > base.property_price);
        assert_eq!(both.employer_amount, 30_000.0);
        assert!(both.zero_interest_amount > 0.0);
        assert_eq!(both.zero_interest_monthly, 0.0);
        assert!(both.employer_monthly > 0.0);
        assert!(both.funding_gap.abs() < 1.0);
    }

    #[test]
    fn test_insurance_exhausting_ceiling_pushes_bound_down() {
        // 100/month ceiling cannot even pay insurance above 400k at 0.3%
        let household = Household::new(100.0 / 0.35, 200_000.0, 1, Zone::C);
        let profile = AcquisitionProfile::new_build_apartment(LoanTerms::default());
        // Capacity is far below the 50k search floor, so nothing is funded
        assert!(solve(&household, &profile, &scenario(SubsidyMix::CreditOnly)).is_none());
    }

    #[test]
    fn test_search_ceiling_returns_funded_fallback() {
        // 14000/month of room funds far more than the 2M search ceiling
        let household = Household::new(40_000.0, 10_000_000.0, 1, Zone::A);
        let profile = AcquisitionProfile::new_build_apartment(LoanTerms::default());
        let result = solve(&household, &profile, &scenario(SubsidyMix::CreditOnly)).expect("funded");

        let search_max = SolverConfig::default().search_max;
        assert!(!result.converged);
        assert!(result.funding_gap <= 0.0);
        assert!(result.property_price <= search_max);
        assert!(result.property_price > search_max - 1.0);

        let loan = monthly_to_capital(14_000.0 - monthly_insurance(search_max, 0.3), 3.5, 25);
        assert_abs_diff_eq!(result.funding_gap, search_max - loan, epsilon = 1.0);
        assert_abs_diff_eq!(result.borrowing_capacity, loan, epsilon = 1.0);

        // Every lower funded price leaves a larger surplus
        let capped = SolverConfig {
            search_max: 1_900_000.0,
            ..SolverConfig::default()
        };
        let lower = solve_with(&capped, &household, &profile, &scenario(SubsidyMix::CreditOnly)).expect("funded");
        assert!(!lower.converged);
        assert!(result.funding_gap.abs() < lower.funding_gap.abs());
    }

    #[test]
    fn test_renovation_share_cliff_returns_funded_fallback() {
        // Renovation of 50k only qualifies below a 200k price; above it the
        // zero-interest loan vanishes and the price is no longer funded
        let household = Household::new(3000.0, 20_000.0, 1, Zone::C);
        let profile = AcquisitionProfile::new(
            Acquisition::Existing { renovation_cost: Some(50_000.0) },
            LoanTerms::default(),
        );
        let mix = scenario(SubsidyMix::ZeroInterest);
        let result = solve(&household, &profile, &mix).expect("funded");

        assert!(!result.converged);
        assert!(result.funding_gap <= 0.0);
        assert!(result.property_price < 200_000.0);
        assert!(result.property_price > 199_999.0);
        // 40% of a price just under 200k, truncated
        assert!(result.zero_interest_amount >= 79_999.0 && result.zero_interest_amount <= 80_000.0);
        assert_abs_diff_eq!(result.notary_fee, result.property_price * 0.08, epsilon = 1e-6);

        let loan = monthly_to_capital(1050.0 - monthly_insurance(200_000.0, 0.3), 3.5, 25);
        let expected_gap = 200_000.0 * 1.08 - loan - result.zero_interest_amount;
        assert_abs_diff_eq!(result.funding_gap, expected_gap, epsilon = 1.0);

        // A funded price further from the cliff has a larger surplus
        let capped = SolverConfig {
            search_max: 190_000.0,
            ..SolverConfig::default()
        };
        let lower = solve_with(&capped, &household, &profile, &mix).expect("funded");
        assert!(lower.funding_gap <= 0.0);
        assert!(result.funding_gap.abs() < lower.funding_gap.abs());
    }

    #[test]
    fn test_contribution_share_held_in_range() {
        let household = Household::new(3000.0, 200_000.0, 1, Zone::C).with_liquidity(500_000.0);
        let profile = AcquisitionProfile::new(Acquisition::Recent, LoanTerms::default());
        let mut with_savings = scenario(SubsidyMix::CreditOnly);
        with_savings.apply_contribution = true;

        let negative = SolverConfig {
            contribution_share: -0.5,
            ..SolverConfig::default()
        };
        let result = solve_with(&negative, &household, &profile, &with_savings).expect("solvable");
        assert_eq!(result.contribution, 0.0);

        let excessive = SolverConfig {
            contribution_share: 3.0,
            ..SolverConfig::default()
        };
        let result = solve_with(&excessive, &household, &profile, &with_savings).expect("solvable");
        assert!(result.contribution >= 0.0);
        assert!(result.contribution <= result.property_price + 1e-9);
    }
}
