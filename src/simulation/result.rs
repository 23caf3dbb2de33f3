//! Solved scenario output and ranking

use serde::{Deserialize, Serialize};

use super::scenario::Scenario;

/// Financing plan at the solved property price of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub label: String,
    pub scenario: Scenario,

    /// Amortizing loan service plus insurance
    pub total_monthly_payment: f64,

    pub zero_interest_amount: f64,
    pub zero_interest_monthly: f64,
    pub employer_amount: f64,
    pub employer_monthly: f64,

    pub insurance_monthly: f64,
    pub vat_rate_pct: f64,

    /// Solved property price
    pub property_price: f64,

    /// Amortizing loan principal
    pub loan_principal: f64,
    /// Amortizing loan service (excluding insurance)
    pub loan_monthly: f64,

    pub notary_fee: f64,

    /// Amortizing loan plus subsidies
    pub borrowing_capacity: f64,

    /// Savings contributed toward the price
    pub contribution: f64,

    /// `price + notary - (loan + subsidies + contribution)` at the solution
    pub funding_gap: f64,

    /// Whether the gap reached the solver tolerance
    pub converged: bool,
}

impl SimulationResult {
    /// Total cost of the operation including notary fees
    pub fn total_operation_cost(&self) -> f64 {
        self.property_price + self.notary_fee
    }
}

/// Sort results by borrowing capacity, highest first
///
/// The sort is stable, so ties keep the scenario enumeration order.
pub fn rank_results(results: &mut [SimulationResult]) {
    results.sort_by(|a, b| b.borrowing_capacity.total_cmp(&a.borrowing_capacity));
}

/// Result with the highest borrowing capacity
pub fn best_result(results: &[SimulationResult]) -> Option<&SimulationResult> {
    results
        .iter()
        .reduce(|best, r| if r.borrowing_capacity > best.borrowing_capacity { r } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::scenario::SubsidyMix;

    fn result(label: &str, capacity: f64) -> SimulationResult {
        SimulationResult {
            label: label.to_string(),
            scenario: Scenario {
                mix: SubsidyMix::CreditOnly,
                vat_rate_pct: 20.0,
                count_existing_charges: false,
                apply_contribution: false,
            },
            total_monthly_payment: 0.0,
            zero_interest_amount: 0.0,
            zero_interest_monthly: 0.0,
            employer_amount: 0.0,
            employer_monthly: 0.0,
            insurance_monthly: 0.0,
            vat_rate_pct: 20.0,
            property_price: capacity,
            loan_principal: capacity,
            loan_monthly: 0.0,
            notary_fee: 0.0,
            borrowing_capacity: capacity,
            contribution: 0.0,
            funding_gap: 0.0,
            converged: true,
        }
    }

    #[test]
    fn test_rank_descending_and_stable() {
        let mut results = vec![
            result("a", 100.0),
            result("b", 300.0),
            result("c", 100.0),
            result("d", 200.0),
        ];
        rank_results(&mut results);
        let labels: Vec<_> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_best_result() {
        let results = vec![result("a", 100.0), result("b", 300.0), result("c", 300.0)];
        assert_eq!(best_result(&results).unwrap().label, "b");
        assert!(best_result(&[]).is_none());
    }
}
