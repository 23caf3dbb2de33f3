//! Scenario enumeration, price solving and ranking

pub mod amortization;
pub mod fees;
mod scenario;
mod solver;
mod result;
mod engine;

pub use amortization::{capital_to_monthly, monthly_to_capital, max_monthly_payment, monthly_insurance};
pub use fees::{NotaryRates, vat_rates_for, STANDARD_VAT_PCT, REDUCED_VAT_PCT};
pub use scenario::{Scenario, SubsidyMix, enumerate_scenarios};
pub use solver::{PriceSolver, SolverConfig};
pub use result::{SimulationResult, rank_results, best_result};
pub use engine::{Simulator, SimulationConfig, simulate};
