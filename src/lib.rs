//! Borrowing Capacity - household mortgage simulator with housing subsidies
//!
//! This library provides:
//! - Income ceiling tables for the zero-interest and employer-sponsored loan programs
//! - Subsidy amount rules by zone, household size and dwelling type
//! - Scenario enumeration over subsidy mixes, charges, contribution and VAT rate
//! - A bisection solver for the maximum affordable property price
//! - Zone resolution from department/commune data and saved client profiles

pub mod error;
pub mod household;
pub mod eligibility;
pub mod subsidy;
pub mod simulation;
pub mod zoning;
pub mod profile;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use household::{Acquisition, AcquisitionProfile, Household, LoanTerms, Zone};
pub use eligibility::EligibilityTables;
pub use subsidy::{SubsidyCalculator, SubsidyRules};
pub use simulation::{simulate, SimulationConfig, SimulationResult, Simulator, SolverConfig};
pub use zoning::{ZoneMap, ZoneResolver};
pub use profile::ClientProfile;
