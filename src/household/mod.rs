//! Household and acquisition inputs of a simulation run

mod data;
mod acquisition;

pub use data::{Household, Zone, IncomeSources, ExistingCharges};
pub use acquisition::{Acquisition, AcquisitionProfile, DwellingType, NotaryRegime, LoanTerms};
