//! Subsidy eligibility and amounts
//!
//! Two programs can top up the amortizing loan:
//! - **Zero-interest loan**: income-tested, amount scales with the operation cost
//!   and depends on the acquisition category
//! - **Employer housing loan**: income-tested, fixed amount
//!
//! An ineligible household simply gets a zero amount; nothing here fails.

mod zero_interest;

pub use zero_interest::ZeroInterestRules;

use crate::eligibility::EligibilityTables;
use crate::household::{Acquisition, DwellingType, Household, Zone};

/// Amount of the employer housing loan
pub const DEFAULT_EMPLOYER_AMOUNT: f64 = 30_000.0;

/// Amount rules of both programs
#[derive(Debug, Clone, PartialEq)]
pub struct SubsidyRules {
    pub zero_interest: ZeroInterestRules,
    /// Fixed amount granted by the employer program
    pub employer_amount: f64,
}

impl Default for SubsidyRules {
    fn default() -> Self {
        Self {
            zero_interest: ZeroInterestRules::default_2024(),
            employer_amount: DEFAULT_EMPLOYER_AMOUNT,
        }
    }
}

/// Computes subsidy eligibility and amounts against a table set
#[derive(Debug, Clone, Copy)]
pub struct SubsidyCalculator<'a> {
    tables: &'a EligibilityTables,
    rules: &'a SubsidyRules,
}

impl<'a> SubsidyCalculator<'a> {
    pub fn new(tables: &'a EligibilityTables, rules: &'a SubsidyRules) -> Self {
        Self { tables, rules }
    }

    pub fn is_zero_interest_eligible(&self, reference_income: f64, zone: Zone, household_size: u32) -> bool {
        self.tables
            .zero_interest
            .is_eligible(reference_income, zone, household_size)
    }

    /// Zero-interest amount for a given dwelling cap, zero when income is too high
    pub fn zero_interest_max_amount(
        &self,
        reference_income: f64,
        household_size: u32,
        zone: Zone,
        operation_cost: f64,
        dwelling: DwellingType,
    ) -> f64 {
        if !self.is_zero_interest_eligible(reference_income, zone, household_size) {
            return 0.0;
        }
        self.rules.zero_interest.capped_amount(operation_cost, zone, dwelling)
    }

    /// Whether the acquisition category can ever receive the zero-interest loan
    ///
    /// Recent dwellings never qualify. Existing dwellings need planned renovation in one
    /// of the two lowest zones; the renovation share itself depends on the price and is
    /// checked in [`Self::zero_interest_for`].
    pub fn supports_zero_interest(&self, acquisition: &Acquisition, zone: Zone) -> bool {
        match acquisition {
            Acquisition::NewBuild { .. } => true,
            Acquisition::Recent => false,
            Acquisition::Existing { renovation_cost } => renovation_cost.is_some() && zone.is_low_tier(),
        }
    }

    /// Zero-interest amount for a household buying at `operation_cost`
    pub fn zero_interest_for(&self, household: &Household, acquisition: &Acquisition, operation_cost: f64) -> f64 {
        let size = household.size_for_tables();
        let zone = household.zone;
        let income = household.reference_income;

        match acquisition {
            Acquisition::NewBuild { dwelling, .. } => {
                self.zero_interest_max_amount(income, size, zone, operation_cost, *dwelling)
            }
            Acquisition::Recent => 0.0,
            Acquisition::Existing { .. } => {
                let Some(renovation_cost) = acquisition.renovation_cost() else {
                    return 0.0;
                };
                if !self
                    .rules
                    .zero_interest
                    .renovation_qualifies(renovation_cost, operation_cost, zone)
                {
                    return 0.0;
                }
                // Renovated existing dwellings use the apartment cap whatever their type
                self.zero_interest_max_amount(income, size, zone, operation_cost, DwellingType::Apartment)
            }
        }
    }

    pub fn is_employer_eligible(&self, reference_income: f64, zone: Zone, household_size: u32) -> bool {
        self.tables
            .employer
            .is_eligible(reference_income, zone, household_size)
    }

    /// Fixed employer amount if eligible, independent of the price
    pub fn employer_amount(&self, eligible: bool) -> f64 {
        if eligible {
            self.rules.employer_amount
        } else {
            0.0
        }
    }

    /// Employer amount for a household
    pub fn employer_for(&self, household: &Household) -> f64 {
        self.employer_amount(self.is_employer_eligible(
            household.reference_income,
            household.zone,
            household.size_for_tables(),
        ))
    }
}
