//! Financing scenarios and their enumeration
//!
//! A scenario fixes the subsidy mix, the VAT rate, whether existing charges count
//! against the debt ceiling and whether savings are contributed. Axes that cannot
//! change the outcome collapse to a single branch.

use serde::{Deserialize, Serialize};

use super::fees::{vat_rates_for, STANDARD_VAT_PCT};
use crate::household::{AcquisitionProfile, Household};
use crate::subsidy::SubsidyCalculator;

/// Which subsidies top up the amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubsidyMix {
    CreditOnly,
    ZeroInterest,
    Employer,
    ZeroInterestAndEmployer,
}

impl SubsidyMix {
    /// Mixes in presentation order
    pub const ALL: [SubsidyMix; 4] = [
        SubsidyMix::CreditOnly,
        SubsidyMix::ZeroInterest,
        SubsidyMix::Employer,
        SubsidyMix::ZeroInterestAndEmployer,
    ];

    pub fn uses_zero_interest(&self) -> bool {
        matches!(self, SubsidyMix::ZeroInterest | SubsidyMix::ZeroInterestAndEmployer)
    }

    pub fn uses_employer(&self) -> bool {
        matches!(self, SubsidyMix::Employer | SubsidyMix::ZeroInterestAndEmployer)
    }

    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            SubsidyMix::CreditOnly => "credit-only",
            SubsidyMix::ZeroInterest => "credit+zero-interest",
            SubsidyMix::Employer => "credit+employer",
            SubsidyMix::ZeroInterestAndEmployer => "credit+zero-interest+employer",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubsidyMix::CreditOnly => "Amortizing loan only",
            SubsidyMix::ZeroInterest => "Amortizing loan + zero-interest loan",
            SubsidyMix::Employer => "Amortizing loan + employer loan",
            SubsidyMix::ZeroInterestAndEmployer => "Amortizing loan + zero-interest loan + employer loan",
        }
    }
}

/// One combination of financing options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub mix: SubsidyMix,
    /// VAT rate in percent
    pub vat_rate_pct: f64,
    /// Existing charges are deducted from the debt ceiling
    pub count_existing_charges: bool,
    /// Savings are contributed toward the price
    pub apply_contribution: bool,
}

impl Scenario {
    pub fn is_reduced_vat(&self) -> bool {
        self.vat_rate_pct < STANDARD_VAT_PCT
    }

    /// Human-readable label: mix name followed by the other axes
    pub fn label(&self) -> String {
        let vat = if self.is_reduced_vat() {
            format!("reduced VAT {}%", self.vat_rate_pct)
        } else {
            format!("VAT {}%", self.vat_rate_pct)
        };
        let charges = if self.count_existing_charges {
            "with existing charges"
        } else {
            "without existing charges"
        };
        let contribution = if self.apply_contribution {
            "with contribution"
        } else {
            "without contribution"
        };
        format!("{} ({}) ({}) ({})", self.mix.name(), vat, charges, contribution)
    }
}

/// Build every scenario worth solving for this household and acquisition
///
/// Zero-interest mixes are skipped when the acquisition category cannot receive the
/// loan, and employer mixes when the household is above the employer ceiling.
pub fn enumerate_scenarios(
    household: &Household,
    profile: &AcquisitionProfile,
    calculator: &SubsidyCalculator<'_>,
) -> Vec<Scenario> {
    let vat_rates = vat_rates_for(&profile.acquisition);
    let charges_options: &[bool] = if household.has_existing_charges() {
        &[true, false]
    } else {
        &[false]
    };
    let contribution_options: &[bool] = if household.has_liquidity() {
        &[true, false]
    } else {
        &[false]
    };

    let zero_interest_possible = calculator.supports_zero_interest(&profile.acquisition, household.zone);
    let employer_eligible = calculator.is_employer_eligible(
        household.reference_income,
        household.zone,
        household.size_for_tables(),
    );

    let mut scenarios = Vec::new();
    for &vat_rate_pct in &vat_rates {
        for &count_existing_charges in charges_options {
            for &apply_contribution in contribution_options {
                for mix in SubsidyMix::ALL {
                    if mix.uses_zero_interest() && !zero_interest_possible {
                        continue;
                    }
                    if mix.uses_employer() && !employer_eligible {
                        continue;
                    }
                    scenarios.push(Scenario {
                        mix,
                        vat_rate_pct,
                        count_existing_charges,
                        apply_contribution,
                    });
                }
            }
        }
    }

    scenarios
}
