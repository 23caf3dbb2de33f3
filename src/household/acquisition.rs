//! Acquisition profile: what is bought and how the main loan is priced
//!
//! Each acquisition category only carries the options that make sense for it, so a
//! recent dwelling cannot ask for reduced VAT and a new build cannot declare renovation.

use serde::{Deserialize, Serialize};

/// Dwelling sub-type for a new build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DwellingType {
    Apartment,
    House,
}

/// Notary fee regime available on new builds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotaryRegime {
    /// Fees waived by the developer
    None,
    /// Reduced fees on new housing
    Reduced,
}

/// Acquisition category with its category-specific options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Acquisition {
    /// Off-plan or newly delivered housing
    NewBuild {
        dwelling: DwellingType,
        notary: NotaryRegime,
        /// Also look at the reduced VAT rate
        test_reduced_vat: bool,
    },
    /// Recently completed, already occupied once
    Recent,
    /// Existing housing, optionally with renovation work
    Existing {
        /// Cost of planned renovation, `None` when no work is planned
        renovation_cost: Option<f64>,
    },
}

impl Acquisition {
    pub fn label(&self) -> &'static str {
        match self {
            Acquisition::NewBuild { .. } => "new build",
            Acquisition::Recent => "recent",
            Acquisition::Existing { .. } => "existing",
        }
    }

    /// Renovation cost when renovation is planned on an existing dwelling
    pub fn renovation_cost(&self) -> Option<f64> {
        match self {
            Acquisition::Existing { renovation_cost } => renovation_cost.map(|c| c.max(0.0)),
            _ => None,
        }
    }
}

/// Terms of the amortizing loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    /// Nominal annual interest rate, in percent
    pub annual_rate_pct: f64,
    /// Annual borrower insurance rate on the property price, in percent
    pub insurance_rate_pct: f64,
    /// Loan duration in years
    pub duration_years: u32,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            annual_rate_pct: 3.5,
            insurance_rate_pct: 0.3,
            duration_years: 25,
        }
    }
}

/// Everything about the purchase that is not the household itself
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionProfile {
    pub acquisition: Acquisition,
    pub loan: LoanTerms,
}

impl AcquisitionProfile {
    pub fn new(acquisition: Acquisition, loan: LoanTerms) -> Self {
        Self { acquisition, loan }
    }

    /// New-build apartment, no notary fees, standard VAT
    pub fn new_build_apartment(loan: LoanTerms) -> Self {
        Self::new(
            Acquisition::NewBuild {
                dwelling: DwellingType::Apartment,
                notary: NotaryRegime::None,
                test_reduced_vat: false,
            },
            loan,
        )
    }
}
