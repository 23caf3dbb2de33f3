//! Client profile files
//!
//! A client profile is the raw form input of one advisory session, saved as JSON so a
//! simulation can be replayed later. It is converted into a `Household` and an
//! `AcquisitionProfile` once the location has been resolved to a zone.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::household::{
    Acquisition, AcquisitionProfile, DwellingType, ExistingCharges, Household, IncomeSources,
    LoanTerms, NotaryRegime, Zone,
};
use crate::zoning::ZoneResolver;

/// Acquisition category as entered, before its options are validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    #[default]
    NewBuild,
    Recent,
    Existing,
}

/// Saved client inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub income: IncomeSources,
    pub charges: ExistingCharges,

    /// Savings available as a personal contribution
    pub liquidity: f64,

    /// Maximum debt-to-income ratio, in percent
    pub debt_ratio_pct: f64,

    /// Reference fiscal income of year N-2
    pub reference_income: f64,

    /// Number of fiscal shares (informational)
    pub fiscal_parts: f64,

    /// Number of people in the household
    pub household_size: u32,

    pub loan: LoanTerms,

    /// Department code of the property
    pub division: String,

    /// Commune of the property
    pub subdivision: String,

    /// Forces the zone instead of resolving the location
    pub zone: Option<Zone>,

    pub category: PropertyCategory,

    /// New builds only
    pub dwelling: Option<DwellingType>,

    /// New builds only
    pub notary: Option<NotaryRegime>,

    /// New builds only: also simulate the reduced VAT rate
    pub test_reduced_vat: bool,

    /// Existing dwellings only
    pub renovation_planned: bool,
    pub renovation_cost: f64,
}

impl Default for ClientProfile {
    fn default() -> Self {
        Self {
            income: IncomeSources {
                property_weight_pct: 70.0,
                financial_weight_pct: 100.0,
                ..IncomeSources::default()
            },
            charges: ExistingCharges::default(),
            liquidity: 0.0,
            debt_ratio_pct: Household::DEFAULT_DEBT_RATIO_PCT,
            reference_income: 0.0,
            fiscal_parts: 1.0,
            household_size: 1,
            loan: LoanTerms::default(),
            division: String::new(),
            subdivision: String::new(),
            zone: None,
            category: PropertyCategory::NewBuild,
            dwelling: None,
            notary: None,
            test_reduced_vat: false,
            renovation_planned: false,
            renovation_cost: 0.0,
        }
    }
}

impl ClientProfile {
    /// Longest loan duration accepted, in years
    pub const MAX_DURATION_YEARS: u32 = 50;

    /// Read a saved profile
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let profile = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("loaded client profile {}", path.display());
        Ok(profile)
    }

    /// Write the profile as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| Error::io(path, e))?;
        Ok(())
    }

    /// `client_YYYY-MM-DD.json`
    pub fn default_file_name(date: NaiveDate) -> String {
        format!("client_{}.json", date.format("%Y-%m-%d"))
    }

    /// File name for a profile saved today (local time)
    pub fn default_file_name_today() -> String {
        Self::default_file_name(chrono::Local::now().date_naive())
    }

    /// Zone of the property: the forced zone if any, else the resolved location
    pub fn zone(&self, resolver: &dyn ZoneResolver) -> Zone {
        self.zone
            .unwrap_or_else(|| resolver.resolve_zone(&self.division, &self.subdivision))
    }

    /// Build the simulation inputs
    ///
    /// Options that do not belong to the selected category are ignored. Missing
    /// new-build options fall back to an apartment with waived notary fees.
    pub fn to_inputs(&self, resolver: &dyn ZoneResolver) -> Result<(Household, AcquisitionProfile)> {
        self.validate()?;

        let household = Household::new(
            self.income.monthly_income(),
            self.reference_income,
            self.household_size,
            self.zone(resolver),
        )
        .with_charges(self.charges.total())
        .with_liquidity(self.liquidity)
        .with_debt_ratio(self.debt_ratio_pct);

        let acquisition = match self.category {
            PropertyCategory::NewBuild => Acquisition::NewBuild {
                dwelling: self.dwelling.unwrap_or(DwellingType::Apartment),
                notary: self.notary.unwrap_or(NotaryRegime::None),
                test_reduced_vat: self.test_reduced_vat,
            },
            PropertyCategory::Recent => Acquisition::Recent,
            PropertyCategory::Existing => Acquisition::Existing {
                renovation_cost: self.renovation_planned.then_some(self.renovation_cost),
            },
        };

        Ok((household, AcquisitionProfile::new(acquisition, self.loan)))
    }

    fn validate(&self) -> Result<()> {
        let amounts = [
            ("salary", self.income.salary),
            ("property income", self.income.property_income),
            ("financial income", self.income.financial_income),
            ("consumer credit", self.charges.consumer_credit),
            ("property credit", self.charges.property_credit),
            ("leasing", self.charges.leasing),
            ("liquidity", self.liquidity),
            ("reference income", self.reference_income),
            ("renovation cost", self.renovation_cost),
            ("interest rate", self.loan.annual_rate_pct),
            ("insurance rate", self.loan.insurance_rate_pct),
        ];
        if let Some((name, value)) = amounts.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidProfile(format!("{} must be a non-negative amount, got {}", name, value)));
        }

        for (name, pct) in [
            ("property income weight", self.income.property_weight_pct),
            ("financial income weight", self.income.financial_weight_pct),
            ("debt ratio", self.debt_ratio_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                return Err(Error::InvalidProfile(format!("{} must be between 0 and 100, got {}", name, pct)));
            }
        }

        if self.loan.duration_years > Self::MAX_DURATION_YEARS {
            return Err(Error::InvalidProfile(format!(
                "loan duration must be at most {} years, got {}",
                Self::MAX_DURATION_YEARS,
                self.loan.duration_years
            )));
        }

        if self.category == PropertyCategory::Existing
            && self.renovation_planned
            && self.renovation_cost <= 0.0
        {
            return Err(Error::InvalidProfile(
                "renovation is planned but its cost is zero".to_string(),
            ));
        }
        Ok(())
    }
}
