//! Household data structures: zone tier, income and charge aggregation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Geographic price/income tier used by both subsidy programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    /// Tightest market (Paris and inner suburbs)
    #[serde(rename = "A bis", alias = "Abis", alias = "A BIS")]
    ABis,
    A,
    B1,
    B2,
    /// Most permissive tier, used whenever a location cannot be resolved
    C,
}

impl Zone {
    /// All tiers, tightest first
    pub const ALL: [Zone; 5] = [Zone::ABis, Zone::A, Zone::B1, Zone::B2, Zone::C];

    /// Label as written in zoning data files
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::ABis => "A bis",
            Zone::A => "A",
            Zone::B1 => "B1",
            Zone::B2 => "B2",
            Zone::C => "C",
        }
    }

    /// The two lowest tiers, where renovation of an existing dwelling can
    /// qualify for the zero-interest loan
    pub fn is_low_tier(&self) -> bool {
        matches!(self, Zone::B2 | Zone::C)
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::C
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "ABIS" => Ok(Zone::ABis),
            "A" => Ok(Zone::A),
            "B1" => Ok(Zone::B1),
            "B2" => Ok(Zone::B2),
            "C" => Ok(Zone::C),
            _ => Err(Error::InvalidZone(s.to_string())),
        }
    }
}

/// Monthly income sources before weighting
///
/// Rental and financial income are only partly retained by lenders, so each one
/// carries the percentage that counts toward the debt ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeSources {
    /// Net monthly salary
    pub salary: f64,
    /// Gross monthly rental income
    pub property_income: f64,
    /// Share of rental income retained, in percent
    pub property_weight_pct: f64,
    /// Gross monthly financial income
    pub financial_income: f64,
    /// Share of financial income retained, in percent
    pub financial_weight_pct: f64,
}

impl IncomeSources {
    /// Net monthly income retained for the debt ceiling
    pub fn monthly_income(&self) -> f64 {
        let property = self.property_income * self.property_weight_pct / 100.0;
        let financial = self.financial_income * self.financial_weight_pct / 100.0;
        (self.salary + property + financial).max(0.0)
    }
}

/// Monthly charges of loans and leases already running
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExistingCharges {
    pub consumer_credit: f64,
    pub property_credit: f64,
    pub leasing: f64,
}

impl ExistingCharges {
    pub fn total(&self) -> f64 {
        (self.consumer_credit + self.property_credit + self.leasing).max(0.0)
    }
}

/// Financial situation of the buying household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    /// Net monthly income retained by the lender
    pub monthly_income: f64,

    /// Monthly charges of existing credits and leases
    pub monthly_charges: f64,

    /// Liquid savings available as a personal contribution
    pub liquidity: f64,

    /// Maximum share of income devoted to debt service, in percent
    pub debt_ratio_pct: f64,

    /// Reference fiscal income of year N-2, used for subsidy eligibility
    pub reference_income: f64,

    /// Number of people in the fiscal household
    pub household_size: u32,

    /// Zone of the purchased property
    pub zone: Zone,
}

impl Household {
    /// Default debt ceiling applied by lenders, in percent of income
    pub const DEFAULT_DEBT_RATIO_PCT: f64 = 35.0;

    /// Create a household with no existing charges and no savings
    pub fn new(monthly_income: f64, reference_income: f64, household_size: u32, zone: Zone) -> Self {
        Self {
            monthly_income: monthly_income.max(0.0),
            monthly_charges: 0.0,
            liquidity: 0.0,
            debt_ratio_pct: Self::DEFAULT_DEBT_RATIO_PCT,
            reference_income: reference_income.max(0.0),
            household_size: household_size.max(1),
            zone,
        }
    }

    pub fn with_charges(mut self, monthly_charges: f64) -> Self {
        self.monthly_charges = monthly_charges.max(0.0);
        self
    }

    pub fn with_liquidity(mut self, liquidity: f64) -> Self {
        self.liquidity = liquidity.max(0.0);
        self
    }

    pub fn with_debt_ratio(mut self, debt_ratio_pct: f64) -> Self {
        self.debt_ratio_pct = debt_ratio_pct.max(0.0);
        self
    }

    /// Household size used to index the ceiling tables (never below 1)
    pub fn size_for_tables(&self) -> u32 {
        self.household_size.max(1)
    }

    pub fn has_existing_charges(&self) -> bool {
        self.monthly_charges > 0.0
    }

    pub fn has_liquidity(&self) -> bool {
        self.liquidity > 0.0
    }
}
