//! Zero-interest loan amount rules
//!
//! The loan covers a share of the operation cost, capped by dwelling type and by a
//! fixed per-zone operation ceiling. Amounts are whole currency units.

use std::collections::BTreeMap;

use crate::household::{DwellingType, Zone};

/// Share and ceiling parameters of the zero-interest loan
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroInterestRules {
    /// Share of the operation cost financed
    pub base_share: f64,
    /// Cap as a share of cost for apartments
    pub apartment_share: f64,
    /// Cap as a share of cost for houses
    pub house_share: f64,
    /// Renovation must exceed this share of cost for existing dwellings
    pub renovation_min_share: f64,
    /// Operation ceiling per zone tier
    pub operation_ceilings: BTreeMap<Zone, f64>,
}

impl ZeroInterestRules {
    pub fn default_2024() -> Self {
        let mut operation_ceilings = BTreeMap::new();
        operation_ceilings.insert(Zone::A, 150_000.0);
        operation_ceilings.insert(Zone::B1, 135_000.0);
        operation_ceilings.insert(Zone::B2, 120_000.0);
        operation_ceilings.insert(Zone::C, 100_000.0);

        Self {
            base_share: 0.40,
            apartment_share: 0.50,
            house_share: 0.30,
            renovation_min_share: 0.25,
            operation_ceilings,
        }
    }

    /// Operation ceiling for a zone; zones without a tier of their own get the lowest
    pub fn operation_ceiling(&self, zone: Zone) -> f64 {
        self.operation_ceilings
            .get(&zone)
            .copied()
            .unwrap_or_else(|| self.lowest_ceiling())
    }

    fn lowest_ceiling(&self) -> f64 {
        self.operation_ceilings
            .values()
            .copied()
            .reduce(f64::min)
            .unwrap_or(100_000.0)
    }

    /// Capped amount for an eligible household, truncated to whole units
    pub fn capped_amount(&self, operation_cost: f64, zone: Zone, dwelling: DwellingType) -> f64 {
        let cost = operation_cost.max(0.0);
        let mut amount = cost * self.base_share;

        let type_share = match dwelling {
            DwellingType::Apartment => self.apartment_share,
            DwellingType::House => self.house_share,
        };
        amount = amount.min(cost * type_share);
        amount = amount.min(self.operation_ceiling(zone));

        amount.floor()
    }

    /// Whether renovation work is heavy enough for an existing dwelling to qualify
    pub fn renovation_qualifies(&self, renovation_cost: f64, operation_cost: f64, zone: Zone) -> bool {
        if operation_cost <= 0.0 {
            return false;
        }
        renovation_cost / operation_cost > self.renovation_min_share && zone.is_low_tier()
    }
}

impl Default for ZeroInterestRules {
    fn default() -> Self {
        Self::default_2024()
    }
}
