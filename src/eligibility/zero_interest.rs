//! Income ceilings for the zero-interest loan
//!
//! One row of eight ceilings per zone, indexed by household size. Households of
//! eight or more people share the last column.

use std::collections::BTreeMap;

use crate::household::Zone;

/// Number of household-size columns in the table
pub const ZERO_INTEREST_SIZE_COLUMNS: usize = 8;

/// Reference-income ceilings by zone and household size
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroInterestCeilings {
    rows: BTreeMap<Zone, [f64; ZERO_INTEREST_SIZE_COLUMNS]>,
}

impl ZeroInterestCeilings {
    /// Create from loaded rows
    pub fn from_rows(rows: BTreeMap<Zone, [f64; ZERO_INTEREST_SIZE_COLUMNS]>) -> Self {
        Self { rows }
    }

    /// Ceilings in force for 2024 operations
    pub fn default_2024() -> Self {
        let a = [49000.0, 68600.0, 88200.0, 102900.0, 117600.0, 132300.0, 147000.0, 161700.0];
        let mut rows = BTreeMap::new();
        rows.insert(Zone::ABis, a);
        rows.insert(Zone::A, a);
        rows.insert(Zone::B1, [34500.0, 48300.0, 62100.0, 72450.0, 82800.0, 93150.0, 103500.0, 113850.0]);
        rows.insert(Zone::B2, [31500.0, 44100.0, 56700.0, 66150.0, 75600.0, 85050.0, 94500.0, 103950.0]);
        rows.insert(Zone::C, [28500.0, 39900.0, 51300.0, 59850.0, 68400.0, 76950.0, 85500.0, 94050.0]);
        Self { rows }
    }

    /// Ceiling for a zone and household size, `None` when the zone has no row
    pub fn ceiling(&self, zone: Zone, household_size: u32) -> Option<f64> {
        let idx = (household_size.max(1) as usize - 1).min(ZERO_INTEREST_SIZE_COLUMNS - 1);
        self.rows.get(&zone).map(|row| row[idx])
    }

    /// Whether the reference income is at or below the ceiling
    pub fn is_eligible(&self, reference_income: f64, zone: Zone, household_size: u32) -> bool {
        self.ceiling(zone, household_size)
            .map_or(false, |ceiling| reference_income <= ceiling)
    }

    pub fn zones(&self) -> impl Iterator<Item = Zone> + '_ {
        self.rows.keys().copied()
    }
}

impl Default for ZeroInterestCeilings {
    fn default() -> Self {
        Self::default_2024()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_lookup() {
        let table = ZeroInterestCeilings::default_2024();
        assert_eq!(table.ceiling(Zone::C, 1), Some(28500.0));
        assert_eq!(table.ceiling(Zone::B1, 4), Some(72450.0));
        assert_eq!(table.ceiling(Zone::ABis, 8), Some(161700.0));
    }

    #[test]
    fn test_large_households_reuse_last_column() {
        let table = ZeroInterestCeilings::default_2024();
        assert_eq!(table.ceiling(Zone::B2, 12), table.ceiling(Zone::B2, 8));
    }

    #[test]
    fn test_zero_size_clamped_to_one() {
        let table = ZeroInterestCeilings::default_2024();
        assert_eq!(table.ceiling(Zone::A, 0), table.ceiling(Zone::A, 1));
    }

    #[test]
    fn test_missing_zone_fails_closed() {
        let mut rows = BTreeMap::new();
        rows.insert(Zone::A, [1.0; ZERO_INTEREST_SIZE_COLUMNS]);
        let table = ZeroInterestCeilings::from_rows(rows);
        assert_eq!(table.ceiling(Zone::C, 1), None);
        assert!(!table.is_eligible(0.0, Zone::C, 1));
    }

    #[test]
    fn test_eligibility_monotone_in_income() {
        let table = ZeroInterestCeilings::default_2024();
        for zone in Zone::ALL {
            for size in 1..=10 {
                let mut was_eligible = true;
                for step in 0..=250 {
                    let income = step as f64 * 1000.0;
                    let eligible = table.is_eligible(income, zone, size);
                    assert!(
                        was_eligible || !eligible,
                        "eligibility regained at {} for {:?}/{}",
                        income, zone, size
                    );
                    was_eligible = eligible;
                }
            }
        }
    }
}
