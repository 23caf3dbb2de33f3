//! Income ceilings for the employer-sponsored housing loan
//!
//! The table lists sizes one to six; each further person raises the ceiling by a
//! per-zone increment. Zone C has no row of its own and is priced as B2.

use std::collections::BTreeMap;

use crate::household::Zone;

/// Number of household-size columns listed explicitly
pub const EMPLOYER_SIZE_COLUMNS: usize = 6;

/// Ceilings of one zone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmployerCeilingRow {
    pub by_size: [f64; EMPLOYER_SIZE_COLUMNS],
    /// Added for each person beyond six
    pub additional_person: f64,
}

/// Reference-income ceilings by zone and household size
#[derive(Debug, Clone, PartialEq)]
pub struct EmployerCeilings {
    rows: BTreeMap<Zone, EmployerCeilingRow>,
}

impl EmployerCeilings {
    /// Create from loaded rows
    pub fn from_rows(rows: BTreeMap<Zone, EmployerCeilingRow>) -> Self {
        Self { rows }
    }

    /// Ceilings in force for 2024 operations
    pub fn default_2024() -> Self {
        let mut rows = BTreeMap::new();
        rows.insert(Zone::ABis, EmployerCeilingRow {
            by_size: [43953.0, 65691.0, 86112.0, 102812.0, 122326.0, 137649.0],
            additional_person: 15335.0,
        });
        rows.insert(Zone::A, EmployerCeilingRow {
            by_size: [43953.0, 65691.0, 78963.0, 94585.0, 111971.0, 126001.0],
            additional_person: 14039.0,
        });
        rows.insert(Zone::B1, EmployerCeilingRow {
            by_size: [35825.0, 47842.0, 57531.0, 69455.0, 81705.0, 92080.0],
            additional_person: 10273.0,
        });
        rows.insert(Zone::B2, EmployerCeilingRow {
            by_size: [32243.0, 43056.0, 51778.0, 62510.0, 73535.0, 82873.0],
            additional_person: 9243.0,
        });
        Self { rows }
    }

    /// Zone whose row applies: C is merged into B2
    pub fn effective_zone(zone: Zone) -> Zone {
        match zone {
            Zone::C => Zone::B2,
            other => other,
        }
    }

    /// Ceiling for a zone and household size, `None` when the zone has no row
    pub fn ceiling(&self, zone: Zone, household_size: u32) -> Option<f64> {
        let row = self.rows.get(&Self::effective_zone(zone))?;
        let size = household_size.max(1) as usize;
        if size <= EMPLOYER_SIZE_COLUMNS {
            Some(row.by_size[size - 1])
        } else {
            let extra = (size - EMPLOYER_SIZE_COLUMNS) as f64;
            Some(row.by_size[EMPLOYER_SIZE_COLUMNS - 1] + extra * row.additional_person)
        }
    }

    /// Whether the reference income is at or below the ceiling
    pub fn is_eligible(&self, reference_income: f64, zone: Zone, household_size: u32) -> bool {
        self.ceiling(zone, household_size)
            .map_or(false, |ceiling| reference_income <= ceiling)
    }
}

impl Default for EmployerCeilings {
    fn default() -> Self {
        Self::default_2024()
    }
}
