//! Income ceiling tables of the two subsidy programs

mod zero_interest;
mod employer;
pub mod loader;

pub use zero_interest::{ZeroInterestCeilings, ZERO_INTEREST_SIZE_COLUMNS};
pub use employer::{EmployerCeilings, EmployerCeilingRow, EMPLOYER_SIZE_COLUMNS};
pub use loader::LoadedTables;

use std::path::Path;

use crate::error::Result;

/// Container for both ceiling tables
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EligibilityTables {
    pub zero_interest: ZeroInterestCeilings,
    pub employer: EmployerCeilings,
}

impl EligibilityTables {
    /// Ceilings compiled into the crate
    pub fn default_2024() -> Self {
        Self {
            zero_interest: ZeroInterestCeilings::default_2024(),
            employer: EmployerCeilings::default_2024(),
        }
    }

    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let loaded = LoadedTables::load_from(path)?;
        log::debug!(
            "loaded ceilings from {}: {} zero-interest zones, {} employer zones",
            path.display(),
            loaded.zero_interest.len(),
            loaded.employer.len()
        );

        Ok(Self {
            zero_interest: ZeroInterestCeilings::from_rows(loaded.zero_interest),
            employer: EmployerCeilings::from_rows(loaded.employer),
        })
    }
}
