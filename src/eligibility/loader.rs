//! CSV-based ceiling table loader
//!
//! Loads the yearly income ceilings from CSV files in data/tables/

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use super::employer::{EmployerCeilingRow, EMPLOYER_SIZE_COLUMNS};
use super::zero_interest::ZERO_INTEREST_SIZE_COLUMNS;
use crate::error::{Error, Result};
use crate::household::Zone;

/// Default path to ceiling tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

pub const ZERO_INTEREST_FILE: &str = "zero_interest_ceilings.csv";
pub const EMPLOYER_FILE: &str = "employer_ceilings.csv";

fn open(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    Ok(csv::Reader::from_reader(file))
}

fn parse_amount(table: &'static str, record: &csv::StringRecord, idx: usize) -> Result<f64> {
    let raw = record.get(idx).ok_or_else(|| Error::InvalidTable {
        table,
        reason: format!("missing column {} in row {:?}", idx, record),
    })?;
    let value: f64 = raw.trim().parse().map_err(|_| Error::InvalidTable {
        table,
        reason: format!("non-numeric ceiling {:?}", raw),
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidTable {
            table,
            reason: format!("negative or infinite ceiling {}", value),
        });
    }
    Ok(value)
}

fn parse_zone(record: &csv::StringRecord) -> Result<Zone> {
    record.get(0).unwrap_or_default().parse()
}

/// Load zero-interest ceilings: `zone,p1,...,p8`
pub fn load_zero_interest_rows(
    path: &Path,
) -> Result<BTreeMap<Zone, [f64; ZERO_INTEREST_SIZE_COLUMNS]>> {
    let mut reader = open(&path.join(ZERO_INTEREST_FILE))?;
    let mut rows = BTreeMap::new();

    for result in reader.records() {
        let record = result?;
        let zone = parse_zone(&record)?;
        let mut ceilings = [0.0; ZERO_INTEREST_SIZE_COLUMNS];
        for (i, ceiling) in ceilings.iter_mut().enumerate() {
            *ceiling = parse_amount(ZERO_INTEREST_FILE, &record, i + 1)?;
        }
        rows.insert(zone, ceilings);
    }

    Ok(rows)
}

/// Load employer ceilings: `zone,p1,...,p6,additional_person`
pub fn load_employer_rows(path: &Path) -> Result<BTreeMap<Zone, EmployerCeilingRow>> {
    let mut reader = open(&path.join(EMPLOYER_FILE))?;
    let mut rows = BTreeMap::new();

    for result in reader.records() {
        let record = result?;
        let zone = parse_zone(&record)?;
        let mut by_size = [0.0; EMPLOYER_SIZE_COLUMNS];
        for (i, ceiling) in by_size.iter_mut().enumerate() {
            *ceiling = parse_amount(EMPLOYER_FILE, &record, i + 1)?;
        }
        let additional_person = parse_amount(EMPLOYER_FILE, &record, EMPLOYER_SIZE_COLUMNS + 1)?;
        rows.insert(zone, EmployerCeilingRow { by_size, additional_person });
    }

    Ok(rows)
}

/// Raw rows of both ceiling tables
pub struct LoadedTables {
    pub zero_interest: BTreeMap<Zone, [f64; ZERO_INTEREST_SIZE_COLUMNS]>,
    pub employer: BTreeMap<Zone, EmployerCeilingRow>,
}

impl LoadedTables {
    /// Load both tables from the default path
    pub fn load_default() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load both tables from a specific directory
    pub fn load_from(path: &Path) -> Result<Self> {
        Ok(Self {
            zero_interest: load_zero_interest_rows(path)?,
            employer: load_employer_rows(path)?,
        })
    }
}
