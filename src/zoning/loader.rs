//! Zone map persistence
//!
//! The JSON map in data/zoning/ is the working copy read by the simulator. CSV
//! listings (`departement,commune,zone[,departement_nom]`) are the update format.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Deserialize;

use super::ZoneMap;
use crate::error::{Error, Result};
use crate::household::Zone;

/// Default path to the JSON zone map
pub const DEFAULT_ZONING_PATH: &str = "data/zoning/zones.json";

#[derive(Debug, Deserialize)]
struct ZoneRecord {
    departement: String,
    commune: String,
    zone: String,
    #[serde(default)]
    departement_nom: Option<String>,
}

impl ZoneMap {
    /// Load the map from the default JSON location
    pub fn load_default() -> Result<Self> {
        Self::from_json_path(Path::new(DEFAULT_ZONING_PATH))
    }

    /// Load a JSON zone map
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let raw: ZoneMap = serde_json::from_reader(BufReader::new(file))?;

        // Re-insert so hand-edited single-digit codes are padded
        let mut map = ZoneMap::new();
        for (code, name) in &raw.divisions {
            map.set_division_name(code, name);
        }
        for (code, communes) in raw.subdivisions {
            for (commune, zone) in communes {
                map.insert(&code, &commune, zone);
            }
        }
        log::debug!("loaded {} zoned subdivisions from {}", map.len(), path.display());
        Ok(map)
    }

    /// Load a CSV zone listing
    ///
    /// Rows with an empty division or subdivision are skipped with a warning.
    /// Unknown zone labels are errors.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut map = ZoneMap::new();
        for (line, result) in reader.deserialize::<ZoneRecord>().enumerate() {
            let record = result?;
            if record.departement.is_empty() || record.commune.is_empty() {
                log::warn!("skipping incomplete zoning row {} in {}", line + 1, path.display());
                continue;
            }
            let zone: Zone = record.zone.parse()?;
            if let Some(name) = record.departement_nom.as_deref().filter(|n| !n.is_empty()) {
                map.set_division_name(&record.departement, name);
            }
            map.insert(&record.departement, &record.commune, zone);
        }

        log::debug!("read {} zoned subdivisions from {}", map.len(), path.display());
        Ok(map)
    }

    /// Write the map as pretty-printed JSON, creating parent directories
    pub fn save_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|e| Error::io(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zoning::ZoneResolver;

    fn bundled(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/zoning").join(name)
    }

    #[test]
    fn test_load_bundled_json() {
        let map = ZoneMap::from_json_path(&bundled("zones.json")).unwrap();
        assert!(!map.is_empty());
        assert_eq!(map.resolve_zone("75", "Paris"), Zone::ABis);
        assert_eq!(map.resolve_zone("23", "Guéret"), Zone::C);
        assert_eq!(map.division_name("69"), Some("Rhône"));
    }

    #[test]
    fn test_load_bundled_csv_pads_codes() {
        let map = ZoneMap::from_csv_path(&bundled("zones_update.csv")).unwrap();
        assert_eq!(map.resolve_zone("06", "Nice"), Zone::A);
        assert_eq!(map.resolve_zone("33", "Bordeaux"), Zone::B1);
        assert_eq!(map.division_name("6"), Some("Alpes-Maritimes"));
    }

    #[test]
    fn test_unknown_zone_label_is_error() {
        let path = std::env::temp_dir().join("borrowing_capacity_bad_zones.csv");
        fs::write(&path, "departement,commune,zone\n75,Paris,Z\n").unwrap();
        let err = ZoneMap::from_csv_path(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidZone(_)));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_save_and_reload() {
        let mut map = ZoneMap::from_json_path(&bundled("zones.json")).unwrap();
        map.merge(ZoneMap::from_csv_path(&bundled("zones_update.csv")).unwrap());

        let path = std::env::temp_dir()
            .join("borrowing_capacity_zoning_test")
            .join("zones.json");
        map.save_json(&path).unwrap();
        let reloaded = ZoneMap::from_json_path(&path).unwrap();
        assert_eq!(reloaded, map);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = ZoneMap::from_json_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
