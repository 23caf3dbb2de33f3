//! Location to zone resolution
//!
//! A location is a division (department code) and a subdivision (commune name).
//! Lookups never fail: anything that cannot be resolved falls back to the most
//! permissive tier, `Zone::C`.

mod departments;
mod loader;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::household::Zone;

pub use departments::{department_name, normalize_division_code};
pub use loader::DEFAULT_ZONING_PATH;

/// Anything able to map a location to its zone
pub trait ZoneResolver {
    /// Zone of a subdivision, `Zone::C` when unknown
    fn resolve_zone(&self, division: &str, subdivision: &str) -> Zone;
}

/// In-memory zone map, serialized as
/// `{"departements": {code: name}, "communes": {code: {commune: zone}}}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneMap {
    /// Division code to display name
    #[serde(rename = "departements", default)]
    divisions: BTreeMap<String, String>,

    /// Division code to subdivision zones
    #[serde(rename = "communes", default)]
    subdivisions: BTreeMap<String, BTreeMap<String, Zone>>,
}

impl ZoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the zone of one subdivision, registering its division if needed
    pub fn insert(&mut self, division: &str, subdivision: &str, zone: Zone) {
        let code = normalize_division_code(division);
        if !self.divisions.contains_key(&code) {
            let name = department_name(&code)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Department {}", code));
            self.divisions.insert(code.clone(), name);
        }
        self.subdivisions
            .entry(code)
            .or_default()
            .insert(subdivision.trim().to_string(), zone);
    }

    /// Set the display name of a division
    pub fn set_division_name(&mut self, division: &str, name: &str) {
        self.divisions
            .insert(normalize_division_code(division), name.trim().to_string());
    }

    /// Overlay another map
    ///
    /// Division names are replaced key by key. The subdivision table of every
    /// division present in `other` replaces the existing one as a whole.
    pub fn merge(&mut self, other: ZoneMap) {
        self.divisions.extend(other.divisions);
        self.subdivisions.extend(other.subdivisions);
    }

    /// Division codes with their display names, in code order
    pub fn divisions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.divisions.iter().map(|(code, name)| (code.as_str(), name.as_str()))
    }

    /// Subdivisions of a division with their zones, in name order
    pub fn subdivisions(&self, division: &str) -> impl Iterator<Item = (&str, Zone)> {
        self.subdivisions
            .get(&normalize_division_code(division))
            .into_iter()
            .flat_map(|communes| communes.iter().map(|(name, zone)| (name.as_str(), *zone)))
    }

    pub fn division_name(&self, division: &str) -> Option<&str> {
        self.divisions
            .get(&normalize_division_code(division))
            .map(String::as_str)
    }

    /// Number of subdivisions across all divisions
    pub fn len(&self) -> usize {
        self.subdivisions.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, division: &str, subdivision: &str) -> Option<Zone> {
        let communes = self.subdivisions.get(&normalize_division_code(division))?;
        let name = subdivision.trim();
        communes.get(name).copied().or_else(|| {
            communes
                .iter()
                .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
                .map(|(_, zone)| *zone)
        })
    }
}

impl ZoneResolver for ZoneMap {
    fn resolve_zone(&self, division: &str, subdivision: &str) -> Zone {
        match self.lookup(division, subdivision) {
            Some(zone) => zone,
            None => {
                log::warn!(
                    "no zone for {:?} in division {:?}, defaulting to {}",
                    subdivision,
                    division,
                    Zone::C
                );
                Zone::C
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ZoneMap {
        let mut map = ZoneMap::new();
        map.insert("75", "Paris", Zone::ABis);
        map.insert("69", "Lyon", Zone::A);
        map.insert("69", "Villefranche-sur-Saône", Zone::B1);
        map.insert("1", "Bourg-en-Bresse", Zone::B2);
        map
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let map = sample();
        assert_eq!(map.resolve_zone("75", "Paris"), Zone::ABis);
        assert_eq!(map.resolve_zone("69", "lyon"), Zone::A);
        assert_eq!(map.resolve_zone("01", "Bourg-en-Bresse"), Zone::B2);
        assert_eq!(map.resolve_zone("1", "Bourg-en-Bresse"), Zone::B2);
        assert_eq!(map.resolve_zone("69", "Nowhere"), Zone::C);
        assert_eq!(map.resolve_zone("", ""), Zone::C);
    }

    #[test]
    fn test_insert_names_divisions() {
        let map = sample();
        assert_eq!(map.division_name("01"), Some("Ain"));
        assert_eq!(map.division_name("69"), Some("Rhône"));
        assert_eq!(map.len(), 4);

        let mut unnamed = ZoneMap::new();
        unnamed.insert("99", "Somewhere", Zone::C);
        assert_eq!(unnamed.division_name("99"), Some("Department 99"));
    }

    #[test]
    fn test_merge_replaces_per_division() {
        let mut existing = sample();
        let mut incoming = ZoneMap::new();
        incoming.insert("69", "Lyon", Zone::ABis);
        incoming.insert("33", "Bordeaux", Zone::B1);
        incoming.set_division_name("75", "Ville de Paris");

        existing.merge(incoming);

        assert_eq!(existing.resolve_zone("69", "Lyon"), Zone::ABis);
        // incoming division 69 replaced the old table entirely
        assert_eq!(existing.resolve_zone("69", "Villefranche-sur-Saône"), Zone::C);
        assert_eq!(existing.resolve_zone("33", "Bordeaux"), Zone::B1);
        assert_eq!(existing.resolve_zone("75", "Paris"), Zone::ABis);
        assert_eq!(existing.division_name("75"), Some("Ville de Paris"));
    }

    #[test]
    fn test_listing_order() {
        let map = sample();
        let codes: Vec<_> = map.divisions().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["01", "69", "75"]);
        let communes: Vec<_> = map.subdivisions("69").map(|(name, _)| name).collect();
        assert_eq!(communes, vec!["Lyon", "Villefranche-sur-Saône"]);
        assert_eq!(map.subdivisions("42").count(), 0);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["departements"]["75"], "Paris");
        assert_eq!(json["communes"]["75"]["Paris"], "A bis");
    }
}
