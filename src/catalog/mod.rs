// Station catalog
// Holds the fixed list of discoverable stations, either the built-in
// Phú Thọ Hòa catalog or one loaded from a JSON file

pub mod types;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::errors::HuntError;

pub use types::{MAP_MAX, MAP_MIN, Point, Station};

/// The complete, immutable list of stations for a site
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    stations: Vec<Station>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and out-of-map positions
    pub fn new(stations: Vec<Station>) -> Result<Self, HuntError> {
        let catalog = Self { stations };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalog from a JSON array of stations
    pub fn from_file(path: &Path) -> Result<Self, HuntError> {
        debug!("Loading station catalog from {:?}", path);
        let content =
            fs::read_to_string(path).map_err(|e| HuntError::CatalogIOError { source: e })?;
        let stations: Vec<Station> = serde_json::from_str(&content)
            .map_err(|e| HuntError::CatalogParseError { source: e })?;
        let catalog = Self::new(stations)?;
        info!("Loaded {} stations from {:?}", catalog.len(), path);
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), HuntError> {
        let mut ids = HashSet::new();
        for station in &self.stations {
            if station.id.is_empty() {
                return Err(HuntError::InvalidCatalog {
                    reason: format!("Station '{}' has an empty id", station.name),
                });
            }
            if !ids.insert(station.id.as_str()) {
                return Err(HuntError::InvalidCatalog {
                    reason: format!("Duplicate station id: {}", station.id),
                });
            }
            if !station.position.in_bounds() {
                return Err(HuntError::InvalidCatalog {
                    reason: format!(
                        "Station {} is outside the map: ({}, {})",
                        station.id, station.position.x, station.position.y
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for Catalog {
    /// The seven stations of the Phú Thọ Hòa tunnels
    fn default() -> Self {
        Self {
            stations: vec![
                Station::new(
                    "PT1",
                    "CỔNG ĐỊA ĐẠO PHÚ THỌ HÒA",
                    "Bản Đồ Bí Mật",
                    "🗺️",
                    "G4",
                    Point::new(50.0, 95.0),
                )
                .with_story(
                    "Welcome to the gate of the Phú Thọ Hòa tunnels. Dug from the 1940s on, \
                     the tunnels sheltered resistance fighters for decades. The secret map \
                     you found charts the whole maze of passages beneath your feet.",
                ),
                Station::new(
                    "PT2",
                    "KHU TRƯNG BÀY VŨ KHÍ",
                    "Súng Trường Cổ",
                    "🔫",
                    "G5",
                    Point::new(25.0, 75.0),
                )
                .with_story(
                    "The weapons gallery keeps relics of the resistance years. Every mark on \
                     this old rifle tells of the people who defended their homeland with it.",
                ),
                Station::new(
                    "PT3",
                    "HẦM CHỈ HUY",
                    "Đài Liên Lạc",
                    "📡",
                    "G6",
                    Point::new(75.0, 25.0),
                )
                .with_story(
                    "The command bunker was the heart of the tunnel network. This radio \
                     carried orders between units when every message mattered.",
                ),
                Station::new(
                    "PT4",
                    "HẦM Y TẾ",
                    "Bộ Dụng Cụ Y Tế",
                    "🏥",
                    "G7",
                    Point::new(50.0, 50.0),
                )
                .with_story(
                    "In the medical bunker fighters and villagers were cared for with the \
                     simplest tools. This kit saved countless lives underground.",
                ),
                Station::new(
                    "PT5",
                    "HẦM BẾP",
                    "Nồi Đồng Truyền Thống",
                    "🍳",
                    "G8",
                    Point::new(80.0, 60.0),
                )
                .with_story(
                    "The kitchen bunker fed everyone sheltering in the tunnels. This bronze \
                     pot cooked simple meals that kept spirits alive.",
                ),
                Station::new(
                    "PT6",
                    "HẦM NGỦ",
                    "Chiếu Cỏ Dân Gian",
                    "🛏️",
                    "G9",
                    Point::new(20.0, 40.0),
                )
                .with_story(
                    "Fighters rested in the sleeping bunker between long watches. The woven \
                     grass mat speaks of a simple life close to nature.",
                ),
                Station::new(
                    "PT7",
                    "KHU VỰC HỌP",
                    "Bàn Họp Truyền Thống",
                    "🏛️",
                    "G10",
                    Point::new(40.0, 30.0),
                )
                .with_story(
                    "Leaders gathered around this table in the meeting area to plan the \
                     resistance. Historic decisions were taken in this small room.",
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn station(id: &str, x: f32, y: f32) -> Station {
        Station::new(id, id, "Item", "⭐", "G0", Point::new(x, y))
    }

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 7);
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.get("PT4").unwrap().position, Point::new(50.0, 50.0));
        assert!(catalog.get("PT8").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::new(vec![station("A", 1.0, 1.0), station("A", 2.0, 2.0)]);
        assert!(matches!(result, Err(HuntError::InvalidCatalog { .. })));
    }

    #[test]
    fn test_out_of_map_station_rejected() {
        let result = Catalog::new(vec![station("A", 101.0, 1.0)]);
        assert!(matches!(result, Err(HuntError::InvalidCatalog { .. })));
    }

    #[test]
    fn test_load_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stations.json");
        let stations = vec![station("A", 10.0, 10.0), station("B", 90.0, 90.0)];
        fs::write(&path, serde_json::to_string(&stations).unwrap()).unwrap();

        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.stations(), stations.as_slice());
    }

    #[test]
    fn test_load_catalog_from_garbage_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("stations.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Catalog::from_file(&path),
            Err(HuntError::CatalogParseError { .. })
        ));
    }
}
