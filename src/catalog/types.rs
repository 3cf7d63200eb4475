// Core data structures for the station catalog

use serde::{Deserialize, Serialize};

/// Lower bound of both axes of the normalized map space
pub const MAP_MIN: f32 = 0.0;
/// Upper bound of both axes of the normalized map space
pub const MAP_MAX: f32 = 100.0;

/// A point in the normalized map space, each axis in [0, 100]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Centre of the map, where every visit starts
    pub fn center() -> Self {
        Self::new(50.0, 50.0)
    }

    /// Return a copy with both axes clamped into the map space
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(MAP_MIN, MAP_MAX),
            y: self.y.clamp(MAP_MIN, MAP_MAX),
        }
    }

    /// Check whether both axes are inside the map space
    pub fn in_bounds(&self) -> bool {
        (MAP_MIN..=MAP_MAX).contains(&self.x) && (MAP_MIN..=MAP_MAX).contains(&self.y)
    }
}

/// A discoverable point of interest holding one collectible item
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    /// Stable identifier, unique across the catalog (e.g. "PT1")
    pub id: String,
    /// Display name of the station
    pub name: String,
    /// Name of the item collected at this station
    pub item: String,
    /// Icon shown on the map and in the inventory
    pub icon: String,
    /// Code of the collectible artwork (e.g. "G4")
    pub nft_image: String,
    /// Location of the station on the map
    pub position: Point,
    /// Narrated history of the station
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
}

impl Station {
    pub fn new(
        id: &str,
        name: &str,
        item: &str,
        icon: &str,
        nft_image: &str,
        position: Point,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            item: item.to_string(),
            icon: icon.to_string(),
            nft_image: nft_image.to_string(),
            position,
            story: None,
        }
    }

    /// Set the narrated story for the station
    pub fn with_story(mut self, story: &str) -> Self {
        self.story = Some(story.to_string());
        self
    }

    /// Story told when the station is opened, falling back to a generic
    /// introduction built from the station and item names
    pub fn story(&self) -> String {
        match &self.story {
            Some(story) => story.clone(),
            None => format!(
                "Welcome to {}! This is one of the historic sites of the Phú Thọ Hòa tunnels. \
                 The {} you discovered here carries the stories of courage of the people \
                 who lived and fought in these tunnels.",
                self.name, self.item
            ),
        }
    }
}
