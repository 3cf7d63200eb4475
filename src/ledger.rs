// Collection ledger
// The ordered record of every station collected on this device. A station
// moves from undiscovered to collected exactly once and never back.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::{Point, Station};
use crate::errors::HuntError;
use crate::storage::{COLLECTED_ITEMS_KEY, KeyValueStore};

/// A collected station, self-contained so it renders without the catalog
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectedItem {
    /// Id of the station the item came from; records written by the web
    /// client use `id`
    #[serde(alias = "id")]
    pub station_id: String,
    pub name: String,
    pub item: String,
    pub icon: String,
    pub nft_image: String,
    pub position: Point,
    /// Missing on records written before collection times were stamped
    #[serde(default)]
    pub collected_at: Option<DateTime<Utc>>,
}

impl CollectedItem {
    /// Snapshot a station's display metadata at collection time
    pub fn from_station(station: &Station, collected_at: DateTime<Utc>) -> Self {
        Self {
            station_id: station.id.clone(),
            name: station.name.clone(),
            item: station.item.clone(),
            icon: station.icon.clone(),
            nft_image: station.nft_image.clone(),
            position: station.position,
            collected_at: Some(collected_at),
        }
    }
}

/// Outcome of a collection attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionResult {
    /// The station was added to the ledger
    Collected,
    /// The station was already in the ledger; nothing changed
    AlreadyCollected,
}

/// Collected vs. total station counts for the inventory screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub collected: usize,
    pub total: usize,
}

impl Progress {
    /// Share of the catalog collected, 0 to 100
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        self.collected as f32 / self.total as f32 * 100.0
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.collected)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.collected >= self.total
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ledger {
    items: Vec<CollectedItem>,
}

impl Ledger {
    /// Read the ledger from the store. Missing, unreadable or malformed
    /// state all yield an empty ledger.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match Self::try_load(store) {
            Ok(ledger) => {
                debug!("Loaded {} collected items", ledger.len());
                ledger
            }
            Err(e) => {
                warn!("Starting with an empty collection: {}", e);
                Self::default()
            }
        }
    }

    fn try_load(store: &dyn KeyValueStore) -> Result<Self, HuntError> {
        let Some(content) = store.get(COLLECTED_ITEMS_KEY)? else {
            return Ok(Self::default());
        };

        let items: Vec<CollectedItem> =
            serde_json::from_str(&content).map_err(|e| HuntError::MalformedPersistedState {
                key: COLLECTED_ITEMS_KEY.to_string(),
                reason: e.to_string(),
            })?;

        let count = items.len();
        let items: Vec<CollectedItem> = items
            .into_iter()
            .unique_by(|item| item.station_id.clone())
            .collect();
        if items.len() != count {
            warn!(
                "Dropped {} duplicate collected items from stored state",
                count - items.len()
            );
        }

        Ok(Self { items })
    }

    /// Collect `station` now. See [`Ledger::collect_at`].
    pub fn collect(
        &mut self,
        station: &Station,
        store: &mut dyn KeyValueStore,
    ) -> CollectionResult {
        self.collect_at(station, Utc::now(), store)
    }

    /// Add `station` to the ledger unless already present, then write the
    /// whole ledger through to the store. A failed write keeps the item in
    /// memory for the rest of the session.
    pub fn collect_at(
        &mut self,
        station: &Station,
        collected_at: DateTime<Utc>,
        store: &mut dyn KeyValueStore,
    ) -> CollectionResult {
        if self.contains(&station.id) {
            debug!("Station {} already collected", station.id);
            return CollectionResult::AlreadyCollected;
        }

        self.items.push(CollectedItem::from_station(station, collected_at));
        info!("Collected {} from station {}", station.item, station.id);

        if let Err(e) = self.persist(store) {
            warn!("Collection kept in memory only: {}", e);
        }

        CollectionResult::Collected
    }

    fn persist(&self, store: &mut dyn KeyValueStore) -> Result<(), HuntError> {
        let content = serde_json::to_string(&self.items)
            .map_err(|e| HuntError::StorageSerializeError { source: e })?;
        store.set(COLLECTED_ITEMS_KEY, &content)
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.items.iter().any(|i| i.station_id == station_id)
    }

    pub fn get(&self, station_id: &str) -> Option<&CollectedItem> {
        self.items.iter().find(|i| i.station_id == station_id)
    }

    pub fn items(&self) -> &[CollectedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn progress(&self, total: usize) -> Progress {
        Progress {
            collected: self.items.len(),
            total,
        }
    }
}
