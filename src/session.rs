// Session selection
// Every app load draws a fresh random subset of the catalog

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::Station;

/// Number of stations active in a visit unless configured otherwise
pub const DEFAULT_SESSION_SIZE: usize = 3;

/// Draw `k` distinct stations uniformly at random.
///
/// The result is the first `k` elements of a uniform random permutation of
/// `catalog`. A `k` larger than the catalog is clamped to the catalog size.
pub fn select_session<R: Rng + ?Sized>(
    catalog: &[Station],
    k: usize,
    rng: &mut R,
) -> Vec<Station> {
    let k = if k > catalog.len() {
        warn!(
            "Requested {} session stations but the catalog only has {}",
            k,
            catalog.len()
        );
        catalog.len()
    } else {
        k
    };

    let mut pool = catalog.to_vec();
    let (chosen, _) = pool.partial_shuffle(rng, k);
    chosen.to_vec()
}

/// The stations discoverable during one app load. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    selected: Vec<Station>,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(catalog: &[Station], k: usize, rng: &mut R) -> Self {
        let selected = select_session(catalog, k, rng);
        debug!(
            "Session stations: {:?}",
            selected.iter().map(|s| s.id.as_str()).collect::<Vec<_>>()
        );
        Self { selected }
    }

    pub fn stations(&self) -> &[Station] {
        &self.selected
    }

    pub fn contains(&self, station_id: &str) -> bool {
        self.selected.iter().any(|s| s.id == station_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Point};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{HashMap, HashSet};

    fn catalog_of(n: usize) -> Vec<Station> {
        (0..n)
            .map(|i| {
                Station::new(
                    &format!("S{}", i),
                    "Station",
                    "Item",
                    "⭐",
                    "G0",
                    Point::new(i as f32, i as f32),
                )
            })
            .collect()
    }

    #[test]
    fn test_default_session_size() {
        let catalog = Catalog::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let session = Session::new(catalog.stations(), DEFAULT_SESSION_SIZE, &mut rng);

        assert_eq!(session.len(), 3);
        for station in session.stations() {
            assert!(catalog.get(&station.id).is_some());
            assert!(session.contains(&station.id));
        }
    }

    #[test]
    fn test_empty_catalog_gives_empty_session() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(select_session(&[], 3, &mut rng).is_empty());
    }

    #[test]
    fn test_oversized_request_is_clamped() {
        let catalog = catalog_of(2);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(select_session(&catalog, 5, &mut rng).len(), 2);
    }

    #[test]
    fn test_same_seed_same_session() {
        let catalog = catalog_of(7);
        let a = select_session(&catalog, 3, &mut ChaCha8Rng::seed_from_u64(99));
        let b = select_session(&catalog, 3, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_station_gets_picked() {
        // Each of 7 stations should appear in roughly 3/7 of 7000 draws
        let catalog = catalog_of(7);
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..7000 {
            for station in select_session(&catalog, 3, &mut rng) {
                *counts.entry(station.id).or_default() += 1;
            }
        }

        assert_eq!(counts.len(), 7);
        for count in counts.values() {
            assert!((2700..=3300).contains(count), "biased count {}", count);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_session_is_distinct_subset(n in 0usize..20, k in 0usize..20, seed in any::<u64>()) {
            let catalog = catalog_of(n);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let session = select_session(&catalog, k, &mut rng);

            prop_assert_eq!(session.len(), k.min(n));
            let ids: HashSet<&str> = session.iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(ids.len(), session.len());
            for station in &session {
                prop_assert!(catalog.contains(station));
            }
        }
    }
}
