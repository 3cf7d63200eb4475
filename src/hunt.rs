// Application state container
// Owns the catalog, the visit's session, the player position and the
// collection ledger. Views call into it instead of keeping their own copies.

use std::sync::{Arc, Mutex};

use log::{debug, info};
use rand::Rng;

use crate::catalog::{Catalog, Point, Station};
use crate::config::AppConfig;
use crate::errors::HuntError;
use crate::ledger::{CollectedItem, CollectionResult, Ledger, Progress};
use crate::position::{Direction, Motion, Orientation, Position};
use crate::proximity;
use crate::session::Session;
use crate::storage::KeyValueStore;
use crate::visit::{self, VisitKind};

/// A hunt shared between threads; the mutex serializes collection
pub type SharedHunt = Arc<Mutex<HuntState>>;

pub struct HuntState {
    config: AppConfig,
    catalog: Catalog,
    session: Session,
    position: Position,
    ledger: Ledger,
    visit: VisitKind,
    store: Box<dyn KeyValueStore>,
}

impl HuntState {
    /// Start a visit: load the ledger, record the visit and draw a session
    pub fn start<R: Rng + ?Sized>(
        config: AppConfig,
        catalog: Catalog,
        mut store: Box<dyn KeyValueStore>,
        rng: &mut R,
    ) -> Self {
        let ledger = Ledger::load(store.as_ref());
        let visit = visit::record_visit(store.as_mut());
        let session = Session::new(catalog.stations(), config.session_size, rng);
        let position = Position::new(Point::center(), config.move_step);

        info!(
            "Hunt started with {} of {} stations, {} already collected",
            session.len(),
            catalog.len(),
            ledger.len()
        );

        Self {
            config,
            catalog,
            session,
            position,
            ledger,
            visit,
            store,
        }
    }

    pub fn into_shared(self) -> SharedHunt {
        Arc::new(Mutex::new(self))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn visit(&self) -> VisitKind {
        self.visit
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn set_position(&mut self, point: Point) {
        self.position.set(point);
    }

    pub fn move_player(&mut self, direction: Direction) {
        self.position.nudge(direction);
        debug!("Moved {:?} to {}", direction, self.position);
    }

    pub fn apply_orientation(&mut self, orientation: Orientation) {
        self.position.apply_orientation(orientation);
    }

    pub fn apply_motion(&mut self, motion: Motion) -> bool {
        self.position.apply_motion(motion)
    }

    /// Session stations within the proximity threshold of the player
    pub fn nearby(&self) -> Vec<&Station> {
        proximity::nearby(
            self.position.point(),
            self.session.stations(),
            self.config.proximity_threshold,
        )
    }

    /// Closest session station to the player
    pub fn nearest(&self) -> Option<(&Station, f32)> {
        proximity::nearest(self.position.point(), self.session.stations())
    }

    /// Collect the catalog station with `station_id`
    pub fn collect(&mut self, station_id: &str) -> Result<CollectionResult, HuntError> {
        let station = self
            .catalog
            .get(station_id)
            .ok_or_else(|| HuntError::UnknownStation {
                id: station_id.to_string(),
            })?;
        Ok(self.ledger.collect(station, self.store.as_mut()))
    }

    pub fn is_collected(&self, station_id: &str) -> bool {
        self.ledger.contains(station_id)
    }

    pub fn progress(&self) -> Progress {
        self.ledger.progress(self.catalog.len())
    }

    pub fn inventory(&self) -> &[CollectedItem] {
        self.ledger.items()
    }

    pub fn story(&self, station_id: &str) -> Result<String, HuntError> {
        self.catalog
            .get(station_id)
            .map(Station::story)
            .ok_or_else(|| HuntError::UnknownStation {
                id: station_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::testing::UnavailableStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::thread;

    fn start(store: impl KeyValueStore + 'static, seed: u64) -> HuntState {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        HuntState::start(
            AppConfig::default(),
            Catalog::default(),
            Box::new(store),
            &mut rng,
        )
    }

    #[test]
    fn test_start() {
        let hunt = start(MemoryStore::new(), 3);
        assert_eq!(hunt.session().len(), 3);
        assert_eq!(hunt.position().point(), Point::center());
        assert_eq!(hunt.visit(), VisitKind::FirstVisit);
        assert_eq!(hunt.progress(), Progress { collected: 0, total: 7 });
    }

    #[test]
    fn test_start_without_storage() {
        let mut hunt = start(UnavailableStore, 3);
        assert_eq!(hunt.session().len(), 3);
        assert_eq!(hunt.visit(), VisitKind::FirstVisit);
        assert!(hunt.inventory().is_empty());

        assert_eq!(hunt.collect("PT1").unwrap(), CollectionResult::Collected);
        assert_eq!(hunt.collect("PT1").unwrap(), CollectionResult::AlreadyCollected);
        assert_eq!(hunt.progress(), Progress { collected: 1, total: 7 });
    }

    #[test]
    fn test_config_drives_session_and_threshold() {
        let config = AppConfig {
            session_size: 5,
            proximity_threshold: 1.0,
            ..Default::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut hunt = HuntState::start(
            config.clone(),
            Catalog::default(),
            Box::new(MemoryStore::new()),
            &mut rng,
        );
        assert_eq!(hunt.config(), &config);
        assert_eq!(hunt.session().len(), 5);

        let target = hunt.session().stations()[0].position;
        hunt.set_position(Point::new(target.x + 0.5, target.y));
        assert_eq!(hunt.nearby().len(), 1);
        hunt.set_position(Point::new(target.x + 1.0, target.y));
        assert!(hunt.nearby().is_empty());
    }

    #[test]
    fn test_orientation_moves_player() {
        let mut hunt = start(MemoryStore::new(), 5);
        hunt.apply_orientation(Orientation {
            alpha: 0.0,
            beta: 0.0,
            gamma: 5.0,
        });
        assert_eq!(hunt.position().point(), Point::new(54.0, 50.0));
    }

    #[test]
    fn test_motion_moves_player_when_strong() {
        let mut hunt = start(MemoryStore::new(), 5);
        assert!(!hunt.apply_motion(Motion {
            x: 1.0,
            y: 1.0,
            z: 9.8,
        }));
        assert_eq!(hunt.position().point(), Point::center());

        assert!(hunt.apply_motion(Motion {
            x: 10.0,
            y: 0.0,
            z: 15.0,
        }));
        assert_eq!(hunt.position().point(), Point::new(70.0, 50.0));
    }

    #[test]
    fn test_unknown_station() {
        let mut hunt = start(MemoryStore::new(), 3);
        assert!(matches!(
            hunt.collect("PT99"),
            Err(HuntError::UnknownStation { .. })
        ));
        assert!(hunt.story("PT99").is_err());
    }

    #[test]
    fn test_nearby_follows_player() {
        let mut hunt = start(MemoryStore::new(), 11);
        let target = hunt.session().stations()[0].clone();

        hunt.set_position(target.position);
        assert!(hunt.nearby().iter().any(|s| s.id == target.id));
        assert_eq!(hunt.nearest().unwrap().0.id, target.id);
    }

    #[test]
    fn test_move_player() {
        let mut hunt = start(MemoryStore::new(), 5);
        hunt.set_position(Point::new(40.0, 50.0));
        hunt.move_player(Direction::Right);
        assert_eq!(hunt.position().point(), Point::new(45.0, 50.0));
    }

    #[test]
    fn test_concurrent_collect_collects_once() {
        let hunt = start(MemoryStore::new(), 8).into_shared();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let hunt = Arc::clone(&hunt);
                thread::spawn(move || hunt.lock().unwrap().collect("PT6").unwrap())
            })
            .collect();
        let results: Vec<CollectionResult> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        let collected = results
            .iter()
            .filter(|r| **r == CollectionResult::Collected)
            .count();
        assert_eq!(collected, 1);
        assert_eq!(hunt.lock().unwrap().inventory().len(), 1);
    }
}
