// First-visit flag. Informational only: it never changes how a session is
// selected.

use log::{info, warn};

use crate::storage::{HAS_VISITED_KEY, KeyValueStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisitKind {
    FirstVisit,
    Returning,
}

/// Read the flag and set it on first visit. Storage failures are treated as
/// a first visit.
pub fn record_visit(store: &mut dyn KeyValueStore) -> VisitKind {
    let visited = match store.get(HAS_VISITED_KEY) {
        Ok(value) => value.is_some(),
        Err(e) => {
            warn!("Could not read visit flag: {}", e);
            false
        }
    };

    if visited {
        info!("Welcome back");
        return VisitKind::Returning;
    }

    if let Err(e) = store.set(HAS_VISITED_KEY, "true") {
        warn!("Could not store visit flag: {}", e);
    }
    info!("First visit on this device");
    VisitKind::FirstVisit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::storage::testing::UnavailableStore;

    #[test]
    fn test_first_then_returning() {
        let mut store = MemoryStore::new();
        assert_eq!(record_visit(&mut store), VisitKind::FirstVisit);
        assert_eq!(
            store.get(HAS_VISITED_KEY).unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(record_visit(&mut store), VisitKind::Returning);
    }

    #[test]
    fn test_unavailable_store_counts_as_first_visit() {
        let mut store = UnavailableStore;
        assert_eq!(record_visit(&mut store), VisitKind::FirstVisit);
        assert_eq!(record_visit(&mut store), VisitKind::FirstVisit);
    }
}
