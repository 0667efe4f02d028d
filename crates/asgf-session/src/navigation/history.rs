//! In-memory history stack implementing [`Navigator`].

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use asgf_core::traits::navigator::{NavigationMode, Navigator};
use asgf_core::types::Location;

/// One navigation performed through the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRecord {
    /// Destination.
    pub location: Location,
    /// How it was reached.
    pub mode: NavigationMode,
}

#[derive(Debug)]
struct HistoryState {
    entries: Vec<Location>,
    index: usize,
    reloads: usize,
    log: Vec<NavigationRecord>,
}

/// Browser-like history kept in memory.
///
/// `Push` drops forward entries and appends, `Replace` overwrites the
/// current entry, `Reload` appends like a hard navigation and counts a
/// document reload.
#[derive(Debug)]
pub struct MemoryHistory {
    state: Mutex<HistoryState>,
}

impl MemoryHistory {
    /// History starting at `initial`.
    pub fn new(initial: Location) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![initial],
                index: 0,
                reloads: 0,
                log: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Go back one entry, returning the new current location.
    pub fn back(&self) -> Option<Location> {
        let mut state = self.lock();
        if state.index == 0 {
            return None;
        }
        state.index -= 1;
        Some(state.entries[state.index].clone())
    }

    /// Entries up to and including the current one.
    pub fn entries(&self) -> Vec<Location> {
        let state = self.lock();
        state.entries[..=state.index].to_vec()
    }

    /// Number of hard navigations.
    pub fn reload_count(&self) -> usize {
        self.lock().reloads
    }

    /// Every navigation in order.
    pub fn navigations(&self) -> Vec<NavigationRecord> {
        self.lock().log.clone()
    }

    /// The most recent navigation.
    pub fn last_navigation(&self) -> Option<NavigationRecord> {
        self.lock().log.last().cloned()
    }
}

impl Navigator for MemoryHistory {
    fn current(&self) -> Location {
        let state = self.lock();
        state.entries[state.index].clone()
    }

    fn navigate(&self, to: Location, mode: NavigationMode) {
        let mut state = self.lock();
        match mode {
            NavigationMode::Replace => {
                let index = state.index;
                state.entries[index] = to.clone();
            }
            NavigationMode::Push | NavigationMode::Reload => {
                let keep = state.index + 1;
                state.entries.truncate(keep);
                state.entries.push(to.clone());
                state.index = keep;
                if mode == NavigationMode::Reload {
                    state.reloads += 1;
                }
            }
        }
        debug!(to = %to, ?mode, "Navigated");
        state.log.push(NavigationRecord { location: to, mode });
    }
}
