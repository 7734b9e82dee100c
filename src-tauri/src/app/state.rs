use std::sync::atomic::{AtomicU64, Ordering};

use crate::app::adb::locator::AdbProgram;
use crate::app::config::AppConfig;

/// Hands out increasing sequence numbers to status refreshes at the moment
/// they start, so the UI can drop a poll that finishes after a newer one.
#[derive(Debug, Default)]
pub struct StatusClock {
    last: AtomicU64,
}

impl StatusClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Only `status_clock` changes after startup; it is atomic, so commands share
/// the state without locking.
pub struct AppState {
    pub adb: AdbProgram,
    pub config: AppConfig,
    pub status_clock: StatusClock,
}

impl AppState {
    pub fn new(adb: AdbProgram, config: AppConfig) -> Self {
        Self {
            adb,
            config,
            status_clock: StatusClock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn sequences_start_at_one_and_increase() {
        let clock = StatusClock::new();
        assert_eq!(clock.next(), 1);
        assert_eq!(clock.next(), 2);
    }

    #[test]
    fn concurrent_refreshes_get_distinct_sequences() {
        let clock = Arc::new(StatusClock::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || (0..100).map(|_| clock.next()).collect::<Vec<_>>())
            })
            .collect();
        let seen: HashSet<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("join"))
            .collect();
        assert_eq!(seen.len(), 400);
        assert_eq!(seen.iter().max(), Some(&400));
    }
}
