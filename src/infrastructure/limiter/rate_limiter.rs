use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::sleep;

/// Sliding window over two fixed buckets: the previous window's count is
/// weighted by how much of it still overlaps the sliding interval.
#[derive(Debug)]
pub struct SlidingWindow {
    window_size: Duration,
    limit: u64,
    current_window_start: Instant,
    current_count: u64,
    prev_count: u64,
    last_seen: Instant,
}

impl SlidingWindow {
    fn new(window_size: Duration, limit: u64) -> Self {
        let now = Instant::now();
        Self {
            window_size,
            limit,
            current_window_start: now,
            current_count: 0,
            prev_count: 0,
            last_seen: now,
        }
    }

    /// Counts only accepted requests: a rejected call does not extend the
    /// caller's wait.
    fn allow(&mut self) -> bool {
        let now = Instant::now();
        self.last_seen = now;

        let idle = now.duration_since(self.current_window_start);
        if idle >= self.window_size * 2 {
            // idle past any overlap: nothing left to carry over
            self.prev_count = 0;
            self.current_count = 0;
            self.current_window_start = now;
        } else if idle >= self.window_size {
            // boundary-aligned rollover: advancing the start by one whole
            // window keeps the carried bucket's weight proportional to how
            // much of it the sliding interval still covers
            self.prev_count = self.current_count;
            self.current_count = 0;
            self.current_window_start += self.window_size;
        }

        let elapsed = now.duration_since(self.current_window_start);
        let weight = elapsed.as_secs_f64() / self.window_size.as_secs_f64();
        let effective = (self.prev_count as f64) * (1.0 - weight) + (self.current_count as f64);

        if effective < self.limit as f64 {
            self.current_count += 1;
            true
        } else {
            false
        }
    }
}

/// In-memory limiter store keyed by client address. Counters are per-key
/// mutexes inside a DashMap, so concurrent increments on the same key
/// serialize while distinct keys stay independent.
#[derive(Clone)]
pub struct SlidingWindowStore {
    map: Arc<DashMap<String, Arc<Mutex<SlidingWindow>>>>,
    window_size: Duration,
    limit: u64,
}

impl SlidingWindowStore {
    pub fn new(window_size: Duration, limit: u64) -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            window_size,
            limit,
        }
    }

    fn get_window(&self, key: &str) -> Arc<Mutex<SlidingWindow>> {
        if let Some(existing) = self.map.get(key) {
            existing.clone()
        } else {
            let window = Arc::new(Mutex::new(SlidingWindow::new(self.window_size, self.limit)));
            match self.map.entry(key.to_string()) {
                dashmap::mapref::entry::Entry::Occupied(entry) => entry.get().clone(),
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    entry.insert(window.clone());
                    window
                }
            }
        }
    }

    pub fn is_allowed(&self, key: &str) -> bool {
        let window = self.get_window(key);
        let mut w = window.lock();
        w.allow()
    }

    /// Drops keys idle for longer than `ttl`. Call once per store after the
    /// runtime is up.
    pub fn spawn_idle_eviction(&self, ttl: Duration) {
        let map = self.map.clone();
        tokio::spawn(async move {
            let interval = Duration::from_secs(30);
            loop {
                sleep(interval).await;
                let now = Instant::now();
                let stale: Vec<String> = map
                    .iter()
                    .filter_map(|entry| {
                        let w = entry.value().lock();
                        if now.duration_since(w.last_seen) > ttl {
                            Some(entry.key().clone())
                        } else {
                            None
                        }
                    })
                    .collect();

                for key in stale {
                    map.remove(&key);
                }
            }
        });
    }
}
