use crate::{
    clock::{Clock, SystemClock},
    stopwatch::{State, StopWatch},
};
use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tracing::debug;

type Entry = Arc<Mutex<StopWatch>>;

/// A registry of named stopwatches that can be shared between threads.
///
/// Reading or starting a name that does not exist yet creates it, already
/// running. Pausing or resuming an unknown name does nothing.
///
/// The map is guarded by one lock held only for the lookup or insert, and
/// every stopwatch has its own lock. Bulk operations work on a snapshot of
/// the names, so timers registered while they run may be missed.
pub struct Timers {
    label: String,
    clock: Arc<dyn Clock>,
    stop_watches: Mutex<HashMap<String, Entry>>,
}

impl fmt::Debug for Timers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timers")
            .field("label", &self.label)
            .field("clock", &self.clock)
            .field("names", &self.names())
            .finish()
    }
}

impl Timers {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_clock(label, SystemClock)
    }

    /// Creates a registry that reads time from `clock`.
    #[must_use]
    pub fn with_clock(label: impl Into<String>, clock: impl Clock + 'static) -> Self {
        Self {
            label: label.into(),
            clock: Arc::new(clock),
            stop_watches: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Starts every named timer at one shared instant, creating missing ones.
    ///
    /// A timer that is already running restarts its current interval from
    /// that instant; the time it had been running is dropped, not added.
    pub fn start<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let at = self.clock.now();
        for name in names {
            lock(&self.get_or_create(name.as_ref())).start_at(at);
        }
    }

    /// Pauses the timer and returns its total.
    pub fn measure(&self, name: &str) -> Duration {
        let now = self.clock.now();
        let entry = self.get_or_create(name);
        let mut sw = lock(&entry);
        sw.pause_at(now);
        sw.elapsed_at(now)
    }

    /// Pauses every registered timer at one shared instant and returns the totals.
    pub fn measure_all(&self) -> HashMap<String, Duration> {
        let at = self.clock.now();
        self.snapshot()
            .into_iter()
            .map(|(name, entry)| {
                let mut sw = lock(&entry);
                sw.pause_at(at);
                (name, sw.elapsed_at(at))
            })
            .collect()
    }

    /// Returns the total so far, leaving the timer running if it is.
    ///
    /// Consecutive calls on a running timer grow; on a paused timer they
    /// return the same value.
    pub fn measure_cumulative(&self, name: &str) -> Duration {
        self.elapsed(name)
    }

    /// Returns the total so far without pausing.
    pub fn elapsed(&self, name: &str) -> Duration {
        let now = self.clock.now();
        lock(&self.get_or_create(name)).elapsed_at(now)
    }

    /// Totals of every registered timer, without pausing any.
    pub fn elapsed_all(&self) -> HashMap<String, Duration> {
        let now = self.clock.now();
        self.snapshot()
            .into_iter()
            .map(|(name, entry)| {
                let elapsed = lock(&entry).elapsed_at(now);
                (name, elapsed)
            })
            .collect()
    }

    /// Pauses the named timers at one shared instant; unknown names are ignored.
    pub fn pause<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let at = self.clock.now();
        for name in names {
            if let Some(entry) = self.get(name.as_ref()) {
                lock(&entry).pause_at(at);
            }
        }
    }

    pub fn pause_all(&self) {
        let at = self.clock.now();
        for (_, entry) in self.snapshot() {
            lock(&entry).pause_at(at);
        }
    }

    /// Resumes the named timers at one shared instant; unknown names are ignored.
    pub fn resume<I>(&self, names: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let at = self.clock.now();
        for name in names {
            match self.get(name.as_ref()) {
                Some(entry) => lock(&entry).start_at(at),
                None => debug!(
                    label = %self.label,
                    name = name.as_ref(),
                    "resume of unknown timer ignored"
                ),
            }
        }
    }

    /// Measures (and so pauses) the timer, formatted as `"<ms> ms <name>"`.
    pub fn message(&self, name: &str) -> String {
        format_message(name, self.measure(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock_map().keys().cloned().collect();
        names.sort();
        names
    }

    /// Current state of a registered timer, `None` if the name is unknown.
    pub fn state(&self, name: &str) -> Option<State> {
        self.get(name).map(|entry| lock(&entry).state())
    }

    fn lock_map(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.stop_watches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn get(&self, name: &str) -> Option<Entry> {
        self.lock_map().get(name).cloned()
    }

    fn get_or_create(&self, name: &str) -> Entry {
        let mut map = self.lock_map();
        if let Some(entry) = map.get(name) {
            return entry.clone();
        }

        debug!(label = %self.label, name, "creating timer");

        let entry = Arc::new(Mutex::new(StopWatch::new_at(self.clock.now())));
        map.insert(name.to_string(), entry.clone());
        entry
    }

    fn snapshot(&self) -> Vec<(String, Entry)> {
        self.lock_map()
            .iter()
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect()
    }
}

fn lock(entry: &Entry) -> MutexGuard<'_, StopWatch> {
    entry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Formats a duration as milliseconds with three decimals, left aligned in
/// eight columns, followed by the timer name.
#[must_use]
pub fn format_message(name: &str, elapsed: Duration) -> String {
    format!("{:<8.3} ms {}", elapsed.as_secs_f64() * 1e3, name)
}
