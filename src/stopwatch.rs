use std::time::{Duration, Instant};
use strum::{Display, EnumString};

/// Observable phase of a [`StopWatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum State {
    /// Not running and nothing accumulated, which includes a watch paused
    /// before any time passed.
    Unstarted,
    Running,
    /// Frozen by `stop`, still holding its start instant.
    Stopped,
    Paused,
}

/// A timer that accumulates time across start/pause cycles.
///
/// `pause` is the only transition that folds the current interval into the
/// accumulated total. `stop` just freezes the reading so it can be read
/// repeatedly, and a later `start` throws the frozen interval away.
#[derive(Debug, Clone, Default)]
pub struct StopWatch {
    start: Option<Instant>,
    end: Option<Instant>,
    elapsed: Duration,
}

impl StopWatch {
    /// Creates a stopwatch, running from now when `auto_start` is set.
    #[must_use]
    pub fn new(auto_start: bool) -> Self {
        if auto_start {
            Self::new_at(Instant::now())
        } else {
            Self::default()
        }
    }

    /// Creates a stopwatch already running since `at`.
    #[must_use]
    pub fn new_at(at: Instant) -> Self {
        Self {
            start: Some(at),
            ..Self::default()
        }
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Starts (or resumes) measuring from `at`, keeping the accumulated total.
    ///
    /// Calling this on a watch that is already running discards the interval
    /// in flight instead of adding it to the total. Call [`pause_at`] first to
    /// keep it.
    ///
    /// [`pause_at`]: StopWatch::pause_at
    pub fn start_at(&mut self, at: Instant) {
        self.start = Some(at);
        self.end = None;
    }

    pub fn restart(&mut self) {
        self.restart_at(Instant::now());
    }

    /// Like [`start_at`](StopWatch::start_at) but also resets the total to zero.
    pub fn restart_at(&mut self, at: Instant) {
        self.start_at(at);
        self.elapsed = Duration::ZERO;
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    /// Adds the current interval to the total and stops running.
    ///
    /// The interval ends at the stop instant if the watch was stopped, else at
    /// `at`. No-op when not running.
    pub fn pause_at(&mut self, at: Instant) {
        let Some(start) = self.start.take() else {
            return;
        };

        let end = self.end.take().unwrap_or(at);
        self.elapsed += end.saturating_duration_since(start);
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    /// Freezes the reading at `at` without committing the interval.
    pub fn stop_at(&mut self, at: Instant) {
        self.end = Some(at);
    }

    /// Total measured time, including the running interval if any.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    /// Same as [`elapsed`](StopWatch::elapsed) with `now` standing in for the
    /// current instant.
    #[must_use]
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        match (self.start, self.end) {
            (None, _) => self.elapsed,
            (Some(start), Some(end)) => self.elapsed + end.saturating_duration_since(start),
            (Some(start), None) => self.elapsed + now.saturating_duration_since(start),
        }
    }

    #[must_use]
    pub fn state(&self) -> State {
        match (self.start, self.end) {
            (Some(_), None) => State::Running,
            (Some(_), Some(_)) => State::Stopped,
            (None, _) if self.elapsed.is_zero() => State::Unstarted,
            (None, _) => State::Paused,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state() == State::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{str::FromStr, thread::sleep};

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_elapsed() {
        let sw = StopWatch::new(true);
        sleep(2 * MS);
        assert!(sw.elapsed() >= 2 * MS);
        assert!(sw.is_running());
    }

    #[test]
    fn test_start() {
        let mut sw = StopWatch::new(false);
        assert_eq!(sw.state(), State::Unstarted);

        sleep(2 * MS);
        assert_eq!(sw.elapsed(), Duration::ZERO);

        sw.start();
        sleep(2 * MS);
        assert!(sw.elapsed() >= 2 * MS);
    }

    #[test]
    fn test_pause() {
        let mut sw = StopWatch::new(true);
        sleep(2 * MS);
        sw.pause();
        assert_eq!(sw.state(), State::Paused);

        let elapsed1 = sw.elapsed();
        sleep(2 * MS);
        let elapsed2 = sw.elapsed();

        assert!(elapsed1 >= 2 * MS);
        assert_eq!(elapsed1, elapsed2);
    }

    #[test]
    fn test_pause_when_not_running() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new(false);
        sw.pause_at(t0 + 5 * MS);
        assert_eq!(sw.elapsed(), Duration::ZERO);
        assert_eq!(sw.state(), State::Unstarted);

        sw.start_at(t0);
        sw.pause_at(t0 + 3 * MS);
        sw.pause_at(t0 + 9 * MS);
        assert_eq!(sw.elapsed(), 3 * MS);
    }

    #[test]
    fn test_stop() {
        let mut sw = StopWatch::new(true);
        sleep(2 * MS);
        sw.stop();
        assert_eq!(sw.state(), State::Stopped);

        let elapsed1 = sw.elapsed();
        sleep(2 * MS);
        let elapsed2 = sw.elapsed();

        assert_eq!(elapsed1, elapsed2);
    }

    #[test]
    fn test_stop_at_freezes_reading() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new_at(t0);
        sw.stop_at(t0 + 7 * MS);

        assert_eq!(sw.elapsed(), 7 * MS);
        assert_eq!(sw.elapsed_at(t0 + 100 * MS), 7 * MS);
    }

    #[test]
    fn test_pause_after_stop_commits_frozen_interval() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new_at(t0);
        sw.stop_at(t0 + 4 * MS);
        sw.pause_at(t0 + 50 * MS);

        assert_eq!(sw.state(), State::Paused);
        assert_eq!(sw.elapsed(), 4 * MS);
    }

    #[test]
    fn test_start_after_stop_discards_frozen_interval() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new_at(t0);
        sw.stop_at(t0 + 4 * MS);
        sw.start_at(t0 + 10 * MS);

        assert_eq!(sw.state(), State::Running);
        assert_eq!(sw.elapsed_at(t0 + 12 * MS), 2 * MS);
    }

    #[test]
    fn test_start_while_running_discards_interval() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new_at(t0);
        sw.start_at(t0 + 10 * MS);

        assert_eq!(sw.elapsed_at(t0 + 11 * MS), MS);
    }

    #[test]
    fn test_resume_accumulates() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new_at(t0);
        sw.pause_at(t0 + 3 * MS);
        sw.start_at(t0 + 10 * MS);
        sw.pause_at(t0 + 12 * MS);

        assert_eq!(sw.elapsed(), 5 * MS);
    }

    #[test]
    fn test_restart() {
        let mut sw = StopWatch::new(true);
        sleep(2 * MS);
        let elapsed1 = sw.elapsed();

        sw.restart();
        let elapsed2 = sw.elapsed();

        assert!(elapsed1 > elapsed2);
    }

    #[test]
    fn test_restart_at_resets_total() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new_at(t0);
        sw.pause_at(t0 + 8 * MS);
        sw.restart_at(t0 + 20 * MS);

        assert_eq!(sw.elapsed_at(t0 + 21 * MS), MS);
    }

    #[test]
    fn test_pause_at_between_sleeps() {
        let mut early = StopWatch::new(true);
        let mut injected = early.clone();
        let mut late = early.clone();

        sleep(2 * MS);
        early.pause();
        sleep(MS);
        let at = Instant::now();
        sleep(2 * MS);

        injected.pause_at(at);
        late.pause();

        assert!(early.elapsed() < injected.elapsed());
        assert!(injected.elapsed() < late.elapsed());
    }

    #[test]
    fn test_instant_before_start_saturates() {
        let t0 = Instant::now();
        let mut sw = StopWatch::new_at(t0 + 5 * MS);

        assert_eq!(sw.elapsed_at(t0), Duration::ZERO);

        sw.pause_at(t0);
        assert_eq!(sw.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(State::Unstarted.to_string(), "unstarted");
        assert_eq!(State::Stopped.to_string(), "stopped");
        assert_eq!(State::from_str("paused").unwrap(), State::Paused);
    }
}
