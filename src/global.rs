//! Free functions over a process-wide [`Timers`] registry.

use crate::timers::Timers;
use once_cell::sync::Lazy;
use std::{collections::HashMap, time::Duration};

static DEFAULT_TIMERS: Lazy<Timers> = Lazy::new(|| Timers::new("defaultTimers"));

/// Returns the default registry, creating it on first use.
pub fn get_timers() -> &'static Timers {
    &DEFAULT_TIMERS
}

pub fn start<I>(names: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    DEFAULT_TIMERS.start(names);
}

pub fn measure(name: &str) -> Duration {
    DEFAULT_TIMERS.measure(name)
}

pub fn measure_all() -> HashMap<String, Duration> {
    DEFAULT_TIMERS.measure_all()
}

pub fn measure_cumulative(name: &str) -> Duration {
    DEFAULT_TIMERS.measure_cumulative(name)
}

pub fn elapsed(name: &str) -> Duration {
    DEFAULT_TIMERS.elapsed(name)
}

pub fn elapsed_all() -> HashMap<String, Duration> {
    DEFAULT_TIMERS.elapsed_all()
}

pub fn pause<I>(names: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    DEFAULT_TIMERS.pause(names);
}

pub fn pause_all() {
    DEFAULT_TIMERS.pause_all();
}

pub fn resume<I>(names: I)
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    DEFAULT_TIMERS.resume(names);
}

pub fn message(name: &str) -> String {
    DEFAULT_TIMERS.message(name)
}
