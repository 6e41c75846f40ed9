//! # timing
//!
//! Named, pausable stopwatches grouped under a thread-safe registry.
//!
//! ```
//! use timing::Timers;
//!
//! let timers = Timers::new("example");
//! timers.start(["parse", "total"]);
//! // ... work ...
//! let parse = timers.measure("parse");
//! assert!(timers.elapsed("total") >= parse);
//! ```
//!
//! The free functions ([`start`], [`measure`], ...) operate on a default
//! registry returned by [`get_timers`].

pub mod cli;
pub mod clock;
pub mod global;
pub mod stopwatch;
pub mod timers;

pub use self::clock::{Clock, ManualClock, SystemClock};
pub use self::global::{
    elapsed, elapsed_all, get_timers, measure, measure_all, measure_cumulative, message, pause,
    pause_all, resume, start,
};
pub use self::stopwatch::{State, StopWatch};
pub use self::timers::{format_message, Timers};
