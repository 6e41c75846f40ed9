pub mod actions;
pub mod config;
pub mod globals;
pub mod telemetry;

mod start;
pub use self::start::start;

mod commands;
mod dispatch;
