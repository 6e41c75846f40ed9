use crate::{
    cli::{
        actions::{Format, Outcome},
        config::Config,
    },
    timers::{format_message, Timers},
};
use anyhow::Result;
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap},
    time::Duration,
};

/// Result of a run, serialized as-is for `--format json`.
#[derive(Debug, Serialize)]
pub struct Report {
    pub label: String,
    /// Milliseconds per timer
    pub timers: BTreeMap<String, f64>,
    pub outcomes: BTreeMap<String, Outcome>,
    pub failed: Vec<String>,
    #[serde(skip)]
    steps: Vec<String>,
}

impl Report {
    pub fn new(
        config: &Config,
        measured: HashMap<String, Duration>,
        outcomes: Vec<(String, Outcome)>,
    ) -> Self {
        let failed = outcomes
            .iter()
            .filter(|(_, outcome)| *outcome != Outcome::Success)
            .map(|(name, _)| name.clone())
            .collect();

        Self {
            label: config.label().to_string(),
            timers: measured
                .into_iter()
                .map(|(name, elapsed)| (name, elapsed.as_secs_f64() * 1e3))
                .collect(),
            steps: outcomes.iter().map(|(name, _)| name.clone()).collect(),
            outcomes: outcomes.into_iter().collect(),
            failed,
        }
    }

    /// Text output lists the steps in run order, then the remaining timers by name.
    pub fn render(&self, format: Format, timers: &Timers) -> Result<String> {
        match format {
            Format::Json => Ok(serde_json::to_string_pretty(self)?),
            Format::Text => {
                let mut lines: Vec<String> = self
                    .steps
                    .iter()
                    .map(|name| timers.message(name))
                    .collect();

                // every timer is paused by now, so reading does not move them
                for name in self.timers.keys() {
                    if !self.outcomes.contains_key(name) {
                        lines.push(format_message(name, timers.elapsed(name)));
                    }
                }

                Ok(lines.join("\n"))
            }
        }
    }
}
