use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::{collections::HashSet, fs::File, path::PathBuf, time::Duration};

pub const DEFAULT_LABEL: &str = "timing";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub label: Option<String>,
    /// Timer spanning the whole run
    pub total: Option<String>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Step {
    pub name: String,
    pub cmd: String,
    #[serde(default, deserialize_with = "parse_timeout")]
    pub timeout: Option<Duration>,
    /// Extra timers that run alongside this step
    #[serde(default)]
    pub also: Vec<String>,
}

impl Step {
    /// The step timer followed by its extra timers.
    pub fn timer_names(&self) -> Vec<&str> {
        std::iter::once(self.name.as_str())
            .chain(self.also.iter().map(String::as_str))
            .collect()
    }
}

impl Config {
    pub fn new(config_path: PathBuf) -> Result<Self> {
        let file = File::open(&config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path.display()))?;

        let config: Self = serde_yaml::from_reader(file).context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    fn validate(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(anyhow!("No steps defined"));
        }

        let mut seen = HashSet::new();

        for step in &self.steps {
            if step.name.trim().is_empty() {
                return Err(anyhow!("Step name cannot be empty"));
            }

            if !seen.insert(step.name.as_str()) {
                return Err(anyhow!("Duplicate step name: {}", step.name));
            }

            if self.total.as_deref() == Some(step.name.as_str()) {
                return Err(anyhow!(
                    "Step {} has the same name as the total timer",
                    step.name
                ));
            }

            // starting a running timer drops its interval, so a step must not
            // restart the total timer or itself
            for extra in &step.also {
                if extra == &step.name || self.total.as_ref() == Some(extra) {
                    return Err(anyhow!(
                        "Step {} cannot list {} in `also`",
                        step.name,
                        extra
                    ));
                }
            }
        }

        Ok(())
    }
}

fn parse_timeout<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration_str(&s)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Converts a string like "500ms", "5s", "3m", "1h", "2d" into `Duration`.
fn parse_duration_str(input: &str) -> Result<Duration> {
    let input = input.trim();

    if let Some(value) = input.strip_suffix("ms") {
        let value: u64 = value
            .parse()
            .map_err(|_| anyhow!("Invalid number in duration: {}", input))?;
        return Ok(Duration::from_millis(value));
    }

    let unit_at = input
        .char_indices()
        .last()
        .map(|(i, _)| i)
        .ok_or_else(|| anyhow!("Empty duration"))?;

    let (value, unit) = input.split_at(unit_at);
    let value: u64 = value
        .parse()
        .map_err(|_| anyhow!("Invalid number in duration: {}", input))?;

    let seconds_per_unit: u64 = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        "d" => 60 * 60 * 24,
        _ => return Err(anyhow!("Invalid duration unit: {}", unit)),
    };

    value
        .checked_mul(seconds_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| anyhow!("Duration too large: {}", input))
}
