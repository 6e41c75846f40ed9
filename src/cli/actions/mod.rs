pub mod report;
pub mod run;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::{env, path::PathBuf, process::Stdio, time::Duration};
use strum::{Display, EnumString};
use tokio::{process::Command, time::timeout};
use tracing::debug;

#[derive(Debug)]
pub enum Action {
    Run { config: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// How a step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    Failed,
    TimedOut,
}

/// Runs `cmd` through the user's shell, optionally bounded by `limit`.
async fn execute_command(cmd: &str, limit: Option<Duration>) -> Result<Outcome> {
    let shell = env::var("SHELL").unwrap_or_else(|_| "sh".to_string());

    let child = Command::new(shell)
        .arg("-c")
        .arg(cmd)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .output();

    let output = match limit {
        Some(limit) => match timeout(limit, child).await {
            Ok(output) => output,
            Err(_) => return Ok(Outcome::TimedOut),
        },
        None => child.await,
    }
    .with_context(|| format!("Failed to execute: {cmd}"))?;

    debug!(
        cmd,
        stdout = %String::from_utf8_lossy(&output.stdout),
        stderr = %String::from_utf8_lossy(&output.stderr)
    );

    let exit_code = match output.status.code() {
        Some(code) => code,
        None => Err(anyhow!("Process terminated by signal"))?,
    };

    Ok(if exit_code == 0 {
        Outcome::Success
    } else {
        Outcome::Failed
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[tokio::test]
    async fn test_execute_command() {
        let outcome = execute_command("exit 0", None).await.unwrap();
        assert_eq!(outcome, Outcome::Success);

        let outcome = execute_command("exit 1", None).await.unwrap();
        assert_eq!(outcome, Outcome::Failed);
    }

    #[tokio::test]
    async fn test_execute_command_timeout() {
        let outcome = execute_command("sleep 5", Some(Duration::from_millis(50)))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::TimedOut);

        let outcome = execute_command("true", Some(Duration::from_secs(5)))
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Success);
    }

    #[test]
    fn test_format() {
        assert_eq!(Format::from_str("json").unwrap(), Format::Json);
        assert_eq!(Format::from_str("text").unwrap(), Format::Text);
        assert!(Format::from_str("xml").is_err());
        assert_eq!(Format::default().to_string(), "text");
        assert_eq!(Outcome::TimedOut.to_string(), "timed_out");
    }
}
