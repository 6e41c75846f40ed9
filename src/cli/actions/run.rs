use crate::{
    cli::{
        actions::{execute_command, report::Report, Action, Outcome},
        config::Config,
        globals::GlobalArgs,
    },
    timers::Timers,
};
use anyhow::{anyhow, Result};
use tracing::{error, info, instrument};

/// Handle the run action
#[instrument(skip(action, globals))]
pub async fn handle(action: Action, globals: GlobalArgs) -> Result<()> {
    let Action::Run { config } = action;

    let config = Config::new(config)?;

    let timers = Timers::new(config.label());

    let report = run_steps(&config, &timers).await;

    println!("{}", report.render(globals.format, &timers)?);

    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(anyhow!(
            "{} step(s) failed: {}",
            report.failed.len(),
            report.failed.join(", ")
        ))
    }
}

/// Runs every step in order, timing each under its own name.
pub async fn run_steps(config: &Config, timers: &Timers) -> Report {
    if let Some(total) = &config.total {
        timers.start([total]);
    }

    let mut outcomes = Vec::with_capacity(config.steps.len());

    for step in &config.steps {
        let names = step.timer_names();

        timers.start(&names);

        let outcome = match execute_command(&step.cmd, step.timeout).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Error running step '{}': {}", step.name, e);
                Outcome::Failed
            }
        };

        timers.pause(&names);

        info!(
            label = timers.label(),
            step = step.name,
            cmd = step.cmd,
            outcome = %outcome,
            elapsed_ms = timers.elapsed(&step.name).as_secs_f64() * 1e3
        );

        outcomes.push((step.name.clone(), outcome));
    }

    Report::new(config, timers.measure_all(), outcomes)
}
