use crate::cli::{actions::Action, commands, dispatch::handler, globals::GlobalArgs, telemetry};
use anyhow::Result;

/// Start the CLI
pub fn start() -> Result<(Action, GlobalArgs)> {
    let matches = commands::new().get_matches();

    let (action, global_args) = handler(&matches)?;

    telemetry::init(global_args.verbosity)?;

    Ok((action, global_args))
}
