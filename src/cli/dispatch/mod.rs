use crate::cli::{
    actions::{Action, Format},
    globals::GlobalArgs,
};
use anyhow::{Context, Result};
use std::{path::PathBuf, str::FromStr};

pub fn handler(matches: &clap::ArgMatches) -> Result<(Action, GlobalArgs)> {
    let config = matches
        .get_one::<PathBuf>("config")
        .context("missing config")?
        .to_path_buf();

    let format = matches
        .get_one::<String>("format")
        .map(|f| Format::from_str(f))
        .transpose()?
        .unwrap_or_default();

    let verbose = matches.get_one::<u8>("verbose").copied().unwrap_or(0);

    Ok((Action::Run { config }, GlobalArgs::new(format, verbose)))
}
