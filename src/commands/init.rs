//! Interactive configuration setup.

use super::GlobalArgs;
use crate::{
    libs::{config::Config, messages::Message},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write the default configuration without asking anything
    #[arg(long)]
    defaults: bool,
}

pub fn cmd(init_args: InitArgs, global: &GlobalArgs) -> Result<()> {
    let path = global.config.as_deref();
    let config = match init_args.defaults {
        true => Config::default(),
        false => Config::init(path)?,
    };
    config.save(path)?;

    msg_success!(Message::ConfigSaved(Config::file_path(path)?.display().to_string()));
    Ok(())
}
