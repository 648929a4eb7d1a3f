pub mod init;
pub mod log;
pub mod push;
pub mod report;

use crate::libs::{config::Config, data_storage::DataStorage, store::RecordStore};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Add a Jira work log entry to the data file", arg_required_else_help = true)]
    Log(log::LogArgs),
    #[command(about = "Display a summarized report of the data file")]
    Report(report::ReportArgs),
    #[command(about = "Push unpushed entries to the Jira server as worklogs")]
    Push(push::PushArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Config file (default is config.json in the application directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file (default is data/<Mon-YYYY>.csv in the application directory)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
}

impl GlobalArgs {
    /// Reads the configuration and the data file the command works on.
    /// A data file that does not exist yet is created with just the header.
    pub fn load(&self) -> Result<(Config, RecordStore)> {
        let config = Config::read(self.config.as_deref())?;
        let path = DataStorage::new().data_file(self.data.as_deref())?;
        if !path.exists() {
            RecordStore::new(&path).write()?;
        }
        let store = RecordStore::read(&path)?;
        store.warn_invalid(&config.project_key_pattern, &config.time_format());
        Ok((config, store))
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args, &cli.global),
            Commands::Log(args) => log::cmd(args, &cli.global),
            Commands::Report(args) => report::cmd(args, &cli.global),
            Commands::Push(args) => push::cmd(args, &cli.global).await,
        }
    }
}
