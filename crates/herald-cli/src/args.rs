//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use herald_core::config::{DEFAULT_CONFIG_FILE, LoadFailurePolicy, Settings, SettingsLoader};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Herald - slash command registration and dispatch for chat bots")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (skipped if missing)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Dotenv file to load instead of searching for `.env`
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Override the commands directory
    #[arg(long, global = true)]
    pub commands_dir: Option<PathBuf>,

    /// Override the events directory
    #[arg(long, global = true)]
    pub events_dir: Option<PathBuf>,

    /// Skip handler files that fail to load instead of aborting
    #[arg(long, global = true)]
    pub skip_broken: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot, reading gateway events from stdin (default)
    Run,

    /// Synchronize the command catalog and exit
    Sync,

    /// List the commands that would be registered
    Commands,

    /// Dispatch gateway events recorded in a JSON lines file
    Replay {
        /// File with one gateway event per line
        file: PathBuf,

        /// Print replies instead of sending them; no catalog update
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    /// Settings loader for the configured files
    pub fn loader(&self) -> SettingsLoader {
        let loader = SettingsLoader::new().with_config_file(&self.config);
        match &self.env_file {
            Some(path) => loader.with_dotenv_file(path),
            None => loader,
        }
    }

    /// Apply command-line overrides on top of loaded settings
    pub fn apply_overrides(&self, mut settings: Settings) -> Settings {
        if let Some(dir) = &self.commands_dir {
            settings.paths.commands = dir.clone();
        }
        if let Some(dir) = &self.events_dir {
            settings.paths.events = dir.clone();
        }
        if self.skip_broken {
            settings.discovery.load_policy = LoadFailurePolicy::Skip;
        }
        settings
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}
