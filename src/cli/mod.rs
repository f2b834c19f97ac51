//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the bundle and session layers.

pub mod cases;
pub mod info;
pub mod unlock;

use std::path::Path;

use clap::{Args, Subcommand};

use crate::bundle::Bundle;
use crate::config::{resolve_bundle_dir, Settings, ViewerPaths};
use crate::error::ViewerResult;
use crate::models::Dataset;

pub use cases::{handle_list, handle_mechanisms, handle_show, handle_verify};
pub use info::{handle_config, handle_overview};
pub use unlock::{open_session, unlock_interactive, PasswordSource};

/// Dataset selection shared by every data command
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DatasetArgs {
    /// Use the hourly-deduplicated dataset
    #[arg(long, conflicts_with = "daily")]
    pub hourly: bool,

    /// Use the daily-views dataset
    #[arg(long)]
    pub daily: bool,
}

impl DatasetArgs {
    /// The dataset picked by the flags, or the configured default
    pub fn resolve(&self, default: Dataset) -> Dataset {
        if self.hourly {
            Dataset::Hourly
        } else if self.daily {
            Dataset::Daily
        } else {
            default
        }
    }
}

/// Viewer subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the public case overview (no password needed)
    Overview {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Check the password against the bundle
    Verify {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// List decrypted cases
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Show one case in detail
    Show {
        /// Case rank (1-based)
        rank: u32,

        #[command(flatten)]
        dataset: DatasetArgs,

        /// Number of comments to show
        #[arg(short, long)]
        comments: Option<usize>,
    },

    /// Count cases per awakening mechanism
    Mechanisms {
        #[command(flatten)]
        dataset: DatasetArgs,
    },

    /// Show current configuration and paths
    Config,
}

/// Resolved paths, settings and bundle for one run
#[derive(Debug, Clone)]
pub struct ViewerContext {
    pub paths: ViewerPaths,
    pub settings: Settings,
    pub bundle: Bundle,
}

impl ViewerContext {
    /// Load settings and pick the bundle directory
    pub fn load(bundle_flag: Option<&Path>) -> ViewerResult<Self> {
        let paths = ViewerPaths::new()?;
        Self::with_paths(paths, bundle_flag)
    }

    pub fn with_paths(paths: ViewerPaths, bundle_flag: Option<&Path>) -> ViewerResult<Self> {
        let settings = Settings::load_or_default(&paths)?;
        let bundle_dir = resolve_bundle_dir(bundle_flag, settings.bundle_dir.as_deref());
        Ok(Self {
            paths,
            settings,
            bundle: Bundle::new(bundle_dir),
        })
    }

    fn password_source(&self, password: Option<String>) -> PasswordSource {
        PasswordSource::new(password, self.settings.max_unlock_attempts)
    }
}

/// Dispatch a subcommand
pub fn handle_command(
    ctx: &ViewerContext,
    command: Commands,
    password: Option<String>,
) -> ViewerResult<()> {
    let default = ctx.settings.default_dataset;

    match command {
        Commands::Overview { dataset } => handle_overview(ctx, dataset.resolve(default)),
        Commands::Verify { dataset } => {
            handle_verify(ctx, dataset.resolve(default), ctx.password_source(password))
        }
        Commands::List { dataset } => {
            handle_list(ctx, dataset.resolve(default), ctx.password_source(password))
        }
        Commands::Show {
            rank,
            dataset,
            comments,
        } => handle_show(
            ctx,
            dataset.resolve(default),
            ctx.password_source(password),
            rank,
            comments,
        ),
        Commands::Mechanisms { dataset } => {
            handle_mechanisms(ctx, dataset.resolve(default), ctx.password_source(password))
        }
        Commands::Config => handle_config(ctx),
    }
}
