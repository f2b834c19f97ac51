use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sbviewer::cli::{handle_command, Commands, ViewerContext};

#[derive(Parser)]
#[command(
    name = "sbviewer",
    version,
    about = "Password-gated viewer for Sleeping Beauty case-study bundles",
    long_about = "sbviewer opens an encrypted bundle of forum case studies \
                  (posts that lay dormant and later woke up), decrypts it with \
                  a shared password and renders the cases in the terminal."
)]
struct Cli {
    /// Bundle directory
    #[arg(long, global = true, env = "SB_VIEWER_BUNDLE", value_name = "DIR")]
    bundle: Option<PathBuf>,

    /// Password (prompted with hidden input when omitted)
    #[arg(long, global = true, env = "SB_VIEWER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_tracing(verbose: u8, log_json: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let ctx = ViewerContext::load(cli.bundle.as_deref())?;

    match cli.command {
        Some(command) => handle_command(&ctx, command, cli.password)?,
        None => {
            println!("SB Viewer - Sleeping Beauty case-study viewer");
            println!();
            println!("Run 'sbviewer --help' for usage information.");
            println!("Run 'sbviewer overview' to see the public case list.");
        }
    }

    Ok(())
}
