//! Commands that only read public bundle files

use crate::crypto::params::SUPPORTED_ALGORITHM;
use crate::display::{format_bundle_status, format_overview};
use crate::error::ViewerResult;
use crate::models::Dataset;

use super::ViewerContext;

/// Show the public case overview of a dataset
pub fn handle_overview(ctx: &ViewerContext, dataset: Dataset) -> ViewerResult<()> {
    let summaries = ctx.bundle.load_summaries(dataset)?;
    println!("{}", format_overview(&summaries, dataset));
    Ok(())
}

/// Show resolved paths, settings and bundle contents
pub fn handle_config(ctx: &ViewerContext) -> ViewerResult<()> {
    let settings = &ctx.settings;

    println!("SB Viewer Configuration");
    println!("=======================");
    println!("Config directory: {}", ctx.paths.config_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    println!("Bundle directory: {}", ctx.bundle.root().display());
    println!();
    println!("Settings:");
    println!("  Default dataset:     {}", settings.default_dataset);
    println!("  Chart width:         {}", settings.chart_width);
    println!("  Comment limit:       {}", settings.comment_limit);
    println!("  Body preview chars:  {}", settings.body_preview_chars);
    println!("  Max unlock attempts: {}", settings.max_unlock_attempts);
    println!();
    println!("Bundle files:");
    print!("{}", format_bundle_status(&ctx.bundle.inspect()));
    println!();

    match ctx.bundle.load_config() {
        Ok(config) => {
            println!("Encryption:");
            println!(
                "  {} with a {}-bit key, PBKDF2-{} x {}",
                config.algorithm.as_deref().unwrap_or(SUPPORTED_ALGORITHM),
                config.key_size,
                config.hasher,
                config.iterations
            );
        }
        Err(e) => println!("Encryption: unavailable ({})", e),
    }

    Ok(())
}
