//! Case CLI commands
//!
//! Every command here unlocks the bundle first, with the requested dataset
//! as the primary one.

use crate::display::{
    format_case_details, format_case_table, format_mechanism_breakdown, DetailOptions,
};
use crate::error::ViewerResult;
use crate::models::Dataset;

use super::unlock::{open_session, PasswordSource};
use super::ViewerContext;

/// Check the password and report what it opens
pub fn handle_verify(
    ctx: &ViewerContext,
    dataset: Dataset,
    source: PasswordSource,
) -> ViewerResult<()> {
    let mut session = open_session(ctx.bundle.clone(), dataset, source)?;
    let primary = session.cases(dataset)?.len();

    // A second dataset that fails to open is reported, not fatal
    let other = dataset.other();
    let other_line = if ctx.bundle.has_dataset(other) {
        Some(match session.cases(other) {
            Ok(cases) => format!("  {}: {} cases", other, cases.len()),
            Err(e) => format!("  {}: not opened ({})", other, e),
        })
    } else {
        None
    };

    let config = session.config();
    println!("Password accepted.");
    println!("  {}: {} cases", dataset, primary);
    if let Some(line) = other_line {
        println!("{}", line);
    }
    println!(
        "  Key: {}-bit, PBKDF2-{} x {}",
        config.key_size, config.hasher, config.iterations
    );

    Ok(())
}

/// List decrypted cases as a table
pub fn handle_list(
    ctx: &ViewerContext,
    dataset: Dataset,
    source: PasswordSource,
) -> ViewerResult<()> {
    let mut session = open_session(ctx.bundle.clone(), dataset, source)?;
    let cases = session.cases(dataset)?;

    println!("{} ({} cases)", dataset, cases.len());
    println!("{}", format_case_table(cases));

    Ok(())
}

/// Show one case in detail
pub fn handle_show(
    ctx: &ViewerContext,
    dataset: Dataset,
    source: PasswordSource,
    rank: u32,
    comments: Option<usize>,
) -> ViewerResult<()> {
    let mut session = open_session(ctx.bundle.clone(), dataset, source)?;
    let case = session.case_by_rank(dataset, rank)?;

    let mut options = DetailOptions::from(&ctx.settings);
    if let Some(limit) = comments {
        options.comment_limit = limit;
    }

    print!("{}", format_case_details(case, &options));

    Ok(())
}

/// Count cases per awakening mechanism
pub fn handle_mechanisms(
    ctx: &ViewerContext,
    dataset: Dataset,
    source: PasswordSource,
) -> ViewerResult<()> {
    let mut session = open_session(ctx.bundle.clone(), dataset, source)?;
    let groups = session.mechanism_breakdown(dataset)?;

    println!("{}: awakening mechanisms", dataset);
    println!();
    print!("{}", format_mechanism_breakdown(&groups));

    Ok(())
}
