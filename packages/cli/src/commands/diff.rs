use super::{load_json, to_json};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use paperclip_editor::diff_resolved_trees;
use paperclip_model::ResolvedNode;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Resolved tree before the edit (JSON)
    pub before: PathBuf,

    /// Resolved tree after the edit (JSON)
    pub after: PathBuf,
}

pub fn diff(args: DiffArgs, config: &Config) -> Result<()> {
    let before: ResolvedNode = load_json(&args.before)?;
    let after: ResolvedNode = load_json(&args.after)?;

    let diff = diff_resolved_trees(&before, &after);
    if diff.is_empty() {
        eprintln!("{}", "No changes".yellow());
    } else {
        eprintln!("{} {} diff items", "✓".green(), diff.len());
    }

    println!("{}", to_json(&diff, config.pretty)?);
    Ok(())
}
