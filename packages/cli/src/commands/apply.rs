use super::{emit_store, load_json, load_store};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use paperclip_editor::apply_selection_diff;
use paperclip_model::SelectedComponent;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Component document (JSON)
    pub document: PathBuf,

    /// Selection carrying the pending diff (JSON)
    pub selection: PathBuf,

    /// Write the updated document back instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

pub fn apply(args: ApplyArgs, config: &Config) -> Result<()> {
    let mut store = load_store(&args.document)?;
    let selection: SelectedComponent = load_json(&args.selection)?;
    let items = selection.diff.as_ref().map_or(0, Vec::len);

    let (component, _) = apply_selection_diff(&store, &selection)
        .with_context(|| format!("Cannot apply diff to {}", selection.component_id))?;

    let target = match &selection.variant_id {
        Some(variant) => format!("{}:{}", component.id, variant),
        None => component.id.clone(),
    };
    store.insert(component);

    emit_store(&store, &args.document, args.write, config.pretty)?;
    eprintln!("{} Applied {} diff items to {}", "✓".green(), items, target.bright_white());
    Ok(())
}
