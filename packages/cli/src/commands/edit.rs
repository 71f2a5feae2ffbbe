use super::{emit_store, load_json, load_store};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use paperclip_editor::{Action, Pipeline};
use paperclip_model::{
    ComponentStore, IdGenerator, SelectedComponent, SequentialIdGenerator, UuidGenerator,
};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Component document (JSON)
    pub document: PathBuf,

    /// Id of the component to edit
    pub component: String,

    /// Canvas actions to apply in order (JSON array)
    pub actions: PathBuf,

    /// Record the edits on this variant
    #[arg(short, long)]
    pub variant: Option<String>,

    /// Write the updated document back instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

pub fn edit(args: EditArgs, config: &Config) -> Result<()> {
    let store = load_store(&args.document)?;
    let actions: Vec<Action> = load_json(&args.actions)?;

    let mut selection = SelectedComponent::new(args.component.as_str());
    if let Some(variant) = args.variant {
        selection = selection.with_variant(variant);
    }

    let (store, items) = match &config.id_seed {
        Some(seed) => {
            let existing = document_strings(&store)?;
            let ids =
                SequentialIdGenerator::resume(seed.as_str(), existing.iter().map(String::as_str));
            run_actions(store, selection, ids, &actions)?
        }
        None => run_actions(store, selection, UuidGenerator, &actions)?,
    };

    emit_store(&store, &args.document, args.write, config.pretty)?;
    eprintln!(
        "{} {} actions, {} diff items recorded on {}",
        "✓".green(),
        actions.len(),
        items,
        args.component.bright_white()
    );
    Ok(())
}

/// Dispatch `actions` and commit. Returns the updated store and the number
/// of diff items that were folded in.
fn run_actions<G: IdGenerator>(
    store: ComponentStore,
    selection: SelectedComponent,
    ids: G,
    actions: &[Action],
) -> Result<(ComponentStore, usize)> {
    let component_id = selection.component_id.clone();
    let mut pipeline = Pipeline::new(store, selection, ids)
        .with_context(|| format!("Cannot resolve component {}", component_id))?;

    for action in actions {
        pipeline
            .dispatch(action)
            .with_context(|| format!("Cannot apply {} action", action.kind()))?;
    }

    let items = pipeline.selection().diff.as_ref().map_or(0, Vec::len);
    pipeline.commit()?;
    Ok((pipeline.into_components(), items))
}

/// Every string in the document, which covers all ids already in use
fn document_strings(store: &ComponentStore) -> Result<Vec<String>> {
    fn collect(value: Value, strings: &mut Vec<String>) {
        match value {
            Value::String(string) => strings.push(string),
            Value::Array(items) => items.into_iter().for_each(|item| collect(item, strings)),
            Value::Object(fields) => fields
                .into_iter()
                .for_each(|(_, field)| collect(field, strings)),
            _ => {}
        }
    }

    let components: Vec<_> = store.iter().collect();
    let mut strings = Vec::new();
    collect(serde_json::to_value(components)?, &mut strings);
    Ok(strings)
}
