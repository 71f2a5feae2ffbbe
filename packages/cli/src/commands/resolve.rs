use super::{load_store, to_json};
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use paperclip_model::SelectedComponent;
use paperclip_resolver::{collect_paths, instance_root, instantiate_resolved_component};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Component document (JSON)
    pub document: PathBuf,

    /// Id of the component to instantiate
    pub component: String,

    /// Variant to activate
    #[arg(short, long)]
    pub variant: Option<String>,

    /// Print node paths instead of the resolved tree
    #[arg(long)]
    pub paths: bool,
}

pub fn resolve(args: ResolveArgs, config: &Config) -> Result<()> {
    let store = load_store(&args.document)?;

    let mut selection = SelectedComponent::new(args.component.as_str());
    if let Some(variant) = args.variant {
        selection = selection.with_variant(variant);
    }

    let tree = instantiate_resolved_component(&store, &selection)
        .with_context(|| format!("Cannot resolve component {}", args.component))?;
    let root = instance_root(&tree);

    if args.paths {
        for path in collect_paths(root) {
            println!("{}", path.join("/"));
        }
        return Ok(());
    }

    println!("{}", to_json(root, config.pretty)?);
    Ok(())
}
