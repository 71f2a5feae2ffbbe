pub mod apply;
pub mod diff;
pub mod edit;
pub mod resolve;

pub use apply::{apply, ApplyArgs};
pub use diff::{diff, DiffArgs};
pub use edit::{edit, EditArgs};
pub use resolve::{resolve, ResolveArgs};

use anyhow::{Context, Result};
use paperclip_model::ComponentStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a component document
pub(crate) fn load_store(path: &Path) -> Result<ComponentStore> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    ComponentStore::from_json(&content)
        .with_context(|| format!("Invalid document {}", path.display()))
}

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Print the store, or write it back to `path` when `write` is set
pub(crate) fn emit_store(
    store: &ComponentStore,
    path: &Path,
    write: bool,
    pretty: bool,
) -> Result<()> {
    let json = store.to_json(pretty)?;
    if write {
        fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;
    } else {
        println!("{}", json);
    }
    Ok(())
}
