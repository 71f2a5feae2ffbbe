//! Error types for the editor

use paperclip_resolver::ResolveError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Variant '{variant_id}' not found on component '{component_id}'")]
    VariantNotFound {
        component_id: String,
        variant_id: String,
    },
}
