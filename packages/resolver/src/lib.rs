//! # Paperclip Resolver
//!
//! Expands persisted component trees into resolved trees.
//!
//! ## Determinism
//!
//! Resolution is a pure function of the node, the component snapshot and the
//! parent path: same inputs, same tree, same paths. The component lookup is
//! only read, so sibling instances of one component can be resolved
//! independently.
//!
//! ## Recursion Protection
//!
//! Components may reference each other by id, so nothing prevents a cycle in
//! the stored data. The resolver tracks the chain of component ids on the
//! active call stack and fails with [`ResolveError::RecursiveComponent`]
//! instead of recursing forever.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paperclip_model::{ComponentStore, SelectedComponent};
//! use paperclip_resolver::instantiate_resolved_component;
//!
//! let store = ComponentStore::from_json(&json)?;
//! let tree = instantiate_resolved_component(&store, &SelectedComponent::new("Card"))?;
//! ```

mod patch;
pub mod resolver;
pub mod visitor;

pub use resolver::{
    create_resolved_node, instance_root, instantiate_resolved_component, ResolveError,
    ResolveResult, Resolver, SYNTHETIC_ROOT_ID,
};
pub use visitor::{
    collect_paths, find_by_index_path, find_by_index_path_mut, find_node, find_node_mut, Visitor,
    VisitorMut,
};
