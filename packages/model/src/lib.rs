//! # Paperclip Model
//!
//! Persisted and resolved node shapes for reusable UI components, the
//! path-addressed [`Diff`] format recording instance overrides, and the
//! generic [array diff](array_diff) used for ordered fields.
//!
//! Everything here is plain data and serializes to the JSON shapes stored by
//! the document layer (camelCase fields, `type` discriminants, compact
//! `"a" | "r" | "m"` array-diff op codes). Resolved paths are artifacts of a
//! single resolution and never appear in persisted shapes.

pub mod array_diff;
pub mod ast;
pub mod builders;
pub mod diff;
pub mod error;
pub mod id_generator;
pub mod store;

pub use array_diff::{
    apply_array_diff, apply_array_diff_with, compute_array_diff, ArrayDiff, ArrayDiffItem,
    IndexOrKey, RemovalMode,
};
pub use ast::{
    child_path, ClassName, Component, CompositeElement, ElementProp, Node, NodeKind, NodePath,
    PrimitiveElement, ResolvedCompositeElement, ResolvedNode, ResolvedPrimitiveElement,
    ResolvedStringNode, SelectedComponent, StringNode, Variant,
};
pub use diff::{Diff, DiffItem};
pub use error::{ModelError, ModelResult};
pub use id_generator::{get_document_seed, IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use store::{ComponentStore, FindComponent};
