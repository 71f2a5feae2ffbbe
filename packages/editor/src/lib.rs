//! # Paperclip Editor
//!
//! Edit engine for reusable components: canvas edits on resolved trees are
//! turned into diffs and folded back into the persisted components.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ resolver: Component → resolved tree         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - reducer: canvas actions on the tree      │
//! │  - differ: edited tree vs. persisted tree   │
//! │  - unresolve: lower trees, fold diffs into  │
//! │    nested instances                         │
//! │  - pipeline: commit to component / variant  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: updated Component or Variant         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Components are the source of truth**: resolved trees are derived views
//! 2. **Edits stay local**: an edit inside a nested instance is recorded on
//!    that instance's diff, never flattened into the enclosing component
//! 3. **Pure steps**: every operation maps inputs to outputs; the component
//!    lookup is only read
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paperclip_editor::{Action, Pipeline};
//! use paperclip_model::{SelectedComponent, SequentialIdGenerator};
//!
//! let selection = SelectedComponent::new("Card");
//! let mut pipeline = Pipeline::new(store, selection, SequentialIdGenerator::new("card"))?;
//!
//! pipeline.dispatch(&Action::AddClassNames {
//!     path: vec![0, 1, 0],
//!     class_names: vec!["foo".to_string()],
//! })?;
//!
//! let card = pipeline.commit()?;
//! ```

mod differ;
mod errors;
mod pipeline;
mod reducer;
mod unresolve;

pub use differ::diff_resolved_trees;
pub use errors::{EditorError, EditorResult};
pub use pipeline::{apply_diff, apply_selection_diff, create_selection_with_diff, Pipeline};
pub use reducer::{resolved_node_reducer, Action, IndexPath, NodeReducer};
pub use unresolve::unresolve;
