//! # Node Reducer
//!
//! Single-step edits on a resolved tree, as driven by the canvas.
//!
//! ## Addressing
//!
//! Actions target nodes by index path from the tree root: on a primitive an
//! index selects a child, on a composite the only index is `0`, its root
//! element.
//!
//! ## Semantics
//!
//! - Reducing never mutates the input; a new tree is returned
//! - A target that does not exist or has the wrong type leaves the tree
//!   unchanged
//! - Inserted and duplicated nodes get fresh ids and are resolved under
//!   their new parent; resolving them is the only thing that can fail
//!   (missing component, or an instance dropped inside its own component)

use crate::differ::diff_resolved_trees;
use crate::unresolve::unresolve;
use paperclip_model::{ClassName, FindComponent, IdGenerator, Node, ResolvedNode};
use paperclip_resolver::{find_by_index_path_mut, ResolveResult, Resolver};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Index path into a resolved tree
pub type IndexPath = Vec<usize>;

/// Canvas edit on a resolved tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Rename a node; `None` or `""` clears the name
    SetName {
        path: IndexPath,
        #[serde(default)]
        name: Option<String>,
    },

    /// Add class names to a primitive, skipping values already present
    AddClassNames {
        path: IndexPath,
        #[serde(rename = "classNames")]
        class_names: Vec<String>,
    },

    RemoveClassNames {
        path: IndexPath,
        #[serde(rename = "classNames")]
        class_names: Vec<String>,
    },

    /// Replace the text of a string node whose parent is a primitive
    SetTextValue { path: IndexPath, value: String },

    /// Append `node` to the children of the primitive at `path`
    InsertNode { path: IndexPath, node: Node },

    RemoveNode { path: IndexPath },

    /// Insert a copy of the node right after it
    DuplicateNode { path: IndexPath },
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::SetName { .. } => "setName",
            Action::AddClassNames { .. } => "addClassNames",
            Action::RemoveClassNames { .. } => "removeClassNames",
            Action::SetTextValue { .. } => "setTextValue",
            Action::InsertNode { .. } => "insertNode",
            Action::RemoveNode { .. } => "removeNode",
            Action::DuplicateNode { .. } => "duplicateNode",
        }
    }
}

/// Applies [`Action`]s against a component snapshot
pub struct NodeReducer<'a> {
    components: &'a dyn FindComponent,
    ids: &'a mut dyn IdGenerator,
}

impl<'a> NodeReducer<'a> {
    pub fn new(components: &'a dyn FindComponent, ids: &'a mut dyn IdGenerator) -> Self {
        Self { components, ids }
    }

    pub fn reduce(&mut self, tree: &ResolvedNode, action: &Action) -> ResolveResult<ResolvedNode> {
        let mut next = tree.clone();

        let applied = match action {
            Action::SetName { path, name } => Self::apply_set_name(&mut next, path, name),
            Action::AddClassNames { path, class_names } => {
                self.apply_add_class_names(&mut next, path, class_names)
            }
            Action::RemoveClassNames { path, class_names } => {
                Self::apply_remove_class_names(&mut next, path, class_names)
            }
            Action::SetTextValue { path, value } => {
                Self::apply_set_text_value(&mut next, path, value)
            }
            Action::InsertNode { path, node } => self.apply_insert_node(&mut next, path, node)?,
            Action::RemoveNode { path } => Self::apply_remove_node(&mut next, path),
            Action::DuplicateNode { path } => self.apply_duplicate_node(&mut next, path)?,
        };

        if applied.is_none() {
            debug!(action = action.kind(), "target missing or of the wrong type, tree unchanged");
            return Ok(tree.clone());
        }

        Ok(next)
    }

    fn apply_set_name(
        tree: &mut ResolvedNode,
        path: &[usize],
        name: &Option<String>,
    ) -> Option<()> {
        find_by_index_path_mut(tree, path)?.set_name(name.clone());
        Some(())
    }

    fn apply_add_class_names(
        &mut self,
        tree: &mut ResolvedNode,
        path: &[usize],
        values: &[String],
    ) -> Option<()> {
        let ResolvedNode::Primitive(element) = find_by_index_path_mut(tree, path)? else {
            return None;
        };

        for value in values {
            if !element.class_names.iter().any(|class_name| &class_name.value == value) {
                element
                    .class_names
                    .push(ClassName::new(self.ids.new_id(), value.clone()));
            }
        }
        Some(())
    }

    fn apply_remove_class_names(
        tree: &mut ResolvedNode,
        path: &[usize],
        values: &[String],
    ) -> Option<()> {
        let ResolvedNode::Primitive(element) = find_by_index_path_mut(tree, path)? else {
            return None;
        };

        element
            .class_names
            .retain(|class_name| !values.contains(&class_name.value));
        Some(())
    }

    fn apply_set_text_value(tree: &mut ResolvedNode, path: &[usize], value: &str) -> Option<()> {
        let (index, parent_path) = path.split_last()?;
        let ResolvedNode::Primitive(parent) = find_by_index_path_mut(tree, parent_path)? else {
            return None;
        };
        let ResolvedNode::String(text) = parent.children.get_mut(*index)? else {
            return None;
        };

        text.value = value.to_string();
        Some(())
    }

    fn apply_insert_node(
        &mut self,
        tree: &mut ResolvedNode,
        path: &[usize],
        node: &Node,
    ) -> ResolveResult<Option<()>> {
        let enclosing = enclosing_components(tree, path);
        let Some(ResolvedNode::Primitive(parent)) = find_by_index_path_mut(tree, path) else {
            return Ok(None);
        };

        let node = node.clone_with_fresh_ids(&mut *self.ids);
        let resolved = Resolver::new(self.components)
            .with_component_stack(enclosing)
            .resolve(&node, &parent.path)?;
        parent.children.push(resolved);
        Ok(Some(()))
    }

    fn apply_remove_node(tree: &mut ResolvedNode, path: &[usize]) -> Option<()> {
        let (index, parent_path) = path.split_last()?;
        let ResolvedNode::Primitive(parent) = find_by_index_path_mut(tree, parent_path)? else {
            return None;
        };
        if *index >= parent.children.len() {
            return None;
        }

        parent.children.remove(*index);
        Some(())
    }

    fn apply_duplicate_node(
        &mut self,
        tree: &mut ResolvedNode,
        path: &[usize],
    ) -> ResolveResult<Option<()>> {
        let Some((index, parent_path)) = path.split_last() else {
            return Ok(None);
        };
        let enclosing = enclosing_components(tree, parent_path);
        let Some(ResolvedNode::Primitive(parent)) = find_by_index_path_mut(tree, parent_path) else {
            return Ok(None);
        };
        let Some(original) = parent.children.get(*index) else {
            return Ok(None);
        };

        // Carry over edits made inside instances since the tree was resolved
        let mut resolver = Resolver::new(self.components).with_component_stack(enclosing);
        let authored = resolver.resolve(&unresolve(original, &[]), &parent.path)?;
        let edits = diff_resolved_trees(&authored, original);

        let copy = unresolve(original, &edits).clone_with_fresh_ids(&mut *self.ids);
        let resolved = resolver.resolve(&copy, &parent.path)?;
        parent.children.insert(index + 1, resolved);
        Ok(Some(()))
    }
}

/// Components of the instances enclosing the node at `path`, outermost first
fn enclosing_components(tree: &ResolvedNode, path: &[usize]) -> Vec<String> {
    let mut components = Vec::new();
    let mut node = Some(tree);

    for &index in path {
        let Some(current) = node else {
            break;
        };
        if let ResolvedNode::Composite(instance) = current {
            components.push(instance.component_id.clone());
        }
        node = current.children().into_iter().nth(index);
    }

    components
}

/// Apply one `action` to `tree`, returning the edited tree
pub fn resolved_node_reducer(
    components: &dyn FindComponent,
    ids: &mut dyn IdGenerator,
    tree: &ResolvedNode,
    action: &Action,
) -> ResolveResult<ResolvedNode> {
    NodeReducer::new(components, ids).reduce(tree, action)
}
