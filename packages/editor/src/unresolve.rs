//! # Diff Collapser
//!
//! Lowers a resolved tree back to its persisted shape, folding diff items
//! that land inside composite instances into those instances' diffs.
//!
//! A resolved composite is already the product of its component, variants
//! and instance diff, so it is lowered to the instance alone: its own fields
//! are read from the resolved node and its expanded `root_element` is
//! dropped. Edits targeting nodes inside it cannot be stored anywhere else,
//! so they are re-addressed relative to the composite and appended to its
//! diff. Re-resolving the lowered instance then reproduces the edit.

use paperclip_model::{CompositeElement, DiffItem, Node, PrimitiveElement, ResolvedNode, StringNode};

/// Lower `node` to an unresolved tree, collapsing `diff` into the composite
/// instances it reaches into. `diff` paths use the same root as `node`'s
/// resolution paths.
pub fn unresolve(node: &ResolvedNode, diff: &[DiffItem]) -> Node {
    let replacement = diff
        .iter()
        .rev()
        .filter(|item| item.path == node.path())
        .find_map(|item| item.new_root_node.as_deref());
    if let Some(replacement) = replacement {
        return replacement.clone();
    }

    let inner: Vec<&DiffItem> = diff
        .iter()
        .filter(|item| item.is_below(node.path()))
        .collect();

    match node {
        ResolvedNode::String(text) => Node::String(StringNode {
            id: text.id.clone(),
            name: text.name.clone(),
            value: text.value.clone(),
        }),
        ResolvedNode::Primitive(element) => {
            let inner: Vec<DiffItem> = inner.into_iter().cloned().collect();
            Node::Primitive(PrimitiveElement {
                id: element.id.clone(),
                name: element.name.clone(),
                component_id: element.component_id.clone(),
                class_names: element.class_names.clone(),
                props: element.props.clone(),
                children: element
                    .children
                    .iter()
                    .map(|child| unresolve(child, &inner))
                    .collect(),
            })
        }
        ResolvedNode::Composite(instance) => {
            let depth = instance.path.len();
            let mut instance_diff = instance.diff.clone();
            instance_diff.extend(inner.into_iter().map(|item| item.relativize(depth)));

            Node::Composite(CompositeElement {
                id: instance.id.clone(),
                name: instance.name.clone(),
                component_id: instance.component_id.clone(),
                variant_names: instance.variant_names.clone(),
                diff: instance_diff,
            })
        }
    }
}
