//! # Tree Differ
//!
//! Compares two resolved trees sharing a logical root and records the edits
//! between them as a [`Diff`] addressed by resolution path.
//!
//! Ordered fields are diffed with key-mode array diffs so the result stays
//! valid when replayed over a tree whose indices have shifted:
//!
//! - class names match by value
//! - props match by their serialized form, so any change is a remove + add
//! - children and variant names match by id
//!
//! Children present on both sides are compared recursively, and a composite
//! is always compared through its root element. A node whose id or kind
//! changed is replaced wholesale with a `newRootNode` item.

use crate::unresolve::unresolve;
use paperclip_model::{
    compute_array_diff, ArrayDiff, ClassName, Diff, DiffItem, ElementProp, RemovalMode,
    ResolvedNode,
};

/// Diff `a` against `b`. Item paths are `a`'s resolution paths.
pub fn diff_resolved_trees(a: &ResolvedNode, b: &ResolvedNode) -> Diff {
    let mut diff = Vec::new();
    diff_node(a, b, &mut diff);
    diff
}

fn diff_node(a: &ResolvedNode, b: &ResolvedNode, diff: &mut Diff) {
    if a.id() != b.id() || a.kind() != b.kind() {
        diff.push(DiffItem::replace(a.path().to_vec(), unresolve(b, &[])));
        return;
    }

    let mut item = DiffItem::new(a.path().to_vec());

    if a.name() != b.name() {
        item.name = Some(b.name().unwrap_or_default().to_string());
    }

    match (a, b) {
        (ResolvedNode::String(a), ResolvedNode::String(b)) => {
            if a.value != b.value {
                item.text_value = Some(b.value.clone());
            }
        }
        (ResolvedNode::Primitive(a), ResolvedNode::Primitive(b)) => {
            if a.component_id != b.component_id {
                item.component_id = Some(b.component_id.clone());
            }
            item.class_names = non_empty(compute_array_diff(
                &a.class_names,
                &b.class_names,
                ClassName::key,
                RemovalMode::Key,
            ));
            item.props = non_empty(compute_array_diff(
                &a.props,
                &b.props,
                ElementProp::key,
                RemovalMode::Key,
            ));
            item.children = non_empty(
                compute_array_diff(&a.children, &b.children, node_key, RemovalMode::Key)
                    .into_iter()
                    .map(|op| op.map_item(|child| unresolve(&child, &[])))
                    .collect(),
            );
        }
        (ResolvedNode::Composite(a), ResolvedNode::Composite(b)) => {
            item.variant_names = non_empty(compute_array_diff(
                &a.variant_names,
                &b.variant_names,
                String::clone,
                RemovalMode::Key,
            ));
        }
        _ => {}
    }

    if !item.is_empty() {
        diff.push(item);
    }

    match (a, b) {
        (ResolvedNode::Primitive(a), ResolvedNode::Primitive(b)) => {
            for old_child in &a.children {
                if let Some(new_child) = b
                    .children
                    .iter()
                    .find(|child| child.id() == old_child.id())
                {
                    diff_node(old_child, new_child, diff);
                }
            }
        }
        (ResolvedNode::Composite(a), ResolvedNode::Composite(b)) => {
            diff_node(&a.root_element, &b.root_element, diff);
        }
        _ => {}
    }
}

fn node_key(node: &ResolvedNode) -> String {
    node.id().to_string()
}

fn non_empty<T>(ops: ArrayDiff<T>) -> Option<ArrayDiff<T>> {
    (!ops.is_empty()).then_some(ops)
}
