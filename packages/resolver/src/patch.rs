//! Diff application on resolved trees

use crate::resolver::{ResolveResult, Resolver};
use crate::visitor::find_node_mut;
use paperclip_model::{
    apply_array_diff, apply_array_diff_with, ClassName, DiffItem, ElementProp, ResolvedNode,
};
use tracing::debug;

impl Resolver<'_> {
    /// Apply `diff` to the subtree `root`, addressing each item at
    /// `base_path ++ item.path`. Items apply in order; unresolvable items are
    /// skipped. Nodes introduced by `children` or `newRootNode` are resolved
    /// in place, so a missing component is still fatal.
    pub fn apply_diff(
        &mut self,
        mut root: ResolvedNode,
        diff: &[DiffItem],
        base_path: &[String],
    ) -> ResolveResult<ResolvedNode> {
        for item in diff {
            let target = [base_path, item.path.as_slice()].concat();

            let Some(node) = find_node_mut(&mut root, &target) else {
                debug!(path = %target.join("/"), "diff item does not resolve, skipping");
                continue;
            };

            if let Some(replacement) = &item.new_root_node {
                let parent_path = &target[..target.len().saturating_sub(1)];
                *node = self.resolve(replacement, parent_path)?;
                continue;
            }

            self.patch_node(node, item)?;
        }

        Ok(root)
    }

    fn patch_node(&mut self, node: &mut ResolvedNode, item: &DiffItem) -> ResolveResult<()> {
        if let Some(name) = &item.name {
            node.set_name(Some(name.clone()));
        }

        match node {
            ResolvedNode::String(text) => {
                if let Some(value) = &item.text_value {
                    text.value = value.clone();
                }
            }
            ResolvedNode::Primitive(element) => {
                if let Some(component_id) = &item.component_id {
                    element.component_id = component_id.clone();
                }
                if let Some(ops) = &item.class_names {
                    element.class_names =
                        apply_array_diff(&element.class_names, ops, ClassName::key);
                }
                if let Some(ops) = &item.props {
                    element.props = apply_array_diff(&element.props, ops, ElementProp::key);
                }
                if let Some(ops) = &item.children {
                    let parent_path = element.path.clone();
                    let children = std::mem::take(&mut element.children);
                    element.children = apply_array_diff_with(
                        children,
                        ops,
                        |child: &ResolvedNode| child.id().to_string(),
                        |added| self.resolve(added, &parent_path),
                    )?;
                }
            }
            ResolvedNode::Composite(instance) => {
                // Effective variants were already chosen during resolution;
                // this only keeps the displayed list in sync.
                if let Some(ops) = &item.variant_names {
                    instance.variant_names =
                        apply_array_diff(&instance.variant_names, ops, String::clone);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::create_resolved_node;
    use paperclip_model::builders::{component, element, instance, text};
    use paperclip_model::{ArrayDiffItem, ComponentStore, NodePath};

    fn path(ids: &[&str]) -> NodePath {
        ids.iter().map(|id| id.to_string()).collect()
    }

    fn resolved_box(components: &ComponentStore) -> ResolvedNode {
        let node = element("b", "View")
            .class_name("c1", "card")
            .string_prop("p1", "title", "Hi")
            .child(text("t1", "one"))
            .child(text("t2", "two"))
            .build();
        create_resolved_node(components, &node, &[]).unwrap()
    }

    #[test]
    fn test_field_patches() {
        let components = ComponentStore::new();
        let root = resolved_box(&components);

        let diff = vec![
            DiffItem::new(path(&["b"]))
                .with_name("Card")
                .with_component_id("Pressable")
                .with_class_names(vec![ArrayDiffItem::added(ClassName::new("c2", "dark"), None)])
                .with_props(vec![ArrayDiffItem::removed_at(0)]),
            DiffItem::new(path(&["b", "t2"])).with_text_value("TWO"),
            // String nodes ignore primitive-only fields
            DiffItem::new(path(&["b", "t1"])).with_component_id("View"),
        ];

        let mut resolver = Resolver::new(&components);
        let patched = resolver.apply_diff(root, &diff, &[]).unwrap();
        let element = patched.as_primitive().unwrap();

        assert_eq!(element.name.as_deref(), Some("Card"));
        assert_eq!(element.component_id, "Pressable");
        assert_eq!(element.class_names.len(), 2);
        assert!(element.props.is_empty());
        assert_eq!(element.children[1].as_string().unwrap().value, "TWO");
        assert_eq!(element.children[0].as_string().unwrap().value, "one");
    }

    #[test]
    fn test_children_ops_resolve_added_nodes() {
        let hero = component("Hero", "Hero", element("hr", "View")).build();
        let components = ComponentStore::from_components(vec![hero]).unwrap();
        let root = resolved_box(&components);

        let diff = vec![DiffItem::new(path(&["b"])).with_children(vec![
            ArrayDiffItem::removed_key("t1"),
            ArrayDiffItem::added(instance("h", "Hero").build(), Some(0)),
        ])];

        let mut resolver = Resolver::new(&components);
        let patched = resolver.apply_diff(root, &diff, &[]).unwrap();
        let children = &patched.as_primitive().unwrap().children;

        assert_eq!(children.len(), 2);
        let hero = children[0].as_composite().unwrap();
        assert_eq!(hero.path, path(&["b", "h"]));
        assert_eq!(hero.root_element.path(), path(&["b", "h", "hr"]).as_slice());
        assert_eq!(children[1].id(), "t2");
    }

    #[test]
    fn test_new_root_node_replaces_subtree() {
        let components = ComponentStore::new();
        let root = resolved_box(&components);

        let diff = vec![
            DiffItem::replace(
                path(&["b", "t1"]),
                element("v", "View").child(text("vt", "new")).build(),
            )
            .with_text_value("ignored"),
        ];

        let mut resolver = Resolver::new(&components);
        let patched = resolver.apply_diff(root, &diff, &[]).unwrap();
        let replaced = &patched.as_primitive().unwrap().children[0];

        assert_eq!(replaced.id(), "v");
        assert_eq!(replaced.path(), path(&["b", "v"]).as_slice());
        assert_eq!(
            replaced.as_primitive().unwrap().children[0].path(),
            path(&["b", "v", "vt"]).as_slice()
        );
    }

    #[test]
    fn test_unresolvable_items_are_skipped() {
        let components = ComponentStore::new();
        let root = resolved_box(&components);

        let diff = vec![
            DiffItem::new(path(&["b", "nope"])).with_text_value("x"),
            DiffItem::new(path(&["elsewhere"])).with_name("x"),
        ];

        let mut resolver = Resolver::new(&components);
        let patched = resolver.apply_diff(root.clone(), &diff, &[]).unwrap();
        assert_eq!(patched, root);
    }

    #[test]
    fn test_adding_missing_component_is_fatal() {
        let components = ComponentStore::new();
        let root = resolved_box(&components);

        let diff = vec![DiffItem::new(path(&["b"]))
            .with_children(vec![ArrayDiffItem::added(instance("x", "Missing").build(), None)])];

        let mut resolver = Resolver::new(&components);
        let result: ResolveResult<_> = resolver.apply_diff(root, &diff, &[]);
        assert!(result.is_err());
    }
}
