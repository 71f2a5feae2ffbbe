//! # Tree Resolver
//!
//! Expands unresolved nodes into a resolved tree. Composite elements are
//! instantiated recursively: the referenced component's root is resolved
//! under the composite's path, then the active variants' diffs and finally
//! the composite's own instance diff are applied on top.
//!
//! ## Variant selection
//!
//! A composite's effective variants are its authored `variantNames`, patched
//! by `variantNames` items addressed at the composite itself: first those in
//! its own diff (empty path), then those from enclosing instance and variant
//! diffs, innermost first. The latter are collected while resolving the
//! enclosing component, since its diffs are only applied on top after its
//! subtree has been built.
//!
//! ## Failure model
//!
//! - Missing component: fatal, no partial tree is returned
//! - Component re-entered on the active chain: fatal (`RecursiveComponent`)
//! - Missing variant: logged and skipped
//! - Diff item whose path does not resolve: skipped

use crate::visitor::{PathPrefixStripper, VisitorMut};
use paperclip_model::{
    apply_array_diff, child_path, ArrayDiff, Component, CompositeElement, FindComponent, Node,
    NodePath, ResolvedCompositeElement, ResolvedNode, ResolvedPrimitiveElement,
    ResolvedStringNode, SelectedComponent, Variant,
};
use thiserror::Error;
use tracing::{instrument, trace, warn};

/// Id of the synthetic composite wrapping an instantiated selection
pub const SYNTHETIC_ROOT_ID: &str = "root";

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Component '{component_id}' not found (referenced at {})", path.join("/"))]
    ComponentNotFound { component_id: String, path: NodePath },

    #[error("Recursive component detected: {component}\nCall stack: {}", call_stack.join(" → "))]
    RecursiveComponent {
        component: String,
        call_stack: Vec<String>,
    },
}

/// `variantNames` override addressed at an absolute composite path
#[derive(Debug, Clone)]
struct VariantOverride {
    path: NodePath,
    ops: ArrayDiff<String>,
}

/// Resolution state for one call
pub struct Resolver<'a> {
    components: &'a dyn FindComponent,
    /// Component call stack for cycle detection
    component_stack: Vec<String>,
    /// One frame per composite being resolved, outermost first
    variant_scope: Vec<Vec<VariantOverride>>,
}

impl<'a> Resolver<'a> {
    pub fn new(components: &'a dyn FindComponent) -> Self {
        Self {
            components,
            component_stack: Vec::new(),
            variant_scope: Vec::new(),
        }
    }

    /// Treat `components` as already being resolved, outermost first. Used
    /// when resolving a node into an existing tree below those instances.
    pub fn with_component_stack(mut self, components: Vec<String>) -> Self {
        self.component_stack = components;
        self
    }

    /// Resolve `node` as a child of `parent_path`
    pub fn resolve(&mut self, node: &Node, parent_path: &[String]) -> ResolveResult<ResolvedNode> {
        let path = child_path(parent_path, node.id());

        match node {
            Node::String(text) => Ok(ResolvedNode::String(ResolvedStringNode {
                id: text.id.clone(),
                name: text.name.clone(),
                value: text.value.clone(),
                path,
            })),
            Node::Primitive(element) => {
                let children = element
                    .children
                    .iter()
                    .map(|child| self.resolve(child, &path))
                    .collect::<ResolveResult<Vec<_>>>()?;

                Ok(ResolvedNode::Primitive(ResolvedPrimitiveElement {
                    id: element.id.clone(),
                    name: element.name.clone(),
                    component_id: element.component_id.clone(),
                    class_names: element.class_names.clone(),
                    props: element.props.clone(),
                    children,
                    path,
                }))
            }
            Node::Composite(instance) => self.resolve_composite(instance, path),
        }
    }

    fn resolve_composite(
        &mut self,
        instance: &CompositeElement,
        path: NodePath,
    ) -> ResolveResult<ResolvedNode> {
        let components = self.components;
        let component = components
            .find_component(&instance.component_id)
            .ok_or_else(|| ResolveError::ComponentNotFound {
                component_id: instance.component_id.clone(),
                path: path.clone(),
            })?;

        if self.component_stack.contains(&component.id) {
            let mut call_stack = self.component_stack.clone();
            call_stack.push(component.id.clone());
            return Err(ResolveError::RecursiveComponent {
                component: component.id.clone(),
                call_stack,
            });
        }

        let variants = self.active_variants(component, instance, &path);
        trace!(
            component = %component.id,
            variants = variants.len(),
            path = %path.join("/"),
            "resolving composite"
        );

        let frame = variants
            .iter()
            .flat_map(|variant| variant.diff.iter())
            .chain(instance.diff.iter())
            .filter(|item| !item.path.is_empty())
            .filter_map(|item| {
                item.variant_names.as_ref().map(|ops| VariantOverride {
                    path: [path.as_slice(), item.path.as_slice()].concat(),
                    ops: ops.clone(),
                })
            })
            .collect();

        self.component_stack.push(component.id.clone());
        self.variant_scope.push(frame);
        let root = self.resolve_instance_root(component, &variants, instance, &path);
        self.variant_scope.pop();
        self.component_stack.pop();

        Ok(ResolvedNode::Composite(ResolvedCompositeElement {
            id: instance.id.clone(),
            name: instance.name.clone(),
            component_id: instance.component_id.clone(),
            variant_names: instance.variant_names.clone(),
            diff: instance.diff.clone(),
            root_element: Box::new(root?),
            path,
        }))
    }

    fn resolve_instance_root(
        &mut self,
        component: &Component,
        variants: &[&Variant],
        instance: &CompositeElement,
        path: &[String],
    ) -> ResolveResult<ResolvedNode> {
        let mut root = self.resolve(&component.root_element, path)?;
        for variant in variants {
            root = self.apply_diff(root, &variant.diff, path)?;
        }
        self.apply_diff(root, &instance.diff, path)
    }

    fn active_variants<'c>(
        &self,
        component: &'c Component,
        instance: &CompositeElement,
        path: &[String],
    ) -> Vec<&'c Variant> {
        let mut names = instance.variant_names.clone();

        for item in instance.diff.iter().filter(|item| item.path.is_empty()) {
            if let Some(ops) = &item.variant_names {
                names = apply_array_diff(&names, ops, String::clone);
            }
        }

        for frame in self.variant_scope.iter().rev() {
            for entry in frame.iter().filter(|entry| entry.path == path) {
                names = apply_array_diff(&names, &entry.ops, String::clone);
            }
        }

        names
            .iter()
            .filter_map(|variant_id| {
                let variant = component.variant(variant_id);
                if variant.is_none() {
                    warn!(
                        component = %component.id,
                        variant = %variant_id,
                        "variant not found, skipping"
                    );
                }
                variant
            })
            .collect()
    }
}

/// Resolve `node` under `parent_path` against `components`
pub fn create_resolved_node(
    components: &dyn FindComponent,
    node: &Node,
    parent_path: &[String],
) -> ResolveResult<ResolvedNode> {
    Resolver::new(components).resolve(node, parent_path)
}

/// Resolve a selection as a free-standing instance.
///
/// The selection is wrapped in a synthetic composite (id [`SYNTHETIC_ROOT_ID`])
/// carrying the selected variant and any in-progress diff. The synthetic id is
/// stripped from every path afterwards, so the component's root element sits
/// at `[root_element.id]` and diff paths produced against this tree can be
/// stored directly on the component or one of its variants.
#[instrument(skip(components), fields(component = %selection.component_id))]
pub fn instantiate_resolved_component(
    components: &dyn FindComponent,
    selection: &SelectedComponent,
) -> ResolveResult<ResolvedNode> {
    let root = Node::Composite(CompositeElement {
        id: SYNTHETIC_ROOT_ID.to_string(),
        name: None,
        component_id: selection.component_id.clone(),
        variant_names: selection.variant_id.iter().cloned().collect(),
        diff: selection.diff.clone().unwrap_or_default(),
    });

    let mut resolved = create_resolved_node(components, &root, &[])?;
    PathPrefixStripper::new(SYNTHETIC_ROOT_ID).visit_node_mut(&mut resolved);
    Ok(resolved)
}

/// The component root inside an instantiated selection; any other node is
/// returned as-is.
pub fn instance_root(node: &ResolvedNode) -> &ResolvedNode {
    match node {
        ResolvedNode::Composite(instance)
            if instance.id == SYNTHETIC_ROOT_ID && instance.path.is_empty() =>
        {
            &instance.root_element
        }
        other => other,
    }
}
