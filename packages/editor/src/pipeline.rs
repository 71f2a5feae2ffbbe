//! # Instance Edit Pipeline
//!
//! Coordinates the edit lifecycle of a selected component:
//! Instantiate → Reduce → Diff → Fold back
//!
//! 1. The selection is instantiated as a free-standing resolved tree.
//! 2. Canvas actions edit that tree through the [reducer](crate::reducer).
//! 3. The edited tree is diffed against a fresh instantiation of the
//!    persisted component; the diff is kept on the selection.
//! 4. On commit, the diff is folded into the component. With a variant
//!    selected it is appended to the variant's diff. Otherwise edits to the
//!    component's own nodes are applied in place and edits inside nested
//!    instances are recorded on those instances.

use crate::differ::diff_resolved_trees;
use crate::reducer::{Action, NodeReducer};
use crate::unresolve::unresolve;
use crate::{EditorError, EditorResult};
use paperclip_model::{
    Component, ComponentStore, Diff, DiffItem, FindComponent, IdGenerator, ResolvedNode,
    SelectedComponent,
};
use paperclip_resolver::{find_node, instance_root, instantiate_resolved_component};
use tracing::{debug, instrument};

/// Diff `edited` against a fresh instantiation of the persisted selection and
/// return the selection carrying that diff
#[instrument(skip(components, edited), fields(component = %selection.component_id))]
pub fn create_selection_with_diff(
    components: &dyn FindComponent,
    selection: &SelectedComponent,
    edited: &ResolvedNode,
) -> EditorResult<SelectedComponent> {
    let persisted = SelectedComponent {
        diff: None,
        ..selection.clone()
    };
    let before = instantiate_resolved_component(components, &persisted)?;
    let diff = diff_resolved_trees(instance_root(&before), instance_root(edited));

    debug!(items = diff.len(), "computed selection diff");
    Ok(SelectedComponent {
        diff: Some(diff),
        ..persisted
    })
}

/// Fold `diff` into the component, or into one of its variants when
/// `variant_id` is given. Returns the updated component; `components` is
/// left untouched.
#[instrument(skip(components, diff), fields(items = diff.len()))]
pub fn apply_diff(
    components: &dyn FindComponent,
    component_id: &str,
    variant_id: Option<&str>,
    diff: &[DiffItem],
) -> EditorResult<Component> {
    let mut component = components
        .find_component(component_id)
        .cloned()
        .ok_or_else(|| EditorError::ComponentNotFound(component_id.to_string()))?;

    if let Some(variant_id) = variant_id {
        let variant = component
            .variant_mut(variant_id)
            .ok_or_else(|| EditorError::VariantNotFound {
                component_id: component_id.to_string(),
                variant_id: variant_id.to_string(),
            })?;
        variant.diff.extend(diff.iter().cloned());
        return Ok(component);
    }

    let persisted =
        instantiate_resolved_component(components, &SelectedComponent::new(component_id))?;
    let (composite_items, primitive_items): (Diff, Diff) = diff
        .iter()
        .cloned()
        .partition(|item| crosses_instance_boundary(instance_root(&persisted), &item.path));

    debug!(
        primitive = primitive_items.len(),
        composite = composite_items.len(),
        "partitioned diff"
    );

    let patched = instantiate_resolved_component(
        components,
        &SelectedComponent::new(component_id).with_diff(primitive_items),
    )?;
    component.root_element = unresolve(instance_root(&patched), &composite_items);

    Ok(component)
}

/// Commit the selection's pending diff. Returns the updated component and the
/// selection with its diff cleared.
pub fn apply_selection_diff(
    components: &dyn FindComponent,
    selection: &SelectedComponent,
) -> EditorResult<(Component, SelectedComponent)> {
    let diff = selection.diff.as_deref().unwrap_or_default();
    let component = apply_diff(
        components,
        &selection.component_id,
        selection.variant_id.as_deref(),
        diff,
    )?;

    Ok((
        component,
        SelectedComponent {
            diff: None,
            ..selection.clone()
        },
    ))
}

/// Whether some proper prefix of `path` addresses a composite in `tree`,
/// i.e. the item edits a node owned by a nested instance
fn crosses_instance_boundary(tree: &ResolvedNode, path: &[String]) -> bool {
    (1..path.len()).any(|len| {
        matches!(find_node(tree, &path[..len]), Some(ResolvedNode::Composite(_)))
    })
}

/// Manages the edit → diff → commit cycle for one selection
pub struct Pipeline<G: IdGenerator> {
    components: ComponentStore,
    selection: SelectedComponent,
    ids: G,
    tree: ResolvedNode,
}

impl<G: IdGenerator> Pipeline<G> {
    /// Instantiate `selection` against `components`
    pub fn new(
        components: ComponentStore,
        selection: SelectedComponent,
        ids: G,
    ) -> EditorResult<Self> {
        let tree = instantiate_resolved_component(&components, &selection)?;
        Ok(Self {
            components,
            selection,
            ids,
            tree,
        })
    }

    /// Apply a canvas action and refresh the selection's pending diff
    pub fn dispatch(&mut self, action: &Action) -> EditorResult<&ResolvedNode> {
        let edited = NodeReducer::new(&self.components, &mut self.ids).reduce(&self.tree, action)?;
        self.selection = create_selection_with_diff(&self.components, &self.selection, &edited)?;
        self.tree = edited;
        Ok(&self.tree)
    }

    /// Fold the pending diff into the store and re-instantiate
    pub fn commit(&mut self) -> EditorResult<&Component> {
        let (component, selection) = apply_selection_diff(&self.components, &self.selection)?;
        let component_id = component.id.clone();
        self.components.insert(component);
        self.tree = instantiate_resolved_component(&self.components, &selection)?;
        self.selection = selection;

        self.components
            .get(&component_id)
            .ok_or(EditorError::ComponentNotFound(component_id))
    }

    /// Resolved tree including uncommitted edits
    pub fn tree(&self) -> &ResolvedNode {
        &self.tree
    }

    pub fn selection(&self) -> &SelectedComponent {
        &self.selection
    }

    pub fn components(&self) -> &ComponentStore {
        &self.components
    }

    pub fn into_components(self) -> ComponentStore {
        self.components
    }
}
