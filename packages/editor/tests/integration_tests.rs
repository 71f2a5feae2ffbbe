//! Integration tests for the edit cycle: instantiate, reduce, diff, commit

use paperclip_editor::{
    apply_selection_diff, create_selection_with_diff, diff_resolved_trees, resolved_node_reducer,
    unresolve, Action, EditorError,
};
use paperclip_model::builders::{component, element, instance, text, variant};
use paperclip_model::{
    ArrayDiffItem, ClassName, ComponentStore, DiffItem, Node, NodePath, SelectedComponent,
    SequentialIdGenerator,
};
use paperclip_resolver::{create_resolved_node, instance_root, instantiate_resolved_component};

fn path(ids: &[&str]) -> NodePath {
    ids.iter().map(|id| id.to_string()).collect()
}

/// `App` is a `Box(b)` holding a title and a `Hero` instance; `Hero` itself
/// nests a `Badge`.
fn store() -> ComponentStore {
    let badge = component("Badge", "Badge", element("br", "View").child(text("bt", "New")))
        .variant(variant(
            "alert",
            vec![DiffItem::new(path(&["br"])).with_class_names(vec![ArrayDiffItem::added(
                ClassName::new("a1", "alert"),
                None,
            )])],
        ))
        .build();
    let hero = component(
        "Hero",
        "Hero",
        element("hr", "View")
            .child(text("ht", "Welcome"))
            .child(instance("hb", "Badge")),
    )
    .build();
    let app = component(
        "App",
        "App",
        element("b", "View")
            .child(text("t", "Title"))
            .child(instance("h", "Hero")),
    )
    .variant(variant("dark", vec![]))
    .build();
    ComponentStore::from_components(vec![badge, hero, app]).unwrap()
}

fn edit(
    components: &ComponentStore,
    selection: &SelectedComponent,
    actions: Vec<Action>,
) -> SelectedComponent {
    let mut ids = SequentialIdGenerator::from_seed("edit");
    let mut tree = instantiate_resolved_component(components, selection).unwrap();
    for action in &actions {
        tree = resolved_node_reducer(components, &mut ids, &tree, action).unwrap();
    }
    create_selection_with_diff(components, selection, &tree).unwrap()
}

fn root_children(node: &Node) -> &[Node] {
    match node {
        Node::Primitive(element) => &element.children,
        _ => panic!("expected primitive root"),
    }
}

fn composite(node: &Node) -> &paperclip_model::CompositeElement {
    match node {
        Node::Composite(instance) => instance,
        _ => panic!("expected composite"),
    }
}

#[test]
fn test_class_added_inside_instance_lands_on_instance_diff() {
    let components = store();
    let app = components.get("App").unwrap().clone();

    // synthetic root -> b -> h -> hr
    let selection = edit(
        &components,
        &SelectedComponent::new("App"),
        vec![Action::AddClassNames { path: vec![0, 1, 0], class_names: vec!["foo".into()] }],
    );
    assert_eq!(
        selection.diff,
        Some(vec![DiffItem::new(path(&["b", "h", "hr"])).with_class_names(vec![
            ArrayDiffItem::added(ClassName::new("edit-1", "foo"), None)
        ])])
    );

    let (updated, selection) = apply_selection_diff(&components, &selection).unwrap();
    assert!(selection.diff.is_none());

    let before = root_children(&app.root_element);
    let after = root_children(&updated.root_element);
    assert_eq!(after[0], before[0]);

    let hero = composite(&after[1]);
    assert_eq!(hero.id, "h");
    assert_eq!(hero.component_id, "Hero");
    assert_eq!(
        hero.diff,
        vec![DiffItem::new(path(&["hr"])).with_class_names(vec![ArrayDiffItem::added(
            ClassName::new("edit-1", "foo"),
            None,
        )])]
    );
    assert_eq!(updated.variants, app.variants);
}

#[test]
fn test_nested_instance_edit_is_recorded_on_enclosing_instance() {
    let components = store();

    // b -> h -> hr -> hb -> br -> bt
    let selection = edit(
        &components,
        &SelectedComponent::new("App"),
        vec![Action::SetTextValue { path: vec![0, 1, 0, 1, 0, 0], value: "Hot".into() }],
    );
    let (updated, _) = apply_selection_diff(&components, &selection).unwrap();

    // The Hero instance records the edit relative to itself; Hero and Badge
    // definitions are untouched
    let hero = composite(&root_children(&updated.root_element)[1]);
    assert_eq!(
        hero.diff,
        vec![DiffItem::new(path(&["hr", "hb", "br", "bt"])).with_text_value("Hot")]
    );
    assert_eq!(components.get("Hero"), store().get("Hero"));

    let mut committed = components.clone();
    committed.insert(updated);
    let tree = instantiate_resolved_component(&committed, &SelectedComponent::new("App")).unwrap();
    let text_path = path(&["b", "h", "hr", "hb", "br", "bt"]);
    let text = paperclip_resolver::find_node(instance_root(&tree), &text_path)
        .and_then(|node| node.as_string())
        .unwrap();
    assert_eq!(text.value, "Hot");
}

#[test]
fn test_own_node_edits_update_root_element() {
    let components = store();

    let selection = edit(
        &components,
        &SelectedComponent::new("App"),
        vec![
            Action::SetTextValue { path: vec![0, 0], value: "Hello".into() },
            Action::SetName { path: vec![0], name: Some("Container".into()) },
            Action::InsertNode { path: vec![0], node: text("x", "Footer") },
        ],
    );
    let (updated, _) = apply_selection_diff(&components, &selection).unwrap();

    let Node::Primitive(root) = &updated.root_element else {
        panic!("expected primitive root");
    };
    assert_eq!(root.name.as_deref(), Some("Container"));
    assert_eq!(root.children[0], text("t", "Hello"));
    assert_eq!(root.children[1], instance("h", "Hero").build());
    assert_eq!(root.children[2], text("edit-1", "Footer"));
}

#[test]
fn test_variant_selection_appends_to_variant() {
    let components = store();
    let selection = SelectedComponent::new("App").with_variant("dark");

    let edited = edit(
        &components,
        &selection,
        vec![Action::AddClassNames { path: vec![0], class_names: vec!["dark".into()] }],
    );
    let (updated, _) = apply_selection_diff(&components, &edited).unwrap();

    assert_eq!(updated.root_element, components.get("App").unwrap().root_element);
    let dark = updated.variant("dark").unwrap();
    assert_eq!(dark.diff.len(), 1);
    assert_eq!(dark.diff[0].path, path(&["b"]));
}

#[test]
fn test_instance_variant_toggle_is_recorded() {
    let components = store();

    // Select the Badge variant on the nested instance from the outer diff
    let toggle = DiffItem::new(path(&["b", "h", "hr", "hb"]))
        .with_variant_names(vec![ArrayDiffItem::added("alert".to_string(), None)]);
    let selection = SelectedComponent::new("App").with_diff(vec![toggle]);
    let tree = instantiate_resolved_component(&components, &selection).unwrap();
    let badge_path = path(&["b", "h", "hr", "hb", "br"]);
    let badge_root = paperclip_resolver::find_node(instance_root(&tree), &badge_path)
        .and_then(|node| node.as_primitive())
        .unwrap();
    assert_eq!(badge_root.class_names, vec![ClassName::new("a1", "alert")]);

    let (updated, _) = apply_selection_diff(&components, &selection).unwrap();
    let hero = composite(&root_children(&updated.root_element)[1]);
    assert_eq!(hero.diff.len(), 1);
    assert_eq!(hero.diff[0].path, path(&["hr", "hb"]));
}

#[test]
fn test_missing_variant_is_an_error() {
    let components = store();
    let selection = SelectedComponent::new("App")
        .with_variant("missing")
        .with_diff(vec![]);

    let result = apply_selection_diff(&components, &selection);
    assert!(matches!(result, Err(EditorError::VariantNotFound { .. })));
}

#[test]
fn test_collapse_then_expand_reproduces_edit() {
    let components = store();
    let node = components.get("App").unwrap().root_element.clone();
    let before = create_resolved_node(&components, &node, &[]).unwrap();

    let mut ids = SequentialIdGenerator::from_seed("edit");
    let mut after = before.clone();
    for action in [
        Action::AddClassNames { path: vec![1, 0], class_names: vec!["big".into()] },
        Action::RemoveNode { path: vec![1, 0, 0] },
        Action::DuplicateNode { path: vec![0] },
    ] {
        after = resolved_node_reducer(&components, &mut ids, &after, &action).unwrap();
    }

    let diff = diff_resolved_trees(&before, &after);
    let lowered = unresolve(&after, &diff);
    let expanded = create_resolved_node(&components, &lowered, &[]).unwrap();

    assert!(diff_resolved_trees(&after, &expanded).is_empty());
}

#[test]
fn test_missing_component_is_an_error() {
    let components = store();
    let result = apply_selection_diff(&components, &SelectedComponent::new("Ghost"));
    assert_eq!(result, Err(EditorError::ComponentNotFound("Ghost".into())));
}
