//! Node and component builders, plus subtree cloning with fresh ids
//!
//! ```rust,ignore
//! let card = component("card", "Card",
//!     element("card-root", "View")
//!         .class_name("c1", "card")
//!         .child(text("title", "Hello"))
//!         .child(instance("hero", "Hero").variant("dark")),
//! )
//! .build();
//! ```

use crate::ast::{
    ClassName, Component, CompositeElement, ElementProp, Node, PrimitiveElement, StringNode,
    Variant,
};
use crate::diff::{Diff, DiffItem};
use crate::id_generator::IdGenerator;

pub fn text(id: impl Into<String>, value: impl Into<String>) -> Node {
    Node::String(StringNode {
        id: id.into(),
        name: None,
        value: value.into(),
    })
}

pub fn element(id: impl Into<String>, component_id: impl Into<String>) -> ElementBuilder {
    ElementBuilder {
        element: PrimitiveElement {
            id: id.into(),
            name: None,
            component_id: component_id.into(),
            class_names: Vec::new(),
            props: Vec::new(),
            children: Vec::new(),
        },
    }
}

pub fn instance(id: impl Into<String>, component_id: impl Into<String>) -> InstanceBuilder {
    InstanceBuilder {
        instance: CompositeElement {
            id: id.into(),
            name: None,
            component_id: component_id.into(),
            variant_names: Vec::new(),
            diff: Vec::new(),
        },
    }
}

pub fn component(
    id: impl Into<String>,
    name: impl Into<String>,
    root_element: impl Into<Node>,
) -> ComponentBuilder {
    ComponentBuilder {
        component: Component {
            id: id.into(),
            component_id: None,
            name: name.into(),
            root_element: root_element.into(),
            variants: Vec::new(),
        },
    }
}

pub fn variant(id: impl Into<String>, diff: Diff) -> Variant {
    Variant {
        id: id.into(),
        name: None,
        diff,
    }
}

pub struct ElementBuilder {
    element: PrimitiveElement,
}

impl ElementBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.element.name = Some(name.into());
        self
    }

    pub fn class_name(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.element.class_names.push(ClassName::new(id, value));
        self
    }

    pub fn string_prop(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.element.props.push(ElementProp::String {
            id: id.into(),
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn number_prop(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        value: f64,
    ) -> Self {
        self.element.props.push(ElementProp::Number {
            id: id.into(),
            name: name.into(),
            value,
        });
        self
    }

    pub fn generator_prop(
        mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.element.props.push(ElementProp::Generator {
            id: id.into(),
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.element.children.push(child.into());
        self
    }

    pub fn build(self) -> Node {
        Node::Primitive(self.element)
    }
}

impl From<ElementBuilder> for Node {
    fn from(builder: ElementBuilder) -> Self {
        builder.build()
    }
}

pub struct InstanceBuilder {
    instance: CompositeElement,
}

impl InstanceBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.instance.name = Some(name.into());
        self
    }

    pub fn variant(mut self, variant_id: impl Into<String>) -> Self {
        self.instance.variant_names.push(variant_id.into());
        self
    }

    pub fn diff_item(mut self, item: DiffItem) -> Self {
        self.instance.diff.push(item);
        self
    }

    pub fn build(self) -> Node {
        Node::Composite(self.instance)
    }
}

impl From<InstanceBuilder> for Node {
    fn from(builder: InstanceBuilder) -> Self {
        builder.build()
    }
}

pub struct ComponentBuilder {
    component: Component,
}

impl ComponentBuilder {
    pub fn variant(mut self, variant: Variant) -> Self {
        self.component.variants.push(variant);
        self
    }

    pub fn kind(mut self, component_id: impl Into<String>) -> Self {
        self.component.component_id = Some(component_id.into());
        self
    }

    pub fn build(self) -> Component {
        self.component
    }
}

impl Node {
    /// Deep copy with fresh ids for the node, its class names, props and
    /// descendants. Composite instance diffs are kept as-is: their paths
    /// address nodes of the referenced component, not of this tree.
    pub fn clone_with_fresh_ids(&self, ids: &mut dyn IdGenerator) -> Node {
        let mut clone = self.clone();
        assign_fresh_ids(&mut clone, ids);
        clone
    }
}

fn assign_fresh_ids(node: &mut Node, ids: &mut dyn IdGenerator) {
    node.set_id(ids.new_id());

    if let Node::Primitive(element) = node {
        for class_name in &mut element.class_names {
            class_name.id = ids.new_id();
        }
        for prop in &mut element.props {
            prop.set_id(ids.new_id());
        }
        for child in &mut element.children {
            assign_fresh_ids(child, ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id_generator::SequentialIdGenerator;
    use std::collections::HashSet;

    fn collect_ids(node: &Node, ids: &mut Vec<String>) {
        ids.push(node.id().to_string());
        for child in node.children() {
            collect_ids(child, ids);
        }
    }

    #[test]
    fn test_builders_produce_expected_shape() {
        let root = element("root", "View")
            .name("Container")
            .class_name("c1", "card")
            .string_prop("p1", "title", "Hi")
            .child(text("t1", "Hello"))
            .child(instance("h1", "Hero").variant("dark"))
            .build();

        let Node::Primitive(element) = &root else {
            panic!("Expected primitive");
        };
        assert_eq!(element.name.as_deref(), Some("Container"));
        assert_eq!(element.children.len(), 2);
        let Node::Composite(hero) = &element.children[1] else {
            panic!("Expected composite");
        };
        assert_eq!(hero.variant_names, vec!["dark"]);
    }

    #[test]
    fn test_clone_with_fresh_ids() {
        let hero_item = DiffItem::new(vec!["hero-root".to_string()]).with_text_value("x");
        let original = element("root", "View")
            .class_name("c1", "card")
            .number_prop("p1", "tabIndex", 1.0)
            .child(text("t1", "Hello"))
            .child(instance("h1", "Hero").diff_item(hero_item.clone()))
            .build();

        let mut ids = SequentialIdGenerator::from_seed("clone");
        let clone = original.clone_with_fresh_ids(&mut ids);

        let mut before = Vec::new();
        let mut after = Vec::new();
        collect_ids(&original, &mut before);
        collect_ids(&clone, &mut after);

        let before: HashSet<_> = before.into_iter().collect();
        assert!(after.iter().all(|id| !before.contains(id)));

        let Node::Primitive(element) = &clone else {
            panic!("Expected primitive");
        };
        assert_eq!(element.class_names[0].value, "card");
        assert_ne!(element.class_names[0].id, "c1");
        assert_ne!(element.props[0].id(), "p1");
        let Node::Composite(hero) = &element.children[1] else {
            panic!("Expected composite");
        };
        assert_eq!(hero.diff, vec![hero_item]);
    }
}
