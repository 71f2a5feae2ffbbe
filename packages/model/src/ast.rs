use crate::diff::Diff;
use serde::{Deserialize, Serialize};

/// Chain of node ids from a patch-subtree root down to a node
pub type NodePath = Vec<String>;

/// Unresolved (persisted) node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    String(StringNode),
    Primitive(PrimitiveElement),
    Composite(CompositeElement),
}

/// Discriminant shared by unresolved and resolved nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    String,
    Primitive,
    Composite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: String,
}

/// Element mapped onto a concrete UI primitive (`componentID` is the primitive kind)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimitiveElement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "componentID")]
    pub component_id: String,
    #[serde(default)]
    pub class_names: Vec<ClassName>,
    #[serde(default)]
    pub props: Vec<ElementProp>,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// Instance of a Component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeElement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "componentID")]
    pub component_id: String,
    /// Ids of the active variants, applied in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variant_names: Vec<String>,
    /// Instance overrides; paths are relative to this element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diff: Diff,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassName {
    pub id: String,
    pub value: String,
}

impl ClassName {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// Class names are matched by value across edits
    pub fn key(&self) -> String {
        self.value.clone()
    }
}

/// Typed element prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementProp {
    String { id: String, name: String, value: String },
    Number { id: String, name: String, value: f64 },
    Generator { id: String, name: String, value: String },
}

impl ElementProp {
    pub fn id(&self) -> &str {
        match self {
            ElementProp::String { id, .. }
            | ElementProp::Number { id, .. }
            | ElementProp::Generator { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ElementProp::String { name, .. }
            | ElementProp::Number { name, .. }
            | ElementProp::Generator { name, .. } => name,
        }
    }

    pub(crate) fn set_id(&mut self, new_id: String) {
        match self {
            ElementProp::String { id, .. }
            | ElementProp::Number { id, .. }
            | ElementProp::Generator { id, .. } => *id = new_id,
        }
    }

    /// Props are matched by their full serialized form, so any field change
    /// shows up as a remove + add pair.
    pub fn key(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Persisted, reusable component definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    /// Opaque kind tag carried through untouched
    #[serde(rename = "componentID", default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
    pub name: String,
    pub root_element: Node,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
}

impl Component {
    pub fn variant(&self, id: &str) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.id == id)
    }

    pub fn variant_mut(&mut self, id: &str) -> Option<&mut Variant> {
        self.variants.iter_mut().find(|variant| variant.id == id)
    }
}

/// Named override set a composite can opt into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub diff: Diff,
}

/// Transient edit pointer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedComponent {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Edits not yet folded back into the component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<Diff>,
}

impl SelectedComponent {
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            variant_id: None,
            diff: None,
        }
    }

    pub fn with_variant(mut self, variant_id: impl Into<String>) -> Self {
        self.variant_id = Some(variant_id.into());
        self
    }

    pub fn with_diff(mut self, diff: Diff) -> Self {
        self.diff = Some(diff);
        self
    }
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::String(node) => &node.id,
            Node::Primitive(node) => &node.id,
            Node::Composite(node) => &node.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::String(node) => node.name.as_deref(),
            Node::Primitive(node) => node.name.as_deref(),
            Node::Composite(node) => node.name.as_deref(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::String(_) => NodeKind::String,
            Node::Primitive(_) => NodeKind::Primitive,
            Node::Composite(_) => NodeKind::Composite,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Primitive(element) => &element.children,
            _ => &[],
        }
    }

    pub(crate) fn set_id(&mut self, id: String) {
        match self {
            Node::String(node) => node.id = id,
            Node::Primitive(node) => node.id = id,
            Node::Composite(node) => node.id = id,
        }
    }
}

// Resolved shapes

/// Fully expanded node; every node carries its resolution `path`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedNode {
    String(ResolvedStringNode),
    Primitive(ResolvedPrimitiveElement),
    Composite(ResolvedCompositeElement),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStringNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: String,
    pub path: NodePath,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrimitiveElement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "componentID")]
    pub component_id: String,
    #[serde(default)]
    pub class_names: Vec<ClassName>,
    #[serde(default)]
    pub props: Vec<ElementProp>,
    #[serde(default)]
    pub children: Vec<ResolvedNode>,
    pub path: NodePath,
}

/// Resolved instance. `variant_names` and `diff` are kept as authored so the
/// instance can be lowered back without loss; `root_element` is the patched
/// subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCompositeElement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "componentID")]
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variant_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diff: Diff,
    pub root_element: Box<ResolvedNode>,
    pub path: NodePath,
}

impl ResolvedNode {
    pub fn id(&self) -> &str {
        match self {
            ResolvedNode::String(node) => &node.id,
            ResolvedNode::Primitive(node) => &node.id,
            ResolvedNode::Composite(node) => &node.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ResolvedNode::String(node) => node.name.as_deref(),
            ResolvedNode::Primitive(node) => node.name.as_deref(),
            ResolvedNode::Composite(node) => node.name.as_deref(),
        }
    }

    /// Empty names clear the name
    pub fn set_name(&mut self, name: Option<String>) {
        let name = name.filter(|name| !name.is_empty());
        match self {
            ResolvedNode::String(node) => node.name = name,
            ResolvedNode::Primitive(node) => node.name = name,
            ResolvedNode::Composite(node) => node.name = name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            ResolvedNode::String(_) => NodeKind::String,
            ResolvedNode::Primitive(_) => NodeKind::Primitive,
            ResolvedNode::Composite(_) => NodeKind::Composite,
        }
    }

    pub fn path(&self) -> &[String] {
        match self {
            ResolvedNode::String(node) => &node.path,
            ResolvedNode::Primitive(node) => &node.path,
            ResolvedNode::Composite(node) => &node.path,
        }
    }

    pub fn path_mut(&mut self) -> &mut NodePath {
        match self {
            ResolvedNode::String(node) => &mut node.path,
            ResolvedNode::Primitive(node) => &mut node.path,
            ResolvedNode::Composite(node) => &mut node.path,
        }
    }

    /// Direct descendants: a primitive's children, or a composite's root element
    pub fn children(&self) -> Vec<&ResolvedNode> {
        match self {
            ResolvedNode::String(_) => Vec::new(),
            ResolvedNode::Primitive(element) => element.children.iter().collect(),
            ResolvedNode::Composite(instance) => vec![instance.root_element.as_ref()],
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut ResolvedNode> {
        match self {
            ResolvedNode::String(_) => Vec::new(),
            ResolvedNode::Primitive(element) => element.children.iter_mut().collect(),
            ResolvedNode::Composite(instance) => vec![instance.root_element.as_mut()],
        }
    }

    pub fn as_primitive(&self) -> Option<&ResolvedPrimitiveElement> {
        match self {
            ResolvedNode::Primitive(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&ResolvedCompositeElement> {
        match self {
            ResolvedNode::Composite(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&ResolvedStringNode> {
        match self {
            ResolvedNode::String(text) => Some(text),
            _ => None,
        }
    }
}

/// `parent_path ++ [id]`
pub fn child_path(parent_path: &[String], id: &str) -> NodePath {
    let mut path = Vec::with_capacity(parent_path.len() + 1);
    path.extend_from_slice(parent_path);
    path.push(id.to_string());
    path
}
