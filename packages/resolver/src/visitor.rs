use paperclip_model::{
    NodePath, ResolvedCompositeElement, ResolvedNode, ResolvedPrimitiveElement,
    ResolvedStringNode,
};

/// Visitor pattern for traversing resolved trees immutably
///
/// Default implementations walk the entire tree, including each composite's
/// `root_element`. Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &ResolvedNode) {
        walk_node(self, node);
    }

    fn visit_string(&mut self, _text: &ResolvedStringNode) {
        // Leaf node, no children to walk
    }

    fn visit_primitive(&mut self, element: &ResolvedPrimitiveElement) {
        walk_primitive(self, element);
    }

    fn visit_composite(&mut self, instance: &ResolvedCompositeElement) {
        walk_composite(self, instance);
    }
}

/// Mutable visitor pattern for transforming resolved trees
pub trait VisitorMut: Sized {
    fn visit_node_mut(&mut self, node: &mut ResolvedNode) {
        walk_node_mut(self, node);
    }

    fn visit_string_mut(&mut self, _text: &mut ResolvedStringNode) {
        // Leaf node, no children to walk
    }

    fn visit_primitive_mut(&mut self, element: &mut ResolvedPrimitiveElement) {
        walk_primitive_mut(self, element);
    }

    fn visit_composite_mut(&mut self, instance: &mut ResolvedCompositeElement) {
        walk_composite_mut(self, instance);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &ResolvedNode) {
    match node {
        ResolvedNode::String(text) => visitor.visit_string(text),
        ResolvedNode::Primitive(element) => visitor.visit_primitive(element),
        ResolvedNode::Composite(instance) => visitor.visit_composite(instance),
    }
}

pub fn walk_primitive<V: Visitor>(visitor: &mut V, element: &ResolvedPrimitiveElement) {
    for child in &element.children {
        visitor.visit_node(child);
    }
}

pub fn walk_composite<V: Visitor>(visitor: &mut V, instance: &ResolvedCompositeElement) {
    visitor.visit_node(&instance.root_element);
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut ResolvedNode) {
    match node {
        ResolvedNode::String(text) => visitor.visit_string_mut(text),
        ResolvedNode::Primitive(element) => visitor.visit_primitive_mut(element),
        ResolvedNode::Composite(instance) => visitor.visit_composite_mut(instance),
    }
}

pub fn walk_primitive_mut<V: VisitorMut>(visitor: &mut V, element: &mut ResolvedPrimitiveElement) {
    for child in &mut element.children {
        visitor.visit_node_mut(child);
    }
}

pub fn walk_composite_mut<V: VisitorMut>(visitor: &mut V, instance: &mut ResolvedCompositeElement) {
    visitor.visit_node_mut(&mut instance.root_element);
}

/// Collects every node path in pre-order
#[derive(Default)]
pub struct PathCollector {
    pub paths: Vec<NodePath>,
}

impl Visitor for PathCollector {
    fn visit_node(&mut self, node: &ResolvedNode) {
        self.paths.push(node.path().to_vec());
        walk_node(self, node);
    }
}

pub fn collect_paths(node: &ResolvedNode) -> Vec<NodePath> {
    let mut collector = PathCollector::default();
    collector.visit_node(node);
    collector.paths
}

/// Removes a leading id from every path that starts with it
pub struct PathPrefixStripper<'a> {
    prefix: &'a str,
}

impl<'a> PathPrefixStripper<'a> {
    pub fn new(prefix: &'a str) -> Self {
        Self { prefix }
    }
}

impl VisitorMut for PathPrefixStripper<'_> {
    fn visit_node_mut(&mut self, node: &mut ResolvedNode) {
        let path = node.path_mut();
        if path.first().map(String::as_str) == Some(self.prefix) {
            path.remove(0);
        }
        walk_node_mut(self, node);
    }
}

/// Find the node whose resolution path equals `path`
pub fn find_node<'a>(node: &'a ResolvedNode, path: &[String]) -> Option<&'a ResolvedNode> {
    if node.path() == path {
        return Some(node);
    }
    if !path.starts_with(node.path()) {
        return None;
    }
    node.children()
        .into_iter()
        .find_map(|child| find_node(child, path))
}

pub fn find_node_mut<'a>(
    node: &'a mut ResolvedNode,
    path: &[String],
) -> Option<&'a mut ResolvedNode> {
    if node.path() == path {
        return Some(node);
    }
    if !path.starts_with(node.path()) {
        return None;
    }
    node.children_mut()
        .into_iter()
        .find_map(|child| find_node_mut(child, path))
}

/// Follow child indices from `node`. A primitive's index selects a child; a
/// composite only has index 0, its root element.
pub fn find_by_index_path<'a>(
    node: &'a ResolvedNode,
    indices: &[usize],
) -> Option<&'a ResolvedNode> {
    match indices.split_first() {
        None => Some(node),
        Some((&index, rest)) => {
            let child = node.children().into_iter().nth(index)?;
            find_by_index_path(child, rest)
        }
    }
}

pub fn find_by_index_path_mut<'a>(
    node: &'a mut ResolvedNode,
    indices: &[usize],
) -> Option<&'a mut ResolvedNode> {
    match indices.split_first() {
        None => Some(node),
        Some((&index, rest)) => {
            let child = node.children_mut().into_iter().nth(index)?;
            find_by_index_path_mut(child, rest)
        }
    }
}
