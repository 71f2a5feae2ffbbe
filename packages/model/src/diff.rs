//! Path-addressed patches
//!
//! A [`Diff`] is an ordered list of [`DiffItem`]s. Each item targets one node
//! by `path`, the chain of node ids from the patch-subtree root down to the
//! target, and carries only the fields that changed. Items apply in list
//! order; an item whose path does not resolve is skipped.

use crate::array_diff::ArrayDiff;
use crate::ast::{ClassName, ElementProp, Node, NodePath};
use serde::{Deserialize, Serialize};

pub type Diff = Vec<DiffItem>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffItem {
    pub path: NodePath,

    /// New name; `""` clears it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,

    #[serde(rename = "componentID", default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<ArrayDiff<ElementProp>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_names: Option<ArrayDiff<ClassName>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_names: Option<ArrayDiff<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<ArrayDiff<Node>>,

    /// Replaces the whole target subtree; every other field is ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_root_node: Option<Box<Node>>,
}

impl DiffItem {
    pub fn new(path: NodePath) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Item replacing the subtree at `path`
    pub fn replace(path: NodePath, node: Node) -> Self {
        Self {
            path,
            new_root_node: Some(Box::new(node)),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_text_value(mut self, value: impl Into<String>) -> Self {
        self.text_value = Some(value.into());
        self
    }

    pub fn with_component_id(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }

    pub fn with_class_names(mut self, ops: ArrayDiff<ClassName>) -> Self {
        self.class_names = Some(ops);
        self
    }

    pub fn with_props(mut self, ops: ArrayDiff<ElementProp>) -> Self {
        self.props = Some(ops);
        self
    }

    pub fn with_variant_names(mut self, ops: ArrayDiff<String>) -> Self {
        self.variant_names = Some(ops);
        self
    }

    pub fn with_children(mut self, ops: ArrayDiff<Node>) -> Self {
        self.children = Some(ops);
        self
    }

    /// True when the item carries no change at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.text_value.is_none()
            && self.component_id.is_none()
            && self.props.is_none()
            && self.class_names.is_none()
            && self.variant_names.is_none()
            && self.children.is_none()
            && self.new_root_node.is_none()
    }

    /// Whether the item targets a node strictly below `path`
    pub fn is_below(&self, path: &[String]) -> bool {
        self.path.len() > path.len() && self.path.starts_with(path)
    }

    /// Re-address the item relative to a node `depth` levels down its path
    pub fn relativize(&self, depth: usize) -> DiffItem {
        DiffItem {
            path: self.path[depth.min(self.path.len())..].to_vec(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array_diff::ArrayDiffItem;

    fn path(ids: &[&str]) -> NodePath {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn test_diff_item_json_shape() {
        let item = DiffItem::new(path(&["b", "h"]))
            .with_class_names(vec![ArrayDiffItem::added(ClassName::new("c1", "foo"), None)]);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["path"], serde_json::json!(["b", "h"]));
        assert_eq!(json["classNames"][0]["type"], "a");
        assert_eq!(json["classNames"][0]["item"]["value"], "foo");
        assert!(json.get("name").is_none());
        assert!(json.get("newRootNode").is_none());

        let back: DiffItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_relativize_and_is_below() {
        let item = DiffItem::new(path(&["b", "h", "hero"])).with_name("title");
        assert!(item.is_below(&path(&["b", "h"])));
        assert!(!item.is_below(&path(&["b", "h", "hero"])));
        assert!(!item.is_below(&path(&["x"])));

        let relative = item.relativize(2);
        assert_eq!(relative.path, path(&["hero"]));
        assert_eq!(relative.name.as_deref(), Some("title"));
    }

    #[test]
    fn test_is_empty() {
        assert!(DiffItem::new(path(&["a"])).is_empty());
        assert!(!DiffItem::new(path(&["a"])).with_text_value("x").is_empty());
    }
}
