//! Component lookup
//!
//! Composites reference components by id. Resolution reads components
//! through [`FindComponent`], which must behave as a read-only snapshot for the
//! duration of one call.

use crate::ast::Component;
use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub trait FindComponent {
    fn find_component(&self, id: &str) -> Option<&Component>;
}

impl FindComponent for HashMap<String, Component> {
    fn find_component(&self, id: &str) -> Option<&Component> {
        self.get(id)
    }
}

impl FindComponent for Vec<Component> {
    fn find_component(&self, id: &str) -> Option<&Component> {
        self.iter().find(|component| component.id == id)
    }
}

/// Components in insertion order, indexed by id
#[derive(Debug, Clone, Default)]
pub struct ComponentStore {
    components: Vec<Component>,
    index: HashMap<String, usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentJson {
    List(Vec<Component>),
    Document { components: Vec<Component> },
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    components: &'a [Component],
}

impl ComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store, rejecting duplicate component ids
    pub fn from_components(components: Vec<Component>) -> ModelResult<Self> {
        let mut store = Self::new();
        for component in components {
            if store.index.contains_key(&component.id) {
                return Err(ModelError::DuplicateComponent(component.id));
            }
            store.insert(component);
        }
        Ok(store)
    }

    /// Parse a document: either a JSON array of components or
    /// `{ "components": [...] }`
    pub fn from_json(json: &str) -> ModelResult<Self> {
        let components = match serde_json::from_str(json)? {
            DocumentJson::List(components) => components,
            DocumentJson::Document { components } => components,
        };
        Self::from_components(components)
    }

    pub fn to_json(&self, pretty: bool) -> ModelResult<String> {
        let document = DocumentRef {
            components: &self.components,
        };
        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(json)
    }

    /// Insert or replace a component, keeping its original position when replacing
    pub fn insert(&mut self, component: Component) -> Option<Component> {
        match self.index.get(&component.id) {
            Some(&position) => Some(std::mem::replace(&mut self.components[position], component)),
            None => {
                self.index.insert(component.id.clone(), self.components.len());
                self.components.push(component);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.index.get(id).map(|&position| &self.components[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl FindComponent for ComponentStore {
    fn find_component(&self, id: &str) -> Option<&Component> {
        self.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{component, element, text};

    fn button() -> Component {
        component("button", "Button", element("btn", "View").child(text("label", "Click"))).build()
    }

    #[test]
    fn test_insert_and_replace() {
        let mut store = ComponentStore::new();
        assert!(store.insert(button()).is_none());
        store.insert(component("card", "Card", element("card-root", "View")).build());

        let mut renamed = button();
        renamed.name = "Primary Button".to_string();
        let previous = store.insert(renamed).unwrap();
        assert_eq!(previous.name, "Button");
        assert_eq!(store.iter().next().unwrap().name, "Primary Button");

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_component("card").unwrap().name, "Card");
        assert!(store.find_component("missing").is_none());
    }

    #[test]
    fn test_json_document_shapes() {
        let store = ComponentStore::from_components(vec![button()]).unwrap();
        let json = store.to_json(false).unwrap();
        assert!(json.starts_with(r#"{"components":["#));

        let parsed = ComponentStore::from_json(&json).unwrap();
        assert_eq!(parsed.get("button"), store.get("button"));

        let list = serde_json::to_string(&vec![button()]).unwrap();
        assert_eq!(ComponentStore::from_json(&list).unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ComponentStore::from_components(vec![button(), button()]);
        assert!(matches!(result, Err(ModelError::DuplicateComponent(id)) if id == "button"));
    }
}
