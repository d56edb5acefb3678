//! Intermediate representation between synthesis and emission.
//!
//! Synthesis produces these records; `emit` renders them. Nothing here knows
//! about source text.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropType {
    pub name: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultProp {
    pub name: String,
    pub value: String,
}

/// Extensions registered with the render context before the component renders.
/// An empty guard means the component takes no context argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionGuard {
    pub extensions: Vec<String>,
}

impl ExtensionGuard {
    pub fn new(extensions: &[String]) -> Self {
        Self {
            extensions: extensions.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

/// Where a hand-written component is imported from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideBinding {
    pub local_name: String,
    pub import_source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ComponentKind {
    /// Renders the custom element directly.
    Element { tag: String },
    /// Re-exports a hand-written implementation.
    Override { binding: OverrideBinding },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    pub name: String,
    pub tag_name: String,
    pub spec_name: Option<String>,
    pub kind: ComponentKind,
    pub prop_types: Vec<PropType>,
    pub default_props: Vec<DefaultProp>,
    pub guard: ExtensionGuard,
}

impl ComponentSpec {
    pub fn is_override(&self) -> bool {
        matches!(self.kind, ComponentKind::Override { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchVariant {
    pub spec_name: String,
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatcherSpec {
    pub name: String,
    pub tag_name: String,
    pub variants: Vec<DispatchVariant>,
}

impl DispatcherSpec {
    /// Accepted `specName` values, in dispatch order.
    pub fn spec_names(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.spec_name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedModule {
    pub components: Vec<ComponentSpec>,
    pub dispatchers: Vec<DispatcherSpec>,
    pub code: String,
}

impl GeneratedModule {
    /// Every identifier the module exports, in emission order.
    pub fn exports(&self) -> Vec<&str> {
        self.components
            .iter()
            .map(|c| c.name.as_str())
            .chain(self.dispatchers.iter().map(|d| d.name.as_str()))
            .collect()
    }
}
