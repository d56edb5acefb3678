//! Reference semantics of the emitted runtime helpers.
//!
//! The generated module ships `propsHelper`, `contextHelper` and the dispatcher
//! bodies as JavaScript. This module models the same behavior in Rust so hosts
//! that pre-render, and the tests, can reason about it with explicit types.

use serde_json::{Map, Value};

use crate::ir::{DispatcherSpec, ExtensionGuard};

/// `propsHelper`: drops `specName` and renames `className` to `class`.
pub fn normalize_props(props: &Map<String, Value>) -> Map<String, Value> {
    let mut normalized = props.clone();
    normalized.remove("specName");
    if let Some(class_name) = normalized.remove("className") {
        normalized.insert("class".to_string(), class_name);
    }
    normalized
}

/// Capability handed to components that need extensions registered.
pub trait RenderContext {
    fn register_extension(&mut self, name: &str);
}

/// Collects extension names in registration order, once each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionCollector {
    extensions: Vec<String>,
}

impl ExtensionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl RenderContext for ExtensionCollector {
    fn register_extension(&mut self, name: &str) {
        if !self.extensions.iter().any(|e| e == name) {
            self.extensions.push(name.to_string());
        }
    }
}

impl ExtensionGuard {
    /// `contextHelper` for every required extension. Without a context this is a no-op.
    pub fn run(&self, context: Option<&mut dyn RenderContext>) {
        if let Some(context) = context {
            for extension in &self.extensions {
                context.register_extension(extension);
            }
        }
    }
}

impl DispatcherSpec {
    /// Component rendered for a `specName`, or `None` when nothing renders.
    pub fn select(&self, spec_name: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|variant| variant.spec_name == spec_name)
            .map(|variant| variant.component.as_str())
    }
}
