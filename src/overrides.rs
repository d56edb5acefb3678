//! Registry of hand-written component implementations.
//!
//! A derived component name found here is emitted as a thin re-export of the
//! hand-written component instead of a generic element binding.

use std::collections::HashMap;
use std::fmt;

use crate::ir::OverrideBinding;

pub const DEFAULT_OVERRIDES_DIR: &str = "./components";
pub const DEFAULT_OVERRIDES: &[&str] = &["AmpState"];

pub trait OverrideFactory {
    fn binding(&self, component_name: &str) -> OverrideBinding;
}

/// Imports `<dir>/<ComponentName>` as `<ComponentName>Override`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOverride {
    dir: String,
}

impl ModuleOverride {
    pub fn new(dir: &str) -> Self {
        Self {
            dir: dir.trim_end_matches('/').to_string(),
        }
    }
}

impl OverrideFactory for ModuleOverride {
    fn binding(&self, component_name: &str) -> OverrideBinding {
        OverrideBinding {
            local_name: format!("{}Override", component_name),
            import_source: format!("{}/{}", self.dir, component_name),
        }
    }
}

#[derive(Default)]
pub struct OverrideRegistry {
    factories: HashMap<String, Box<dyn OverrideFactory>>,
}

impl OverrideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// `AmpState` resolved from `./components`.
    pub fn with_defaults() -> Self {
        Self::from_names(DEFAULT_OVERRIDES, DEFAULT_OVERRIDES_DIR)
    }

    pub fn from_names<S: AsRef<str>>(names: &[S], dir: &str) -> Self {
        let mut registry = Self::new();
        for name in names {
            registry.register(name.as_ref(), ModuleOverride::new(dir));
        }
        registry
    }

    pub fn register<F: OverrideFactory + 'static>(&mut self, component_name: &str, factory: F) {
        self.factories
            .insert(component_name.to_string(), Box::new(factory));
    }

    pub fn resolve(&self, component_name: &str) -> Option<OverrideBinding> {
        self.factories
            .get(component_name)
            .map(|factory| factory.binding(component_name))
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for OverrideRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("OverrideRegistry")
            .field("components", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Vendored;

    impl OverrideFactory for Vendored {
        fn binding(&self, component_name: &str) -> OverrideBinding {
            OverrideBinding {
                local_name: format!("Vendored{}", component_name),
                import_source: "@vendor/amp".to_string(),
            }
        }
    }

    #[test]
    fn test_default_registry_has_amp_state() {
        let registry = OverrideRegistry::with_defaults();
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.resolve("AmpState"),
            Some(OverrideBinding {
                local_name: "AmpStateOverride".to_string(),
                import_source: "./components/AmpState".to_string(),
            })
        );
        assert_eq!(registry.resolve("AmpImg"), None);
    }

    #[test]
    fn test_module_override_trims_trailing_slash() {
        let binding = ModuleOverride::new("../overrides/").binding("AmpList");
        assert_eq!(binding.import_source, "../overrides/AmpList");
    }

    #[test]
    fn test_custom_factory() {
        let mut registry = OverrideRegistry::new();
        registry.register("AmpBind", Vendored);
        let binding = registry.resolve("AmpBind").unwrap();
        assert_eq!(binding.local_name, "VendoredAmpBind");
        assert_eq!(binding.import_source, "@vendor/amp");
    }
}
