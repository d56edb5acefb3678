use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::emit::{EmitOptions, DEFAULT_CONTEXT_MODULE};
use crate::error::{GenError, Result};
use crate::overrides::{OverrideRegistry, DEFAULT_OVERRIDES, DEFAULT_OVERRIDES_DIR};

/// Generator settings. Every field is optional in the JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Module exporting `CONTEXT_KEY`, relative to the generated file.
    pub context_module: String,
    /// Directory holding hand-written component overrides.
    pub overrides_dir: String,
    /// Component names with a hand-written implementation.
    pub overrides: Vec<String>,
    /// Parse the emitted module before returning it.
    pub verify: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            context_module: DEFAULT_CONTEXT_MODULE.to_string(),
            overrides_dir: DEFAULT_OVERRIDES_DIR.to_string(),
            overrides: DEFAULT_OVERRIDES.iter().map(|s| s.to_string()).collect(),
            verify: true,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(source).map_err(|e| GenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.context_module.trim().is_empty() {
            return Err(GenError::Config("contextModule must not be empty".to_string()));
        }
        if let Some(name) = self.overrides.iter().find(|n| !is_identifier(n)) {
            return Err(GenError::Config(format!(
                "override '{}' is not a valid component name",
                name
            )));
        }
        Ok(())
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            context_module: self.context_module.clone(),
        }
    }

    pub fn override_registry(&self) -> OverrideRegistry {
        OverrideRegistry::from_names(&self.overrides, &self.overrides_dir)
    }

    /// Stable serialization used as part of the cache key.
    pub fn fingerprint(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::from_json_str("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.context_module, "../AmpScripts");
        assert_eq!(config.overrides, vec!["AmpState".to_string()]);
        assert!(config.verify);
    }

    #[test]
    fn test_partial_override() {
        let config = GeneratorConfig::from_json_str(
            r#"{ "overrides": ["AmpState", "AmpList"], "overridesDir": "./hand", "verify": false }"#,
        )
        .unwrap();
        assert_eq!(config.context_module, "../AmpScripts");
        assert!(!config.verify);

        let registry = config.override_registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.resolve("AmpList").unwrap().import_source,
            "./hand/AmpList"
        );
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = GeneratorConfig::from_json_str(r#"{ "contextKey": "x" }"#).unwrap_err();
        assert!(matches!(err, GenError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_override_name() {
        let err = GeneratorConfig::from_json_str(r#"{ "overrides": ["amp-state"] }"#).unwrap_err();
        assert!(err.to_string().contains("amp-state"));
    }

    #[test]
    fn test_fingerprint_tracks_changes() {
        let mut config = GeneratorConfig::default();
        let before = config.fingerprint();
        config.context_module = "../Other".to_string();
        assert_ne!(before, config.fingerprint());
    }
}
