//! Generator entry points
//!
//! Runs the whole pipeline: deduplicate, synthesize components and dispatchers,
//! emit, and optionally verify the emitted module.

#[cfg(feature = "napi")]
use napi_derive::napi;
use std::path::Path;

use crate::cache::IncrementalCache;
use crate::config::GeneratorConfig;
use crate::dedupe::deduplicate;
use crate::emit::emit_module;
use crate::error::Result;
use crate::ir::GeneratedModule;
use crate::overrides::OverrideRegistry;
use crate::rules::RuleTable;
use crate::synth::{synthesize_components, synthesize_dispatchers};
use crate::verify::verify_module;

/// Generates with the override registry described by `config`.
pub fn generate(rules: &RuleTable, config: &GeneratorConfig) -> Result<GeneratedModule> {
    generate_with_overrides(rules, config, &config.override_registry())
}

/// Generates with an explicitly injected override registry.
pub fn generate_with_overrides(
    rules: &RuleTable,
    config: &GeneratorConfig,
    overrides: &OverrideRegistry,
) -> Result<GeneratedModule> {
    config.validate()?;

    let deduped = deduplicate(&rules.tags)?;
    let components = synthesize_components(rules, &deduped, overrides)?;
    let dispatchers = synthesize_dispatchers(&deduped.dupes);
    let code = emit_module(&components, &dispatchers, &config.emit_options());

    if config.verify {
        verify_module(&code)?;
    }

    log::info!(
        "Generated {} components and {} dispatchers ({} bytes)",
        components.len(),
        dispatchers.len(),
        code.len()
    );

    Ok(GeneratedModule {
        components,
        dispatchers,
        code,
    })
}

pub fn generate_from_json(rules_json: &str, config: &GeneratorConfig) -> Result<GeneratedModule> {
    let rules = RuleTable::from_json_str(rules_json)?;
    generate(&rules, config)
}

/// Returns the module code, reusing a cached copy when the rule source and
/// configuration are unchanged.
pub fn generate_cached(
    rules_json: &str,
    config: &GeneratorConfig,
    cache_dir: &Path,
    output_name: &str,
) -> Result<String> {
    let cache = IncrementalCache::new(cache_dir);
    let hash = IncrementalCache::compute_hash(rules_json, config);

    if let Some(code) = cache.get(output_name, &hash) {
        return Ok(code);
    }

    let module = generate_from_json(rules_json, config)?;
    cache.set(output_name, &hash, &module.code);
    Ok(module.code)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORT
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn generate_components_native(
    rules_json: String,
    config_json: Option<String>,
) -> napi::Result<String> {
    let config = match config_json {
        Some(json) => GeneratorConfig::from_json_str(&json),
        None => Ok(GeneratorConfig::default()),
    }
    .map_err(|e| napi::Error::from_reason(format!("[{}] {}", e.code(), e)))?;

    generate_from_json(&rules_json, &config)
        .map(|module| module.code)
        .map_err(|e| napi::Error::from_reason(format!("[{}] {}", e.code(), e)))
}
