//! # AMP Component Generator
//!
//! Build-time generator that turns the AMP validator rule table into one JSX
//! module with a React component per allowed tag.
//!
//! ## Output Invariants
//!
//! 1. **Block-list**: `!DOCTYPE`, `$REFERENCE_POINT` and `O:P` never produce a
//!    component or a dispatcher.
//!
//! 2. **Component Names**: every component is exported as
//!    `component_name(tagName)`; variants of a shared tag name are exported as
//!    `component_name(tagName + "_" + hex(discriminator))`.
//!
//! 3. **Shared Tag Names**: duplicates are counted over the full rule list.
//!    A tag name seen k > 1 times yields k variants plus one dispatcher that
//!    selects on `props.specName` and renders nothing when no variant matches.
//!
//! 4. **Props**: mandatory attributes are required prop types and never get a
//!    default; attributes without a name contribute nothing.
//!
//! 5. **Ordering**: components follow the rule list; dispatchers follow the
//!    order their tag names were first registered as duplicates. The same
//!    input always yields byte-identical output.

mod cache;
mod config;
mod dedupe;
mod emit;
mod error;
mod generator;
mod ir;
mod naming;
mod overrides;
mod rules;
mod runtime;
mod synth;
mod verify;


pub use cache::{IncrementalCache, DEFAULT_CACHE_DIR};
pub use config::GeneratorConfig;
pub use dedupe::{count_occurrences, deduplicate, Deduplicated, DuplicateRegistry, RetainedTag};
pub use emit::{
    emit_component, emit_dispatcher, emit_module, emit_preamble, js_string, numbered_listing,
    EmitOptions,
};
pub use error::{GenError, Result};
#[cfg(feature = "napi")]
pub use generator::generate_components_native;
pub use generator::{generate, generate_cached, generate_from_json, generate_with_overrides};
pub use ir::*;
pub use naming::{component_name, dupe_name, is_blacklisted, BLACKLIST};
pub use overrides::{ModuleOverride, OverrideFactory, OverrideRegistry};
pub use rules::{AttributeRecord, ExtensionSpec, InternedEntry, ResolvedAttr, RuleTable, TagDefinition};
pub use runtime::{normalize_props, ExtensionCollector, RenderContext};
pub use synth::{resolve_props, synthesize_components, synthesize_dispatchers, ResolvedProps};
pub use verify::verify_module;
