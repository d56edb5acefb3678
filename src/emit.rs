//! Emitter for the generated component module
//!
//! Renders `ComponentSpec` and `DispatcherSpec` records into one JSX ES module.
//! Output is deterministic: the same records always produce the same bytes.

use crate::ir::{ComponentKind, ComponentSpec, DispatcherSpec};

pub const DEFAULT_CONTEXT_MODULE: &str = "../AmpScripts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Module that exports `CONTEXT_KEY`.
    pub context_module: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            context_module: DEFAULT_CONTEXT_MODULE.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PREAMBLE
// ═══════════════════════════════════════════════════════════════════════════════

const HELPERS: &str = r#"// React does not transform `className` to `class` on Web Components
// like `amp-*`. `specName` is only read by dispatcher components.
// https://reactjs.org/docs/web-components.html#using-web-components-in-react
const propsHelper = (props) => {
  const newProps = Object.assign({}, props);

  if ('specName' in newProps) {
    delete newProps.specName;
  }

  if ('className' in newProps) {
    newProps.class = newProps.className;
    delete newProps.className;
  }

  return newProps;
};

const contextHelper = ({ context, extension }) => {
  if (
    typeof context === 'object'
    && context !== null
    && typeof context[CONTEXT_KEY] === 'object'
    && context[CONTEXT_KEY] !== null
    && typeof context[CONTEXT_KEY].addComponent === 'function'
  ) {
    context[CONTEXT_KEY].addComponent(extension);
  }
};
"#;

pub fn emit_preamble(options: &EmitOptions) -> String {
    format!(
        "import React from 'react';\nimport PropTypes from 'prop-types';\nimport {{ CONTEXT_KEY }} from {};\n\n{}",
        js_string(&options.context_module),
        HELPERS
    )
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════════════

fn emit_signature(component: &ComponentSpec) -> &'static str {
    if component.guard.is_empty() {
        "(props)"
    } else {
        "(props, context)"
    }
}

fn emit_guard(out: &mut String, component: &ComponentSpec) {
    for extension in &component.guard.extensions {
        out.push_str(&format!(
            "  contextHelper({{ context, extension: {} }});\n",
            js_string(extension)
        ));
    }
}

pub fn emit_component(component: &ComponentSpec) -> String {
    let name = &component.name;
    let mut out = String::new();

    match &component.kind {
        ComponentKind::Override { binding } => {
            out.push_str(&format!(
                "import {} from {};\n",
                binding.local_name,
                js_string(&binding.import_source)
            ));
            out.push_str(&format!(
                "export const {} = {} => {{\n",
                name,
                emit_signature(component)
            ));
            emit_guard(&mut out, component);
            out.push_str(&format!(
                "  return <{} {{...propsHelper(props)}} />;\n",
                binding.local_name
            ));
            out.push_str("};\n");
        }
        ComponentKind::Element { tag } => {
            out.push_str(&format!("const {} = {} => {{\n", name, emit_signature(component)));
            emit_guard(&mut out, component);
            out.push_str(&format!("  return <{} {{...propsHelper(props)}} />;\n", tag));
            out.push_str("};\n");

            if !component.prop_types.is_empty() {
                out.push_str(&format!("\n{}.propTypes = {{\n", name));
                for prop in &component.prop_types {
                    out.push_str(&format!(
                        "  {}: PropTypes.any{},\n",
                        js_string(&prop.name),
                        if prop.required { ".isRequired" } else { "" }
                    ));
                }
                out.push_str("};\n");
            }

            if !component.default_props.is_empty() {
                out.push_str(&format!("\n{}.defaultProps = {{\n", name));
                for prop in &component.default_props {
                    out.push_str(&format!(
                        "  {}: {},\n",
                        js_string(&prop.name),
                        js_string(&prop.value)
                    ));
                }
                out.push_str("};\n");
            }

            out.push_str(&format!("\n{}.contextTypes = {{\n", name));
            out.push_str("  [CONTEXT_KEY]: PropTypes.shape({\n");
            out.push_str("    addComponent: PropTypes.func.isRequired,\n");
            out.push_str("  }),\n");
            out.push_str("};\n");

            out.push_str(&format!("\nexport {{ {} }};\n", name));
        }
    }

    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISPATCHERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Unmatched `specName` values render nothing.
pub fn emit_dispatcher(dispatcher: &DispatcherSpec) -> String {
    let name = &dispatcher.name;
    let mut out = String::new();

    out.push_str(&format!("const {} = (props) => {{\n", name));
    for variant in &dispatcher.variants {
        out.push_str(&format!(
            "  if (props.specName === {}) return <{} {{...propsHelper(props)}} />;\n",
            js_string(&variant.spec_name),
            variant.component
        ));
    }
    out.push_str("  return null;\n");
    out.push_str("};\n");

    let spec_names = serde_json::to_string(&dispatcher.spec_names()).unwrap_or_default();
    out.push_str(&format!("\n{}.propTypes = {{\n", name));
    out.push_str(&format!(
        "  specName: PropTypes.oneOf({}).isRequired,\n",
        spec_names
    ));
    out.push_str("};\n");

    out.push_str(&format!("\nexport {{ {} }};\n", name));
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODULE
// ═══════════════════════════════════════════════════════════════════════════════

pub fn emit_module(
    components: &[ComponentSpec],
    dispatchers: &[DispatcherSpec],
    options: &EmitOptions,
) -> String {
    let sections = std::iter::once(emit_preamble(options))
        .chain(components.iter().map(emit_component))
        .chain(dispatchers.iter().map(emit_dispatcher))
        .collect::<Vec<_>>();

    sections.join("\n")
}

/// Single-quoted JS string literal.
pub fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Line-numbered listing for debugging a generated module.
pub fn numbered_listing(code: &str) -> String {
    code.lines()
        .enumerate()
        .map(|(index, line)| format!("{:>5} {}", index + 1, line))
        .collect::<Vec<_>>()
        .join("\n")
}
