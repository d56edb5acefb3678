//! Component and dispatcher synthesis.
//!
//! Turns deduplicated tag definitions into `ComponentSpec` records and the
//! duplicate registry into `DispatcherSpec` records.

use crate::dedupe::{Deduplicated, DuplicateRegistry, RetainedTag};
use crate::error::Result;
use crate::ir::{
    ComponentKind, ComponentSpec, DefaultProp, DispatchVariant, DispatcherSpec, ExtensionGuard,
    PropType,
};
use crate::naming::{component_name, is_blacklisted};
use crate::overrides::OverrideRegistry;
use crate::rules::{RuleTable, TagDefinition};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedProps {
    pub prop_types: Vec<PropType>,
    pub default_props: Vec<DefaultProp>,
}

/// Mandatory attributes never get defaults, even when the rule carries a value.
pub fn resolve_props(rules: &RuleTable, definition: &TagDefinition) -> Result<ResolvedProps> {
    definition
        .attrs
        .iter()
        .try_fold(ResolvedProps::default(), |mut props, &reference| {
            let attr = rules.resolve_attr(definition, reference)?;
            let Some(name) = attr.name else {
                return Ok(props);
            };

            props.prop_types.push(PropType {
                name: name.to_string(),
                required: attr.mandatory,
            });

            if let (false, Some(value)) = (attr.mandatory, attr.value) {
                props.default_props.push(DefaultProp {
                    name: name.to_string(),
                    value: value.to_string(),
                });
            }

            Ok(props)
        })
}

pub fn synthesize_component(
    rules: &RuleTable,
    tag: &RetainedTag<'_>,
    overrides: &OverrideRegistry,
) -> Result<ComponentSpec> {
    let definition = tag.definition;
    let name = component_name(tag.source_name());
    let guard = ExtensionGuard::new(definition.required_extensions());

    let kind = match overrides.resolve(&name) {
        Some(binding) => ComponentKind::Override { binding },
        None => ComponentKind::Element {
            tag: definition.tag_name.to_lowercase(),
        },
    };

    // Resolved for overrides too, so a broken reference still aborts the run.
    let props = resolve_props(rules, definition)?;

    Ok(ComponentSpec {
        name,
        tag_name: definition.tag_name.clone(),
        spec_name: tag.spec_name.clone(),
        kind,
        prop_types: props.prop_types,
        default_props: props.default_props,
        guard,
    })
}

pub fn synthesize_components(
    rules: &RuleTable,
    deduped: &Deduplicated<'_>,
    overrides: &OverrideRegistry,
) -> Result<Vec<ComponentSpec>> {
    let components = deduped
        .tags
        .iter()
        .filter(|tag| !is_blacklisted(&tag.definition.tag_name))
        .map(|tag| synthesize_component(rules, tag, overrides))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Synthesized {} components ({} overrides, {} with extension guards)",
        components.len(),
        components.iter().filter(|c| c.is_override()).count(),
        components.iter().filter(|c| !c.guard.is_empty()).count()
    );

    Ok(components)
}

pub fn synthesize_dispatchers(dupes: &DuplicateRegistry) -> Vec<DispatcherSpec> {
    dupes
        .iter()
        .filter(|(tag_name, _)| !is_blacklisted(tag_name))
        .map(|(tag_name, variants)| DispatcherSpec {
            name: component_name(tag_name),
            tag_name: tag_name.clone(),
            variants: variants
                .iter()
                .map(|(dupe_name, spec_name)| DispatchVariant {
                    spec_name: spec_name.clone(),
                    component: component_name(dupe_name),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedupe::deduplicate;
    use crate::error::GenError;
    use serde_json::json;

    fn rules(value: serde_json::Value) -> RuleTable {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_resolve_props_required_and_defaults() {
        let rules = rules(json!({
            "tags": [{ "tagName": "amp-img", "attrs": [1, 2, 3, 4] }],
            "attrs": [
                {},
                { "name": "src", "mandatory": true },
                { "name": "layout", "value": "responsive" },
                { "name": "alt" },
                { "value": "orphan" }
            ],
            "internedStrings": []
        }));

        let props = resolve_props(&rules, &rules.tags[0]).unwrap();
        assert_eq!(
            props.prop_types,
            vec![
                PropType { name: "src".to_string(), required: true },
                PropType { name: "layout".to_string(), required: false },
                PropType { name: "alt".to_string(), required: false },
            ]
        );
        assert_eq!(
            props.default_props,
            vec![DefaultProp {
                name: "layout".to_string(),
                value: "responsive".to_string()
            }]
        );
    }

    #[test]
    fn test_mandatory_wins_over_value() {
        let rules = rules(json!({
            "tags": [{ "tagName": "amp-state", "attrs": [1] }],
            "attrs": [{}, { "name": "id", "mandatory": true, "value": "state" }],
            "internedStrings": []
        }));
        let props = resolve_props(&rules, &rules.tags[0]).unwrap();
        assert_eq!(props.prop_types.len(), 1);
        assert!(props.default_props.is_empty());
    }

    #[test]
    fn test_dangling_reference_aborts() {
        let rules = rules(json!({
            "tags": [{ "tagName": "amp-img", "attrs": [3] }],
            "attrs": [{}],
            "internedStrings": []
        }));
        let deduped = deduplicate(&rules.tags).unwrap();
        let err = synthesize_components(&rules, &deduped, &OverrideRegistry::new()).unwrap_err();
        assert!(matches!(err, GenError::DanglingAttribute { .. }));
    }

    #[test]
    fn test_element_component_uses_lowercased_tag() {
        let rules = rules(json!({
            "tags": [
                { "tagName": "AMP-IMG", "attrs": [], "requiresExtension": ["amp-img"] }
            ],
            "attrs": [],
            "internedStrings": []
        }));
        let deduped = deduplicate(&rules.tags).unwrap();
        let components =
            synthesize_components(&rules, &deduped, &OverrideRegistry::new()).unwrap();

        assert_eq!(components[0].name, "AmpImg");
        assert_eq!(
            components[0].kind,
            ComponentKind::Element { tag: "amp-img".to_string() }
        );
        assert_eq!(components[0].guard.extensions, vec!["amp-img".to_string()]);
    }

    #[test]
    fn test_dupe_renders_original_tag() {
        let rules = rules(json!({
            "tags": [
                { "tagName": "amp-ad", "specName": "a", "attrs": [] },
                { "tagName": "amp-ad", "specName": "b", "attrs": [] }
            ],
            "attrs": [],
            "internedStrings": []
        }));
        let deduped = deduplicate(&rules.tags).unwrap();
        let components =
            synthesize_components(&rules, &deduped, &OverrideRegistry::new()).unwrap();

        assert_eq!(components[0].name, "AmpAd_61");
        assert_eq!(components[1].name, "AmpAd_62");
        assert_eq!(components[1].spec_name.as_deref(), Some("b"));
        assert_eq!(
            components[1].kind,
            ComponentKind::Element { tag: "amp-ad".to_string() }
        );

        let dispatchers = synthesize_dispatchers(&deduped.dupes);
        assert_eq!(dispatchers.len(), 1);
        assert_eq!(dispatchers[0].name, "AmpAd");
        assert_eq!(dispatchers[0].spec_names(), vec!["a", "b"]);
        assert_eq!(dispatchers[0].variants[0].component, "AmpAd_61");
    }

    #[test]
    fn test_override_component() {
        let rules = rules(json!({
            "tags": [{ "tagName": "amp-state", "attrs": [1], "requiresExtension": ["amp-bind"] }],
            "attrs": [{}, { "name": "id", "mandatory": true }],
            "internedStrings": []
        }));
        let deduped = deduplicate(&rules.tags).unwrap();
        let components =
            synthesize_components(&rules, &deduped, &OverrideRegistry::with_defaults()).unwrap();

        let component = &components[0];
        assert!(component.is_override());
        assert_eq!(component.prop_types.len(), 1);
        assert_eq!(component.guard.extensions, vec!["amp-bind".to_string()]);
    }
}
