//! Rule Loader for the AMP component generator
//!
//! Reads the validator rule table (`tags`, `attrs`, `internedStrings`) as
//! exported by the validator-rules package. No transformation happens here.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::{GenError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// RULE TABLE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSpec {
    #[serde(default)]
    pub name: Option<String>,
}

/// One allowed markup element and its constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    pub tag_name: String,
    #[serde(default)]
    pub spec_name: Option<String>,
    #[serde(default)]
    pub extension_spec: Option<ExtensionSpec>,
    pub attrs: Vec<i64>,
    #[serde(default)]
    pub requires_extension: Option<Vec<String>>,
}

impl TagDefinition {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            spec_name: None,
            extension_spec: None,
            attrs: Vec::new(),
            requires_extension: None,
        }
    }

    /// Value that selects this variant when the tag name is shared:
    /// `specName`, then `extensionSpec.name`, then `"default"`.
    pub fn discriminator(&self) -> &str {
        non_empty(self.spec_name.as_deref())
            .or_else(|| {
                self.extension_spec
                    .as_ref()
                    .and_then(|spec| non_empty(spec.name.as_deref()))
            })
            .unwrap_or(DEFAULT_SPEC_NAME)
    }

    /// Extensions the component must register before it renders.
    pub fn required_extensions(&self) -> &[String] {
        self.requires_extension.as_deref().unwrap_or_default()
    }
}

pub const DEFAULT_SPEC_NAME: &str = "default";

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mandatory: Option<bool>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Interned entries are usually bare strings; records carry the attribute shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InternedEntry {
    Record(AttributeRecord),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleTable {
    pub tags: Vec<TagDefinition>,
    pub attrs: Vec<AttributeRecord>,
    pub interned_strings: Vec<InternedEntry>,
}

/// Borrowed view of a resolved attribute reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAttr<'a> {
    pub name: Option<&'a str>,
    pub mandatory: bool,
    pub value: Option<&'a str>,
}

const NAMELESS: ResolvedAttr<'static> = ResolvedAttr {
    name: None,
    mandatory: false,
    value: None,
};

impl<'a> ResolvedAttr<'a> {
    fn from_record(record: &'a AttributeRecord) -> Self {
        Self {
            name: non_empty(record.name.as_deref()),
            mandatory: record.mandatory.unwrap_or(false),
            value: non_empty(record.value.as_deref()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOADING
// ═══════════════════════════════════════════════════════════════════════════════

impl RuleTable {
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let table = Self::from_json_str(&source)?;
        log::debug!(
            "Loaded {} tags, {} attrs, {} interned strings from {}",
            table.tags.len(),
            table.attrs.len(),
            table.interned_strings.len(),
            path.display()
        );
        Ok(table)
    }

    /// Resolves one entry of `tag.attrs`. Positive references index `attrs`,
    /// everything else indexes `internedStrings` by magnitude.
    pub fn resolve_attr(&self, tag: &TagDefinition, reference: i64) -> Result<ResolvedAttr<'_>> {
        if reference > 0 {
            let index = reference.unsigned_abs();
            return usize::try_from(index)
                .ok()
                .and_then(|i| self.attrs.get(i))
                .map(ResolvedAttr::from_record)
                .ok_or_else(|| GenError::DanglingAttribute {
                    tag: tag.tag_name.clone(),
                    table: "attrs",
                    index,
                    len: self.attrs.len(),
                });
        }

        let index = reference.unsigned_abs();
        match usize::try_from(index)
            .ok()
            .and_then(|i| self.interned_strings.get(i))
        {
            Some(InternedEntry::Record(record)) => Ok(ResolvedAttr::from_record(record)),
            Some(InternedEntry::Text(_)) => Ok(NAMELESS),
            None => Err(GenError::DanglingAttribute {
                tag: tag.tag_name.clone(),
                table: "internedStrings",
                index,
                len: self.interned_strings.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> RuleTable {
        serde_json::from_value(json!({
            "tags": [
                { "tagName": "amp-img", "attrs": [1, -1, 0], "extraField": true }
            ],
            "attrs": [
                { "name": "unused" },
                { "name": "src", "mandatory": true }
            ],
            "internedStrings": [
                "layout",
                { "name": "width", "value": "100" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_positive_reference_uses_attrs() {
        let table = table();
        let tag = &table.tags[0];
        let attr = table.resolve_attr(tag, 1).unwrap();
        assert_eq!(attr.name, Some("src"));
        assert!(attr.mandatory);
        assert_eq!(attr.value, None);
    }

    #[test]
    fn test_negative_reference_uses_interned_strings() {
        let table = table();
        let tag = &table.tags[0];
        let attr = table.resolve_attr(tag, -1).unwrap();
        assert_eq!(attr.name, Some("width"));
        assert_eq!(attr.value, Some("100"));
    }

    #[test]
    fn test_zero_reference_uses_interned_strings() {
        let table = table();
        let tag = &table.tags[0];
        // Bare interned strings carry no attribute name.
        assert_eq!(table.resolve_attr(tag, 0).unwrap().name, None);
    }

    #[test]
    fn test_dangling_reference_is_fatal() {
        let table = table();
        let tag = &table.tags[0];
        assert!(matches!(
            table.resolve_attr(tag, 7),
            Err(GenError::DanglingAttribute { table: "attrs", index: 7, .. })
        ));
        assert!(matches!(
            table.resolve_attr(tag, -5),
            Err(GenError::DanglingAttribute {
                table: "internedStrings",
                index: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_attrs_is_schema_mismatch() {
        let err = RuleTable::from_json_str(
            r#"{ "tags": [{ "tagName": "amp-img" }], "attrs": [], "internedStrings": [] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, GenError::SchemaMismatch(_)));
    }

    #[test]
    fn test_discriminator_fallbacks() {
        let mut tag = TagDefinition::new("amp-ad");
        assert_eq!(tag.discriminator(), "default");

        tag.extension_spec = Some(ExtensionSpec {
            name: Some("amp-ad-ext".to_string()),
        });
        assert_eq!(tag.discriminator(), "amp-ad-ext");

        tag.spec_name = Some(String::new());
        assert_eq!(tag.discriminator(), "amp-ad-ext");

        tag.spec_name = Some("amp-ad (with src)".to_string());
        assert_eq!(tag.discriminator(), "amp-ad (with src)");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"{ "tags": [{ "tagName": "amp-img", "attrs": [] }], "attrs": [], "internedStrings": [] }"#,
        )
        .unwrap();
        let table = RuleTable::from_path(&path).unwrap();
        assert_eq!(table.tags.len(), 1);

        let missing = RuleTable::from_path(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, GenError::Io(_)));
    }

    #[test]
    fn test_from_reader() {
        let source = r#"{
            "tags": [{ "tagName": "amp-img", "specName": "img", "attrs": [-1] }],
            "attrs": [],
            "internedStrings": ["", { "name": "alt" }]
        }"#;
        let table = RuleTable::from_reader(source.as_bytes()).unwrap();
        assert_eq!(table.tags[0].spec_name.as_deref(), Some("img"));
        assert_eq!(table.interned_strings.len(), 2);

        let truncated = RuleTable::from_reader(&source.as_bytes()[..20]).unwrap_err();
        assert_eq!(truncated.code(), crate::error::ERR_SCHEMA);
    }
}
