//! Deduplication of tag definitions that share a tag name.
//!
//! Occurrences are counted over the whole rule list first, so every variant of
//! a shared tag name (the first one included) receives a disambiguated name.

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::error::{GenError, Result};
use crate::naming::{dupe_name, is_blacklisted};
use crate::rules::TagDefinition;

/// `tagName -> (dupeName -> discriminator)`, both levels in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateRegistry {
    entries: IndexMap<String, IndexMap<String, String>>,
}

impl DuplicateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-registering an existing dupe name overwrites its discriminator in place.
    pub fn register(&mut self, tag_name: &str, dupe_name: String, discriminator: &str) {
        self.entries
            .entry(tag_name.to_string())
            .or_default()
            .insert(dupe_name, discriminator.to_string());
    }

    pub fn contains(&self, tag_name: &str) -> bool {
        self.entries.contains_key(tag_name)
    }

    pub fn variants(&self, tag_name: &str) -> Option<&IndexMap<String, String>> {
        self.entries.get(tag_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexMap<String, String>)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A definition that survived the block-list, possibly renamed.
#[derive(Debug, Clone, PartialEq)]
pub struct RetainedTag<'a> {
    pub definition: &'a TagDefinition,
    pub dupe_name: Option<String>,
    /// Forced to the discriminator for dupes so dispatch can validate it.
    pub spec_name: Option<String>,
}

impl<'a> RetainedTag<'a> {
    fn unchanged(definition: &'a TagDefinition) -> Self {
        Self {
            definition,
            dupe_name: None,
            spec_name: definition.spec_name.clone(),
        }
    }

    /// Name the component is derived from.
    pub fn source_name(&self) -> &str {
        self.dupe_name
            .as_deref()
            .unwrap_or(&self.definition.tag_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deduplicated<'a> {
    pub tags: Vec<RetainedTag<'a>>,
    pub dupes: DuplicateRegistry,
}

/// Occurrence count per tag name over the unfiltered input.
pub fn count_occurrences(tags: &[TagDefinition]) -> HashMap<&str, usize> {
    tags.iter().fold(HashMap::new(), |mut counts, tag| {
        *counts.entry(tag.tag_name.as_str()).or_insert(0) += 1;
        counts
    })
}

/// Two variants of one tag name selected by the same discriminator abort the
/// run: they would share one component identifier.
pub fn deduplicate(tags: &[TagDefinition]) -> Result<Deduplicated<'_>> {
    let counts = count_occurrences(tags);

    let result = tags
        .iter()
        .try_fold(Deduplicated::default(), |mut acc, definition| {
            let tag_name = definition.tag_name.as_str();

            if is_blacklisted(tag_name) {
                return Ok(acc);
            }

            if counts.get(tag_name).copied().unwrap_or(0) < 2 {
                acc.tags.push(RetainedTag::unchanged(definition));
                return Ok(acc);
            }

            let discriminator = definition.discriminator();
            let name = dupe_name(tag_name, discriminator);

            if acc
                .dupes
                .variants(tag_name)
                .is_some_and(|variants| variants.contains_key(&name))
            {
                return Err(GenError::DuplicateVariant {
                    tag: tag_name.to_string(),
                    spec_name: discriminator.to_string(),
                });
            }

            acc.dupes.register(tag_name, name.clone(), discriminator);
            acc.tags.push(RetainedTag {
                definition,
                dupe_name: Some(name),
                spec_name: Some(discriminator.to_string()),
            });
            Ok(acc)
        })?;

    log::debug!(
        "Deduplicated {} tag definitions: {} retained, {} shared tag names",
        tags.len(),
        result.tags.len(),
        result.dupes.len()
    );

    Ok(result)
}
