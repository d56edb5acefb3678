//! Component naming and the tag block-list.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Tag names that are not valid element names in React and never produce components.
pub const BLACKLIST: &[&str] = &["!DOCTYPE", "$REFERENCE_POINT", "O:P"];

pub fn is_blacklisted(tag_name: &str) -> bool {
    BLACKLIST.contains(&tag_name)
}

lazy_static! {
    static ref WORD_BOUNDARY_RE: Regex = Regex::new(r"(^.|-.)").unwrap();
}

/// Derives the exported component identifier for a tag name.
///
/// The whole name is lower-cased, then the first character and every character
/// after a hyphen are upper-cased and that hyphen dropped:
/// `amp-state` becomes `AmpState`, `amp-IMG` becomes `AmpImg`.
pub fn component_name(tag_name: &str) -> String {
    let lowered = tag_name.to_lowercase();
    WORD_BOUNDARY_RE
        .replace_all(&lowered, |caps: &Captures| {
            caps[1].replacen('-', "", 1).to_uppercase()
        })
        .into_owned()
}

/// Disambiguated name for one variant of a shared tag name.
pub fn dupe_name(tag_name: &str, discriminator: &str) -> String {
    format!("{}_{}", tag_name, hex::encode(discriminator.as_bytes()))
}
