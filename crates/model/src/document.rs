//! Canonical document model produced by normalization.
//!
//! Everything in this module is immutable once built: normalization
//! runs once per document and later stages only read.

use serde::Serialize;
use std::collections::BTreeMap;

/// Special-flag key marking a rule as dynamic regardless of its
/// selector (see the range matcher's dynamic handling).
pub const IS_DYNAMIC_FLAG: &str = "--is-dynamic";

/// An ordered sequence of normalized style sheets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Document {
    pub sheets: Vec<StyleSheet>,
}

/// An ordered sequence of normalized rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StyleSheet {
    pub rules: Vec<Rule>,
}

/// A normalized rule. Only style and media rules survive
/// normalization; other rule kinds are dropped there.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Rule {
    Style(StyleRule),
    Media(MediaRule),
}

/// A normalized style rule.
///
/// `style` holds only properties on the fluid allow-list, shorthands
/// already expanded and values zero-normalized. `special` is the
/// side-channel flag map carried through from the raw rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub style: BTreeMap<String, String>,
    pub special: BTreeMap<String, String>,
}

impl StyleRule {
    /// Whether this rule carries the explicit dynamic marker.
    pub fn is_flagged_dynamic(&self) -> bool {
        self.special
            .get(IS_DYNAMIC_FLAG)
            .is_some_and(|value| value == "true")
    }
}

/// A normalized media rule: a `min-width` pixel condition and its
/// nested style rules.
///
/// A media rule with zero nested rules is retained on purpose — it is
/// the marker that overrides the document's baseline width.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaRule {
    pub min_width: u32,
    pub rules: Vec<StyleRule>,
}
