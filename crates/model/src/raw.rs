//! Raw style-sheet input as delivered by an external collaborator.
//!
//! The collaborator (a live-page reader or a static-document
//! synthesizer) exposes style sheets as an ordered collection of rules
//! tagged with the DOM's numeric rule type (style = 1, media = 4).
//! Everything here is plain data; `Deserialize` is derived so captured
//! documents can be fed back in as JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Numeric rule type for a style rule, per the CSSOM convention.
pub const STYLE_RULE_TYPE: u16 = 1;

/// Numeric rule type for a media rule, per the CSSOM convention.
pub const MEDIA_RULE_TYPE: u16 = 4;

/// An ordered collection of raw style sheets, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
    pub sheets: Vec<RawStyleSheet>,
}

/// A single raw style sheet.
///
/// `rules` is `None` when the sheet's rule list could not be read
/// (cross-origin or similar access failure); such sheets are skipped
/// during normalization without being reported as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStyleSheet {
    pub rules: Option<Vec<RawRule>>,
}

/// A raw CSS rule, tagged by kind.
///
/// Only style and media rules are meaningful downstream; every other
/// rule kind (imports, font-face, keyframes, ...) is carried as
/// `Unsupported` and dropped at normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawRule {
    Style(RawStyleRule),
    Media(RawMediaRule),
    Unsupported { rule_type: u16 },
}

impl RawRule {
    /// The DOM numeric rule type for this rule.
    pub fn rule_type(&self) -> u16 {
        match self {
            Self::Style(_) => STYLE_RULE_TYPE,
            Self::Media(_) => MEDIA_RULE_TYPE,
            Self::Unsupported { rule_type } => *rule_type,
        }
    }
}

/// A raw style rule: selector text plus its declaration list in
/// specified order, and a side-channel map of special flags (for
/// example `--is-dynamic`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStyleRule {
    pub selector_text: String,
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub special: BTreeMap<String, String>,
}

/// A raw media rule: its unparsed condition text and nested rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMediaRule {
    pub condition_text: String,
    pub rules: Vec<RawRule>,
}

/// A single property declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
