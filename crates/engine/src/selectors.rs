//! Selector utilities: comma splitting, interactive pseudo-class
//! detection, and the stripping used for anchor derivation.

use crate::value::split_top_level;

/// Interactive pseudo-classes that mark a declaration as dynamic.
/// Longest names first so stripping removes `:focus-visible` whole
/// instead of leaving a `-visible` residue.
pub const DYNAMIC_PSEUDO_CLASSES: [&str; 8] = [
    ":focus-visible",
    ":focus-within",
    ":hover",
    ":focus",
    ":active",
    ":visited",
    ":disabled",
    ":checked",
];

/// Split a selector list on top-level commas, trimming each part.
pub fn split_selectors(selector: &str) -> Vec<&str> {
    split_top_level(selector, ',')
        .into_iter()
        .map(str::trim)
        .collect()
}

/// Whether the selector targets an interaction state.
pub fn has_dynamic_pseudo(selector: &str) -> bool {
    DYNAMIC_PSEUDO_CLASSES
        .iter()
        .any(|pseudo| selector.contains(pseudo))
}

/// Remove interactive pseudo-classes from a selector.
pub fn strip_dynamic_pseudos(selector: &str) -> String {
    let mut stripped = selector.to_owned();
    for pseudo in DYNAMIC_PSEUDO_CLASSES {
        if stripped.contains(pseudo) {
            stripped = stripped.replace(pseudo, "");
        }
    }
    stripped.trim().to_owned()
}

/// Remove BEM `--modifier` suffixes and collapse chained class
/// selectors (`.a.b.c` → `.a`).
pub fn strip_class_modifiers(selector: &str) -> String {
    let without_modifiers = remove_modifier_suffixes(selector);
    collapse_chained_classes(&without_modifiers).trim().to_owned()
}

fn is_name_char(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_' || character == '-'
}

fn name_length(text: &str) -> usize {
    text.find(|c: char| !is_name_char(c)).unwrap_or(text.len())
}

fn remove_modifier_suffixes(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut rest = selector;
    while let Some(position) = rest.find("--") {
        out.push_str(&rest[..position]);
        let tail = &rest[position + 2..];
        let length = name_length(tail);
        if length == 0 {
            // a bare `--` with no modifier name is not a modifier
            out.push_str("--");
        }
        rest = &tail[length..];
    }
    out.push_str(rest);
    out
}

fn collapse_chained_classes(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut rest = selector;
    loop {
        let Some(position) = rest.find('.') else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..position]);
        out.push('.');
        let tail = &rest[position + 1..];
        let length = name_length(tail);
        out.push_str(&tail[..length]);
        rest = &tail[length..];
        if length == 0 {
            continue;
        }
        // drop any directly chained .classes
        while let Some(chained) = rest.strip_prefix('.') {
            let chained_length = name_length(chained);
            if chained_length == 0 {
                break;
            }
            rest = &chained[chained_length..];
        }
    }
}
