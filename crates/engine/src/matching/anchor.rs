//! Anchor derivation: the selector key that groups ranges for
//! selectors representing the same visual element across interaction
//! states and BEM modifier variants.

use crate::selectors::{split_selectors, strip_class_modifiers, strip_dynamic_pseudos};

/// Derive the anchor for a single (non-comma) selector.
///
/// Dynamic declarations are stripped of BEM modifiers and interactive
/// pseudo-classes before anchoring, so `.btn--primary:hover` and
/// `.btn--secondary:hover` share the `.btn` anchor. The anchor is
/// always the trailing comma segment of the (possibly stripped)
/// selector — stripping can reintroduce a compound form, so the split
/// runs again here.
pub fn derive_anchor(selector: &str, is_dynamic: bool) -> String {
    let base = if is_dynamic {
        strip_dynamic_pseudos(&strip_class_modifiers(selector))
    } else {
        selector.to_owned()
    };
    split_selectors(&base)
        .last()
        .map_or_else(String::new, |segment| (*segment).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_selector_anchors_to_itself() {
        assert_eq!(derive_anchor(".card", false), ".card");
        assert_eq!(derive_anchor(".card .title", false), ".card .title");
    }

    #[test]
    fn modifier_variants_share_an_anchor() {
        assert_eq!(derive_anchor(".btn--primary:hover", true), ".btn");
        assert_eq!(derive_anchor(".btn--secondary:hover", true), ".btn");
        assert_eq!(derive_anchor(".btn:focus-visible", true), ".btn");
    }

    #[test]
    fn chained_classes_collapse_when_dynamic() {
        assert_eq!(derive_anchor(".a.b.c:hover", true), ".a");
    }
}
