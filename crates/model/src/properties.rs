//! Property tables: the fluid allow-list and shorthand expansion maps.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// CSS length/percentage units recognized during value normalization.
pub const LENGTH_UNITS: [&str; 15] = [
    "px", "em", "rem", "%", "vh", "vw", "vmin", "vmax", "ch", "ex", "cm", "mm", "in", "pt", "pc",
];

/// Properties eligible to scale continuously with viewport width.
/// Declarations outside this set are dropped at normalization.
pub static FLUID_PROPERTIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "font-size",
        "line-height",
        "letter-spacing",
        "word-spacing",
        "text-indent",
        "width",
        "min-width",
        "max-width",
        "height",
        "min-height",
        "max-height",
        "grid-template-columns",
        "grid-template-rows",
        "background-position-x",
        "background-position-y",
        "padding",
        "padding-top",
        "padding-right",
        "padding-bottom",
        "padding-left",
        "margin",
        "margin-top",
        "margin-right",
        "margin-bottom",
        "margin-left",
        "border-radius",
        "border-top-left-radius",
        "border-top-right-radius",
        "border-bottom-right-radius",
        "border-bottom-left-radius",
        "gap",
        "column-gap",
        "row-gap",
        "--fluid-bg-size",
        "top",
        "left",
        "right",
        "bottom",
        "object-position",
    ])
});

/// Longhand targets for one shorthand, keyed by the number of
/// space-separated value tokens. The outer `Vec` is indexed by token
/// position; a position past the end of the list has no mapped
/// longhands and its token is dropped.
pub type ShorthandMap = HashMap<usize, Vec<Vec<&'static str>>>;

/// Shorthand expansion table following the 1/2/3/4-value CSS box
/// conventions.
pub static SHORTHAND_PROPERTIES: Lazy<HashMap<&'static str, ShorthandMap>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(
        "padding",
        sides(
            "padding-top",
            "padding-right",
            "padding-bottom",
            "padding-left",
        ),
    );
    table.insert(
        "margin",
        sides("margin-top", "margin-right", "margin-bottom", "margin-left"),
    );
    table.insert(
        "border",
        sides("border-top", "border-right", "border-bottom", "border-left"),
    );
    table.insert(
        "border-radius",
        corners(
            "border-top-left-radius",
            "border-top-right-radius",
            "border-bottom-right-radius",
            "border-bottom-left-radius",
        ),
    );
    table.insert("gap", HashMap::from([(1, vec![vec!["column-gap", "row-gap"]])]));
    table.insert(
        "background-position",
        HashMap::from([(
            2,
            vec![vec!["background-position-x", "background-position-y"]],
        )]),
    );
    table
});

/// Per-position longhand lists for `property` at `token_count` tokens.
pub fn shorthand_positions(property: &str, token_count: usize) -> Option<&'static Vec<Vec<&'static str>>> {
    SHORTHAND_PROPERTIES.get(property)?.get(&token_count)
}

/// Top/right/bottom/left expansion (padding, margin, border).
fn sides(
    top: &'static str,
    right: &'static str,
    bottom: &'static str,
    left: &'static str,
) -> ShorthandMap {
    HashMap::from([
        (1, vec![vec![top, right, bottom, left]]),
        (2, vec![vec![top, bottom], vec![right, left]]),
        (3, vec![vec![top], vec![right, left], vec![bottom]]),
        (4, vec![vec![top], vec![right], vec![bottom], vec![left]]),
    ])
}

/// Corner expansion (border-radius): the two-value diagonal pairing.
fn corners(
    top_left: &'static str,
    top_right: &'static str,
    bottom_right: &'static str,
    bottom_left: &'static str,
) -> ShorthandMap {
    HashMap::from([
        (1, vec![vec![top_left, top_right, bottom_right, bottom_left]]),
        (2, vec![vec![top_left, bottom_right], vec![top_right, bottom_left]]),
        (
            3,
            vec![
                vec![top_left],
                vec![top_right, bottom_left],
                vec![bottom_right],
            ],
        ),
        (
            4,
            vec![
                vec![top_left],
                vec![top_right],
                vec![bottom_right],
                vec![bottom_left],
            ],
        ),
    ])
}
