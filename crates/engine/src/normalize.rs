//! Normalizer: raw style-sheet input → canonical [`Document`].
//!
//! Normalization keeps only style and `min-width` media rules, filters
//! declarations against the fluid-property allow-list, expands
//! shorthands, rewrites bare zeros to `0px`, and canonicalizes
//! selector text. Everything it drops is dropped silently; that is the
//! contract, not an error path.

use crate::DocumentNormalizer;
use crate::value::split_by_spaces;
use cssparser::{Parser, ParserInput, Token};
use fluid_model::{
    Declaration, Document, FLUID_PROPERTIES, LENGTH_UNITS, MediaRule, RawDocument, RawMediaRule,
    RawRule, RawStyleRule, Rule, SHORTHAND_PROPERTIES, StyleRule, StyleSheet, shorthand_positions,
};
use std::collections::BTreeMap;

/// The default normalization stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNormalizer;

impl DocumentNormalizer for DefaultNormalizer {
    fn normalize(&self, raw: &RawDocument) -> Document {
        normalize_document(raw)
    }
}

/// Normalize a whole raw document. Unreadable sheets are skipped.
pub fn normalize_document(raw: &RawDocument) -> Document {
    let sheets = raw
        .sheets
        .iter()
        .filter_map(|sheet| sheet.rules.as_deref())
        .map(normalize_sheet)
        .collect();
    Document { sheets }
}

fn normalize_sheet(rules: &[RawRule]) -> StyleSheet {
    StyleSheet {
        rules: rules.iter().filter_map(normalize_rule).collect(),
    }
}

fn normalize_rule(rule: &RawRule) -> Option<Rule> {
    match rule {
        RawRule::Style(style) => normalize_style_rule(style).map(Rule::Style),
        RawRule::Media(media) => normalize_media_rule(media).map(Rule::Media),
        RawRule::Unsupported { .. } => None,
    }
}

/// Normalize one style rule. Returns `None` when no declaration
/// survives the allow-list filter; such rules contribute nothing
/// downstream.
fn normalize_style_rule(rule: &RawStyleRule) -> Option<StyleRule> {
    let style = build_style(&rule.declarations);
    if style.is_empty() {
        return None;
    }
    Some(StyleRule {
        selector: normalize_selector(&rule.selector_text),
        style,
        special: rule.special.clone(),
    })
}

fn build_style(declarations: &[Declaration]) -> BTreeMap<String, String> {
    let mut style = BTreeMap::new();
    for declaration in declarations {
        let property = declaration.name.as_str();
        if !FLUID_PROPERTIES.contains(property) {
            continue;
        }
        if SHORTHAND_PROPERTIES.contains_key(property) {
            if declaration.value.is_empty() {
                continue;
            }
            for (longhand, token) in expand_shorthand(property, &declaration.value) {
                style.insert(longhand, normalize_zero(&token));
            }
        } else {
            style.insert(property.to_owned(), normalize_zero(&declaration.value));
        }
    }
    style
}

/// Keep a media rule only when its condition carries a
/// `min-width: <integer>px` term. A kept rule with zero nested style
/// rules survives as the baseline-width marker.
fn normalize_media_rule(rule: &RawMediaRule) -> Option<MediaRule> {
    let min_width = min_width_from_condition(&rule.condition_text)?;
    let rules = rule
        .rules
        .iter()
        .filter_map(|nested| match nested {
            RawRule::Style(style) => normalize_style_rule(style),
            RawRule::Media(_) | RawRule::Unsupported { .. } => None,
        })
        .collect();
    Some(MediaRule { min_width, rules })
}

/// Extract the first integer-pixel `min-width` from media condition
/// text, scanning nested condition groups as well.
pub fn min_width_from_condition(condition: &str) -> Option<u32> {
    let mut input = ParserInput::new(condition);
    let mut parser = Parser::new(&mut input);
    scan_min_width(&mut parser)
}

fn scan_min_width<'i>(parser: &mut Parser<'i, '_>) -> Option<u32> {
    let mut after_ident = false;
    let mut after_colon = false;
    loop {
        let token = match parser.next() {
            Ok(token) => token.clone(),
            Err(_) => return None,
        };
        match token {
            Token::Ident(ref name) if name.eq_ignore_ascii_case("min-width") => {
                after_ident = true;
                after_colon = false;
                continue;
            }
            Token::Colon if after_ident => {
                after_colon = true;
                continue;
            }
            Token::Dimension {
                int_value: Some(width),
                ref unit,
                ..
            } if after_colon && width >= 0 && unit.eq_ignore_ascii_case("px") => {
                return Some(width as u32);
            }
            Token::ParenthesisBlock | Token::Function(_) => {
                let nested = parser
                    .parse_nested_block(|block| {
                        Ok::<_, cssparser::ParseError<'i, ()>>(scan_min_width(block))
                    })
                    .unwrap_or(None);
                if nested.is_some() {
                    return nested;
                }
            }
            _ => {}
        }
        after_ident = false;
        after_colon = false;
    }
}

/// Expand a shorthand value into its longhand components using the
/// (property, token count, position) table. Tokens at unmapped
/// positions are dropped.
pub fn expand_shorthand(property: &str, value: &str) -> BTreeMap<String, String> {
    let tokens = split_by_spaces(value);
    let mut expanded = BTreeMap::new();
    if let Some(positions) = shorthand_positions(property, tokens.len()) {
        for (index, token) in tokens.iter().enumerate() {
            if let Some(longhands) = positions.get(index) {
                for longhand in longhands {
                    expanded.insert((*longhand).to_owned(), (*token).to_owned());
                }
            }
        }
    }
    expanded
}

/// Rewrite every bare zero token (`0`, `0.0`, ...) to `0px`, leaving
/// zeros that already carry a recognized length/percentage unit and
/// all non-zero numerals untouched. Works at any nesting depth since
/// it never needs to track parentheses.
pub fn normalize_zero(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 8);
    let mut iter = value.char_indices().peekable();
    let mut prev_numeric = false;
    while let Some((start, character)) = iter.next() {
        let numeric = character.is_ascii_digit() || character == '.';
        if numeric && !prev_numeric {
            let mut end = start + character.len_utf8();
            while let Some(&(_, next)) = iter.peek() {
                if next.is_ascii_digit() || next == '.' {
                    end += next.len_utf8();
                    iter.next();
                } else {
                    break;
                }
            }
            let run = &value[start..end];
            if is_bare_zero(run) && !has_unit_suffix(&value[end..]) {
                out.push_str("0px");
            } else {
                out.push_str(run);
            }
            prev_numeric = true;
            continue;
        }
        out.push(character);
        prev_numeric = numeric;
    }
    out
}

/// `0`, `00`, `0.0`, `0.000`, ... — zeros with nothing else.
fn is_bare_zero(run: &str) -> bool {
    let (integer, fraction) = run
        .split_once('.')
        .map_or((run, None), |(integer, fraction)| (integer, Some(fraction)));
    let all_zeros = |digits: &str| !digits.is_empty() && digits.bytes().all(|byte| byte == b'0');
    all_zeros(integer) && fraction.is_none_or(all_zeros)
}

fn has_unit_suffix(rest: &str) -> bool {
    LENGTH_UNITS.iter().any(|unit| {
        rest.strip_prefix(unit).is_some_and(|after| {
            *unit == "%"
                || !after
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        })
    })
}

/// Canonicalize selector text: `*::before`/`*::after` lose the
/// universal prefix, comma spacing becomes `", "`, whitespace runs
/// collapse to one space, ends are trimmed.
pub fn normalize_selector(selector: &str) -> String {
    let simplified = simplify_universal_pseudo(selector);
    let mut spaced = String::with_capacity(simplified.len());
    let mut chars = simplified.chars().peekable();
    while let Some(character) = chars.next() {
        if character == ',' {
            while spaced.chars().next_back().is_some_and(char::is_whitespace) {
                spaced.pop();
            }
            spaced.push_str(", ");
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
        } else {
            spaced.push(character);
        }
    }
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn simplify_universal_pseudo(selector: &str) -> String {
    let mut out = String::with_capacity(selector.len());
    let mut rest = selector;
    while let Some(position) = rest.find("*::") {
        out.push_str(&rest[..position]);
        let tail = &rest[position + 3..];
        if !is_universal_pseudo_element(tail) {
            out.push('*');
        }
        out.push_str("::");
        rest = tail;
    }
    out.push_str(rest);
    out
}

fn is_universal_pseudo_element(tail: &str) -> bool {
    ["before", "after"].iter().any(|name| {
        tail.strip_prefix(name).is_some_and(|after| {
            !after
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        })
    })
}
