//! CSS value tokenizer.
//!
//! A raw value string becomes a 2-D tree: groups split on top-level
//! commas, atoms split on top-level spaces, both splits tracking
//! parenthesis depth so `min(2rem, 0px)` is never split internally.
//! Each atom is read with `cssparser`; a unitless number defaults to
//! `px`.

use crate::ValueTokenizer;
use cssparser::{Parser, ParserInput, Token};
use fluid_model::{FluidValue, FluidValue2D};
use std::fmt;

/// Why an atom could not be turned into a numeric value.
///
/// An atom that is itself a function call (`min(...)` as a whole
/// token) is rejected rather than flattened: the `Func` value variant
/// stays reserved until nested tokenization is specified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The value (or one comma group) contained no atoms.
    Empty,
    /// The atom is a function call kept opaque by the tokenizer.
    OpaqueFunction(String),
    /// The atom does not start with a numeric token.
    NotNumeric(String),
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty value"),
            Self::OpaqueFunction(name) => {
                write!(f, "function value `{name}(...)` is not tokenized")
            }
            Self::NotNumeric(atom) => write!(f, "non-numeric value token `{atom}`"),
        }
    }
}

impl std::error::Error for ValueError {}

/// Split `value` on `separator`, ignoring separators nested inside
/// parentheses. The returned slices cover the whole input.
pub fn split_top_level(value: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0u32;
    let mut start = 0;
    for (index, character) in value.char_indices() {
        match character {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if character == separator && depth == 0 => {
                parts.push(&value[start..index]);
                start = index + character.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&value[start..]);
    parts
}

/// Split a value into space-separated atoms, parenthesis-aware.
/// Whitespace runs yield no empty atoms.
pub fn split_by_spaces(value: &str) -> Vec<&str> {
    split_top_level(value, ' ')
        .into_iter()
        .map(str::trim)
        .filter(|atom| !atom.is_empty())
        .collect()
}

/// Parse one atomic token into a numeric value plus unit.
pub fn parse_fluid_value(atom: &str) -> Result<FluidValue, ValueError> {
    let trimmed = atom.trim();
    if trimmed.is_empty() {
        return Err(ValueError::Empty);
    }
    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);
    match parser.next() {
        Ok(Token::Dimension { value, unit, .. }) => Ok(FluidValue::single(*value, unit.as_ref())),
        Ok(Token::Number { value, .. }) => Ok(FluidValue::single(*value, "px")),
        Ok(Token::Percentage { unit_value, .. }) => {
            // the token only carries value/100; re-read the numeric
            // text so `33.3%` stays the literal 33.3 instead of a
            // round-trip through the divided f32
            let value = trimmed
                .strip_suffix('%')
                .and_then(parse_scalar)
                .unwrap_or(unit_value * 100.0);
            Ok(FluidValue::single(value, "%"))
        }
        Ok(Token::Function(name)) => Err(ValueError::OpaqueFunction(name.as_ref().to_owned())),
        Ok(_) | Err(_) => Err(ValueError::NotNumeric(trimmed.to_owned())),
    }
}

fn parse_scalar(text: &str) -> Option<f32> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    match parser.next() {
        Ok(Token::Number { value, .. }) => Some(*value),
        _ => None,
    }
}

/// Parse one comma group into its ordered atoms.
pub fn parse_fluid_value_1d(group: &str) -> Result<Vec<FluidValue>, ValueError> {
    let atoms = split_by_spaces(group);
    if atoms.is_empty() {
        return Err(ValueError::Empty);
    }
    atoms.into_iter().map(parse_fluid_value).collect()
}

/// Parse a full value string into its comma groups.
pub fn parse_fluid_value_2d(value: &str) -> Result<FluidValue2D, ValueError> {
    split_top_level(value, ',')
        .into_iter()
        .map(parse_fluid_value_1d)
        .collect()
}

/// The default tokenizer stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTokenizer;

impl ValueTokenizer for DefaultTokenizer {
    fn tokenize(&self, value: &str) -> Result<FluidValue2D, ValueError> {
        parse_fluid_value_2d(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_atoms() {
        assert_eq!(
            parse_fluid_value("10px").unwrap(),
            FluidValue::single(10.0, "px")
        );
        assert_eq!(
            parse_fluid_value("2.2rem").unwrap(),
            FluidValue::single(2.2, "rem")
        );
        assert_eq!(
            parse_fluid_value("50%").unwrap(),
            FluidValue::single(50.0, "%")
        );
        assert_eq!(parse_fluid_value("7").unwrap(), FluidValue::single(7.0, "px"));
        assert_eq!(
            parse_fluid_value("-4px").unwrap(),
            FluidValue::single(-4.0, "px")
        );
    }

    #[test]
    fn percentages_keep_their_literal_value() {
        assert_eq!(
            parse_fluid_value("33.3%").unwrap(),
            FluidValue::single(33.3, "%")
        );
        assert_eq!(
            parse_fluid_value("12.7%").unwrap(),
            FluidValue::single(12.7, "%")
        );
        assert_eq!(
            parse_fluid_value("-0.5%").unwrap(),
            FluidValue::single(-0.5, "%")
        );
    }

    #[test]
    fn rejects_non_numeric_atoms() {
        assert_eq!(
            parse_fluid_value("auto"),
            Err(ValueError::NotNumeric("auto".to_owned()))
        );
        assert_eq!(
            parse_fluid_value("min(2rem, 0px)"),
            Err(ValueError::OpaqueFunction("min".to_owned()))
        );
        assert_eq!(parse_fluid_value("  "), Err(ValueError::Empty));
    }

    #[test]
    fn splits_one_dimension() {
        assert_eq!(
            parse_fluid_value_1d("10px 20px").unwrap(),
            vec![FluidValue::single(10.0, "px"), FluidValue::single(20.0, "px")]
        );
        assert_eq!(
            parse_fluid_value_1d("2.2rem 3.3rem").unwrap(),
            vec![
                FluidValue::single(2.2, "rem"),
                FluidValue::single(3.3, "rem")
            ]
        );
    }

    #[test]
    fn splits_two_dimensions() {
        assert_eq!(
            parse_fluid_value_2d("10px 20px, 30px 40px").unwrap(),
            vec![
                vec![FluidValue::single(10.0, "px"), FluidValue::single(20.0, "px")],
                vec![FluidValue::single(30.0, "px"), FluidValue::single(40.0, "px")],
            ]
        );
    }

    #[test]
    fn space_split_respects_nesting() {
        let atoms = split_by_spaces("10px min(max(20rem, 15rem), 30px) max(40px, 50px)");
        assert_eq!(
            atoms,
            vec!["10px", "min(max(20rem, 15rem), 30px)", "max(40px, 50px)"]
        );
    }

    #[test]
    fn comma_split_respects_nesting() {
        let groups = split_top_level("min(1px, 2px), 3px", ',');
        assert_eq!(groups, vec!["min(1px, 2px)", " 3px"]);
    }

    #[test]
    fn double_spaces_yield_no_empty_atoms() {
        assert_eq!(split_by_spaces("1px  2px"), vec!["1px", "2px"]);
    }

    #[test]
    fn empty_group_is_an_error() {
        assert_eq!(parse_fluid_value_2d("10px, "), Err(ValueError::Empty));
    }
}
