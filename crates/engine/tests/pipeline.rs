//! End-to-end pipeline tests over in-code raw documents.

use fluid_engine::{FluidEngine, ParseResult, parse_document};
use fluid_model::{
    Declaration, FluidValue, IS_DYNAMIC_FLAG, RawDocument, RawMediaRule, RawRule, RawStyleRule,
    RawStyleSheet,
};
use std::collections::BTreeMap;

fn style(selector: &str, declarations: &[(&str, &str)]) -> RawRule {
    RawRule::Style(RawStyleRule {
        selector_text: selector.to_owned(),
        declarations: declarations
            .iter()
            .map(|(name, value)| Declaration::new(*name, *value))
            .collect(),
        special: BTreeMap::new(),
    })
}

fn media(condition: &str, rules: Vec<RawRule>) -> RawRule {
    RawRule::Media(RawMediaRule {
        condition_text: condition.to_owned(),
        rules,
    })
}

fn sheet(rules: Vec<RawRule>) -> RawStyleSheet {
    RawStyleSheet { rules: Some(rules) }
}

fn document(sheets: Vec<RawStyleSheet>) -> RawDocument {
    RawDocument { sheets }
}

fn parse(sheets: Vec<RawStyleSheet>) -> ParseResult {
    let _ = env_logger::builder().is_test(true).try_init();
    parse_document(&document(sheets))
}

#[test]
fn single_breakpoint_range() {
    let result = parse(vec![sheet(vec![
        style(".card", &[("max-width", "24.5rem")]),
        media(
            "(min-width: 600px)",
            vec![style(".card", &[("max-width", "42.85rem")])],
        ),
    ])]);

    assert_eq!(result.breakpoints, vec![375, 600]);
    let property = result
        .fluid_data
        .get(".card", ".card", "max-width")
        .expect("range for .card/max-width");
    assert_eq!(property.ranges.len(), 1);
    let range = &property.ranges[0];
    assert_eq!(range.min_value, vec![vec![FluidValue::single(24.5, "rem")]]);
    assert_eq!(range.max_value, vec![vec![FluidValue::single(42.85, "rem")]]);
    assert_eq!(range.min_bp_index, 0);
    assert_eq!(range.max_bp_index, 1);
}

#[test]
fn first_qualifying_override_wins() {
    let result = parse(vec![sheet(vec![
        style(".card", &[("max-width", "20rem")]),
        media(
            "(min-width: 600px)",
            vec![style(".card", &[("max-width", "30rem")])],
        ),
        media(
            "(min-width: 900px)",
            vec![style(".card", &[("max-width", "40rem")])],
        ),
    ])]);

    let property = result.fluid_data.get(".card", ".card", "max-width").unwrap();
    // the baseline declaration pairs with 600px only; the 600px
    // declaration then chains to 900px with its own range
    assert_eq!(property.ranges.len(), 2);
    assert_eq!(property.ranges[0].min_bp_index, 0);
    assert_eq!(property.ranges[0].max_bp_index, 1);
    assert_eq!(property.ranges[1].min_bp_index, 1);
    assert_eq!(property.ranges[1].max_bp_index, 2);
}

#[test]
fn anchor_collapses_modifier_and_interaction_variants() {
    let result = parse(vec![sheet(vec![
        style(".btn--primary:hover", &[("font-size", "1rem")]),
        style(".btn--secondary:hover", &[("font-size", "1.1rem")]),
        media(
            "(min-width: 600px)",
            vec![
                style(".btn--primary:hover", &[("font-size", "2rem")]),
                style(".btn--secondary:hover", &[("font-size", "2.2rem")]),
            ],
        ),
    ])]);

    let anchor = result
        .fluid_data
        .anchors
        .get(".btn")
        .expect("both variants grouped under .btn");
    assert_eq!(anchor.len(), 2);
    assert!(anchor.contains_key(".btn--primary:hover"));
    assert!(anchor.contains_key(".btn--secondary:hover"));
}

#[test]
fn explicit_dynamic_flag_strips_modifiers() {
    let mut rule = RawStyleRule {
        selector_text: ".promo--big".to_owned(),
        declarations: vec![Declaration::new("width", "10rem")],
        special: BTreeMap::new(),
    };
    rule.special
        .insert(IS_DYNAMIC_FLAG.to_owned(), "true".to_owned());

    let result = parse(vec![sheet(vec![
        RawRule::Style(rule),
        media(
            "(min-width: 600px)",
            vec![style(".promo--big", &[("width", "20rem")])],
        ),
    ])]);

    assert!(
        result
            .fluid_data
            .get(".promo", ".promo--big", "width")
            .is_some()
    );
}

#[test]
fn comma_selectors_match_individually() {
    let result = parse(vec![sheet(vec![
        style("h1, h2", &[("font-size", "2rem")]),
        media(
            "(min-width: 600px)",
            vec![style("h1", &[("font-size", "3rem")])],
        ),
    ])]);

    assert!(result.fluid_data.get("h1", "h1", "font-size").is_some());
    assert!(result.fluid_data.get("h2", "h2", "font-size").is_none());
}

#[test]
fn shorthands_and_zeros_flow_through() {
    let result = parse(vec![sheet(vec![
        style(".box", &[("margin", "0")]),
        media(
            "(min-width: 600px)",
            vec![style(".box", &[("margin", "10px 20px")])],
        ),
    ])]);

    let top = result.fluid_data.get(".box", ".box", "margin-top").unwrap();
    assert_eq!(
        top.ranges[0].min_value,
        vec![vec![FluidValue::single(0.0, "px")]]
    );
    assert_eq!(
        top.ranges[0].max_value,
        vec![vec![FluidValue::single(10.0, "px")]]
    );
    let left = result.fluid_data.get(".box", ".box", "margin-left").unwrap();
    assert_eq!(
        left.ranges[0].max_value,
        vec![vec![FluidValue::single(20.0, "px")]]
    );
}

#[test]
fn normalized_selectors_match_across_batches() {
    let result = parse(vec![sheet(vec![
        style("*::before,\n*::after", &[("letter-spacing", "0.1em")]),
        media(
            "(min-width: 600px)",
            vec![style("::before, ::after", &[("letter-spacing", "0.2em")])],
        ),
    ])]);

    assert!(
        result
            .fluid_data
            .get("::before", "::before", "letter-spacing")
            .is_some()
    );
    assert!(
        result
            .fluid_data
            .get("::after", "::after", "letter-spacing")
            .is_some()
    );
}

#[test]
fn order_ids_continue_across_sheets() {
    let result = parse(vec![
        sheet(vec![
            style(".a", &[("width", "1px")]),
            style(".b", &[("width", "2px")]),
        ]),
        sheet(vec![
            style(".c", &[("width", "3px")]),
            media(
                "(min-width: 600px)",
                vec![style(".c", &[("width", "4px")])],
            ),
        ]),
    ]);

    let property = result.fluid_data.get(".c", ".c", "width").unwrap();
    assert_eq!(property.meta.order_id, 2);
}

#[test]
fn baseline_marker_widens_breakpoint_table() {
    let result = parse(vec![sheet(vec![
        media("(min-width: 320px)", vec![]),
        style(".card", &[("width", "10rem")]),
        media(
            "(min-width: 600px)",
            vec![style(".card", &[("width", "20rem")])],
        ),
    ])]);

    assert_eq!(result.breakpoints, vec![320, 600]);
    let range = &result.fluid_data.get(".card", ".card", "width").unwrap().ranges[0];
    assert_eq!(range.min_bp_index, 0);
    assert_eq!(range.max_bp_index, 1);
}

#[test]
fn multi_axis_values_keep_their_structure() {
    let result = parse(vec![sheet(vec![
        style(".grid", &[("grid-template-columns", "10px 20px")]),
        media(
            "(min-width: 600px)",
            vec![style(".grid", &[("grid-template-columns", "30px 40px")])],
        ),
    ])]);

    let range = &result
        .fluid_data
        .get(".grid", ".grid", "grid-template-columns")
        .unwrap()
        .ranges[0];
    assert_eq!(
        range.min_value,
        vec![vec![
            FluidValue::single(10.0, "px"),
            FluidValue::single(20.0, "px")
        ]]
    );
}

#[test]
fn result_serializes_hierarchically() {
    let result = parse(vec![sheet(vec![
        style(".card", &[("width", "10rem")]),
        media(
            "(min-width: 600px)",
            vec![style(".card", &[("width", "20rem")])],
        ),
    ])]);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["breakpoints"], serde_json::json!([375, 600]));
    let property = &json["fluid_data"][".card"][".card"]["width"];
    assert_eq!(property["meta"]["property"], "width");
    assert_eq!(property["ranges"][0]["min_bp_index"], 0);
    assert_eq!(
        property["ranges"][0]["min_value"][0][0],
        serde_json::json!({ "type": "single", "value": 10.0, "unit": "rem" })
    );
}

#[test]
fn engine_accepts_injected_stages() {
    struct UppercaseUnits;
    impl fluid_engine::ValueTokenizer for UppercaseUnits {
        fn tokenize(
            &self,
            value: &str,
        ) -> Result<fluid_model::FluidValue2D, fluid_engine::ValueError> {
            let tokens = fluid_engine::value::parse_fluid_value_2d(value)?;
            Ok(tokens
                .into_iter()
                .map(|group| {
                    group
                        .into_iter()
                        .map(|token| match token {
                            FluidValue::Single { value, unit } => FluidValue::Single {
                                value,
                                unit: unit.to_uppercase(),
                            },
                            FluidValue::Func => FluidValue::Func,
                        })
                        .collect()
                })
                .collect())
        }
    }

    let engine = FluidEngine::new().with_tokenizer(Box::new(UppercaseUnits));
    let result = engine.parse(&document(vec![sheet(vec![
        style(".card", &[("width", "10rem")]),
        media(
            "(min-width: 600px)",
            vec![style(".card", &[("width", "20rem")])],
        ),
    ])]));

    let range = &result.fluid_data.get(".card", ".card", "width").unwrap().ranges[0];
    assert_eq!(range.min_value, vec![vec![FluidValue::single(10.0, "REM")]]);
}
