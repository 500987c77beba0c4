//! Output model: fluid ranges grouped by anchor selector.

use crate::document::StyleRule;
use serde::Serialize;
use std::collections::BTreeMap;

/// One atomic CSS value token.
///
/// The tokenizer only ever yields `Single`; `Func` is reserved for
/// function-call values kept as one opaque token. It is part of the
/// data model for forward compatibility but is never constructed —
/// function-call atoms are rejected during tokenization instead of
/// being silently flattened to a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FluidValue {
    Single { value: f32, unit: String },
    Func,
}

impl FluidValue {
    pub fn single(value: f32, unit: impl Into<String>) -> Self {
        Self::Single {
            value,
            unit: unit.into(),
        }
    }
}

/// A tokenized value: outer list split on top-level commas, inner
/// lists split on top-level spaces.
pub type FluidValue2D = Vec<Vec<FluidValue>>;

/// One interpolation segment: the value at a lower breakpoint, its
/// override at a higher one, and the indices of both widths in the
/// document's breakpoint table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FluidRange {
    pub min_value: FluidValue2D,
    pub max_value: FluidValue2D,
    pub min_bp_index: usize,
    pub max_bp_index: usize,
}

/// Per-property metadata, fixed at the first range insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyMeta {
    /// Document-order index of the style rule that first produced a
    /// range for this property. Strictly increasing across all sheets.
    pub order_id: usize,
    pub property: String,
}

/// All ranges discovered for one property under one selector.
///
/// Ranges are appended in discovery order and never reordered or
/// merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyData {
    pub meta: PropertyMeta,
    pub ranges: Vec<FluidRange>,
}

/// The final fluid-data map: anchor selector → full selector →
/// property name → [`PropertyData`].
///
/// `BTreeMap` keeps serialization deterministic; document order is
/// recoverable through [`PropertyMeta::order_id`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FluidData {
    pub anchors: BTreeMap<String, BTreeMap<String, BTreeMap<String, PropertyData>>>,
}

impl FluidData {
    /// Append a range under `anchor`/`selector`/`property`, creating
    /// intermediate maps as needed. Metadata is initialized on the
    /// first insertion for the property and left untouched afterwards.
    pub fn insert_range(
        &mut self,
        anchor: &str,
        selector: &str,
        property: &str,
        order_id: usize,
        range: FluidRange,
    ) {
        self.anchors
            .entry(anchor.to_owned())
            .or_default()
            .entry(selector.to_owned())
            .or_default()
            .entry(property.to_owned())
            .or_insert_with(|| PropertyData {
                meta: PropertyMeta {
                    order_id,
                    property: property.to_owned(),
                },
                ranges: Vec::new(),
            })
            .ranges
            .push(range);
    }

    /// Look up the property data for an exact anchor/selector/property
    /// triple.
    pub fn get(&self, anchor: &str, selector: &str, property: &str) -> Option<&PropertyData> {
        self.anchors.get(anchor)?.get(selector)?.get(property)
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// A run of style rules sharing one effective viewport width.
///
/// Batches borrow their rules from the canonical [`Document`]; nothing
/// downstream mutates them.
///
/// [`Document`]: crate::document::Document
#[derive(Debug, Clone)]
pub struct RuleBatch<'doc> {
    pub rules: Vec<&'doc StyleRule>,
    pub width: u32,
    pub is_media_query: bool,
}
