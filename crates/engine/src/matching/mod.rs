//! Range matcher: pairs each fluid declaration with its next override
//! at a wider breakpoint and records the resulting value range.

mod anchor;

pub use anchor::derive_anchor;

use crate::ValueTokenizer;
use crate::batch::DocumentProfile;
use crate::selectors::{has_dynamic_pseudo, split_selectors};
use fluid_model::{FluidData, FluidRange, FluidValue2D, RuleBatch, StyleRule};
use log::{trace, warn};

/// Walks batch sequences in document order and accumulates
/// [`FluidData`]. One matcher instance spans all sheets so the rule
/// counter stays strictly increasing across sheet boundaries.
pub struct RangeMatcher<'run> {
    profile: &'run DocumentProfile,
    tokenizer: &'run dyn ValueTokenizer,
    fluid_data: FluidData,
    order_id: usize,
}

impl<'run> RangeMatcher<'run> {
    pub fn new(profile: &'run DocumentProfile, tokenizer: &'run dyn ValueTokenizer) -> Self {
        Self {
            profile,
            tokenizer,
            fluid_data: FluidData::default(),
            order_id: 0,
        }
    }

    /// Process one sheet's batch sequence.
    pub fn process_sheet(&mut self, batches: &[RuleBatch<'_>]) {
        for (batch_index, batch) in batches.iter().enumerate() {
            for &rule in &batch.rules {
                self.process_rule(batches, batch_index, rule);
            }
        }
    }

    /// Consume the matcher and return the accumulated fluid data.
    pub fn finish(self) -> FluidData {
        self.fluid_data
    }

    /// Rules processed so far, across every sheet handed to
    /// [`Self::process_sheet`].
    pub fn rules_processed(&self) -> usize {
        self.order_id
    }

    fn process_rule(&mut self, batches: &[RuleBatch<'_>], batch_index: usize, rule: &StyleRule) {
        for selector in split_selectors(&rule.selector) {
            let is_dynamic = has_dynamic_pseudo(selector) || rule.is_flagged_dynamic();
            for (property, min_value) in &rule.style {
                self.process_declaration(
                    batches,
                    batch_index,
                    selector,
                    property,
                    min_value,
                    is_dynamic,
                );
            }
        }
        // one increment per style rule, not per declaration
        self.order_id += 1;
    }

    #[allow(clippy::too_many_arguments)]
    fn process_declaration(
        &mut self,
        batches: &[RuleBatch<'_>],
        batch_index: usize,
        selector: &str,
        property: &str,
        min_value: &str,
        is_dynamic: bool,
    ) {
        // no override at a wider breakpoint means no range; that is
        // the normal case for most declarations, not an error
        let Some((max_value, max_width)) = find_override(batches, batch_index, selector, property)
        else {
            return;
        };

        let min_width = batches[batch_index].width;
        let Some(min_bp_index) = self.lookup_breakpoint(min_width, selector, property) else {
            return;
        };
        let Some(max_bp_index) = self.lookup_breakpoint(max_width, selector, property) else {
            return;
        };

        let Some(min_tokens) = self.tokenize(min_value, selector, property) else {
            return;
        };
        let Some(max_tokens) = self.tokenize(max_value, selector, property) else {
            return;
        };

        let anchor = derive_anchor(selector, is_dynamic);
        trace!(
            "range for {selector} / {property}: {min_width}px -> {max_width}px (anchor {anchor})"
        );
        self.fluid_data.insert_range(
            &anchor,
            selector,
            property,
            self.order_id,
            FluidRange {
                min_value: min_tokens,
                max_value: max_tokens,
                min_bp_index,
                max_bp_index,
            },
        );
    }

    fn lookup_breakpoint(&self, width: u32, selector: &str, property: &str) -> Option<usize> {
        let index = self.profile.breakpoint_index(width);
        if index.is_none() {
            warn!(
                "batch width {width}px missing from breakpoint table; \
                 dropping range for {selector} / {property}"
            );
        }
        index
    }

    fn tokenize(&self, value: &str, selector: &str, property: &str) -> Option<FluidValue2D> {
        match self.tokenizer.tokenize(value) {
            Ok(tokens) => Some(tokens),
            Err(error) => {
                warn!("cannot tokenize `{value}` for {selector} / {property}: {error}");
                None
            }
        }
    }
}

/// Scan forward through the batches after `batch_index` for the first
/// media-batch rule that lists `selector` verbatim and redeclares
/// `property`. The first hit wins; later batches are never consulted
/// for this declaration.
fn find_override<'doc>(
    batches: &[RuleBatch<'doc>],
    batch_index: usize,
    selector: &str,
    property: &str,
) -> Option<(&'doc str, u32)> {
    for batch in &batches[batch_index + 1..] {
        if !batch.is_media_query {
            continue;
        }
        for &rule in &batch.rules {
            if !split_selectors(&rule.selector).contains(&selector) {
                continue;
            }
            if let Some(value) = rule.style.get(property) {
                return Some((value.as_str(), batch.width));
            }
        }
    }
    None
}
