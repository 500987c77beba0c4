//! Breakpoint batching: document profile plus per-sheet rule batches.
//!
//! A batch is a run of style rules that share one effective viewport
//! width. Top-level rules accumulate into baseline batches; every
//! non-empty media rule becomes its own batch. Batch order is document
//! order — downstream never sorts by width.

use crate::SheetBatcher;
use fluid_model::{Document, Rule, RuleBatch, StyleSheet};
use serde::Serialize;

/// Baseline viewport width assumed when no marker rule overrides it.
pub const DEFAULT_BASELINE_WIDTH: u32 = 375;

/// Document-wide facts gathered in one pass before matching: the
/// deduplicated breakpoint table and the global baseline width.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentProfile {
    /// Distinct media min-widths in first-appearance order, with the
    /// baseline width guaranteed present (inserted at the front when
    /// no media rule declares it).
    pub breakpoints: Vec<u32>,
    pub baseline_width: u32,
}

impl DocumentProfile {
    /// Position of `width` in the breakpoint table.
    pub fn breakpoint_index(&self, width: u32) -> Option<usize> {
        self.breakpoints.iter().position(|&entry| entry == width)
    }
}

/// Scan every sheet's top-level rules for media widths and the
/// baseline marker (an empty media rule overrides the baseline with
/// its min-width; the last marker wins).
pub fn profile_document(document: &Document) -> DocumentProfile {
    let mut breakpoints: Vec<u32> = Vec::new();
    let mut baseline_width = DEFAULT_BASELINE_WIDTH;
    for sheet in &document.sheets {
        for rule in &sheet.rules {
            if let Rule::Media(media) = rule {
                if !breakpoints.contains(&media.min_width) {
                    breakpoints.push(media.min_width);
                }
                if media.rules.is_empty() {
                    baseline_width = media.min_width;
                }
            }
        }
    }
    if !breakpoints.contains(&baseline_width) {
        breakpoints.insert(0, baseline_width);
    }
    DocumentProfile {
        breakpoints,
        baseline_width,
    }
}

/// The default batching stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBatcher;

impl SheetBatcher for DefaultBatcher {
    fn batch<'doc>(&self, sheet: &'doc StyleSheet, baseline_width: u32) -> Vec<RuleBatch<'doc>> {
        batch_sheet(sheet, baseline_width)
    }
}

/// Partition one sheet's top-level rules into ordered batches.
///
/// A media batch never absorbs the style rules that follow it; those
/// open a fresh baseline batch. Empty media rules (baseline markers)
/// produce no batch at all.
pub fn batch_sheet(sheet: &StyleSheet, baseline_width: u32) -> Vec<RuleBatch<'_>> {
    let mut batches = Vec::new();
    let mut baseline: Option<RuleBatch<'_>> = None;
    for rule in &sheet.rules {
        match rule {
            Rule::Style(style) => {
                baseline
                    .get_or_insert_with(|| RuleBatch {
                        rules: Vec::new(),
                        width: baseline_width,
                        is_media_query: false,
                    })
                    .rules
                    .push(style);
            }
            Rule::Media(media) => {
                if media.rules.is_empty() {
                    continue;
                }
                if let Some(open) = baseline.take() {
                    batches.push(open);
                }
                batches.push(RuleBatch {
                    rules: media.rules.iter().collect(),
                    width: media.min_width,
                    is_media_query: true,
                });
            }
        }
    }
    if let Some(open) = baseline.take() {
        batches.push(open);
    }
    batches
}
