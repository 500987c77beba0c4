//! Fluid CSS range extraction pipeline.
//!
//! Turns a raw style-sheet collection into a [`FluidData`] map that
//! records, per anchor selector, the numeric interpolation range of
//! every fluid property between the breakpoint where it is declared
//! and the breakpoint where it is next overridden.
//!
//! The pipeline has four stages, each behind a trait so callers can
//! swap implementations by construction (instrumented tokenizers in
//! tests, for example):
//! - [`normalize`] — raw input → canonical [`Document`],
//! - [`batch`] — document profile and per-sheet rule batches,
//! - [`value`] — CSS value string → unit-aware numeric tree,
//! - [`matching`] — the range matcher that produces [`FluidData`].

pub mod batch;
pub mod matching;
pub mod normalize;
pub mod selectors;
pub mod value;

use fluid_model::{Document, FluidData, FluidValue2D, RawDocument, RuleBatch, StyleSheet};
use serde::Serialize;

pub use batch::{DEFAULT_BASELINE_WIDTH, DefaultBatcher, DocumentProfile};
pub use matching::RangeMatcher;
pub use normalize::DefaultNormalizer;
pub use value::{DefaultTokenizer, ValueError};

/// Normalization stage: filters and canonicalizes raw style sheets.
pub trait DocumentNormalizer {
    fn normalize(&self, raw: &RawDocument) -> Document;
}

/// Batching stage: partitions one sheet's rules into width-tagged
/// batches.
pub trait SheetBatcher {
    fn batch<'doc>(&self, sheet: &'doc StyleSheet, baseline_width: u32) -> Vec<RuleBatch<'doc>>;
}

/// Tokenizing stage: raw CSS value string → 2-D numeric value tree.
pub trait ValueTokenizer {
    fn tokenize(&self, value: &str) -> Result<FluidValue2D, ValueError>;
}

/// Everything one parse pass produces: the document's breakpoint table
/// and the fluid-data map whose range indices point into it.
#[derive(Debug, Clone, Serialize)]
pub struct ParseResult {
    pub breakpoints: Vec<u32>,
    pub fluid_data: FluidData,
}

/// The assembled pipeline. [`FluidEngine::default`] wires the default
/// stage implementations; the `with_*` builders replace individual
/// stages.
pub struct FluidEngine {
    normalizer: Box<dyn DocumentNormalizer>,
    batcher: Box<dyn SheetBatcher>,
    tokenizer: Box<dyn ValueTokenizer>,
}

impl Default for FluidEngine {
    fn default() -> Self {
        Self {
            normalizer: Box::new(DefaultNormalizer),
            batcher: Box::new(DefaultBatcher),
            tokenizer: Box::new(DefaultTokenizer),
        }
    }
}

impl FluidEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalizer(mut self, normalizer: Box<dyn DocumentNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_batcher(mut self, batcher: Box<dyn SheetBatcher>) -> Self {
        self.batcher = batcher;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn ValueTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Run the full pipeline over a raw style-sheet collection.
    pub fn parse(&self, raw: &RawDocument) -> ParseResult {
        let document = self.normalizer.normalize(raw);
        self.parse_normalized(&document)
    }

    /// Run batching and matching over an already-canonical document.
    ///
    /// Sheets are processed strictly in order: the matcher's rule
    /// counter continues across sheet boundaries.
    pub fn parse_normalized(&self, document: &Document) -> ParseResult {
        let profile = batch::profile_document(document);
        let mut matcher = RangeMatcher::new(&profile, self.tokenizer.as_ref());
        for sheet in &document.sheets {
            let batches = self.batcher.batch(sheet, profile.baseline_width);
            matcher.process_sheet(&batches);
        }
        let fluid_data = matcher.finish();
        ParseResult {
            breakpoints: profile.breakpoints,
            fluid_data,
        }
    }
}

/// Parse with the default pipeline.
pub fn parse_document(raw: &RawDocument) -> ParseResult {
    FluidEngine::default().parse(raw)
}
