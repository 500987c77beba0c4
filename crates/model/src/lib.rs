//! Shared data model for fluid CSS range extraction.
//!
//! Three layers live here:
//! - the raw input contract ([`raw`]) — what an external collaborator
//!   hands us after reading a page's style sheets,
//! - the canonical document model ([`document`]) — the normalized,
//!   allow-list-filtered form every later stage consumes,
//! - the output model ([`fluid`]) — the fluid-data map of interpolation
//!   ranges keyed by anchor selector.
//!
//! The fluid-property allow-list and shorthand expansion tables are in
//! [`properties`].

pub mod document;
pub mod fluid;
pub mod properties;
pub mod raw;

pub use document::{Document, IS_DYNAMIC_FLAG, MediaRule, Rule, StyleRule, StyleSheet};
pub use fluid::{
    FluidData, FluidRange, FluidValue, FluidValue2D, PropertyData, PropertyMeta, RuleBatch,
};
pub use properties::{FLUID_PROPERTIES, LENGTH_UNITS, SHORTHAND_PROPERTIES, shorthand_positions};
pub use raw::{Declaration, RawDocument, RawMediaRule, RawRule, RawStyleRule, RawStyleSheet};
