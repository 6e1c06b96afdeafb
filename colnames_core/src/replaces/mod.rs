//! Literal corrections applied to raw name strings before parsing.
//!
//! A [`ReplacementTable`] is always a flat `raw -> corrected` map. It is
//! built from [`ReplacementSpec`]s, which may name one or many raw strings
//! and may derive the corrected value from each raw string.

mod spec;
mod table;

pub use spec::{DeriveFn, ReplacementSpec, Sources, Target};
pub use table::{ReadMode, ReplacementTable};
