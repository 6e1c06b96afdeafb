#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Collector-name atomization.
//!
//! Raw "recorded by" strings are corrected through a [`ReplacementTable`],
//! split into atomic names by a [`NameParser`], and the last batch is cached
//! on the [`Atomizer`] so it can be ranked with [`Atomizer::ranked_atoms`].
//! A [`NamesMap`] groups spelling variants of the cached names under one
//! normalized form.

mod atomizer;
mod error;
mod json;
pub mod names;
pub mod names_map;
pub mod parser;
pub mod ranking;
pub mod replaces;

pub use atomizer::{AtomizeOptions, Atomizer, Cache};
pub use error::{Error, Result};
pub use names::NameOrder;
pub use names_map::{NamesMap, normalize};
pub use parser::{DelimitedParser, NameParser};
pub use ranking::{AggregateEntry, RankOrder, RankQuery};
pub use replaces::{ReadMode, ReplacementSpec, ReplacementTable, Sources, Target};
