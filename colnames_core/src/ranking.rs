//! Ranking of atomic names over a cached batch.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::atomizer::{Atomizer, Cache};
use crate::parser::NameParser;
use crate::Result;

/// Atom excluded from rankings unless the query says otherwise.
pub const DEFAULT_EXCLUDED_ATOM: &str = "et al.";

/// One `(atom, source)` pair with the atom's total count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateEntry {
    pub atom: String,
    pub source: String,
    pub count: usize,
}

pub type EntryComparator = dyn Fn(&AggregateEntry, &AggregateEntry) -> Ordering + Send + Sync;

/// Sort order for ranked entries.
#[derive(Clone, Default)]
pub enum RankOrder {
    /// Shorter source strings first, then higher counts.
    #[default]
    SourceLengthThenCount,
    /// Higher counts first.
    CountDescending,
    /// By atom, then source.
    Alphabetic,
    Custom(Arc<EntryComparator>),
}

impl RankOrder {
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&AggregateEntry, &AggregateEntry) -> Ordering + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(compare))
    }

    fn compare(&self, a: &AggregateEntry, b: &AggregateEntry) -> Ordering {
        let by_name = || a.atom.cmp(&b.atom).then_with(|| a.source.cmp(&b.source));
        match self {
            Self::SourceLengthThenCount => a
                .source
                .chars()
                .count()
                .cmp(&b.source.chars().count())
                .then_with(|| b.count.cmp(&a.count))
                .then_with(by_name),
            Self::CountDescending => b.count.cmp(&a.count).then_with(by_name),
            Self::Alphabetic => by_name(),
            Self::Custom(compare) => compare(a, b),
        }
    }
}

impl fmt::Debug for RankOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceLengthThenCount => f.write_str("SourceLengthThenCount"),
            Self::CountDescending => f.write_str("CountDescending"),
            Self::Alphabetic => f.write_str("Alphabetic"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Parameters of a ranking query.
#[derive(Debug, Clone)]
pub struct RankQuery {
    pub excluded: BTreeSet<String>,
    pub order: RankOrder,
}

impl Default for RankQuery {
    fn default() -> Self {
        Self {
            excluded: BTreeSet::from([DEFAULT_EXCLUDED_ATOM.to_string()]),
            order: RankOrder::default(),
        }
    }
}

impl RankQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the exclusion set.
    #[must_use]
    pub fn excluding<I, S>(mut self, atoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = atoms.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: RankOrder) -> Self {
        self.order = order;
        self
    }
}

/// Rank the atoms of `cache`.
///
/// Every `(atom, source)` pair appears once, carrying the number of times
/// the atom occurs across all rows (repeats within a row included). An
/// atom taken from several distinct sources yields one entry per source.
#[must_use]
pub fn rank(cache: &Cache, query: &RankQuery) -> Vec<AggregateEntry> {
    let flattened: Vec<(&str, &str)> = cache
        .rows()
        .flat_map(|(source, atoms)| atoms.iter().map(move |atom| (atom.as_str(), source)))
        .filter(|(atom, _)| !query.excluded.contains(*atom))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for (atom, _) in &flattened {
        *counts.entry(*atom).or_default() += 1;
    }

    let mut seen = HashSet::new();
    let mut entries: Vec<AggregateEntry> = flattened
        .into_iter()
        .filter(|pair| seen.insert(*pair))
        .map(|(atom, source)| AggregateEntry {
            atom: atom.to_string(),
            source: source.to_string(),
            count: counts.get(atom).copied().unwrap_or_default(),
        })
        .collect();

    entries.sort_by(|a, b| query.order.compare(a, b));
    debug!(
        "Ranked {} distinct atoms into {} entries",
        counts.len(),
        entries.len()
    );
    entries
}

impl<P: NameParser> Atomizer<P> {
    /// Rank the atoms of the last cached batch.
    pub fn ranked_atoms(&self, query: &RankQuery) -> Result<Vec<AggregateEntry>> {
        Ok(rank(self.require_cache()?, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DelimitedParser, Error};

    fn atomizer() -> Atomizer {
        Atomizer::new(DelimitedParser::new(["; "]).unwrap())
    }

    fn entry(atom: &str, source: &str, count: usize) -> AggregateEntry {
        AggregateEntry {
            atom: atom.to_string(),
            source: source.to_string(),
            count,
        }
    }

    #[test]
    fn empty_cache_is_an_error() {
        let atomizer = atomizer();
        assert!(matches!(
            atomizer.ranked_atoms(&RankQuery::default()),
            Err(Error::EmptyCache)
        ));
    }

    #[test]
    fn one_entry_per_source_with_total_count() {
        let mut atomizer = atomizer();
        atomizer.atomize(&["A; B", "A"]).unwrap();

        let entries = atomizer
            .ranked_atoms(&RankQuery::new().excluding(Vec::<String>::new()))
            .unwrap();

        let a_entries: Vec<_> = entries.iter().filter(|e| e.atom == "A").collect();
        assert_eq!(a_entries.len(), 2);
        assert!(a_entries.iter().all(|e| e.count == 2));
        assert!(a_entries.iter().any(|e| e.source == "A; B"));
        assert!(a_entries.iter().any(|e| e.source == "A"));
    }

    #[test]
    fn default_order_is_source_length_then_count() {
        let mut atomizer = atomizer();
        atomizer.atomize(&["A; B", "A"]).unwrap();

        let entries = atomizer.ranked_atoms(&RankQuery::default()).unwrap();
        assert_eq!(
            entries,
            vec![entry("A", "A", 2), entry("A", "A; B", 2), entry("B", "A; B", 1)]
        );
    }

    #[test]
    fn repeats_within_a_row_count_but_collapse() {
        let mut atomizer = atomizer();
        atomizer.atomize(&["A; A", "A; B"]).unwrap();

        let entries = atomizer
            .ranked_atoms(&RankQuery::default().with_order(RankOrder::Alphabetic))
            .unwrap();
        assert_eq!(
            entries,
            vec![entry("A", "A; A", 3), entry("A", "A; B", 3), entry("B", "A; B", 1)]
        );
    }

    #[test]
    fn exclusions_do_not_touch_other_counts() {
        let mut atomizer = atomizer();
        atomizer
            .atomize(&["Silva, J; et al.", "Silva, J; Costa, A", "et al."])
            .unwrap();

        let entries = atomizer
            .ranked_atoms(&RankQuery::default().with_order(RankOrder::CountDescending))
            .unwrap();
        assert!(entries.iter().all(|e| e.atom != "et al."));
        assert_eq!(
            entries,
            vec![
                entry("Silva, J", "Silva, J; Costa, A", 2),
                entry("Silva, J", "Silva, J; et al.", 2),
                entry("Costa, A", "Silva, J; Costa, A", 1),
            ]
        );
    }

    #[test]
    fn custom_order_is_stable() {
        let mut atomizer = atomizer();
        atomizer.atomize(&["B; A", "C"]).unwrap();

        let entries = atomizer
            .ranked_atoms(&RankQuery::default().with_order(RankOrder::custom(|_, _| Ordering::Equal)))
            .unwrap();
        let atoms: Vec<_> = entries.iter().map(|e| e.atom.as_str()).collect();
        assert_eq!(atoms, vec!["B", "A", "C"]);
    }
}
