//! Name listings over atomized rows.

use std::collections::{BTreeMap, HashMap};

/// Ordering for name listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameOrder {
    Alphabetic,
    /// Most frequent first; ties keep first-occurrence order.
    Counts,
}

/// Record counts per name. Unordered listings follow first occurrence.
#[must_use]
pub fn name_counts(atoms: &[Vec<String>], order: Option<NameOrder>) -> Vec<(String, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();
    for name in atoms.iter().flatten() {
        if let Some(&i) = positions.get(name.as_str()) {
            counts[i].1 += 1;
        } else {
            positions.insert(name, counts.len());
            counts.push((name.clone(), 1));
        }
    }

    match order {
        Some(NameOrder::Alphabetic) => counts.sort_by(|a, b| a.0.cmp(&b.0)),
        Some(NameOrder::Counts) => counts.sort_by(|a, b| b.1.cmp(&a.1)),
        None => {}
    }
    counts
}

/// Distinct names, in the requested order.
#[must_use]
pub fn names_list(atoms: &[Vec<String>], order: Option<NameOrder>) -> Vec<String> {
    name_counts(atoms, order)
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// Row positions in which each name occurs. A row is listed once per
/// occurrence of the name in it.
///
/// With a `raw -> normalized` map (see
/// [`NamesMap::get_map`](crate::NamesMap::get_map)), rows are indexed under
/// the normalized name instead. Every mapped name gets an entry, possibly
/// empty, and names missing from the map are skipped.
#[must_use]
pub fn names_index(
    atoms: &[Vec<String>],
    names_map: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, Vec<usize>> {
    let mut index: BTreeMap<String, Vec<usize>> = names_map
        .into_iter()
        .flat_map(BTreeMap::values)
        .map(|normalized| (normalized.clone(), Vec::new()))
        .collect();
    for (row, names) in atoms.iter().enumerate() {
        for name in names {
            let key = match names_map {
                Some(map) => match map.get(name) {
                    Some(normalized) => normalized,
                    None => continue,
                },
                None => name,
            };
            index.entry(key.clone()).or_default().push(row);
        }
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|s| (*s).to_string()).collect())
            .collect()
    }

    #[test]
    fn counts_follow_first_occurrence() {
        let atoms = rows(&[&["b", "a"], &["a"], &[]]);
        assert_eq!(
            name_counts(&atoms, None),
            vec![("b".to_string(), 1), ("a".to_string(), 2)]
        );
    }

    #[test]
    fn counts_order_is_descending() {
        let atoms = rows(&[&["b", "a"], &["a", "c"], &["c"]]);
        assert_eq!(names_list(&atoms, Some(NameOrder::Counts)), vec!["a", "c", "b"]);
    }

    #[test]
    fn alphabetic_listing() {
        let atoms = rows(&[&["Silva, J"], &["Costa, A", "Silva, J"]]);
        assert_eq!(
            names_list(&atoms, Some(NameOrder::Alphabetic)),
            vec!["Costa, A", "Silva, J"]
        );
    }

    #[test]
    fn index_lists_rows() {
        let atoms = rows(&[&["a"], &["b"], &["a", "a"]]);
        let index = names_index(&atoms, None);
        assert_eq!(index["a"], vec![0, 2, 2]);
        assert_eq!(index["b"], vec![1]);
    }

    #[test]
    fn index_through_names_map() {
        let atoms = rows(&[&["Silva, J."], &["silva, j", "Costa, A"], &["Reis, M"]]);
        let names_map: BTreeMap<String, String> = [
            ("Silva, J.", "silva,j"),
            ("silva, j", "silva,j"),
            ("Reis, M", "reis,m"),
            ("Lima, P", "lima,p"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let index = names_index(&atoms, Some(&names_map));
        assert_eq!(index["silva,j"], vec![0, 1]);
        assert_eq!(index["reis,m"], vec![2]);
        assert!(index["lima,p"].is_empty());
        assert!(!index.contains_key("Costa, A"));
        assert_eq!(index.len(), 3);
    }
}
