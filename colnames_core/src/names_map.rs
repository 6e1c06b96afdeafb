//! Grouping of spelling variants under a normalized name.
//!
//! A [`NamesMap`] maps every raw atomic name to the key produced by a
//! normalization function. Keys that the function cannot reconcile (for
//! instance two abbreviations of the same person) are merged by hand with a
//! remapping table from one normalized key to another. The map and the
//! remapping are persisted together as JSON:
//!
//! ```json
//! {
//!     "_map": { "Hatschbach, G.": "hatschbach,g" },
//!     "_remappingDict": { "hatschbach,g": "hatschbach,gerdt" }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use unicode_normalization::UnicodeNormalization;

use crate::{Error, Result, json};

pub type Normalizer = dyn Fn(&str) -> String + Send + Sync;

/// Default normalization: lowercase, drop periods, then reduce every
/// comma-separated part to its unaccented ASCII letters.
///
/// `"Hatschbach, G."` and `"hatschbach, g"` both become `"hatschbach,g"`.
#[must_use]
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
        .replace('.', "")
        .split(',')
        .map(|part| {
            part.nfkd()
                .filter(char::is_ascii_alphabetic)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(",")
}

#[derive(Serialize)]
struct NamesMapFileRef<'a> {
    #[serde(rename = "_map")]
    map: &'a BTreeMap<String, String>,
    #[serde(rename = "_remappingDict")]
    remapping: Option<&'a BTreeMap<String, String>>,
}

#[derive(Deserialize)]
struct NamesMapFile {
    #[serde(rename = "_map", default)]
    map: BTreeMap<String, String>,
    #[serde(rename = "_remappingDict", default)]
    remapping: Option<BTreeMap<String, String>>,
}

/// Raw name to normalized name, plus manual remaps between normalized
/// names.
///
/// The normalizer is not persisted. A map read from disk can still be
/// remapped and queried, but [`NamesMap::insert_names`] needs a normalizer
/// set with [`NamesMap::with_normalizer`].
#[derive(Clone, Default)]
pub struct NamesMap {
    map: BTreeMap<String, String>,
    remapping: Option<BTreeMap<String, String>>,
    normalizer: Option<Arc<Normalizer>>,
}

impl fmt::Debug for NamesMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamesMap")
            .field("map", &self.map)
            .field("remapping", &self.remapping)
            .field("has_normalizer", &self.normalizer.is_some())
            .finish()
    }
}

impl NamesMap {
    /// Map every name in `names` through `normalizer`.
    #[must_use]
    pub fn new<I, S, F>(names: I, normalizer: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        let map = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let normalized = normalizer(&name);
                (name, normalized)
            })
            .collect();
        Self {
            map,
            remapping: None,
            normalizer: Some(Arc::new(normalizer)),
        }
    }

    #[must_use]
    pub fn with_normalizer<F>(mut self, normalizer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    #[must_use]
    pub const fn has_normalizer(&self) -> bool {
        self.normalizer.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Normalized key of a raw name, before remapping.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(name).map(String::as_str)
    }

    /// Empty the name map. The remapping table is kept.
    pub fn clear_map(&mut self) {
        self.map.clear();
    }

    /// Add names with the stored normalizer. With `rebuild`, the name map
    /// is cleared first; the remapping table is kept either way.
    pub fn insert_names<I, S>(&mut self, names: I, rebuild: bool) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let normalizer = self.normalizer.clone().ok_or(Error::MissingNormalizer)?;
        self.insert_names_with(names, normalizer.as_ref(), rebuild);
        Ok(())
    }

    /// Add names with a one-off normalizer.
    pub fn insert_names_with<I, S>(&mut self, names: I, normalizer: &Normalizer, rebuild: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if rebuild {
            self.clear_map();
        }
        let before = self.map.len();
        for name in names {
            let name = name.into();
            let normalized = normalizer(&name);
            self.map.insert(name, normalized);
        }
        debug!("Names map grew from {} to {} entries", before, self.map.len());
    }

    /// Merge `remapping` into the remapping table.
    ///
    /// With `from_scratch`, the current table is discarded first. With
    /// `prevent_overwriting`, a key already in the table fails with
    /// [`Error::RemapCollision`] and nothing is merged.
    pub fn remap<I, K, V>(
        &mut self,
        remapping: I,
        from_scratch: bool,
        prevent_overwriting: bool,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let incoming: BTreeMap<String, String> = remapping
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if from_scratch {
            self.remapping = None;
        }

        let Some(current) = self.remapping.as_mut() else {
            self.remapping = Some(incoming);
            return Ok(());
        };
        if let Some(key) = incoming
            .keys()
            .find(|k| prevent_overwriting && current.contains_key(*k))
        {
            return Err(Error::RemapCollision(key.clone()));
        }
        current.extend(incoming);
        Ok(())
    }

    /// Drop one remap, returning its target.
    pub fn remove_from_remap(&mut self, key: &str) -> Option<String> {
        self.remapping.as_mut()?.remove(key)
    }

    #[must_use]
    pub const fn remapping(&self) -> Option<&BTreeMap<String, String>> {
        self.remapping.as_ref()
    }

    /// Remap with the `_remappingDict` of a names-map file. Existing keys
    /// are protected as in [`NamesMap::remap`].
    pub fn remap_from_json(&mut self, path: &Path, from_scratch: bool) -> Result<()> {
        let file: NamesMapFile = serde_json::from_str(&json::read_file(path)?)?;
        let remapping = file.remapping.unwrap_or_default();
        info!("Read {} remaps from {}", remapping.len(), path.display());
        self.remap(remapping, from_scratch, true)
    }

    /// A copy of the name map. With `remap`, every raw name whose
    /// normalized key is remapped points at the remap target.
    #[must_use]
    pub fn get_map(&self, remap: bool) -> BTreeMap<String, String> {
        let mut map = self.map.clone();
        if !remap {
            return map;
        }
        if let Some(remapping) = &self.remapping {
            for (name, normalized) in &self.map {
                if let Some(target) = remapping.get(normalized) {
                    map.insert(name.clone(), target.clone());
                }
            }
        }
        map
    }

    /// Distinct normalized names, sorted.
    #[must_use]
    pub fn normalized_names(&self, remap: bool) -> Vec<String> {
        self.get_map(remap)
            .into_values()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Raw names that end up under `normalized` after remapping.
    #[must_use]
    pub fn name_primitives(&self, normalized: &str) -> Vec<String> {
        self.get_map(true)
            .into_iter()
            .filter(|(_, norm)| norm == normalized)
            .map(|(name, _)| name)
            .collect()
    }

    /// Remap keys that are also remap targets, sorted.
    #[must_use]
    pub fn remapping_inconsistencies(&self) -> Vec<&str> {
        let Some(remapping) = &self.remapping else {
            return Vec::new();
        };
        let targets: BTreeSet<&str> = remapping.values().map(String::as_str).collect();
        remapping
            .keys()
            .map(String::as_str)
            .filter(|key| targets.contains(key))
            .collect()
    }

    pub fn to_json_string(&self) -> Result<String> {
        json::to_pretty_string(&NamesMapFileRef {
            map: &self.map,
            remapping: self.remapping.as_ref(),
        })
    }

    /// Parse a names-map file. The result has no normalizer.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let file: NamesMapFile = serde_json::from_str(content)?;
        Ok(Self {
            map: file.map,
            remapping: file.remapping,
            normalizer: None,
        })
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        json::write_file(path, &self.to_json_string()?)?;
        info!("Wrote {} mapped names to {}", self.map.len(), path.display());
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let names_map = Self::from_json_str(&json::read_file(path)?)?;
        info!(
            "Read {} mapped names from {}",
            names_map.map.len(),
            path.display()
        );
        Ok(names_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hatschbach() -> NamesMap {
        NamesMap::new(
            ["Hatschbach, G.", "hatschbach, g", "Hatschbach, Gerdt", "Kummrow, R"],
            normalize,
        )
    }

    #[test]
    fn normalize_folds_case_periods_and_accents() {
        assert_eq!(normalize("Hatschbach, G."), "hatschbach,g");
        assert_eq!(normalize("Löfgren, A"), "lofgren,a");
        assert_eq!(normalize("Silva, J. C."), "silva,jc");
        assert_eq!(normalize("Reis"), "reis");
    }

    #[test]
    fn variants_share_a_key() {
        let names_map = hatschbach();
        assert_eq!(names_map.get("Hatschbach, G."), Some("hatschbach,g"));
        assert_eq!(
            names_map.normalized_names(false),
            vec!["hatschbach,g", "hatschbach,gerdt", "kummrow,r"]
        );
    }

    #[test]
    fn remap_merges_normalized_names() {
        let mut names_map = hatschbach();
        names_map
            .remap([("hatschbach,g", "hatschbach,gerdt")], false, true)
            .unwrap();

        assert_eq!(
            names_map.normalized_names(true),
            vec!["hatschbach,gerdt", "kummrow,r"]
        );
        assert_eq!(
            names_map.name_primitives("hatschbach,gerdt"),
            vec!["Hatschbach, G.", "Hatschbach, Gerdt", "hatschbach, g"]
        );
        assert_eq!(names_map.get_map(false)["Hatschbach, G."], "hatschbach,g");
    }

    #[test]
    fn remap_refuses_to_overwrite() {
        let mut names_map = hatschbach();
        names_map.remap([("a", "b")], false, true).unwrap();

        let err = names_map
            .remap([("c", "d"), ("a", "e")], false, true)
            .unwrap_err();
        assert!(matches!(err, Error::RemapCollision(ref key) if key == "a"));
        assert_eq!(names_map.remapping().unwrap().len(), 1);

        names_map.remap([("a", "e")], false, false).unwrap();
        assert_eq!(names_map.remapping().unwrap()["a"], "e");
    }

    #[test]
    fn remap_from_scratch_discards_previous() {
        let mut names_map = hatschbach();
        names_map.remap([("a", "b")], false, true).unwrap();
        names_map.remap([("a", "c")], true, true).unwrap();
        assert_eq!(names_map.remapping().unwrap().len(), 1);
        assert_eq!(names_map.remapping().unwrap()["a"], "c");
    }

    #[test]
    fn remove_from_remap_returns_target() {
        let mut names_map = hatschbach();
        assert_eq!(names_map.remove_from_remap("a"), None);
        names_map.remap([("a", "b")], false, true).unwrap();
        assert_eq!(names_map.remove_from_remap("a"), Some("b".to_string()));
        assert!(names_map.remapping().unwrap().is_empty());
    }

    #[test]
    fn insert_needs_a_normalizer() {
        let mut names_map = NamesMap::from_json_str(r#"{"_map": {}, "_remappingDict": null}"#)
            .unwrap();
        let err = names_map.insert_names(["Reis, M"], false).unwrap_err();
        assert!(matches!(err, Error::MissingNormalizer));

        let mut names_map = names_map.with_normalizer(normalize);
        names_map.insert_names(["Reis, M"], false).unwrap();
        assert_eq!(names_map.get("Reis, M"), Some("reis,m"));
    }

    #[test]
    fn rebuild_keeps_remapping() {
        let mut names_map = hatschbach();
        names_map.remap([("reis,m", "reis,mario")], false, true).unwrap();
        names_map.insert_names(["Reis, M."], true).unwrap();
        assert_eq!(names_map.len(), 1);
        assert_eq!(names_map.get_map(true)["Reis, M."], "reis,mario");
    }

    #[test]
    fn serialized_form_uses_both_tables() {
        let mut names_map = NamesMap::new(["Lö, A."], normalize);
        assert_eq!(
            names_map.to_json_string().unwrap(),
            "{\n    \"_map\": {\n        \"Lö, A.\": \"lo,a\"\n    },\n    \"_remappingDict\": null\n}"
        );

        names_map.remap([("lo,a", "lo,ana")], false, true).unwrap();
        let restored = NamesMap::from_json_str(&names_map.to_json_string().unwrap()).unwrap();
        assert!(!restored.has_normalizer());
        assert_eq!(restored.get_map(true), names_map.get_map(true));
    }

    #[test]
    fn remapping_inconsistencies_report_chains() {
        let mut names_map = hatschbach();
        assert!(names_map.remapping_inconsistencies().is_empty());
        names_map
            .remap([("a", "b"), ("b", "c")], false, true)
            .unwrap();
        assert_eq!(names_map.remapping_inconsistencies(), vec!["b"]);
    }
}
