//! Integration tests for names maps.
//!
//! These tests verify that:
//! - A names map built from a cached column survives a write/read cycle
//! - Remaps stored on disk can be merged into another map
//! - The cached row index follows the remapped names

use colnames_core::{Atomizer, Error, NamesMap, ReplacementSpec, normalize};

fn atomized_column() -> Atomizer {
    let mut atomizer = Atomizer::default();
    atomizer.add_replaces([ReplacementSpec::new(
        "Hatschbach, G; M.",
        "Hatschbach, G; Hatschbach, M",
    )]);
    atomizer
        .atomize(&[
            "Hatschbach, G; M.",
            "Hatschbach, G",
            "Kummrow, R; Hatschbach, G",
            "Silva, J; et al.",
        ])
        .unwrap();
    atomizer
}

#[test]
fn names_map_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names_map.json");

    let atomizer = atomized_column();
    let mut names_map = NamesMap::new(atomizer.cached_names(None).unwrap(), normalize);
    names_map
        .remap([("hatschbach,m", "hatschbach,g")], false, true)
        .unwrap();
    names_map.write_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("{\n    \"_map\": {"));
    assert!(content.contains("\"_remappingDict\": {"));

    let mut restored = NamesMap::read_from(&path).unwrap();
    assert_eq!(restored.get_map(true), names_map.get_map(true));
    assert_eq!(
        restored.normalized_names(true),
        vec!["etal", "hatschbach,g", "kummrow,r", "silva,j"]
    );
    assert!(matches!(
        restored.insert_names(["Reis, M"], false),
        Err(Error::MissingNormalizer)
    ));
}

#[test]
fn remaps_from_disk_respect_existing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names_map.json");
    std::fs::write(
        &path,
        r#"{"_map": {}, "_remappingDict": {"hatschbach,m": "hatschbach,g"}}"#,
    )
    .unwrap();

    let atomizer = atomized_column();
    let mut names_map = NamesMap::new(atomizer.cached_names(None).unwrap(), normalize);
    names_map
        .remap([("hatschbach,m", "hatschbach,mario")], false, true)
        .unwrap();

    let err = names_map.remap_from_json(&path, false).unwrap_err();
    assert!(matches!(err, Error::RemapCollision(ref key) if key == "hatschbach,m"));

    names_map.remap_from_json(&path, true).unwrap();
    assert_eq!(names_map.remapping().unwrap()["hatschbach,m"], "hatschbach,g");
}

#[test]
fn cached_index_follows_remapped_names() {
    let atomizer = atomized_column();
    let mut names_map = NamesMap::new(atomizer.cached_names(None).unwrap(), normalize);
    names_map
        .remap([("hatschbach,m", "hatschbach,g")], false, true)
        .unwrap();

    let index = atomizer.cached_names_index(Some(&names_map)).unwrap();
    assert_eq!(index["hatschbach,g"], vec![0, 0, 1, 2]);
    assert_eq!(index["kummrow,r"], vec![2]);
    assert_eq!(index["etal"], vec![3]);
    assert!(!index.contains_key("hatschbach,m"));

    let raw_index = atomizer.cached_names_index(None).unwrap();
    assert_eq!(raw_index["Hatschbach, M"], vec![0]);
}
