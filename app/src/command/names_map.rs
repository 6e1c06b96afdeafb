use colnames_config::Config;
use colnames_core::{Atomizer, DelimitedParser, NamesMap, normalize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Input parameters for the `NamesMap` command strategy.
#[derive(Debug, Clone)]
pub struct NamesMapInput {
    pub input: PathBuf,
    pub replaces: Option<PathBuf>,
    /// Names-map file to write
    pub output: PathBuf,
    /// Names-map file whose `_remappingDict` is applied
    pub remap: Option<PathBuf>,
    /// Extend the existing output map instead of overwriting it
    pub merge: bool,
}

/// Strategy for grouping the atomic names of a column by normalized form.
#[derive(Debug, Clone, Copy)]
pub struct NamesMapStrategy;

impl super::CommandStrategy for NamesMapStrategy {
    type Input = NamesMapInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let atomizer = super::atomize_file(&config, &input.input, input.replaces.as_ref())?;

        let existing = if input.merge && input.output.exists() {
            Some(NamesMap::read_from(&input.output)?)
        } else {
            None
        };
        let names_map = build_names_map(&atomizer, existing, input.remap.as_deref())?;

        for key in names_map.remapping_inconsistencies() {
            warn!("'{key}' is both remapped and used as a remap target");
        }

        names_map.write_to(&input.output)?;
        println!(
            "Wrote {} names ({} normalized) to {}",
            names_map.len(),
            names_map.normalized_names(true).len(),
            input.output.display()
        );
        Ok(())
    }
}

/// Map the cached names with [`normalize`], on top of `existing` when given.
fn build_names_map(
    atomizer: &Atomizer<DelimitedParser>,
    existing: Option<NamesMap>,
    remap: Option<&Path>,
) -> anyhow::Result<NamesMap> {
    let names = atomizer.cached_names(None)?;
    let mut names_map = match existing {
        Some(existing) => {
            let mut names_map = existing.with_normalizer(normalize);
            names_map.insert_names(names, false)?;
            names_map
        }
        None => NamesMap::new(names, normalize),
    };
    if let Some(path) = remap {
        names_map.remap_from_json(path, false)?;
    }
    info!("Mapped {} names", names_map.len());
    Ok(names_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atomizer() -> Atomizer<DelimitedParser> {
        let mut atomizer = Atomizer::default();
        let Ok(_) = atomizer.atomize(&["Silva, J.; Costa, A", "silva, j"]);
        atomizer
    }

    #[test]
    fn merge_keeps_existing_remaps() {
        let mut existing = NamesMap::new(["Reis, M"], normalize);
        existing.remap([("silva,j", "silva,joao")], false, true).unwrap();

        let names_map = build_names_map(&atomizer(), Some(existing), None).unwrap();
        assert_eq!(names_map.len(), 4);
        assert_eq!(
            names_map.normalized_names(true),
            vec!["costa,a", "reis,m", "silva,joao"]
        );
    }

    #[test]
    fn remap_file_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("remaps.json");
        std::fs::write(&path, r#"{"_remappingDict": {"costa,a": "costa,ana"}}"#).unwrap();

        let names_map = build_names_map(&atomizer(), None, Some(path.as_path())).unwrap();
        assert_eq!(names_map.name_primitives("costa,ana"), vec!["Costa, A"]);
    }
}
