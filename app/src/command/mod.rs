//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is a separate strategy type with its own input type,
//! dispatched statically from `main`.

use colnames_config::Config;
use colnames_core::{Atomizer, DelimitedParser, ReplacementTable};
use std::path::{Path, PathBuf};
use tracing::info;

mod atomize;
mod info;
mod init;
mod names;
mod names_map;
mod rank;
mod replaces;
mod version;

pub use atomize::{AtomizeInput, AtomizeStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use names::{NameOrderArg, NamesInput, NamesStrategy};
pub use names_map::{NamesMapInput, NamesMapStrategy};
pub use rank::{RankInput, RankOrderArg, RankStrategy};
pub use replaces::{ReplacesInput, ReplacesStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Read one raw names string per line. Empty lines become `missing_value`.
pub fn read_rows(path: &Path, missing_value: &str) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
    let rows: Vec<String> = content
        .lines()
        .map(|line| {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                missing_value.to_string()
            } else {
                line.to_string()
            }
        })
        .collect();
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Build an atomizer from config. `replaces` overrides the configured
/// table file.
fn build_atomizer(
    config: &Config,
    replaces: Option<&PathBuf>,
) -> anyhow::Result<Atomizer<DelimitedParser>> {
    let parser = config.parser.build()?;
    let table_path = replaces.or(config.replaces.table_path.as_ref());
    let table = match table_path {
        Some(path) => ReplacementTable::read_from(path)?,
        None => ReplacementTable::new(),
    };
    Ok(Atomizer::with_table(parser, table))
}

/// Atomize the rows of `input` with the configured parser and table.
fn atomize_file(
    config: &Config,
    input: &Path,
    replaces: Option<&PathBuf>,
) -> anyhow::Result<Atomizer<DelimitedParser>> {
    let rows = read_rows(input, &config.input.missing_value)?;
    let mut atomizer = build_atomizer(config, replaces)?;
    let Ok(_) = atomizer.atomize(&rows);
    Ok(atomizer)
}
