use colnames_core::{ReplacementSpec, ReplacementTable};
use std::path::PathBuf;
use tracing::{info, warn};

/// Input parameters for the Replaces command strategy.
#[derive(Debug, Clone)]
pub struct ReplacesInput {
    /// JSON list of `[sources, target]` specs
    pub specs: PathBuf,
    /// Table file to write
    pub output: PathBuf,
    /// Extend the existing output table instead of overwriting it
    pub merge: bool,
}

/// Strategy for building a serialized replacement table from specs.
#[derive(Debug, Clone, Copy)]
pub struct ReplacesStrategy;

impl super::CommandStrategy for ReplacesStrategy {
    type Input = ReplacesInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let content = std::fs::read_to_string(&input.specs)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", input.specs.display()))?;
        let specs = ReplacementSpec::from_json_str(&content)?;
        info!("Loaded {} replacement specs", specs.len());

        let mut table = if input.merge && input.output.exists() {
            ReplacementTable::read_from(&input.output)?
        } else {
            ReplacementTable::new()
        };
        table.extend(specs);

        for key in table.inconsistencies() {
            warn!("'{key}' is both corrected and used as a correction");
        }

        table.write_to(&input.output)?;
        println!(
            "Wrote {} replacements to {}",
            table.len(),
            input.output.display()
        );
        Ok(())
    }
}
