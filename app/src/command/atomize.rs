use colnames_config::Config;
use colnames_core::AtomizeOptions;
use std::path::PathBuf;

/// Input parameters for the Atomize command strategy.
#[derive(Debug, Clone)]
pub struct AtomizeInput {
    /// File with one raw names string per line
    pub input: PathBuf,
    /// Replacement table overriding the configured one
    pub replaces: Option<PathBuf>,
    /// Skip the replacement step
    pub no_replaces: bool,
}

/// Strategy for atomizing a names column.
///
/// Prints one line per input row with its atoms joined by ` | `, so the
/// output stays aligned with the input file.
#[derive(Debug, Clone, Copy)]
pub struct AtomizeStrategy;

impl super::CommandStrategy for AtomizeStrategy {
    type Input = AtomizeInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let rows = super::read_rows(&input.input, &config.input.missing_value)?;
        let mut atomizer = super::build_atomizer(&config, input.replaces.as_ref())?;

        let parser = atomizer.parser().clone();
        let options = AtomizeOptions {
            apply_replaces: !input.no_replaces,
            cache_result: false,
        };
        let Ok(atoms) = atomizer.atomize_with(&rows, &parser, options);

        for names in atoms {
            println!("{}", names.join(" | "));
        }
        Ok(())
    }
}
