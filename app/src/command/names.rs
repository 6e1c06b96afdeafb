use clap::ValueEnum;
use colnames_config::Config;
use colnames_core::{NameOrder, NamesMap};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NameOrderArg {
    Alphabetic,
    Counts,
}

impl From<NameOrderArg> for NameOrder {
    fn from(arg: NameOrderArg) -> Self {
        match arg {
            NameOrderArg::Alphabetic => Self::Alphabetic,
            NameOrderArg::Counts => Self::Counts,
        }
    }
}

/// Input parameters for the Names command strategy.
#[derive(Debug, Clone)]
pub struct NamesInput {
    pub input: PathBuf,
    pub replaces: Option<PathBuf>,
    /// Print record counts next to each name
    pub counts: bool,
    pub order: Option<NameOrderArg>,
    /// Print the rows each name occurs in
    pub index: bool,
    /// Index under the normalized names of this names-map file
    pub names_map: Option<PathBuf>,
}

/// Strategy for listing the distinct atomic names of a column.
#[derive(Debug, Clone, Copy)]
pub struct NamesStrategy;

impl super::CommandStrategy for NamesStrategy {
    type Input = NamesInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let atomizer = super::atomize_file(&config, &input.input, input.replaces.as_ref())?;
        let order = input.order.map(NameOrder::from);

        if input.index {
            let names_map = input
                .names_map
                .as_deref()
                .map(NamesMap::read_from)
                .transpose()?;
            for (name, rows) in atomizer.cached_names_index(names_map.as_ref())? {
                let rows: Vec<String> = rows.iter().map(ToString::to_string).collect();
                println!("{name}\t{}", rows.join(","));
            }
        } else if input.counts {
            for (name, count) in atomizer.cached_name_counts(order)? {
                println!("{count}\t{name}");
            }
        } else {
            for name in atomizer.cached_names(order)? {
                println!("{name}");
            }
        }
        Ok(())
    }
}
