use clap::ValueEnum;
use colnames_config::Config;
use colnames_core::RankOrder;
use std::path::PathBuf;

/// Sort orders selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RankOrderArg {
    /// Shorter source strings first, then higher counts
    #[default]
    SourceLength,
    /// Higher counts first
    Counts,
    /// By name
    Alphabetic,
}

impl From<RankOrderArg> for RankOrder {
    fn from(arg: RankOrderArg) -> Self {
        match arg {
            RankOrderArg::SourceLength => Self::SourceLengthThenCount,
            RankOrderArg::Counts => Self::CountDescending,
            RankOrderArg::Alphabetic => Self::Alphabetic,
        }
    }
}

/// Input parameters for the Rank command strategy.
#[derive(Debug, Clone)]
pub struct RankInput {
    pub input: PathBuf,
    pub replaces: Option<PathBuf>,
    /// Atoms to leave out; replaces the configured exclusions when non-empty
    pub exclude: Vec<String>,
    pub order: RankOrderArg,
    pub limit: Option<usize>,
    /// Emit JSON instead of tab-separated lines
    pub json: bool,
}

/// Strategy for ranking atomic names by frequency.
///
/// Each output entry carries a count, the atom and one source string
/// it was parsed from. An atom parsed from several distinct sources is
/// listed once per source.
#[derive(Debug, Clone, Copy)]
pub struct RankStrategy;

impl super::CommandStrategy for RankStrategy {
    type Input = RankInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let atomizer = super::atomize_file(&config, &input.input, input.replaces.as_ref())?;

        let mut query = config.ranking.query().with_order(input.order.into());
        if !input.exclude.is_empty() {
            query = query.excluding(input.exclude);
        }

        let mut entries = atomizer.ranked_atoms(&query)?;
        if let Some(limit) = input.limit.or(config.ranking.limit) {
            entries.truncate(limit);
        }

        if input.json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            for entry in &entries {
                println!("{}\t{}\t{}", entry.count, entry.atom, entry.source);
            }
        }
        Ok(())
    }
}
