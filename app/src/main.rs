#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod command;

use command::{
    AtomizeInput, AtomizeStrategy, CommandStrategy, InfoStrategy, InitStrategy, NameOrderArg,
    NamesInput, NamesMapInput, NamesMapStrategy, NamesStrategy, RankInput, RankOrderArg,
    RankStrategy, ReplacesInput, ReplacesStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "colnames")]
#[command(about = "Collector-name atomization and ranking", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split every row of a names file into atomic names
    Atomize {
        /// File with one names string per line
        input: PathBuf,

        /// Replacement table to apply
        #[arg(short, long)]
        replaces: Option<PathBuf>,

        /// Do not apply any replacement table
        #[arg(long, conflicts_with = "replaces")]
        no_replaces: bool,
    },
    /// Rank atomic names by how often they occur
    Rank {
        input: PathBuf,

        #[arg(short, long)]
        replaces: Option<PathBuf>,

        /// Atom to leave out (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        #[arg(short, long, value_enum, default_value_t)]
        order: RankOrderArg,

        /// Maximum number of entries to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
    /// List distinct atomic names
    Names {
        input: PathBuf,

        #[arg(short, long)]
        replaces: Option<PathBuf>,

        /// Show record counts
        #[arg(short, long)]
        counts: bool,

        #[arg(short, long, value_enum)]
        order: Option<NameOrderArg>,

        /// Show the rows each name occurs in
        #[arg(short, long, conflicts_with = "counts")]
        index: bool,

        /// Names-map file to index normalized names by
        #[arg(short = 'm', long, requires = "index")]
        names_map: Option<PathBuf>,
    },
    /// Build a names map grouping spelling variants of the atomic names
    NamesMap {
        input: PathBuf,

        #[arg(short, long)]
        replaces: Option<PathBuf>,

        /// Names-map file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Names-map file whose remaps are applied
        #[arg(long)]
        remap: Option<PathBuf>,

        /// Extend the existing output map instead of overwriting it
        #[arg(short, long)]
        merge: bool,
    },
    /// Build a replacement table from a JSON spec list
    Replaces {
        /// JSON list of [sources, target] specs
        #[arg(short, long)]
        specs: PathBuf,

        /// Table file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Extend the existing output table
        #[arg(short, long)]
        merge: bool,
    },
    /// Show effective configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Atomize {
            input,
            replaces,
            no_replaces,
        } => AtomizeStrategy.execute(AtomizeInput {
            input,
            replaces,
            no_replaces,
        }),
        Commands::Rank {
            input,
            replaces,
            exclude,
            order,
            limit,
            json,
        } => RankStrategy.execute(RankInput {
            input,
            replaces,
            exclude,
            order,
            limit,
            json,
        }),
        Commands::Names {
            input,
            replaces,
            counts,
            order,
            index,
            names_map,
        } => NamesStrategy.execute(NamesInput {
            input,
            replaces,
            counts,
            order,
            index,
            names_map,
        }),
        Commands::NamesMap {
            input,
            replaces,
            output,
            remap,
            merge,
        } => NamesMapStrategy.execute(NamesMapInput {
            input,
            replaces,
            output,
            remap,
            merge,
        }),
        Commands::Replaces {
            specs,
            output,
            merge,
        } => ReplacesStrategy.execute(ReplacesInput {
            specs,
            output,
            merge,
        }),
        Commands::Info => InfoStrategy.execute(()),
        Commands::Init => InitStrategy.execute(()),
        Commands::Version => VersionStrategy.execute(()),
    }
}
