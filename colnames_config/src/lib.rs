mod schema;

pub use schema::{Config, InputConfig, ParserConfig, RankingConfig, ReplacesConfig};
