use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use colnames_core::ranking::DEFAULT_EXCLUDED_ATOM;
use colnames_core::{DelimitedParser, RankQuery};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub replaces: ReplacesConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    #[serde(default = "ParserConfig::default_delimiters")]
    pub delimiters: Vec<String>,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub preserve_order: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiters: Self::default_delimiters(),
            unique: false,
            preserve_order: false,
        }
    }
}

impl ParserConfig {
    fn default_delimiters() -> Vec<String> {
        vec![DelimitedParser::DEFAULT_DELIMITER.to_string()]
    }

    pub fn build(&self) -> anyhow::Result<DelimitedParser> {
        let parser = DelimitedParser::new(self.delimiters.iter().cloned())?;
        Ok(if self.unique {
            parser.unique(self.preserve_order)
        } else {
            parser
        })
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ReplacesConfig {
    /// Serialized replacement table loaded before atomizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RankingConfig {
    #[serde(default = "RankingConfig::default_excluded_atoms")]
    pub excluded_atoms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            excluded_atoms: Self::default_excluded_atoms(),
            limit: None,
        }
    }
}

impl RankingConfig {
    fn default_excluded_atoms() -> Vec<String> {
        vec![DEFAULT_EXCLUDED_ATOM.to_string()]
    }

    #[must_use]
    pub fn query(&self) -> RankQuery {
        RankQuery::new().excluding(self.excluded_atoms.iter().cloned())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct InputConfig {
    /// Text substituted for empty rows.
    #[serde(default = "InputConfig::default_missing_value")]
    pub missing_value: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            missing_value: Self::default_missing_value(),
        }
    }
}

impl InputConfig {
    fn default_missing_value() -> String {
        "nan".to_string()
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "parser": {
    "delimiters": [";"],
    "unique": false,
    "preserve_order": false
  },
  "replaces": {},
  "ranking": {
    "excluded_atoms": ["et al."]
  },
  "input": {
    "missing_value": "nan"
  }
}"#;

impl Config {
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("colnames")
            .join("config.json"))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load `~/colnames/config.json`, or fall back to defaults when absent.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            info!("Loaded config from {}", config_path.display());
            Self::load_from(&config_path)
        } else {
            info!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("colnames");

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<PathBuf> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_matches_defaults() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.parser.delimiters, vec![";"]);
        assert_eq!(config.ranking.excluded_atoms, vec!["et al."]);
        assert_eq!(config.input.missing_value, "nan");
        assert!(config.replaces.table_path.is_none());
    }

    #[test]
    fn parser_section_builds_parser() {
        let config: Config = serde_json::from_str(
            r#"{"parser": {"delimiters": [";", "|"], "unique": true, "preserve_order": true}}"#,
        )
        .unwrap();
        let parser = config.parser.build().unwrap();
        assert_eq!(parser.split("b | a; b"), vec!["b", "a"]);
    }

    #[test]
    fn invalid_delimiters_fail_to_build() {
        let config = ParserConfig {
            delimiters: Vec::new(),
            ..ParserConfig::default()
        };
        assert!(config.build().is_err());
    }

    #[test]
    fn ranking_section_builds_query() {
        let ranking = RankingConfig {
            excluded_atoms: vec!["s.n.".to_string()],
            limit: Some(10),
        };
        let query = ranking.query();
        assert!(query.excluded.contains("s.n."));
        assert!(!query.excluded.contains("et al."));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"replaces": {"table_path": "/data/replaces.json"}}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.replaces.table_path,
            Some(PathBuf::from("/data/replaces.json"))
        );
    }
}
