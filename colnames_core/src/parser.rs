//! Strategies that split one names string into atomic names.

use std::collections::HashSet;
use std::convert::Infallible;

use regex::Regex;

use crate::{Error, Result};

/// Splits a raw names string into atomic names.
///
/// Implementations must be deterministic and free of side effects: the
/// [`Atomizer`](crate::Atomizer) caches their output. Errors are returned to
/// the caller unchanged.
pub trait NameParser {
    type Error;

    fn parse(&self, names: &str) -> std::result::Result<Vec<String>, Self::Error>;
}

impl<F, E> NameParser for F
where
    F: Fn(&str) -> std::result::Result<Vec<String>, E>,
{
    type Error = E;

    fn parse(&self, names: &str) -> std::result::Result<Vec<String>, E> {
        self(names)
    }
}

#[derive(Debug, Clone)]
enum Splitter {
    Literal(String),
    Pattern(Regex),
}

/// Delimiter-based parser.
///
/// Pieces are trimmed and empty pieces dropped. With `unique`, repeated
/// names are collapsed, keeping first-occurrence order when
/// `preserve_order` is set and sorting otherwise.
#[derive(Debug, Clone)]
pub struct DelimitedParser {
    splitter: Splitter,
    unique: bool,
    preserve_order: bool,
}

impl DelimitedParser {
    pub const DEFAULT_DELIMITER: &'static str = ";";

    /// Parser splitting on every one of `delimiters`.
    ///
    /// A single delimiter is matched literally. Several delimiters are
    /// joined into one regex alternation, so each is a pattern fragment
    /// (`r"\s+e\s+"` works); a bare `"|"` is the one delimiter escaped.
    pub fn new<I, S>(delimiters: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut delimiters: Vec<String> = delimiters.into_iter().map(Into::into).collect();
        if delimiters.iter().any(String::is_empty) {
            return Err(Error::InvalidDelimiter(
                "delimiters must not be empty strings".to_string(),
            ));
        }

        let splitter = match delimiters.len() {
            0 => {
                return Err(Error::InvalidDelimiter(
                    "at least one delimiter is required".to_string(),
                ));
            }
            1 => Splitter::Literal(delimiters.remove(0)),
            _ => {
                let pattern = delimiters
                    .iter()
                    .map(|d| if d == "|" { r"\|" } else { d.as_str() })
                    .collect::<Vec<_>>()
                    .join("|");
                let regex =
                    Regex::new(&pattern).map_err(|e| Error::InvalidDelimiter(e.to_string()))?;
                Splitter::Pattern(regex)
            }
        };

        Ok(Self {
            splitter,
            unique: false,
            preserve_order: false,
        })
    }

    #[must_use]
    pub const fn unique(mut self, preserve_order: bool) -> Self {
        self.unique = true;
        self.preserve_order = preserve_order;
        self
    }

    /// Split without the [`NameParser`] wrapping.
    #[must_use]
    pub fn split(&self, names: &str) -> Vec<String> {
        let pieces: Box<dyn Iterator<Item = &str> + '_> = match &self.splitter {
            Splitter::Literal(delimiter) => Box::new(names.split(delimiter.as_str())),
            Splitter::Pattern(regex) => Box::new(regex.split(names)),
        };
        let names: Vec<String> = pieces
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if !self.unique {
            return names;
        }
        if self.preserve_order {
            let mut seen = HashSet::new();
            names
                .into_iter()
                .filter(|name| seen.insert(name.clone()))
                .collect()
        } else {
            let mut names = names;
            names.sort();
            names.dedup();
            names
        }
    }
}

impl Default for DelimitedParser {
    fn default() -> Self {
        Self {
            splitter: Splitter::Literal(Self::DEFAULT_DELIMITER.to_string()),
            unique: false,
            preserve_order: false,
        }
    }
}

impl NameParser for DelimitedParser {
    type Error = Infallible;

    fn parse(&self, names: &str) -> std::result::Result<Vec<String>, Infallible> {
        Ok(self.split(names))
    }
}
