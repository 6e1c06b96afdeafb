use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::{Error, Result};

/// Function deriving a corrected string from one raw string.
pub type DeriveFn = dyn Fn(&str) -> String + Send + Sync;

/// Raw strings a spec applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sources {
    Single(String),
    Many(Vec<String>),
}

impl Sources {
    /// Iterate the raw strings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            Self::Single(source) => std::slice::from_ref(source).iter(),
            Self::Many(sources) => sources.iter(),
        }
        .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(sources) => sources.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Sources {
    fn from(source: &str) -> Self {
        Self::Single(source.to_string())
    }
}

impl From<String> for Sources {
    fn from(source: String) -> Self {
        Self::Single(source)
    }
}

impl From<Vec<String>> for Sources {
    fn from(sources: Vec<String>) -> Self {
        Self::Many(sources)
    }
}

impl From<Vec<&str>> for Sources {
    fn from(sources: Vec<&str>) -> Self {
        Self::Many(sources.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Sources {
    fn from(sources: [&str; N]) -> Self {
        Self::Many(sources.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Corrected value of a spec: either a literal or derived per source.
#[derive(Clone)]
pub enum Target {
    Literal(String),
    Derived(Arc<DeriveFn>),
}

impl Target {
    pub fn derived<F>(derive: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(derive))
    }

    /// Materialize the corrected value for one raw string.
    #[must_use]
    pub fn resolve(&self, source: &str) -> String {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Derived(derive) => derive(source),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

impl From<&str> for Target {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// One `(sources, target)` correction rule.
#[derive(Debug, Clone)]
pub struct ReplacementSpec {
    pub sources: Sources,
    pub target: Target,
}

impl ReplacementSpec {
    #[must_use]
    pub fn new(sources: impl Into<Sources>, target: impl Into<Target>) -> Self {
        Self {
            sources: sources.into(),
            target: target.into(),
        }
    }

    #[must_use]
    pub fn derived<F>(sources: impl Into<Sources>, derive: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            sources: sources.into(),
            target: Target::derived(derive),
        }
    }

    /// Resolved `(raw, corrected)` pairs, one per source string.
    pub fn resolved(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.sources
            .iter()
            .map(|source| (source.to_string(), self.target.resolve(source)))
    }

    /// Parse one spec from its JSON form `[sources, target]`.
    ///
    /// `sources` must be a string or an array of strings and `target` a
    /// string. Anything else is reported as [`Error::InvalidSpecKind`].
    pub fn from_value(index: usize, value: &Value) -> Result<Self> {
        let invalid = |found: String| Error::InvalidSpecKind { index, found };

        let Value::Array(pair) = value else {
            return Err(invalid(format!(
                "expected a [sources, target] pair, found {}",
                describe(value)
            )));
        };
        let [sources, target] = pair.as_slice() else {
            return Err(invalid(format!(
                "expected a [sources, target] pair, found an array of {} elements",
                pair.len()
            )));
        };

        let sources = match sources {
            Value::String(source) => Sources::Single(source.clone()),
            Value::Array(items) => Sources::Many(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(source) => Ok(source.clone()),
                        other => Err(invalid(format!(
                            "sources contain {}, expected only strings",
                            describe(other)
                        ))),
                    })
                    .collect::<Result<_>>()?,
            ),
            other => {
                return Err(invalid(format!(
                    "sources is {}, expected a string or a list of strings",
                    describe(other)
                )));
            }
        };

        let Value::String(target) = target else {
            return Err(invalid(format!(
                "target is {}, expected a string",
                describe(target)
            )));
        };

        Ok(Self {
            sources,
            target: Target::Literal(target.clone()),
        })
    }

    /// Parse a JSON array of specs.
    pub fn from_values(value: Value) -> Result<Vec<Self>> {
        let items: Vec<Value> = serde_json::from_value(value)?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| Self::from_value(index, item))
            .collect()
    }

    pub fn from_json_str(content: &str) -> Result<Vec<Self>> {
        Self::from_values(serde_json::from_str(content)?)
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
