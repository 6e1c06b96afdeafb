use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::names::{self, NameOrder};
use crate::names_map::NamesMap;
use crate::parser::{DelimitedParser, NameParser};
use crate::replaces::{ReadMode, ReplacementSpec, ReplacementTable};
use crate::{Error, Result};

/// Per-call switches for [`Atomizer::atomize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomizeOptions {
    pub apply_replaces: bool,
    pub cache_result: bool,
}

impl Default for AtomizeOptions {
    fn default() -> Self {
        Self {
            apply_replaces: true,
            cache_result: true,
        }
    }
}

/// The last cached batch: inputs after replacement and their atoms,
/// aligned by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cache {
    pub inputs: Vec<String>,
    pub atoms: Vec<Vec<String>>,
}

impl Cache {
    /// `(input, atoms)` rows in input order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inputs
            .iter()
            .map(String::as_str)
            .zip(self.atoms.iter().map(Vec::as_slice))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Corrects, splits and remembers a column of collector-name strings.
///
/// The replacement table and the cache belong to one instance; `atomize`
/// takes `&mut self` because every cached call overwrites the cache.
#[derive(Debug, Clone)]
pub struct Atomizer<P = DelimitedParser> {
    parser: P,
    table: ReplacementTable,
    cache: Option<Cache>,
}

impl Default for Atomizer {
    fn default() -> Self {
        Self::new(DelimitedParser::default())
    }
}

impl<P: NameParser> Atomizer<P> {
    #[must_use]
    pub fn new(parser: P) -> Self {
        Self::with_table(parser, ReplacementTable::new())
    }

    #[must_use]
    pub const fn with_table(parser: P, table: ReplacementTable) -> Self {
        Self {
            parser,
            table,
            cache: None,
        }
    }

    /// Start from a serialized replacement table.
    pub fn from_table_file(parser: P, path: &Path) -> Result<Self> {
        Ok(Self::with_table(parser, ReplacementTable::read_from(path)?))
    }

    #[must_use]
    pub const fn parser(&self) -> &P {
        &self.parser
    }

    #[must_use]
    pub const fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Merge more replacement specs into the table.
    pub fn add_replaces<I>(&mut self, specs: I)
    where
        I: IntoIterator<Item = ReplacementSpec>,
    {
        let before = self.table.len();
        self.table.extend(specs);
        debug!(
            "Replacement table grew from {} to {} entries",
            before,
            self.table.len()
        );
    }

    pub fn write_replaces(&self, path: &Path) -> Result<()> {
        self.table.write_to(path)
    }

    pub fn read_replaces(&mut self, path: &Path, mode: ReadMode) -> Result<()> {
        self.table.load(path, mode)
    }

    /// Atomize with the instance parser, applying replacements and caching.
    pub fn atomize<S: AsRef<str>>(
        &mut self,
        raw: &[S],
    ) -> std::result::Result<Vec<Vec<String>>, P::Error> {
        let options = AtomizeOptions::default();
        let batch = parse_batch(&self.table, raw, &self.parser, options)?;
        Ok(self.finish(batch, options))
    }

    /// Atomize with an explicit parser and options.
    ///
    /// A parser error aborts the whole batch and leaves the cache as it was.
    pub fn atomize_with<S, Q>(
        &mut self,
        raw: &[S],
        parser: &Q,
        options: AtomizeOptions,
    ) -> std::result::Result<Vec<Vec<String>>, Q::Error>
    where
        S: AsRef<str>,
        Q: NameParser + ?Sized,
    {
        let batch = parse_batch(&self.table, raw, parser, options)?;
        Ok(self.finish(batch, options))
    }

    fn finish(&mut self, batch: Cache, options: AtomizeOptions) -> Vec<Vec<String>> {
        debug!(
            "Atomized {} rows (replaces: {}, cached: {})",
            batch.len(),
            options.apply_replaces,
            options.cache_result
        );
        if !options.cache_result {
            return batch.atoms;
        }
        let atoms = batch.atoms.clone();
        self.cache = Some(batch);
        atoms
    }

    /// The last cached batch, if any.
    #[must_use]
    pub const fn cache(&self) -> Option<&Cache> {
        self.cache.as_ref()
    }

    pub(crate) fn require_cache(&self) -> Result<&Cache> {
        self.cache.as_ref().ok_or(Error::EmptyCache)
    }

    pub fn clear_cache(&mut self) {
        if self.cache.take().is_some() {
            info!("Cleared atomization cache");
        }
    }

    /// Distinct names in the cached batch.
    pub fn cached_names(&self, order: Option<NameOrder>) -> Result<Vec<String>> {
        Ok(names::names_list(&self.require_cache()?.atoms, order))
    }

    /// Per-name record counts in the cached batch.
    pub fn cached_name_counts(&self, order: Option<NameOrder>) -> Result<Vec<(String, usize)>> {
        Ok(names::name_counts(&self.require_cache()?.atoms, order))
    }

    /// Cached row positions per name, or per remapped normalized name when
    /// a [`NamesMap`] is given.
    pub fn cached_names_index(
        &self,
        names_map: Option<&NamesMap>,
    ) -> Result<BTreeMap<String, Vec<usize>>> {
        let cache = self.require_cache()?;
        let map = names_map.map(|names_map| names_map.get_map(true));
        Ok(names::names_index(&cache.atoms, map.as_ref()))
    }
}

/// Correct (when asked) and parse every row. Nothing is kept on error.
fn parse_batch<S, Q>(
    table: &ReplacementTable,
    raw: &[S],
    parser: &Q,
    options: AtomizeOptions,
) -> std::result::Result<Cache, Q::Error>
where
    S: AsRef<str>,
    Q: NameParser + ?Sized,
{
    let inputs: Vec<String> = raw
        .iter()
        .map(|item| {
            let item = item.as_ref();
            if options.apply_replaces {
                table.apply(item).to_string()
            } else {
                item.to_string()
            }
        })
        .collect();

    let atoms = inputs
        .iter()
        .map(|input| parser.parse(input))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(Cache { inputs, atoms })
}
