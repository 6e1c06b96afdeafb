use colnames_config::Config;
use colnames_core::ReplacementTable;
use tracing::info;

/// Strategy for displaying the effective configuration.
///
/// Prints every config section and, when a replacement table is
/// configured, its size and any keys that also appear as values.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;

        println!("=== colnames Configuration ===\n");

        println!("Parser:");
        println!("  Delimiters: {}", format_list(&config.parser.delimiters));
        println!("  Unique: {}", config.parser.unique);
        println!("  Preserve Order: {}", config.parser.preserve_order);
        println!();

        println!("Replacements:");
        match &config.replaces.table_path {
            Some(path) => {
                println!("  Table: {}", path.display());
                info!("Checking replacement table");
                match ReplacementTable::read_from(path) {
                    Ok(table) => {
                        println!("  Entries: {}", table.len());
                        let chained = table.inconsistencies();
                        if !chained.is_empty() {
                            println!("  Keys also used as values: {}", chained.len());
                        }
                    }
                    Err(e) => {
                        println!("  Status: Unreadable");
                        println!("  Error: {e}");
                    }
                }
            }
            None => println!("  Table: (not set)"),
        }
        println!();

        println!("Ranking:");
        println!(
            "  Excluded Atoms: {}",
            format_list(&config.ranking.excluded_atoms)
        );
        if let Some(limit) = config.ranking.limit {
            println!("  Limit: {limit}");
        }
        println!();

        println!("Input:");
        println!("  Missing Value: {:?}", config.input.missing_value);

        Ok(())
    }
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        "(empty)".to_string()
    } else {
        items
            .iter()
            .map(|item| format!("{item:?}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
