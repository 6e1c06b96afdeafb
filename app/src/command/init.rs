use colnames_config::Config;

/// Strategy for initializing the configuration.
///
/// This strategy creates the default configuration file at
/// `~/colnames/config.json` and refuses to overwrite an existing one.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::create_config()?;

        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Configuration options:");
        println!("   - parser.delimiters: strings separating names within a row");
        println!("   - parser.unique: drop repeated names within a row");
        println!("   - replaces.table_path: replacement table applied before parsing");
        println!("   - ranking.excluded_atoms: names left out of 'colnames rank'");
        println!("   - input.missing_value: text used for empty rows");
        Ok(())
    }
}
