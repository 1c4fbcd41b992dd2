use clap::ValueEnum;

/// Module manifest format
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// JSON array of `{ "name", "<kind>": contents }` objects
    #[default]
    #[value(name = "json")]
    Json,

    /// One `kind  name  size` line per module
    #[value(name = "text")]
    Text,
}
