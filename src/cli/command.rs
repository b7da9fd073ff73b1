/// Programmatic commands; the binary maps its clap subcommands onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the demonstration steps against the configured collection.
    Run,
    /// Drop the collection and insert the sample books.
    Seed,
    /// List step labels without connecting.
    Steps,
    /// Print the resolved configuration with the URI redacted.
    ShowConfig,
}
