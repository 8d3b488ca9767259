use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Validate title exclusion patterns
    Check,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file (unknown keys are kept)
        #[arg(long)]
        force: bool,
    },
}
