use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fwctl",
    version,
    about = "SCM firmware query and update reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global_opts: GlobalOpts,
}

#[derive(Args)]
pub struct GlobalOpts {
    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report firmware query results collected from storage hosts
    Query(ReportArgs),
    /// Report firmware update results collected from storage hosts
    Update(ReportArgs),
    /// Manage the fwctl configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args)]
pub struct ReportArgs {
    /// JSON file with per-host results (`-` reads stdin)
    pub file: String,

    /// Print one block per host instead of grouping hosts by result
    #[arg(long)]
    pub verbose: bool,

    /// Keep :port suffixes in host names
    #[arg(long)]
    pub show_host_ports: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
