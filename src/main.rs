use anyhow::Result;
use clap::Parser;
use console::Style;
use tracing_subscriber::EnvFilter;

use fwctl::cli::{Cli, Commands, ConfigCommands, ReportArgs};
use fwctl::commands;
use fwctl::commands::firmware::{ReportOptions, ReportSummary};
use fwctl::config::load_config;

fn main() {
    let cli = Cli::parse();

    // Set up tracing
    let filter = if cli.global_opts.quiet {
        "error".to_string()
    } else {
        match cli.global_opts.debug {
            0 => "warn".to_string(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.global_opts.no_color {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    match run(cli) {
        Ok(Some(summary)) if summary.has_failures() => std::process::exit(1),
        Ok(_) => {}
        Err(err) => {
            let red = Style::new().red().for_stderr();
            eprintln!("{} {:#}", red.apply_to("Error:"), err);
            std::process::exit(1);
        }
    }
}

/// Runs the selected command. Report commands return their summary so a report
/// with failed devices can still exit non-zero after it has been printed.
fn run(cli: Cli) -> Result<Option<ReportSummary>> {
    let json = cli.global_opts.json;
    let quiet = cli.global_opts.quiet;

    match cli.command {
        Commands::Query(args) => {
            let opts = report_options(&args, json, quiet)?;
            commands::firmware::query(&args.file, &opts).map(Some)
        }
        Commands::Update(args) => {
            let opts = report_options(&args, json, quiet)?;
            commands::firmware::update(&args.file, &opts).map(Some)
        }
        Commands::Config { command } => match command {
            ConfigCommands::Show => commands::config::show(json).map(|_| None),
            ConfigCommands::Init { force } => commands::config::init(force).map(|_| None),
        },
    }
}

/// Merge command-line flags over the `[report]` config table.
fn report_options(args: &ReportArgs, json: bool, quiet: bool) -> Result<ReportOptions> {
    let config = load_config()?;
    let mut print = config.report.print_config();
    print.show_host_ports |= args.show_host_ports;
    Ok(ReportOptions {
        verbose: args.verbose || config.report.verbose,
        json,
        quiet,
        print,
    })
}
