use crate::backend::Backend;
use crate::commands;
use crate::common::CommonParams;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use colored::Colorize;

const LOG_FILE: &str = "kinex-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Kinex: AI-powered enzyme-substrate relationship extraction",
    long_about = "Kinex extracts enzyme-substrate and kinase-substrate relationship pairs from scientific paper text by prompting an LLM backend and repairing its free-form answer into a validated pair list.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, status messages, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Extract relationship pairs from a paper
    #[command(
        about = "Extract relationship pairs from a paper",
        long_about = "Extract enzyme-substrate or kinase-substrate relationship pairs from a paper's text using an LLM backend, with automatic response repair and retry.",
        after_help = get_dynamic_help()
    )]
    Extract {
        #[command(flatten)]
        common: CommonParams,

        /// Path to the paper text (or HTML with --html)
        #[arg(help = "Path to the paper text (or HTML with --html)")]
        file: String,

        /// Treat the input as publisher HTML and extract the article body first
        #[arg(
            long,
            help = "Treat the input as publisher HTML and extract the article body first"
        )]
        html: bool,

        /// Relationship family to extract
        #[arg(
            long,
            value_parser = ["enzyme", "kinase"],
            default_value = "enzyme",
            help = "Relationship family to extract (enzyme: list-of-pairs, kinase: UniProt mapping)"
        )]
        kind: String,

        /// Print the per-attempt transcript after the result
        #[arg(long, help = "Print the per-attempt transcript after the result")]
        transcript: bool,
    },

    /// Configure Kinex settings and backends
    #[command(about = "Configure Kinex settings and backends")]
    Config {
        #[command(flatten)]
        common: CommonParams,

        /// Set API key for the selected backend
        #[arg(long, help = "Set API key for the selected backend")]
        api_key: Option<String>,

        /// Set model for the selected backend
        #[arg(long, help = "Set model for the selected backend")]
        model: Option<String>,

        /// Set additional parameters for the selected backend
        #[arg(
            long,
            help = "Set additional parameters for the selected backend (key=value)"
        )]
        param: Option<Vec<String>>,
    },

    /// List available LLM backends
    #[command(about = "List available LLM backends")]
    ListBackends,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Generate dynamic help including available LLM backends
fn get_dynamic_help() -> String {
    let backends_list = Backend::all_names()
        .iter()
        .map(|b| format!("{}", b.bold()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!("\nAvailable LLM Backends: {backends_list}")
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
    } else {
        crate::logger::disable_logging();
    }

    // Set quiet mode in the UI module
    if cli.quiet {
        crate::ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        commands::handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["kinex", "--help"]);
        Ok(())
    }
}
