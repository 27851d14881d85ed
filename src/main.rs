//! Trace Normalizer CLI
//!
//! Turns exception objects from different JavaScript-style runtimes into
//! one structured stack trace document.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_normalizer::commands::{
    display_schema, display_version, execute_caller, execute_parse, validate_document_file,
    CallerArgs, ParseArgs,
};
use trace_normalizer::utils::config::{ComputeConfig, DEBUG_ENV_VAR};

/// Trace Normalizer - structured stack traces from raw exceptions
#[derive(Parser, Debug)]
#[command(name = "trace-normalizer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Report detector faults instead of skipping the detector
    #[arg(
        long,
        global = true,
        env = DEBUG_ENV_VAR,
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    debug_faults: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute the stack trace of an exception
    Parse {
        /// JSON file with the exception (name, message, stack, stacktrace)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Plain text file used as the exception's stack property
        #[arg(short, long)]
        stack_file: Option<PathBuf>,

        /// Exception name (with --stack-file)
        #[arg(long)]
        name: Option<String>,

        /// Exception message (with --stack-file)
        #[arg(long)]
        message: Option<String>,

        /// Output path for the JSON document (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a text listing of the frames
        #[arg(long)]
        summary: bool,
    },

    /// Capture this process's own call stack
    Caller {
        /// Frames to skip (recorded, not applied)
        #[arg(long)]
        depth: Option<usize>,

        /// Output path for the JSON document (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print a text listing of the frames
        #[arg(long)]
        summary: bool,
    },

    /// Validate a trace document
    Validate {
        /// Path to trace JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = ComputeConfig::new().with_propagate_faults(cli.debug_faults);

    match cli.command {
        Commands::Parse {
            input,
            stack_file,
            name,
            message,
            output,
            summary,
        } => {
            execute_parse(ParseArgs {
                input_json: input,
                stack_file,
                name,
                message,
                output,
                print_summary: summary,
                config,
            })?;
        }

        Commands::Caller {
            depth,
            output,
            summary,
        } => {
            execute_caller(CallerArgs {
                depth,
                output,
                print_summary: summary,
                config,
            })?;
        }

        Commands::Validate { file } => {
            validate_document_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
