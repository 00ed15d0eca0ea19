//! wheelwright CLI - Build tool for native Python wheels
//!
//! Commands:
//! - `wheelwright build` - Compile the native library and package a wheel
//! - `wheelwright list` - List the files recorded in a wheel
//! - `wheelwright verify` - Check wheel members against RECORD
//! - `wheelwright check` - Validate a wheelwright.toml config

use clap::{Parser, Subcommand};

mod compile;
mod config;
mod logging;
mod package;

#[derive(Parser)]
#[command(name = "wheelwright")]
#[command(author, version, about = "Build tool for native Python wheels", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile the native library and package it as a wheel
    Build {
        /// Path to wheelwright.toml (default: ./wheelwright.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Build and package the debug profile
        #[arg(short, long)]
        debug: bool,

        /// Package an existing library without running the compiler
        #[arg(long)]
        skip_compile: bool,

        /// Output directory (overrides [output] dir)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the files recorded in a wheel
    List {
        /// Path to the .whl file
        wheel: String,
    },

    /// Check every wheel member against RECORD
    Verify {
        /// Path to the .whl file
        wheel: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a wheelwright.toml config
    Check {
        /// Path to wheelwright.toml (default: ./wheelwright.toml)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Build {
            config,
            debug,
            skip_compile,
            output,
        } => {
            package::run(package::BuildOptions {
                config,
                debug,
                skip_compile,
                output,
            })?;
        }
        Commands::List { wheel } => {
            package::list(&wheel)?;
        }
        Commands::Verify { wheel, json } => {
            package::verify(&wheel, json)?;
        }
        Commands::Check { config } => {
            config::check(config)?;
        }
    }

    Ok(())
}
