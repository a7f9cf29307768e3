//! mcucfg CLI: validate pin map and vector table descriptions.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use mcucfg::config;
use mcucfg::pinmap::PinMap;
use mcucfg::pinmap::family::StmCortexM;
use mcucfg::vector_table::VectorTable;

#[derive(Parser, Debug)]
#[command(
    name = "mcucfg",
    about = "Validation of microcontroller build-configuration artifacts."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a pin map definition (TOML, one table per pin) and dump it
    Pinmap {
        /// Path to the pin map definition file
        file: PathBuf,

        /// Also print the set of used ports
        #[arg(long)]
        ports: bool,

        /// Also print the functional groups
        #[arg(long)]
        groups: bool,
    },
    /// Parse a vector table description and print every slot
    Vectors {
        /// Path to the vector table description file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Pinmap { file, ports, groups } => run_pinmap(file, *ports, *groups),
        Commands::Vectors { file } => run_vectors(file),
    }
}

fn run_pinmap(file: &PathBuf, ports: bool, groups: bool) {
    tracing::info!("loading pin map definition from {}", file.display());
    let defs = match config::load_pin_definitions(file) {
        Ok(defs) => defs,
        Err(e) => {
            tracing::error!("failed to load '{}': {e}", file.display());
            process::exit(1);
        }
    };

    let pinmap = match PinMap::new(&StmCortexM, &defs) {
        Ok(pinmap) => pinmap,
        Err(e) => {
            tracing::error!("invalid pin map definition: {e}");
            process::exit(1);
        }
    };
    tracing::info!("validated {} pin definitions", pinmap.len());

    pinmap.dump();
    if ports {
        let letters: Vec<String> = pinmap.used_ports().iter().map(|port| port.to_string()).collect();
        println!("used ports: {}", letters.join(", "));
    }
    if groups {
        for (key, pins) in pinmap.functional_groups() {
            let members: Vec<&str> = pins.iter().map(|pin| pin.name.as_str()).collect();
            println!("{key}: {}", members.join(", "));
        }
    }
}

fn run_vectors(file: &PathBuf) {
    let table = match VectorTable::from_path(file) {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("failed to parse '{}': {e}", file.display());
            process::exit(1);
        }
    };

    for (offset, handler) in table.iter() {
        println!("0x{offset:08x}: {}", handler.unwrap_or("-"));
    }
}
