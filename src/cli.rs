use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dmtopo - resolve, validate and merge DM cluster topologies
#[derive(Parser, Debug)]
#[command(name = "dmtopo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.config/dmtopo/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a topology, fill defaults and check it for conflicts
    Check {
        /// Topology file
        topology: PathBuf,
    },

    /// List every instance with its resolved ports, directories and platform
    Display {
        /// Topology file
        topology: PathBuf,

        /// Show directories as absolute paths
        #[arg(long)]
        expand: bool,
    },

    /// Merge a scale-out fragment into a topology and print the result
    ScaleOut {
        /// Existing cluster topology
        base: PathBuf,

        /// Topology fragment with the new instances
        fragment: PathBuf,

        /// Print directories as absolute paths
        #[arg(long)]
        expand: bool,
    },

    /// Print the topology with every relative directory made absolute
    Expand {
        /// Topology file
        topology: PathBuf,
    },

    /// Count instance directories on a host at or below a path
    CountDir {
        /// Topology file
        topology: PathBuf,

        /// Host to inspect
        host: String,

        /// Directory prefix; relative paths start at the user's home
        #[arg(default_value = "")]
        path: String,
    },
}
