//! dmtopo CLI - DM cluster topology tool
//!
//! Usage: dmtopo <COMMAND>
//!
//! Commands:
//!   check      Load a topology and check it for conflicts
//!   display    List instances with resolved ports and directories
//!   scale-out  Merge a scale-out fragment into a topology
//!   expand     Print the topology with absolute directories
//!   count-dir  Count instance directories below a path on a host

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::LevelFilter;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    match run(cli) {
        Err(err) if json => {
            let _ = ui::json::emit(serde_json::json!({
                "event": "error",
                "message": format!("{:#}", err),
            }));
            std::process::exit(1);
        }
        result => result,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    let json = cli.json;

    match cli.command {
        Commands::Check { topology } => commands::check::cmd_check(&topology, config, json),
        Commands::Display { topology, expand } => {
            commands::display::cmd_display(&topology, expand, config, json)
        }
        Commands::ScaleOut {
            base,
            fragment,
            expand,
        } => commands::scale_out::cmd_scale_out(&base, &fragment, expand, config, json),
        Commands::Expand { topology } => commands::expand::cmd_expand(&topology, config, json),
        Commands::CountDir {
            topology,
            host,
            path,
        } => commands::count_dir::cmd_count_dir(&topology, &host, &path, config, json),
    }
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level one step from warn.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
