//! Subcommand implementations

pub mod check;
pub mod count_dir;
pub mod display;
pub mod expand;
pub mod scale_out;

use std::path::Path;

use anyhow::Result;
use dmtopo::config::Config;
use dmtopo::spec::{parse_topology_yaml, DecodeOptions, Specification, TopologyWarning};

/// Configuration for this invocation: `--config`, user config, env
pub fn decode_options(config_path: Option<&Path>) -> Result<DecodeOptions> {
    let (config, _warnings) = Config::load_or_default(config_path)?;
    Ok(config.decode_options())
}

pub fn load(
    topology: &Path,
    config_path: Option<&Path>,
) -> Result<(Specification, Vec<TopologyWarning>)> {
    let options = decode_options(config_path)?;
    Ok(parse_topology_yaml(topology, &options)?)
}

pub fn warnings_json(warnings: &[TopologyWarning]) -> serde_json::Value {
    warnings
        .iter()
        .map(|w| {
            serde_json::json!({
                "key": w.path,
                "file": w.file,
                "line": w.line,
                "suggestion": w.suggestion,
            })
        })
        .collect()
}

/// Print a topology as YAML, or as a JSON `topology` event
pub fn print_topology(
    command: &str,
    spec: &Specification,
    warnings: &[TopologyWarning],
    json: bool,
) -> Result<()> {
    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "topology",
            "command": command,
            "topology": serde_json::to_value(spec)?,
            "warnings": warnings_json(warnings),
        }))?;
    } else {
        print!("{}", spec.to_yaml_string()?);
    }
    Ok(())
}
