use std::path::Path;

use anyhow::Result;

pub fn cmd_expand(topology: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let (spec, warnings) = super::load(topology, config)?;
    super::print_topology("expand", &spec.expanded(), &warnings, json)
}
