use std::path::Path;

use anyhow::Result;
use dmtopo::spec::merge_topology;

pub fn cmd_scale_out(
    base: &Path,
    fragment: &Path,
    expand: bool,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let options = super::decode_options(config)?;
    let (mut merged, warnings) = merge_topology(base, fragment, &options)?;
    if expand {
        merged.expand_relative_dirs();
    }
    super::print_topology("scale-out", &merged, &warnings, json)
}
