use std::path::Path;

use anyhow::Result;

pub fn cmd_count_dir(
    topology: &Path,
    host: &str,
    path: &str,
    config: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (spec, _warnings) = super::load(topology, config)?;
    let count = spec.count_dir(host, path);

    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "count-dir",
            "host": host,
            "path": path,
            "count": count,
        }))?;
    } else {
        println!("{}", count);
    }

    Ok(())
}
