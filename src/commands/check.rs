use std::path::Path;

use anyhow::Result;

use crate::ui::views::check::{group_counts, host_count, render_check_summary};

pub fn cmd_check(topology: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let (spec, warnings) = super::load(topology, config)?;

    if json {
        let groups: serde_json::Map<String, serde_json::Value> = group_counts(&spec)
            .into_iter()
            .map(|(group, count)| (group.to_string(), count.into()))
            .collect();
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "check",
            "valid": true,
            "instances": spec.instance_count(),
            "hosts": host_count(&spec),
            "groups": groups,
            "warnings": super::warnings_json(&warnings),
        }))?;
    } else {
        print!(
            "{}",
            render_check_summary(&topology.display().to_string(), &spec)
        );
    }

    Ok(())
}
