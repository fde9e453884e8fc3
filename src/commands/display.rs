use std::path::Path;

use anyhow::Result;

use crate::ui::views::display::{instance_rows, render_instances};

pub fn cmd_display(topology: &Path, expand: bool, config: Option<&Path>, json: bool) -> Result<()> {
    let (mut spec, warnings) = super::load(topology, config)?;
    if expand {
        spec.expand_relative_dirs();
    }

    let rows = instance_rows(&spec);
    if json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "display",
            "user": spec.global.user,
            "instances": serde_json::to_value(&rows)?,
            "warnings": super::warnings_json(&warnings),
        }))?;
    } else {
        println!("Deploy user: {}", spec.global.user);
        print!("{}", render_instances(&rows));
    }

    Ok(())
}
