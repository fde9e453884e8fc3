use serde::Serialize;

use dmtopo::spec::{InstanceSpec, Specification};

/// One row of `dmtopo display`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceRow {
    pub id: String,
    pub role: String,
    pub host: String,
    pub ports: String,
    pub platform: String,
    pub deploy_dir: String,
    pub data_dir: String,
    pub log_dir: String,
    pub imported: bool,
}

impl InstanceRow {
    fn from_instance(instance: &dyn InstanceSpec) -> Self {
        let ports: Vec<String> = instance.ports().iter().map(|p| p.port.to_string()).collect();
        Self {
            id: format!("{}:{}", instance.host(), instance.main_port()),
            role: instance.role().name().to_string(),
            host: instance.host().to_string(),
            ports: ports.join("/"),
            platform: format!("{}/{}", instance.os(), instance.arch()),
            deploy_dir: instance.deploy_dir().to_string(),
            data_dir: instance.data_dir().to_string(),
            log_dir: instance.log_dir().to_string(),
            imported: instance.is_imported(),
        }
    }
}

pub fn instance_rows(spec: &Specification) -> Vec<InstanceRow> {
    spec.instances().map(InstanceRow::from_instance).collect()
}

const HEADERS: [&str; 7] = ["ID", "Role", "Host", "Ports", "OS/Arch", "Data Dir", "Deploy Dir"];

pub fn render_instances(rows: &[InstanceRow]) -> String {
    let cells: Vec<[&str; 7]> = rows
        .iter()
        .map(|r| {
            [
                r.id.as_str(),
                r.role.as_str(),
                r.host.as_str(),
                r.ports.as_str(),
                r.platform.as_str(),
                r.data_dir.as_str(),
                r.deploy_dir.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut out, &rule.each_ref().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&format!("Total nodes: {}\n", rows.len()));
    out
}

fn push_line(out: &mut String, cells: &[&str; 7], widths: &[usize; 7]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOPOLOGY: &str = r#"
global:
  user: tidb
  deploy_dir: /dm
master_servers:
  - host: 10.0.0.1
worker_servers:
  - host: 10.0.0.1
    arch: aarch64
    os: Linux
"#;

    #[test]
    fn rows_follow_group_order() {
        let err = Specification::from_yaml_str(TOPOLOGY).unwrap_err();
        // aarch64 worker next to an amd64 master is a platform mismatch
        assert_eq!(
            err.to_string(),
            "platform mismatch for '10.0.0.1' between 'master_servers:linux/amd64' and 'worker_servers:linux/arm64'"
        );

        let spec = Specification::from_yaml_str(&TOPOLOGY.replace("aarch64", "x86_64")).unwrap();
        let rows = instance_rows(&spec);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "10.0.0.1:8261");
        assert_eq!(rows[0].ports, "8261/8291");
        assert_eq!(rows[1].role, "dm-worker");
        assert_eq!(rows[1].platform, "linux/amd64");
        assert_eq!(rows[1].deploy_dir, "/dm/dm-worker-8262");
    }

    #[test]
    fn table_is_aligned() {
        let spec = Specification::from_yaml_str(&TOPOLOGY.replace("aarch64", "amd64")).unwrap();
        insta::assert_snapshot!(render_instances(&instance_rows(&spec)), @r"
        ID             Role       Host      Ports      OS/Arch      Data Dir  Deploy Dir
        -------------  ---------  --------  ---------  -----------  --------  ------------------
        10.0.0.1:8261  dm-master  10.0.0.1  8261/8291  linux/amd64  data      /dm/dm-master-8261
        10.0.0.1:8262  dm-worker  10.0.0.1  8262       linux/amd64  data      /dm/dm-worker-8262
        Total nodes: 2
        ");
    }
}
