use std::collections::HashSet;

use dmtopo::spec::{Role, Specification};

/// Per-group instance counts, groups in declaration order
pub fn group_counts(spec: &Specification) -> Vec<(&'static str, usize)> {
    Role::ALL
        .iter()
        .map(|role| (role.group(), spec.group(*role).len()))
        .collect()
}

pub fn host_count(spec: &Specification) -> usize {
    spec.instances()
        .map(|i| i.host())
        .collect::<HashSet<_>>()
        .len()
}

pub fn render_check_summary(source: &str, spec: &Specification) -> String {
    let mut out = format!("Topology OK: {}\n", source);

    let counts = group_counts(spec);
    let width = counts.iter().map(|(g, _)| g.len()).max().unwrap_or(0);
    for (group, count) in counts {
        out.push_str(&format!("  {:<width$}  {}\n", group, count, width = width));
    }

    out.push_str(&format!(
        "{} instance(s) on {} host(s)\n",
        spec.instance_count(),
        host_count(spec)
    ));
    out
}
