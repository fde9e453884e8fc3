//! Relative path expansion
//!
//! Turns relative directories into absolute ones anchored at the home of
//! each instance's deployment user. Deploy dirs anchor at the home directory; relative data and
//! log dirs anchor inside the (expanded) deploy dir of their instance.
//!
//! This pass is explicit: decoding and merging never run it, because the
//! relative form is what gets written back to the topology file.

use super::paths;
use super::topology::Specification;

/// Expand every instance and the monitoring agent options in place.
///
/// Global options are left alone: a relative global `data_dir` means
/// "inside each instance's deploy dir" and must keep that meaning.
pub fn expand_relative_dirs(spec: &mut Specification) {
    for instance in spec.instances_mut() {
        let base = instance.base_mut();
        expand_deploy_dir(&base.user, &mut base.deploy_dir);
        expand_nested(&base.deploy_dir, &mut base.data_dir);
        if !base.log_dir.is_empty() && !paths::is_absolute(&base.log_dir) {
            base.log_dir = paths::join(&base.deploy_dir, &base.log_dir);
        }
    }

    let user = spec.global.user.clone();
    let monitored = &mut spec.monitored;
    expand_deploy_dir(&user, &mut monitored.deploy_dir);
    expand_nested(&monitored.deploy_dir, &mut monitored.data_dir);
    // hydration already placed a relative monitored log dir under the deploy dir
    if !monitored.log_dir.is_empty() && !paths::is_absolute(&monitored.log_dir) {
        monitored.log_dir = paths::abs(&user, &monitored.log_dir);
    }
}

fn expand_deploy_dir(user: &str, deploy_dir: &mut String) {
    if !deploy_dir.is_empty() && !paths::is_absolute(deploy_dir) {
        *deploy_dir = paths::abs(user, deploy_dir);
    }
}

fn expand_nested(deploy_dir: &str, data_dir: &mut String) {
    if data_dir.is_empty() || data_dir_entries(data_dir).all(paths::is_absolute) {
        return;
    }
    *data_dir = data_dir_entries(data_dir.as_str())
        .map(|entry| {
            if paths::is_absolute(entry) {
                entry.to_string()
            } else {
                paths::join(deploy_dir, entry)
            }
        })
        .collect::<Vec<_>>()
        .join(",");
}

/// Entries of a possibly comma-separated data dir
pub(crate) fn data_dir_entries(data_dir: &str) -> impl Iterator<Item = &str> {
    data_dir.split(',').map(str::trim)
}

/// Absolute location of a deploy dir
pub(crate) fn resolve_deploy_dir(user: &str, deploy_dir: &str) -> String {
    paths::abs(user, deploy_dir)
}

/// Absolute location of a data or log dir of an instance whose deploy dir
/// resolves to `resolved_deploy_dir`. Empty resolves to the deploy dir itself.
pub(crate) fn resolve_nested_dir(resolved_deploy_dir: &str, dir: &str) -> String {
    if paths::is_absolute(dir) {
        paths::clean(dir)
    } else {
        paths::join(resolved_deploy_dir, dir)
    }
}
