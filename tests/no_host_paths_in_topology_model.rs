//! Lint test: topology paths are remote paths.
//!
//! Directories in a topology live on deployment hosts, so the model handles
//! them as `/`-separated strings through `spec::paths`. Host path types or
//! file system calls in the model would make results depend on the machine
//! running dmtopo.
//!
//! Allowed exceptions:
//! - `src/spec/loader.rs` - reads topology files from the local disk

use std::fs;
use std::path::Path;

const ALLOWED_FILES: &[&str] = &["src/spec/loader.rs"];

const FORBIDDEN: &[&str] = &["std::path", "std::fs", "PathBuf", "Path::new", "canonicalize("];

fn check_file(path: &Path, violations: &mut Vec<String>) {
    let relative = path
        .strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(path);
    let relative_str = relative.to_string_lossy().replace('\\', "/");

    if ALLOWED_FILES.iter().any(|f| relative_str.ends_with(f)) {
        return;
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return,
    };

    for (line_num, line) in content.lines().enumerate() {
        if let Some(pattern) = FORBIDDEN.iter().find(|p| line.contains(**p)) {
            violations.push(format!(
                "{}:{}: `{}` in the topology model",
                relative_str,
                line_num + 1,
                pattern
            ));
        }
    }
}

#[test]
fn no_host_paths_in_topology_model() {
    let spec_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("src").join("spec");

    let mut violations = Vec::new();
    for entry in fs::read_dir(&spec_dir).unwrap().filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "rs") {
            check_file(&path, &mut violations);
        }
    }

    if !violations.is_empty() {
        panic!(
            "\n\nFound {} host path use(s):\n\n{}\n\n\
            Use dmtopo::spec::paths for topology directories.\n",
            violations.len(),
            violations.join("\n")
        );
    }
}
