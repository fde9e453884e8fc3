mod common;

use common::*;

const TOPOLOGY: &str = r#"
global:
  user: "test1"
  deploy_dir: "/test-deploy"
master_servers:
  - host: 172.16.5.138
    deploy_dir: "master-deploy"
    data_dir: "/test-data/data-1"
worker_servers:
  - host: 172.16.5.138
    data_dir: "/test-data/data-2"
"#;

fn count(env: &TestEnv, args: &[&str]) -> String {
    let topo = env.write("topo.yaml", TOPOLOGY);
    let mut full = vec!["count-dir", topo.to_str().unwrap()];
    full.extend_from_slice(args);
    let result = env.run(&full);
    assert!(result.success, "stderr:\n{}", result.stderr);
    result.stdout.trim().to_string()
}

#[test]
fn test_count_dir_prefix() {
    let env = TestEnv::new();
    assert_eq!(count(&env, &["172.16.5.138", "/test-data"]), "2");
    assert_eq!(count(&env, &["172.16.5.138", "/test-deploy/dm-worker-8262"]), "2");
    assert_eq!(count(&env, &["172.16.5.138", "test-data"]), "0");
}

#[test]
fn test_count_dir_without_path_counts_everything() {
    let env = TestEnv::new();
    assert_eq!(count(&env, &["172.16.5.138"]), "6");
    assert_eq!(count(&env, &["172.16.5.1"]), "0");
}

#[test]
fn test_count_dir_json() {
    let env = TestEnv::new();
    let topo = env.write("topo.yaml", TOPOLOGY);

    let result = env.run(&["--json", "count-dir", topo.to_str().unwrap(), "172.16.5.138", "/test-data/data-1"]);

    assert!(result.success, "stderr:\n{}", result.stderr);
    let event = &result.events()[0];
    assert_eq!(event["command"], "count-dir");
    assert_eq!(event["count"], 1);
}
