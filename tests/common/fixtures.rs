//! Reusable topology documents.

/// Two masters and two workers on two hosts
pub const BASE_TOPOLOGY: &str = r#"
global:
  user: tidb
  deploy_dir: /dm-deploy
  data_dir: /dm-data
master_servers:
  - host: 172.16.5.140
  - host: 172.16.5.141
worker_servers:
  - host: 172.16.5.140
  - host: 172.16.5.141
"#;

/// One new worker on a new host
pub const SCALE_OUT: &str = r#"
worker_servers:
  - host: 172.16.5.142
"#;

/// Directory conflict between a master and a worker on one host
pub const CONFLICTING_TOPOLOGY: &str = r#"
master_servers:
  - host: 172.16.5.138
    deploy_dir: "/test-1"
worker_servers:
  - host: 172.16.5.138
    data_dir: "/test-1"
"#;
