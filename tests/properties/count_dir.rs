//! Property tests for directory counting.

use proptest::prelude::*;

use dmtopo::spec::{
    hydrate_specification, ArchAliases, GlobalOptions, InstanceBase, Specification, WorkerSpec,
};

const HOST: &str = "172.16.5.138";

/// Workers on one host under `/dm`, each with the default relative data dir
fn workers_on_host(ports: &[u16]) -> Specification {
    let mut spec = Specification {
        global: GlobalOptions {
            deploy_dir: "/dm".to_string(),
            ..Default::default()
        },
        workers: ports
            .iter()
            .map(|&port| WorkerSpec {
                base: InstanceBase::new(HOST),
                port,
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    };
    hydrate_specification(&mut spec, &ArchAliases::default());
    spec
}

fn ports() -> impl Strategy<Value = Vec<u16>> {
    proptest::collection::btree_set(1024u16..65535, 1..6).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Deploy, data and log dirs of every instance are counted.
    #[test]
    fn property_counts_three_dirs_per_instance(ports in ports()) {
        let spec = workers_on_host(&ports);
        let n = ports.len() * 3;
        prop_assert_eq!(spec.count_dir(HOST, ""), n);
        prop_assert_eq!(spec.count_dir(HOST, "/"), n);
        prop_assert_eq!(spec.count_dir(HOST, "/dm"), n);
    }

    /// PROPERTY: A query counts only its own instance, never a sibling whose
    /// directory shares a string prefix.
    #[test]
    fn property_counting_matches_segments(ports in ports()) {
        let spec = workers_on_host(&ports);
        for port in &ports {
            let deploy_dir = format!("/dm/dm-worker-{}", port);
            prop_assert_eq!(spec.count_dir(HOST, &deploy_dir), 3);
            prop_assert_eq!(spec.count_dir(HOST, &format!("{}-x", deploy_dir)), 0);
        }
        prop_assert_eq!(spec.count_dir(HOST, "/d"), 0);
    }

    /// PROPERTY: Other hosts never see this host's directories.
    #[test]
    fn property_other_hosts_count_nothing(ports in ports(), last in 0u8..=255) {
        prop_assume!(format!("172.16.5.{}", last) != HOST);
        let spec = workers_on_host(&ports);
        prop_assert_eq!(spec.count_dir(&format!("172.16.5.{}", last), ""), 0);
    }
}
