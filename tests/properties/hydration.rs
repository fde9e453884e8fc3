//! Property tests for default hydration.

use proptest::prelude::*;

use dmtopo::spec::{
    hydrate_specification, ArchAliases, GlobalOptions, InstanceBase, MasterSpec,
    MonitoredOptions, Specification, WorkerSpec,
};

fn host() -> impl Strategy<Value = String> {
    "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}"
}

fn maybe(values: &'static [&'static str]) -> impl Strategy<Value = String> {
    proptest::sample::select(values).prop_map(str::to_string)
}

fn base() -> impl Strategy<Value = InstanceBase> {
    (
        host(),
        maybe(&["", "my-deploy", "/abs-deploy"]),
        maybe(&["", "my-data", "/abs-data", "/d1,/d2"]),
        maybe(&["", "Linux", "darwin"]),
        maybe(&["", "x86_64", "amd64", "aarch64", "ARM64"]),
    )
        .prop_map(|(host, deploy_dir, data_dir, os, arch)| {
            let mut base = InstanceBase::new(host);
            base.deploy_dir = deploy_dir;
            base.data_dir = data_dir;
            base.os = os;
            base.arch = arch;
            base
        })
}

/// Directory spellings as users write them: trailing slashes, `./`, doubled
/// separators
fn dir(choices: &'static [&'static str]) -> impl Strategy<Value = String> {
    (
        maybe(choices),
        maybe(&["", "/", "//"]),
        any::<bool>(),
    )
        .prop_map(|(dir, suffix, dotted)| {
            if dir.is_empty() {
                dir
            } else if dotted && !dir.starts_with('/') {
                format!("./{}{}", dir, suffix)
            } else {
                format!("{}{}", dir, suffix)
            }
        })
}

fn document() -> impl Strategy<Value = Specification> {
    let global = (
        maybe(&["", "tidb", "test1"]),
        dir(&["", "deploy", "/dm-deploy"]),
        dir(&["", "data", "/gloable_data", "my-data"]),
        dir(&["", "log", "/dm-log"]),
    )
        .prop_map(|(user, deploy_dir, data_dir, log_dir)| GlobalOptions {
            user,
            deploy_dir,
            data_dir,
            log_dir,
            ..Default::default()
        });
    let monitored = (
        dir(&["", "test-deploy", "/mon-deploy"]),
        dir(&["", "mon-data", "/mon-data"]),
        dir(&["", "log", "test-deploy/log", "/mon-log"]),
    )
        .prop_map(|(deploy_dir, data_dir, log_dir)| MonitoredOptions {
            deploy_dir,
            data_dir,
            log_dir,
            ..Default::default()
        });
    let worker = (
        host(),
        maybe(&["", "alice"]),
        dir(&["", "my-deploy", "/abs-deploy"]),
        dir(&["", "my-data", "/abs-data"]),
        dir(&["", "my-log", "/abs-log"]),
    )
        .prop_map(|(host, user, deploy_dir, data_dir, log_dir)| {
            let mut base = InstanceBase::new(host);
            base.user = user;
            base.deploy_dir = deploy_dir;
            base.data_dir = data_dir;
            base.log_dir = log_dir;
            WorkerSpec {
                base,
                ..Default::default()
            }
        });

    (global, monitored, proptest::collection::vec(worker, 0..4)).prop_map(
        |(global, monitored, workers)| Specification {
            global,
            monitored,
            workers,
            ..Default::default()
        },
    )
}

fn port() -> impl Strategy<Value = u16> {
    prop_oneof![Just(0u16), 1024u16..65535]
}

fn topology() -> impl Strategy<Value = Specification> {
    let global = (
        maybe(&["", "tidb", "test1"]),
        maybe(&["", "deploy", "/dm-deploy"]),
        maybe(&["", "data", "/gloable_data", "my-data"]),
        maybe(&["", "aarch64", "amd64"]),
    )
        .prop_map(|(user, deploy_dir, data_dir, arch)| GlobalOptions {
            user,
            deploy_dir,
            data_dir,
            arch,
            ..Default::default()
        });
    let master = (base(), port(), port()).prop_map(|(base, port, peer_port)| MasterSpec {
        base,
        port,
        peer_port,
        ..Default::default()
    });
    let worker = (base(), port()).prop_map(|(base, port)| WorkerSpec {
        base,
        port,
        ..Default::default()
    });

    (
        global,
        proptest::collection::vec(master, 0..4),
        proptest::collection::vec(worker, 0..4),
    )
        .prop_map(|(global, masters, workers)| Specification {
            global,
            masters,
            workers,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Hydrating an already hydrated topology changes nothing.
    #[test]
    fn property_hydration_is_idempotent(spec in topology()) {
        let aliases = ArchAliases::default();
        let mut once = spec;
        hydrate_specification(&mut once, &aliases);
        let mut twice = once.clone();
        hydrate_specification(&mut twice, &aliases);
        prop_assert_eq!(twice, once);
    }

    /// PROPERTY: Decoding a re-encoded topology yields the same topology.
    #[test]
    fn property_yaml_round_trip_is_stable(raw in document()) {
        let yaml = raw.to_yaml_string().unwrap();
        // conflicting documents are out of scope here
        let Ok(once) = Specification::from_yaml_str(&yaml) else {
            return Ok(());
        };
        let twice = Specification::from_yaml_str(&once.to_yaml_string().unwrap()).unwrap();
        prop_assert_eq!(twice, once);
    }

    /// PROPERTY: Every hydrated instance has ports, dirs, a name and a
    /// canonical platform.
    #[test]
    fn property_hydration_fills_every_field(spec in topology()) {
        let mut spec = spec;
        hydrate_specification(&mut spec, &ArchAliases::default());

        for instance in spec.instances() {
            prop_assert!(instance.ports().iter().all(|p| p.port != 0));
            prop_assert!(!instance.deploy_dir().is_empty());
            prop_assert!(!instance.data_dir().is_empty());
            prop_assert!(instance.os() == "linux" || instance.os() == "darwin");
            prop_assert!(instance.arch() == "amd64" || instance.arch() == "arm64");
        }
        for master in &spec.masters {
            prop_assert!(!master.name.is_empty());
        }
    }

    /// PROPERTY: Explicit instance values survive hydration untouched.
    #[test]
    fn property_explicit_values_are_kept(spec in topology()) {
        let mut hydrated = spec.clone();
        hydrate_specification(&mut hydrated, &ArchAliases::default());

        for (before, after) in spec.workers.iter().zip(&hydrated.workers) {
            if !before.base.deploy_dir.is_empty() {
                prop_assert_eq!(&before.base.deploy_dir, &after.base.deploy_dir);
            }
            if !before.base.data_dir.is_empty() {
                prop_assert_eq!(&before.base.data_dir, &after.base.data_dir);
            }
            if before.port != 0 {
                prop_assert_eq!(before.port, after.port);
            }
        }
    }
}
