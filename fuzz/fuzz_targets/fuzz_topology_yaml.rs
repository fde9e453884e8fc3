#![no_main]

use dmtopo::InstanceSpec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Decoding never panics; an accepted topology survives every query
        if let Ok(spec) = dmtopo::Specification::from_yaml_str(content) {
            let expanded = spec.expanded();
            for instance in spec.instances() {
                let _ = spec.count_dir(instance.host(), "");
                let _ = expanded.count_dir(instance.host(), instance.deploy_dir());
            }
            let _ = spec.to_yaml_string();
        }
    }
});
