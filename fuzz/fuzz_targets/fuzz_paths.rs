#![no_main]

use libfuzzer_sys::fuzz_target;

use dmtopo::spec::paths::{abs, clean, is_within};

fuzz_target!(|input: (&str, &str)| {
    let (user, path) = input;
    let cleaned = clean(path);
    assert_eq!(clean(&cleaned), cleaned);

    let anchored = abs(user, path);
    assert!(anchored.starts_with('/'));
    let _ = is_within(&anchored, &cleaned);
});
