//! Property tests for lexical path handling.

use proptest::prelude::*;

use dmtopo::spec::paths::{abs, clean, is_within, join};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap()
}

fn absolute_dir() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=4).prop_map(|s| format!("/{}", s.join("/")))
}

fn relative_suffix() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 0..=4).prop_map(|s| s.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Cleaning never panics and is idempotent.
    #[test]
    fn property_clean_is_idempotent(
        s in "(?s).{0,128}"
    ) {
        let once = clean(&s);
        prop_assert_eq!(clean(&once), once);
    }

    /// PROPERTY: Anchoring always yields an absolute path.
    #[test]
    fn property_abs_is_absolute(
        user in "[a-z]{1,8}",
        path in "[A-Za-z0-9./_-]{0,64}"
    ) {
        prop_assert!(abs(&user, &path).starts_with('/'));
    }

    /// PROPERTY: Anything joined below a directory lies within it.
    #[test]
    fn property_join_stays_within(
        prefix in absolute_dir(),
        suffix in relative_suffix()
    ) {
        prop_assert!(is_within(&join(&prefix, &suffix), &prefix));
    }

    /// PROPERTY: A sibling sharing a string prefix is never within.
    #[test]
    fn property_sibling_is_not_within(
        prefix in absolute_dir(),
        extra in "[a-z0-9-]{1,8}"
    ) {
        let sibling = format!("{}{}", prefix, extra);
        prop_assert!(!is_within(&sibling, &prefix));
    }
}
