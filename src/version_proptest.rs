//! Property-based tests for version parsing and selection.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::version::{select_latest, Version};
    use proptest::prelude::*;

    proptest! {
        /// Property: zero-padding is idempotent. Parsing a tag with 1-3
        /// numeric components and re-stringifying via the triple lands in
        /// the same ordering class as the original.
        #[test]
        fn parse_then_restringify_preserves_ordering_class(
            major in 0u64..10_000,
            minor in 0u64..10_000,
            patch in 0u64..10_000,
            components in 1usize..=3,
        ) {
            let raw = match components {
                1 => format!("v{}", major),
                2 => format!("v{}.{}", major, minor),
                _ => format!("v{}.{}.{}", major, minor, patch),
            };
            let parsed = Version::parse(&raw).unwrap();
            let restrung = format!(
                "v{}.{}.{}",
                parsed.major(),
                parsed.minor(),
                parsed.patch()
            );
            let reparsed = Version::parse(&restrung).unwrap();
            prop_assert_eq!(parsed, reparsed);
        }

        /// Property: parsing never panics, whatever the input.
        #[test]
        fn parse_never_panics(input in ".*") {
            let _ = Version::parse(&input);
        }

        /// Property: a parsed version with no suffix is always a release,
        /// and one with a suffix never is.
        #[test]
        fn suffix_determines_release_eligibility(
            major in 0u64..1_000,
            minor in 0u64..1_000,
            patch in 0u64..1_000,
            suffix in proptest::option::of("[a-z][a-z0-9]{0,8}"),
        ) {
            let raw = match &suffix {
                Some(s) => format!("v{}.{}.{}-{}", major, minor, patch, s),
                None => format!("v{}.{}.{}", major, minor, patch),
            };
            let parsed = Version::parse(&raw).unwrap();
            prop_assert_eq!(parsed.is_release(), suffix.is_none());
        }

        /// Property: select_latest returns a version that is >= every
        /// release version in the input.
        #[test]
        fn select_latest_is_maximum(
            triples in proptest::collection::vec((0u64..100, 0u64..100, 0u64..100), 1..20),
        ) {
            let tags: Vec<String> = triples
                .iter()
                .map(|(ma, mi, pa)| format!("v{}.{}.{}", ma, mi, pa))
                .collect();
            let latest = select_latest(&tags).unwrap();
            for tag in &tags {
                let version = Version::parse(tag).unwrap();
                prop_assert!(latest >= version);
            }
        }

        /// Property: select_latest never returns a pre-release, no matter
        /// how the release and pre-release tags are interleaved.
        #[test]
        fn select_latest_never_returns_pre_release(
            releases in proptest::collection::vec((0u64..50, 0u64..50), 0..10),
            pre_releases in proptest::collection::vec((0u64..50, 0u64..50), 0..10),
        ) {
            let mut tags: Vec<String> = releases
                .iter()
                .map(|(ma, mi)| format!("v{}.{}.0", ma, mi))
                .collect();
            tags.extend(
                pre_releases
                    .iter()
                    .map(|(ma, mi)| format!("v{}.{}.0-rc1", ma, mi)),
            );

            match select_latest(&tags) {
                Ok(latest) => prop_assert!(latest.is_release()),
                Err(_) => prop_assert!(releases.is_empty()),
            }
        }
    }
}
