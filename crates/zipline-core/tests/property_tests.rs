//! Property-based tests for the pure filtering and naming logic.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use regex::Regex;
use std::path::Path;
use std::path::PathBuf;
use zipline_core::ExcludeRule;
use zipline_core::PathFilter;

proptest! {
    /// A literal rule matches exactly its own basename and nothing else.
    #[test]
    fn prop_literal_rule_is_exact(
        name in "[a-zA-Z0-9_.-]{1,20}",
        other in "[a-zA-Z0-9_.-]{1,20}"
    ) {
        let rule = ExcludeRule::from(name.as_str());
        prop_assert!(rule.matches(&name));
        if other != name {
            prop_assert!(!rule.matches(&other));
        }
    }

    /// Exclusion looks only at the basename: a matching rule excludes a
    /// path regardless of how deeply it is nested.
    #[test]
    fn prop_exclusion_ignores_parent_directories(
        parents in prop::collection::vec("[a-z]{1,8}", 0..5),
        basename in "[a-z]{1,12}"
    ) {
        let mut filter = PathFilter::new();
        filter.add_rule(basename.as_str().into());

        let mut path = PathBuf::new();
        for parent in &parents {
            path.push(parent);
        }
        path.push(&basename);

        prop_assert!(!filter.should_include(&path));
    }

    /// A filter with no rules and no predicate includes every path.
    #[test]
    fn prop_empty_filter_includes_all(
        components in prop::collection::vec("[a-zA-Z0-9_.-]{1,12}", 1..6)
    ) {
        let filter = PathFilter::new();
        let path = PathBuf::from(components.join("/"));
        prop_assert!(filter.should_include(&path));
    }

    /// A rejecting predicate wins over any rule configuration.
    #[test]
    fn prop_predicate_rejection_is_final(
        components in prop::collection::vec("[a-z]{1,10}", 1..4)
    ) {
        let mut filter = PathFilter::new();
        filter.set_predicate(Box::new(|_: &Path| false));
        let path = PathBuf::from(components.join("/"));
        prop_assert!(!filter.should_include(&path));
    }

    /// Pattern rules match anywhere in the basename, exactly like the
    /// compiled regex itself.
    #[test]
    fn prop_pattern_rule_agrees_with_regex(
        basename in "[a-zA-Z0-9_.-]{1,20}"
    ) {
        let regex = Regex::new(r"\d").unwrap();
        let expected = regex.is_match(&basename);
        let rule = ExcludeRule::from(regex);
        prop_assert_eq!(rule.matches(&basename), expected);
    }
}
