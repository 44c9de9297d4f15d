//! Inclusion decisions for candidate paths.
//!
//! Pure decision logic, no I/O. A [`PathFilter`] combines grow-only
//! exclusion rules with an optional caller-supplied predicate and answers
//! one question per path: does it belong in the archive?

use regex::Regex;
use std::fmt;
use std::path::Path;

/// A single exclusion rule, matched against a path's basename only —
/// never the full path.
#[derive(Debug, Clone)]
pub enum ExcludeRule {
    /// Excludes paths whose basename equals the string exactly.
    Literal(String),
    /// Excludes paths whose basename matches the pattern anywhere.
    Pattern(Regex),
}

impl ExcludeRule {
    /// Returns `true` if the rule matches the given basename.
    ///
    /// # Examples
    ///
    /// ```
    /// use zipline_core::ExcludeRule;
    ///
    /// let rule = ExcludeRule::from("node_modules");
    /// assert!(rule.matches("node_modules"));
    /// assert!(!rule.matches("node_modules_bak"));
    /// ```
    #[must_use]
    pub fn matches(&self, basename: &str) -> bool {
        match self {
            Self::Literal(name) => name == basename,
            Self::Pattern(pattern) => pattern.is_match(basename),
        }
    }
}

impl From<&str> for ExcludeRule {
    fn from(name: &str) -> Self {
        Self::Literal(name.to_string())
    }
}

impl From<String> for ExcludeRule {
    fn from(name: String) -> Self {
        Self::Literal(name)
    }
}

impl From<Regex> for ExcludeRule {
    fn from(pattern: Regex) -> Self {
        Self::Pattern(pattern)
    }
}

/// Caller-supplied inclusion predicate. Default is "always include";
/// only one may be active at a time.
pub type Predicate = Box<dyn Fn(&Path) -> bool + Send + Sync>;

/// Evaluates one candidate path against exclusion rules and an optional
/// custom predicate.
///
/// Evaluation order: the predicate first, then every exclusion rule
/// against the path's basename. Any rule match excludes. Never errors.
#[derive(Default)]
pub struct PathFilter {
    rules: Vec<ExcludeRule>,
    predicate: Option<Predicate>,
}

impl PathFilter {
    /// Creates a filter with no rules and no predicate: everything is
    /// included.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exclusion rule. The rule set only grows.
    pub fn add_rule(&mut self, rule: ExcludeRule) {
        self.rules.push(rule);
    }

    /// Installs the inclusion predicate, replacing any previous one.
    pub fn set_predicate(&mut self, predicate: Predicate) {
        self.predicate = Some(predicate);
    }

    /// Returns `true` if `path` should be included in the archive.
    ///
    /// A path without a UTF-8 basename (e.g. a bare root) cannot be
    /// excluded by rules; the predicate still applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use zipline_core::PathFilter;
    ///
    /// let mut filter = PathFilter::new();
    /// filter.add_rule("target".into());
    ///
    /// assert!(filter.should_include(Path::new("src/main.rs")));
    /// assert!(!filter.should_include(Path::new("project/target")));
    /// ```
    #[must_use]
    pub fn should_include(&self, path: &Path) -> bool {
        if let Some(predicate) = &self.predicate
            && !predicate(path)
        {
            return false;
        }

        let Some(basename) = path.file_name().and_then(|name| name.to_str()) else {
            return true;
        };
        !self.rules.iter().any(|rule| rule.matches(basename))
    }
}

impl fmt::Debug for PathFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathFilter")
            .field("rules", &self.rules)
            .field("predicate", &self.predicate.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_rule_exact_match_only() {
        let rule = ExcludeRule::from("node_modules");
        assert!(rule.matches("node_modules"));
        assert!(!rule.matches("node_modules2"));
        assert!(!rule.matches("my_node_modules"));
    }

    #[test]
    fn test_pattern_rule_matches_anywhere_in_basename() {
        let rule = ExcludeRule::from(Regex::new(r"\.tmp").unwrap());
        assert!(rule.matches("scratch.tmp"));
        assert!(rule.matches("a.tmp.bak"));
        assert!(!rule.matches("scratch.txt"));
    }

    #[test]
    fn test_empty_filter_includes_everything() {
        let filter = PathFilter::new();
        assert!(filter.should_include(Path::new("anything")));
        assert!(filter.should_include(Path::new("/deep/nested/path.rs")));
    }

    #[test]
    fn test_rules_apply_to_basename_not_full_path() {
        let mut filter = PathFilter::new();
        filter.add_rule("node_modules".into());

        // The directory itself is excluded.
        assert!(!filter.should_include(Path::new("project/node_modules")));
        // A file that merely lives under it is not matched by basename;
        // subtree pruning is the walker's job.
        assert!(filter.should_include(Path::new("project/node_modules/pkg.json")));
    }

    #[test]
    fn test_any_rule_match_excludes() {
        let mut filter = PathFilter::new();
        filter.add_rule(".git".into());
        filter.add_rule(Regex::new(r"\.log$").unwrap().into());

        assert!(!filter.should_include(Path::new("repo/.git")));
        assert!(!filter.should_include(Path::new("out/debug.log")));
        assert!(filter.should_include(Path::new("src/lib.rs")));
    }

    #[test]
    fn test_predicate_runs_before_rules() {
        let mut filter = PathFilter::new();
        filter.set_predicate(Box::new(|path| {
            !path.to_string_lossy().contains("secret")
        }));

        assert!(!filter.should_include(Path::new("notes/secret.txt")));
        assert!(filter.should_include(Path::new("notes/public.txt")));
    }

    #[test]
    fn test_last_predicate_wins() {
        let mut filter = PathFilter::new();
        filter.set_predicate(Box::new(|_| false));
        filter.set_predicate(Box::new(|_| true));

        assert!(filter.should_include(Path::new("anything")));
    }

    #[test]
    fn test_path_without_basename_not_excluded_by_rules() {
        let mut filter = PathFilter::new();
        filter.add_rule("anything".into());
        assert!(filter.should_include(Path::new("/")));
    }
}
