//! Import filtering
//!
//! Candidates are checked against the ignore patterns in configured order;
//! the first match wins and no further patterns are evaluated.

use crate::config::ImportConfig;
use crate::domain::{Result, RetouchError};
use std::fmt;
use std::str::FromStr;

/// A compiled pattern that can be tested against a candidate identifier
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Whether `candidate` matches
    fn is_match(&self, candidate: &str) -> bool;

    /// Source text of the pattern
    fn pattern(&self) -> &str;
}

/// Shell-style glob (`*`, `?`, `[...]`, `{a,b}`)
#[derive(Debug)]
pub struct GlobMatcher {
    pattern: String,
    matcher: globset::GlobMatcher,
}

impl GlobMatcher {
    /// Compile a glob pattern
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed globs.
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = globset::Glob::new(pattern).map_err(|e| {
            RetouchError::Configuration(format!("Invalid glob pattern '{pattern}': {e}"))
        })?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }
}

impl Matcher for GlobMatcher {
    fn is_match(&self, candidate: &str) -> bool {
        self.matcher.is_match(candidate)
    }

    fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Regular expression, unanchored unless the pattern anchors itself
#[derive(Debug)]
pub struct RegexMatcher {
    regex: regex::Regex,
}

impl RegexMatcher {
    /// Compile a regular expression
    ///
    /// # Errors
    ///
    /// Returns a configuration error for malformed expressions.
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = regex::Regex::new(pattern).map_err(|e| {
            RetouchError::Configuration(format!("Invalid regex pattern '{pattern}': {e}"))
        })?;
        Ok(Self { regex })
    }
}

impl Matcher for RegexMatcher {
    fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

/// Pattern dialect used for ignore patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSyntax {
    /// Shell globs
    Glob,
    /// Regular expressions
    Regex,
}

impl PatternSyntax {
    /// Compile `pattern` in this dialect
    pub fn compile(&self, pattern: &str) -> Result<Box<dyn Matcher>> {
        match self {
            PatternSyntax::Glob => Ok(Box::new(GlobMatcher::new(pattern)?)),
            PatternSyntax::Regex => Ok(Box::new(RegexMatcher::new(pattern)?)),
        }
    }
}

impl FromStr for PatternSyntax {
    type Err = RetouchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "glob" => Ok(Self::Glob),
            "regex" | "regexp" => Ok(Self::Regex),
            _ => Err(RetouchError::Configuration(format!(
                "Invalid pattern syntax: {s}. Expected 'glob' or 'regex'"
            ))),
        }
    }
}

/// Returns true on the first pattern matching `candidate`
pub fn should_ignore(candidate: &str, patterns: &[Box<dyn Matcher>]) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(candidate))
}

/// Candidates split by the filter, each list in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Candidates that pass
    pub kept: Vec<String>,

    /// Candidates that matched an ignore pattern
    pub ignored: Vec<String>,
}

impl FilterOutcome {
    /// Number of ignored candidates
    pub fn ignored_count(&self) -> usize {
        self.ignored.len()
    }
}

/// Receives import events before candidates enter the catalog
pub trait EventListener {
    /// Drop unwanted candidates in place; returns how many were removed
    fn on_pre_import(&self, candidates: &mut Vec<String>) -> usize;
}

/// Ordered list of ignore patterns
#[derive(Debug, Default)]
pub struct ImportFilter {
    patterns: Vec<Box<dyn Matcher>>,
}

impl ImportFilter {
    /// Filter over already compiled matchers
    pub fn new(patterns: Vec<Box<dyn Matcher>>) -> Self {
        Self { patterns }
    }

    /// Compile patterns in the given dialect
    pub fn compile<S: AsRef<str>>(syntax: PatternSyntax, patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|p| syntax.compile(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(patterns))
    }

    /// Build from the `[import]` configuration section
    pub fn from_config(config: &ImportConfig) -> Result<Self> {
        Self::compile(config.syntax()?, &config.patterns())
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether no patterns are configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether `candidate` matches any pattern
    pub fn should_ignore(&self, candidate: &str) -> bool {
        should_ignore(candidate, &self.patterns)
    }

    /// Split candidates into kept and ignored
    pub fn filter<I, S>(&self, candidates: I) -> FilterOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut outcome = FilterOutcome::default();
        for candidate in candidates {
            let candidate = candidate.into();
            if self.should_ignore(&candidate) {
                tracing::debug!(candidate = %candidate, "Ignoring import candidate");
                outcome.ignored.push(candidate);
            } else {
                outcome.kept.push(candidate);
            }
        }
        outcome
    }
}

impl EventListener for ImportFilter {
    fn on_pre_import(&self, candidates: &mut Vec<String>) -> usize {
        let before = candidates.len();
        candidates.retain(|candidate| !self.should_ignore(candidate));
        let ignored = before - candidates.len();
        if ignored > 0 {
            tracing::info!(ignored, remaining = candidates.len(), "Filtered import candidates");
        }
        ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct CountingMatcher {
        hit: bool,
        calls: Arc<AtomicUsize>,
    }

    impl Matcher for CountingMatcher {
        fn is_match(&self, _candidate: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.hit
        }

        fn pattern(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_glob_patterns_from_documentation() {
        let filter = ImportFilter::compile(PatternSyntax::Glob, &["*.tmp", "bad_*"]).unwrap();
        let outcome = filter.filter(["a.tmp", "bad_1.jpg", "good.jpg"]);

        assert_eq!(outcome.ignored, vec!["a.tmp", "bad_1.jpg"]);
        assert_eq!(outcome.kept, vec!["good.jpg"]);
        assert_eq!(outcome.ignored_count(), 2);
    }

    #[test]
    fn test_first_match_short_circuits() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let patterns: Vec<Box<dyn Matcher>> = vec![
            Box::new(CountingMatcher {
                hit: true,
                calls: first.clone(),
            }),
            Box::new(CountingMatcher {
                hit: true,
                calls: second.clone(),
            }),
        ];

        assert!(should_ignore("anything", &patterns));
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_patterns_ignores_nothing() {
        let filter = ImportFilter::default();
        assert!(filter.is_empty());
        assert!(!filter.should_ignore("a.tmp"));
    }

    #[test]
    fn test_regex_syntax() {
        let filter = ImportFilter::compile(PatternSyntax::Regex, &[r"^bad_\d+"]).unwrap();
        assert!(filter.should_ignore("bad_12.jpg"));
        assert!(!filter.should_ignore("not_bad_12.jpg"));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        assert!(GlobMatcher::new("[unclosed").is_err());
    }

    #[test]
    fn test_pattern_syntax_parse() {
        assert_eq!(PatternSyntax::from_str("GLOB").unwrap(), PatternSyntax::Glob);
        assert_eq!(PatternSyntax::from_str("regex").unwrap(), PatternSyntax::Regex);
        assert!(PatternSyntax::from_str("lua").is_err());
    }

    #[test]
    fn test_event_listener_retains_in_order() {
        let filter = ImportFilter::compile(PatternSyntax::Glob, &["*.xmp"]).unwrap();
        let mut candidates = vec![
            "b.jpg".to_string(),
            "b.jpg.xmp".to_string(),
            "a.jpg".to_string(),
        ];
        let ignored = filter.on_pre_import(&mut candidates);
        assert_eq!(ignored, 1);
        assert_eq!(candidates, vec!["b.jpg", "a.jpg"]);
    }

    #[test]
    fn test_from_config() {
        let config = ImportConfig {
            ignore_patterns: "*.tmp|*.xmp".to_string(),
            pattern_syntax: "glob".to_string(),
        };
        let filter = ImportFilter::from_config(&config).unwrap();
        assert_eq!(filter.len(), 2);
    }
}
