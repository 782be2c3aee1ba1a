//! Ignore-rule parsing and matching
//!
//! Rules follow the familiar layered ignore-file conventions: one
//! shell-glob pattern per line, `#` comments, and a leading `!` to
//! negate (re-include) paths matched by an earlier rule. Rules are
//! evaluated in declared order and the last matching rule wins.

use std::fs;
use std::path::Path;

use globset::{Glob, GlobMatcher};
use tracing::{debug, warn};

use crate::{Error, Result};

/// A single compiled ignore rule.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// `true` for `!pattern` lines, which re-include matching paths.
    negated: bool,
    /// The pattern as written, minus any leading `!` or `/`.
    pattern: String,
    kind: RuleKind,
}

#[derive(Debug, Clone)]
enum RuleKind {
    /// Trailing-slash pattern: matches the named directory and
    /// everything beneath it, at the root or nested.
    Directory(String),
    /// Glob matched against the full relative path and the basename.
    /// Bare patterns (no `/`) additionally match any path segment, so
    /// a directory name anywhere in the path excludes its contents.
    Glob { matcher: GlobMatcher, bare: bool },
}

impl IgnoreRule {
    /// Compile a single rule. Returns `None` for patterns that are not
    /// valid globs; callers log and drop those.
    fn compile(negated: bool, pattern: &str) -> Option<Self> {
        let kind = if let Some(dir) = pattern.strip_suffix('/') {
            RuleKind::Directory(dir.to_string())
        } else {
            // `**` is deliberately collapsed to `*` rather than given
            // recursive multi-segment semantics.
            let collapsed = pattern.replace("**", "*");
            let matcher = Glob::new(&collapsed).ok()?.compile_matcher();
            RuleKind::Glob {
                matcher,
                bare: !pattern.contains('/'),
            }
        };
        Some(Self {
            negated,
            pattern: pattern.to_string(),
            kind,
        })
    }

    /// Whether this rule re-includes matching paths.
    pub fn negated(&self) -> bool {
        self.negated
    }

    /// The stored pattern text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn matches(&self, path: &str) -> bool {
        match &self.kind {
            RuleKind::Directory(dir) => {
                path == dir
                    || path.starts_with(&format!("{dir}/"))
                    || path.contains(&format!("/{dir}/"))
            }
            RuleKind::Glob { matcher, bare } => {
                if matcher.is_match(path) {
                    return true;
                }
                let basename = path.rsplit('/').next().unwrap_or(path);
                if matcher.is_match(basename) {
                    return true;
                }
                *bare && path.split('/').any(|segment| matcher.is_match(segment))
            }
        }
    }
}

/// An ordered, immutable set of ignore rules.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Compile rules from lines of an ignore file.
    ///
    /// Lines are trimmed; blank lines and `#` comments are skipped. A
    /// leading `!` marks a negation rule and a leading `/` is stripped
    /// (patterns are always root-relative). Patterns that fail to
    /// compile as globs are dropped with a warning.
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        for line in lines {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (negated, pattern) = match line.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, line),
            };
            let pattern = pattern.strip_prefix('/').unwrap_or(pattern);
            match IgnoreRule::compile(negated, pattern) {
                Some(rule) => rules.push(rule),
                None => warn!(pattern, "dropping ignore rule with invalid glob"),
            }
        }
        Self { rules }
    }

    /// Load rules from an ignore file.
    ///
    /// A missing file yields an empty rule set (nothing ignored),
    /// mirroring the behavior of a project without an ignore file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no ignore file; nothing ignored");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::parse(content.lines()))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// The compiled rules, in declared order.
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Decide whether a relative path is excluded from sync.
    ///
    /// Every rule is evaluated in order; each match overwrites the
    /// running decision with the rule's polarity, so the last matching
    /// rule wins. With zero rules nothing is ignored. This is a pure
    /// function of the compiled rules and the path.
    pub fn should_ignore(&self, relative_path: &str) -> bool {
        let path = relative_path.replace('\\', "/");
        let mut ignored = false;
        for rule in &self.rules {
            if rule.matches(&path) {
                ignored = !rule.negated;
            }
        }
        ignored
    }
}
