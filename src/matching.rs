//! Rule compilation and matching against synthesized search text.

use regex::{Regex, RegexBuilder};

use crate::domain::Rule;
use crate::error::{RedactorError, RedactorResult};

/// One match: byte range in the search text and the matched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Case-sensitive literal, searched with plain substring matching.
    Exact(String),
    /// Regex rules, and case-insensitive literals as escaped regexes.
    Pattern(Regex),
}

/// A rule ready to run, with its fragment-aware decision made up front.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: Rule,
    matcher: Matcher,
    fragment_aware: bool,
}

impl CompiledRule {
    /// Compiles a rule. A malformed regex is reported with the rule's pattern.
    pub fn compile(rule: &Rule) -> RedactorResult<Self> {
        if rule.pattern.is_empty() {
            return Err(RedactorError::PatternError {
                pattern: rule.pattern.clone(),
                reason: "pattern is empty".to_string(),
            });
        }

        let matcher = if rule.is_regex {
            Matcher::Pattern(build_regex(rule).map_err(|e| pattern_error(rule, e))?)
        } else if rule.case_sensitive {
            Matcher::Exact(rule.pattern.clone())
        } else {
            let regex = RegexBuilder::new(&regex::escape(&rule.pattern))
                .case_insensitive(true)
                .build()
                .map_err(|e| pattern_error(rule, e))?;
            Matcher::Pattern(regex)
        };

        Ok(Self {
            rule: rule.clone(),
            matcher,
            fragment_aware: rule.uses_fragment_aware(),
        })
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn pattern(&self) -> &str {
        &self.rule.pattern
    }

    /// Whether the fragment-aware pass should run for this rule.
    pub fn fragment_aware(&self) -> bool {
        self.fragment_aware
    }

    /// Every non-overlapping match, left to right. Empty regex matches are
    /// skipped since they cover no token.
    pub fn find_matches(&self, text: &str) -> Vec<RuleMatch> {
        match &self.matcher {
            Matcher::Exact(needle) => text
                .match_indices(needle.as_str())
                .map(|(start, m)| RuleMatch {
                    start,
                    end: start + m.len(),
                    text: m.to_string(),
                })
                .collect(),
            Matcher::Pattern(regex) => regex
                .find_iter(text)
                .filter(|m| !m.is_empty())
                .map(|m| RuleMatch {
                    start: m.start(),
                    end: m.end(),
                    text: m.as_str().to_string(),
                })
                .collect(),
        }
    }
}

fn build_regex(rule: &Rule) -> Result<Regex, regex::Error> {
    let mut builder = RegexBuilder::new(&rule.pattern);
    match &rule.regex_options {
        Some(options) => {
            builder
                .case_insensitive(options.case_insensitive)
                .multi_line(options.multi_line)
                .dot_matches_new_line(options.dot_matches_new_line)
                .ignore_whitespace(options.ignore_whitespace);
            if let Some(unicode) = options.unicode {
                builder.unicode(unicode);
            }
        }
        None => {
            builder.case_insensitive(!rule.case_sensitive);
        }
    }
    builder.build()
}

fn pattern_error(rule: &Rule, err: regex::Error) -> RedactorError {
    RedactorError::PatternError {
        pattern: rule.pattern.clone(),
        reason: err.to_string(),
    }
}

/// Compiles every rule, failing on the first malformed one.
pub fn compile_rules(rules: &[Rule]) -> RedactorResult<Vec<CompiledRule>> {
    rules.iter().map(CompiledRule::compile).collect()
}
