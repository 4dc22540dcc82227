//! Redaction rules and the fragment-aware auto-detection heuristics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Explicit regex engine options. When present on a rule they replace the
/// options derived from its case-sensitivity flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegexOptions {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
    /// `None` keeps the engine default (Unicode enabled).
    pub unicode: Option<bool>,
}

/// A literal or regex pattern to locate in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub pattern: String,
    #[serde(default)]
    pub is_regex: bool,
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
    /// `None` means auto-detect from the pattern shape.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_aware: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex_options: Option<RegexOptions>,
}

fn default_case_sensitive() -> bool {
    true
}

impl Rule {
    /// Creates a case-sensitive literal rule.
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            is_regex: false,
            case_sensitive: true,
            fragment_aware: None,
            regex_options: None,
        }
    }

    /// Creates a case-sensitive regex rule.
    pub fn regex(pattern: impl Into<String>) -> Self {
        Self {
            is_regex: true,
            ..Self::literal(pattern)
        }
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Forces fragment-aware tokenization on or off for this rule.
    pub fn with_fragment_aware(mut self, enabled: bool) -> Self {
        self.fragment_aware = Some(enabled);
        self
    }

    pub fn with_regex_options(mut self, options: RegexOptions) -> Self {
        self.regex_options = Some(options);
        self
    }

    /// Whether the fragment-aware pass runs for this rule: the explicit flag
    /// if set, otherwise the pattern-shape heuristic.
    pub fn uses_fragment_aware(&self) -> bool {
        self.fragment_aware.unwrap_or_else(|| {
            if self.is_regex {
                looks_like_numeric_regex(&self.pattern)
            } else {
                looks_like_numeric_literal(&self.pattern)
            }
        })
    }
}

/// A literal made only of decimal digits and `-`, `/` or space, holding 3
/// to 9 digits.
pub fn looks_like_numeric_literal(pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    if !pattern
        .chars()
        .all(|c| is_decimal_digit(c) || matches!(c, '-' | '/' | ' '))
    {
        return false;
    }
    let digits = pattern.chars().filter(|&c| is_decimal_digit(c)).count();
    (3..=9).contains(&digits)
}

/// Unicode decimal digit (general category Nd), the set `\d` matches.
pub fn is_decimal_digit(c: char) -> bool {
    static DECIMAL: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\A\p{Nd}\z").expect("Valid decimal digit regex"));
    if c.is_ascii() {
        return c.is_ascii_digit();
    }
    DECIMAL.is_match(c.encode_utf8(&mut [0u8; 4]))
}

fn digit_quantifier() -> &'static Regex {
    static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"(?:\\d|\[0-9\])\{(\d+)(?:,(\d*))?\}").expect("Valid digit quantifier regex")
    });
    &PATTERN
}

/// Recognizes regexes that describe a bounded run of digits.
///
/// Matches either a ranged digit quantifier within 3..=9 (`\d{3,9}`), or
/// two or more digit quantifiers of at most 9 each, the shape of segmented
/// numbers such as `\d{3}-\d{2}-\d{4}`. A single fixed quantifier like
/// `\d{4}` does not qualify.
pub fn looks_like_numeric_regex(pattern: &str) -> bool {
    let mut quantifiers = 0usize;
    for caps in digit_quantifier().captures_iter(pattern) {
        let Some(min) = caps.get(1).and_then(|m| m.as_str().parse::<usize>().ok()) else {
            continue;
        };
        match caps.get(2) {
            Some(max) => {
                let Ok(max) = max.as_str().parse::<usize>() else {
                    // open-ended `{n,}` is not bounded
                    return false;
                };
                if min >= 3 && max <= 9 && min <= max {
                    return true;
                }
                if max > 9 {
                    return false;
                }
            }
            None if min > 9 => return false,
            None => {}
        }
        quantifiers += 1;
    }
    quantifiers >= 2
}
