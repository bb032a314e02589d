//! Rewrite rules and ordered rule tables.
//!
//! A rule pairs a pattern with a replacement. Rules in a [`RuleSet`] run in
//! order against one in-memory buffer, so a later rule sees the text an earlier
//! rule produced. Every rule replaces all non-overlapping matches.

use regex::{Captures, NoExpand, Regex, RegexBuilder};
use serde::Serialize;

use crate::error::{Error, Result};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    Sensitive,
    Insensitive,
}

#[derive(Debug, Clone)]
enum Matcher {
    /// Regular expression; the replacement may reference captures (`$1`, `${name}`).
    Template(Regex),
    /// Escaped literal; the replacement is inserted verbatim.
    Verbatim(Regex),
    /// CSS token bounded by non-identifier characters. Always case-sensitive.
    Token(String),
}

/// A single (pattern, replacement) rewrite rule.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    matcher: Matcher,
    replacement: String,
    /// When set, the pattern only applies inside the first participating
    /// capture group of each scope match.
    scope: Option<Regex>,
}

/// How many replacements a rule made in one buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleHit {
    pub rule: String,
    pub replacements: usize,
}

/// Result of running a rule table over one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// True when `content` differs from the input.
    pub changed: bool,
    /// Rules that matched, in application order.
    pub hits: Vec<RuleHit>,
}

impl Rewrite {
    pub fn replacements(&self) -> usize {
        self.hits.iter().map(|h| h.replacements).sum()
    }
}

// ============================================================================
// Rule construction
// ============================================================================

fn compile(name: &str, pattern: &str, case: CaseSensitivity) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(case == CaseSensitivity::Insensitive)
        .build()
        .map_err(|e| Error::rewrite_invalid_pattern(name, pattern, e.to_string()))
}

impl Rule {
    /// Regex rule. Capture groups can be referenced from `replacement`.
    pub fn regex(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
        case: CaseSensitivity,
    ) -> Result<Self> {
        let name = name.into();
        let regex = compile(&name, pattern, case)?;

        Ok(Self {
            name,
            matcher: Matcher::Template(regex),
            replacement: replacement.into(),
            scope: None,
        })
    }

    /// Literal substring rule. `replacement` is never expanded.
    pub fn literal(
        name: impl Into<String>,
        from: &str,
        to: impl Into<String>,
        case: CaseSensitivity,
    ) -> Result<Self> {
        let name = name.into();
        let regex = compile(&name, &regex::escape(from), case)?;

        Ok(Self {
            name,
            matcher: Matcher::Verbatim(regex),
            replacement: to.into(),
            scope: None,
        })
    }

    /// CSS token rule: `token` only matches where it is not part of a larger
    /// identifier (`[A-Za-z0-9_-]` or non-ASCII on either side).
    pub fn token(name: impl Into<String>, token: &str, to: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matcher: Matcher::Token(token.to_string()),
            replacement: to.into(),
            scope: None,
        }
    }

    /// Restrict the rule to the value captured by `scope`.
    ///
    /// The scope pattern is matched case-insensitively (it targets attribute
    /// names); its first participating capture group is the rewritable span.
    pub fn within(mut self, scope: &str) -> Result<Self> {
        self.scope = Some(compile(&self.name, scope, CaseSensitivity::Insensitive)?);
        Ok(self)
    }

    /// Apply this rule to `text`. Returns `None` when nothing matched.
    pub fn rewrite(&self, text: &str) -> Option<(String, usize)> {
        let Some(scope) = &self.scope else {
            return self.rewrite_span(text);
        };

        let mut count = 0;
        let rewritten = scope.replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            let Some(value) = caps.iter().skip(1).flatten().next() else {
                return whole.to_string();
            };
            let Some((new_value, n)) = self.rewrite_span(value.as_str()) else {
                return whole.to_string();
            };

            count += n;
            let offset = caps.get(0).map(|m| m.start()).unwrap_or(0);
            let start = value.start() - offset;
            let end = value.end() - offset;
            format!("{}{}{}", &whole[..start], new_value, &whole[end..])
        });

        if count == 0 {
            None
        } else {
            Some((rewritten.into_owned(), count))
        }
    }

    fn rewrite_span(&self, text: &str) -> Option<(String, usize)> {
        match &self.matcher {
            Matcher::Template(regex) => {
                let count = regex.find_iter(text).count();
                (count > 0).then(|| {
                    let out = regex.replace_all(text, self.replacement.as_str());
                    (out.into_owned(), count)
                })
            }
            Matcher::Verbatim(regex) => {
                let count = regex.find_iter(text).count();
                (count > 0).then(|| {
                    let out = regex.replace_all(text, NoExpand(&self.replacement));
                    (out.into_owned(), count)
                })
            }
            Matcher::Token(token) => {
                let positions = find_token_matches(text, token);
                if positions.is_empty() {
                    return None;
                }

                let mut out = String::with_capacity(text.len());
                let mut last = 0;
                for pos in &positions {
                    out.push_str(&text[last..*pos]);
                    out.push_str(&self.replacement);
                    last = pos + token.len();
                }
                out.push_str(&text[last..]);

                Some((out, positions.len()))
            }
        }
    }
}

// ============================================================================
// Token boundaries
// ============================================================================

/// Identifier characters for CSS class names.
fn is_ident_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c >= 0x80
}

/// Find non-overlapping occurrences of `token` that are not embedded in a
/// larger CSS identifier.
///
/// A boundary is only required on a side where the token itself ends in an
/// identifier character, so `.badge` matches in `div.badge` but `badge` does
/// not match in `my-badge`.
fn find_token_matches(text: &str, token: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let token_bytes = token.as_bytes();
    let mut matches = Vec::new();

    let (Some(&first), Some(&last)) = (token_bytes.first(), token_bytes.last()) else {
        return matches;
    };
    let step = token.chars().next().map(char::len_utf8).unwrap_or(1);

    let mut start = 0;
    while let Some(pos) = text[start..].find(token) {
        let abs = start + pos;
        let end = abs + token_bytes.len();

        let left_ok = !is_ident_byte(first) || abs == 0 || !is_ident_byte(bytes[abs - 1]);
        let right_ok = !is_ident_byte(last) || end >= bytes.len() || !is_ident_byte(bytes[end]);

        if left_ok && right_ok {
            matches.push(abs);
            start = end;
        } else {
            start = abs + step;
        }
    }

    matches
}

// ============================================================================
// Rule tables
// ============================================================================

/// An ordered rule table, built once and applied to many files.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    name: String,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, content: &str) -> Rewrite {
        apply(content, &self.rules)
    }
}

/// Run `rules` in order over `content`.
pub fn apply(content: &str, rules: &[Rule]) -> Rewrite {
    let mut buffer = content.to_string();
    let mut hits = Vec::new();

    for rule in rules {
        if let Some((next, replacements)) = rule.rewrite(&buffer) {
            buffer = next;
            hits.push(RuleHit {
                rule: rule.name.clone(),
                replacements,
            });
        }
    }

    Rewrite {
        changed: buffer != content,
        content: buffer,
        hits,
    }
}

// ============================================================================
// Tests
// ============================================================================
