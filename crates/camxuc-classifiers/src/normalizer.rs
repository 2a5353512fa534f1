//! Vietnamese text normalization
//!
//! Lowercases input and rewrites informal spellings into canonical
//! Vietnamese before classification. Rewriting happens in two tiers:
//!
//! 1. Phrase rules: plain substring replacement, applied first so that
//!    idioms are canonicalized before any word-level rule can touch the
//!    words inside them ("buồn cười" means funny, not sad).
//! 2. Token rules: whole-word replacement for abbreviations, missing
//!    diacritics and regional spellings.
//!
//! Both tables are ordered and append-only. Editing or reordering an existing
//! entry changes how previously classified text would normalize, so bump
//! [`RULES_VERSION`] and only ever add rules at the end.

use camxuc_core::{Error, Result};
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Version of the built-in replacement tables
pub const RULES_VERSION: u32 = 1;

/// Built-in phrase rules (substring, applied in order)
pub const PHRASE_RULES: &[(&str, &str)] = &[
    ("buồn cười", "hài hước"),
    ("buon cuoi", "hài hước"),
    ("buồn cuời", "hài hước"),
];

/// Built-in token rules (whole word, applied in order)
pub const TOKEN_RULES: &[(&str, &str)] = &[
    ("rat", "rất"),
    ("hok", "không"),
    ("ko", "không"),
    ("k", "không"),
    ("khong", "không"),
    ("dc", "được"),
    ("duoc", "được"),
    ("bt", "bình thường"),
    ("oke", "ok"),
    ("ok", "ok"),
    ("vs", "với"),
    ("hong", "không"),
    ("bùn", "buồn"),
];

/// A single `pattern -> replacement` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRule {
    pub pattern: String,
    pub replacement: String,
}

impl ReplacementRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

struct TokenRule {
    matcher: Regex,
    replacement: String,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase user-supplied rules and drop empty patterns.
fn checked_extra_rules(
    rules: Vec<ReplacementRule>,
    whole_word: bool,
) -> Result<Vec<ReplacementRule>> {
    let mut checked = Vec::with_capacity(rules.len());

    for rule in rules {
        let pattern = rule.pattern.trim().to_lowercase();
        if pattern.is_empty() {
            continue;
        }

        let replacement = rule.replacement.trim();
        if replacement.is_empty() {
            return Err(Error::config(format!(
                "Replacement for '{pattern}' must not be blank"
            )));
        }

        if whole_word {
            let starts = pattern.chars().next().is_some_and(is_word_char);
            let ends = pattern.chars().last().is_some_and(is_word_char);
            if !(starts && ends) {
                return Err(Error::config(format!(
                    "Token rule '{pattern}' must start and end with a letter or digit; \
                     use a phrase rule instead"
                )));
            }
        }

        checked.push(ReplacementRule::new(pattern, replacement));
    }

    Ok(checked)
}

/// Compiled replacement tables
pub struct Normalizer {
    phrases: Vec<ReplacementRule>,
    tokens: Vec<TokenRule>,
}

impl Normalizer {
    /// Create a normalizer with the built-in tables
    pub fn new() -> Result<Self> {
        Self::with_extra_rules(Vec::new(), Vec::new())
    }

    /// Create a normalizer with the built-in tables followed by `extra_phrases`
    /// and `extra_tokens`.
    ///
    /// Extra rules never override built-in ones; they run after them. A rule
    /// with a blank replacement is rejected since it would delete words, and
    /// token patterns must start and end with a word character.
    pub fn with_extra_rules(
        extra_phrases: Vec<ReplacementRule>,
        extra_tokens: Vec<ReplacementRule>,
    ) -> Result<Self> {
        let extra_phrases = checked_extra_rules(extra_phrases, false)?;
        let extra_tokens = checked_extra_rules(extra_tokens, true)?;

        let phrases: Vec<ReplacementRule> = PHRASE_RULES
            .iter()
            .map(|(p, r)| ReplacementRule::new(*p, *r))
            .chain(extra_phrases)
            .collect();

        let mut tokens = Vec::new();
        let token_rules = TOKEN_RULES
            .iter()
            .map(|(p, r)| ReplacementRule::new(*p, *r))
            .chain(extra_tokens);

        for rule in token_rules {
            // Already canonicalized by the phrase tier.
            if phrases.iter().any(|phrase| phrase.pattern == rule.pattern) {
                continue;
            }

            let matcher = Regex::new(&format!(r"\b{}\b", regex::escape(&rule.pattern)))
                .map_err(|e| {
                    Error::config(format!("Invalid token rule '{}': {e}", rule.pattern))
                })?;

            tokens.push(TokenRule {
                matcher,
                replacement: rule.replacement,
            });
        }

        Ok(Self { phrases, tokens })
    }

    /// Normalize `text`. Pure and total.
    pub fn normalize(&self, text: &str) -> String {
        let mut cleaned = text.trim().to_lowercase();

        for phrase in &self.phrases {
            if cleaned.contains(&phrase.pattern) {
                cleaned = cleaned.replace(&phrase.pattern, &phrase.replacement);
            }
        }

        for rule in &self.tokens {
            let replaced = rule
                .matcher
                .replace_all(&cleaned, NoExpand(&rule.replacement));
            cleaned = replaced.into_owned();
        }

        cleaned
    }

    /// Number of phrase rules, built-in plus extra
    pub fn phrase_count(&self) -> usize {
        self.phrases.len()
    }

    /// Number of token rules, built-in plus extra
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new().expect("Built-in replacement tables must compile")
    }
}

/// Normalize with the built-in tables
pub fn normalize(text: &str) -> String {
    static DEFAULT: OnceLock<Normalizer> = OnceLock::new();
    DEFAULT.get_or_init(Normalizer::default).normalize(text)
}
