//! Heuristic person-name extraction.
//!
//! # Overview
//!
//! The extractor scans whitespace tokens and chains runs of name-like
//! capitalized words into candidate person names. A candidate is kept when
//! it is either a multi-token run ("Hillary Clinton", "Martin Luther King")
//! or a single token introduced by an honorific ("Mr Comey" → "Comey").
//! Bare single capitalized words are dropped: they are far more often
//! places, organizations, or sentence furniture than people.
//!
//! Rules:
//! - A name token starts uppercase, contains no digits, and is not an
//!   all-caps acronym. Inner apostrophes, hyphens, and initials with a
//!   trailing period ("J.") are allowed.
//! - Sentence-initial common words ("The", "When", ...) never open a run.
//! - Lowercase connective particles ("van", "bin", "de", ...) extend a run
//!   when a name token follows ("Osama bin Laden").
//! - Possessives are stripped ("Obama's" → "Obama").
//!
//! Each document yields a `BTreeSet<String>`, so downstream edge
//! generation sees a deduplicated, deterministically ordered name set.

use std::collections::BTreeSet;

use tracing::{debug, info, instrument};

/// A person-name extractor over raw document text.
///
/// The extractor is created once at startup and reused for every document;
/// implementations should keep any model state inside `self`.
pub trait PersonExtractor {
    /// Extract the unique person names mentioned in `text`.
    fn extract(&self, text: &str) -> BTreeSet<String>;
}

/// Common capitalized words that never open a name run.
const COMMON_WORDS: &[&str] = &[
    "The", "This", "That", "These", "Those", "When", "Where", "What", "Which", "While", "With",
    "From", "Into", "Upon", "About", "After", "Before", "During", "Between", "Through", "Against",
    "Without", "Within", "Along", "Beyond", "Under", "Above", "Below", "Behind", "Here", "There",
    "Then", "Thus", "Also", "Even", "Just", "Only", "Some", "Many", "Much", "Most", "Other",
    "Such", "Each", "Every", "Both", "Either", "Neither", "All", "Any", "Few", "More", "Less",
    "But", "And", "For", "Nor", "Not", "Yet", "His", "Her", "Its", "Our", "Your", "Their", "Who",
    "How", "Why", "Can", "May", "Will", "Shall", "Should", "Would", "Could", "Must", "Has",
    "Have", "Had", "Was", "Were", "Been", "Being", "Are", "Now", "New", "Old", "Good", "Great",
    "Long", "First", "Last", "Next", "Like", "Over", "Still", "Back", "Well", "Down", "Off",
    "Come", "Made", "See", "One", "Two", "Three", "Monday", "Tuesday", "Wednesday", "Thursday",
    "Friday", "Saturday", "Sunday", "January", "February", "March", "April", "June", "July",
    "August", "September", "October", "November", "December", "Street", "House", "State",
    "States", "United", "National", "Department", "Congress", "Senate", "White", "News",
];

/// Titles that introduce a person name. A single name token after one of
/// these is kept even though bare singles are otherwise dropped.
const HONORIFICS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sen", "Rep", "Gov", "Gen", "Col", "Capt", "Lt", "Sgt",
    "Rev", "President", "Senator", "Governor", "Secretary", "Representative", "Justice",
    "Chancellor", "Ambassador",
];

/// Lowercase particles that may join two name tokens.
const CONNECTORS: &[&str] = &["van", "von", "der", "de", "del", "da", "di", "bin", "al", "el"];

/// Deterministic rule-based [`PersonExtractor`].
///
/// Stateless; construction is free and the same instance is reused across
/// all documents of a run.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    /// Create the default heuristic extractor.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PersonExtractor for HeuristicExtractor {
    fn extract(&self, text: &str) -> BTreeSet<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut names = BTreeSet::new();

        let mut i = 0;
        let mut pending_honorific = false;

        while i < tokens.len() {
            let raw = tokens[i];
            let clean = clean_token(raw);

            if clean.is_empty() {
                pending_honorific = false;
                i += 1;
                continue;
            }

            if is_honorific(&clean) {
                pending_honorific = true;
                i += 1;
                continue;
            }

            if is_name_token(&clean) && !is_common_word(&clean) {
                let (parts, consumed) = collect_run(&tokens[i..]);

                if parts.len() >= 2 || pending_honorific {
                    names.insert(parts.join(" "));
                }

                i += consumed;
                pending_honorific = false;
                continue;
            }

            pending_honorific = false;
            i += 1;
        }

        names
    }
}

/// Collect a run of name tokens starting at `tokens[0]`.
///
/// Returns the cleaned parts and the number of raw tokens consumed. A
/// sentence boundary inside the run ends it, so names on either side of a
/// period never fuse.
fn collect_run(tokens: &[&str]) -> (Vec<String>, usize) {
    let mut parts = Vec::new();
    let mut consumed = 0;

    while consumed < tokens.len() {
        let raw = tokens[consumed];
        let clean = clean_token(raw);

        if is_name_token(&clean) && !is_common_word(&clean) {
            parts.push(clean);
            consumed += 1;
            if ends_sentence(raw) {
                break;
            }
            continue;
        }

        // A connective particle continues the run only when another name
        // token follows it ("Osama bin Laden", "Ludwig van Beethoven").
        if is_connector(&clean) && !parts.is_empty() && consumed + 1 < tokens.len() {
            let next = clean_token(tokens[consumed + 1]);
            if is_name_token(&next) && !is_common_word(&next) {
                parts.push(clean);
                consumed += 1;
                continue;
            }
        }

        break;
    }

    (parts, consumed.max(1))
}

/// Strip surrounding punctuation and a trailing possessive from a token.
fn clean_token(raw: &str) -> String {
    let trimmed = raw
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches(|c: char| !c.is_alphanumeric() && c != '.');

    // Keep a single trailing period only for one-letter initials ("J.").
    let trimmed = if trimmed.ends_with('.') && trimmed.chars().count() > 2 {
        trimmed.trim_end_matches('.')
    } else {
        trimmed
    };

    let without_possessive = trimmed
        .strip_suffix("'s")
        .or_else(|| trimmed.strip_suffix("\u{2019}s"))
        .unwrap_or(trimmed);

    without_possessive.to_string()
}

/// Does this raw token close a sentence?
fn ends_sentence(raw: &str) -> bool {
    raw.ends_with(['.', '!', '?', ':', ';'])
        || raw.ends_with(".\"")
        || raw.ends_with("!\"")
        || raw.ends_with("?\"")
}

/// A token that can be part of a person name.
fn is_name_token(clean: &str) -> bool {
    let mut chars = clean.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    if !first.is_uppercase() {
        return false;
    }
    if clean.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }

    // Single-letter initial with a period ("J.").
    if clean.len() == 2 && clean.ends_with('.') {
        return true;
    }
    if clean.chars().filter(|c| c.is_alphabetic()).count() < 2 {
        return false;
    }

    // Reject acronyms: every alphabetic char uppercase ("NATO", "FBI").
    let all_upper = clean
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(char::is_uppercase);
    if all_upper {
        return false;
    }

    clean
        .chars()
        .all(|c| c.is_alphabetic() || c == '\'' || c == '-' || c == '.' || c == '\u{2019}')
}

fn is_common_word(clean: &str) -> bool {
    COMMON_WORDS.contains(&clean)
}

fn is_honorific(clean: &str) -> bool {
    let base = clean.trim_end_matches('.');
    HONORIFICS.contains(&base)
}

fn is_connector(clean: &str) -> bool {
    CONNECTORS.contains(&clean)
}

/// Run `extractor` over every document, returning one name set per document.
///
/// Documents with no recognizable person names yield empty sets, which is
/// valid; they simply contribute no edges downstream.
#[must_use]
#[instrument(skip_all, fields(documents = documents.len()))]
pub fn extract_all<E: PersonExtractor>(
    extractor: &E,
    documents: &[String],
) -> Vec<BTreeSet<String>> {
    let mut sets = Vec::with_capacity(documents.len());

    for (i, text) in documents.iter().enumerate() {
        let names = extractor.extract(text);
        debug!(document = i, names = names.len(), "extracted");
        sets.push(names);
    }

    let total: usize = sets.iter().map(BTreeSet::len).sum();
    info!(documents = sets.len(), total_names = total, "extraction complete");

    sets
}
