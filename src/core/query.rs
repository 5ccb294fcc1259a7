//! Natural-language shop query parser.
//!
//! Turns "7-year-old who loves building" into a filter intent: an age band
//! label plus shop categories and play types. Single pass, keyword based,
//! never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::age::AgeBand;
use crate::core::lexicon::{Lexicon, DEFAULT_TABLES};
use crate::models::ParsedQuery;

static RANGE_AGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})\s*(?:-|to)\s*([0-9]{1,2})[\s-]*years?[- ]?old")
        .expect("range age regex")
});

static SINGLE_AGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})[\s-]*years?[- ]?old").expect("single age regex")
});

static INTEREST_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+and\s+|\s+or\s+|,").expect("interest separator regex"));

/// Lowercase, trim, collapse whitespace, straighten quotes and dashes
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{2013}', '\u{2014}'], "-")
}

/// Age band named by normalized text, if any.
///
/// Tries a numeric range, then a single age, then an age word; the first
/// attempt that yields a band wins.
pub fn extract_age(text: &str, lexicon: &Lexicon) -> Option<AgeBand> {
    range_age(text)
        .or_else(|| single_age(text))
        .or_else(|| lexicon.age_word_in(text))
}

fn range_age(text: &str) -> Option<AgeBand> {
    let caps = RANGE_AGE.captures(text)?;
    let start: u32 = caps[1].parse().ok()?;
    let end: u32 = caps[2].parse().ok()?;
    AgeBand::from_years(((start + end) / 2) as f64)
}

fn single_age(text: &str) -> Option<AgeBand> {
    let caps = SINGLE_AGE.captures(text)?;
    let age: u32 = caps[1].parse().ok()?;
    AgeBand::from_years(age as f64)
}

/// Candidate interest phrases following the first cue in lexicon order
pub fn extract_interests(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let Some((idx, cue)) = lexicon
        .cues()
        .iter()
        .find_map(|cue| text.find(cue.as_str()).map(|idx| (idx, cue)))
    else {
        return Vec::new();
    };

    let after_cue = text[idx + cue.len()..].trim();

    INTEREST_SEPARATOR
        .split(after_cue)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Categories and play types matched by interest phrases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestMatch {
    pub categories: Vec<String>,
    pub play_types: Vec<String>,
}

/// Union of the lexicon tags of every phrase; unmatched phrases are skipped
pub fn map_interests(phrases: &[String], lexicon: &Lexicon) -> InterestMatch {
    let mut matched = InterestMatch::default();

    for entry in phrases.iter().filter_map(|p| lexicon.interest_for(p)) {
        for category in &entry.categories {
            push_unique(&mut matched.categories, category);
        }
        for play_type in &entry.play_types {
            push_unique(&mut matched.play_types, play_type);
        }
    }

    matched
}

#[inline]
fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// Query parser bound to a lexicon
#[derive(Debug, Clone, Copy)]
pub struct QueryParser<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> QueryParser<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn parse(&self, query: &str) -> ParsedQuery {
        let normalized = normalize(query);

        let age_range = extract_age(&normalized, self.lexicon).map(|band| band.label().to_string());
        let interests = extract_interests(&normalized, self.lexicon);
        let InterestMatch {
            categories,
            play_types,
        } = map_interests(&interests, self.lexicon);

        let has_results = age_range.is_some() || !categories.is_empty() || !play_types.is_empty();

        ParsedQuery {
            age_range,
            categories,
            play_types,
            has_results,
        }
    }
}

/// Parse a free-text shop query with the embedded lexicon
pub fn parse_query(query: &str) -> ParsedQuery {
    QueryParser::new(&DEFAULT_TABLES.lexicon).parse(query)
}
