//! Turning free-form model replies into values the drivers can print.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::warn;

static ANSWER_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<ANSWER>(.*?)</ANSWER>").expect("answer tag pattern is valid")
});

/// Returns the trimmed text inside the first `<ANSWER>…</ANSWER>` pair.
pub fn extract_answer(text: &str) -> Option<String> {
    ANSWER_TAG
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|answer| answer.as_str().trim().to_string())
}

/// Independent labels assigned to one piece of content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFlags {
    pub people: bool,
    pub hardware: bool,
}

impl CategoryFlags {
    pub fn is_empty(&self) -> bool {
        !self.people && !self.hardware
    }
}

/// Reads a comma-separated classification reply.
///
/// Matching is case-insensitive per token. A reply naming neither keyword
/// yields all-false flags.
pub fn categorize(reply: &str) -> CategoryFlags {
    let lowered = reply.to_lowercase();
    let mut flags = CategoryFlags::default();
    for token in lowered.split(',') {
        match token.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '\'' | '"')) {
            "people" => flags.people = true,
            "hardware" => flags.hardware = true,
            _ => {}
        }
    }
    if flags.is_empty() {
        warn!(reply = %reply.trim(), "classification reply named no category");
    }
    flags
}

/// File names per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorizedFiles {
    pub people: Vec<String>,
    pub hardware: Vec<String>,
}

impl CategorizedFiles {
    /// Buckets `(file name, flags)` pairs, keeping input order.
    pub fn from_flags<I>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, CategoryFlags)>,
    {
        let mut files = Self::default();
        for (name, flags) in results {
            if flags.people {
                files.people.push(name.clone());
            }
            if flags.hardware {
                files.hardware.push(name);
            }
        }
        files
    }

    /// Unions several bucketings; each list comes out sorted and deduplicated.
    pub fn merge<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a CategorizedFiles>,
    {
        let mut people = BTreeSet::new();
        let mut hardware = BTreeSet::new();
        for part in parts {
            people.extend(part.people.iter().cloned());
            hardware.extend(part.hardware.iter().cloned());
        }
        Self {
            people: people.into_iter().collect(),
            hardware: hardware.into_iter().collect(),
        }
    }
}
