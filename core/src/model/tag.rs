use std::fmt;

use serde::{Deserialize, Serialize};

use crate::fuzzy::levenshtein;

/// `#RRGGBB` colour attached to a tag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagColor(String);

impl TagColor {
    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(TagColor(format!("#{}", digits.to_ascii_uppercase())))
        } else {
            None
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
        (channel(1), channel(3), channel(5))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tag {
    pub text: String,
    pub color: TagColor,
}

impl Tag {
    pub fn new(text: &str, color: TagColor) -> Self {
        Self {
            text: text.to_string(),
            color,
        }
    }
}

const DEFAULT_TAGS: &[(&str, &str)] = &[
    ("work", "#FF6B6B"),
    ("personal", "#4ECDC4"),
    ("shopping", "#FFD93D"),
    ("health", "#6BCB77"),
    ("errands", "#4D96FF"),
    ("home", "#C780FA"),
    ("urgent", "#FF8E3C"),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }

    /// Built-in palette offered as suggestions.
    pub fn defaults() -> Self {
        let tags = DEFAULT_TAGS
            .iter()
            .filter_map(|(text, hex)| TagColor::parse(hex).map(|c| Tag::new(text, c)))
            .collect();
        Self { tags }
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tags matching `query`.
    ///
    /// An empty query returns every tag as stored. Otherwise keeps the tags
    /// containing the query (case-insensitive) and ranks them by edit
    /// distance to the query, closest first.
    pub fn filter(&self, query: &str) -> Vec<&Tag> {
        if query.is_empty() {
            return self.tags.iter().collect();
        }

        let query = query.to_lowercase();
        let mut matches: Vec<(usize, &Tag)> = self
            .tags
            .iter()
            .filter_map(|tag| {
                let text = tag.text.to_lowercase();
                text.contains(&query)
                    .then(|| (levenshtein(&query, &text), tag))
            })
            .collect();
        matches.sort_by_key(|(distance, _)| *distance);
        matches.into_iter().map(|(_, tag)| tag).collect()
    }
}
