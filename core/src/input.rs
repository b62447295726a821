use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tracing::debug;

use crate::time::parse_human_date;

pub const KNOWN_KEYS: &[&str] = &["due"];

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    // 1. Exact match
    if candidates.contains(&key) {
        return Ok(key.to_string());
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(matches[0].to_string()),
        0 => Err(anyhow!("Unknown key: '{}'", key)),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// What the add line asks for once `key:value` tokens are pulled out.
#[derive(Debug, PartialEq)]
pub struct AddLine {
    pub text: String,
    /// Explicit `due:` value, already resolved against today.
    pub due: Option<NaiveDate>,
}

/// Splits an add line into task text and an explicit due date.
///
/// Tokens with an unknown key, or a `due:` value that does not parse, stay
/// part of the text so nothing the user typed is silently dropped.
pub fn parse_add_line(line: &str, today: NaiveDate) -> AddLine {
    let mut text_parts = Vec::new();
    let mut due = None;

    for word in line.split_whitespace() {
        let Some((key, value)) = word
            .split_once(':')
            .filter(|(k, v)| !k.is_empty() && !v.is_empty())
        else {
            text_parts.push(word);
            continue;
        };

        let resolved = expand_key(key, KNOWN_KEYS).and_then(|_| parse_human_date(value, today));
        match resolved {
            Ok(date) => due = Some(date),
            Err(e) => {
                debug!(token = word, error = %e, "kept token as text");
                text_parts.push(word);
            }
        }
    }

    AddLine {
        text: text_parts.join(" "),
        due,
    }
}

/// The `#query` being typed at the end of the line, without the `#`.
pub fn trailing_tag_query(line: &str) -> Option<&str> {
    if line.ends_with(char::is_whitespace) {
        return None;
    }
    line.split_whitespace().last()?.strip_prefix('#')
}

/// Replaces the trailing `#query` with `#tag `.
pub fn complete_tag(line: &str, tag: &str) -> String {
    match trailing_tag_query(line) {
        Some(query) => {
            let head = &line[..line.len() - query.len()];
            format!("{}{} ", head, tag)
        }
        None => line.to_string(),
    }
}
