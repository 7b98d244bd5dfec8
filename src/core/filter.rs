use crate::core::error::FilterError;
use crate::core::item::Item;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Narrows an item list down to the entries matching a query.
///
/// Implementations must be deterministic and side-effect free. The
/// controller replaces its results wholesale with whatever is returned.
pub trait FilterOptions {
    fn filter(&self, items: &[Item], query: &str) -> Result<Vec<Item>, FilterError>;
}

impl<F> FilterOptions for F
where
    F: Fn(&[Item], &str) -> Vec<Item>,
{
    fn filter(&self, items: &[Item], query: &str) -> Result<Vec<Item>, FilterError> {
        Ok(self(items, query))
    }
}

/// Built-in filters. All of them keep source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStrategy {
    /// Case-insensitive substring containment.
    #[default]
    Substring,
    Prefix,
    /// Query characters appear in order, not necessarily adjacent.
    Fuzzy,
    Regex,
}

impl FilterStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Substring => "substring",
            Self::Prefix => "prefix",
            Self::Fuzzy => "fuzzy",
            Self::Regex => "regex",
        }
    }
}

impl std::str::FromStr for FilterStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "substring" => Ok(Self::Substring),
            "prefix" => Ok(Self::Prefix),
            "fuzzy" => Ok(Self::Fuzzy),
            "regex" => Ok(Self::Regex),
            other => Err(format!(
                "unknown filter `{other}` (expected substring, prefix, fuzzy or regex)"
            )),
        }
    }
}

impl FilterOptions for FilterStrategy {
    fn filter(&self, items: &[Item], query: &str) -> Result<Vec<Item>, FilterError> {
        match self {
            Self::Substring => Ok(substring_filter(items, query)),
            Self::Prefix => {
                let needle = query.to_lowercase();
                Ok(retain(items, |text| text.to_lowercase().starts_with(&needle)))
            }
            Self::Fuzzy => Ok(retain(items, |text| {
                subsequence_indices(query, text).is_some()
            })),
            Self::Regex => {
                let pattern = RegexBuilder::new(query)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| FilterError::InvalidPattern {
                        pattern: query.to_string(),
                        source,
                    })?;
                Ok(retain(items, |text| pattern.is_match(text)))
            }
        }
    }
}

/// Default filter: case-insensitive substring containment.
pub fn substring_filter(items: &[Item], query: &str) -> Vec<Item> {
    let needle = query.to_lowercase();
    retain(items, |text| text.to_lowercase().contains(&needle))
}

/// Character ranges of `text` matched by `query`, for highlighting.
///
/// Tries a contiguous case-insensitive match first and falls back to an
/// in-order subsequence. Ranges are `(start, end)` char offsets.
pub fn match_ranges(query: &str, text: &str) -> Vec<(usize, usize)> {
    subsequence_indices(query, text)
        .map(|indices| indices_to_ranges(&indices))
        .unwrap_or_default()
}

fn retain(items: &[Item], mut keep: impl FnMut(&str) -> bool) -> Vec<Item> {
    items
        .iter()
        .filter(|item| keep(item.as_str()))
        .cloned()
        .collect()
}

fn subsequence_indices(query: &str, candidate: &str) -> Option<Vec<usize>> {
    let query_chars: Vec<char> = query.chars().map(fold_case).collect();
    let candidate_chars: Vec<char> = candidate.chars().map(fold_case).collect();

    if query_chars.is_empty() {
        return Some(Vec::new());
    }

    if query_chars.len() <= candidate_chars.len() {
        for start in 0..=candidate_chars.len() - query_chars.len() {
            if candidate_chars[start..start + query_chars.len()] == query_chars[..] {
                return Some((start..start + query_chars.len()).collect());
            }
        }
    }

    let mut indices = Vec::new();
    let mut qpos = 0;
    for (cpos, ch) in candidate_chars.iter().enumerate() {
        if qpos >= query_chars.len() {
            break;
        }
        if *ch == query_chars[qpos] {
            indices.push(cpos);
            qpos += 1;
        }
    }

    if qpos == query_chars.len() {
        Some(indices)
    } else {
        None
    }
}

// One char in, one char out, so match offsets stay aligned with the source text.
fn fold_case(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn indices_to_ranges(indices: &[usize]) -> Vec<(usize, usize)> {
    let Some(&first) = indices.first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut prev = first;
    for &idx in &indices[1..] {
        if idx == prev + 1 {
            prev = idx;
            continue;
        }
        ranges.push((start, prev + 1));
        start = idx;
        prev = idx;
    }
    ranges.push((start, prev + 1));
    ranges
}
