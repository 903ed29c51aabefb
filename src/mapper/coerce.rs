use serde::Deserialize;
use std::collections::HashSet;

/// A list field accepted either as a JSON array or as a comma-separated string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Many(Vec<String>),
    Joined(String),
}

/// An `order` field accepted as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OrderInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Normalizes a list field into trimmed, non-empty entries.
pub fn to_list(input: Option<ListInput>) -> Vec<String> {
    let items = match input {
        None => return Vec::new(),
        Some(ListInput::Many(items)) => items,
        Some(ListInput::Joined(joined)) => joined.split(',').map(str::to_string).collect(),
    };

    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub fn is_http_url(candidate: &str) -> bool {
    let lower = candidate.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Like [`to_list`], keeping only http(s) URLs.
pub fn to_image_urls(input: Option<ListInput>) -> Vec<String> {
    to_list(input)
        .into_iter()
        .filter(|url| is_http_url(url))
        .collect()
}

/// Coerces an order field to an integer; absent or unparseable values become 0.
pub fn to_order(input: Option<OrderInput>) -> i64 {
    match input {
        None => 0,
        Some(OrderInput::Integer(value)) => value,
        Some(OrderInput::Float(value)) => float_to_order(value),
        Some(OrderInput::Text(text)) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().map(float_to_order))
                .unwrap_or(0)
        }
    }
}

fn float_to_order(value: f64) -> i64 {
    if value.is_finite() {
        value.trunc() as i64
    } else {
        0
    }
}

/// Trims a free-text field, mapping blank input to `None`.
pub fn non_blank(input: Option<String>) -> Option<String> {
    input
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Trims, collapses internal whitespace and Title-Cases every word.
pub fn normalize_category_name(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes every category and drops case-insensitive duplicates, keeping
/// the first occurrence.
pub fn normalize_categories<I, S>(categories: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .map(|category| normalize_category_name(category.as_ref()))
        .filter(|category| !category.is_empty())
        .filter(|category| seen.insert(category.to_lowercase()))
        .collect()
}
