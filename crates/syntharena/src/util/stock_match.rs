//! Fuzzy lookup of stock names
//!
//! Users type stock names loosely ("emol", "zinc-in stock", "Enamine
//! REAL"). Names and queries are normalised to lowercase alphanumerics per
//! word, then ranked by how strongly the query matches.

use serde::Serialize;

/// Strength of a match, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchKind {
    /// Query characters appear in order with gaps
    Fuzzy,
    /// Query is a contiguous substring
    Substring,
    /// Query starts one of the name's words
    WordStart,
    /// Name starts with the query
    Prefix,
    /// Normalised name equals the query
    Exact,
}

/// A stock name that matched the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockMatch {
    pub name: String,
    pub kind: MatchKind,
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut chars = haystack.chars();
    needle.chars().all(|wanted| chars.any(|c| c == wanted))
}

fn classify(query: &str, name: &str) -> Option<MatchKind> {
    let name_words = words(name);
    let joined: String = name_words.concat();
    if query.is_empty() || joined.is_empty() {
        return None;
    }

    if joined == query {
        Some(MatchKind::Exact)
    } else if joined.starts_with(query) {
        Some(MatchKind::Prefix)
    } else if name_words.iter().any(|word| word.starts_with(query)) {
        Some(MatchKind::WordStart)
    } else if joined.contains(query) {
        Some(MatchKind::Substring)
    } else if is_subsequence(query, &joined) {
        Some(MatchKind::Fuzzy)
    } else {
        None
    }
}

/// Rank the names matching `query`, strongest first
///
/// Ties go to the shorter name, then alphabetical order. Names that do
/// not match at all are left out.
pub fn match_stock<S: AsRef<str>>(query: &str, names: &[S]) -> Vec<StockMatch> {
    let query: String = words(query).concat();

    let mut matches: Vec<StockMatch> = names
        .iter()
        .filter_map(|name| {
            let name = name.as_ref();
            classify(&query, name).map(|kind| StockMatch {
                name: name.to_string(),
                kind,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        b.kind
            .cmp(&a.kind)
            .then_with(|| a.name.len().cmp(&b.name.len()))
            .then_with(|| a.name.cmp(&b.name))
    });
    matches
}

/// The single best stock for `query`, if any name matches
pub fn best_stock_match<S: AsRef<str>>(query: &str, names: &[S]) -> Option<StockMatch> {
    match_stock(query, names).into_iter().next()
}
