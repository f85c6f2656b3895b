use lazy_static::lazy_static;
use regex::Regex;

/// Command phrases stripped from the front of an utterance. Checked in order;
/// first match wins, so the longer phrases sit before their prefixes
/// ("search for" before "search").
pub const COMMAND_PREFIXES: [&str; 8] = [
    "search for",
    "find",
    "look for",
    "show me",
    "i want to find",
    "can you find",
    "please search for",
    "search",
];

/// Tokens dropped from the residual search terms.
pub const STOPWORDS: [&str; 5] = ["and", "or", "the", "a", "an"];

/// Keywords that terminate a category value mid-utterance without being part
/// of it. They introduce the sort directive, which is extracted later.
pub const SORT_KEYWORDS: [&str; 3] = ["sort", "order", "rank"];

/// Keywords that close a category clause and are consumed with it.
pub const CATEGORY_TAIL_KEYWORDS: [&str; 2] = ["category", "section"];

lazy_static! {
    /// "rated/rating above|over|more than <number>". Input is lowercased
    /// before matching, so the patterns stay lowercase.
    pub static ref RATING_PATTERN: Regex =
        Regex::new(r"\b(?:rated|rating)\s+(?:above|over|more than)\s+(\d+(?:\.\d+)?)")
            .expect("rating pattern is valid");

    /// "under|below|less than|cheaper than|costs less than [$]<number>".
    pub static ref PRICE_PATTERN: Regex = Regex::new(
        r"\b(?:under|below|less than|cheaper than|costs less than)\s+\$?(\d+(?:\.\d+)?)"
    )
    .expect("price pattern is valid");

    /// Head of a category clause: "[(in|under|from)] category ". The value
    /// and optional trailing keyword are scanned token-wise, since the regex
    /// crate has no lookahead to bound a lazy capture mid-string.
    pub static ref CATEGORY_HEAD_PATTERN: Regex =
        Regex::new(r"\b(?:(?:in|under|from)\s+)?category\s+").expect("category pattern is valid");

    /// "(sort|order|rank) by <field> [<direction>]".
    pub static ref SORT_PATTERN: Regex = Regex::new(
        r"\b(?:sort|order|rank)\s+by\s+(rating|price|date|title|relevance)(?:\s+(ascending|descending|asc|desc))?\b"
    )
    .expect("sort pattern is valid");

    /// Whitespace-delimited tokens, with byte offsets.
    pub static ref TOKEN_PATTERN: Regex = Regex::new(r"\S+").expect("token pattern is valid");
}
