//! Keyword normalization, noise filtering, and run-scoped deduplication.
//!
//! Raw text pulled from the page (element text or regex captures out of the
//! page source) passes through two stages before it counts as a keyword:
//!
//! 1. [`normalize`]: keep only the first line, trim, enforce length bounds,
//!    reject known UI chrome. Pure and idempotent.
//! 2. [`KeywordSink`]: one per run, shared by every extraction strategy.
//!    Tracks case-folded uniqueness, preserves first-seen form and order,
//!    and refuses additions past the caller's limit.
//!
//! Candidate rejection at either stage is expected and silent; a too-short
//! string or a duplicate is not an error.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Minimum keyword length in characters, after trimming.
pub const MIN_KEYWORD_CHARS: usize = 3;
/// Maximum keyword length in characters, after trimming.
pub const MAX_KEYWORD_CHARS: usize = 100;

/// UI chrome strings that show up in the feed's markup and embedded JSON but
/// are never keywords. Matched case-insensitively and **exactly**, with no
/// substring matching, so a real keyword that merely contains one of these
/// words (e.g. "trending sneakers") is not suppressed.
static UI_NOISE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "trending",
        "google trends",
        "interest",
        "google",
        "export",
        "relevance",
        "started",
        "hours",
        "days",
        "volume",
        "ago",
        "active",
        "breakdown",
        "past",
        "week",
        "embed",
        "privacy",
        "help",
        "feedback",
        "all",
        "rows per page",
        "show more",
        "back",
        "home",
        "explore",
        "by relevance",
        "all trends",
        "all categories",
        "trending now",
    ])
});

/// Whether `text` is a known UI chrome string rather than a keyword.
pub fn is_noise(text: &str) -> bool {
    UI_NOISE.contains(text.to_lowercase().as_str())
}

/// Normalize a raw candidate into a keyword, or reject it.
///
/// Element text on the feed concatenates the trend title with metadata on
/// following lines ("Olympics 2028\n1M+ searches\n2 hours ago"), so only the
/// text before the first line break is considered. The remainder is trimmed
/// and accepted when its length is within
/// [`MIN_KEYWORD_CHARS`]..=[`MAX_KEYWORD_CHARS`] characters and it is not a
/// noise string.
///
/// Normalizing an already-normalized keyword returns it unchanged.
pub fn normalize(raw: &str) -> Option<String> {
    let first_line = raw.split('\n').next().unwrap_or_default();
    let trimmed = first_line.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_KEYWORD_CHARS || chars > MAX_KEYWORD_CHARS {
        return None;
    }
    if is_noise(trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Order-preserving, limit-bounded keyword collector.
///
/// Exactly one sink exists per invocation and every strategy feeds it, so a
/// later strategy cannot reintroduce a keyword an earlier one already found.
/// Uniqueness is keyed on the case-folded keyword; the first-seen form wins.
#[derive(Debug)]
pub struct KeywordSink {
    limit: usize,
    seen: HashSet<String>,
    keywords: Vec<String>,
}

impl KeywordSink {
    /// Create a sink that accepts at most `limit` keywords.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: HashSet::new(),
            keywords: Vec::new(),
        }
    }

    /// Normalize `candidate` and append it if it is new and the limit has not
    /// been reached. Returns whether a keyword was newly added.
    pub fn offer(&mut self, candidate: &str) -> bool {
        if self.is_full() {
            return false;
        }
        let Some(keyword) = normalize(candidate) else {
            return false;
        };
        if !self.seen.insert(keyword.to_lowercase()) {
            return false;
        }
        self.keywords.push(keyword);
        true
    }

    /// Number of keywords collected so far.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether no keyword has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Whether the sink has reached the caller's limit.
    pub fn is_full(&self) -> bool {
        self.keywords.len() >= self.limit
    }

    /// Consume the sink, yielding keywords in discovery order.
    pub fn into_keywords(self) -> Vec<String> {
        self.keywords
    }
}
