//! Request context and the output envelope.
//!
//! This module defines the two data structures that frame a run:
//! - [`RequestContext`]: the caller-supplied parameters, constructed once per
//!   invocation and read-only for the pipeline's duration
//! - [`TrendsReport`]: the single JSON object written to stdout, either a
//!   success record or an error record, well-formed on both paths
//!
//! The envelope's field names are part of the contract with the consuming
//! service: callers branch on the presence of an `error` key, never on parse
//! failure.

use crate::categories::category_name;
use serde::Serialize;
use url::Url;

/// Base of the Trending Now page; filters are passed as query parameters.
const TRENDING_URL: &str = "https://trends.google.com/trending";

/// Caller-supplied parameters for one scrape, never mutated during the run.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// ISO country/region code, upper-cased.
    pub geo: String,
    /// Raw category id as passed on the command line.
    pub category: String,
    /// Display name resolved from the category table ("Unknown" for bad ids).
    pub category_name: String,
    /// Time window in hours, one of "4", "24", "48", "168".
    pub hours: String,
    /// Maximum number of keywords to return.
    pub limit: usize,
}

impl RequestContext {
    /// Build a context from raw invocation inputs.
    ///
    /// `geo` is trimmed and upper-cased here so the rest of the pipeline and
    /// the envelope see one canonical form; the category display name is
    /// resolved once.
    pub fn new(geo: &str, category: &str, hours: &str, limit: usize) -> Self {
        let category = category.trim().to_string();
        Self {
            geo: geo.trim().to_uppercase(),
            category_name: category_name(&category).to_string(),
            category,
            hours: hours.trim().to_string(),
            limit,
        }
    }

    /// The fully parameterized page URL for this request.
    pub fn target_url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            TRENDING_URL,
            &[
                ("geo", self.geo.as_str()),
                ("category", self.category.as_str()),
                ("hours", self.hours.as_str()),
                ("hl", "en-US"),
            ],
        )
    }
}

/// The one JSON object emitted per invocation.
///
/// Exactly one variant is ever produced. The failure shape still carries
/// `keywords` and `count` so callers can consume both shapes uniformly.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TrendsReport {
    /// Keywords were extracted (possibly zero; no trends is not an error).
    Success {
        keywords: Vec<String>,
        count: usize,
        geo: String,
        category: String,
        category_name: String,
        hours: String,
    },
    /// The run hit a fatal acquisition error before extraction could finish.
    Failure {
        error: String,
        keywords: Vec<String>,
        count: usize,
    },
}

impl TrendsReport {
    /// Success envelope for `keywords` found under `ctx`.
    pub fn success(ctx: &RequestContext, keywords: Vec<String>) -> Self {
        TrendsReport::Success {
            count: keywords.len(),
            keywords,
            geo: ctx.geo.clone(),
            category: ctx.category.clone(),
            category_name: ctx.category_name.clone(),
            hours: ctx.hours.clone(),
        }
    }

    /// Error envelope. Keywords are always empty on this path.
    pub fn failure(message: impl Into<String>) -> Self {
        TrendsReport::Failure {
            error: message.into(),
            keywords: Vec::new(),
            count: 0,
        }
    }

    /// Whether this is the error-shaped envelope (drives the exit code).
    pub fn is_failure(&self) -> bool {
        matches!(self, TrendsReport::Failure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext::new("in", "17", "168", 20)
    }

    #[test]
    fn test_context_uppercases_geo() {
        assert_eq!(ctx().geo, "IN");
        assert_eq!(RequestContext::new("  us ", "0", "24", 5).geo, "US");
    }

    #[test]
    fn test_context_resolves_category_name() {
        assert_eq!(ctx().category_name, "Sports");
        assert_eq!(RequestContext::new("US", "99", "168", 5).category_name, "Unknown");
    }

    #[test]
    fn test_target_url_carries_all_params() {
        let url = ctx().target_url().unwrap();
        assert_eq!(url.host_str(), Some("trends.google.com"));
        assert_eq!(url.path(), "/trending");
        let query = url.query().unwrap();
        assert!(query.contains("geo=IN"));
        assert!(query.contains("category=17"));
        assert!(query.contains("hours=168"));
        assert!(query.contains("hl=en-US"));
    }

    #[test]
    fn test_success_report_shape() {
        let report = TrendsReport::success(&ctx(), vec!["Olympics 2028".to_string()]);
        assert!(!report.is_failure());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["keywords"][0], "Olympics 2028");
        assert_eq!(json["count"], 1);
        assert_eq!(json["geo"], "IN");
        assert_eq!(json["category"], "17");
        assert_eq!(json["category_name"], "Sports");
        assert_eq!(json["hours"], "168");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_empty_success_is_not_an_error() {
        let report = TrendsReport::success(&ctx(), Vec::new());
        assert!(!report.is_failure());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["count"], 0);
        assert_eq!(json["keywords"].as_array().unwrap().len(), 0);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_report_shape() {
        let report = TrendsReport::failure("browser launch failed");
        assert!(report.is_failure());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["error"], "browser launch failed");
        assert_eq!(json["count"], 0);
        assert_eq!(json["keywords"].as_array().unwrap().len(), 0);
        assert!(json.get("geo").is_none());
    }

    #[test]
    fn test_report_serializes_without_variant_tag() {
        let report = TrendsReport::failure("boom");
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("Failure"));
        assert!(json.starts_with('{'));
    }

    #[test]
    fn test_non_ascii_keywords_survive_serialization() {
        let report = TrendsReport::success(&ctx(), vec!["东京奥运".to_string()]);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("东京奥运"));
    }
}
