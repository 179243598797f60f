use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;

use crate::constants::DEFAULT_METHOD;
use crate::error::DispatchError;

/// The four request fields, in focus order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Url,
    Method,
    Headers,
    Body,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Url, Field::Method, Field::Headers, Field::Body];

    pub fn index(&self) -> usize {
        match self {
            Field::Url => 0,
            Field::Method => 1,
            Field::Headers => 2,
            Field::Body => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn next(&self) -> Field {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(&self) -> Field {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Url => "URL",
            Field::Method => "Method",
            Field::Headers => "Headers (one per line, format: Key: Value)",
            Field::Body => "Request Body",
        }
    }
}

/// Request headers parsed from the Headers field, in the order they were typed.
///
/// Duplicates are kept; the transport decides which one wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderSet(Vec<(String, String)>);

impl HeaderSet {
    /// Parse `Key: Value` lines.
    ///
    /// Blank lines and lines without a colon are dropped. Key and value are
    /// trimmed and otherwise passed through untouched.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect();
        HeaderSet(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Everything needed to fire one request, captured from the fields at send time
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub method: String,
    pub url: String,
    pub headers: HeaderSet,
    /// `None` when the Body field was empty
    pub body: Option<String>,
}

impl PendingRequest {
    /// Returns `None` when the URL is empty
    pub fn from_fields(url: &str, method: &str, headers: &str, body: &str) -> Option<Self> {
        if url.is_empty() {
            return None;
        }
        let method = if method.is_empty() {
            DEFAULT_METHOD.to_string()
        } else {
            method.to_string()
        };
        Some(PendingRequest {
            method,
            url: url.to_string(),
            headers: HeaderSet::parse(headers),
            body: (!body.is_empty()).then(|| body.to_string()),
        })
    }
}

/// Response headers keyed by name; repeated headers keep every value in arrival order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseHeaders(BTreeMap<String, Vec<String>>);

impl ResponseHeaders {
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.entry(name.into()).or_default().push(value.into());
    }

    #[cfg(test)]
    pub(crate) fn get_all(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Successful response, body fully read
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status_code: u16,
    /// e.g. "200 OK"
    pub status_line: String,
    pub headers: ResponseHeaders,
    pub body: String,
    pub elapsed: Duration,
    pub received_at: chrono::DateTime<chrono::Local>,
}

/// Result of one request attempt
#[derive(Clone, Debug)]
pub enum HttpOutcome {
    Response(HttpResponse),
    Failure(DispatchError),
}

impl HttpOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, HttpOutcome::Failure(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_wraps_both_ways() {
        assert_eq!(Field::Body.next(), Field::Url);
        assert_eq!(Field::Url.prev(), Field::Body);
        assert_eq!(Field::from_index(3).next().index(), 0);
        assert_eq!(Field::from_index(0).prev().index(), 3);
    }

    #[test]
    fn test_parse_headers_trims_and_drops_malformed() {
        let headers = HeaderSet::parse("  A : B  \n\nno colon here\nContent-Type: application/json\n   \n");
        let entries: Vec<_> = headers.iter().collect();
        assert_eq!(entries, vec![("A", "B"), ("Content-Type", "application/json")]);
    }

    #[test]
    fn test_parse_headers_splits_at_first_colon() {
        let headers = HeaderSet::parse("Referer: https://example.com:8080/x");
        let entries: Vec<_> = headers.iter().collect();
        assert_eq!(entries, vec![("Referer", "https://example.com:8080/x")]);
    }

    #[test]
    fn test_parse_headers_keeps_duplicates_and_case() {
        let headers = HeaderSet::parse("x-token: 1\nX-Token: 2\nx-token: 3");
        assert_eq!(headers.iter().count(), 3);
        assert_eq!(headers.iter().last(), Some(("x-token", "3")));
    }

    #[test]
    fn test_pending_request_requires_url() {
        assert!(PendingRequest::from_fields("", "GET", "", "").is_none());
    }

    #[test]
    fn test_pending_request_defaults_method_and_body() {
        let req = PendingRequest::from_fields("http://localhost", "", "", "").unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.body, None);

        let req = PendingRequest::from_fields("http://localhost", "brew", "", "{}").unwrap();
        assert_eq!(req.method, "brew");
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_response_headers_preserve_duplicates() {
        let mut headers = ResponseHeaders::default();
        headers.append("set-cookie", "a=1");
        headers.append("set-cookie", "b=2");
        headers.append("content-type", "text/plain");
        assert_eq!(headers.get_all("set-cookie"), ["a=1", "b=2"]);
        assert_eq!(headers.get_all("content-type"), ["text/plain"]);
        assert!(headers.get_all("missing").is_empty());
    }
}
