//! Search response decoding.
//!
//! The host delivers a status code, response headers and the raw body. This
//! module validates them against the search response schema and produces a
//! [`ResultPage`], or classifies the failure into a [`ZsplashError`].

use crate::domain::{Photo, Result, ZsplashError};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Longest slice of an unparsable error body echoed to the user.
const MAX_ERROR_SNIPPET: usize = 120;

/// One decoded page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultPage {
    pub items: Vec<Photo>,
    /// Total number of matches across all pages.
    pub total: u64,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    total: u64,
    total_pages: u32,
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    errors: Vec<String>,
}

/// Decodes a search response.
///
/// # Classification
///
/// - Status 400 with no response headers: the host failed before reaching the
///   server and put its own error text in the body → [`ZsplashError::Transport`]
/// - Other non-2xx statuses → [`ZsplashError::Response`] with the API's
///   `errors` list (or a body snippet) as message
/// - 2xx with a body that does not match the schema → [`ZsplashError::Response`]
///   without status
///
/// # Errors
///
/// See the classification above.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use zsplash::api::parse_search_response;
///
/// let body = br#"{"total": 0, "total_pages": 0, "results": []}"#;
/// let headers = BTreeMap::from([("content-type".to_string(), "application/json".to_string())]);
/// let page = parse_search_response(200, &headers, body).unwrap();
/// assert!(page.items.is_empty());
/// ```
pub fn parse_search_response(
    status: u16,
    headers: &BTreeMap<String, String>,
    body: &[u8],
) -> Result<ResultPage> {
    let _span = tracing::debug_span!("parse_search_response", status, body_len = body.len()).entered();

    if !(200..300).contains(&status) {
        let err = classify_failure(status, headers, body);
        tracing::debug!(error = %err, "search request failed");
        return Err(err);
    }

    let decoded: SearchBody = serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "search response does not match schema");
        ZsplashError::malformed(e.to_string())
    })?;

    if let Some(bad) = decoded.results.iter().find(|p| !is_complete(p)) {
        return Err(ZsplashError::malformed(format!(
            "result {:?} is missing an id or image URL",
            bad.id
        )));
    }

    tracing::debug!(
        items = decoded.results.len(),
        total = decoded.total,
        total_pages = decoded.total_pages,
        "search response decoded"
    );

    Ok(ResultPage {
        items: decoded.results,
        total: decoded.total,
        total_pages: decoded.total_pages,
    })
}

fn is_complete(photo: &Photo) -> bool {
    !photo.id.trim().is_empty()
        && !photo.urls.small.trim().is_empty()
        && !photo.urls.regular.trim().is_empty()
}

fn classify_failure(status: u16, headers: &BTreeMap<String, String>, body: &[u8]) -> ZsplashError {
    let text = String::from_utf8_lossy(body);

    if status == 400 && headers.is_empty() {
        let message = text.trim();
        return ZsplashError::Transport(if message.is_empty() {
            "request could not be sent".to_string()
        } else {
            message.to_string()
        });
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .filter(|e| !e.errors.is_empty())
        .map(|e| e.errors.join("; "))
        .unwrap_or_else(|| snippet(&text, status));

    ZsplashError::Response {
        status: Some(status),
        message,
    }
}

fn snippet(text: &str, status: u16) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return format!("empty body with status {status}");
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_SNIPPET).collect();
    if cut.len() < trimmed.len() {
        cut.push('…');
    }
    cut
}
