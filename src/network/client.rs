//! HTTP client wrapper - executes one request and captures the outcome

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};

use crate::error::{describe, DispatchError};
use crate::models::{HttpOutcome, HttpResponse, PendingRequest, ResponseHeaders};

fn construction(e: &(dyn std::error::Error + 'static)) -> DispatchError {
    DispatchError::Construction(describe(e))
}

/// Build a request from the captured fields
fn build_request(
    client: &reqwest::Client,
    request: &PendingRequest,
) -> Result<reqwest::Request, DispatchError> {
    let method = Method::from_bytes(request.method.as_bytes())
        .map_err(|e| DispatchError::Construction(format!("invalid method {:?}: {}", request.method, e)))?;
    let url = Url::parse(&request.url)
        .map_err(|e| DispatchError::Construction(format!("invalid URL {:?}: {}", request.url, e)))?;

    // insert() overwrites, so the last duplicate wins
    let mut headers = HeaderMap::new();
    for (key, value) in request.headers.iter() {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| construction(&e))?;
        let value = HeaderValue::from_str(value).map_err(|e| construction(&e))?;
        headers.insert(name, value);
    }

    let mut req_builder = client.request(method, url).headers(headers);
    if let Some(body) = &request.body {
        req_builder = req_builder.body(body.clone());
    }

    req_builder.build().map_err(|e| construction(&e))
}

/// Execute an HTTP request and return the outcome (buffered).
///
/// Elapsed time runs from just before the send to just after the last body byte.
pub async fn execute_request(client: &reqwest::Client, request: PendingRequest) -> HttpOutcome {
    match execute(client, &request).await {
        Ok(response) => HttpOutcome::Response(response),
        Err(e) => HttpOutcome::Failure(e),
    }
}

async fn execute(
    client: &reqwest::Client,
    request: &PendingRequest,
) -> Result<HttpResponse, DispatchError> {
    let req = build_request(client, request)?;

    let start = Instant::now();
    let resp = client
        .execute(req)
        .await
        .map_err(|e| DispatchError::Transport(describe(&e)))?;

    let status = resp.status();
    // hyper only records the phrase when it differs from the canonical one
    let reason = resp
        .extensions()
        .get::<hyper::ext::ReasonPhrase>()
        .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
        .or_else(|| status.canonical_reason().map(str::to_string));
    let status_line = match reason {
        Some(reason) if !reason.is_empty() => format!("{} {}", status.as_u16(), reason),
        _ => status.as_u16().to_string(),
    };

    let mut headers = ResponseHeaders::default();
    for (name, value) in resp.headers() {
        headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }

    let body = resp
        .text()
        .await
        .map_err(|e| DispatchError::BodyRead(describe(&e)))?;
    let elapsed = start.elapsed();

    Ok(HttpResponse {
        status_code: status.as_u16(),
        status_line,
        headers,
        body,
        elapsed,
        received_at: chrono::Local::now(),
    })
}

/// Create an HTTP client with a total request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}
