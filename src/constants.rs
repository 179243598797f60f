//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.
//! Nothing here is read from disk or the environment.

use std::time::Duration;

/// Default URL shown in the URL field at startup
pub const DEFAULT_HTTP_URL: &str = "https://httpbin.org/get";

/// Method substituted when the Method field is blank at send time
pub const DEFAULT_METHOD: &str = "GET";

/// Total timeout for one request, from connect to the last body byte
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of characters of the response body shown on screen
pub const BODY_PREVIEW_LIMIT: usize = 1000;

/// Appended to a body preview that was cut at `BODY_PREVIEW_LIMIT`
pub const TRUNCATION_MARKER: &str = "...";

/// How long the UI loop waits for a terminal event before checking for new state
pub const UI_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spinner animation tick while a request is in flight
pub const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Braille "dot" spinner
pub const SPINNER_FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Character limits for the single-line fields
pub const URL_CHAR_LIMIT: usize = 500;
pub const METHOD_CHAR_LIMIT: usize = 10;

/// Log file, written to the working directory
pub const LOG_FILE_NAME: &str = "endpoint-tester.log";

/// Application name
pub const APP_NAME: &str = "HTTP Endpoint Tester";
