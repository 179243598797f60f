//! Dispatch errors - why a single request attempt produced no response

use std::error::Error as StdError;

use thiserror::Error;

/// Terminal failure of one request attempt. None of these are retried.
///
/// `Display` is exactly the message text; the response screen shows it
/// verbatim and does not distinguish the kinds any further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Bad method, URL or header syntax; nothing was sent
    #[error("{0}")]
    Construction(String),
    /// DNS, connect, TLS or timeout failure before a response arrived
    #[error("{0}")]
    Transport(String),
    /// The response head arrived but the body stream failed
    #[error("{0}")]
    BodyRead(String),
}

impl DispatchError {
    /// The text shown after the error prefix
    pub fn message(&self) -> &str {
        match self {
            DispatchError::Construction(msg)
            | DispatchError::Transport(msg)
            | DispatchError::BodyRead(msg) => msg,
        }
    }
}

/// Flatten an error and its `source()` chain into one line.
///
/// reqwest keeps the interesting part (e.g. "operation timed out") in the
/// source chain, so the top-level `Display` alone is not enough.
pub fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        source = cause.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(Inner);
    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "error sending request")
        }
    }
    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }
    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "operation timed out")
        }
    }
    impl StdError for Inner {}

    #[test]
    fn test_describe_walks_source_chain() {
        let err = Outer(Inner);
        assert_eq!(describe(&err), "error sending request: operation timed out");
    }

    #[test]
    fn test_display_is_message() {
        let err = DispatchError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.message(), "connection refused");
        assert_eq!(DispatchError::BodyRead("eof".into()).message(), "eof");
    }
}
