//! Routing client error types.
//!
//! These classify why a lookup failed, for logging and retry decisions.
//! Callers of [`WalkingRouter`](super::WalkingRouter) never see them: every
//! failure becomes [`Lookup::Unresolved`](super::Lookup::Unresolved).

/// Errors from a routing service request.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// Transport failure (connection refused, timeout, reset, ...)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status code
    #[error("routing service returned status {status}")]
    Status { status: u16 },

    /// The response body did not have the expected shape
    #[error("malformed routing response: {0}")]
    Malformed(String),

    /// The service answered but reported that no route exists
    #[error("routing service reported {code}")]
    NoRoute { code: String },

    /// Every attempt failed; `last` is the final attempt's failure
    #[error("gave up after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: u32,
        last: Box<RoutingError>,
    },

    /// The request throttle was closed
    #[error("request throttle closed")]
    ThrottleClosed,
}

impl RoutingError {
    /// Whether another attempt may succeed.
    ///
    /// Transport failures and error statuses are retried. A well-formed
    /// answer we cannot use will not change on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RoutingError::Http(_) | RoutingError::Status { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::Status { status: 503 };
        assert_eq!(err.to_string(), "routing service returned status 503");

        let err = RoutingError::Malformed("missing routes".into());
        assert_eq!(err.to_string(), "malformed routing response: missing routes");

        let err = RoutingError::Exhausted {
            attempts: 3,
            last: Box::new(RoutingError::Status { status: 429 }),
        };
        assert_eq!(
            err.to_string(),
            "gave up after 3 attempt(s): routing service returned status 429"
        );
    }

    #[test]
    fn retryable_classification() {
        assert!(RoutingError::Status { status: 500 }.is_retryable());
        assert!(!RoutingError::Malformed(String::new()).is_retryable());
        assert!(
            !RoutingError::NoRoute {
                code: "NoRoute".into()
            }
            .is_retryable()
        );
        assert!(!RoutingError::ThrottleClosed.is_retryable());
    }
}
