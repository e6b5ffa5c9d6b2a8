use std::error::Error;

use crate::api::FetchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    NotFound,        // HTTP 404
    RateLimited,     // HTTP 429
    ServerError,     // HTTP 500+
    NetworkError,    // DNS, routing, etc.
    InvalidResponse, // body without a usable rate
    Other,
}

/// Classify a fetch failure based on its variant and error chain
pub fn classify_error(error: &FetchError) -> ErrorType {
    match error {
        FetchError::Status(status) => match status.as_u16() {
            404 => ErrorType::NotFound,
            429 => ErrorType::RateLimited,
            500..=599 => ErrorType::ServerError,
            _ => ErrorType::Other,
        },
        FetchError::MissingRate(_) | FetchError::InvalidRate(_) => ErrorType::InvalidResponse,
        FetchError::Request(err) => {
            if err.is_timeout() {
                return ErrorType::Timeout;
            }
            if err.is_decode() {
                return ErrorType::InvalidResponse;
            }

            let error_msg = format_error_message(error).to_lowercase();
            if error_msg.contains("connection refused") {
                return ErrorType::ConnectionRefused;
            }
            if error_msg.contains("timed out") {
                return ErrorType::Timeout;
            }
            if err.is_connect() || error_msg.contains("dns") || error_msg.contains("network") {
                return ErrorType::NetworkError;
            }

            ErrorType::Other
        }
    }
}

/// Format error message for display - show the root cause
pub fn format_error_message(error: &FetchError) -> String {
    let mut source = error.source();
    let mut deepest = error.to_string();

    while let Some(err) = source {
        deepest = err.to_string();
        source = err.source();
    }

    deepest
}

/// Short human explanation of an error type
pub fn describe(error_type: &ErrorType) -> &'static str {
    match error_type {
        ErrorType::ConnectionRefused => "the rate service refused the connection",
        ErrorType::Timeout => "the rate service did not answer in time",
        ErrorType::NotFound => "the rate endpoint was not found",
        ErrorType::RateLimited => "the rate service is rate limiting requests",
        ErrorType::ServerError => "the rate service had an internal error",
        ErrorType::NetworkError => "the network is unreachable",
        ErrorType::InvalidResponse => "the rate service sent no usable rate",
        ErrorType::Other => "the request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_classify_not_found() {
        let err = FetchError::Status(StatusCode::NOT_FOUND);
        assert_eq!(classify_error(&err), ErrorType::NotFound);
    }

    #[test]
    fn test_classify_rate_limited() {
        let err = FetchError::Status(StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(classify_error(&err), ErrorType::RateLimited);
    }

    #[test]
    fn test_classify_server_error() {
        let err = FetchError::Status(StatusCode::BAD_GATEWAY);
        assert_eq!(classify_error(&err), ErrorType::ServerError);
    }

    #[test]
    fn test_classify_other_status() {
        let err = FetchError::Status(StatusCode::UNAUTHORIZED);
        assert_eq!(classify_error(&err), ErrorType::Other);
    }

    #[test]
    fn test_classify_missing_rate() {
        let err = FetchError::MissingRate("/rates/IDR".to_string());
        assert_eq!(classify_error(&err), ErrorType::InvalidResponse);
    }

    #[test]
    fn test_classify_invalid_rate() {
        let err = FetchError::InvalidRate(-3.0);
        assert_eq!(classify_error(&err), ErrorType::InvalidResponse);
    }

    #[test]
    fn test_format_simple_error() {
        let err = FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            format_error_message(&err),
            "rate service returned HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn test_describe_is_never_empty() {
        for error_type in [
            ErrorType::ConnectionRefused,
            ErrorType::Timeout,
            ErrorType::NotFound,
            ErrorType::RateLimited,
            ErrorType::ServerError,
            ErrorType::NetworkError,
            ErrorType::InvalidResponse,
            ErrorType::Other,
        ] {
            assert!(!describe(&error_type).is_empty());
        }
    }
}
