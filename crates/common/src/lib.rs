use thiserror::Error;

pub mod http;
pub mod utils;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status from {url}: expected {expected}, got {actual}")]
    Status { expected: u16, actual: u16, url: String },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("token error: {0}")]
    Token(String),
}

impl CoreError {
    /// Status code carried by a `Status` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            CoreError::Status { actual, .. } => Some(*actual),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_reports_both_codes() {
        let e = CoreError::Status { expected: 201, actual: 500, url: "http://x/".into() };
        assert_eq!(e.status(), Some(500));
        assert_eq!(e.to_string(), "unexpected status from http://x/: expected 201, got 500");
    }

    #[test]
    fn non_status_errors_have_no_code() {
        assert_eq!(CoreError::Network("refused".into()).status(), None);
    }
}
