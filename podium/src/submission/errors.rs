//! Submission error types.

use thiserror::Error;

/// Failures reported by a submission transport
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// Server answered but refused the payload
    #[error("server rejected submission ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Request never produced a response
    #[error("network error: {0}")]
    Network(String),
}

/// Submission errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// Caller lacks edit rights or the tournament is locked
    #[error("standings are read-only")]
    ReadOnly,

    /// Another submission has not finished yet
    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("submission failed: {0}")]
    Transport(#[from] TransportError),

    /// Cancelled before a response arrived
    #[error("submission cancelled")]
    Cancelled,
}

impl SubmissionError {
    /// Whether submitting again may succeed without any other change
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Cancelled)
    }

    /// Message safe to show in the UI
    ///
    /// Rejection details come from the server and are shown as-is; network
    /// errors are reduced to a generic message.
    pub fn client_message(&self) -> String {
        match self {
            Self::Transport(TransportError::Network(_)) => {
                "Could not reach the server, try again".to_string()
            }
            Self::Transport(TransportError::Rejected { message, .. }) => {
                format!("Server rejected the standings: {message}")
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for submission operations
pub type SubmissionResult<T> = Result<T, SubmissionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(SubmissionError::Cancelled.is_retryable());
        assert!(SubmissionError::Transport(TransportError::Network("down".into())).is_retryable());
        assert!(!SubmissionError::ReadOnly.is_retryable());
        assert!(!SubmissionError::AlreadySubmitting.is_retryable());
    }

    #[test]
    fn test_client_message_hides_network_detail() {
        let err = SubmissionError::from(TransportError::Network("tcp connect 10.0.0.3:443".into()));
        assert!(!err.client_message().contains("10.0.0.3"));

        let err = SubmissionError::from(TransportError::Rejected {
            status: 422,
            message: "rank_3 is not a participant".into(),
        });
        assert!(err.client_message().contains("rank_3 is not a participant"));
    }
}
