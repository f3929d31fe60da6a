use std::fmt;

use thiserror::Error;

use crate::envelope::Envelope;

/// A single violated field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every rule a candidate recipe violated, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Look up the message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Messages in order, as they appear in the `errors` list of the envelope.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid recipe ID format: {0}")]
pub struct MalformedId(pub String);

pub const UNREACHABLE_MESSAGE: &str = "Unable to connect to server. Please check your connection.";

/// Normalized failure of a client call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error envelope.
    #[error("{message}")]
    Rejected {
        status: u16,
        message: String,
        errors: Vec<String>,
    },

    /// The request never reached the server (connect failure or timeout).
    #[error("Unable to connect to server. Please check your connection.")]
    Unreachable,

    #[error("{0}")]
    Unexpected(String),
}

impl ClientError {
    /// Build the error for a non-success response. Field errors win over the
    /// envelope message when the server sent any.
    pub fn rejected<T>(status: u16, envelope: Option<Envelope<T>>) -> Self {
        let (message, errors) = match envelope {
            Some(envelope) => {
                let errors = envelope.errors.unwrap_or_default();
                let message = if errors.is_empty() {
                    envelope
                        .message
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| "An error occurred".to_string())
                } else {
                    errors.join(", ")
                };
                (message, errors)
            }
            None => ("An error occurred".to_string(), Vec::new()),
        };

        ClientError::Rejected {
            status,
            message,
            errors,
        }
    }

    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ClientError::Unreachable
        } else {
            let message = err.to_string();
            if message.is_empty() {
                ClientError::Unexpected("An unexpected error occurred".to_string())
            } else {
                ClientError::Unexpected(message)
            }
        }
    }

    /// The rejection the server gives a malformed id, for ids that cannot be
    /// put in a request path at all.
    pub fn malformed_id() -> Self {
        ClientError::Rejected {
            status: 400,
            message: "Invalid recipe ID format".to_string(),
            errors: Vec::new(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
