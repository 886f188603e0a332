//! Failures talking to the bakery service, and misuse of the order form.

use bakery_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, refused, reset, ...).
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-2xx status.
    #[error("HTTP error! Status: {status}{}", detail(.message))]
    Api { status: u16, message: Option<String> },
    /// A 2xx response whose body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(m) if !m.is_empty() => format!(" ({m})"),
        _ => String::new(),
    }
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Editing the order form through the shell.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("The order form is not open")]
    NotOpen,
    #[error(transparent)]
    Rejected(#[from] DomainError),
}
