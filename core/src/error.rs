//! Error types for the lead API client.
//!
//! # Design
//! `NotFound` keeps its own variant because callers distinguish "the lead does
//! not exist" from "the server rejected the request". Both carry the message
//! the server put in its JSON error body, which is what the operator sees.

use thiserror::Error;

use crate::store::Field;

/// Errors returned by the client parsers, the service and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound { message: Option<String> },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError {
        status: u16,
        message: Option<String>,
        body: String,
    },

    /// No response was obtained at all.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// Message supplied by the server in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { message } | ApiError::HttpError { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

/// Local form validation failures. Displayed verbatim in the banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("CNPJ inválido")]
    InvalidCnpj,

    #[error("Campo obrigatório: {}", .0.label())]
    MissingField(Field),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_exposed_for_http_errors() {
        let err = ApiError::HttpError {
            status: 400,
            message: Some("CNPJ já cadastrado".to_string()),
            body: r#"{"Message":"CNPJ já cadastrado"}"#.to_string(),
        };
        assert_eq!(err.server_message(), Some("CNPJ já cadastrado"));
    }

    #[test]
    fn transport_errors_have_no_server_message() {
        let err = ApiError::TransportError("connection refused".to_string());
        assert_eq!(err.server_message(), None);
        assert_eq!(err.to_string(), "transport failed: connection refused");
    }

    #[test]
    fn validation_messages_are_localized() {
        assert_eq!(ValidationError::InvalidCnpj.to_string(), "CNPJ inválido");
        assert_eq!(
            ValidationError::MissingField(Field::City).to_string(),
            "Campo obrigatório: Cidade"
        );
    }
}
