//! Error types shared by ports and views.

use std::fmt;

use thiserror::Error;

/// Broad category of a failed backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// The request never reached the server or the response never arrived.
    Transport,
    /// The server answered 401.
    Unauthorized,
    /// Any other non-2xx answer.
    Server,
    /// The body could not be decoded into the expected shape.
    Decode,
    /// The session store could not be read.
    Storage,
    /// The client was built with an unusable base URL.
    Configuration,
    /// The request was abandoned before completing.
    Cancelled,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiErrorKind::Transport => "transport error",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::Server => "server error",
            ApiErrorKind::Decode => "decode error",
            ApiErrorKind::Storage => "session storage error",
            ApiErrorKind::Configuration => "configuration error",
            ApiErrorKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Failed backend call: kind, human-readable message and the HTTP status when one was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Classify a non-2xx HTTP status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let kind = if status == 401 {
            ApiErrorKind::Unauthorized
        } else {
            ApiErrorKind::Server
        };
        Self::new(kind, message).with_status(status)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Transport, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Storage, message)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Configuration, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ApiErrorKind::Cancelled, "request cancelled")
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

/// Why the local delete gate refused an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    MissingToken,
    NotAdmin,
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDenied::MissingToken => f.write_str("no session token"),
            AccessDenied::NotAdmin => f.write_str("session role is not admin"),
        }
    }
}

/// Errors surfaced by views.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Page {requested} is outside 1..={total_pages}")]
    PageOutOfRange { requested: u32, total_pages: u32 },

    #[error("Page size must be at least 1")]
    InvalidLimit,

    #[error("Not authorized: {0}")]
    NotAuthorized(AccessDenied),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ViewError {
    /// The underlying backend error, if this view error carries one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            ViewError::Api(err) => Some(err),
            _ => None,
        }
    }
}
