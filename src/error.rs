use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

/// HTTP method type, re-exported for use with error inspection.
pub use reqwest::Method;
/// HTTP status code type, re-exported for use with error inspection.
pub use reqwest::StatusCode;
use reqwest::header;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// The credential exchange failed, or the API rejected the bearer token (401/403)
    Authentication,
    /// The requested resource does not exist (404)
    NotFound,
    /// The API rejected the request (any other 4xx)
    Rejected,
    /// The API failed to handle the request (5xx)
    Server,
    /// The API answered with a status other than the one the operation expects
    Status,
    /// Connection, TLS or timeout failure below the HTTP layer
    Transport,
    /// Invalid input detected before any request was sent
    Validation,
    /// Internal error from dependencies, e.g. an undecodable response body
    Internal,
}

impl Kind {
    /// Classifies an unexpected HTTP status.
    #[must_use]
    pub fn from_status(status_code: StatusCode) -> Self {
        match status_code {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Kind::Authentication,
            StatusCode::NOT_FOUND => Kind::NotFound,
            code if code.is_client_error() => Kind::Rejected,
            code if code.is_server_error() => Kind::Server,
            _ => Kind::Status,
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let e = self.source.as_deref()?;
        e.downcast_ref::<E>()
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Validation {
            reason: message.into(),
        }
        .into()
    }

    pub fn status<O: Into<String>, S: Into<String>>(
        operation: O,
        status_code: StatusCode,
        method: Method,
        path: String,
        message: S,
    ) -> Self {
        Status {
            operation: operation.into(),
            status_code,
            method,
            path,
            message: message.into(),
        }
        .into()
    }

    #[must_use]
    pub fn authentication(status_code: Option<StatusCode>) -> Self {
        Authentication { status_code }.into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// A call completed with a status code the operation does not accept.
#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    /// What the client was trying to do, e.g. `retrieve facility F1`
    pub operation: String,
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    /// The response body, if any
    pub message: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unable to {}: error({}) making {} call to {} with {}",
            self.operation, self.status_code, self.method, self.path, self.message
        )
    }
}

impl StdError for Status {}

/// The client credentials could not be exchanged for a bearer token.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct Authentication {
    /// The status returned by the authenticate endpoint. `None` when the endpoint answered
    /// 200 without a usable `access_token`.
    pub status_code: Option<StatusCode>,
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "unable to authenticate to API ({code})"),
            None => write!(f, "unable to authenticate to API (no access token)"),
        }
    }
}

impl StdError for Authentication {}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid: {}", self.reason)
    }
}

impl StdError for Validation {}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_decode() || e.is_builder() {
            Kind::Internal
        } else {
            Kind::Transport
        };
        Error::with_source(kind, e)
    }
}

impl From<header::InvalidHeaderValue> for Error {
    fn from(e: header::InvalidHeaderValue) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_html_form::ser::Error> for Error {
    fn from(e: serde_html_form::ser::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Validation, e)
    }
}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

impl From<Status> for Error {
    fn from(err: Status) -> Self {
        let kind = Kind::from_status(err.status_code);
        Error::with_source(kind, err)
    }
}

impl From<Authentication> for Error {
    fn from(err: Authentication) -> Self {
        Error::with_source(Kind::Authentication, err)
    }
}
