//! Error classification for selective retry.
//!
//! Retry filtering is a set-membership test: every work error carries an
//! [`ErrorKind`] tag, and a policy either accepts any failure (empty set) or
//! only failures whose tag is in its `retry_on` set.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::error::Error;
use std::fmt;

/// A lightweight classification tag for a failure.
///
/// Kinds are compared by name, so independent crates can agree on a tag
/// without sharing an error type. Well-known tags are provided as associated
/// constants; anything else can be minted with [`ErrorKind::new`].
///
/// # Examples
///
/// ```rust
/// use dogged::kind::ErrorKind;
///
/// const GATEWAY: ErrorKind = ErrorKind::new("gateway");
///
/// assert_eq!(GATEWAY.as_str(), "gateway");
/// assert_ne!(GATEWAY, ErrorKind::TIMEOUT);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorKind(Cow<'static, str>);

impl ErrorKind {
    /// Generic I/O failure.
    pub const IO: ErrorKind = ErrorKind::new("io");

    /// An operation that ran out of time.
    pub const TIMEOUT: ErrorKind = ErrorKind::new("timeout");

    /// A connection that could not be established or was lost.
    pub const CONNECTION: ErrorKind = ErrorKind::new("connection");

    /// The fallback tag for errors that do not classify themselves.
    pub const UNCLASSIFIED: ErrorKind = ErrorKind::new("unclassified");

    /// Create a kind tag from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// The tag name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An error whose failures can be classified for retry filtering.
///
/// The provided default tags everything [`ErrorKind::UNCLASSIFIED`], so an
/// empty impl is enough when a caller never filters by kind:
///
/// ```rust
/// use dogged::kind::Classify;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("widget jammed")]
/// struct WidgetError;
///
/// impl Classify for WidgetError {}
/// ```
///
/// Override [`kind`](Classify::kind) where finer classification exists,
/// typically one tag per variant of a `thiserror` enum:
///
/// ```rust
/// use dogged::kind::{Classify, ErrorKind};
///
/// #[derive(Debug, thiserror::Error)]
/// enum FetchError {
///     #[error("upstream unreachable")]
///     Unreachable,
///     #[error("bad credentials")]
///     Credentials,
/// }
///
/// impl Classify for FetchError {
///     fn kind(&self) -> ErrorKind {
///         match self {
///             FetchError::Unreachable => ErrorKind::CONNECTION,
///             FetchError::Credentials => ErrorKind::new("auth"),
///         }
///     }
/// }
/// ```
pub trait Classify: Error {
    /// The kind tag for this failure.
    fn kind(&self) -> ErrorKind {
        ErrorKind::UNCLASSIFIED
    }
}

impl Classify for std::io::Error {
    fn kind(&self) -> ErrorKind {
        use std::io::ErrorKind as Io;
        match std::io::Error::kind(self) {
            Io::TimedOut | Io::WouldBlock => ErrorKind::TIMEOUT,
            Io::ConnectionRefused
            | Io::ConnectionReset
            | Io::ConnectionAborted
            | Io::NotConnected
            | Io::BrokenPipe
            | Io::UnexpectedEof => ErrorKind::CONNECTION,
            _ => ErrorKind::IO,
        }
    }
}
