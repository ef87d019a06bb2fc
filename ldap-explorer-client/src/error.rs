use thiserror::Error;

/// Unified error type for all directory operations.
///
/// Every variant is either **retryable** (a transient transport or server
/// condition) or **terminal**. The classification lives in
/// [`DirectoryError::is_retryable`] and is the only place the retry loop
/// consults.
///
/// # Retryable Errors
///
/// - [`Connect`](Self::Connect): connection refused, host or network unreachable
/// - [`Timeout`](Self::Timeout): connect or operation timed out
/// - [`ConnectionLost`](Self::ConnectionLost): connection reset or closed mid-operation
/// - [`ServerUnavailable`](Self::ServerUnavailable): busy / unavailable / server down result codes
///
/// Everything else (bad credentials, access control, malformed filters,
/// invalid configuration) is terminal and is returned after a single attempt.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The transport could not be established.
    #[error("Connection failed: {detail}")]
    Connect {
        /// Error details.
        detail: String,
    },

    /// A connect or search did not complete in time.
    #[error("Operation timed out: {detail}")]
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The connection was reset or closed while an operation was in flight.
    #[error("Connection lost: {detail}")]
    ConnectionLost {
        /// Error details.
        detail: String,
    },

    /// The server answered with a busy / unavailable / down status.
    #[error("Server unavailable (code {code}): {message}")]
    ServerUnavailable {
        /// LDAP result code.
        code: u32,
        /// Diagnostic message returned by the server.
        message: String,
    },

    /// The bind identity or secret was rejected.
    #[error("Invalid credentials: {message}")]
    InvalidCredentials {
        /// Diagnostic message returned by the server.
        message: String,
    },

    /// The bound identity may not perform the operation.
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Diagnostic message returned by the server.
        message: String,
    },

    /// The search filter could not be parsed.
    #[error("Invalid filter: {filter}")]
    InvalidFilter {
        /// The offending filter text.
        filter: String,
    },

    /// Input rejected before any network call (empty filter, bad configuration, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The requested DN does not exist.
    #[error("No such object: {dn}")]
    NoSuchObject {
        /// DN that was not found.
        dn: String,
    },

    /// Any other non-success LDAP result.
    #[error("LDAP error (code {code}): {message}")]
    Protocol {
        /// LDAP result code.
        code: u32,
        /// Diagnostic message returned by the server.
        message: String,
    },
}

/// LDAP result codes the client distinguishes.
pub(crate) mod result_code {
    pub const NO_SUCH_OBJECT: u32 = 32;
    pub const INVALID_CREDENTIALS: u32 = 49;
    pub const INSUFFICIENT_ACCESS_RIGHTS: u32 = 50;
    pub const BUSY: u32 = 51;
    pub const UNAVAILABLE: u32 = 52;
    pub const SERVER_DOWN: u32 = 81;
    pub const LOCAL_TIMEOUT: u32 = 85;
    pub const FILTER_ERROR: u32 = 87;
    pub const CONNECT_ERROR: u32 = 91;
    pub const AUTHORIZATION_DENIED: u32 = 123;
}

impl DirectoryError {
    /// Whether the error is a transient transport/server condition worth retrying
    /// after a reconnect.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Connect { .. }
                | Self::Timeout { .. }
                | Self::ConnectionLost { .. }
                | Self::ServerUnavailable { .. }
        )
    }

    /// Whether it is expected behavior (user input, missing entry, access control),
    /// used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` otherwise.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::InvalidFilter { .. }
                | Self::InvalidInput(_)
                | Self::NoSuchObject { .. }
        )
    }

    /// Map a non-success LDAP result code to an error.
    ///
    /// `dn` and `filter` give context for the variants that carry it.
    pub(crate) fn from_result_code(code: u32, message: &str, dn: &str, filter: &str) -> Self {
        use result_code::{
            AUTHORIZATION_DENIED, BUSY, CONNECT_ERROR, FILTER_ERROR, INSUFFICIENT_ACCESS_RIGHTS,
            INVALID_CREDENTIALS, LOCAL_TIMEOUT, NO_SUCH_OBJECT, SERVER_DOWN, UNAVAILABLE,
        };

        let message = message.to_string();
        match code {
            INVALID_CREDENTIALS => Self::InvalidCredentials { message },
            INSUFFICIENT_ACCESS_RIGHTS | AUTHORIZATION_DENIED => Self::PermissionDenied { message },
            NO_SUCH_OBJECT => Self::NoSuchObject { dn: dn.to_string() },
            BUSY | UNAVAILABLE | SERVER_DOWN => Self::ServerUnavailable { code, message },
            LOCAL_TIMEOUT => Self::Timeout { detail: message },
            CONNECT_ERROR => Self::Connect { detail: message },
            FILTER_ERROR => Self::InvalidFilter {
                filter: filter.to_string(),
            },
            _ => Self::Protocol { code, message },
        }
    }

    /// Classify a free-form transport failure by its text.
    ///
    /// Used for I/O and channel errors that carry no structured kind.
    pub(crate) fn from_transport_text(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        let lower = detail.to_ascii_lowercase();
        if lower.contains("timed out") || lower.contains("timeout") {
            Self::Timeout { detail }
        } else if lower.contains("refused")
            || lower.contains("unreachable")
            || lower.contains("no route")
            || lower.contains("lookup")
            || lower.contains("resolve")
        {
            Self::Connect { detail }
        } else if lower.contains("reset")
            || lower.contains("closed")
            || lower.contains("broken pipe")
            || lower.contains("end of stream")
            || lower.contains("eof")
        {
            Self::ConnectionLost { detail }
        } else if lower.contains("server down") || lower.contains("unavailable") {
            Self::ServerUnavailable {
                code: result_code::SERVER_DOWN,
                message: detail,
            }
        } else {
            Self::Protocol {
                code: 0,
                message: detail,
            }
        }
    }
}

/// Type alias for `Result<T, DirectoryError>`.
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_retryable() {
        let cases = [
            DirectoryError::Connect {
                detail: "refused".into(),
            },
            DirectoryError::Timeout {
                detail: "5s".into(),
            },
            DirectoryError::ConnectionLost {
                detail: "reset".into(),
            },
            DirectoryError::ServerUnavailable {
                code: 52,
                message: "unavailable".into(),
            },
        ];
        for e in cases {
            assert!(e.is_retryable(), "{e} should be retryable");
        }
    }

    #[test]
    fn auth_and_input_errors_are_terminal() {
        let cases = [
            DirectoryError::InvalidCredentials {
                message: String::new(),
            },
            DirectoryError::PermissionDenied {
                message: String::new(),
            },
            DirectoryError::InvalidFilter {
                filter: "(cn=".into(),
            },
            DirectoryError::InvalidInput("empty filter".into()),
            DirectoryError::NoSuchObject {
                dn: "cn=x".into(),
            },
            DirectoryError::Protocol {
                code: 80,
                message: "other".into(),
            },
        ];
        for e in cases {
            assert!(!e.is_retryable(), "{e} should be terminal");
        }
    }

    #[test]
    fn result_codes_map_to_variants() {
        assert!(matches!(
            DirectoryError::from_result_code(49, "bad", "", ""),
            DirectoryError::InvalidCredentials { .. }
        ));
        assert!(matches!(
            DirectoryError::from_result_code(50, "", "", ""),
            DirectoryError::PermissionDenied { .. }
        ));
        assert!(matches!(
            DirectoryError::from_result_code(51, "", "", ""),
            DirectoryError::ServerUnavailable { code: 51, .. }
        ));
        assert!(matches!(
            DirectoryError::from_result_code(52, "", "", ""),
            DirectoryError::ServerUnavailable { code: 52, .. }
        ));
        assert_eq!(
            DirectoryError::from_result_code(32, "", "ou=gone,dc=example,dc=com", ""),
            DirectoryError::NoSuchObject {
                dn: "ou=gone,dc=example,dc=com".into()
            }
        );
        assert_eq!(
            DirectoryError::from_result_code(87, "", "", "(cn="),
            DirectoryError::InvalidFilter {
                filter: "(cn=".into()
            }
        );
        assert!(matches!(
            DirectoryError::from_result_code(80, "other", "", ""),
            DirectoryError::Protocol { code: 80, .. }
        ));
    }

    #[test]
    fn transport_text_classification() {
        assert!(matches!(
            DirectoryError::from_transport_text("Connection refused (os error 111)"),
            DirectoryError::Connect { .. }
        ));
        assert!(matches!(
            DirectoryError::from_transport_text("Network is unreachable"),
            DirectoryError::Connect { .. }
        ));
        assert!(matches!(
            DirectoryError::from_transport_text("Connection reset by peer"),
            DirectoryError::ConnectionLost { .. }
        ));
        assert!(matches!(
            DirectoryError::from_transport_text("operation timed out"),
            DirectoryError::Timeout { .. }
        ));
        assert!(matches!(
            DirectoryError::from_transport_text("something odd"),
            DirectoryError::Protocol { code: 0, .. }
        ));
    }

    #[test]
    fn expected_errors_are_user_facing() {
        assert!(DirectoryError::InvalidInput("x".into()).is_expected());
        assert!(
            !DirectoryError::Timeout {
                detail: String::new()
            }
            .is_expected()
        );
    }
}
