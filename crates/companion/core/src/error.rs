//! Common error infrastructure for companion-core.
//!
//! Domain-specific errors (`ConsumeError`, `CodecError`) live next to the
//! subsystem that produces them. None of them ever abort a tick: the public
//! surface reports them as `false` or a neutral default, and the `Result`
//! variants exist so callers and logs can tell failures apart.

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// Temporary condition; retrying later (after inventory or world state
    /// changes) may succeed.
    ///
    /// Examples: no free food slot, duplicate food still fresh
    Recoverable,

    /// Invalid input that will never succeed unchanged.
    ///
    /// Examples: item is not food, malformed record field
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Unrecoverable. Nothing in the needs core raises this today.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all companion-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait NeedsError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
