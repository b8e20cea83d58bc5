use thiserror::Error;

use crate::metadata::handle::MethodHandle;

/// Builds an [`Error::Hook`] from inside a before/after hook body.
///
/// ```rust, ignore
/// return Err(hook_error!("construction-gate", "building {} has no info", id));
/// ```
#[macro_export]
macro_rules! hook_error {
    // Single string version
    ($hook:expr, $msg:expr) => {
        $crate::Error::Hook {
            hook: $hook.to_string(),
            message: $msg.to_string(),
        }
    };

    // Format string with arguments version
    ($hook:expr, $fmt:expr, $($arg:tt)*) => {
        $crate::Error::Hook {
            hook: $hook.to_string(),
            message: format!($fmt, $($arg)*),
        }
    };
}

/// Failure to map a [`MethodSignature`](crate::metadata::signature::MethodSignature)
/// onto exactly one host method.
///
/// Both variants are configuration bugs: they are surfaced once, at registration
/// time, and are fatal only to the hook that asked for the method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// No host method matches the signature.
    #[error("No host method matches {signature}")]
    NotFound {
        /// Rendered signature that failed to resolve
        signature: String,
    },

    /// More than one host method matches the signature.
    ///
    /// The resolver never picks one of the candidates on its own.
    #[error("{signature} is ambiguous, {} candidates match", candidates.len())]
    Ambiguous {
        /// Rendered signature that failed to resolve
        signature: String,
        /// Every handle that matched
        candidates: Vec<MethodHandle>,
    },
}

/// The generic Error type, which covers every failure this library can return.
///
/// # Error Categories
///
/// ## Registration Errors
/// - [`Error::Resolution`] - The signature did not resolve to exactly one method
/// - [`Error::DuplicateRegistration`] - The method is already hooked by a live registry
/// - [`Error::SiteTypeMismatch`] - The hook's argument frame does not fit the method
/// - [`Error::UnknownMethod`] - A handle that the method table never issued
/// - [`Error::Configuration`] - Any other wiring mistake
///
/// ## Invocation Errors
/// - [`Error::Hook`] - Raised by a before/after hook body; passed through the
///   dispatcher untouched
#[derive(Error, Debug)]
pub enum Error {
    /// Signature resolution failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A second hook record was requested for a method that already has one.
    #[error("{method} ({handle}) is already hooked")]
    DuplicateRegistration {
        /// The method that is already hooked
        handle: MethodHandle,
        /// Display name of the method
        method: String,
    },

    /// The handle was not issued by this method table.
    #[error("Unknown method handle {0}")]
    UnknownMethod(MethodHandle),

    /// The resolved method exists, but its argument frame or return type is not
    /// the one the hook was written against.
    #[error("{method} ({handle}) does not take the argument frame the hook expects")]
    SiteTypeMismatch {
        /// The resolved method
        handle: MethodHandle,
        /// Display name of the method
        method: String,
    },

    /// An error raised inside a before-hook or after-hook.
    #[error("Hook '{hook}' failed: {message}")]
    Hook {
        /// Name of the hook that failed
        hook: String,
        /// Message supplied by the hook
        message: String,
    },

    /// Generic configuration error.
    #[error("{0}")]
    Configuration(String),
}
