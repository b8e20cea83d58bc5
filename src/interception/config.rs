//! Registry configuration.
//!
//! [`InterceptionConfig`] controls how a [`PatchRegistry`](super::PatchRegistry)
//! treats new registrations and failing patches.
//!
//! # Presets
//!
//! - [`InterceptionConfig::default()`] - Register only, install explicitly, isolate failures
//! - [`InterceptionConfig::eager()`] - Install every record as soon as it is registered
//! - [`InterceptionConfig::strict()`] - Abort a batch registration at the first failure
//! - [`InterceptionConfig::diagnostic()`] - Eager, plus `trace!` output for every call
//!
//! # Example
//!
//! ```rust
//! use hostpatch::interception::InterceptionConfig;
//!
//! let config = InterceptionConfig::eager().with_fail_fast(true);
//! assert!(config.install_on_register);
//! assert!(config.fail_fast);
//! assert!(!config.trace_dispatch);
//! ```

/// Configuration for a patch registry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InterceptionConfig {
    /// Install each record right after it has been registered.
    pub install_on_register: bool,

    /// Stop a batch registration at the first failing patch.
    ///
    /// When `false`, a failing patch is logged and reported, and the remaining
    /// patches are still registered.
    pub fail_fast: bool,

    /// Emit a `trace!` event for every intercepted call.
    pub trace_dispatch: bool,
}

impl InterceptionConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs records as soon as they are registered.
    #[must_use]
    pub fn eager() -> Self {
        InterceptionConfig {
            install_on_register: true,
            ..Self::default()
        }
    }

    /// Aborts batch registration at the first failure.
    #[must_use]
    pub fn strict() -> Self {
        InterceptionConfig {
            fail_fast: true,
            ..Self::default()
        }
    }

    /// Eager installation with per-call tracing.
    #[must_use]
    pub fn diagnostic() -> Self {
        InterceptionConfig {
            install_on_register: true,
            trace_dispatch: true,
            ..Self::default()
        }
    }

    /// Sets [`install_on_register`](Self::install_on_register).
    #[must_use]
    pub fn with_install_on_register(mut self, enabled: bool) -> Self {
        self.install_on_register = enabled;
        self
    }

    /// Sets [`fail_fast`](Self::fail_fast).
    #[must_use]
    pub fn with_fail_fast(mut self, enabled: bool) -> Self {
        self.fail_fast = enabled;
        self
    }

    /// Sets [`trace_dispatch`](Self::trace_dispatch).
    #[must_use]
    pub fn with_trace_dispatch(mut self, enabled: bool) -> Self {
        self.trace_dispatch = enabled;
        self
    }
}
