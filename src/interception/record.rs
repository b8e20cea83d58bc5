//! Hook records.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    interception::site::{BindingId, PatchTarget},
    metadata::handle::MethodHandle,
    Result,
};

/// Binding of one resolved host method to its before/after hooks.
///
/// Records are created by [`PatchRegistry::register`](super::PatchRegistry::register),
/// which also guarantees that at most one record exists per host method. Installing
/// and uninstalling go through the registry, which serializes them.
///
/// A record is live while its registry is. Dropping the registry releases the
/// record's hooks; installing a released record fails.
pub struct HookRecord {
    handle: MethodHandle,
    hook_name: String,
    has_before: bool,
    has_after: bool,
    target: Arc<dyn PatchTarget>,
    binding: BindingId,
    installed: AtomicBool,
}

impl HookRecord {
    pub(crate) fn new(
        hook_name: String,
        has_before: bool,
        has_after: bool,
        target: Arc<dyn PatchTarget>,
        binding: BindingId,
    ) -> Self {
        HookRecord {
            handle: target.handle(),
            hook_name,
            has_before,
            has_after,
            target,
            binding,
            installed: AtomicBool::new(false),
        }
    }

    /// The hooked method.
    #[must_use]
    pub fn handle(&self) -> MethodHandle {
        self.handle
    }

    /// Display name of the hooked method.
    #[must_use]
    pub fn method_name(&self) -> &str {
        self.target.method_name()
    }

    /// Name of the hook pair.
    #[must_use]
    pub fn hook_name(&self) -> &str {
        &self.hook_name
    }

    /// Whether a before-hook is present.
    #[must_use]
    pub fn has_before(&self) -> bool {
        self.has_before
    }

    /// Whether an after-hook is present.
    #[must_use]
    pub fn has_after(&self) -> bool {
        self.has_after
    }

    /// Whether interception is currently active.
    #[must_use]
    pub fn is_installed(&self) -> bool {
        self.installed.load(Ordering::Acquire)
    }

    /// Returns `Ok(true)` if this call installed the hook, `Ok(false)` if it was
    /// already installed.
    pub(crate) fn install(&self) -> Result<bool> {
        if self.is_installed() {
            return Ok(false);
        }
        self.target.attach(self.binding)?;
        self.installed.store(true, Ordering::Release);
        Ok(true)
    }

    /// Returns `true` if this call removed the hook. Detaches even when the
    /// record believes it is not installed, so a half-finished install is undone.
    pub(crate) fn uninstall(&self) -> bool {
        let was_installed = self.installed.swap(false, Ordering::AcqRel);
        self.target.detach(self.binding);
        was_installed
    }

    /// Uninstalls and drops the bound hooks. Returns `true` if the hooks were
    /// still bound.
    pub(crate) fn release(&self) -> bool {
        self.uninstall();
        self.target.unbind(self.binding)
    }

    /// Whether the hooks are still bound to the method.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.target.binding() == Some(self.binding)
    }
}

impl fmt::Debug for HookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRecord")
            .field("handle", &self.handle)
            .field("method", &self.target.method_name())
            .field("hook", &self.hook_name)
            .field("has_before", &self.has_before)
            .field("has_after", &self.has_after)
            .field("installed", &self.is_installed())
            .finish()
    }
}

impl fmt::Display for HookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.hook_name,
            self.target.method_name(),
            if self.is_installed() {
                "installed"
            } else {
                "uninstalled"
            }
        )
    }
}
