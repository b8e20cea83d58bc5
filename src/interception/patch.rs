//! Self-registering patches and batch registration reports.

use std::{fmt, sync::Arc};

use crate::{
    interception::{record::HookRecord, registry::PatchRegistry},
    Error, Result,
};

/// A unit of interception: one host method plus the hooks that wrap it.
///
/// Implementations build the signature and the [`Hook`](super::Hook) (capturing
/// whatever services the hooks call into) and hand both to the registry.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use hostpatch::{
///     interception::{Hook, HookRecord, Patch, PatchRegistry},
///     metadata::signature::MethodSignature,
///     Result,
/// };
///
/// struct ConstantTime;
///
/// impl Patch for ConstantTime {
///     fn name(&self) -> &str {
///         "constant-time"
///     }
///
///     fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>> {
///         let signature = MethodSignature::builder("Clock", "Now").build();
///         registry.register(
///             &signature,
///             Hook::<(), i64>::new(self.name()).before(|ctx| {
///                 ctx.skip_with(0);
///                 Ok(())
///             }),
///         )
///     }
/// }
/// ```
pub trait Patch: Send + Sync {
    /// Name used in logs and reports.
    fn name(&self) -> &str;

    /// Resolves the target method and registers the hooks.
    ///
    /// # Errors
    /// Any registration error: resolution failure, duplicate registration or a
    /// mismatched argument frame.
    fn register(&self, registry: &PatchRegistry) -> Result<Arc<HookRecord>>;
}

/// A patch that failed to register.
#[derive(Debug)]
pub struct PatchFailure {
    /// Name of the failing patch
    pub patch: String,
    /// Why it failed
    pub error: Error,
}

/// Outcome of [`PatchRegistry::register_patches`].
#[derive(Debug, Default)]
pub struct PatchReport {
    /// Records created, in registration order
    pub registered: Vec<Arc<HookRecord>>,
    /// Patches that failed; the others were registered regardless
    pub failed: Vec<PatchFailure>,
}

impl PatchReport {
    /// Returns `true` if every patch registered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for PatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} patches registered, {} failed",
            self.registered.len(),
            self.failed.len()
        )?;
        for failure in &self.failed {
            write!(f, "\n  {}: {}", failure.patch, failure.error)?;
        }
        Ok(())
    }
}
