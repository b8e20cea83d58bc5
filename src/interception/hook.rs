//! Hook definition and the interception dispatcher.
//!
//! A [`Hook`] pairs an optional before-hook with an optional after-hook for one
//! host method. Once bound to a [`MethodSite`](super::MethodSite), every call of
//! the method runs through [`Interceptor::invoke`]:
//!
//! ```text
//! call(args)
//!     │
//!     ▼
//! ┌──────────────────────┐
//! │ fresh context        │  run_original = true, state = S::default()
//! └──────────────────────┘
//!     │
//!     ▼
//! ┌──────────────────────┐
//! │ before-hook          │───► Err ───► returned to caller
//! └──────────────────────┘
//!     │
//!     ▼
//! ┌──────────────────────┐
//! │ original body        │  only if run_original; result := return value
//! └──────────────────────┘
//!     │
//!     ▼
//! ┌──────────────────────┐
//! │ after-hook           │───► Err ───► returned to caller
//! └──────────────────────┘
//!     │
//!     ▼
//! result (or R::default()) and the mutated frame go back to the caller
//! ```
//!
//! The same before/after/short-circuit protocol covers observation with state
//! diffing, full replacement of a computed result and conditional suppression
//! of the original body.

use std::{fmt, sync::Arc};

use crate::{interception::context::InvocationContext, Result};

/// An original method body, as stored by its call site.
pub type OriginalFn<A, R> = dyn Fn(&mut A) -> R + Send + Sync;

/// Type alias for before-hook functions.
pub type BeforeHookFn<A, R, S> =
    Arc<dyn Fn(&mut InvocationContext<'_, A, R, S>) -> Result<()> + Send + Sync>;

/// Type alias for after-hook functions.
pub type AfterHookFn<A, R, S> =
    Arc<dyn Fn(&mut InvocationContext<'_, A, R, S>) -> Result<()> + Send + Sync>;

/// The runtime protocol a call site runs for every intercepted call.
///
/// Implemented by [`Hook`]; the hook-pair state type `S` is erased here so that
/// a site only depends on its argument frame and return type.
pub trait Interceptor<A, R>: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether a before-hook is present.
    fn has_before(&self) -> bool;

    /// Whether an after-hook is present.
    fn has_after(&self) -> bool;

    /// Runs one intercepted call.
    ///
    /// # Errors
    /// Returns whatever error a hook body returned, unmodified.
    fn invoke(&self, args: &mut A, original: &OriginalFn<A, R>) -> Result<R>;
}

/// Before/after hook pair for a single host method.
///
/// # Examples
///
/// ```rust
/// use hostpatch::interception::Hook;
///
/// // Skip the original and always report 42
/// let constant = Hook::<(), i32>::new("constant").before(|ctx| {
///     ctx.skip_with(42);
///     Ok(())
/// });
///
/// // Remember a field before the call and compare afterwards
/// let diff = Hook::<u8, (), u8>::new("diff")
///     .before(|ctx| {
///         ctx.state = *ctx.args;
///         Ok(())
///     })
///     .after(|ctx| {
///         if ctx.state != *ctx.args {
///             println!("changed from {}", ctx.state);
///         }
///         Ok(())
///     });
/// # let _ = (constant, diff);
/// ```
pub struct Hook<A, R, S = ()> {
    name: String,
    before: Option<BeforeHookFn<A, R, S>>,
    after: Option<AfterHookFn<A, R, S>>,
    trace: bool,
}

impl<A, R, S> Hook<A, R, S> {
    /// Creates a hook with neither handler set.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Hook {
            name: name.into(),
            before: None,
            after: None,
            trace: false,
        }
    }

    /// Returns the hook's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the before-hook.
    ///
    /// It may read and mutate the arguments, write `state`, set `result`, and
    /// clear `run_original` to suppress the original body.
    #[must_use]
    pub fn before<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_, A, R, S>) -> Result<()> + Send + Sync + 'static,
    {
        self.before = Some(Arc::new(handler));
        self
    }

    /// Sets the after-hook.
    ///
    /// It sees the arguments as they now stand, the result and the state the
    /// before-hook wrote; it may replace the result.
    #[must_use]
    pub fn after<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut InvocationContext<'_, A, R, S>) -> Result<()> + Send + Sync + 'static,
    {
        self.after = Some(Arc::new(handler));
        self
    }

    /// Enables `trace!` output for every dispatched call.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}

impl<A, R, S> Interceptor<A, R> for Hook<A, R, S>
where
    R: Default,
    S: Default,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn has_before(&self) -> bool {
        self.before.is_some()
    }

    fn has_after(&self) -> bool {
        self.after.is_some()
    }

    fn invoke(&self, args: &mut A, original: &OriginalFn<A, R>) -> Result<R> {
        let mut context = InvocationContext::new(args);

        if let Some(before) = &self.before {
            before(&mut context)?;
        }

        if context.run_original {
            context.result = Some(original(&mut *context.args));
        } else if self.trace {
            tracing::trace!(hook = %self.name, "original body skipped");
        }

        if let Some(after) = &self.after {
            after(&mut context)?;
        }

        if self.trace {
            tracing::trace!(
                hook = %self.name,
                ran_original = context.run_original,
                has_result = context.result.is_some(),
                "intercepted call complete"
            );
        }

        Ok(context.into_result())
    }
}

impl<A, R, S> fmt::Debug for Hook<A, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("has_before", &self.before.is_some())
            .field("has_after", &self.after.is_some())
            .finish()
    }
}
