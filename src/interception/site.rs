//! Reversible call sites.
//!
//! Every host method in a [`MethodTable`](crate::metadata::table::MethodTable) is
//! reached through a [`MethodSite`]. The site keeps the original body and one
//! replaceable binding slot; attaching redirects calls into the bound interceptor,
//! detaching sends them straight back to the original body. The original entry is
//! never overwritten, so detaching always restores the unintercepted behavior.
//!
//! Each bind issues a fresh binding id. Attaching, detaching and unbinding name
//! the binding they act on, so a record that outlived its registry can never
//! touch a later registry's interceptor.
//!
//! Dispatch performs one atomic load of the slot and takes no lock.

use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
};

use arc_swap::ArcSwapOption;

use crate::{
    interception::hook::{Interceptor, OriginalFn},
    metadata::handle::MethodHandle,
    Error, Result,
};

/// Identifies one bind of an interceptor to a site.
pub type BindingId = u64;

/// Type-erased view of a call site, used by the patch registry.
///
/// Attaching and detaching are the redirect and restore halves of a detour;
/// unbinding drops the interceptor and everything its hooks captured.
pub trait PatchTarget: Send + Sync {
    /// Handle of the method this site belongs to.
    fn handle(&self) -> MethodHandle;

    /// Display name of the method.
    fn method_name(&self) -> &str;

    /// Whether an interceptor is currently bound to the site.
    fn is_bound(&self) -> bool {
        self.binding().is_some()
    }

    /// Id of the current binding, if any.
    fn binding(&self) -> Option<BindingId>;

    /// Whether calls are currently redirected into an interceptor.
    fn is_attached(&self) -> bool;

    /// Redirects calls into the interceptor of `binding`. Attaching an attached
    /// binding is a no-op.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if `binding` is not the site's current binding.
    fn attach(&self, binding: BindingId) -> Result<()>;

    /// Restores direct calls to the original body if `binding` is current.
    /// Never fails.
    fn detach(&self, binding: BindingId);

    /// Detaches and drops the interceptor of `binding`, leaving the site free
    /// for a new bind. Returns `false` if `binding` was not current.
    fn unbind(&self, binding: BindingId) -> bool;
}

struct Binding<A, R> {
    id: BindingId,
    interceptor: Arc<dyn Interceptor<A, R>>,
    attached: AtomicBool,
}

impl<A, R> Binding<A, R> {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}

/// The entry point through which the host calls one method.
///
/// `A` is the argument frame, `R` the return type.
pub struct MethodSite<A, R> {
    handle: MethodHandle,
    name: String,
    original: Arc<OriginalFn<A, R>>,
    binding: ArcSwapOption<Binding<A, R>>,
    next_binding: AtomicU64,
}

impl<A, R> MethodSite<A, R> {
    pub(crate) fn new(handle: MethodHandle, name: String, original: Arc<OriginalFn<A, R>>) -> Self {
        MethodSite {
            handle,
            name,
            original,
            binding: ArcSwapOption::empty(),
            next_binding: AtomicU64::new(1),
        }
    }

    /// Calls the method the way the host does: through the interceptor when one
    /// is attached, straight to the original body otherwise.
    ///
    /// # Errors
    /// Any error raised by a before-hook or after-hook, unmodified.
    pub fn call(&self, args: &mut A) -> Result<R> {
        match self.binding.load_full() {
            Some(binding) if binding.is_attached() => {
                binding.interceptor.invoke(args, self.original.as_ref())
            }
            _ => Ok((self.original)(args)),
        }
    }

    /// Calls the original body, bypassing any interceptor.
    pub fn call_original(&self, args: &mut A) -> R {
        (self.original)(args)
    }

    /// Binds the interceptor and returns the id of the new binding. Binding does
    /// not attach it.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateRegistration`] while another interceptor is bound.
    pub(crate) fn bind(&self, interceptor: Arc<dyn Interceptor<A, R>>) -> Result<BindingId> {
        let id = self.next_binding.fetch_add(1, Ordering::Relaxed);
        let binding = Arc::new(Binding {
            id,
            interceptor,
            attached: AtomicBool::new(false),
        });

        let previous = self
            .binding
            .compare_and_swap(&None::<Arc<Binding<A, R>>>, Some(binding));
        if previous.is_some() {
            return Err(Error::DuplicateRegistration {
                handle: self.handle,
                method: self.name.clone(),
            });
        }
        Ok(id)
    }

    /// Name of the bound interceptor, if any.
    #[must_use]
    pub fn interceptor_name(&self) -> Option<String> {
        let binding = self.binding.load();
        (*binding)
            .as_ref()
            .map(|binding| binding.interceptor.name().to_string())
    }

    fn current(&self, id: BindingId) -> Option<Arc<Binding<A, R>>> {
        self.binding.load_full().filter(|binding| binding.id == id)
    }
}

impl<A: 'static, R: 'static> PatchTarget for MethodSite<A, R> {
    fn handle(&self) -> MethodHandle {
        self.handle
    }

    fn method_name(&self) -> &str {
        &self.name
    }

    fn binding(&self) -> Option<BindingId> {
        let binding = self.binding.load();
        (*binding).as_ref().map(|binding| binding.id)
    }

    fn is_attached(&self) -> bool {
        let binding = self.binding.load();
        (*binding)
            .as_ref()
            .is_some_and(|binding| binding.is_attached())
    }

    fn attach(&self, binding: BindingId) -> Result<()> {
        let Some(current) = self.current(binding) else {
            return Err(Error::Configuration(format!(
                "{} ({}) has no interceptor for binding {binding} to attach",
                self.name, self.handle
            )));
        };
        current.attached.store(true, Ordering::Release);
        Ok(())
    }

    fn detach(&self, binding: BindingId) {
        if let Some(current) = self.current(binding) {
            current.attached.store(false, Ordering::Release);
        }
    }

    fn unbind(&self, binding: BindingId) -> bool {
        let previous = self.binding.rcu(|current| match current {
            Some(current) if current.id == binding => None,
            other => other.clone(),
        });
        match previous {
            Some(previous) if previous.id == binding => {
                previous.attached.store(false, Ordering::Release);
                true
            }
            _ => false,
        }
    }
}

impl<A, R> fmt::Debug for MethodSite<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = self.binding.load();
        f.debug_struct("MethodSite")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .field("binding", &(*binding).as_ref().map(|binding| binding.id))
            .field(
                "attached",
                &(*binding).as_ref().is_some_and(|binding| binding.is_attached()),
            )
            .finish()
    }
}
