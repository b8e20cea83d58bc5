//! Process-wide collection of hook records.
//!
//! [`PatchRegistry`] resolves signatures, binds hooks to call sites, and keeps
//! every [`HookRecord`] it ever created so that teardown can uninstall all of
//! them unconditionally. Dropping the registry unbinds every hook it bound,
//! which drops whatever the hooks captured and leaves the methods free for the
//! next registry over the same table.
//!
//! # Guarantees
//!
//! - At most one live record per host method; a second registration fails with
//!   [`Error::DuplicateRegistration`] until the registry holding the first is dropped
//! - `install` on an installed record is a no-op
//! - `uninstall` always succeeds and restores the original behavior
//! - Registration, install and uninstall are serialized by one lock; dispatch
//!   never takes it
//! - A failing registration never affects other records
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use hostpatch::{
//!     interception::{Hook, PatchRegistry},
//!     metadata::{
//!         signature::{MethodSignature, ParameterDescriptor},
//!         table::MethodDef,
//!     },
//! };
//!
//! let table = Arc::new(hostpatch::metadata::table::MethodTable::new());
//! let handle = table.define(
//!     MethodDef::new("Counter", "Next")
//!         .param(ParameterDescriptor::by_ref("int"))
//!         .returns("int"),
//!     |value: &mut i32| {
//!         *value += 1;
//!         *value
//!     },
//! )
//! .unwrap();
//!
//! let registry = PatchRegistry::new(table.clone());
//! let signature = MethodSignature::builder("Counter", "Next").by_ref("int").build();
//! let record = registry
//!     .register(
//!         &signature,
//!         Hook::<i32, i32>::new("frozen").before(|ctx| {
//!             ctx.skip_with(*ctx.args);
//!             Ok(())
//!         }),
//!     )
//!     .unwrap();
//!
//! let site = table.site::<i32, i32>(handle).unwrap();
//! registry.install(&record).unwrap();
//! assert_eq!(site.call(&mut 1).unwrap(), 1);
//!
//! registry.uninstall_all();
//! assert_eq!(site.call(&mut 1).unwrap(), 2);
//! ```

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use dashmap::DashMap;

use crate::{
    interception::{
        config::InterceptionConfig,
        hook::{Hook, Interceptor},
        patch::{Patch, PatchFailure, PatchReport},
        record::HookRecord,
        site::PatchTarget,
    },
    metadata::{
        handle::MethodHandle, resolver::SignatureResolver, signature::MethodSignature,
        table::MethodTable,
    },
    Error, Result,
};

/// Registry of every hook record created against one method table.
pub struct PatchRegistry {
    resolver: SignatureResolver,
    config: InterceptionConfig,
    records: boxcar::Vec<Arc<HookRecord>>,
    by_method: DashMap<MethodHandle, Arc<HookRecord>>,
    mutation: Mutex<()>,
}

impl PatchRegistry {
    /// Creates a registry over `table` with the default configuration.
    #[must_use]
    pub fn new(table: Arc<MethodTable>) -> Self {
        Self::with_config(table, InterceptionConfig::default())
    }

    /// Creates a registry over `table`.
    #[must_use]
    pub fn with_config(table: Arc<MethodTable>, config: InterceptionConfig) -> Self {
        PatchRegistry {
            resolver: SignatureResolver::new(table),
            config,
            records: boxcar::Vec::new(),
            by_method: DashMap::new(),
            mutation: Mutex::new(()),
        }
    }

    /// The method table hooks are resolved against.
    #[must_use]
    pub fn table(&self) -> &Arc<MethodTable> {
        self.resolver.table()
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &InterceptionConfig {
        &self.config
    }

    /// Resolves `signature` and binds `hook` to the method it names.
    ///
    /// The record starts uninstalled unless the registry was configured with
    /// [`install_on_register`](InterceptionConfig::install_on_register).
    ///
    /// # Arguments
    /// * `signature` - Full signature of the host method
    /// * `hook`      - The before/after pair; `A` and `R` must match the frame and
    ///   return type the host defined the method with
    ///
    /// # Errors
    /// - [`Error::Resolution`] if the signature matches zero or several methods
    /// - [`Error::SiteTypeMismatch`] if the method takes a different frame
    /// - [`Error::DuplicateRegistration`] if the method is already hooked by this
    ///   or another live registry
    pub fn register<A, R, S>(
        &self,
        signature: &MethodSignature,
        hook: Hook<A, R, S>,
    ) -> Result<Arc<HookRecord>>
    where
        A: 'static,
        R: Default + 'static,
        S: Default + 'static,
    {
        let handle = self.resolver.resolve(signature).inspect_err(|error| {
            tracing::warn!(hook = %hook.name(), %error, "signature resolution failed");
        })?;
        let site = self.table().site::<A, R>(handle)?;

        let record = {
            let _guard = lock!(self.mutation);
            if let Some(existing) = self.by_method.get(&handle) {
                return Err(Error::DuplicateRegistration {
                    handle,
                    method: existing.method_name().to_string(),
                });
            }

            let hook = hook.with_trace(self.config.trace_dispatch);
            let hook_name = hook.name().to_string();
            let interceptor: Arc<dyn Interceptor<A, R>> = Arc::new(hook);
            let (has_before, has_after) = (interceptor.has_before(), interceptor.has_after());
            let binding = site.bind(interceptor)?;

            let target: Arc<dyn PatchTarget> = site;
            let record = Arc::new(HookRecord::new(
                hook_name, has_before, has_after, target, binding,
            ));
            self.records.push(record.clone());
            self.by_method.insert(handle, record.clone());
            record
        };

        tracing::debug!(
            hook = %record.hook_name(),
            method = %record.method_name(),
            %handle,
            before = record.has_before(),
            after = record.has_after(),
            "hook registered"
        );

        if self.config.install_on_register {
            self.install(&record)?;
        }
        Ok(record)
    }

    /// Registers a batch of patches.
    ///
    /// A failing patch is logged and reported; the remaining patches are still
    /// registered unless [`fail_fast`](InterceptionConfig::fail_fast) is set.
    ///
    /// # Errors
    /// Only in fail-fast mode: the first registration error.
    pub fn register_patches(&self, patches: &[&dyn Patch]) -> Result<PatchReport> {
        let mut report = PatchReport::default();
        for patch in patches {
            match patch.register(self) {
                Ok(record) => report.registered.push(record),
                Err(error) => {
                    tracing::warn!(patch = %patch.name(), %error, "patch registration failed");
                    if self.config.fail_fast {
                        return Err(error);
                    }
                    report.failed.push(PatchFailure {
                        patch: patch.name().to_string(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Activates interception for `record`. Installing twice is a no-op.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] if the record's site has no interceptor,
    /// which cannot happen for records created by this registry.
    pub fn install(&self, record: &HookRecord) -> Result<()> {
        let _guard = lock!(self.mutation);
        Self::install_locked(record)
    }

    fn install_locked(record: &HookRecord) -> Result<()> {
        if record.install()? {
            tracing::debug!(hook = %record.hook_name(), method = %record.method_name(), "hook installed");
        } else {
            tracing::trace!(hook = %record.hook_name(), "hook already installed");
        }
        Ok(())
    }

    /// Restores the original behavior of `record`'s method. Never fails.
    pub fn uninstall(&self, record: &HookRecord) {
        let _guard = lock!(self.mutation);
        if record.uninstall() {
            tracing::debug!(hook = %record.hook_name(), method = %record.method_name(), "hook uninstalled");
        }
    }

    /// Installs every record.
    ///
    /// Every record is attempted even if an earlier one fails.
    ///
    /// # Errors
    /// The first install error encountered.
    pub fn install_all(&self) -> Result<()> {
        let _guard = lock!(self.mutation);
        let mut first_error = None;
        for (_, record) in self.records.iter() {
            if let Err(error) = Self::install_locked(record) {
                tracing::warn!(hook = %record.hook_name(), %error, "hook install failed");
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Uninstalls every record ever registered, installed or not.
    ///
    /// Returns the number of records that were installed.
    pub fn uninstall_all(&self) -> usize {
        let _guard = lock!(self.mutation);
        let removed = self
            .records
            .iter()
            .filter(|(_, record)| record.uninstall())
            .count();
        tracing::debug!(removed, total = self.records.count(), "all hooks uninstalled");
        removed
    }

    /// Returns the record for `handle`, if one was registered.
    #[must_use]
    pub fn record(&self, handle: MethodHandle) -> Option<Arc<HookRecord>> {
        self.by_method.get(&handle).map(|record| record.value().clone())
    }

    /// Iterates over all records in registration order.
    pub fn records(&self) -> impl Iterator<Item = &Arc<HookRecord>> {
        self.records.iter().map(|(_, record)| record)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.count()
    }

    /// Returns `true` if nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.count() == 0
    }

    /// Number of records currently installed.
    #[must_use]
    pub fn installed_count(&self) -> usize {
        self.records().filter(|record| record.is_installed()).count()
    }
}

impl Drop for PatchRegistry {
    fn drop(&mut self) {
        let released = self
            .records
            .iter()
            .filter(|(_, record)| record.release())
            .count();
        tracing::debug!(released, "hook records released");
    }
}

impl fmt::Debug for PatchRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchRegistry")
            .field("record_count", &self.records.count())
            .field("installed", &self.installed_count())
            .field("config", &self.config)
            .finish()
    }
}
