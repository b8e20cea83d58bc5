//! Load and unload boundaries of the building-AI patch set.
//!
//! A [`ModSession`] owns the [`PatchServices`] and the [`PatchRegistry`] for one
//! mod lifetime. Loading registers the enabled patches with per-patch failure
//! isolation and installs what registered; unloading (or dropping the session)
//! uninstalls every record, restores the host's original behavior and releases
//! the ports. The same table can then be loaded again by a new session.

use std::{fmt, sync::Arc};

use crate::{
    interception::{InterceptionConfig, Patch, PatchRegistry, PatchReport},
    metadata::table::MethodTable,
    patches::{building_ai::building_patches, BuildingPatchConfig},
    ports::PatchServices,
    Result,
};

/// The patches of one mod lifetime.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use hostpatch::{
///     interception::InterceptionConfig,
///     metadata::table::MethodTable,
///     patches::{BuildingPatchConfig, ModSession},
///     ports::PatchServices,
/// };
///
/// # fn host_methods() -> Arc<MethodTable> { Arc::new(MethodTable::new()) }
/// let session = ModSession::load(
///     host_methods(),
///     PatchServices::new(),
///     &BuildingPatchConfig::default(),
///     InterceptionConfig::default(),
/// )?;
/// println!("{}", session.report());
///
/// session.unload();
/// # Ok::<(), hostpatch::Error>(())
/// ```
pub struct ModSession {
    registry: PatchRegistry,
    services: PatchServices,
    report: PatchReport,
}

impl ModSession {
    /// Registers and installs the building-AI patches `patch_config` enables.
    ///
    /// Patches that fail to register are listed in [`report`](Self::report) and
    /// the others are installed regardless, unless `config` is fail-fast.
    ///
    /// # Arguments
    /// * `table`        - The host's hookable methods
    /// * `services`     - Ports the hooks call into
    /// * `patch_config` - Which patches to load
    /// * `config`       - Registry behavior
    ///
    /// # Errors
    /// The first registration error in fail-fast mode, or the first install
    /// error. Anything installed before the error is uninstalled again.
    pub fn load(
        table: Arc<MethodTable>,
        services: PatchServices,
        patch_config: &BuildingPatchConfig,
        config: InterceptionConfig,
    ) -> Result<Self> {
        let registry = PatchRegistry::with_config(table, config);
        let owned = building_patches(&services, patch_config);
        let patches: Vec<&dyn Patch> = owned.iter().map(|patch| patch.as_ref()).collect();

        let report = match registry
            .register_patches(&patches)
            .and_then(|report| registry.install_all().map(|()| report))
        {
            Ok(report) => report,
            // Dropping the registry uninstalls and releases whatever registered
            Err(error) => {
                tracing::error!(%error, "building patches not loaded");
                return Err(error);
            }
        };

        tracing::info!(
            registered = report.registered.len(),
            failed = report.failed.len(),
            installed = registry.installed_count(),
            "building patches loaded"
        );

        Ok(ModSession {
            registry,
            services,
            report,
        })
    }

    /// The registry holding this session's records.
    #[must_use]
    pub fn registry(&self) -> &PatchRegistry {
        &self.registry
    }

    /// Outcome of the registration at load time.
    #[must_use]
    pub fn report(&self) -> &PatchReport {
        &self.report
    }

    /// The ports this session was loaded with.
    #[must_use]
    pub fn services(&self) -> &PatchServices {
        &self.services
    }

    /// Uninstalls every hook and releases the session's ports. Dropping the
    /// session does the same without the log line.
    ///
    /// Returns the number of hooks that were installed.
    pub fn unload(self) -> usize {
        let removed = self.registry.installed_count();
        drop(self);
        tracing::info!(removed, "building patches unloaded");
        removed
    }
}

impl fmt::Debug for ModSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModSession")
            .field("registry", &self.registry)
            .field("services", &self.services)
            .field("failed", &self.report.failed.len())
            .finish()
    }
}
