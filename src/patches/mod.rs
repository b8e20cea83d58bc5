//! Building-AI patches and their load/unload lifecycle.
//!
//! # Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`building_ai`] | One [`Patch`] per hooked building-AI method |
//! | [`config`] | [`BuildingPatchConfig`], which patches a session loads |
//! | [`session`] | [`ModSession`], the mod load and unload boundary |
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use hostpatch::prelude::*;
//!
//! # fn host_methods() -> Arc<MethodTable> { Arc::new(MethodTable::new()) }
//! # fn weather() -> Arc<dyn WeatherQuery> { unimplemented!() }
//! let services = PatchServices::new().with_weather(weather());
//! let session = ModSession::load(
//!     host_methods(),
//!     services,
//!     &BuildingPatchConfig::none().with_weather_doors(true),
//!     InterceptionConfig::default(),
//! )?;
//!
//! for failure in &session.report().failed {
//!     eprintln!("{}: {}", failure.patch, failure.error);
//! }
//! # Ok::<(), hostpatch::Error>(())
//! ```

pub mod building_ai;
pub mod config;
pub mod session;

pub use building_ai::{
    building_patches, ConstructionTimePatch, CreateBuildingPatch, HandleWorkersPatch,
    ShowConsumptionPatch, SimulationStepActivePatch, UnspawnPositionPatch, UpgradeInfoPatch,
};
pub use config::BuildingPatchConfig;
pub use session::ModSession;

pub use crate::interception::Patch;
