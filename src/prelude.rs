//! # hostpatch Prelude
//!
//! The types needed to define host methods, hook them, and load the building-AI
//! patch set. Import with `use hostpatch::prelude::*;`.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all hostpatch operations
pub use crate::Error;

/// Signature resolution failures
pub use crate::ResolutionError;

/// The result type used throughout hostpatch
pub use crate::Result;

// ================================================================================================
// Host Metadata
// ================================================================================================

/// Method identifiers and signatures
pub use crate::metadata::{
    handle::MethodHandle,
    signature::{BindingFlags, MethodSignature, ParameterDescriptor, PassingMode, Visibility},
};

/// The host's hookable methods
pub use crate::metadata::table::{MethodDef, MethodTable};

/// Signature lookup
pub use crate::metadata::resolver::SignatureResolver;

// ================================================================================================
// Interception
// ================================================================================================

/// Hooks and the per-call context
pub use crate::interception::{Hook, Interceptor, InvocationContext};

/// Registration and install state
pub use crate::interception::{
    HookRecord, InterceptionConfig, MethodSite, Patch, PatchRegistry, PatchReport, PatchTarget,
};

// ================================================================================================
// Building AI
// ================================================================================================

/// Capability ports
pub use crate::ports::{
    ConstructionAuthority, InfoViewQuery, LightingPolicy, PatchServices, ProblemReporter,
    SpawnPositionCalculator, WeatherQuery,
};

/// Patch selection and lifecycle
pub use crate::patches::{BuildingPatchConfig, ModSession};
