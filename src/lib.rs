// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # hostpatch
//!
//! Reversible before/after interception of methods in a closed host program.
//!
//! The host exposes its hookable methods through a [`MethodTable`](metadata::table::MethodTable):
//! one definition per method, carrying the method's full signature and its original body.
//! `hostpatch` locates a method by signature, binds a [`Hook`](interception::Hook) to it and
//! redirects the host's calls through the hook until it is uninstalled again.
//!
//! ## Features
//!
//! - **Exact overload resolution** - Parameters match on type *and* passing mode (value, `ref`, `out`)
//! - **Before/after hooks** - Observe or rewrite arguments and results around the original body
//! - **Short-circuit** - Skip the original body and supply the result directly
//! - **Per-call state** - A hook pair passes a private value from before to after, on the stack
//! - **Reversible** - Uninstalling restores the original behavior exactly
//! - **Lock-free dispatch** - Registry mutations are serialized, calls never take a lock
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use hostpatch::prelude::*;
//!
//! // The host side: a method `Shop::Price(ref int) -> int`
//! let table = Arc::new(MethodTable::new());
//! let handle = table.define(
//!     MethodDef::new("Shop", "Price")
//!         .param(ParameterDescriptor::by_ref("int"))
//!         .returns("int"),
//!     |base: &mut i32| *base * 2,
//! )?;
//!
//! // The mod side: halve every price, and remember the base price for the after-hook
//! let registry = PatchRegistry::new(table.clone());
//! let signature = MethodSignature::builder("Shop", "Price").by_ref("int").build();
//! let record = registry.register(
//!     &signature,
//!     Hook::<i32, i32, i32>::new("discount")
//!         .before(|ctx| {
//!             ctx.state = *ctx.args;
//!             Ok(())
//!         })
//!         .after(|ctx| {
//!             ctx.result = Some(ctx.state);
//!             Ok(())
//!         }),
//! )?;
//! registry.install(&record)?;
//!
//! let site = table.site::<i32, i32>(handle)?;
//! assert_eq!(site.call(&mut 10)?, 10);
//!
//! registry.uninstall_all();
//! assert_eq!(site.call(&mut 10)?, 20);
//! # Ok::<(), hostpatch::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - Method handles, signatures, the host's method table and the resolver
//! - [`interception`] - Hooks, the dispatch protocol, call sites and the patch registry
//! - [`ports`] - Capability interfaces the building-AI hooks call into
//! - [`host`] - Host data shapes and per-method argument frames
//! - [`patches`] - The building-AI patch set and its load/unload session
//!
//! ## Logging
//!
//! Registration, install and uninstall are reported through [`tracing`](https://docs.rs/tracing).
//! The library never installs a subscriber. Per-call events are only emitted at `trace`
//! level and only with [`InterceptionConfig::trace_dispatch`](interception::InterceptionConfig)
//! enabled.
#[macro_use]
pub(crate) mod macros;

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use hostpatch::prelude::*;
///
/// let registry = PatchRegistry::new(std::sync::Arc::new(MethodTable::new()));
/// assert!(registry.is_empty());
/// ```
pub mod prelude;

/// Host method metadata: handles, signatures, the method table and the resolver
///
/// # Key Components
///
/// - [`metadata::handle::MethodHandle`] - Opaque identifier of one host method
/// - [`metadata::signature::MethodSignature`] - Full signature used for lookup
/// - [`metadata::table::MethodTable`] - The host's hookable methods and their call sites
/// - [`metadata::resolver::SignatureResolver`] - Maps a signature onto exactly one method
pub mod metadata;

/// The interception core
///
/// See the module documentation for the dispatch protocol and the registry's
/// guarantees.
pub mod interception;

/// Capability ports of the building-AI hooks
pub mod ports;

/// Host data shapes seen by the building-AI hooks
pub mod host;

/// The building-AI patch set
pub mod patches;

/// `hostpatch` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `hostpatch` Error type
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use hostpatch::{
///     interception::{Hook, PatchRegistry},
///     metadata::{signature::MethodSignature, table::MethodTable},
///     Error, ResolutionError,
/// };
///
/// let registry = PatchRegistry::new(Arc::new(MethodTable::new()));
/// let signature = MethodSignature::builder("Missing", "Method").build();
///
/// match registry.register(&signature, Hook::<(), ()>::new("lookup")) {
///     Err(Error::Resolution(ResolutionError::NotFound { signature })) => {
///         println!("{signature} is not exported by the host");
///     }
///     Err(e) => println!("Error: {e}"),
///     Ok(_) => unreachable!(),
/// }
/// ```
pub use error::{Error, ResolutionError};
