//! Runtime method interception.
//!
//! This module provides the interception core: binding before/after hooks to
//! host methods, the dispatch protocol that runs on every intercepted call, and
//! the registry that installs and uninstalls hooks in bulk.
//!
//! - **Before/after hooks**: Run code around the original method body
//! - **Short-circuit**: A before-hook can skip the original body and supply the result
//! - **Argument access**: Hooks read and overwrite reference parameters through the frame
//! - **Per-call state**: A hook pair passes a private value from before to after
//!
//! # Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`context`] | [`InvocationContext`], the per-call view a hook pair works on |
//! | [`hook`] | The [`Hook`] builder and the dispatch protocol |
//! | [`site`] | [`MethodSite`], the reversible redirect the host calls through |
//! | [`record`] | [`HookRecord`], one hooked method and its install state |
//! | [`registry`] | [`PatchRegistry`], registration and bulk install/uninstall |
//! | [`patch`] | The [`Patch`] trait and batch registration reports |
//! | [`config`] | [`InterceptionConfig`] |
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        PatchRegistry                         │
//! │  register(signature, hook)                                   │
//! │     │  SignatureResolver ──► MethodHandle                    │
//! │     │  MethodTable::site::<A, R>(handle) ──► MethodSite      │
//! │     └► bind(hook) ──► HookRecord (uninstalled)               │
//! │  install / uninstall / install_all / uninstall_all           │
//! │  drop ──► unbind every hook                                  │
//! └──────────────────────────────────────────────────────────────┘
//!                               │ attach / detach / unbind
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  MethodSite<A, R>::call(&mut A)                              │
//! │     detached ──► original(&mut A)                            │
//! │     attached ──► Hook::invoke: before ► original? ► after    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency
//!
//! Dispatch takes no lock: the invocation context and the hook-pair state live
//! on the calling thread's stack, and the site reads its binding slot with one
//! atomic load. Registry mutations are serialized under one mutex.
//!
//! A hook that fails after mutating reference parameters leaves those
//! mutations in place; nothing is rolled back.

pub mod config;
pub mod context;
pub mod hook;
pub mod patch;
pub mod record;
pub mod registry;
pub mod site;

pub use config::InterceptionConfig;
pub use context::InvocationContext;
pub use hook::{AfterHookFn, BeforeHookFn, Hook, Interceptor, OriginalFn};
pub use patch::{Patch, PatchFailure, PatchReport};
pub use record::HookRecord;
pub use registry::PatchRegistry;
pub use site::{BindingId, MethodSite, PatchTarget};
