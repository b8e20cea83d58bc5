//! Host method metadata and signature resolution.
//!
//! # Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`handle`] | [`MethodHandle`](handle::MethodHandle), the opaque id of a host method |
//! | [`signature`] | Signatures, passing modes and binding flags used for lookup |
//! | [`table`] | [`MethodTable`](table::MethodTable), the host's exported methods |
//! | [`resolver`] | [`SignatureResolver`](resolver::SignatureResolver), exact signature matching |

pub mod handle;
pub mod resolver;
pub mod signature;
pub mod table;
