//! Shared fixtures for unit tests
//!
//! [`FakeHost`] stands in for the host program: a method table with every
//! building-AI method the patches hook, each with a small original body that
//! counts its invocations. [`FakeCity`] implements every capability port with
//! switchable answers and records the commands it receives.

mod host;

pub use city::{FakeCity, PortCall};
pub use host::FakeHost;
