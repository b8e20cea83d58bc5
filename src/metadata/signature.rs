//! Method signatures used to look up host methods.
//!
//! A [`MethodSignature`] names the declaring type, the method, the binding
//! flags (visibility and static/instance) and the ordered parameter list. Each
//! parameter carries its [`PassingMode`], since host overloads can differ only
//! in whether a parameter is passed by reference.
//!
//! # Examples
//!
//! ```rust
//! use hostpatch::metadata::signature::{BindingFlags, MethodSignature};
//!
//! let signature = MethodSignature::builder("PrivateBuildingAI", "HandleWorkers")
//!     .flags(BindingFlags::INSTANCE | BindingFlags::NON_PUBLIC)
//!     .param("ushort")
//!     .by_ref("Building")
//!     .by_ref("Citizen.BehaviourData")
//!     .by_ref("int")
//!     .by_ref("int")
//!     .by_ref("int")
//!     .build();
//!
//! assert_eq!(signature.params().len(), 6);
//! assert_eq!(
//!     signature.to_string(),
//!     "PrivateBuildingAI::HandleWorkers(ushort, ref Building, ref Citizen.BehaviourData, ref int, ref int, ref int)"
//! );
//! ```

use std::fmt;

use bitflags::bitflags;
use strum::Display;

/// How an argument reaches the callee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum PassingMode {
    /// Copied in; callee changes are invisible to the caller
    #[strum(serialize = "")]
    ByValue,
    /// Passed by reference; callee may read and overwrite it
    #[strum(serialize = "ref")]
    ByRef,
    /// Passed by reference; callee is expected to write it
    #[strum(serialize = "out")]
    Out,
}

impl PassingMode {
    /// Returns `true` when changes made by the callee are visible to the caller.
    #[must_use]
    pub fn is_reference(&self) -> bool {
        !matches!(self, PassingMode::ByValue)
    }
}

/// Visibility of a host method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum Visibility {
    /// Callable from outside the declaring type
    #[strum(serialize = "public")]
    Public,
    /// Private, protected or internal
    #[strum(serialize = "non-public")]
    NonPublic,
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    /// Which methods a lookup may bind to.
    ///
    /// A method is a candidate only when the flags contain both its
    /// static/instance bit and its visibility bit.
    pub struct BindingFlags: u32 {
        /// Instance methods
        const INSTANCE = 0x0004;
        /// Static methods
        const STATIC = 0x0008;
        /// Public methods
        const PUBLIC = 0x0010;
        /// Non-public methods
        const NON_PUBLIC = 0x0020;
    }
}

impl BindingFlags {
    /// Returns `true` if a method with this visibility and static-ness may be bound.
    #[must_use]
    pub fn admits(&self, visibility: Visibility, is_static: bool) -> bool {
        let kind = if is_static {
            BindingFlags::STATIC
        } else {
            BindingFlags::INSTANCE
        };
        let access = match visibility {
            Visibility::Public => BindingFlags::PUBLIC,
            Visibility::NonPublic => BindingFlags::NON_PUBLIC,
        };
        self.contains(kind | access)
    }
}

impl Default for BindingFlags {
    fn default() -> Self {
        BindingFlags::INSTANCE | BindingFlags::PUBLIC
    }
}

/// One entry of a parameter list: the underlying type and how it is passed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterDescriptor {
    /// Underlying type name, without any reference marker
    pub type_name: String,
    /// Passing mode
    pub mode: PassingMode,
}

impl ParameterDescriptor {
    /// Creates a descriptor.
    pub fn new(type_name: impl Into<String>, mode: PassingMode) -> Self {
        ParameterDescriptor {
            type_name: type_name.into(),
            mode,
        }
    }

    /// Creates a by-value descriptor.
    pub fn value(type_name: impl Into<String>) -> Self {
        Self::new(type_name, PassingMode::ByValue)
    }

    /// Creates a by-reference descriptor.
    pub fn by_ref(type_name: impl Into<String>) -> Self {
        Self::new(type_name, PassingMode::ByRef)
    }

    /// Creates an output descriptor.
    pub fn out(type_name: impl Into<String>) -> Self {
        Self::new(type_name, PassingMode::Out)
    }
}

impl fmt::Display for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            PassingMode::ByValue => write!(f, "{}", self.type_name),
            mode => write!(f, "{} {}", mode, self.type_name),
        }
    }
}

/// Full description of the host method a hook wants to wrap.
///
/// Immutable once built. Only used for resolution; hook records keep the
/// resolved [`MethodHandle`](crate::metadata::handle::MethodHandle) instead.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    declaring_type: String,
    name: String,
    flags: BindingFlags,
    params: Vec<ParameterDescriptor>,
}

impl MethodSignature {
    /// Starts building a signature for `declaring_type::name`.
    ///
    /// Flags default to public instance methods.
    pub fn builder(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
    ) -> MethodSignatureBuilder {
        MethodSignatureBuilder {
            declaring_type: declaring_type.into(),
            name: name.into(),
            flags: BindingFlags::default(),
            params: Vec::new(),
        }
    }

    /// Declaring type name.
    #[must_use]
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binding flags.
    #[must_use]
    pub fn flags(&self) -> BindingFlags {
        self.flags
    }

    /// Ordered parameter list.
    #[must_use]
    pub fn params(&self) -> &[ParameterDescriptor] {
        &self.params
    }

    /// Returns `true` if `params` is exactly this signature's parameter list,
    /// position by position, type and passing mode.
    #[must_use]
    pub fn params_match(&self, params: &[ParameterDescriptor]) -> bool {
        self.params.len() == params.len() && self.params.iter().zip(params).all(|(a, b)| a == b)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}(", self.declaring_type, self.name)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        write!(f, ")")
    }
}

/// Builder for [`MethodSignature`].
#[derive(Clone, Debug)]
pub struct MethodSignatureBuilder {
    declaring_type: String,
    name: String,
    flags: BindingFlags,
    params: Vec<ParameterDescriptor>,
}

impl MethodSignatureBuilder {
    /// Replaces the binding flags.
    #[must_use]
    pub fn flags(mut self, flags: BindingFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Appends a by-value parameter.
    #[must_use]
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.params.push(ParameterDescriptor::value(type_name));
        self
    }

    /// Appends a by-reference parameter.
    #[must_use]
    pub fn by_ref(mut self, type_name: impl Into<String>) -> Self {
        self.params.push(ParameterDescriptor::by_ref(type_name));
        self
    }

    /// Appends an output parameter.
    #[must_use]
    pub fn out(mut self, type_name: impl Into<String>) -> Self {
        self.params.push(ParameterDescriptor::out(type_name));
        self
    }

    /// Appends an arbitrary descriptor.
    #[must_use]
    pub fn descriptor(mut self, descriptor: ParameterDescriptor) -> Self {
        self.params.push(descriptor);
        self
    }

    /// Finishes the signature.
    #[must_use]
    pub fn build(self) -> MethodSignature {
        MethodSignature {
            declaring_type: self.declaring_type,
            name: self.name,
            flags: self.flags,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_flags_admit() {
        let flags = BindingFlags::INSTANCE | BindingFlags::NON_PUBLIC;
        assert!(flags.admits(Visibility::NonPublic, false));
        assert!(!flags.admits(Visibility::Public, false));
        assert!(!flags.admits(Visibility::NonPublic, true));

        let all = BindingFlags::all();
        assert!(all.admits(Visibility::Public, true));
        assert!(!BindingFlags::INSTANCE.admits(Visibility::Public, false));
    }

    #[test]
    fn test_params_match_distinguishes_ref() {
        let by_value = MethodSignature::builder("T", "M").param("int").build();
        let by_ref = MethodSignature::builder("T", "M").by_ref("int").build();

        assert!(by_value.params_match(&[ParameterDescriptor::value("int")]));
        assert!(!by_value.params_match(by_ref.params()));
        assert!(!by_ref.params_match(&[ParameterDescriptor::out("int")]));
        assert!(!by_value.params_match(&[]));
    }

    #[test]
    fn test_signature_display() {
        let signature = MethodSignature::builder("BuildingManager", "CreateBuilding")
            .out("ushort")
            .by_ref("Randomizer")
            .param("BuildingInfo")
            .build();
        assert_eq!(
            signature.to_string(),
            "BuildingManager::CreateBuilding(out ushort, ref Randomizer, BuildingInfo)"
        );

        let empty = MethodSignature::builder("PrivateBuildingAI", "GetConstructionTime").build();
        assert_eq!(empty.to_string(), "PrivateBuildingAI::GetConstructionTime()");
        assert_eq!(empty.flags(), BindingFlags::INSTANCE | BindingFlags::PUBLIC);
    }

    #[test]
    fn test_passing_mode_reference() {
        assert!(!PassingMode::ByValue.is_reference());
        assert!(PassingMode::ByRef.is_reference());
        assert!(PassingMode::Out.is_reference());
    }
}
