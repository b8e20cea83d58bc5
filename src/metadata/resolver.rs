//! One-time signature resolution.
//!
//! [`SignatureResolver`] maps a [`MethodSignature`] to the single host method it
//! describes. Matching is exact:
//!
//! 1. Declaring type and method name select the overload set (name index lookup)
//! 2. The binding flags must admit the method's visibility and static-ness
//! 3. Parameter count must be equal
//! 4. Every position must agree on underlying type *and* passing mode
//!
//! Zero matches fail with [`ResolutionError::NotFound`], more than one with
//! [`ResolutionError::Ambiguous`]. The resolver never guesses between candidates.
//!
//! Resolution is a startup cost. Successful results are cached per signature, so
//! resolving the same signature twice does not walk the overload set again.

use std::sync::Arc;

use dashmap::DashMap;

use crate::{
    error::ResolutionError,
    metadata::{handle::MethodHandle, signature::MethodSignature, table::MethodTable},
};

/// Resolves signatures against a [`MethodTable`].
pub struct SignatureResolver {
    table: Arc<MethodTable>,
    cache: DashMap<MethodSignature, MethodHandle>,
}

impl SignatureResolver {
    /// Creates a resolver over `table`.
    #[must_use]
    pub fn new(table: Arc<MethodTable>) -> Self {
        SignatureResolver {
            table,
            cache: DashMap::new(),
        }
    }

    /// The table this resolver looks into.
    #[must_use]
    pub fn table(&self) -> &Arc<MethodTable> {
        &self.table
    }

    /// Returns every method matching `signature`.
    #[must_use]
    pub fn candidates(&self, signature: &MethodSignature) -> Vec<MethodHandle> {
        self.table
            .overloads(signature.declaring_type(), signature.name())
            .into_iter()
            .filter(|handle| {
                self.table.definition(*handle).is_ok_and(|def| {
                    signature.flags().admits(def.visibility, def.is_static)
                        && signature.params_match(&def.params)
                })
            })
            .collect()
    }

    /// Resolves `signature` to exactly one method.
    ///
    /// # Errors
    /// - [`ResolutionError::NotFound`] if no method matches
    /// - [`ResolutionError::Ambiguous`] if more than one method matches
    pub fn resolve(&self, signature: &MethodSignature) -> Result<MethodHandle, ResolutionError> {
        if let Some(handle) = self.cache.get(signature) {
            return Ok(*handle);
        }

        let mut candidates = self.candidates(signature);
        match candidates.len() {
            0 => Err(ResolutionError::NotFound {
                signature: signature.to_string(),
            }),
            1 => {
                let handle = candidates.remove(0);
                self.cache.insert(signature.clone(), handle);
                Ok(handle)
            }
            _ => Err(ResolutionError::Ambiguous {
                signature: signature.to_string(),
                candidates,
            }),
        }
    }
}

impl std::fmt::Debug for SignatureResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureResolver")
            .field("method_count", &self.table.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{
        signature::{BindingFlags, ParameterDescriptor},
        table::MethodDef,
    };

    fn overloaded_table() -> Arc<MethodTable> {
        let table = MethodTable::new();
        table.define(
            MethodDef::new("BuildingAI", "Touch")
                .non_public()
                .param(ParameterDescriptor::value("ushort"))
                .param(ParameterDescriptor::value("Building")),
            |_: &mut ()| (),
        )
        .unwrap();
        table.define(
            MethodDef::new("BuildingAI", "Touch")
                .non_public()
                .param(ParameterDescriptor::value("ushort"))
                .param(ParameterDescriptor::by_ref("Building")),
            |_: &mut ()| (),
        )
        .unwrap();
        table.define(
            MethodDef::new("BuildingAI", "Touch")
                .param(ParameterDescriptor::value("ushort")),
            |_: &mut ()| (),
        )
        .unwrap();
        Arc::new(table)
    }

    #[test]
    fn test_resolve_distinguishes_by_ref_overload() {
        let resolver = SignatureResolver::new(overloaded_table());

        let by_ref = MethodSignature::builder("BuildingAI", "Touch")
            .flags(BindingFlags::INSTANCE | BindingFlags::NON_PUBLIC)
            .param("ushort")
            .by_ref("Building")
            .build();
        assert_eq!(resolver.resolve(&by_ref), Ok(MethodHandle::from_row(2)));

        let by_value = MethodSignature::builder("BuildingAI", "Touch")
            .flags(BindingFlags::INSTANCE | BindingFlags::NON_PUBLIC)
            .param("ushort")
            .param("Building")
            .build();
        assert_eq!(resolver.resolve(&by_value), Ok(MethodHandle::from_row(1)));
    }

    #[test]
    fn test_resolve_respects_binding_flags() {
        let resolver = SignatureResolver::new(overloaded_table());

        let public = MethodSignature::builder("BuildingAI", "Touch")
            .param("ushort")
            .build();
        assert_eq!(resolver.resolve(&public), Ok(MethodHandle::from_row(3)));

        let wrong_visibility = MethodSignature::builder("BuildingAI", "Touch")
            .flags(BindingFlags::INSTANCE | BindingFlags::NON_PUBLIC)
            .param("ushort")
            .build();
        assert!(matches!(
            resolver.resolve(&wrong_visibility),
            Err(ResolutionError::NotFound { .. })
        ));

        let wrong_kind = MethodSignature::builder("BuildingAI", "Touch")
            .flags(BindingFlags::STATIC | BindingFlags::PUBLIC)
            .param("ushort")
            .build();
        assert!(resolver.resolve(&wrong_kind).is_err());
    }

    #[test]
    fn test_resolve_not_found() {
        let resolver = SignatureResolver::new(overloaded_table());

        let missing = MethodSignature::builder("BuildingAI", "Nope").build();
        assert_eq!(
            resolver.resolve(&missing),
            Err(ResolutionError::NotFound {
                signature: "BuildingAI::Nope()".to_string()
            })
        );

        let out_param = MethodSignature::builder("BuildingAI", "Touch")
            .flags(BindingFlags::INSTANCE | BindingFlags::NON_PUBLIC)
            .param("ushort")
            .out("Building")
            .build();
        assert!(resolver.resolve(&out_param).is_err());
    }

    #[test]
    fn test_resolve_ambiguous() {
        let table = MethodTable::new();
        table
            .define(MethodDef::new("T", "Twin"), |_: &mut ()| ())
            .unwrap();
        table
            .define(MethodDef::new("T", "Twin"), |_: &mut ()| ())
            .unwrap();
        let resolver = SignatureResolver::new(Arc::new(table));

        let signature = MethodSignature::builder("T", "Twin").build();
        match resolver.resolve(&signature) {
            Err(ResolutionError::Ambiguous { candidates, .. }) => {
                assert_eq!(
                    candidates,
                    vec![MethodHandle::from_row(1), MethodHandle::from_row(2)]
                );
            }
            other => panic!("expected ambiguity, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_is_cached() {
        let resolver = SignatureResolver::new(overloaded_table());
        let signature = MethodSignature::builder("BuildingAI", "Touch")
            .param("ushort")
            .build();

        let first = resolver.resolve(&signature).unwrap();
        let second = resolver.resolve(&signature).unwrap();
        assert_eq!(first, second);
        assert_eq!(resolver.cache.len(), 1);
    }
}
