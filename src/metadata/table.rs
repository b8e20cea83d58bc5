//! The host's exported method metadata.
//!
//! A [`MethodTable`] is the host's side of the contract: every method the host is
//! willing to have wrapped is defined once, together with its original body. The
//! table hands out a [`MethodHandle`] per definition and keeps a name index that
//! the [`SignatureResolver`](crate::metadata::resolver::SignatureResolver) uses.
//!
//! The host itself never calls an original body directly; it calls through the
//! [`MethodSite`] the table created for it, which is where interception is
//! attached and detached.
//!
//! # Thread Safety
//!
//! Definitions go into an append-only `boxcar::Vec` and a `DashMap` name index.
//! Lookups never block; defining methods is serialized so rows stay sequential.

use std::{
    any::Any,
    fmt,
    sync::{Arc, Mutex},
};

use dashmap::DashMap;

use crate::{
    interception::{MethodSite, PatchTarget},
    metadata::{
        handle::{MethodHandle, MAX_ROW, METHOD_TABLE},
        signature::{ParameterDescriptor, Visibility},
    },
    Error, Result,
};

/// Declaration of one host method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDef {
    /// Declaring type name
    pub declaring_type: String,
    /// Method name
    pub name: String,
    /// Visibility
    pub visibility: Visibility,
    /// `true` for static methods
    pub is_static: bool,
    /// Ordered parameter list
    pub params: Vec<ParameterDescriptor>,
    /// Return type name, `None` for void
    pub return_type: Option<String>,
}

impl MethodDef {
    /// Creates a public instance method with no parameters and no return value.
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>) -> Self {
        MethodDef {
            declaring_type: declaring_type.into(),
            name: name.into(),
            visibility: Visibility::Public,
            is_static: false,
            params: Vec::new(),
            return_type: None,
        }
    }

    /// Marks the method non-public.
    #[must_use]
    pub fn non_public(mut self) -> Self {
        self.visibility = Visibility::NonPublic;
        self
    }

    /// Marks the method static.
    #[must_use]
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: ParameterDescriptor) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    /// Returns `Type::Method`.
    #[must_use]
    pub fn fullname(&self) -> String {
        format!("{}::{}", self.declaring_type, self.name)
    }
}

impl fmt::Display for MethodDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{} {}{} {}::{}({})",
            self.visibility,
            if self.is_static { "static " } else { "" },
            self.return_type.as_deref().unwrap_or("void"),
            self.declaring_type,
            self.name,
            params.join(", ")
        )
    }
}

struct MethodEntry {
    def: MethodDef,
    /// The typed `MethodSite<A, R>`, erased so the table can hold any frame type
    site: Arc<dyn Any + Send + Sync>,
    /// The same site, viewed through the type-erased patch interface
    target: Arc<dyn PatchTarget>,
}

/// Registry of every hookable host method.
#[derive(Default)]
pub struct MethodTable {
    methods: boxcar::Vec<MethodEntry>,
    by_name: DashMap<(String, String), Vec<MethodHandle>>,
    define_lock: Mutex<()>,
}

impl MethodTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a host method together with its original body.
    ///
    /// `A` is the argument frame the host passes (by-reference parameters are
    /// written back through it), `R` the return type (`()` for void methods).
    ///
    /// # Arguments
    /// * `def`      - The method's declaration
    /// * `original` - The unintercepted method body
    ///
    /// # Errors
    /// Returns [`Error::Configuration`] once the table holds [`MAX_ROW`] methods.
    pub fn define<A, R, F>(&self, def: MethodDef, original: F) -> Result<MethodHandle>
    where
        A: 'static,
        R: 'static,
        F: Fn(&mut A) -> R + Send + Sync + 'static,
    {
        let key = (def.declaring_type.clone(), def.name.clone());
        let display = def.fullname();

        let _guard = lock!(self.define_lock);
        // Reserve the row first so the site can carry its own handle
        let row = self.methods.count() + 1;
        let Some(handle) = MethodHandle::try_from_row(row) else {
            return Err(Error::Configuration(format!(
                "method table is full ({MAX_ROW} rows), cannot define {display}"
            )));
        };
        let site = Arc::new(MethodSite::new(handle, display, Arc::new(original)));

        let index = self.methods.push(MethodEntry {
            def,
            site: site.clone(),
            target: site,
        });
        debug_assert_eq!(index + 1, row, "method rows must be defined sequentially");

        self.by_name.entry(key).or_default().push(handle);
        Ok(handle)
    }

    fn entry(&self, handle: MethodHandle) -> Result<&MethodEntry> {
        if handle.is_null() || handle.table() != METHOD_TABLE {
            return Err(Error::UnknownMethod(handle));
        }
        self.methods
            .get(handle.row() as usize - 1)
            .ok_or(Error::UnknownMethod(handle))
    }

    /// Returns the declaration behind `handle`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownMethod`] if the handle was not issued by this table.
    pub fn definition(&self, handle: MethodHandle) -> Result<&MethodDef> {
        Ok(&self.entry(handle)?.def)
    }

    /// Returns the typed call site for `handle`.
    ///
    /// # Errors
    /// - [`Error::UnknownMethod`] if the handle was not issued by this table
    /// - [`Error::SiteTypeMismatch`] if the method was defined with a different
    ///   argument frame or return type
    pub fn site<A: 'static, R: 'static>(
        &self,
        handle: MethodHandle,
    ) -> Result<Arc<MethodSite<A, R>>> {
        let entry = self.entry(handle)?;
        entry
            .site
            .clone()
            .downcast::<MethodSite<A, R>>()
            .map_err(|_| Error::SiteTypeMismatch {
                handle,
                method: entry.def.fullname(),
            })
    }

    /// Returns the type-erased patch interface of `handle`'s site.
    ///
    /// # Errors
    /// Returns [`Error::UnknownMethod`] if the handle was not issued by this table.
    pub fn target(&self, handle: MethodHandle) -> Result<Arc<dyn PatchTarget>> {
        Ok(self.entry(handle)?.target.clone())
    }

    /// Returns every handle defined as `declaring_type::name`, in definition order.
    #[must_use]
    pub fn overloads(&self, declaring_type: &str, name: &str) -> Vec<MethodHandle> {
        self.by_name
            .get(&(declaring_type.to_string(), name.to_string()))
            .map(|handles| handles.value().clone())
            .unwrap_or_default()
    }

    /// Number of defined methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.methods.count()
    }

    /// Returns `true` if no method has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.methods.count() == 0
    }

    /// Iterates over `(handle, declaration)` pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (MethodHandle, &MethodDef)> {
        self.methods.iter().map(|(index, entry)| {
            (
                MethodHandle::from_row(u32::try_from(index + 1).unwrap_or(u32::MAX)),
                &entry.def,
            )
        })
    }
}

impl fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodTable")
            .field("method_count", &self.methods.count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::signature::ParameterDescriptor;

    #[test]
    fn test_define_assigns_sequential_handles() {
        let table = MethodTable::new();
        let first = table
            .define(MethodDef::new("A", "One"), |_: &mut ()| ())
            .unwrap();
        let second = table
            .define(MethodDef::new("A", "Two"), |_: &mut ()| 2i32)
            .unwrap();

        assert_eq!(first, MethodHandle::from_row(1));
        assert_eq!(second, MethodHandle::from_row(2));
        assert_eq!(table.len(), 2);
        assert_eq!(table.definition(second).unwrap().name, "Two");
    }

    #[test]
    fn test_overloads_are_indexed_by_name() {
        let table = MethodTable::new();
        let by_value = table.define(
            MethodDef::new("T", "M").param(ParameterDescriptor::value("int")),
            |_: &mut i32| (),
        )
        .unwrap();
        let by_ref = table.define(
            MethodDef::new("T", "M").param(ParameterDescriptor::by_ref("int")),
            |_: &mut i32| (),
        )
        .unwrap();
        table
            .define(MethodDef::new("T", "Other"), |_: &mut ()| ())
            .unwrap();

        assert_eq!(table.overloads("T", "M"), vec![by_value, by_ref]);
        assert!(table.overloads("T", "Missing").is_empty());
    }

    #[test]
    fn test_site_downcast() {
        let table = MethodTable::new();
        let handle = table
            .define(MethodDef::new("T", "Add").returns("int"), |x: &mut i32| *x + 1)
            .unwrap();

        let site = table.site::<i32, i32>(handle).unwrap();
        assert_eq!(site.call(&mut 41).unwrap(), 42);

        assert!(matches!(
            table.site::<u8, i32>(handle),
            Err(Error::SiteTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_handle() {
        let table = MethodTable::new();
        assert!(matches!(
            table.definition(MethodHandle::from_row(1)),
            Err(Error::UnknownMethod(_))
        ));
        assert!(matches!(
            table.target(MethodHandle::new(0)),
            Err(Error::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_definition_display() {
        let def = MethodDef::new("PrivateBuildingAI", "ShowConsumption")
            .non_public()
            .param(ParameterDescriptor::value("ushort"))
            .param(ParameterDescriptor::by_ref("Building"))
            .returns("bool");
        assert_eq!(
            def.to_string(),
            "non-public bool PrivateBuildingAI::ShowConsumption(ushort, ref Building)"
        );
    }
}
