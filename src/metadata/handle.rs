//! Opaque method handles.
//!
//! A [`MethodHandle`] is what the [`SignatureResolver`](crate::metadata::resolver::SignatureResolver)
//! hands out and what every [`HookRecord`](crate::interception::HookRecord) is keyed by. The
//! layout borrows the metadata token encoding: the high byte names the table the handle
//! belongs to, the low 24 bits are the 1-based row.
//!
//! ```text
//! 0x06_000003
//!   |    |
//!   |    +--- row 3
//!   +-------- table 0x06 (method definitions)
//! ```

use std::fmt;

/// Table byte used for every host method definition.
pub const METHOD_TABLE: u8 = 0x06;

/// Highest row a handle can carry.
pub const MAX_ROW: u32 = 0x00FF_FFFF;

/// Identifies one method in a [`MethodTable`](crate::metadata::table::MethodTable).
///
/// Handles are cheap to copy and compare, and stay valid for the lifetime of
/// the table that issued them.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodHandle(pub u32);

impl MethodHandle {
    /// Creates a handle from its raw value.
    #[must_use]
    pub fn new(value: u32) -> Self {
        MethodHandle(value)
    }

    /// Creates the handle for the given 1-based row of the method table.
    ///
    /// Only the low 24 bits of `row` are kept; callers issuing rows check
    /// against [`MAX_ROW`] first.
    #[must_use]
    pub fn from_row(row: u32) -> Self {
        MethodHandle((u32::from(METHOD_TABLE) << 24) | (row & MAX_ROW))
    }

    /// Creates the handle for `row`, or `None` if the row does not fit in the
    /// 24 row bits.
    #[must_use]
    pub fn try_from_row(row: usize) -> Option<Self> {
        u32::try_from(row)
            .ok()
            .filter(|row| (1..=MAX_ROW).contains(row))
            .map(Self::from_row)
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the table byte.
    #[must_use]
    pub fn table(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Returns the 1-based row.
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & MAX_ROW
    }

    /// Returns `true` for the null handle.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.row() == 0
    }
}

impl From<u32> for MethodHandle {
    fn from(value: u32) -> Self {
        MethodHandle(value)
    }
}

impl From<MethodHandle> for u32 {
    fn from(handle: MethodHandle) -> Self {
        handle.0
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MethodHandle(0x{:08x}, table: 0x{:02x}, row: {})",
            self.0,
            self.table(),
            self.row()
        )
    }
}

impl fmt::Display for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_from_row() {
        let handle = MethodHandle::from_row(3);
        assert_eq!(handle.value(), 0x0600_0003);
        assert_eq!(handle.table(), METHOD_TABLE);
        assert_eq!(handle.row(), 3);
        assert!(!handle.is_null());
    }

    #[test]
    fn test_handle_null() {
        assert!(MethodHandle::from_row(0).is_null());
        assert!(MethodHandle::new(0).is_null());
    }

    #[test]
    fn test_handle_row_limit() {
        assert_eq!(
            MethodHandle::try_from_row(MAX_ROW as usize),
            Some(MethodHandle(0x06FF_FFFF))
        );
        assert_eq!(MethodHandle::try_from_row(MAX_ROW as usize + 1), None);
        assert_eq!(MethodHandle::try_from_row(0), None);
    }

    #[test]
    fn test_handle_conversions() {
        let handle: MethodHandle = 0x0600_0010u32.into();
        let raw: u32 = handle.into();
        assert_eq!(raw, 0x0600_0010);
    }

    #[test]
    fn test_handle_formatting() {
        let handle = MethodHandle::from_row(1);
        assert_eq!(format!("{}", handle), "0x06000001");

        let debug_str = format!("{:?}", handle);
        assert!(debug_str.contains("table: 0x06"));
        assert!(debug_str.contains("row: 1"));
    }
}
