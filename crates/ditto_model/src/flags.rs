//! Attribute access flags.

use bitflags::bitflags;

bitflags! {
    /// Visibility and access of an attribute.
    ///
    /// Only attributes carrying all of [`AttrFlags::CLONEABLE`] take part in
    /// deep cloning; everything else keeps its construction default.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct AttrFlags: u8 {
        /// Visible outside the class.
        const PUBLIC = 1 << 0;
        /// Has a getter.
        const READABLE = 1 << 1;
        /// Has a setter.
        const WRITABLE = 1 << 2;

        /// Public read/write attribute.
        const CLONEABLE = Self::PUBLIC.bits() | Self::READABLE.bits() | Self::WRITABLE.bits();
        /// Public attribute without a setter.
        const READ_ONLY = Self::PUBLIC.bits() | Self::READABLE.bits();
        /// Non-public read/write attribute.
        const PRIVATE = Self::READABLE.bits() | Self::WRITABLE.bits();
    }
}

impl AttrFlags {
    /// Returns `true` if the attribute is public, readable and writable.
    #[inline]
    pub fn is_cloneable(self) -> bool {
        self.contains(Self::CLONEABLE)
    }
}

impl Default for AttrFlags {
    fn default() -> Self {
        Self::CLONEABLE
    }
}
