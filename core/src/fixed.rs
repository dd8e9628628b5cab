//! A signed 24.8 fixed-point number used in the wayland protocol.

use std::fmt::{Debug, Display, Formatter};

/// A signed 24.8 fixed-point number used in the wayland protocol.
///
/// This is a signed decimal type which offers a sign bit, 23 bits of integer precision and
/// 8 bits of decimal precision.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Fixed(i32);

const MUL: i32 = 256;

impl Fixed {
    /// The 0 [`Fixed`].
    pub const ZERO: Self = Self(0);

    /// Creates a [`Fixed`] from the raw bits that appear in the wire protocol.
    #[inline]
    pub const fn from_wire(val: i32) -> Self {
        Self(val)
    }

    /// Converts this [`Fixed`] to the bits that should be set in the wire protocol.
    #[inline]
    pub const fn to_wire(self) -> i32 {
        self.0
    }

    /// Creates a [`Fixed`] from an `i32`, saturating on overflow.
    ///
    /// This is how pixel coordinates arriving from the host (§6 INPT motion records) are
    /// turned into wire-protocol coordinates.
    #[inline]
    pub const fn from_i32_saturating(val: i32) -> Self {
        Self(val.saturating_mul(MUL))
    }
}

impl Debug for Fixed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&(self.0 as f64 / MUL as f64), f)
    }
}

impl Display for Fixed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&(self.0 as f64 / MUL as f64), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_scaling_to_fixed_point() {
        // S5: x=100 -> 25600, y=200 -> 51200
        assert_eq!(Fixed::from_i32_saturating(100).to_wire(), 25600);
        assert_eq!(Fixed::from_i32_saturating(200).to_wire(), 51200);
    }

    #[test]
    fn wire_round_trip() {
        let f = Fixed::from_wire(-12345);
        assert_eq!(Fixed::from_wire(f.to_wire()), f);
    }
}
