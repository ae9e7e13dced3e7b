use std::fmt::Debug;

use num_traits::{Num, NumCast, ToPrimitive};

/// A trait for types that can be used as quadtree coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Subdivision relies on the
/// midpoint never leaving the closed interval it was computed from, and on
/// [`successor`][QuadTreeNum::successor] stepping over the midpoint for integer types so that
/// sibling quadrants never share a representable coordinate.
pub trait QuadTreeNum:
    private::Sealed + Num + NumCast + ToPrimitive + PartialOrd + Copy + Debug + Send + Sync
{
    /// The midpoint of `low..=high`, rounded toward `low`.
    fn midpoint_down(low: Self, high: Self) -> Self;

    /// The midpoint of `low..=high`, rounded toward `high`.
    fn midpoint_up(low: Self, high: Self) -> Self;

    /// The smallest value greater than `self` for integer types. Identity for floats.
    fn successor(self) -> Self;

    /// The largest value less than `self` for integer types. Identity for floats.
    fn predecessor(self) -> Self;

    /// Lossy conversion used for distance computation and error reporting.
    fn as_f64(self) -> f64;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl QuadTreeNum for $t {
                #[inline]
                fn midpoint_down(low: Self, high: Self) -> Self {
                    // Widening keeps the sum from overflowing for every supported width
                    (low as i128 + high as i128).div_euclid(2) as $t
                }

                #[inline]
                fn midpoint_up(low: Self, high: Self) -> Self {
                    (low as i128 + high as i128 + 1).div_euclid(2) as $t
                }

                #[inline]
                fn successor(self) -> Self {
                    self.saturating_add(1)
                }

                #[inline]
                fn predecessor(self) -> Self {
                    self.saturating_sub(1)
                }

                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

macro_rules! impl_float {
    ($($t:ty),*) => {
        $(
            impl QuadTreeNum for $t {
                #[inline]
                fn midpoint_down(low: Self, high: Self) -> Self {
                    low / 2.0 + high / 2.0
                }

                #[inline]
                fn midpoint_up(low: Self, high: Self) -> Self {
                    low / 2.0 + high / 2.0
                }

                #[inline]
                fn successor(self) -> Self {
                    self
                }

                #[inline]
                fn predecessor(self) -> Self {
                    self
                }

                #[inline]
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_integer!(i8, u8, i16, u16, i32, u32, i64, u64);
impl_float!(f32, f64);

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for i64 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
