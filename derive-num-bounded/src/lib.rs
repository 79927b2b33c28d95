#![allow(unused_macros)]
#![allow(unused_imports)]

//! Macros for implementing bounded number types.
//!
//! A bounded number type is a newtype around a single number
//! that can only be constructed through a checked `new`.
//! Float bounds come from [`FloatBounds`],
//! and may exclude their endpoints.
//! Integer bounds come from [`num_traits::bounds::LowerBounded`].
//!
//! # Examples
//!
//! ```
//! use derive_num_bounded::{
//!     derive_float_bounds, derive_into_inner, derive_new_from_bounded_float,
//! };
//!
//! #[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
//! pub struct Rate<A>(A);
//!
//! derive_float_bounds!(Rate<A>, above 0.0, below 1.0);
//! derive_new_from_bounded_float!(Rate<A>);
//! derive_into_inner!(Rate<A>);
//!
//! impl<A: std::fmt::Display> std::fmt::Display for Rate<A> {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         self.0.fmt(f)
//!     }
//! }
//!
//! assert_eq!(Rate::new(0.5).unwrap().into_inner(), 0.5);
//! assert!(Rate::new(0.0).is_err());
//! assert!(Rate::new(1.0).is_err());
//! assert!(Rate::new(f64::NAN).is_err());
//! ```

use std::{fmt, ops::Bound};

pub use num_traits;
pub use paste;
pub use thiserror;

/// Bounds of a float newtype,
/// implemented by [`derive_float_bounds`].
pub trait FloatBounds<A> {
    /// Lower bound of valid values.
    fn lower_bound() -> Bound<A>;

    /// Upper bound of valid values.
    fn upper_bound() -> Bound<A>;
}

/// Implement [`FloatBounds`]
/// for a float newtype from literal bounds.
///
/// `above x` and `below x` exclude `x`.
/// `from x` and `to x` include `x`.
/// Without an upper bound,
/// values up to and including infinity are valid.
#[macro_export]
macro_rules! derive_float_bounds {
    ( $type:ident < $a:ident >, $lo_kind:ident $lo:literal ) => {
        impl<$a> $crate::FloatBounds<$a> for $type<$a>
        where
            $a: $crate::num_traits::Float,
        {
            fn lower_bound() -> ::std::ops::Bound<$a> {
                $crate::_float_bound!($a, $lo_kind, $lo)
            }

            fn upper_bound() -> ::std::ops::Bound<$a> {
                ::std::ops::Bound::Unbounded
            }
        }
    };
    ( $type:ident < $a:ident >, $lo_kind:ident $lo:literal, $hi_kind:ident $hi:literal ) => {
        impl<$a> $crate::FloatBounds<$a> for $type<$a>
        where
            $a: $crate::num_traits::Float,
        {
            fn lower_bound() -> ::std::ops::Bound<$a> {
                $crate::_float_bound!($a, $lo_kind, $lo)
            }

            fn upper_bound() -> ::std::ops::Bound<$a> {
                $crate::_float_bound!($a, $hi_kind, $hi)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! _float_bound {
    ( $a:ident, from, $value:literal ) => {
        ::std::ops::Bound::Included($crate::float_from_f64::<$a>($value))
    };
    ( $a:ident, to, $value:literal ) => {
        ::std::ops::Bound::Included($crate::float_from_f64::<$a>($value))
    };
    ( $a:ident, above, $value:literal ) => {
        ::std::ops::Bound::Excluded($crate::float_from_f64::<$a>($value))
    };
    ( $a:ident, below, $value:literal ) => {
        ::std::ops::Bound::Excluded($crate::float_from_f64::<$a>($value))
    };
}

/// Convert a literal bound into `A`.
///
/// Every `f64` literal is representable,
/// possibly with rounding,
/// by any float type,
/// so this only falls back to NaN
/// for float types unable to represent finite values.
#[doc(hidden)]
pub fn float_from_f64<A>(x: f64) -> A
where
    A: num_traits::Float,
{
    num_traits::cast::<f64, A>(x).unwrap_or_else(A::nan)
}

/// Return whether `value` is below `bound`,
/// as a lower bound.
#[doc(hidden)]
pub fn is_below<A>(value: A, bound: Bound<A>) -> bool
where
    A: PartialOrd,
{
    match bound {
        Bound::Included(x) => value < x,
        Bound::Excluded(x) => value <= x,
        Bound::Unbounded => false,
    }
}

/// Return whether `value` is above `bound`,
/// as an upper bound.
#[doc(hidden)]
pub fn is_above<A>(value: A, bound: Bound<A>) -> bool
where
    A: PartialOrd,
{
    match bound {
        Bound::Included(x) => value > x,
        Bound::Excluded(x) => value >= x,
        Bound::Unbounded => false,
    }
}

/// Displays a lower bound as a constraint,
/// like `> 0`.
#[doc(hidden)]
#[derive(Clone, Copy, Debug)]
pub struct LowerConstraint<A>(pub Bound<A>);

impl<A> fmt::Display for LowerConstraint<A>
where
    A: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Bound::Included(x) => write!(f, ">= {x}"),
            Bound::Excluded(x) => write!(f, "> {x}"),
            Bound::Unbounded => write!(f, "anything"),
        }
    }
}

/// Displays an upper bound as a constraint,
/// like `< 1`.
#[doc(hidden)]
#[derive(Clone, Copy, Debug)]
pub struct UpperConstraint<A>(pub Bound<A>);

impl<A> fmt::Display for UpperConstraint<A>
where
    A: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Bound::Included(x) => write!(f, "<= {x}"),
            Bound::Excluded(x) => write!(f, "< {x}"),
            Bound::Unbounded => write!(f, "anything"),
        }
    }
}

/// Implement a checked `new`
/// for a float newtype bounded from below and above.
///
/// The generated error is named `Invalid<Type>Error`.
#[macro_export]
macro_rules! derive_new_from_bounded_float {
    ( $type:ident < $a:ident > ) => {
        $crate::paste::paste! {
            #[doc = "Error returned when '" $type "' is given an invalid value."]
            #[derive(Clone, Copy, Debug, $crate::thiserror::Error, PartialEq)]
            pub enum [<Invalid $type Error>]<$a: $crate::num_traits::Float> {
                /// Value is NaN.
                #[error("{0} is NaN")]
                IsNan($a),
                /// Value is below lower bound.
                #[error(
                    "{0} is too low, must be {}",
                    $crate::LowerConstraint(<$type<$a> as $crate::FloatBounds<$a>>::lower_bound())
                )]
                TooLow($a),
                /// Value is above upper bound.
                #[error(
                    "{0} is too high, must be {}",
                    $crate::UpperConstraint(<$type<$a> as $crate::FloatBounds<$a>>::upper_bound())
                )]
                TooHigh($a),
            }

            impl<$a: $crate::num_traits::Float> $type<$a> {
                #[doc = "Return a new '" $type "' if given a valid value."]
                pub fn new(value: $a) -> Result<Self, [<Invalid $type Error>]<$a>> {
                    if value.is_nan() {
                        Err([<Invalid $type Error>]::IsNan(value))
                    } else if $crate::is_below(
                        value,
                        <Self as $crate::FloatBounds<$a>>::lower_bound(),
                    ) {
                        Err([<Invalid $type Error>]::TooLow(value))
                    } else if $crate::is_above(
                        value,
                        <Self as $crate::FloatBounds<$a>>::upper_bound(),
                    ) {
                        Err([<Invalid $type Error>]::TooHigh(value))
                    } else {
                        Ok(Self(value))
                    }
                }
            }
        }
    };
}

/// Implement a checked `new`
/// for a float newtype bounded only from below.
///
/// Infinity is accepted.
/// The generated error is named `Invalid<Type>Error`.
#[macro_export]
macro_rules! derive_new_from_lower_bounded_float {
    ( $type:ident < $a:ident > ) => {
        $crate::paste::paste! {
            #[doc = "Error returned when '" $type "' is given an invalid value."]
            #[derive(Clone, Copy, Debug, $crate::thiserror::Error, PartialEq)]
            pub enum [<Invalid $type Error>]<$a: $crate::num_traits::Float> {
                /// Value is NaN.
                #[error("{0} is NaN")]
                IsNan($a),
                /// Value is below lower bound.
                #[error(
                    "{0} is too low, must be {}",
                    $crate::LowerConstraint(<$type<$a> as $crate::FloatBounds<$a>>::lower_bound())
                )]
                TooLow($a),
            }

            impl<$a: $crate::num_traits::Float> $type<$a> {
                #[doc = "Return a new '" $type "' if given a valid value."]
                pub fn new(value: $a) -> Result<Self, [<Invalid $type Error>]<$a>> {
                    if value.is_nan() {
                        Err([<Invalid $type Error>]::IsNan(value))
                    } else if $crate::is_below(
                        value,
                        <Self as $crate::FloatBounds<$a>>::lower_bound(),
                    ) {
                        Err([<Invalid $type Error>]::TooLow(value))
                    } else {
                        Ok(Self(value))
                    }
                }
            }
        }
    };
}

/// Implement a checked `new`
/// for an integer newtype bounded only from below.
///
/// The generated error is named `Invalid<Type>Error`.
#[macro_export]
macro_rules! derive_new_from_lower_bounded {
    ( $type:ident ( $inner:ty ) ) => {
        $crate::paste::paste! {
            #[doc = "Error returned when '" $type "' is given an invalid value."]
            #[derive(Clone, Copy, Debug, $crate::thiserror::Error, PartialEq, Eq)]
            pub enum [<Invalid $type Error>] {
                /// Value is below lower bound.
                #[error(
                    "{0} is below lower bound ({})",
                    <$type as $crate::num_traits::bounds::LowerBounded>::min_value()
                )]
                TooLow($inner),
            }

            impl $type {
                #[doc = "Return a new '" $type "' if given a valid value."]
                pub fn new(value: $inner) -> Result<Self, [<Invalid $type Error>]> {
                    if value < <Self as $crate::num_traits::bounds::LowerBounded>::min_value().0 {
                        Err([<Invalid $type Error>]::TooLow(value))
                    } else {
                        Ok(Self(value))
                    }
                }
            }
        }
    };
}

/// Implement `into_inner`,
/// unwrapping a newtype into its inner value.
#[macro_export]
macro_rules! derive_into_inner {
    ( $type:ident ( $inner:ty ) ) => {
        $crate::paste::paste! {
            impl $type {
                #[doc = "Unwrap '" $type "' into inner value."]
                pub fn into_inner(self) -> $inner {
                    self.0
                }
            }
        }
    };
    ( $type:ident < $a:ident > ) => {
        $crate::paste::paste! {
            impl<$a> $type<$a> {
                #[doc = "Unwrap '" $type "' into inner value."]
                pub fn into_inner(self) -> $a {
                    self.0
                }
            }
        }
    };
}
