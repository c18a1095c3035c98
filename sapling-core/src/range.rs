//! Size-dependent bounds for numeric generation.

use crate::data::Size;
use crate::error::GenError;
use num_traits::{NumCast, PrimInt};
use std::rc::Rc;

/// Inclusive bounds that may depend on the size parameter, plus an origin
/// value that shrinking converges toward.
pub struct Range<T> {
    origin: T,
    bounds: Rc<dyn Fn(Size) -> (T, T)>,
}

impl<T: Copy> Clone for Range<T> {
    fn clone(&self) -> Self {
        Range {
            origin: self.origin,
            bounds: Rc::clone(&self.bounds),
        }
    }
}

impl<T: Copy + 'static> Range<T> {
    /// Create a range from an origin and a bounds function.
    pub fn new<F>(origin: T, bounds: F) -> Self
    where
        F: Fn(Size) -> (T, T) + 'static,
    {
        Range {
            origin,
            bounds: Rc::new(bounds),
        }
    }

    /// The value shrinking converges toward.
    pub fn origin(&self) -> T {
        self.origin
    }

    /// The inclusive bounds to draw from at the given size.
    pub fn bounds(&self, size: Size) -> (T, T) {
        (*self.bounds)(size)
    }

    /// A range holding a single value, regardless of size.
    pub fn singleton(value: T) -> Self {
        Range::new(value, move |_| (value, value))
    }

    /// Size-independent bounds, shrinking toward the lower one.
    pub fn constant(lower: T, upper: T) -> Self {
        Range::constant_from(lower, lower, upper)
    }

    /// Size-independent bounds with an explicit shrink origin.
    pub fn constant_from(origin: T, lower: T, upper: T) -> Self {
        Range::new(origin, move |_| (lower, upper))
    }

    /// Convert origin and bounds into another numeric domain.
    pub fn map<U, F>(self, f: F) -> Range<U>
    where
        U: Copy + 'static,
        F: Fn(T) -> U + 'static,
    {
        let origin = f(self.origin);
        let bounds = self.bounds;
        Range {
            origin,
            bounds: Rc::new(move |size| {
                let (lower, upper) = (*bounds)(size);
                (f(lower), f(upper))
            }),
        }
    }
}

impl<T: PrimInt + NumCast + 'static> Range<T> {
    /// Bounds that grow linearly from the lower bound as size goes 0 to 99.
    pub fn linear(lower: T, upper: T) -> Self {
        Range::linear_from(lower, lower, upper)
    }

    /// Bounds that spread linearly outward from the origin as size grows,
    /// reaching `lower`/`upper` at size 99.
    pub fn linear_from(origin: T, lower: T, upper: T) -> Self {
        let origin_wide = to_i128(origin);
        let lower_wide = to_i128(lower);
        let upper_wide = to_i128(upper);
        Range::new(origin, move |size| {
            (
                from_i128(scale_linear(size, origin_wide, lower_wide)),
                from_i128(scale_linear(size, origin_wide, upper_wide)),
            )
        })
    }
}

impl Range<f64> {
    /// Floating analog of [`Range::linear`].
    pub fn linear_f64(lower: f64, upper: f64) -> Self {
        Range::linear_from_f64(lower, lower, upper)
    }

    /// Floating analog of [`Range::linear_from`].
    pub fn linear_from_f64(origin: f64, lower: f64, upper: f64) -> Self {
        Range::new(origin, move |size| {
            let factor = size.get().min(99) as f64 / 99.0;
            (
                origin + (lower - origin) * factor,
                origin + (upper - origin) * factor,
            )
        })
    }
}

/// Interpolate from `origin` toward `bound`, with size 99 reaching the bound.
fn scale_linear(size: Size, origin: i128, bound: i128) -> i128 {
    let sz = size.get().min(99) as i128;
    origin + (bound - origin) * sz / 99
}

pub(crate) fn to_i128<T: NumCast>(value: T) -> i128 {
    match num_traits::cast(value) {
        Some(wide) => wide,
        None => panic!("{}", GenError::internal("integral value does not fit in i128")),
    }
}

pub(crate) fn from_i128<T: NumCast>(value: i128) -> T {
    match num_traits::cast(value) {
        Some(narrow) => narrow,
        None => panic!(
            "{}",
            GenError::internal("value does not fit the target integer width")
        ),
    }
}
