use std::ops::{Add, Mul, Sub};

use nalgebra::{UnitQuaternion, Vector2, Vector3, Vector4};

use crate::knot::Knot;

/// View of the knots surrounding an interior query: the bracketing pair plus
/// the outer neighbours when they exist. `left.get_time() <= t < right.get_time()`
/// holds for the query time `t` that produced the segment.
pub struct Segment<'a, T> {
    pub prev: Option<&'a Knot<T>>,
    pub left: &'a Knot<T>,
    pub right: &'a Knot<T>,
    pub next: Option<&'a Knot<T>>,
}

/// Interpolation policy of a value type stored in a [Spline](crate::Spline).
///
/// The policy is selected by the value type at compile time. Built-in
/// implementations cover:
/// - `f64` and nalgebra vectors - Catmull-Rom cubic interpolation,
/// - [UnitQuaternion<f64>] - spherical linear interpolation,
/// - `bool` - step behaviour, the value changes only at knot times.
///
/// Additional vector-space value types can opt into the cubic policy with
/// [impl_cubic_interpolate](crate::impl_cubic_interpolate), or implement the
/// trait directly, typically on top of [cubic_unit_spline].
pub trait Interpolate: Clone {
    /// Result of querying a spline with no knots.
    fn no_value() -> Self;

    /// Evaluates between the bracketing pair at local parameter `u` in [0, 1).
    fn at_segment(segment: &Segment<'_, Self>, u: f64) -> Self;
}

/// Evaluates the Hermite cubic over the unit interval given endpoint values
/// and endpoint tangents. Tangents are expressed in units of the local
/// parameter `u`, i.e. already scaled by the interval length.
///
/// This is the reusable primitive behind the default cubic policy; it is
/// independent of how the tangents were derived, so callers needing a
/// different tangent rule can supply their own.
/// # Example
/// ```
/// use keyframe_spline::cubic_unit_spline;
/// use assert_approx_eq::assert_approx_eq;
///
/// // endpoints with zero tangents ease in and out
/// assert_approx_eq!(0.5, cubic_unit_spline(0.5, 0.0, 1.0, 0.0, 0.0), 1e-6);
/// assert_approx_eq!(0.0, cubic_unit_spline(0.0, 0.0, 1.0, 0.0, 0.0), 1e-6);
/// assert_approx_eq!(1.0, cubic_unit_spline(1.0, 0.0, 1.0, 0.0, 0.0), 1e-6);
/// ```
pub fn cubic_unit_spline<T>(u: f64, position0: T, position1: T, tangent0: T, tangent1: T) -> T
where
    T: Add<Output = T> + Mul<f64, Output = T>,
{
    let u2 = u * u;
    let u3 = u2 * u;

    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;

    position0 * h00 + tangent0 * h10 + position1 * h01 + tangent1 * h11
}

/// Catmull-Rom evaluation of a segment: endpoint tangents are finite
/// differences of the neighbouring knots, scaled to the interval, then fed
/// to [cubic_unit_spline]. A knot without an outer neighbour falls back to
/// the one-sided difference over the bracketing interval, which keeps the
/// curve exactly linear for collinear, uniformly spaced knots.
pub fn catmull_rom<T>(segment: &Segment<'_, T>, u: f64) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<f64, Output = T>,
{
    let t1 = segment.left.get_time();
    let t2 = segment.right.get_time();
    let dt = t2 - t1;
    let v1 = *segment.left.get_value();
    let v2 = *segment.right.get_value();

    let tangent0 = match segment.prev {
        Some(prev) => (v2 - *prev.get_value()) * (dt / (t2 - prev.get_time())),
        None => v2 - v1,
    };
    let tangent1 = match segment.next {
        Some(next) => (*next.get_value() - v1) * (dt / (next.get_time() - t1)),
        None => v2 - v1,
    };

    cubic_unit_spline(u, v1, v2, tangent0, tangent1)
}

/// Implements the default cubic [Interpolate] policy for vector-space value
/// types, given the type and its no-value result.
/// # Example
/// ```
/// use keyframe_spline::{impl_cubic_interpolate, Spline};
///
/// #[derive(Clone, Copy)]
/// struct Celsius(f64);
///
/// impl std::ops::Add for Celsius {
///     type Output = Celsius;
///     fn add(self, rhs: Celsius) -> Celsius { Celsius(self.0 + rhs.0) }
/// }
/// impl std::ops::Sub for Celsius {
///     type Output = Celsius;
///     fn sub(self, rhs: Celsius) -> Celsius { Celsius(self.0 - rhs.0) }
/// }
/// impl std::ops::Mul<f64> for Celsius {
///     type Output = Celsius;
///     fn mul(self, rhs: f64) -> Celsius { Celsius(self.0 * rhs) }
/// }
///
/// impl_cubic_interpolate!(Celsius => Celsius(0.0));
///
/// let mut temperature = Spline::new();
/// temperature.set(0.0, Celsius(20.0));
/// ```
#[macro_export]
macro_rules! impl_cubic_interpolate {
    ($($type:ty => $no_value:expr),* $(,)?) => {$(
        impl $crate::Interpolate for $type {
            fn no_value() -> Self {
                $no_value
            }

            fn at_segment(segment: &$crate::Segment<'_, Self>, u: f64) -> Self {
                $crate::catmull_rom(segment, u)
            }
        }
    )*};
}

impl_cubic_interpolate!(
    f64 => 0.0,
    Vector2<f64> => Vector2::zeros(),
    Vector3<f64> => Vector3::zeros(),
    Vector4<f64> => Vector4::zeros(),
);

impl Interpolate for UnitQuaternion<f64> {
    fn no_value() -> Self {
        UnitQuaternion::identity()
    }

    fn at_segment(segment: &Segment<'_, Self>, u: f64) -> Self {
        let left = segment.left.get_value();
        let right = segment.right.get_value();
        // slerp is undefined for antipodal pairs; hold the earlier knot there
        // to keep the query total
        left.try_slerp(right, u, 1.0e-9).unwrap_or(*left)
    }
}

impl Interpolate for bool {
    fn no_value() -> Self {
        false
    }

    fn at_segment(segment: &Segment<'_, Self>, _u: f64) -> Self {
        *segment.left.get_value()
    }
}
