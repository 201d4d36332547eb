//! Library of keyframe splines: time-indexed containers that store discrete
//! control points of a value and reconstruct a continuous function of time by
//! interpolating between them.
//!
//! The interpolation policy is selected by the value type: arithmetic and
//! vector types get Catmull-Rom cubic interpolation, rotations
//! ([nalgebra::UnitQuaternion]) get spherical linear interpolation and `bool`
//! gets step behaviour. Queries outside the keyed range hold the nearest
//! knot's value, so evaluation never fails.
//!
//! # Example
//! ```
//! use keyframe_spline::{Spline, Splines};
//! use assert_approx_eq::assert_approx_eq;
//!
//! let mut height = Spline::new();
//! height.set(0.0, 0.0);
//! height.set(1.0, 1.0);
//! height.set(2.0, 2.0);
//!
//! assert_approx_eq!(0.5, height.at(0.5), 1e-6);
//! assert_approx_eq!(2.0, height.at(5.0), 1e-6);
//!
//! let mut channels: Splines<(f64, bool)> = Splines::new();
//! channels.set(0.0, (1.0, true));
//! channels.set(2.0, (3.0, false));
//!
//! let (value, visible) = channels.at(1.0);
//! assert_approx_eq!(2.0, value, 1e-6);
//! assert!(visible);
//! ```

mod interpolate;
mod knot;
mod spline;
mod splines;

pub use interpolate::{catmull_rom, cubic_unit_spline, Interpolate, Segment};
pub use knot::Knot;
pub use spline::Spline;
pub use splines::{SplineTuple, Splines};
