use crate::interpolate::{Interpolate, Segment};
use crate::knot::Knot;

/// Single-channel spline: an ordered mapping from time to value together with
/// the interpolation policy of the value type.
///
/// Knots are kept sorted ascending by time with unique times; setting a value
/// at an existing time overwrites it. Queries outside the keyed range hold the
/// nearest knot's value, so [Spline::at] is total.
/// # Example
/// ```
/// use keyframe_spline::Spline;
/// use assert_approx_eq::assert_approx_eq;
///
/// let mut height = Spline::new();
/// height.set(0.0, 0.0);
/// height.set(1.0, 1.0);
/// height.set(2.0, 2.0);
///
/// assert_approx_eq!(0.5, height.at(0.5), 1e-6);
/// assert_approx_eq!(2.0, height.at(5.0), 1e-6);
/// ```
pub struct Spline<T> {
    knots: Vec<Knot<T>>,
}

impl<T: Interpolate> Spline<T> {
    /// Creates an empty spline.
    pub fn new() -> Self {
        Spline { knots: Vec::new() }
    }

    /// Sets the value of the spline at `time`, creating a new knot if
    /// necessary. Overwriting an existing time discards the previous value.
    pub fn set(&mut self, time: f64, value: T) {
        match self.find(time) {
            Ok(index) => self.knots[index] = Knot::new(time, value),
            Err(index) => self.knots.insert(index, Knot::new(time, value)),
        }
    }

    /// Removes the knot at exactly `time`; no-op when no such knot exists.
    pub fn erase(&mut self, time: f64) {
        if let Ok(index) = self.find(time) {
            self.knots.remove(index);
        }
    }

    /// Checks if `time` is a knot.
    pub fn has(&self, time: f64) -> bool {
        self.find(time).is_ok()
    }

    /// Checks if there are any knots.
    pub fn any(&self) -> bool {
        !self.knots.is_empty()
    }

    /// Removes all knots.
    pub fn clear(&mut self) {
        self.knots.clear();
    }

    /// Removes every knot with time greater than or equal to `time`, keeping
    /// strictly earlier knots.
    pub fn crop(&mut self, time: f64) {
        let keep = self.knots.partition_point(|knot| knot.get_time() < time);
        self.knots.truncate(keep);
    }

    /// Returns all knot times, ascending.
    pub fn keys(&self) -> Vec<f64> {
        self.knots.iter().map(|knot| knot.get_time()).collect()
    }

    /// Returns the interpolated value at `time`.
    ///
    /// - no knots: the policy's no-value result,
    /// - one knot: that knot's value for every query time,
    /// - before the first knot / after the last knot: the nearest knot's value,
    /// - otherwise: the bracketing pair is located and the value type's
    ///   [Interpolate] policy is evaluated at the local parameter.
    pub fn at(&self, time: f64) -> T {
        match self.knots.as_slice() {
            [] => T::no_value(),
            [only] => only.get_value().clone(),
            [first, ..] if time <= first.get_time() => first.get_value().clone(),
            [.., last] if time >= last.get_time() => last.get_value().clone(),
            knots => {
                // first knot strictly after `time`; in range [1, len - 1] for
                // any ordered query time, clamped to stay total for NaN
                let right = knots
                    .partition_point(|knot| knot.get_time() <= time)
                    .clamp(1, knots.len() - 1);
                let left = right - 1;

                let segment = Segment {
                    prev: knots[..left].last(),
                    left: &knots[left],
                    right: &knots[right],
                    next: knots.get(right + 1),
                };

                let u = (time - knots[left].get_time())
                    / (knots[right].get_time() - knots[left].get_time());
                T::at_segment(&segment, u)
            }
        }
    }

    fn find(&self, time: f64) -> Result<usize, usize> {
        self.knots
            .binary_search_by(|knot| knot.get_time().total_cmp(&time))
    }
}

impl<T: Interpolate> Default for Spline<T> {
    fn default() -> Self {
        Spline::new()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::{UnitQuaternion, Vector3};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;

    #[test]
    fn empty_spline() {
        let spline: Spline<f64> = Spline::new();

        assert!(!spline.any());
        assert!(!spline.has(0.0));
        assert!(spline.keys().is_empty());
        assert_eq!(0.0, spline.at(0.0));
        assert_eq!(0.0, spline.at(-10.0));
    }

    #[test]
    fn single_knot_holds_everywhere() {
        let mut spline = Spline::new();
        spline.set(1.0, 4.0);

        assert_eq!(4.0, spline.at(-100.0));
        assert_eq!(4.0, spline.at(1.0));
        assert_eq!(4.0, spline.at(100.0));
    }

    #[test]
    fn hold_first_and_hold_last() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(3.0, 6.0);

        assert_eq!(2.0, spline.at(0.0));
        assert_eq!(2.0, spline.at(1.0));
        assert_eq!(6.0, spline.at(3.0));
        assert_eq!(6.0, spline.at(10.0));
    }

    #[test]
    fn set_keeps_knots_sorted() {
        let mut spline = Spline::new();
        spline.set(2.0, 0.0);
        spline.set(0.0, 0.0);
        spline.set(1.0, 0.0);

        assert_eq!(vec![0.0, 1.0, 2.0], spline.keys());
    }

    #[test]
    fn set_overwrite_is_last_write_wins() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(1.0, 5.0);

        assert!(spline.has(1.0));
        assert_eq!(vec![1.0], spline.keys());
        assert_eq!(5.0, spline.at(1.0));
    }

    #[test]
    fn set_is_idempotent() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(2.0, 3.0);
        spline.set(1.0, 2.0);

        assert_eq!(vec![1.0, 2.0], spline.keys());
        assert_eq!(2.0, spline.at(1.0));
    }

    #[test]
    fn erase_is_exact_match() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(2.0, 3.0);

        // close but not exact, nothing removed
        spline.erase(1.0001);
        assert_eq!(vec![1.0, 2.0], spline.keys());

        spline.erase(1.0);
        assert_eq!(vec![2.0], spline.keys());

        // erasing an absent time again is a no-op
        spline.erase(1.0);
        assert_eq!(vec![2.0], spline.keys());
    }

    #[test]
    fn clear_removes_all_knots() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(2.0, 3.0);

        spline.clear();

        assert!(!spline.any());
        assert_eq!(0.0, spline.at(1.0));
    }

    #[test]
    fn crop_keeps_strictly_earlier_knots() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(2.0, 3.0);
        spline.set(3.0, 4.0);

        spline.crop(2.0);

        assert_eq!(vec![1.0], spline.keys());
    }

    #[test]
    fn crop_below_minimum_empties_spline() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(2.0, 3.0);

        spline.crop(0.5);

        assert!(!spline.any());
    }

    #[test]
    fn crop_above_maximum_is_noop() {
        let mut spline = Spline::new();
        spline.set(1.0, 2.0);
        spline.set(2.0, 3.0);

        spline.crop(5.0);

        assert_eq!(vec![1.0, 2.0], spline.keys());
    }

    #[test]
    fn cubic_passes_through_knots() {
        let eps = 1e-6;

        let mut spline = Spline::new();
        spline.set(0.0, 4.0);
        spline.set(1.0, 2.0);
        spline.set(2.0, 6.0);

        assert_approx_eq!(4.0, spline.at(0.0), eps);
        assert_approx_eq!(2.0, spline.at(1.0), eps);
        assert_approx_eq!(6.0, spline.at(2.0), eps);
    }

    #[test]
    fn cubic_over_collinear_knots_is_linear() {
        let eps = 1e-6;

        let mut spline = Spline::new();
        spline.set(0.0, 0.0);
        spline.set(1.0, 1.0);
        spline.set(2.0, 2.0);

        for i in 0..=20 {
            let time = 0.1 * i as f64;
            assert_approx_eq!(time, spline.at(time), eps);
        }
    }

    #[test]
    fn cubic_interior_values() {
        let eps = 1e-6;

        let mut spline = Spline::new();
        spline.set(0.0, 4.0);
        spline.set(1.0, 2.0);
        spline.set(2.0, 6.0);

        // first segment: one-sided tangent at t=0, neighbour tangent at t=1
        assert_approx_eq!(2.625, spline.at(0.5), eps);
        // last segment: neighbour tangent at t=1, one-sided tangent at t=2
        assert_approx_eq!(3.625, spline.at(1.5), eps);
    }

    #[test]
    fn cubic_over_vectors() {
        let eps = 1e-6;

        let mut position = Spline::new();
        position.set(0.0, Vector3::new(0.0, 0.0, 0.0));
        position.set(1.0, Vector3::new(1.0, 2.0, -1.0));
        position.set(2.0, Vector3::new(2.0, 4.0, -2.0));

        let result = position.at(0.5);

        assert_approx_eq!(0.5, result.x, eps);
        assert_approx_eq!(1.0, result.y, eps);
        assert_approx_eq!(-0.5, result.z, eps);
    }

    #[test]
    fn step_spline_holds_left_knot() {
        let mut visible = Spline::new();
        visible.set(1.0, true);
        visible.set(3.0, false);

        assert!(visible.at(0.0));
        assert!(visible.at(1.0));
        assert!(visible.at(2.0));
        assert!(!visible.at(3.0));
        assert!(!visible.at(10.0));
    }

    #[test]
    fn empty_step_spline_is_false() {
        let visible: Spline<bool> = Spline::new();

        assert!(!visible.at(0.0));
    }

    #[test]
    fn empty_rotation_spline_is_identity() {
        let rotation: Spline<UnitQuaternion<f64>> = Spline::new();

        assert_eq!(UnitQuaternion::identity(), rotation.at(0.0));
    }

    #[test]
    fn rotation_spline_slerps_between_knots() {
        let eps = 1e-6;

        let mut rotation = Spline::new();
        rotation.set(0.0, UnitQuaternion::identity());
        rotation.set(2.0, UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2));

        let halfway = rotation.at(1.0);

        assert_approx_eq!(FRAC_PI_4, halfway.angle(), eps);
        let axis = halfway.axis().unwrap();
        assert_approx_eq!(1.0, axis.z, eps);
    }

    #[test]
    fn rotation_spline_identical_knots_do_not_drift() {
        let orientation = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.3);

        let mut rotation = Spline::new();
        rotation.set(1.0, orientation);
        rotation.set(3.0, orientation);

        assert!(rotation.at(1.5).angle_to(&orientation) < 1e-9);
        assert!(rotation.at(2.0).angle_to(&orientation) < 1e-9);
        assert!(rotation.at(2.999).angle_to(&orientation) < 1e-9);
    }

    #[test]
    fn rotation_spline_holds_boundaries() {
        let first = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.5);
        let last = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 1.0);

        let mut rotation = Spline::new();
        rotation.set(1.0, first);
        rotation.set(2.0, last);

        assert!(rotation.at(-1.0).angle_to(&first) < 1e-9);
        assert!(rotation.at(5.0).angle_to(&last) < 1e-9);
    }

    #[ignore]
    #[test]
    fn perfomance() {
        use rand::Rng;
        use std::time::Instant;

        let time_min = 0.0;
        let time_max = 6.0;
        let mut rng = rand::thread_rng();

        let mut spline = Spline::new();

        let knots_number = 30;
        let knot_step = (time_max - time_min) / knots_number as f64;

        for i in 0..=knots_number {
            let time = time_min + knot_step * i as f64;
            let value = rng.gen_range(0.0..10.0);
            spline.set(time, value);
        }

        let number_of_points = 300;
        let step = (time_max - time_min) / number_of_points as f64;

        let mut time_vector = Vec::new();
        for i in 0..=number_of_points {
            time_vector.push(time_min + step * i as f64);
        }

        let now = Instant::now();
        for time in time_vector.iter() {
            assert!(spline.at(*time) >= -10.0);
        }
        let elapsed = now.elapsed();
        println!("at time: {:.2?}", elapsed);
    }
}
