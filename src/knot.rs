/// Knot represents a single control point of a spline: a value sampled at a
/// point in time.
/// - `time` - coordinate on the time axis, the unique key of the knot,
/// - `value` - sampled value held by the knot.
pub struct Knot<T> {
    time: f64,
    value: T,
}

impl<T> Knot<T> {
    /// Creates [Knot] at given `time` holding `value`.
    /// # Example
    /// ```
    /// use keyframe_spline::Knot;
    ///
    /// let knot = Knot::new(1.0, 2.5);
    /// assert_eq!(1.0, knot.get_time());
    /// assert_eq!(2.5, *knot.get_value());
    /// ```
    pub fn new(time: f64, value: T) -> Self {
        Knot { time, value }
    }

    pub fn get_time(&self) -> f64 {
        self.time
    }

    pub fn get_value(&self) -> &T {
        &self.value
    }
}

impl<T> Ord for Knot<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.time.total_cmp(&other.time)
    }
}

impl<T> PartialOrd for Knot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Knot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time
    }
}

impl<T> Eq for Knot<T> {}
