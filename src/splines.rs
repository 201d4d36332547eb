use crate::interpolate::Interpolate;
use crate::spline::Spline;

/// Multi-channel spline: an ordered composition of single-channel splines
/// over possibly different value types, addressed as one time-keyed unit.
///
/// `T` is a tuple of value types, one per channel; mutation broadcasts to
/// every channel and [Splines::at] returns the tuple of per-channel results.
/// Each channel keeps its own knot set, so channels may be keyed at different
/// times; a query resolves every channel independently.
/// # Example
/// ```
/// use keyframe_spline::Splines;
/// use assert_approx_eq::assert_approx_eq;
///
/// let mut channels: Splines<(f64, bool)> = Splines::new();
/// channels.set(0.0, (1.0, true));
/// channels.set(2.0, (3.0, false));
///
/// let (height, visible) = channels.at(1.0);
/// assert_approx_eq!(2.0, height, 1e-6);
/// assert!(visible);
/// ```
pub struct Splines<T: SplineTuple> {
    channels: T::Channels,
}

impl<T: SplineTuple> Splines<T> {
    /// Creates a composition with every channel empty.
    pub fn new() -> Self {
        Splines {
            channels: T::Channels::default(),
        }
    }

    /// Sets a knot at `time` on every channel from the positional `values`.
    pub fn set(&mut self, time: f64, values: T) {
        T::set(&mut self.channels, time, values);
    }

    /// Removes the knot at exactly `time` from every channel.
    pub fn erase(&mut self, time: f64) {
        T::erase(&mut self.channels, time);
    }

    /// Checks if any channel has a knot at exactly `time`.
    pub fn has(&self, time: f64) -> bool {
        T::has(&self.channels, time)
    }

    /// Checks if any channel has at least one knot.
    pub fn any(&self) -> bool {
        T::any(&self.channels)
    }

    /// Clears every channel.
    pub fn clear(&mut self) {
        T::clear(&mut self.channels);
    }

    /// Crops every channel at `time`.
    pub fn crop(&mut self, time: f64) {
        T::crop(&mut self.channels, time);
    }

    /// Returns the union of all channels' knot times, ascending, with
    /// duplicates collapsed.
    pub fn keys(&self) -> Vec<f64> {
        let mut keys = Vec::new();
        T::collect_keys(&self.channels, &mut keys);
        keys.sort_by(|a, b| a.total_cmp(b));
        keys.dedup();
        keys
    }

    /// Evaluates every channel at `time` and returns the tuple of results in
    /// channel order. Channels are resolved against their own knot sets only.
    pub fn at(&self, time: f64) -> T {
        T::at(&self.channels, time)
    }

    /// Borrows the underlying channel splines for per-channel access, e.g.
    /// inspecting a single channel's knots.
    pub fn channels(&self) -> &T::Channels {
        &self.channels
    }

    /// Mutably borrows the underlying channel splines, allowing a single
    /// channel to be keyed independently of the others.
    pub fn channels_mut(&mut self) -> &mut T::Channels {
        &mut self.channels
    }
}

impl<T: SplineTuple> Default for Splines<T> {
    fn default() -> Self {
        Splines::new()
    }
}

/// Tuple of value types usable as the channel set of a [Splines] composition.
/// Implemented for tuples of [Interpolate] types up to arity 8.
pub trait SplineTuple: Sized {
    /// Matching tuple of single-channel splines.
    type Channels: Default;

    fn set(channels: &mut Self::Channels, time: f64, values: Self);
    fn erase(channels: &mut Self::Channels, time: f64);
    fn has(channels: &Self::Channels, time: f64) -> bool;
    fn any(channels: &Self::Channels) -> bool;
    fn clear(channels: &mut Self::Channels);
    fn crop(channels: &mut Self::Channels, time: f64);
    fn collect_keys(channels: &Self::Channels, keys: &mut Vec<f64>);
    fn at(channels: &Self::Channels, time: f64) -> Self;
}

macro_rules! impl_spline_tuple {
    ($(($($name:ident : $index:tt),+))+) => {$(
        impl<$($name: Interpolate),+> SplineTuple for ($($name,)+) {
            type Channels = ($(Spline<$name>,)+);

            fn set(channels: &mut Self::Channels, time: f64, values: Self) {
                $(channels.$index.set(time, values.$index);)+
            }

            fn erase(channels: &mut Self::Channels, time: f64) {
                $(channels.$index.erase(time);)+
            }

            fn has(channels: &Self::Channels, time: f64) -> bool {
                false $(|| channels.$index.has(time))+
            }

            fn any(channels: &Self::Channels) -> bool {
                false $(|| channels.$index.any())+
            }

            fn clear(channels: &mut Self::Channels) {
                $(channels.$index.clear();)+
            }

            fn crop(channels: &mut Self::Channels, time: f64) {
                $(channels.$index.crop(time);)+
            }

            fn collect_keys(channels: &Self::Channels, keys: &mut Vec<f64>) {
                $(keys.extend(channels.$index.keys());)+
            }

            fn at(channels: &Self::Channels, time: f64) -> Self {
                ($(channels.$index.at(time),)+)
            }
        }
    )+};
}

impl_spline_tuple! {
    (T0: 0)
    (T0: 0, T1: 1)
    (T0: 0, T1: 1, T2: 2)
    (T0: 0, T1: 1, T2: 2, T3: 3)
    (T0: 0, T1: 1, T2: 2, T3: 3, T4: 4)
    (T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5)
    (T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6)
    (T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7)
}
