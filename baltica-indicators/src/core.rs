//! The streaming indicator abstraction.

/// A stateful computation fed one observation value at a time.
///
/// `next` returns `None` while the indicator has not yet produced a value
/// for the current position (e.g. a rolling std still filling its window).
pub trait Indicator {
    /// Value produced once the indicator is ready.
    type Output;

    /// Feeds the next value in series order.
    fn next(&mut self, value: f64) -> Option<Self::Output>;

    /// Clears all internal state so the indicator can be reused.
    fn reset(&mut self);
}
