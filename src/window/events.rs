use crate::math::Vector2;

/// The events a window reports to the engine loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// The user asked to close the window.
    Closed,
    /// The size in *points* of the client area has changed.
    Resized(Vector2<u32>),
    GainFocus,
    LostFocus,
}
