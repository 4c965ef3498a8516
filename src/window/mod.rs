//! The windowing seam of the engine.
//!
//! A `Window` owns the native surface and hands out the graphics device drawing
//! into it. The engine loop polls its events and swaps its buffers once per
//! tick.

pub mod backends;
pub mod events;

pub use self::backends::headless::HeadlessWindow;
#[cfg(feature = "glutin")]
pub use self::backends::glutin::GlutinWindow;
pub use self::events::WindowEvent;

use crate::errors::*;
use crate::math::Vector2;
use crate::video::GraphicsDevice;

pub trait Window {
    /// Creates the graphics device drawing into this window. Windows hold one
    /// native context, so this can only succeed once.
    fn create_device(&mut self) -> Result<GraphicsDevice>;

    /// Returns the size in *pixels* of the client area of the window.
    fn dimensions(&self) -> Vector2<u32>;

    fn swap_buffers(&mut self) -> Result<()>;

    /// Appends the events received since the last poll to `events`.
    fn poll_events(&mut self, events: &mut Vec<WindowEvent>);
}
