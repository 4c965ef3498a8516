pub use crate::application::prelude::*;
pub use crate::audio::prelude::*;
pub use crate::errors::*;
pub use crate::math::Color;
pub use crate::video::prelude::*;
pub use crate::window::{HeadlessWindow, Window, WindowEvent};
