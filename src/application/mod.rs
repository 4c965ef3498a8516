//! The component-based game loop.
//!
//! `Engine` spawns a dedicated loop thread which creates the window, the
//! graphics device and the audio device, then ticks every `GameComponent` at a
//! fixed maximum rate:
//!
//! ```rust,ignore
//! struct Background;
//!
//! impl GameComponent for Background {
//!     fn draw(&mut self, ctx: &mut Context) -> Result<()> {
//!         ctx.video.clear_color(Color::cornflower_blue())?;
//!         Ok(())
//!     }
//! }
//!
//! let mut engine = Engine::headless(Settings::default())?;
//! engine.add_component(Background)?;
//! engine.stop()?;
//! ```
//!
//! Every tick applies pending additions (`init`), then pending removals
//! (`unload`), then updates and draws the remaining components before
//! swapping the buffers of the window.

pub mod errors;
pub mod settings;

mod component;
mod engine;
mod latch;
mod time;

pub use self::component::{ComponentHandle, Components, Context, GameComponent};
pub use self::engine::{Engine, EngineState, Platform};
pub use self::latch::StateLatch;
pub use self::settings::Settings;
pub use self::time::GameTime;

pub mod prelude {
    pub use super::errors::Error as ApplicationError;
    pub use super::settings::{AudioParams, EngineParams, Settings, VideoParams, WindowParams};
    pub use super::{
        ComponentHandle, Context, Engine, EngineState, GameComponent, GameTime, Platform,
    };
}
