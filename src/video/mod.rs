//! The graphics device layer.
//!
//! A `GraphicsDevice` owns a native context and every texture, sampler, buffer,
//! shader and state created in it. Objects are named by handles which carry the
//! id of their device, so a handle used with the wrong device, or after its
//! object was deleted, is rejected before any native call is made.
//!
//! Everything that issues native calls lives on the `ContextGuard` returned by
//! `GraphicsDevice::make_current`:
//!
//! ```rust,ignore
//! let mut video = device.make_current()?;
//!
//! let shader = video.create_shader(ShaderParams::default(), VS, FS)?;
//! let vb = video.create_vertex_buffer_with_data(description, &vertices, BufferUsage::Static)?;
//!
//! video.clear_color(Color::cornflower_blue())?;
//! video.set_shader(shader)?;
//! video.set_vertex_buffer(vb)?;
//! video.draw()?;
//! ```
//!
//! State setters are cheap. They are only pushed to the native context by the
//! next draw call, and only where they differ from what was pushed before.

pub mod assets;
pub mod backends;
pub mod errors;

mod device;
mod guard;
mod render_context;
mod resources;
mod states;

pub use self::device::{DeviceId, GraphicsDevice};
pub use self::guard::ContextGuard;
pub use self::resources::*;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::backends::Capabilities;
    pub use super::errors::Error as VideoError;
    pub use super::resources::{
        BlendStateHandle, ConstantBufferHandle, DepthStencilStateHandle, IndexBufferHandle,
        RasterizerStateHandle, Resource, SamplerHandle, ShaderHandle, Texture2DHandle,
        VertexBufferHandle,
    };
    pub use super::{ContextGuard, GraphicsDevice};
}
