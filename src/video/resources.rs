//! Handles and descriptions of the objects owned by a `GraphicsDevice`.
//!
//! A handle names its owning device and a versioned slot in one of the
//! device's arenas. It stays valid until the object is deleted, after which
//! every use of it is rejected as disposed.

use std::fmt;

use failure::Backtrace;

use super::assets::prelude::*;
use super::backends::NativeHandle;
use super::device::{DeviceId, GraphicsDevice};
use crate::utils::Handle;

/// Common surface of every resource handle.
pub trait Resource: Copy + fmt::Debug {
    /// Human readable kind of the resource, used in error messages.
    const KIND: &'static str;

    fn device(&self) -> DeviceId;

    fn handle(&self) -> Handle;

    /// Returns true if the object is still alive in `device`.
    fn is_alive(&self, device: &GraphicsDevice) -> bool;
}

macro_rules! impl_resource_handle {
    ($name: ident, $kind: expr, $pool: ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            device: DeviceId,
            handle: Handle,
        }

        impl $name {
            #[inline]
            pub(crate) fn new(device: DeviceId, handle: Handle) -> Self {
                $name { device, handle }
            }
        }

        impl Resource for $name {
            const KIND: &'static str = $kind;

            #[inline]
            fn device(&self) -> DeviceId {
                self.device
            }

            #[inline]
            fn handle(&self) -> Handle {
                self.handle
            }

            #[inline]
            fn is_alive(&self, device: &GraphicsDevice) -> bool {
                device.$pool.is_alive(self.handle)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $kind, self.handle)
            }
        }
    };
}

impl_resource_handle!(Texture2DHandle, "texture", textures);
impl_resource_handle!(SamplerHandle, "sampler", samplers);
impl_resource_handle!(VertexBufferHandle, "vertex buffer", vertex_buffers);
impl_resource_handle!(IndexBufferHandle, "index buffer", index_buffers);
impl_resource_handle!(ConstantBufferHandle, "constant buffer", constant_buffers);
impl_resource_handle!(ShaderHandle, "shader", shaders);
impl_resource_handle!(DepthStencilStateHandle, "depth stencil state", depth_stencil_states);
impl_resource_handle!(RasterizerStateHandle, "rasterizer state", rasterizer_states);
impl_resource_handle!(BlendStateHandle, "blend state", blend_states);

/// An arena entry: the native object, its description and where it was
/// created from.
pub(crate) struct GraphicsObject<T> {
    pub native: NativeHandle,
    pub object: T,
    pub trace: Backtrace,
}

impl<T> GraphicsObject<T> {
    pub fn new(native: NativeHandle, object: T) -> Self {
        GraphicsObject {
            native,
            object,
            trace: Backtrace::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture2D {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub format: TextureFormat,
}

impl Texture2D {
    /// Returns the dimensions of the mip `level`.
    #[inline]
    pub fn level_dimensions(&self, level: u32) -> (u32, u32) {
        super::assets::texture::mip_dimensions(self.width, self.height, level)
    }

    /// Returns the size in bytes of the image at mip `level`.
    #[inline]
    pub fn level_size(&self, level: u32) -> usize {
        let (w, h) = self.level_dimensions(level);
        self.format.size(w, h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    pub info: SamplerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexBuffer {
    pub description: VertexDescription,
    pub vertex_count: u32,
    pub usage: BufferUsage,
}

impl VertexBuffer {
    #[inline]
    pub fn size(&self) -> usize {
        self.vertex_count as usize * self.description.stride() as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexBuffer {
    pub format: IndexFormat,
    pub index_count: u32,
    pub usage: BufferUsage,
}

impl IndexBuffer {
    #[inline]
    pub fn size(&self) -> usize {
        self.index_count as usize * self.format.size()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantBuffer {
    /// Size in bytes, unknown until the first upload.
    pub size: Option<usize>,
    pub usage: BufferUsage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shader {
    pub params: ShaderParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthStencilState {
    pub info: DepthStencilStateInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizerState {
    pub info: RasterizerStateInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendState {
    pub info: BlendStateInfo,
}
