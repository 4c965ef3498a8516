//! The proof that a device's native context is current on this thread.
//!
//! `ContextGuard` is handed out by `GraphicsDevice::make_current` and detaches
//! the context again when dropped. It can not leave the thread it was created
//! on, so native calls are always issued from the thread owning the context.

use std::marker::PhantomData;
use std::ops::Deref;

use bytemuck::Pod;

use super::assets::prelude::*;
use super::backends::BufferTarget;
use super::device::GraphicsDevice;
use super::errors::{Error, Result};
use super::resources::*;

pub struct ContextGuard<'a> {
    pub(crate) device: &'a mut GraphicsDevice,
    _affinity: PhantomData<*const ()>,
}

impl<'a> Deref for ContextGuard<'a> {
    type Target = GraphicsDevice;

    fn deref(&self) -> &Self::Target {
        self.device
    }
}

impl<'a> Drop for ContextGuard<'a> {
    fn drop(&mut self) {
        unsafe {
            if let Err(err) = self.device.visitor.detach_current() {
                warn!("Failed to detach the native context: {}", err);
            }
        }
    }
}

impl<'a> ContextGuard<'a> {
    pub(crate) fn new(device: &'a mut GraphicsDevice) -> Self {
        ContextGuard {
            device,
            _affinity: PhantomData,
        }
    }

    /// Creates a 2D texture without initial data. A `mip_levels` of 0 allocates
    /// the full mip chain.
    pub fn create_texture2d(
        &mut self,
        width: u32,
        height: u32,
        mip_levels: u32,
        format: TextureFormat,
    ) -> Result<Texture2DHandle> {
        self.create_texture2d_impl(width, height, mip_levels, format, None)
    }

    /// Creates a 2D texture with `data` as the image of its first mip level.
    pub fn create_texture2d_with_data<T: Pod>(
        &mut self,
        width: u32,
        height: u32,
        mip_levels: u32,
        format: TextureFormat,
        data: &[T],
    ) -> Result<Texture2DHandle> {
        let bytes = bytemuck::cast_slice(data);
        self.create_texture2d_impl(width, height, mip_levels, format, Some(bytes))
    }

    fn create_texture2d_impl(
        &mut self,
        width: u32,
        height: u32,
        mip_levels: u32,
        format: TextureFormat,
        data: Option<&[u8]>,
    ) -> Result<Texture2DHandle> {
        if width == 0 {
            return Err(Error::InvalidArgument("width", "must be positive.".into()));
        }

        if height == 0 {
            return Err(Error::InvalidArgument("height", "must be positive.".into()));
        }

        if format == TextureFormat::Unknown {
            return Err(Error::InvalidArgument("format", "must not be Unknown.".into()));
        }

        let max = self.device.capabilities.max_texture_size;
        if width > max || height > max {
            return Err(Error::NotSupported(format!(
                "texture dimensions {}x{} (max {}).",
                width, height, max
            )));
        }

        let full = super::assets::texture::mip_levels(width, height);
        let mip_levels = match mip_levels {
            0 => full,
            v if v > full => {
                return Err(Error::OutOfRange(
                    "mip_levels",
                    format!("{} exceeds the full chain of {} levels.", v, full),
                ));
            }
            v => v,
        };

        let texture = Texture2D {
            width,
            height,
            mip_levels,
            format,
        };

        if let Some(bytes) = data {
            if bytes.len() != texture.level_size(0) {
                return Err(Error::InvalidArgument(
                    "data",
                    format!("expected {} bytes, got {}.", texture.level_size(0), bytes.len()),
                ));
            }
        }

        let device = &mut *self.device;
        let native = unsafe {
            let native = device.visitor.create_texture(&texture, data)?;
            if let Err(err) = device.visitor.check() {
                device.visitor.delete_texture(native);
                return Err(err);
            }

            native
        };

        device.context.forget_texture_unit(0);
        let handle = device.textures.create(GraphicsObject::new(native, texture));
        Ok(Texture2DHandle::new(device.id, handle))
    }

    /// Deletes a texture. Deleting it twice is a no-op.
    pub fn delete_texture(&mut self, texture: Texture2DHandle) -> Result<()> {
        self.check_device(texture.device(), "texture")?;

        if let Some(v) = self.device.textures.free(texture.handle()) {
            self.device.context.unbind_texture(texture);
            unsafe {
                self.device.visitor.delete_texture(v.native);
                self.device.visitor.check()?;
            }
        }

        Ok(())
    }

    pub fn create_sampler(&mut self, info: SamplerInfo) -> Result<SamplerHandle> {
        let caps = &self.device.capabilities;

        if info.is_anisotropic() {
            if !caps.supports_anisotropic_filtering {
                return Err(Error::NotSupported("anisotropic filtering.".into()));
            }

            if info.max_anisotropy > caps.max_anisotropy {
                return Err(Error::NotSupported(format!(
                    "anisotropy level {} (max {}).",
                    info.max_anisotropy, caps.max_anisotropy
                )));
            }

            if info.max_anisotropy == 0 {
                return Err(Error::InvalidArgument(
                    "info",
                    "max_anisotropy must be positive when anisotropic filtering is used.".into(),
                ));
            }
        }

        if info.mip_lod_bias > caps.max_texture_lod_bias {
            return Err(Error::NotSupported(format!(
                "mip LOD bias {} (max {}).",
                info.mip_lod_bias, caps.max_texture_lod_bias
            )));
        }

        if info.min_lod > info.max_lod {
            return Err(Error::InvalidArgument(
                "info",
                "min_lod must not be greater than max_lod.".into(),
            ));
        }

        let device = &mut *self.device;
        let native = unsafe {
            let native = device.visitor.create_sampler(&info)?;
            if let Err(err) = device.visitor.check() {
                device.visitor.delete_sampler(native);
                return Err(err);
            }

            native
        };

        let handle = device
            .samplers
            .create(GraphicsObject::new(native, Sampler { info }));
        Ok(SamplerHandle::new(device.id, handle))
    }

    pub fn delete_sampler(&mut self, sampler: SamplerHandle) -> Result<()> {
        self.check_device(sampler.device(), "sampler")?;

        if let Some(v) = self.device.samplers.free(sampler.handle()) {
            self.device.context.unbind_sampler(sampler);
            unsafe {
                self.device.visitor.delete_sampler(v.native);
                self.device.visitor.check()?;
            }
        }

        Ok(())
    }

    /// Creates a vertex buffer of `vertex_count` uninitialized vertices.
    pub fn create_vertex_buffer(
        &mut self,
        description: VertexDescription,
        vertex_count: u32,
        usage: BufferUsage,
    ) -> Result<VertexBufferHandle> {
        self.create_vertex_buffer_impl(description, vertex_count, usage, None)
    }

    /// Creates a vertex buffer holding `data`, whose length must be a multiple
    /// of the vertex stride.
    pub fn create_vertex_buffer_with_data<T: Pod>(
        &mut self,
        description: VertexDescription,
        data: &[T],
        usage: BufferUsage,
    ) -> Result<VertexBufferHandle> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let stride = description.stride() as usize;

        if stride == 0 || bytes.len() % stride != 0 {
            return Err(Error::InvalidArgument(
                "data",
                format!("{} bytes is not a multiple of the vertex stride {}.", bytes.len(), stride),
            ));
        }

        let count = (bytes.len() / stride) as u32;
        self.create_vertex_buffer_impl(description, count, usage, Some(bytes))
    }

    fn create_vertex_buffer_impl(
        &mut self,
        description: VertexDescription,
        vertex_count: u32,
        usage: BufferUsage,
        data: Option<&[u8]>,
    ) -> Result<VertexBufferHandle> {
        if description.is_empty() {
            return Err(Error::InvalidArgument(
                "description",
                "must declare at least one element.".into(),
            ));
        }

        let max = self.device.capabilities.max_vertex_attributes as usize;
        if description.len() > max {
            return Err(Error::NotSupported(format!(
                "{} vertex attributes (max {}).",
                description.len(),
                max
            )));
        }

        if vertex_count == 0 {
            return Err(Error::InvalidArgument("vertex_count", "must be positive.".into()));
        }

        let buffer = VertexBuffer {
            description,
            vertex_count,
            usage,
        };

        let device = &mut *self.device;
        let native = unsafe {
            let native =
                device
                    .visitor
                    .create_buffer(BufferTarget::Vertex, usage, buffer.size(), data)?;
            if let Err(err) = device.visitor.check() {
                device.visitor.delete_buffer(native);
                return Err(err);
            }

            native
        };

        let handle = device
            .vertex_buffers
            .create(GraphicsObject::new(native, buffer));
        Ok(VertexBufferHandle::new(device.id, handle))
    }

    pub fn delete_vertex_buffer(&mut self, vb: VertexBufferHandle) -> Result<()> {
        self.check_device(vb.device(), "vb")?;

        if let Some(v) = self.device.vertex_buffers.free(vb.handle()) {
            self.device.context.unbind_vertex_buffer(vb);
            unsafe {
                self.device.visitor.delete_buffer(v.native);
                self.device.visitor.check()?;
            }
        }

        Ok(())
    }

    /// Creates an index buffer of `index_count` uninitialized indices.
    pub fn create_index_buffer(
        &mut self,
        format: IndexFormat,
        index_count: u32,
        usage: BufferUsage,
    ) -> Result<IndexBufferHandle> {
        self.create_index_buffer_impl(format, index_count, usage, None)
    }

    pub fn create_index_buffer_with_data<T: Pod>(
        &mut self,
        format: IndexFormat,
        data: &[T],
        usage: BufferUsage,
    ) -> Result<IndexBufferHandle> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if bytes.len() % format.size() != 0 {
            return Err(Error::InvalidArgument(
                "data",
                format!("{} bytes is not a multiple of {:?} indices.", bytes.len(), format),
            ));
        }

        let count = (bytes.len() / format.size()) as u32;
        self.create_index_buffer_impl(format, count, usage, Some(bytes))
    }

    fn create_index_buffer_impl(
        &mut self,
        format: IndexFormat,
        index_count: u32,
        usage: BufferUsage,
        data: Option<&[u8]>,
    ) -> Result<IndexBufferHandle> {
        if index_count == 0 {
            return Err(Error::InvalidArgument("index_count", "must be positive.".into()));
        }

        let buffer = IndexBuffer {
            format,
            index_count,
            usage,
        };

        let device = &mut *self.device;
        let native = unsafe {
            let native =
                device
                    .visitor
                    .create_buffer(BufferTarget::Index, usage, buffer.size(), data)?;
            if let Err(err) = device.visitor.check() {
                device.visitor.delete_buffer(native);
                return Err(err);
            }

            native
        };

        let handle = device
            .index_buffers
            .create(GraphicsObject::new(native, buffer));
        Ok(IndexBufferHandle::new(device.id, handle))
    }

    pub fn delete_index_buffer(&mut self, ib: IndexBufferHandle) -> Result<()> {
        self.check_device(ib.device(), "ib")?;

        if let Some(v) = self.device.index_buffers.free(ib.handle()) {
            self.device.context.unbind_index_buffer(ib);
            unsafe {
                self.device.visitor.delete_buffer(v.native);
                self.device.visitor.check()?;
            }
        }

        Ok(())
    }

    /// Creates a constant buffer. Its size is taken from the first upload.
    pub fn create_constant_buffer(&mut self, usage: BufferUsage) -> Result<ConstantBufferHandle> {
        let buffer = ConstantBuffer { size: None, usage };

        let device = &mut *self.device;
        let native = unsafe {
            let native = device
                .visitor
                .create_buffer(BufferTarget::Uniform, usage, 0, None)?;
            if let Err(err) = device.visitor.check() {
                device.visitor.delete_buffer(native);
                return Err(err);
            }

            native
        };

        let handle = device
            .constant_buffers
            .create(GraphicsObject::new(native, buffer));
        Ok(ConstantBufferHandle::new(device.id, handle))
    }

    pub fn delete_constant_buffer(&mut self, buffer: ConstantBufferHandle) -> Result<()> {
        self.check_device(buffer.device(), "buffer")?;

        if let Some(v) = self.device.constant_buffers.free(buffer.handle()) {
            self.device.context.unbind_constant_buffer(buffer);
            unsafe {
                self.device.visitor.delete_buffer(v.native);
                self.device.visitor.check()?;
            }
        }

        Ok(())
    }

    /// Compiles and links a shader program from GLSL sources.
    pub fn create_shader(&mut self, params: ShaderParams, vs: &str, fs: &str) -> Result<ShaderHandle> {
        params.validate(&self.device.capabilities, vs, fs)?;

        let device = &mut *self.device;
        let native = unsafe {
            let native = device.visitor.create_shader(&params, vs, fs)?;
            if let Err(err) = device.visitor.check() {
                device.visitor.delete_shader(native);
                return Err(err);
            }

            native
        };

        let handle = device
            .shaders
            .create(GraphicsObject::new(native, Shader { params }));
        Ok(ShaderHandle::new(device.id, handle))
    }

    pub fn delete_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.check_device(shader.device(), "shader")?;

        if let Some(v) = self.device.shaders.free(shader.handle()) {
            self.device.context.unbind_shader(shader);
            unsafe {
                self.device.visitor.delete_shader(v.native);
                self.device.visitor.check()?;
            }
        }

        Ok(())
    }

    pub fn create_depth_stencil_state(
        &mut self,
        info: DepthStencilStateInfo,
    ) -> Result<DepthStencilStateHandle> {
        let device = &mut *self.device;
        let handle = device
            .depth_stencil_states
            .create(GraphicsObject::new(0, DepthStencilState { info }));
        Ok(DepthStencilStateHandle::new(device.id, handle))
    }

    pub fn delete_depth_stencil_state(&mut self, state: DepthStencilStateHandle) -> Result<()> {
        self.check_device(state.device(), "state")?;

        if self.device.depth_stencil_states.free(state.handle()).is_some() {
            self.device.context.unbind_depth_stencil_state(state);
        }

        Ok(())
    }

    pub fn create_rasterizer_state(
        &mut self,
        info: RasterizerStateInfo,
    ) -> Result<RasterizerStateHandle> {
        let device = &mut *self.device;
        let handle = device
            .rasterizer_states
            .create(GraphicsObject::new(0, RasterizerState { info }));
        Ok(RasterizerStateHandle::new(device.id, handle))
    }

    pub fn delete_rasterizer_state(&mut self, state: RasterizerStateHandle) -> Result<()> {
        self.check_device(state.device(), "state")?;

        if self.device.rasterizer_states.free(state.handle()).is_some() {
            self.device.context.unbind_rasterizer_state(state);
        }

        Ok(())
    }

    pub fn create_blend_state(&mut self, info: BlendStateInfo) -> Result<BlendStateHandle> {
        let device = &mut *self.device;
        let handle = device
            .blend_states
            .create(GraphicsObject::new(0, BlendState { info }));
        Ok(BlendStateHandle::new(device.id, handle))
    }

    pub fn delete_blend_state(&mut self, state: BlendStateHandle) -> Result<()> {
        self.check_device(state.device(), "state")?;

        if self.device.blend_states.free(state.handle()).is_some() {
            self.device.context.unbind_blend_state(state);
        }

        Ok(())
    }

    fn check_device(&self, device: super::device::DeviceId, arg: &'static str) -> Result<()> {
        if device != self.device.id {
            return Err(Error::DeviceMismatch(arg));
        }

        Ok(())
    }
}
