use std::sync::atomic::{AtomicU32, Ordering};

use super::backends::{Capabilities, NativeHandle, Visitor};
use super::errors::{Error, Result};
use super::guard::ContextGuard;
use super::render_context::RenderContext;
use super::resources::*;
use crate::utils::ObjectPool;

static NEXT_DEVICE_ID: AtomicU32 = AtomicU32::new(1);

/// Identifies the `GraphicsDevice` a resource handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(u32);

/// The owner of a native graphics context and of every object created in it.
///
/// The device itself only answers queries. Anything that talks to the native
/// context goes through the `ContextGuard` returned by `make_current`.
///
/// Dropping the device deletes every object still alive in it.
pub struct GraphicsDevice {
    pub(crate) id: DeviceId,
    pub(crate) visitor: Box<dyn Visitor>,
    pub(crate) capabilities: Capabilities,
    pub(crate) context: RenderContext,

    pub(crate) textures: ObjectPool<GraphicsObject<Texture2D>>,
    pub(crate) samplers: ObjectPool<GraphicsObject<Sampler>>,
    pub(crate) vertex_buffers: ObjectPool<GraphicsObject<VertexBuffer>>,
    pub(crate) index_buffers: ObjectPool<GraphicsObject<IndexBuffer>>,
    pub(crate) constant_buffers: ObjectPool<GraphicsObject<ConstantBuffer>>,
    pub(crate) shaders: ObjectPool<GraphicsObject<Shader>>,
    pub(crate) depth_stencil_states: ObjectPool<GraphicsObject<DepthStencilState>>,
    pub(crate) rasterizer_states: ObjectPool<GraphicsObject<RasterizerState>>,
    pub(crate) blend_states: ObjectPool<GraphicsObject<BlendState>>,
}

macro_rules! impl_query {
    ($name: ident, $handle: ident, $object: ident, $pool: ident) => {
        pub fn $name(&self, handle: $handle) -> Result<&$object> {
            self.validate(handle, "handle")?;
            self.$pool
                .get(handle.handle())
                .map(|v| &v.object)
                .ok_or(Error::Disposed("handle", <$handle as Resource>::KIND))
        }
    };
}

impl GraphicsDevice {
    pub fn new(visitor: Box<dyn Visitor>) -> Self {
        let id = DeviceId(NEXT_DEVICE_ID.fetch_add(1, Ordering::Relaxed));
        let capabilities = visitor.capabilities().clone();
        info!("Graphics device {:?} created with {:?}.", id, capabilities);

        GraphicsDevice {
            id,
            visitor,
            capabilities,
            context: RenderContext::new(),
            textures: ObjectPool::new(),
            samplers: ObjectPool::new(),
            vertex_buffers: ObjectPool::new(),
            index_buffers: ObjectPool::new(),
            constant_buffers: ObjectPool::new(),
            shaders: ObjectPool::new(),
            depth_stencil_states: ObjectPool::new(),
            rasterizer_states: ObjectPool::new(),
            blend_states: ObjectPool::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> DeviceId {
        self.id
    }

    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Makes the native context current on the calling thread. The context
    /// stays current until the returned guard is dropped.
    pub fn make_current(&mut self) -> Result<ContextGuard<'_>> {
        unsafe {
            self.visitor.make_current()?;
        }

        Ok(ContextGuard::new(self))
    }

    /// Returns true if `resource` is not alive in this device, either because
    /// it was deleted or because it belongs to another device.
    pub fn is_disposed<R: Resource>(&self, resource: R) -> bool {
        resource.device() != self.id || !resource.is_alive(self)
    }

    /// Returns the number of alive objects of every kind.
    pub fn len(&self) -> usize {
        self.textures.len()
            + self.samplers.len()
            + self.vertex_buffers.len()
            + self.index_buffers.len()
            + self.constant_buffers.len()
            + self.shaders.len()
            + self.depth_stencil_states.len()
            + self.rasterizer_states.len()
            + self.blend_states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    impl_query!(texture, Texture2DHandle, Texture2D, textures);
    impl_query!(sampler, SamplerHandle, Sampler, samplers);
    impl_query!(vertex_buffer, VertexBufferHandle, VertexBuffer, vertex_buffers);
    impl_query!(index_buffer, IndexBufferHandle, IndexBuffer, index_buffers);
    impl_query!(constant_buffer, ConstantBufferHandle, ConstantBuffer, constant_buffers);
    impl_query!(shader, ShaderHandle, Shader, shaders);
    impl_query!(depth_stencil_state, DepthStencilStateHandle, DepthStencilState, depth_stencil_states);
    impl_query!(rasterizer_state, RasterizerStateHandle, RasterizerState, rasterizer_states);
    impl_query!(blend_state, BlendStateHandle, BlendState, blend_states);

    /// Checks that `resource` was created by this device and is still alive.
    pub(crate) fn validate<R: Resource>(&self, resource: R, arg: &'static str) -> Result<()> {
        if resource.device() != self.id {
            return Err(Error::DeviceMismatch(arg));
        }

        if !resource.is_alive(self) {
            return Err(Error::Disposed(arg, R::KIND));
        }

        Ok(())
    }
}

impl Drop for GraphicsDevice {
    fn drop(&mut self) {
        if self.is_empty() {
            return;
        }

        unsafe {
            if let Err(err) = self.visitor.make_current() {
                warn!(
                    "Leaking {} native objects of graphics device {:?}, the context could not be made current: {}",
                    self.len(),
                    self.id,
                    err
                );
                return;
            }

            warn!(
                "Graphics device {:?} dropped with {} alive objects, disposing them.",
                self.id,
                self.len()
            );

            let visitor = &mut *self.visitor;
            dispose(&mut self.textures, "texture", |v| visitor.delete_texture(v));
            dispose(&mut self.samplers, "sampler", |v| visitor.delete_sampler(v));
            dispose(&mut self.vertex_buffers, "vertex buffer", |v| visitor.delete_buffer(v));
            dispose(&mut self.index_buffers, "index buffer", |v| visitor.delete_buffer(v));
            dispose(&mut self.constant_buffers, "constant buffer", |v| visitor.delete_buffer(v));
            dispose(&mut self.shaders, "shader", |v| visitor.delete_shader(v));

            // States have no native object.
            self.depth_stencil_states.drain();
            self.rasterizer_states.drain();
            self.blend_states.drain();

            if let Err(err) = self.visitor.check() {
                warn!("Failed to dispose graphics device {:?}: {}", self.id, err);
            }

            if let Err(err) = self.visitor.detach_current() {
                warn!("{}", err);
            }
        }
    }
}

fn dispose<T, F>(pool: &mut ObjectPool<GraphicsObject<T>>, kind: &str, mut delete: F)
where
    F: FnMut(NativeHandle),
{
    for (handle, v) in pool.drain() {
        debug!("Disposing leaked {} {}, created at:\n{}", kind, handle, v.trace);
        delete(v.native);
    }
}
