//! Deferred render state.
//!
//! Setters only record what the next draw call needs into a pending snapshot
//! and mark what changed in a `Dirty` set. Drawing walks the dirty set in a
//! fixed order and compares the pending snapshot with the one last pushed to
//! the native context, so only the calls whose values differ are issued.

use bitflags::bitflags;
use bytemuck::Pod;
use smallvec::SmallVec;

use super::assets::prelude::*;
use super::backends::{BufferTarget, NativeHandle};
use super::device::GraphicsDevice;
use super::errors::{Error, Result};
use super::guard::ContextGuard;
use super::resources::*;
use crate::math::Color;
use crate::utils::ObjectPool;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct Dirty: u16 {
        const SHADER = 1 << 0;
        const RASTERIZER = 1 << 1;
        const BLEND = 1 << 2;
        const DEPTH_STENCIL = 1 << 3;
        const VERTEX_BUFFER = 1 << 4;
        const INDEX_BUFFER = 1 << 5;
        const CONSTANT_BUFFERS = 1 << 6;
        const TEXTURES = 1 << 7;
        const SAMPLERS = 1 << 8;
    }
}

type Slots<T> = SmallVec<[Option<T>; 8]>;

/// What the next draw call asks for.
#[derive(Debug, Default, Clone)]
struct Pending {
    state: RenderStateInfo,
    stencil_reference: i32,
    vertex_buffer: Option<VertexBufferHandle>,
    index_buffer: Option<IndexBufferHandle>,
    constant_buffers: Slots<ConstantBufferHandle>,
    textures: Slots<Texture2DHandle>,
    samplers: Slots<SamplerHandle>,
}

/// What was last pushed to the native context. `None` means unknown.
#[derive(Debug, Default, Clone)]
struct Applied {
    shader: Option<ShaderHandle>,
    rasterizer: Option<RasterizerStateInfo>,
    blend: Option<BlendStateInfo>,
    depth_stencil: Option<(DepthStencilStateInfo, i32)>,
    vertex_buffer: Option<VertexBufferHandle>,
    index_buffer: Option<IndexBufferHandle>,
    constant_buffers: Slots<ConstantBufferHandle>,
    textures: Slots<Texture2DHandle>,
    samplers: Slots<SamplerHandle>,
}

#[derive(Debug, Default, Clone, Copy)]
struct ClearValues {
    color: Option<Color>,
    depth: Option<f32>,
    stencil: Option<i32>,
}

pub(crate) struct RenderContext {
    pending: Pending,
    applied: Applied,
    clear: ClearValues,
    dirty: Dirty,
}

impl RenderContext {
    pub fn new() -> Self {
        RenderContext {
            pending: Pending::default(),
            applied: Applied::default(),
            clear: ClearValues::default(),
            dirty: Dirty::all(),
        }
    }

    /// Forgets everything known about the native context, so the next draw
    /// pushes every state again.
    pub fn reset(&mut self) {
        self.applied = Applied::default();
        self.clear = ClearValues::default();
        self.dirty = Dirty::all();
    }

    /// Marks the texture binding of `unit` as unknown after the backend used
    /// it to upload data.
    pub fn forget_texture_unit(&mut self, unit: usize) {
        if assign(&mut self.applied.textures, unit, None) {
            self.dirty |= Dirty::TEXTURES;
        }
    }

    pub fn unbind_texture(&mut self, texture: Texture2DHandle) {
        if unbind(&mut self.pending.textures, &mut self.applied.textures, texture) {
            self.dirty |= Dirty::TEXTURES;
        }
    }

    pub fn unbind_sampler(&mut self, sampler: SamplerHandle) {
        if unbind(&mut self.pending.samplers, &mut self.applied.samplers, sampler) {
            self.dirty |= Dirty::SAMPLERS;
        }
    }

    pub fn unbind_constant_buffer(&mut self, buffer: ConstantBufferHandle) {
        let (pending, applied) = (&mut self.pending, &mut self.applied);
        if unbind(&mut pending.constant_buffers, &mut applied.constant_buffers, buffer) {
            self.dirty |= Dirty::CONSTANT_BUFFERS;
        }
    }

    pub fn unbind_vertex_buffer(&mut self, vb: VertexBufferHandle) {
        if self.pending.vertex_buffer == Some(vb) {
            self.pending.vertex_buffer = None;
            self.dirty |= Dirty::VERTEX_BUFFER;
        }

        if self.applied.vertex_buffer == Some(vb) {
            self.applied.vertex_buffer = None;
        }
    }

    pub fn unbind_index_buffer(&mut self, ib: IndexBufferHandle) {
        if self.pending.index_buffer == Some(ib) {
            self.pending.index_buffer = None;
            self.dirty |= Dirty::INDEX_BUFFER;
        }

        if self.applied.index_buffer == Some(ib) {
            self.applied.index_buffer = None;
        }
    }

    pub fn unbind_shader(&mut self, shader: ShaderHandle) {
        if self.pending.state.shader == Some(shader) {
            self.pending.state.shader = None;
            self.dirty |= Dirty::SHADER;
        }

        if self.applied.shader == Some(shader) {
            self.applied.shader = None;
        }
    }

    // States have no native object, the applied snapshot keeps their values.

    pub fn unbind_depth_stencil_state(&mut self, state: DepthStencilStateHandle) {
        if self.pending.state.depth_stencil == Some(state) {
            self.pending.state.depth_stencil = None;
            self.dirty |= Dirty::DEPTH_STENCIL;
        }
    }

    pub fn unbind_rasterizer_state(&mut self, state: RasterizerStateHandle) {
        if self.pending.state.rasterizer == Some(state) {
            self.pending.state.rasterizer = None;
            self.dirty |= Dirty::RASTERIZER;
        }
    }

    pub fn unbind_blend_state(&mut self, state: BlendStateHandle) {
        if self.pending.state.blend == Some(state) {
            self.pending.state.blend = None;
            self.dirty |= Dirty::BLEND;
        }
    }
}

/// Writes `value` into slot `index`, growing the table if needed. Returns true
/// if the slot changed.
fn assign<T: Copy + PartialEq>(slots: &mut Slots<T>, index: usize, value: Option<T>) -> bool {
    if index >= slots.len() {
        if value.is_none() {
            return false;
        }

        slots.resize(index + 1, None);
    }

    if slots[index] == value {
        false
    } else {
        slots[index] = value;
        true
    }
}

/// Removes every reference to `value` from both tables. Returns true if the
/// pending table changed.
fn unbind<T: Copy + PartialEq>(pending: &mut Slots<T>, applied: &mut Slots<T>, value: T) -> bool {
    let mut changed = false;
    for v in pending.iter_mut().filter(|v| **v == Some(value)) {
        *v = None;
        changed = true;
    }

    for v in applied.iter_mut().filter(|v| **v == Some(value)) {
        *v = None;
    }

    changed
}

/// Binds every slot whose pending value differs from the applied one. Slots
/// cleared in the pending table are unbound natively.
unsafe fn apply_slots<H, T, F>(
    pending: &Slots<H>,
    applied: &mut Slots<H>,
    pool: &ObjectPool<GraphicsObject<T>>,
    mut bind: F,
) -> Result<()>
where
    H: Resource + PartialEq,
    F: FnMut(u32, NativeHandle),
{
    for i in 0..pending.len().max(applied.len()) {
        let want = pending.get(i).cloned().unwrap_or(None);
        let have = applied.get(i).cloned().unwrap_or(None);
        if want == have {
            continue;
        }

        let native = match want {
            Some(v) => native_of(pool, v)?,
            None => 0,
        };

        bind(i as u32, native);
        assign(applied, i, want);
    }

    Ok(())
}

fn native_of<H: Resource, T>(pool: &ObjectPool<GraphicsObject<T>>, handle: H) -> Result<NativeHandle> {
    pool.get(handle.handle())
        .map(|v| v.native)
        .ok_or_else(|| Error::InvalidOperation(format!("{:?} is bound but disposed.", handle)))
}

/// Pushes the pending snapshot to the native context.
unsafe fn apply(device: &mut GraphicsDevice) -> Result<()> {
    let GraphicsDevice {
        ref mut visitor,
        ref mut context,
        ref textures,
        ref samplers,
        ref vertex_buffers,
        ref index_buffers,
        ref constant_buffers,
        ref shaders,
        ref depth_stencil_states,
        ref rasterizer_states,
        ref blend_states,
        ..
    } = *device;

    let visitor = &mut **visitor;
    let dirty = context.dirty;
    let pending = &context.pending;
    let applied = &mut context.applied;

    if dirty.contains(Dirty::SHADER) && applied.shader != pending.state.shader {
        if let Some(shader) = pending.state.shader {
            visitor.use_program(native_of(shaders, shader)?);
            applied.shader = Some(shader);
        }
    }

    if dirty.contains(Dirty::RASTERIZER) {
        let info = match pending.state.rasterizer {
            Some(v) => resolve(rasterizer_states, v)?.info,
            None => RasterizerStateInfo::default(),
        };

        if applied.rasterizer != Some(info) {
            info.apply(applied.rasterizer.as_ref(), visitor);
            applied.rasterizer = Some(info);
        }
    }

    if dirty.contains(Dirty::BLEND) {
        let info = match pending.state.blend {
            Some(v) => resolve(blend_states, v)?.info,
            None => BlendStateInfo::default(),
        };

        if applied.blend != Some(info) {
            info.apply(applied.blend.as_ref(), visitor);
            applied.blend = Some(info);
        }
    }

    if dirty.contains(Dirty::DEPTH_STENCIL) {
        let info = match pending.state.depth_stencil {
            Some(v) => resolve(depth_stencil_states, v)?.info,
            None => DepthStencilStateInfo::default(),
        };

        let target = (info, pending.stencil_reference);
        if applied.depth_stencil != Some(target) {
            let previous = applied.depth_stencil.as_ref().map(|(v, r)| (v, *r));
            info.apply(target.1, previous, visitor);
            applied.depth_stencil = Some(target);
        }
    }

    if dirty.contains(Dirty::VERTEX_BUFFER) && applied.vertex_buffer != pending.vertex_buffer {
        if let Some(vb) = pending.vertex_buffer {
            let entry = resolve_entry(vertex_buffers, vb)?;
            let attributes = entry.object.description.attributes();
            visitor.bind_vertex_buffer(entry.native, &attributes);
            applied.vertex_buffer = Some(vb);
        }
    }

    if dirty.contains(Dirty::INDEX_BUFFER) && applied.index_buffer != pending.index_buffer {
        if let Some(ib) = pending.index_buffer {
            visitor.bind_index_buffer(native_of(index_buffers, ib)?);
            applied.index_buffer = Some(ib);
        }
    }

    if dirty.contains(Dirty::CONSTANT_BUFFERS) {
        apply_slots(
            &pending.constant_buffers,
            &mut applied.constant_buffers,
            constant_buffers,
            |i, v| visitor.bind_uniform_buffer(i, v),
        )?;
    }

    if dirty.contains(Dirty::TEXTURES) {
        apply_slots(&pending.textures, &mut applied.textures, textures, |i, v| {
            visitor.bind_texture(i, v)
        })?;
    }

    if dirty.contains(Dirty::SAMPLERS) {
        apply_slots(&pending.samplers, &mut applied.samplers, samplers, |i, v| {
            visitor.bind_sampler(i, v)
        })?;
    }

    visitor.check()?;
    context.dirty = Dirty::empty();
    Ok(())
}

fn resolve_entry<H: Resource, T>(
    pool: &ObjectPool<GraphicsObject<T>>,
    handle: H,
) -> Result<&GraphicsObject<T>> {
    pool.get(handle.handle())
        .ok_or_else(|| Error::InvalidOperation(format!("{:?} is bound but disposed.", handle)))
}

fn resolve<H: Resource, T>(pool: &ObjectPool<GraphicsObject<T>>, handle: H) -> Result<&T> {
    resolve_entry(pool, handle).map(|v| &v.object)
}

impl<'a> ContextGuard<'a> {
    /// Returns the render state the next draw call will use.
    pub fn render_state(&self) -> RenderStateInfo {
        self.device.context.pending.state
    }

    /// Forgets what is known about the native context. The next draw call
    /// pushes every state again, and so does the next clear for its values.
    pub fn reset_state(&mut self) {
        self.device.context.reset();
    }

    pub fn set_shader(&mut self, shader: ShaderHandle) -> Result<()> {
        self.device.validate(shader, "shader")?;

        let cx = &mut self.device.context;
        if cx.pending.state.shader != Some(shader) {
            cx.pending.state.shader = Some(shader);
            cx.dirty |= Dirty::SHADER;
        }

        Ok(())
    }

    pub fn set_primitive_type(&mut self, primitive: PrimitiveType) {
        self.device.context.pending.state.primitive = primitive;
    }

    pub fn set_vertex_buffer(&mut self, vb: VertexBufferHandle) -> Result<()> {
        self.device.validate(vb, "vb")?;

        let cx = &mut self.device.context;
        if cx.pending.vertex_buffer != Some(vb) {
            cx.pending.vertex_buffer = Some(vb);
            cx.dirty |= Dirty::VERTEX_BUFFER;
        }

        Ok(())
    }

    pub fn set_index_buffer(&mut self, ib: IndexBufferHandle) -> Result<()> {
        self.device.validate(ib, "ib")?;

        let cx = &mut self.device.context;
        if cx.pending.index_buffer != Some(ib) {
            cx.pending.index_buffer = Some(ib);
            cx.dirty |= Dirty::INDEX_BUFFER;
        }

        Ok(())
    }

    /// Sets the rasterizer state, `None` restoring the default one.
    pub fn set_rasterizer_state(&mut self, state: Option<RasterizerStateHandle>) -> Result<()> {
        if let Some(v) = state {
            self.device.validate(v, "state")?;
        }

        let cx = &mut self.device.context;
        if cx.pending.state.rasterizer != state {
            cx.pending.state.rasterizer = state;
            cx.dirty |= Dirty::RASTERIZER;
        }

        Ok(())
    }

    /// Sets the blend state, `None` restoring the default one.
    pub fn set_blend_state(&mut self, state: Option<BlendStateHandle>) -> Result<()> {
        if let Some(v) = state {
            self.device.validate(v, "state")?;
        }

        let cx = &mut self.device.context;
        if cx.pending.state.blend != state {
            cx.pending.state.blend = state;
            cx.dirty |= Dirty::BLEND;
        }

        Ok(())
    }

    /// Sets the depth-stencil state and the reference value of its stencil
    /// test, `None` restoring the default state.
    pub fn set_depth_stencil_state(
        &mut self,
        state: Option<DepthStencilStateHandle>,
        stencil_reference: i32,
    ) -> Result<()> {
        if let Some(v) = state {
            self.device.validate(v, "state")?;
        }

        let cx = &mut self.device.context;
        if cx.pending.state.depth_stencil != state || cx.pending.stencil_reference != stencil_reference
        {
            cx.pending.state.depth_stencil = state;
            cx.pending.stencil_reference = stencil_reference;
            cx.dirty |= Dirty::DEPTH_STENCIL;
        }

        Ok(())
    }

    /// Sets the shader, primitive topology and fixed-function states at once.
    pub fn set_state(&mut self, state: RenderStateInfo) -> Result<()> {
        if let Some(v) = state.shader {
            self.device.validate(v, "state.shader")?;
        }

        if let Some(v) = state.rasterizer {
            self.device.validate(v, "state.rasterizer")?;
        }

        if let Some(v) = state.blend {
            self.device.validate(v, "state.blend")?;
        }

        if let Some(v) = state.depth_stencil {
            self.device.validate(v, "state.depth_stencil")?;
        }

        let cx = &mut self.device.context;
        let prev = cx.pending.state;
        if prev == state {
            return Ok(());
        }

        if prev.shader != state.shader {
            cx.dirty |= Dirty::SHADER;
        }

        if prev.rasterizer != state.rasterizer {
            cx.dirty |= Dirty::RASTERIZER;
        }

        if prev.blend != state.blend {
            cx.dirty |= Dirty::BLEND;
        }

        if prev.depth_stencil != state.depth_stencil {
            cx.dirty |= Dirty::DEPTH_STENCIL;
        }

        cx.pending.state = state;
        Ok(())
    }

    /// Binds `buffer` to the uniform block `name` of `shader`.
    pub fn set_constant_buffer(
        &mut self,
        shader: ShaderHandle,
        name: &str,
        buffer: ConstantBufferHandle,
    ) -> Result<()> {
        let binding = self
            .device
            .shader(shader)?
            .params
            .uniform_binding_point(name)
            .ok_or_else(|| {
                Error::InvalidArgument("name", format!("undefined uniform block `{}`.", name))
            })?;

        if self.device.constant_buffer(buffer)?.size.is_none() {
            return Err(Error::InvalidOperation(format!(
                "{} has no data, update it before binding.",
                buffer
            )));
        }

        let cx = &mut self.device.context;
        if assign(&mut cx.pending.constant_buffers, binding as usize, Some(buffer)) {
            cx.dirty |= Dirty::CONSTANT_BUFFERS;
        }

        Ok(())
    }

    /// Binds `texture` to the texture unit of the sampler `name` of `shader`.
    pub fn set_texture(&mut self, shader: ShaderHandle, name: &str, texture: Texture2DHandle) -> Result<()> {
        let unit = self.texture_unit(shader, name)?;
        self.device.validate(texture, "texture")?;

        let cx = &mut self.device.context;
        if assign(&mut cx.pending.textures, unit, Some(texture)) {
            cx.dirty |= Dirty::TEXTURES;
        }

        Ok(())
    }

    /// Overrides the sampling parameters of the texture unit of the sampler
    /// `name` of `shader`.
    pub fn set_sampler(&mut self, shader: ShaderHandle, name: &str, sampler: SamplerHandle) -> Result<()> {
        let unit = self.texture_unit(shader, name)?;
        self.device.validate(sampler, "sampler")?;

        let cx = &mut self.device.context;
        if assign(&mut cx.pending.samplers, unit, Some(sampler)) {
            cx.dirty |= Dirty::SAMPLERS;
        }

        Ok(())
    }

    fn texture_unit(&self, shader: ShaderHandle, name: &str) -> Result<usize> {
        self.device
            .shader(shader)?
            .params
            .texture_unit(name)
            .map(|v| v as usize)
            .ok_or_else(|| Error::InvalidArgument("name", format!("undefined texture `{}`.", name)))
    }

    /// Draws every vertex of the current vertex buffer.
    pub fn draw(&mut self) -> Result<()> {
        let vb = self.device.context.pending.vertex_buffer.ok_or_else(|| {
            Error::InvalidOperation("Tried to draw without a vertex buffer set.".into())
        })?;

        self.require_shader()?;

        let device = &mut *self.device;
        unsafe {
            apply(device)?;

            let count = resolve(&device.vertex_buffers, vb)?.vertex_count;
            let primitive = device.context.pending.state.primitive;
            device.visitor.draw(primitive, 0, count);
            device.visitor.check()
        }
    }

    /// Draws every index of the current index buffer.
    pub fn draw_indexed(&mut self) -> Result<()> {
        if self.device.context.pending.vertex_buffer.is_none() {
            return Err(Error::InvalidOperation(
                "Tried to draw without a vertex buffer set.".into(),
            ));
        }

        let ib = self.device.context.pending.index_buffer.ok_or_else(|| {
            Error::InvalidOperation("Tried to draw indexed without an index buffer set.".into())
        })?;

        self.require_shader()?;

        let device = &mut *self.device;
        unsafe {
            apply(device)?;

            let ib = resolve(&device.index_buffers, ib)?;
            let primitive = device.context.pending.state.primitive;
            device.visitor.draw_indexed(primitive, ib.index_count, ib.format);
            device.visitor.check()
        }
    }

    fn require_shader(&self) -> Result<()> {
        match self.device.context.pending.state.shader {
            Some(_) => Ok(()),
            None => Err(Error::InvalidOperation("No shader set!".into())),
        }
    }

    /// Clears the selected buffers of the current framebuffer. Clear values are
    /// only pushed when they differ from the last ones.
    pub fn clear(&mut self, options: ClearOptions, color: Color, depth: f32, stencil: i32) -> Result<()> {
        if options.contains(ClearOptions::DEPTH) && !(0.0..=1.0).contains(&depth) {
            return Err(Error::OutOfRange("depth", format!("{} is not in [0, 1].", depth)));
        }

        if options.is_empty() {
            return Ok(());
        }

        let device = &mut *self.device;
        let visitor = &mut *device.visitor;
        let cx = &mut device.context;

        unsafe {
            if options.contains(ClearOptions::COLOR) {
                if cx.clear.color != Some(color) {
                    visitor.set_clear_color(color);
                    cx.clear.color = Some(color);
                }

                // Clears are masked like any other write.
                if let Some(ref mut blend) = cx.applied.blend {
                    if blend.write_mask != ColorWriteMask::all() {
                        blend.write_mask = ColorWriteMask::all();
                        visitor.set_color_write(blend.write_mask);
                        cx.dirty |= Dirty::BLEND;
                    }
                }
            }

            if options.contains(ClearOptions::DEPTH) {
                if cx.clear.depth != Some(depth) {
                    visitor.set_clear_depth(depth);
                    cx.clear.depth = Some(depth);
                }

                if let Some((ref mut ds, _)) = cx.applied.depth_stencil {
                    if !ds.depth_write {
                        ds.depth_write = true;
                        visitor.set_depth_write(true);
                        cx.dirty |= Dirty::DEPTH_STENCIL;
                    }
                }
            }

            if options.contains(ClearOptions::STENCIL) {
                if cx.clear.stencil != Some(stencil) {
                    visitor.set_clear_stencil(stencil);
                    cx.clear.stencil = Some(stencil);
                }

                if let Some((ref mut ds, _)) = cx.applied.depth_stencil {
                    if ds.stencil_write_mask != 0xFF {
                        ds.stencil_write_mask = 0xFF;
                        visitor.set_stencil_write_mask(0xFF);
                        cx.dirty |= Dirty::DEPTH_STENCIL;
                    }
                }
            }

            visitor.clear(options);
            visitor.check()
        }
    }

    /// Clears the color buffer with `color` and the depth buffer with 1.0.
    pub fn clear_color(&mut self, color: Color) -> Result<()> {
        self.clear(ClearOptions::COLOR | ClearOptions::DEPTH, color, 1.0, 0)
    }

    /// Replaces the content of a vertex buffer. `data` must be exactly as long
    /// as the buffer.
    pub fn update_vertex_buffer<T: Pod>(&mut self, vb: VertexBufferHandle, data: &[T]) -> Result<()> {
        self.device.validate(vb, "vb")?;

        let bytes: &[u8] = bytemuck::cast_slice(data);
        let device = &mut *self.device;
        let entry = resolve_entry(&device.vertex_buffers, vb)?;

        if bytes.len() != entry.object.size() {
            return Err(Error::InvalidArgument(
                "data",
                format!("expected {} bytes, got {}.", entry.object.size(), bytes.len()),
            ));
        }

        unsafe {
            device
                .visitor
                .update_buffer(BufferTarget::Vertex, entry.native, entry.object.usage, bytes);
            device.visitor.check()
        }
    }

    /// Replaces the content of an index buffer. `data` must be exactly as long
    /// as the buffer.
    pub fn update_index_buffer<T: Pod>(&mut self, ib: IndexBufferHandle, data: &[T]) -> Result<()> {
        self.device.validate(ib, "ib")?;

        let bytes: &[u8] = bytemuck::cast_slice(data);
        let device = &mut *self.device;
        let entry = resolve_entry(&device.index_buffers, ib)?;

        if bytes.len() != entry.object.size() {
            return Err(Error::InvalidArgument(
                "data",
                format!("expected {} bytes, got {}.", entry.object.size(), bytes.len()),
            ));
        }

        unsafe {
            device
                .visitor
                .update_buffer(BufferTarget::Index, entry.native, entry.object.usage, bytes);
            device.visitor.check()
        }
    }

    /// Replaces the content of a constant buffer. The first update decides the
    /// size of the buffer, later ones must match it.
    pub fn update_constant_buffer<T: Pod>(&mut self, buffer: ConstantBufferHandle, data: &T) -> Result<()> {
        self.device.validate(buffer, "buffer")?;

        let bytes = bytemuck::bytes_of(data);
        if bytes.is_empty() {
            return Err(Error::InvalidArgument("data", "must not be empty.".into()));
        }

        let device = &mut *self.device;
        let entry = device
            .constant_buffers
            .get_mut(buffer.handle())
            .ok_or(Error::Disposed("buffer", ConstantBufferHandle::KIND))?;

        match entry.object.size {
            Some(size) if size != bytes.len() => {
                return Err(Error::InvalidArgument(
                    "data",
                    format!("expected {} bytes, got {}.", size, bytes.len()),
                ));
            }
            _ => entry.object.size = Some(bytes.len()),
        }

        unsafe {
            device
                .visitor
                .update_buffer(BufferTarget::Uniform, entry.native, entry.object.usage, bytes);
            device.visitor.check()
        }
    }

    /// Replaces the image of mip `level` of a texture.
    pub fn update_texture<T: Pod>(&mut self, texture: Texture2DHandle, level: u32, data: &[T]) -> Result<()> {
        self.device.validate(texture, "texture")?;

        let bytes: &[u8] = bytemuck::cast_slice(data);
        let device = &mut *self.device;
        let entry = resolve_entry(&device.textures, texture)?;
        let object = entry.object;

        if level >= object.mip_levels {
            return Err(Error::OutOfRange(
                "level",
                format!("{} is not below the {} mip levels.", level, object.mip_levels),
            ));
        }

        if object.format.is_compressed() {
            return Err(Error::NotSupported(format!(
                "updating {:?} textures.",
                object.format
            )));
        }

        if bytes.len() != object.level_size(level) {
            return Err(Error::InvalidArgument(
                "data",
                format!("expected {} bytes, got {}.", object.level_size(level), bytes.len()),
            ));
        }

        unsafe {
            device.visitor.update_texture(entry.native, &object, level, bytes);
            device.context.forget_texture_unit(0);
            device.visitor.check()
        }
    }

    /// Regenerates mip levels 1.. of a texture from its level 0.
    pub fn generate_mips(&mut self, texture: Texture2DHandle) -> Result<()> {
        self.device.validate(texture, "texture")?;

        let device = &mut *self.device;
        let entry = resolve_entry(&device.textures, texture)?;

        if entry.object.format.is_compressed() {
            return Err(Error::NotSupported(format!(
                "generating mips of {:?} textures.",
                entry.object.format
            )));
        }

        unsafe {
            device.visitor.generate_mips(entry.native);
            device.context.forget_texture_unit(0);
            device.visitor.check()
        }
    }
}
