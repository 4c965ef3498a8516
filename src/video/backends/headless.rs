//! A backend without any native device behind it.
//!
//! Every call is recorded into a `Journal`, which is how the device layer is
//! tested, and errors can be injected to fail the next `check`.

use super::super::assets::prelude::*;
use super::super::errors::{Error, Result};
use super::super::resources::Texture2D;
use super::{BufferTarget, Capabilities, NativeHandle, Visitor};

use crate::math::Color;
use crate::utils::Journal;

/// A native call received by `HeadlessVisitor`.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MakeCurrent,
    DetachCurrent,
    CreateTexture(NativeHandle, u32),
    UpdateTexture(NativeHandle, u32, usize),
    GenerateMips(NativeHandle),
    DeleteTexture(NativeHandle),
    CreateSampler(NativeHandle),
    DeleteSampler(NativeHandle),
    CreateBuffer(BufferTarget, NativeHandle, usize),
    UpdateBuffer(BufferTarget, NativeHandle, usize),
    DeleteBuffer(NativeHandle),
    CreateShader(NativeHandle),
    DeleteShader(NativeHandle),
    UseProgram(NativeHandle),
    BindVertexBuffer(NativeHandle, Vec<VertexAttribute>),
    BindIndexBuffer(NativeHandle),
    BindUniformBuffer(u32, NativeHandle),
    BindTexture(u32, NativeHandle),
    BindSampler(u32, NativeHandle),
    DepthTest(bool),
    DepthWrite(bool),
    DepthFunc(Comparison),
    StencilTest(bool),
    StencilWriteMask(u8),
    StencilFunc(StencilFace, Comparison, i32, u8),
    StencilOp(StencilFace, StencilOperation, StencilOperation, StencilOperation),
    CullMode(CullMode),
    FrontFace(FrontFace),
    FillMode(FillMode),
    Blend(bool),
    BlendFunc(Blend, Blend, Blend, Blend),
    BlendEquation(BlendOperation, BlendOperation),
    ColorWrite(ColorWriteMask),
    ClearColor(Color),
    ClearDepth(f32),
    ClearStencil(i32),
    Clear(ClearOptions),
    Draw(PrimitiveType, u32, u32),
    DrawIndexed(PrimitiveType, u32, IndexFormat),
}

impl Call {
    /// Returns true for the calls issued by depth-stencil state changes.
    pub fn is_depth_stencil(&self) -> bool {
        match self {
            Call::DepthTest(_)
            | Call::DepthWrite(_)
            | Call::DepthFunc(_)
            | Call::StencilTest(_)
            | Call::StencilWriteMask(_)
            | Call::StencilFunc(..)
            | Call::StencilOp(..) => true,
            _ => false,
        }
    }

    /// Returns true for the calls issued by rasterizer or blend state changes.
    pub fn is_fixed_function(&self) -> bool {
        match self {
            Call::CullMode(_)
            | Call::FrontFace(_)
            | Call::FillMode(_)
            | Call::Blend(_)
            | Call::BlendFunc(..)
            | Call::BlendEquation(..)
            | Call::ColorWrite(_) => true,
            _ => self.is_depth_stencil(),
        }
    }

    pub fn is_delete(&self) -> bool {
        match self {
            Call::DeleteTexture(_)
            | Call::DeleteSampler(_)
            | Call::DeleteBuffer(_)
            | Call::DeleteShader(_) => true,
            _ => false,
        }
    }
}

pub struct HeadlessVisitor {
    capabilities: Capabilities,
    journal: Journal<Call>,
    next: NativeHandle,
}

impl HeadlessVisitor {
    pub fn new(capabilities: Capabilities) -> Self {
        HeadlessVisitor {
            capabilities,
            journal: Journal::new(),
            next: 1,
        }
    }

    /// Returns a handle to the record of every call this visitor receives.
    pub fn journal(&self) -> Journal<Call> {
        self.journal.clone()
    }

    fn allocate(&mut self) -> NativeHandle {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for HeadlessVisitor {
    fn default() -> Self {
        HeadlessVisitor::new(Capabilities::default())
    }
}

impl Visitor for HeadlessVisitor {
    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    unsafe fn make_current(&mut self) -> Result<()> {
        self.journal.record(Call::MakeCurrent);
        Ok(())
    }

    unsafe fn detach_current(&mut self) -> Result<()> {
        self.journal.record(Call::DetachCurrent);
        Ok(())
    }

    unsafe fn check(&mut self) -> Result<()> {
        match self.journal.take_error() {
            Some(err) => Err(Error::Native(err)),
            None => Ok(()),
        }
    }

    unsafe fn create_texture(&mut self, texture: &Texture2D, _: Option<&[u8]>) -> Result<NativeHandle> {
        let id = self.allocate();
        self.journal.record(Call::CreateTexture(id, texture.mip_levels));
        Ok(id)
    }

    unsafe fn update_texture(&mut self, id: NativeHandle, _: &Texture2D, level: u32, data: &[u8]) {
        self.journal.record(Call::UpdateTexture(id, level, data.len()));
    }

    unsafe fn generate_mips(&mut self, id: NativeHandle) {
        self.journal.record(Call::GenerateMips(id));
    }

    unsafe fn delete_texture(&mut self, id: NativeHandle) {
        self.journal.record(Call::DeleteTexture(id));
    }

    unsafe fn create_sampler(&mut self, _: &SamplerInfo) -> Result<NativeHandle> {
        let id = self.allocate();
        self.journal.record(Call::CreateSampler(id));
        Ok(id)
    }

    unsafe fn delete_sampler(&mut self, id: NativeHandle) {
        self.journal.record(Call::DeleteSampler(id));
    }

    unsafe fn create_buffer(
        &mut self,
        target: BufferTarget,
        _: BufferUsage,
        size: usize,
        _: Option<&[u8]>,
    ) -> Result<NativeHandle> {
        let id = self.allocate();
        self.journal.record(Call::CreateBuffer(target, id, size));
        Ok(id)
    }

    unsafe fn update_buffer(
        &mut self,
        target: BufferTarget,
        id: NativeHandle,
        _: BufferUsage,
        data: &[u8],
    ) {
        self.journal.record(Call::UpdateBuffer(target, id, data.len()));
    }

    unsafe fn delete_buffer(&mut self, id: NativeHandle) {
        self.journal.record(Call::DeleteBuffer(id));
    }

    unsafe fn create_shader(&mut self, _: &ShaderParams, _: &str, _: &str) -> Result<NativeHandle> {
        let id = self.allocate();
        self.journal.record(Call::CreateShader(id));
        Ok(id)
    }

    unsafe fn delete_shader(&mut self, id: NativeHandle) {
        self.journal.record(Call::DeleteShader(id));
    }

    unsafe fn use_program(&mut self, id: NativeHandle) {
        self.journal.record(Call::UseProgram(id));
    }

    unsafe fn bind_vertex_buffer(&mut self, id: NativeHandle, attributes: &[VertexAttribute]) {
        self.journal
            .record(Call::BindVertexBuffer(id, attributes.to_vec()));
    }

    unsafe fn bind_index_buffer(&mut self, id: NativeHandle) {
        self.journal.record(Call::BindIndexBuffer(id));
    }

    unsafe fn bind_uniform_buffer(&mut self, binding: u32, id: NativeHandle) {
        self.journal.record(Call::BindUniformBuffer(binding, id));
    }

    unsafe fn bind_texture(&mut self, unit: u32, id: NativeHandle) {
        self.journal.record(Call::BindTexture(unit, id));
    }

    unsafe fn bind_sampler(&mut self, unit: u32, id: NativeHandle) {
        self.journal.record(Call::BindSampler(unit, id));
    }

    unsafe fn set_depth_test(&mut self, enabled: bool) {
        self.journal.record(Call::DepthTest(enabled));
    }

    unsafe fn set_depth_write(&mut self, enabled: bool) {
        self.journal.record(Call::DepthWrite(enabled));
    }

    unsafe fn set_depth_func(&mut self, comparison: Comparison) {
        self.journal.record(Call::DepthFunc(comparison));
    }

    unsafe fn set_stencil_test(&mut self, enabled: bool) {
        self.journal.record(Call::StencilTest(enabled));
    }

    unsafe fn set_stencil_write_mask(&mut self, mask: u8) {
        self.journal.record(Call::StencilWriteMask(mask));
    }

    unsafe fn set_stencil_func(
        &mut self,
        face: StencilFace,
        comparison: Comparison,
        reference: i32,
        mask: u8,
    ) {
        self.journal
            .record(Call::StencilFunc(face, comparison, reference, mask));
    }

    unsafe fn set_stencil_op(
        &mut self,
        face: StencilFace,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    ) {
        self.journal
            .record(Call::StencilOp(face, fail, depth_fail, pass));
    }

    unsafe fn set_cull_mode(&mut self, mode: CullMode) {
        self.journal.record(Call::CullMode(mode));
    }

    unsafe fn set_front_face(&mut self, face: FrontFace) {
        self.journal.record(Call::FrontFace(face));
    }

    unsafe fn set_fill_mode(&mut self, mode: FillMode) {
        self.journal.record(Call::FillMode(mode));
    }

    unsafe fn set_blend(&mut self, enabled: bool) {
        self.journal.record(Call::Blend(enabled));
    }

    unsafe fn set_blend_func(&mut self, src: Blend, dst: Blend, src_alpha: Blend, dst_alpha: Blend) {
        self.journal
            .record(Call::BlendFunc(src, dst, src_alpha, dst_alpha));
    }

    unsafe fn set_blend_equation(&mut self, color: BlendOperation, alpha: BlendOperation) {
        self.journal.record(Call::BlendEquation(color, alpha));
    }

    unsafe fn set_color_write(&mut self, mask: ColorWriteMask) {
        self.journal.record(Call::ColorWrite(mask));
    }

    unsafe fn set_clear_color(&mut self, color: Color) {
        self.journal.record(Call::ClearColor(color));
    }

    unsafe fn set_clear_depth(&mut self, depth: f32) {
        self.journal.record(Call::ClearDepth(depth));
    }

    unsafe fn set_clear_stencil(&mut self, stencil: i32) {
        self.journal.record(Call::ClearStencil(stencil));
    }

    unsafe fn clear(&mut self, options: ClearOptions) {
        self.journal.record(Call::Clear(options));
    }

    unsafe fn draw(&mut self, primitive: PrimitiveType, first: u32, count: u32) {
        self.journal.record(Call::Draw(primitive, first, count));
    }

    unsafe fn draw_indexed(&mut self, primitive: PrimitiveType, count: u32, format: IndexFormat) {
        self.journal
            .record(Call::DrawIndexed(primitive, count, format));
    }
}
