//! The backend of the device layer, which should be responsible for only one
//! thing: issuing low-level native video API calls.
//!
//! Calls never report errors individually. The device groups them and asks the
//! backend for its error state with `check` after every group.

pub mod headless;

pub mod gl;

use super::assets::prelude::*;
use super::errors::Result;
use super::resources::Texture2D;
use crate::math::Color;

/// The name the native API gives to an object.
pub type NativeHandle = u32;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BufferTarget {
    Vertex,
    Index,
    Uniform,
}

/// What the native device supports.
#[derive(Debug, Clone, PartialEq)]
pub struct Capabilities {
    pub version: String,
    pub supports_anisotropic_filtering: bool,
    pub max_anisotropy: u32,
    pub max_texture_lod_bias: f32,
    pub max_texture_size: u32,
    pub max_texture_units: u32,
    pub max_uniform_buffer_bindings: u32,
    pub max_vertex_attributes: u32,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            version: "Headless".into(),
            supports_anisotropic_filtering: true,
            max_anisotropy: 16,
            max_texture_lod_bias: 16.0,
            max_texture_size: 16384,
            max_texture_units: 16,
            max_uniform_buffer_bindings: 36,
            max_vertex_attributes: 16,
        }
    }
}

pub trait Visitor {
    fn capabilities(&self) -> &Capabilities;

    /// Makes the native context current on the calling thread.
    unsafe fn make_current(&mut self) -> Result<()>;

    unsafe fn detach_current(&mut self) -> Result<()>;

    /// Queries and resets the native error state.
    unsafe fn check(&mut self) -> Result<()>;

    /// Allocates every mip level of `texture`, filling level 0 with `data` if
    /// present.
    unsafe fn create_texture(
        &mut self,
        texture: &Texture2D,
        data: Option<&[u8]>,
    ) -> Result<NativeHandle>;

    unsafe fn update_texture(
        &mut self,
        id: NativeHandle,
        texture: &Texture2D,
        level: u32,
        data: &[u8],
    );

    unsafe fn generate_mips(&mut self, id: NativeHandle);

    unsafe fn delete_texture(&mut self, id: NativeHandle);

    unsafe fn create_sampler(&mut self, info: &SamplerInfo) -> Result<NativeHandle>;

    unsafe fn delete_sampler(&mut self, id: NativeHandle);

    unsafe fn create_buffer(
        &mut self,
        target: BufferTarget,
        usage: BufferUsage,
        size: usize,
        data: Option<&[u8]>,
    ) -> Result<NativeHandle>;

    /// Replaces the whole content of a buffer, reallocating its storage when the
    /// size changes.
    unsafe fn update_buffer(
        &mut self,
        target: BufferTarget,
        id: NativeHandle,
        usage: BufferUsage,
        data: &[u8],
    );

    unsafe fn delete_buffer(&mut self, id: NativeHandle);

    unsafe fn create_shader(
        &mut self,
        params: &ShaderParams,
        vs: &str,
        fs: &str,
    ) -> Result<NativeHandle>;

    unsafe fn delete_shader(&mut self, id: NativeHandle);

    unsafe fn use_program(&mut self, id: NativeHandle);

    unsafe fn bind_vertex_buffer(&mut self, id: NativeHandle, attributes: &[VertexAttribute]);

    unsafe fn bind_index_buffer(&mut self, id: NativeHandle);

    unsafe fn bind_uniform_buffer(&mut self, binding: u32, id: NativeHandle);

    unsafe fn bind_texture(&mut self, unit: u32, id: NativeHandle);

    unsafe fn bind_sampler(&mut self, unit: u32, id: NativeHandle);

    unsafe fn set_depth_test(&mut self, enabled: bool);

    unsafe fn set_depth_write(&mut self, enabled: bool);

    unsafe fn set_depth_func(&mut self, comparison: Comparison);

    unsafe fn set_stencil_test(&mut self, enabled: bool);

    unsafe fn set_stencil_write_mask(&mut self, mask: u8);

    unsafe fn set_stencil_func(
        &mut self,
        face: StencilFace,
        comparison: Comparison,
        reference: i32,
        mask: u8,
    );

    unsafe fn set_stencil_op(
        &mut self,
        face: StencilFace,
        fail: StencilOperation,
        depth_fail: StencilOperation,
        pass: StencilOperation,
    );

    unsafe fn set_cull_mode(&mut self, mode: CullMode);

    unsafe fn set_front_face(&mut self, face: FrontFace);

    unsafe fn set_fill_mode(&mut self, mode: FillMode);

    unsafe fn set_blend(&mut self, enabled: bool);

    unsafe fn set_blend_func(&mut self, src: Blend, dst: Blend, src_alpha: Blend, dst_alpha: Blend);

    unsafe fn set_blend_equation(&mut self, color: BlendOperation, alpha: BlendOperation);

    unsafe fn set_color_write(&mut self, mask: ColorWriteMask);

    unsafe fn set_clear_color(&mut self, color: Color);

    unsafe fn set_clear_depth(&mut self, depth: f32);

    unsafe fn set_clear_stencil(&mut self, stencil: i32);

    unsafe fn clear(&mut self, options: ClearOptions);

    unsafe fn draw(&mut self, primitive: PrimitiveType, first: u32, count: u32);

    unsafe fn draw_indexed(&mut self, primitive: PrimitiveType, count: u32, format: IndexFormat);
}
